//! Presentation-owned display state.
//!
//! The parsing core is stateless; whatever is "currently on screen" lives in a
//! [`PlotSession`] that the caller owns and passes around explicitly.

use crate::describe::Description;
use crate::pipeline::{Analysis, Pipeline, Plot};

/// Text shown in the comparison panel while there is nothing to compare.
pub const COMPARISON_PLACEHOLDER: &str = "Enter a valid expression to compare it with its reference curve.";

/// Contents of the text panels next to the chart.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "panel", rename_all = "snake_case"))]
pub enum Panel {
    /// Nothing submitted yet.
    #[default]
    Empty,
    /// Analysis of the last accepted expression.
    Analysis { description: Description },
    /// The last submission was rejected.
    Error {
        source_text: String,
        reason: String,
        guidance: &'static [&'static str],
    },
}

/// Last chart and panel contents for one display surface.
///
/// A rejected submission replaces the text panels with an error panel and
/// keeps the previously plotted chart on screen.
#[derive(Debug, Clone, Default)]
pub struct PlotSession {
    pipeline: Pipeline,
    chart: Option<Plot>,
    panel: Panel,
}

impl PlotSession {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            chart: None,
            panel: Panel::Empty,
        }
    }

    /// Run one request and update the displayed state.
    pub fn submit(&mut self, text: &str) -> &Panel {
        match self.pipeline.run(text) {
            Analysis::Plot(plot) => {
                self.panel = Panel::Analysis {
                    description: plot.description.clone(),
                };
                self.chart = Some(plot);
            }
            Analysis::Rejected(rejection) => {
                self.panel = Panel::Error {
                    source_text: rejection.params.source_text().to_string(),
                    reason: rejection.reason,
                    guidance: rejection.guidance,
                };
            }
        }
        &self.panel
    }

    /// The chart currently on screen.
    pub fn chart(&self) -> Option<&Plot> {
        self.chart.as_ref()
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    /// Comparison panel lines, or the placeholder when there is no analysis.
    pub fn comparison(&self) -> Vec<&str> {
        match &self.panel {
            Panel::Analysis { description } => vec![
                description.comparison.amplitude.as_str(),
                description.comparison.period.as_str(),
                description.comparison.phase.as_str(),
                description.comparison.vertical.as_str(),
            ],
            Panel::Empty | Panel::Error { .. } => vec![COMPARISON_PLACEHOLDER],
        }
    }
}
