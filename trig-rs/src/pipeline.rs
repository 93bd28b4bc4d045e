//! One request: normalize, extract, sample and describe.

use crate::describe::{Describer, Description};
use crate::expr::{extract, normalize, ExpressionParameters};
use crate::sample::{Sampled, SamplerKernel};
use crate::traits::PlotSample;
use tracing::debug;

/// A successfully analyzed expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Plot {
    pub params: ExpressionParameters,
    pub samples: Sampled,
    pub description: Description,
}

/// An expression that could not be plotted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rejection {
    pub params: ExpressionParameters,
    pub reason: String,
    /// Example inputs to show next to the reason.
    pub guidance: &'static [&'static str],
}

/// Outcome of one request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "snake_case"))]
pub enum Analysis {
    Plot(Plot),
    Rejected(Rejection),
}

impl Analysis {
    pub fn params(&self) -> &ExpressionParameters {
        match self {
            Analysis::Plot(plot) => &plot.params,
            Analysis::Rejected(rejection) => &rejection.params,
        }
    }

    pub fn is_plot(&self) -> bool {
        matches!(self, Analysis::Plot(_))
    }
}

/// Sampler and describer settings for [`Pipeline::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pipeline {
    sampler: SamplerKernel,
    describer: Describer,
}

impl Pipeline {
    pub fn new(sampler: SamplerKernel, describer: Describer) -> Self {
        Self { sampler, describer }
    }

    /// Analyze raw user text.
    ///
    /// Sampling and description only run on a valid record. A valid record
    /// whose curve cannot be sampled is reported as a rejection as well.
    pub fn run(&self, text: &str) -> Analysis {
        let params = extract(&normalize(text), text);
        if let Some(err) = params.error() {
            return Analysis::Rejected(Rejection {
                reason: err.to_string(),
                guidance: err.guidance(),
                params,
            });
        }

        let samples = match self.sampler.run(&params) {
            Ok(samples) => samples,
            Err(err) => {
                debug!(source = text, %err, "sampling failed");
                return Analysis::Rejected(Rejection {
                    reason: err.to_string(),
                    guidance: crate::error::ACCEPTED_SYNTAX,
                    params,
                });
            }
        };
        match self.describer.describe(&params) {
            Some(description) => Analysis::Plot(Plot {
                params,
                samples,
                description,
            }),
            None => Analysis::Rejected(Rejection {
                reason: "expression has no parameters to describe".to_string(),
                guidance: crate::error::ACCEPTED_SYNTAX,
                params,
            }),
        }
    }
}

/// Analyze raw user text with the default settings.
pub fn analyze(text: &str) -> Analysis {
    Pipeline::default().run(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::KernelLifecycle;
    use crate::sample::SamplerConfig;

    #[test]
    fn valid_text_is_plotted() {
        let analysis = analyze("2*sen(x-1)+2");
        let Analysis::Plot(plot) = analysis else {
            panic!("expected a plot");
        };
        assert_eq!(plot.params.source_text(), "2*sen(x-1)+2");
        assert_eq!(plot.samples.user.len(), 1000);
        assert_eq!(plot.description.analysis.len(), 7);
    }

    #[test]
    fn invalid_text_is_rejected_with_guidance() {
        let analysis = analyze("banana(x)");
        assert!(!analysis.is_plot());
        let Analysis::Rejected(rejection) = analysis else {
            panic!("expected a rejection");
        };
        assert!(!rejection.reason.is_empty());
        assert!(!rejection.guidance.is_empty());
        assert!(!rejection.params.is_valid());
    }

    #[test]
    fn custom_sampler_is_used() {
        let sampler = SamplerKernel::try_new(SamplerConfig {
            samples: 64,
            ..SamplerConfig::default()
        })
        .expect("valid config");
        let pipeline = Pipeline::new(sampler, Describer::default());
        let Analysis::Plot(plot) = pipeline.run("cos(3x)") else {
            panic!("expected a plot");
        };
        assert_eq!(plot.samples.reference.len(), 64);
    }

    #[test]
    fn unsampleable_curve_is_rejected() {
        let analysis = analyze("sin(1e-320x)");
        let Analysis::Rejected(rejection) = analysis else {
            panic!("expected a rejection");
        };
        assert!(rejection.params.is_valid());
        assert!(rejection.reason.contains("finite domain"));
    }
}
