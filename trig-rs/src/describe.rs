//! Rule-based explanation of a parsed expression.
//!
//! Every sentence comes from a fixed template; the only variable parts are the
//! interpolated numbers.

use crate::expr::{ExpressionParameters, TrigParams};
use crate::kernel::{ConfigError, KernelLifecycle};
use core::f64::consts::PI;

/// One `label / value / description` row of the analysis panel.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AnalysisEntry {
    pub label: &'static str,
    pub value: String,
    pub description: String,
}

/// Comparison of each parameter against the reference function.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Comparison {
    pub amplitude: String,
    pub period: String,
    pub phase: String,
    pub vertical: String,
}

/// Structured text for the analysis and comparison panels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Description {
    pub analysis: Vec<AnalysisEntry>,
    pub comparison: Comparison,
    /// Transformations relative to the reference, empty for the reference itself.
    pub transformations: Vec<String>,
    reference: String,
}

impl Description {
    /// Transformations as one sentence.
    pub fn transformation_summary(&self) -> String {
        if self.transformations.is_empty() {
            format!("No transformations: the curve is identical to {}.", self.reference)
        } else {
            format!(
                "Applied to {}: {}.",
                self.reference,
                self.transformations.join("; ")
            )
        }
    }
}

/// Constructor config for [`Describer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescribeConfig {
    /// Maximum number of decimals printed.
    pub decimals: usize,
    /// Two values closer than this are treated as equal.
    pub tolerance: f64,
}

impl Default for DescribeConfig {
    fn default() -> Self {
        Self {
            decimals: 4,
            tolerance: 1e-9,
        }
    }
}

/// Maps parameters to the fixed phrase set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Describer {
    decimals: usize,
    tolerance: f64,
}

impl Default for Describer {
    fn default() -> Self {
        let config = DescribeConfig::default();
        Self {
            decimals: config.decimals,
            tolerance: config.tolerance,
        }
    }
}

impl KernelLifecycle for Describer {
    type Config = DescribeConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.decimals > 12 {
            return Err(ConfigError::InvalidArgument {
                arg: "decimals",
                reason: "at most 12 decimals are printed",
            });
        }
        if !config.tolerance.is_finite() {
            return Err(ConfigError::NonFinite { arg: "tolerance" });
        }
        if config.tolerance < 0.0 {
            return Err(ConfigError::InvalidArgument {
                arg: "tolerance",
                reason: "tolerance must not be negative",
            });
        }
        Ok(Self {
            decimals: config.decimals,
            tolerance: config.tolerance,
        })
    }
}

/// Describe a parsed expression with the default [`DescribeConfig`].
pub fn describe(params: &ExpressionParameters) -> Option<Description> {
    Describer::default().describe(params)
}

impl Describer {
    /// Describe a parsed expression; `None` when it was rejected.
    pub fn describe(&self, params: &ExpressionParameters) -> Option<Description> {
        params.params().map(|p| self.describe_params(&p))
    }

    /// Describe a parameter record.
    pub fn describe_params(&self, p: &TrigParams) -> Description {
        Description {
            analysis: self.analysis(p),
            comparison: Comparison {
                amplitude: self.amplitude_comparison(p),
                period: self.period_comparison(p),
                phase: self.phase_comparison(p),
                vertical: self.vertical_comparison(p),
            },
            transformations: self.transformations(p),
            reference: format!("{}(x)", p.kind),
        }
    }

    /// Canonical rendering such as `-3·cos(0.5·(x + 2)) - 1`.
    pub fn formula(&self, p: &TrigParams) -> String {
        let amplitude = if self.eq(p.amplitude, 1.0) {
            String::new()
        } else if self.eq(p.amplitude, -1.0) {
            "-".to_string()
        } else {
            format!("{}·", self.number(p.amplitude))
        };

        let shifted = if self.eq(p.phase_shift, 0.0) {
            "x".to_string()
        } else if p.phase_shift > 0.0 {
            format!("x - {}", self.number(p.phase_shift))
        } else {
            format!("x + {}", self.number(-p.phase_shift))
        };
        let argument = if self.eq(p.frequency, 1.0) {
            shifted
        } else {
            let negated = self.eq(p.frequency, -1.0);
            let frequency = if negated {
                "-".to_string()
            } else {
                self.number(p.frequency)
            };
            if self.eq(p.phase_shift, 0.0) {
                format!("{frequency}x")
            } else if negated {
                format!("-({shifted})")
            } else {
                format!("{frequency}·({shifted})")
            }
        };

        let offset = if self.eq(p.vertical_shift, 0.0) {
            String::new()
        } else if p.vertical_shift > 0.0 {
            format!(" + {}", self.number(p.vertical_shift))
        } else {
            format!(" - {}", self.number(-p.vertical_shift))
        };

        format!("{amplitude}{}({argument}){offset}", p.kind)
    }

    fn analysis(&self, p: &TrigParams) -> Vec<AnalysisEntry> {
        let reach = p.amplitude.abs();
        vec![
            AnalysisEntry {
                label: "Function",
                value: format!("f(x) = {}", self.formula(p)),
                description: format!("Built from {}(x) by the transformations below.", p.kind),
            },
            AnalysisEntry {
                label: "Amplitude",
                value: self.value(p.amplitude),
                description: format!(
                    "The curve reaches {} above and below its midline.",
                    self.number(reach)
                ),
            },
            AnalysisEntry {
                label: "Frequency",
                value: self.value(p.frequency),
                description: format!(
                    "{} full cycles every 2π units of x.",
                    self.number(p.frequency.abs())
                ),
            },
            AnalysisEntry {
                label: "Period",
                value: self.value(p.period()),
                description: "Length of one full cycle, 2π / |frequency|.".to_string(),
            },
            AnalysisEntry {
                label: "Phase shift",
                value: self.value(p.phase_shift),
                description: "Horizontal translation; positive values move the curve right."
                    .to_string(),
            },
            AnalysisEntry {
                label: "Vertical shift",
                value: self.value(p.vertical_shift),
                description: format!(
                    "The midline sits at y = {}.",
                    self.number(p.vertical_shift)
                ),
            },
            AnalysisEntry {
                label: "Range",
                value: format!(
                    "[{}, {}]",
                    self.number(p.vertical_shift - reach),
                    self.number(p.vertical_shift + reach)
                ),
                description: "Every value the function takes.".to_string(),
            },
        ]
    }

    fn amplitude_comparison(&self, p: &TrigParams) -> String {
        let reach = p.amplitude.abs();
        if self.eq(reach, 0.0) {
            return format!(
                "Amplitude 0: the curve collapses onto the line y = {}.",
                self.number(p.vertical_shift)
            );
        }
        let mut text = if self.eq(reach, 1.0) {
            format!("Same amplitude as {}(x).", p.kind)
        } else if reach > 1.0 {
            format!(
                "Amplitude {} is larger than 1: the curve is stretched vertically.",
                self.number(reach)
            )
        } else {
            format!(
                "Amplitude {} is smaller than 1: the curve is compressed vertically.",
                self.number(reach)
            )
        };
        if p.amplitude < 0.0 {
            text.push_str(" The negative sign inverts the curve.");
        }
        text
    }

    fn period_comparison(&self, p: &TrigParams) -> String {
        let speed = p.frequency.abs();
        let mut text = if self.eq(speed, 1.0) {
            format!("Same period as {}(x): 2π.", p.kind)
        } else if speed > 1.0 {
            format!(
                "Accelerated: the period shrinks from 2π to {}.",
                self.value(p.period())
            )
        } else {
            format!(
                "Decelerated: the period grows from 2π to {}.",
                self.value(p.period())
            )
        };
        if p.frequency < 0.0 {
            text.push_str(" The negative frequency also mirrors the curve horizontally.");
        }
        text
    }

    fn phase_comparison(&self, p: &TrigParams) -> String {
        if self.eq(p.phase_shift, 0.0) {
            "No horizontal shift.".to_string()
        } else if p.phase_shift > 0.0 {
            format!(
                "Shifted {} {} to the right.",
                self.value(p.phase_shift),
                self.units(p.phase_shift)
            )
        } else {
            format!(
                "Shifted {} {} to the left.",
                self.value(-p.phase_shift),
                self.units(p.phase_shift)
            )
        }
    }

    fn vertical_comparison(&self, p: &TrigParams) -> String {
        if self.eq(p.vertical_shift, 0.0) {
            "No vertical shift: the midline stays at y = 0.".to_string()
        } else if p.vertical_shift > 0.0 {
            format!(
                "Raised {} {}.",
                self.number(p.vertical_shift),
                self.units(p.vertical_shift)
            )
        } else {
            format!(
                "Lowered {} {}.",
                self.number(-p.vertical_shift),
                self.units(p.vertical_shift)
            )
        }
    }

    fn units(&self, shift: f64) -> &'static str {
        if self.eq(shift.abs(), 1.0) {
            "unit"
        } else {
            "units"
        }
    }

    fn transformations(&self, p: &TrigParams) -> Vec<String> {
        let mut out = Vec::new();
        let reach = p.amplitude.abs();
        if self.eq(reach, 0.0) {
            out.push("collapse to a constant".to_string());
        } else {
            if p.amplitude < 0.0 {
                out.push("reflection across the midline".to_string());
            }
            if !self.eq(reach, 1.0) {
                let verb = if reach > 1.0 { "stretch" } else { "compression" };
                out.push(format!("vertical {verb} by {}", self.number(reach)));
            }
        }

        let speed = p.frequency.abs();
        if p.frequency < 0.0 {
            out.push("reflection across the y-axis".to_string());
        }
        if !self.eq(speed, 1.0) {
            let verb = if speed > 1.0 { "compression" } else { "stretch" };
            out.push(format!(
                "horizontal {verb} by {}",
                self.number(1.0 / speed)
            ));
        }

        if !self.eq(p.phase_shift, 0.0) {
            let direction = if p.phase_shift > 0.0 { "right" } else { "left" };
            out.push(format!(
                "shift {} {direction}",
                self.value(p.phase_shift.abs())
            ));
        }
        if !self.eq(p.vertical_shift, 0.0) {
            let direction = if p.vertical_shift > 0.0 { "up" } else { "down" };
            out.push(format!(
                "shift {} {direction}",
                self.number(p.vertical_shift.abs())
            ));
        }
        out
    }

    fn eq(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.tolerance
    }

    /// Number with at most `decimals` decimals, trailing zeros trimmed.
    fn number(&self, v: f64) -> String {
        let text = format!("{v:.*}", self.decimals);
        let text = if text.contains('.') {
            text.trim_end_matches('0').trim_end_matches('.')
        } else {
            text.as_str()
        };
        if text == "-0" {
            "0".to_string()
        } else {
            text.to_string()
        }
    }

    /// Number followed by its multiple-of-π form when it has a short one.
    fn value(&self, v: f64) -> String {
        match self.pi_multiple(v) {
            Some(pi) => format!("{} ({pi})", self.number(v)),
            None => self.number(v),
        }
    }

    fn pi_multiple(&self, v: f64) -> Option<String> {
        if self.eq(v, 0.0) {
            return None;
        }
        [1i64, 2, 3, 4, 6].into_iter().find_map(|den| {
            let scaled = v / PI * den as f64;
            let num = scaled.round();
            if (scaled - num).abs() > 1e-9 || num == 0.0 || num.abs() > 1e6 {
                return None;
            }
            let num = num as i64;
            let g = gcd(num.unsigned_abs(), den.unsigned_abs()) as i64;
            let (num, den) = (num / g, den / g);
            let head = match num {
                1 => "π".to_string(),
                -1 => "-π".to_string(),
                n => format!("{n}π"),
            };
            Some(if den == 1 {
                head
            } else {
                format!("{head}/{den}")
            })
        })
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}
