//! Text front end: normalization, parameter extraction and the argument parser.

use crate::error::ParseError;
use core::f64::consts::TAU;
use core::fmt;

mod extract;
mod inner;
mod lexer;
mod normalize;
mod terms;

pub use extract::*;
pub use inner::*;
pub use normalize::*;

/// Expressions offered by the input widget's preset list.
pub const PRESETS: &[&str] = &[
    "sin(x)",
    "cos(x)",
    "2*sin(x)",
    "0.5*cos(x)",
    "-sin(x)",
    "sin(2x)",
    "cos(0.5x)",
    "sin(x-1)",
    "cos(x+π/2)",
    "sin(x)+2",
    "cos(x)-1",
    "2*sen(x-1)+2",
    "-3*cos(0.5x+1)-1",
];

/// Base trigonometric function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrigKind {
    /// `sin(x)`, the fallback when only `sin` is present.
    #[default]
    Sine,
    /// `cos(x)`, chosen whenever `cos` is present.
    Cosine,
}

impl TrigKind {
    /// Function name as it appears in normalized text.
    pub fn name(self) -> &'static str {
        match self {
            TrigKind::Sine => "sin",
            TrigKind::Cosine => "cos",
        }
    }

    /// Evaluate the unmodified base function.
    pub fn eval(self, x: f64) -> f64 {
        match self {
            TrigKind::Sine => x.sin(),
            TrigKind::Cosine => x.cos(),
        }
    }
}

impl fmt::Display for TrigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric part of a parsed expression.
///
/// Describes `amplitude * base(frequency * (x - phase_shift)) + vertical_shift`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrigParams {
    /// Base function.
    pub kind: TrigKind,
    /// Vertical scale; a negative value flips the curve.
    pub amplitude: f64,
    /// Argument scale; never zero.
    pub frequency: f64,
    /// Horizontal translation.
    pub phase_shift: f64,
    /// Additive offset.
    pub vertical_shift: f64,
}

impl TrigParams {
    /// The unmodified base function.
    pub fn reference(kind: TrigKind) -> Self {
        Self {
            kind,
            amplitude: 1.0,
            frequency: 1.0,
            phase_shift: 0.0,
            vertical_shift: 0.0,
        }
    }

    /// Input span of one full cycle.
    pub fn period(&self) -> f64 {
        TAU / self.frequency.abs()
    }

    /// Evaluate the transformed function at `x`.
    pub fn value_at(&self, x: f64) -> f64 {
        self.amplitude * self.kind.eval(self.frequency * (x - self.phase_shift))
            + self.vertical_shift
    }

    /// Whether every parameter matches [`TrigParams::reference`].
    pub fn is_reference(&self) -> bool {
        *self == Self::reference(self.kind)
    }
}

impl Default for TrigParams {
    fn default() -> Self {
        Self::reference(TrigKind::default())
    }
}

/// Result of parsing one user request.
///
/// Built once per request and never mutated. When parsing fails the record is
/// still usable: numeric fields keep their defaults and
/// [`reason`](Self::reason) explains the rejection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExpressionParameters {
    #[cfg_attr(feature = "serde", serde(flatten))]
    params: TrigParams,
    source_text: String,
    valid: bool,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    reason: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip))]
    error: Option<ParseError>,
}

impl ExpressionParameters {
    pub(crate) fn accepted(params: TrigParams, source_text: &str) -> Self {
        Self {
            params,
            source_text: source_text.to_string(),
            valid: true,
            reason: None,
            error: None,
        }
    }

    pub(crate) fn rejected(error: ParseError, source_text: &str) -> Self {
        Self {
            params: TrigParams::default(),
            source_text: source_text.to_string(),
            valid: false,
            reason: Some(error.to_string()),
            error: Some(error),
        }
    }

    /// Whether extraction succeeded.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Why extraction failed.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// The structured rejection, if any.
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// The numeric parameters, only when extraction succeeded.
    pub fn params(&self) -> Option<TrigParams> {
        self.valid.then_some(self.params)
    }

    /// The text the user typed.
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn kind(&self) -> TrigKind {
        self.params.kind
    }

    pub fn amplitude(&self) -> f64 {
        self.params.amplitude
    }

    pub fn frequency(&self) -> f64 {
        self.params.frequency
    }

    pub fn phase_shift(&self) -> f64 {
        self.params.phase_shift
    }

    pub fn vertical_shift(&self) -> f64 {
        self.params.vertical_shift
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_round_trip() {
        let params = parse_expression("sin(x)").params().expect("valid");
        assert!(params.is_reference());
        for i in -50..=50 {
            let x = f64::from(i) * 0.13;
            assert_eq!(params.value_at(x), x.sin());
        }
    }

    #[test]
    fn value_at_applies_every_transformation() {
        let params = parse_expression("-3*cos(0.5x+1)-1")
            .params()
            .expect("valid");
        let x = 0.7;
        assert_relative_eq!(
            params.value_at(x),
            -3.0 * (0.5 * x + 1.0).cos() - 1.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(params.period(), 4.0 * core::f64::consts::PI);
    }

    #[test]
    fn presets_all_parse() {
        for preset in PRESETS {
            let params = parse_expression(preset);
            assert!(params.is_valid(), "{preset}: {:?}", params.reason());
        }
    }
}
