use super::terms::split_terms;
use crate::error::ParseError;
use tracing::debug;

/// Frequency and phase recovered from a function argument.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InnerTerms {
    /// Sum of the `x` coefficients, or `1` when there are none.
    pub frequency: f64,
    /// Horizontal translation, so the argument reads `frequency * (x - phase_shift)`.
    pub phase_shift: f64,
}

/// Parse a function argument such as `2x-1` or `x/2+π`.
///
/// The argument is a sum of signed terms. Coefficients of `x` add up to the
/// frequency and constants add up to `c`, then `phase_shift = -c / frequency`.
///
/// An argument without any `x` term (`sin(5)`) is degenerate but tolerated:
/// the frequency falls back to `1` so the phase shift stays well defined.
pub fn parse_inner(expr: &str) -> Result<InnerTerms, ParseError> {
    if expr == "x" {
        return Ok(InnerTerms {
            frequency: 1.0,
            phase_shift: 0.0,
        });
    }
    if expr.is_empty() {
        return Err(ParseError::EmptyArgument);
    }

    let (x_coeff, constant) = split_terms(expr)?
        .into_iter()
        .fold((0.0, 0.0), |(x_coeff, constant), term| {
            if term.variable {
                (x_coeff + term.coefficient, constant)
            } else {
                (x_coeff, constant + term.coefficient)
            }
        });

    if !x_coeff.is_finite() {
        return Err(ParseError::NonFinite { what: "frequency" });
    }
    if !constant.is_finite() {
        return Err(ParseError::NonFinite { what: "phase shift" });
    }

    let frequency = if x_coeff == 0.0 {
        debug!(argument = expr, "argument has no x term, using frequency 1");
        1.0
    } else {
        x_coeff
    };
    let phase_shift = -constant / frequency;
    if !phase_shift.is_finite() {
        return Err(ParseError::NonFinite { what: "phase shift" });
    }

    Ok(InnerTerms {
        frequency,
        // avoid printing -0
        phase_shift: if phase_shift == 0.0 { 0.0 } else { phase_shift },
    })
}
