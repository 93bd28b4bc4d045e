use super::inner::parse_inner;
use super::normalize::normalize;
use super::terms::split_terms;
use super::{ExpressionParameters, TrigKind, TrigParams};
use crate::error::ParseError;
use tracing::{debug, trace};

/// Normalize `text` and extract its parameters.
pub fn parse_expression(text: &str) -> ExpressionParameters {
    extract(&normalize(text), text)
}

/// Extract parameters from normalized text, keeping `original` for display.
///
/// Never fails: a rejection is reported through
/// [`ExpressionParameters::is_valid`] and [`ExpressionParameters::reason`],
/// with every numeric field left at its default.
pub fn extract(normalized: &str, original: &str) -> ExpressionParameters {
    match try_extract(normalized) {
        Ok(params) => {
            trace!(source = original, ?params, "extracted parameters");
            ExpressionParameters::accepted(params, original)
        }
        Err(err) => {
            debug!(source = original, reason = %err, "rejected expression");
            ExpressionParameters::rejected(err, original)
        }
    }
}

/// Extract parameters from normalized text.
///
/// Grammar: `[sign][amplitude[*]]{sin|cos}(argument)[sign constant...]`.
/// The text after the closing parenthesis is read first as the vertical
/// shift, then the text in front of the function as the amplitude, then the
/// argument through [`parse_inner`].
pub fn try_extract(normalized: &str) -> Result<TrigParams, ParseError> {
    let kind = if normalized.contains(TrigKind::Cosine.name()) {
        TrigKind::Cosine
    } else if normalized.contains(TrigKind::Sine.name()) {
        TrigKind::Sine
    } else {
        return Err(ParseError::MissingFunction);
    };

    let name = kind.name();
    let start = normalized.find(name).ok_or(ParseError::MissingFunction)?;
    let prefix = &normalized[..start];
    let argument = normalized[start + name.len()..]
        .strip_prefix('(')
        .ok_or(ParseError::MissingParenthesis { function: name })?;
    let close = argument
        .find(')')
        .ok_or(ParseError::UnbalancedParentheses)?;
    let (argument, suffix) = (&argument[..close], &argument[close + 1..]);
    if argument.contains('(') {
        return Err(ParseError::NestedParentheses);
    }
    if suffix.contains(')') {
        return Err(ParseError::UnexpectedClosingParenthesis {
            fragment: suffix.to_string(),
        });
    }

    let vertical_shift = vertical_shift(suffix)?;
    let amplitude = amplitude(prefix)?;
    let inner = parse_inner(argument)?;

    if !amplitude.is_finite() {
        return Err(ParseError::NonFinite { what: "amplitude" });
    }
    if !vertical_shift.is_finite() {
        return Err(ParseError::NonFinite {
            what: "vertical shift",
        });
    }

    Ok(TrigParams {
        kind,
        amplitude,
        frequency: inner.frequency,
        phase_shift: inner.phase_shift,
        vertical_shift,
    })
}

fn vertical_shift(suffix: &str) -> Result<f64, ParseError> {
    if suffix.is_empty() {
        return Ok(0.0);
    }
    if !suffix.starts_with(['+', '-']) {
        return Err(ParseError::UnsupportedTerm {
            fragment: suffix.to_string(),
            reason: "expected + or - after the function",
        });
    }
    let mut shift = 0.0;
    for term in split_terms(suffix)? {
        if term.variable {
            return Err(ParseError::UnsupportedTerm {
                fragment: suffix.to_string(),
                reason: "the vertical shift cannot depend on x",
            });
        }
        shift += term.coefficient;
    }
    Ok(shift)
}

fn amplitude(prefix: &str) -> Result<f64, ParseError> {
    // Signs directly in front of the name fold into the coefficient: `2*-sin`.
    let unsigned = prefix.trim_end_matches(['+', '-']);
    let (coefficient, signs) = if unsigned.is_empty() || unsigned.ends_with('*') {
        (
            unsigned.strip_suffix('*').unwrap_or(unsigned),
            &prefix[unsigned.len()..],
        )
    } else {
        (prefix, "")
    };
    let sign = fold_signs(signs);
    if coefficient.chars().all(|c| matches!(c, '+' | '-')) {
        return Ok(sign * fold_signs(coefficient));
    }
    let malformed = || ParseError::MalformedAmplitude {
        fragment: prefix.to_string(),
    };
    match split_terms(coefficient)?.as_slice() {
        [term] if term.variable => Err(ParseError::UnsupportedTerm {
            fragment: prefix.to_string(),
            reason: "x may only appear inside the function argument",
        }),
        [term] => Ok(sign * term.coefficient),
        _ => Err(malformed()),
    }
}

fn fold_signs(signs: &str) -> f64 {
    if signs.matches('-').count() % 2 == 1 {
        -1.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[track_caller]
    fn assert_params(text: &str, kind: TrigKind, expected: [f64; 4]) {
        let params = parse_expression(text);
        assert!(params.is_valid(), "{text}: {:?}", params.reason());
        assert_eq!(params.kind(), kind, "{text}");
        assert_relative_eq!(params.amplitude(), expected[0], max_relative = 1e-9);
        assert_relative_eq!(params.frequency(), expected[1], max_relative = 1e-9);
        assert_relative_eq!(params.phase_shift(), expected[2], max_relative = 1e-9);
        assert_relative_eq!(params.vertical_shift(), expected[3], max_relative = 1e-9);
        assert_eq!(params.source_text(), text);
    }

    #[test]
    fn localized_sine_is_identity() {
        assert_params("sen(x)", TrigKind::Sine, [1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn full_cosine_form() {
        assert_params("-3*cos(0.5x+1)-1", TrigKind::Cosine, [-3.0, 0.5, -2.0, -1.0]);
    }

    #[test]
    fn headline_example() {
        assert_params("2*sen(x-1)+2", TrigKind::Sine, [2.0, 1.0, 1.0, 2.0]);
    }

    #[test]
    fn canonical_form_recovers_coefficients() {
        for (a, b, c, d) in [
            (2.0, 3.0, 1.0, -4.0),
            (0.5, -2.0, -0.25, 1.5),
            (-1.25, 0.1, 3.0, 0.0),
            (7.0, 1.0, -1.0, 2.5),
        ] {
            let text = format!("{a}*sin({b}*x+{c})+{d}");
            assert_params(&text, TrigKind::Sine, [a, b, -c / b, d]);
        }
    }

    #[test]
    fn sign_only_amplitudes() {
        assert_params("-sin(x)", TrigKind::Sine, [-1.0, 1.0, 0.0, 0.0]);
        assert_params("+cos(x)", TrigKind::Cosine, [1.0, 1.0, 0.0, 0.0]);
        assert_params("-*cos(x)", TrigKind::Cosine, [-1.0, 1.0, 0.0, 0.0]);
        assert_params("3sin(x)", TrigKind::Sine, [3.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn repeated_signs_fold_into_the_amplitude() {
        assert_params("--sin(x)", TrigKind::Sine, [1.0, 1.0, 0.0, 0.0]);
        assert_params("+-sin(x)", TrigKind::Sine, [-1.0, 1.0, 0.0, 0.0]);
        assert_params("2*-sin(x)", TrigKind::Sine, [-2.0, 1.0, 0.0, 0.0]);
        assert_params("-2*-cos(x)", TrigKind::Cosine, [2.0, 1.0, 0.0, 0.0]);
        assert_params("sin(x)+-1", TrigKind::Sine, [1.0, 1.0, 0.0, -1.0]);
        assert!(try_extract("2-sin(x)").is_err());
    }

    #[test]
    fn pi_constants() {
        let params = parse_expression("π/2*cos(2x+π)-π");
        assert!(params.is_valid(), "{:?}", params.reason());
        assert_relative_eq!(params.amplitude(), core::f64::consts::FRAC_PI_2);
        assert_relative_eq!(params.frequency(), 2.0);
        assert_relative_eq!(params.phase_shift(), -core::f64::consts::FRAC_PI_2);
        assert_relative_eq!(params.vertical_shift(), -core::f64::consts::PI);
    }

    #[test]
    fn vertical_shift_sums_trailing_constants() {
        assert_params("sin(x)+1-0.5", TrigKind::Sine, [1.0, 1.0, 0.0, 0.5]);
    }

    #[test]
    fn constant_argument_does_not_divide_by_zero() {
        assert_params("sin(5)", TrigKind::Sine, [1.0, 1.0, -5.0, 0.0]);
    }

    #[test]
    fn missing_function_is_rejected_without_nan() {
        let params = parse_expression("banana(x)");
        assert!(!params.is_valid());
        assert!(params.reason().is_some_and(|reason| !reason.is_empty()));
        assert_eq!(params.error(), Some(&ParseError::MissingFunction));
        assert_eq!(params.amplitude(), 1.0);
        assert_eq!(params.frequency(), 1.0);
        assert_eq!(params.phase_shift(), 0.0);
        assert_eq!(params.vertical_shift(), 0.0);
        assert!(params.params().is_none());
    }

    #[test]
    fn structural_errors() {
        assert_eq!(
            try_extract("sinx"),
            Err(ParseError::MissingParenthesis { function: "sin" })
        );
        assert_eq!(try_extract("sin(x"), Err(ParseError::UnbalancedParentheses));
        assert_eq!(try_extract("sin((x))"), Err(ParseError::NestedParentheses));
        assert_eq!(
            try_extract("sin(x))"),
            Err(ParseError::UnexpectedClosingParenthesis {
                fragment: ")".into()
            })
        );
        assert_eq!(
            try_extract("cos(x)+cos(x)"),
            Err(ParseError::UnexpectedClosingParenthesis {
                fragment: "+cos(x)".into()
            })
        );
        let reason = parse_expression("sin(x))").reason().map(str::to_owned);
        assert!(reason.is_some_and(|reason| !reason.contains("missing")));
        assert_eq!(try_extract("cos()"), Err(ParseError::EmptyArgument));
    }

    #[test]
    fn malformed_pieces() {
        assert!(matches!(
            try_extract("1.2.3*sin(x)"),
            Err(ParseError::MalformedNumber { .. })
        ));
        assert!(matches!(
            try_extract("sin(x)2"),
            Err(ParseError::UnsupportedTerm { .. })
        ));
        assert!(matches!(
            try_extract("sin(x)+x"),
            Err(ParseError::UnsupportedTerm { .. })
        ));
        assert!(matches!(
            try_extract("1+2*sin(x)"),
            Err(ParseError::UnsupportedTerm { .. }) | Err(ParseError::MalformedAmplitude { .. })
        ));
        assert!(matches!(
            try_extract("sin(x)**2"),
            Err(ParseError::UnsupportedTerm { .. })
        ));
        assert_eq!(
            try_extract("1e400*sin(x)"),
            Err(ParseError::NonFinite { what: "amplitude" })
        );
    }

    #[test]
    fn cosine_takes_priority() {
        let params = try_extract("cos(x)").expect("valid");
        assert_eq!(params.kind, TrigKind::Cosine);
        assert!(try_extract("sin(cos(x))").is_err());
    }
}
