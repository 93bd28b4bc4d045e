//! Sign-tagged term splitter.
//!
//! A fragment such as `-0.5x+3/2` becomes the terms `-0.5·x` and `+1.5`.
//! Each term is `[sign...] factor ((* | / | juxtaposition) factor)*` where a
//! factor is a numeral or `x`, and `x` may appear at most once.

use super::lexer::{tokenize, Token};
use crate::error::ParseError;

/// One signed summand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Term {
    /// Signed numeric factor of the term.
    pub coefficient: f64,
    /// Whether the term is `coefficient * x` rather than a constant.
    pub variable: bool,
}

pub(crate) fn split_terms(src: &str) -> Result<Vec<Term>, ParseError> {
    let tokens = tokenize(src)?;
    let unsupported = |reason| ParseError::UnsupportedTerm {
        fragment: src.to_string(),
        reason,
    };

    let mut terms = Vec::new();
    let mut pos = 0;
    while pos < tokens.len() {
        let mut sign = 1.0;
        while let Some(token @ (Token::Plus | Token::Minus)) = tokens.get(pos) {
            if *token == Token::Minus {
                sign = -sign;
            }
            pos += 1;
        }

        let mut term = Term {
            coefficient: sign,
            variable: false,
        };
        let mut divide = false;
        let mut expect_factor = true;
        while let Some(token) = tokens.get(pos) {
            match token {
                Token::Number(value) => {
                    if divide {
                        if *value == 0.0 {
                            return Err(ParseError::NonFinite { what: "quotient" });
                        }
                        term.coefficient /= value;
                    } else {
                        term.coefficient *= value;
                    }
                }
                Token::X => {
                    if divide {
                        return Err(unsupported("division by x"));
                    }
                    if term.variable {
                        return Err(unsupported("x may appear only once per term"));
                    }
                    term.variable = true;
                }
                Token::Star | Token::Slash => {
                    if expect_factor {
                        return Err(unsupported("operator without a left operand"));
                    }
                    divide = *token == Token::Slash;
                    expect_factor = true;
                    pos += 1;
                    continue;
                }
                Token::Plus | Token::Minus => break,
            }
            divide = false;
            expect_factor = false;
            pos += 1;
        }

        if expect_factor {
            return Err(unsupported("sign or operator without a value"));
        }
        terms.push(term);
    }

    Ok(terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(coefficient: f64, variable: bool) -> Term {
        Term {
            coefficient,
            variable,
        }
    }

    #[test]
    fn splits_signed_terms() {
        assert_eq!(
            split_terms("2x-1+x").expect("valid"),
            vec![term(2.0, true), term(-1.0, false), term(1.0, true)]
        );
        assert_eq!(
            split_terms("-x/4+3*2").expect("valid"),
            vec![term(-0.25, true), term(6.0, false)]
        );
        assert_eq!(split_terms("").expect("empty"), vec![]);
    }

    #[test]
    fn repeated_signs_fold() {
        assert_eq!(
            split_terms("x--1").expect("valid"),
            vec![term(1.0, true), term(1.0, false)]
        );
    }

    #[test]
    fn rejects_nonlinear_and_dangling() {
        assert!(matches!(
            split_terms("x*x"),
            Err(ParseError::UnsupportedTerm {
                reason: "x may appear only once per term",
                ..
            })
        ));
        assert!(matches!(
            split_terms("2/x"),
            Err(ParseError::UnsupportedTerm {
                reason: "division by x",
                ..
            })
        ));
        assert!(matches!(
            split_terms("x+"),
            Err(ParseError::UnsupportedTerm {
                reason: "sign or operator without a value",
                ..
            })
        ));
        assert!(matches!(
            split_terms("*2"),
            Err(ParseError::UnsupportedTerm {
                reason: "operator without a left operand",
                ..
            })
        ));
        assert_eq!(
            split_terms("1/0").expect_err("zero divisor"),
            ParseError::NonFinite { what: "quotient" }
        );
    }
}
