//! Tokenizer for the arithmetic fragments around and inside the function call.

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    X,
    Plus,
    Minus,
    Star,
    Slash,
}

pub(crate) fn tokenize(src: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = src.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let token = match c {
            '0'..='9' | '.' => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' {
                        end = i + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                if let Some(&(i, 'e')) = chars.peek() {
                    chars.next();
                    end = i + 1;
                    if let Some(&(i, sign @ ('+' | '-'))) = chars.peek() {
                        chars.next();
                        end = i + sign.len_utf8();
                    }
                    let mut digits = 0;
                    while let Some(&(i, c)) = chars.peek() {
                        if !c.is_ascii_digit() {
                            break;
                        }
                        digits += 1;
                        end = i + 1;
                        chars.next();
                    }
                    if digits == 0 {
                        return Err(ParseError::MalformedNumber {
                            fragment: src[start..end].to_string(),
                            reason: "empty exponent",
                        });
                    }
                    if let Some(&(_, '.')) = chars.peek() {
                        return Err(ParseError::MalformedNumber {
                            fragment: src[start..=end].to_string(),
                            reason: "decimal separator inside the exponent",
                        });
                    }
                }
                Token::Number(numeral(&src[start..end])?)
            }
            'x' => Token::X,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => {
                if let Some(&(_, '*')) = chars.peek() {
                    return Err(ParseError::UnsupportedTerm {
                        fragment: src.to_string(),
                        reason: "exponents are not supported",
                    });
                }
                Token::Star
            }
            '/' => Token::Slash,
            found => {
                return Err(ParseError::UnexpectedCharacter {
                    found,
                    fragment: src.to_string(),
                })
            }
        };
        tokens.push(token);
    }

    Ok(tokens)
}

fn numeral(fragment: &str) -> Result<f64, ParseError> {
    let mantissa = fragment.split('e').next().unwrap_or(fragment);
    let malformed = |reason| ParseError::MalformedNumber {
        fragment: fragment.to_string(),
        reason,
    };
    if mantissa.matches('.').count() > 1 {
        return Err(malformed("more than one decimal separator"));
    }
    if !mantissa.bytes().any(|b| b.is_ascii_digit()) {
        return Err(malformed("no digits"));
    }
    fragment
        .parse::<f64>()
        .map_err(|_| malformed("not a real number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_coefficient_and_constant() {
        let tokens = tokenize("-0.5x+1e-2").expect("valid fragment");
        assert_eq!(
            tokens,
            vec![
                Token::Minus,
                Token::Number(0.5),
                Token::X,
                Token::Plus,
                Token::Number(0.01),
            ]
        );
    }

    #[test]
    fn rejects_extra_separator_and_empty_exponent() {
        assert_eq!(
            tokenize("1.2.3x").expect_err("two separators"),
            ParseError::MalformedNumber {
                fragment: "1.2.3".into(),
                reason: "more than one decimal separator",
            }
        );
        assert_eq!(
            tokenize("2e+").expect_err("empty exponent"),
            ParseError::MalformedNumber {
                fragment: "2e+".into(),
                reason: "empty exponent",
            }
        );
        assert_eq!(
            tokenize(".").expect_err("lone separator"),
            ParseError::MalformedNumber {
                fragment: ".".into(),
                reason: "no digits",
            }
        );
    }

    #[test]
    fn rejects_power_and_foreign_characters() {
        assert!(matches!(
            tokenize("x**2"),
            Err(ParseError::UnsupportedTerm { .. })
        ));
        assert_eq!(
            tokenize("2y").expect_err("unknown variable"),
            ParseError::UnexpectedCharacter {
                found: 'y',
                fragment: "2y".into(),
            }
        );
    }
}
