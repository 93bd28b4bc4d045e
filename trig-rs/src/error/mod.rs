use core::{error, fmt};

/// Inputs shown to the user next to a rejection.
pub const ACCEPTED_SYNTAX: &[&str] = &[
    "sin(x)",
    "2*sin(x)",
    "sin(2x)",
    "cos(x-1)",
    "sin(x)+2",
    "-3*cos(0.5x+1)-1",
    "2*sen(x-π/2)+1",
];

/// Errors raised whilst turning text into trigonometric parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Neither `sin` (`sen`) nor `cos` appears in the input.
    MissingFunction,
    /// The function name is not followed by `(`.
    MissingParenthesis {
        /// Function name that was found.
        function: &'static str,
    },
    /// A `(` appears inside the function argument.
    NestedParentheses,
    /// The function argument is never closed.
    UnbalancedParentheses,
    /// A `)` follows the closed function argument, as in `sin(x))`.
    UnexpectedClosingParenthesis {
        /// Text after the function argument.
        fragment: String,
    },
    /// The function argument is empty, as in `sin()`.
    EmptyArgument,
    /// A numeral could not be converted to a real number.
    MalformedNumber {
        /// The numeral as typed.
        fragment: String,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// A character outside the supported grammar.
    UnexpectedCharacter {
        /// The offending character.
        found: char,
        /// The segment it was found in.
        fragment: String,
    },
    /// A term the grammar cannot express, such as `x*x` or `2/x`.
    UnsupportedTerm {
        /// The segment holding the term.
        fragment: String,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// Text in front of the function name is not a single coefficient.
    MalformedAmplitude {
        /// Text in front of the function name.
        fragment: String,
    },
    /// A derived parameter overflowed to infinity or NaN.
    NonFinite {
        /// Parameter that is not finite.
        what: &'static str,
    },
}

impl ParseError {
    /// Example inputs that the parser accepts.
    pub fn guidance(&self) -> &'static [&'static str] {
        ACCEPTED_SYNTAX
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingFunction => {
                write!(f, "missing trigonometric function: use sin(...) or cos(...)")
            }
            ParseError::MissingParenthesis { function } => {
                write!(f, "expected `(` after `{function}`")
            }
            ParseError::NestedParentheses => {
                write!(f, "parentheses inside the function argument are not supported")
            }
            ParseError::UnbalancedParentheses => {
                write!(f, "the function argument is missing its closing `)`")
            }
            ParseError::UnexpectedClosingParenthesis { fragment } => {
                write!(
                    f,
                    "unexpected `)` in `{fragment}` after the function argument; only one function call is supported"
                )
            }
            ParseError::EmptyArgument => write!(f, "the function argument is empty"),
            ParseError::MalformedNumber { fragment, reason } => {
                write!(f, "malformed number `{fragment}`: {reason}")
            }
            ParseError::UnexpectedCharacter { found, fragment } => {
                write!(f, "unexpected character `{found}` in `{fragment}`")
            }
            ParseError::UnsupportedTerm { fragment, reason } => {
                write!(f, "unsupported term in `{fragment}`: {reason}")
            }
            ParseError::MalformedAmplitude { fragment } => {
                write!(
                    f,
                    "`{fragment}` is not a valid amplitude; write a single number such as 2* before the function"
                )
            }
            ParseError::NonFinite { what } => write!(f, "the {what} is not a finite number"),
        }
    }
}

impl error::Error for ParseError {}
