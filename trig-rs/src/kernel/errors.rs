use core::fmt;

/// Rejected kernel configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A setting is outside its accepted range.
    InvalidArgument {
        arg: &'static str,
        reason: &'static str,
    },
    /// A setting or curve parameter was NaN or infinite.
    NonFinite { arg: &'static str },
    /// A sample buffer could not be borrowed as one contiguous slice.
    NonContiguous { arg: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidArgument { arg, reason } => write!(f, "bad `{arg}`: {reason}"),
            ConfigError::NonFinite { arg } => write!(f, "`{arg}` is not a finite number"),
            ConfigError::NonContiguous { arg } => {
                write!(f, "buffer `{arg}` is not contiguous in memory")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failure while sampling or evaluating a configured curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecInvariantViolation {
    /// The request cannot be sampled in the current state.
    InvalidState { reason: &'static str },
    /// An output buffer does not match the x grid.
    LengthMismatch {
        arg: &'static str,
        expected: usize,
        got: usize,
    },
    /// The curve or a buffer adapter failed validation.
    Config(ConfigError),
}

impl From<ConfigError> for ExecInvariantViolation {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl fmt::Display for ExecInvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecInvariantViolation::InvalidState { reason } => write!(f, "{reason}"),
            ExecInvariantViolation::LengthMismatch { arg, expected, got } => write!(
                f,
                "buffer `{arg}` holds {got} samples but the grid has {expected}"
            ),
            ExecInvariantViolation::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ExecInvariantViolation {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecInvariantViolation::Config(err) => Some(err),
            ExecInvariantViolation::InvalidState { .. }
            | ExecInvariantViolation::LengthMismatch { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn config_error_is_the_source_of_a_violation() {
        let violation = ExecInvariantViolation::from(ConfigError::NonFinite { arg: "amplitude" });
        assert_eq!(violation.to_string(), "`amplitude` is not a finite number");
        assert!(violation.source().is_some());
    }

    #[test]
    fn invalid_state_displays_its_reason() {
        let violation = ExecInvariantViolation::InvalidState {
            reason: "no finite samples in the plotted domain",
        };
        assert_eq!(violation.to_string(), "no finite samples in the plotted domain");
        assert!(violation.source().is_none());
    }
}
