use super::ConfigError;

/// Validated construction shared by the kernels in this crate.
pub trait KernelLifecycle: Sized {
    /// Kernel config type.
    type Config;

    /// Construct a validated kernel from config.
    fn try_new(config: Self::Config) -> Result<Self, ConfigError>;
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, KernelLifecycle};

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct WindowConfig {
        half_width: f64,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Window {
        half_width: f64,
    }

    impl KernelLifecycle for Window {
        type Config = WindowConfig;

        fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
            if !config.half_width.is_finite() {
                return Err(ConfigError::NonFinite { arg: "half_width" });
            }
            if config.half_width <= 0.0 {
                return Err(ConfigError::InvalidArgument {
                    arg: "half_width",
                    reason: "half width must be positive",
                });
            }
            Ok(Self {
                half_width: config.half_width,
            })
        }
    }

    #[test]
    fn lifecycle_constructor_accepts_valid_config() {
        let window = Window::try_new(WindowConfig { half_width: 3.5 }).expect("valid config");
        assert_eq!(window.half_width, 3.5);
    }

    #[test]
    fn lifecycle_constructor_rejects_invalid_config() {
        let err = Window::try_new(WindowConfig { half_width: 0.0 }).expect_err("invalid config");
        assert_eq!(
            err,
            ConfigError::InvalidArgument {
                arg: "half_width",
                reason: "half width must be positive",
            }
        );
        let err = Window::try_new(WindowConfig {
            half_width: f64::NAN,
        })
        .expect_err("nan config");
        assert_eq!(err, ConfigError::NonFinite { arg: "half_width" });
    }
}
