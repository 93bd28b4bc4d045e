//! Parse, sample and explain transformed sine and cosine curves.
//!
//! Text like `2*sen(x-1)+2` goes through a one-way pipeline:
//!
//! 1. [`expr::normalize`] canonicalizes spelling, whitespace and `π`.
//! 2. [`expr::extract`] recovers amplitude, frequency, phase and vertical shift.
//! 3. [`sample::SamplerKernel`] samples the curve next to its reference.
//! 4. [`describe::Describer`] explains the transformation in fixed phrases.
//!
//! [`analyze`] runs all four steps and never samples a rejected expression.
//!
//! ```
//! use trig_rs::{analyze, Analysis};
//!
//! let Analysis::Plot(plot) = analyze("-3*cos(0.5x+1)-1") else { panic!() };
//! assert_eq!(plot.params.amplitude(), -3.0);
//! assert_eq!(plot.params.phase_shift(), -2.0);
//! ```

pub mod describe;
pub mod error;
pub mod expr;
pub mod kernel;
pub mod pipeline;
#[cfg(feature = "plot")]
pub mod plot;
pub mod sample;
pub mod session;
pub mod traits;

pub use error::ParseError;
pub use expr::{ExpressionParameters, TrigKind, TrigParams};
pub use pipeline::{analyze, Analysis, Pipeline, Plot, Rejection};
