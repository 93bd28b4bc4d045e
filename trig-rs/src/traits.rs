//! Trait interfaces for curve evaluation and plot sampling.

use crate::expr::{ExpressionParameters, TrigParams};
use crate::kernel::{ExecInvariantViolation, PointSink, Read1D, Write1D};
use crate::sample::{SampleWindow, Sampled};

/// 1D evaluation of one configured trigonometric curve.
pub trait TrigWave1D<T> {
    /// Evaluate over `input` into a caller-provided output buffer.
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Evaluate over `input` and allocate output.
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// Sampling of a user curve next to its reference curve.
pub trait PlotSample {
    /// Sample into caller-provided sinks and return the window metadata.
    fn run_into<U, R>(
        &self,
        params: &TrigParams,
        user: &mut U,
        reference: &mut R,
    ) -> Result<SampleWindow, ExecInvariantViolation>
    where
        U: PointSink<f64> + ?Sized,
        R: PointSink<f64> + ?Sized;

    /// Sample a parsed expression into owned point vectors.
    ///
    /// Rejected expressions are an invariant violation: callers check
    /// [`ExpressionParameters::is_valid`] first.
    fn run(&self, params: &ExpressionParameters) -> Result<Sampled, ExecInvariantViolation>;
}
