//! Sampling of a parsed curve and its reference for line rendering.

use crate::expr::{ExpressionParameters, TrigParams};
use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle};
use crate::traits::PlotSample;
use nalgebra::RealField;
use ndarray::{Array, Array1, ArrayBase, Data, Dimension};
use num_traits::FromPrimitive;

mod kernels;
pub use kernels::*;

/// One plotted point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

/// Suggested y axis range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    /// Pad `[min, max]` by `fraction` of its span on both sides.
    ///
    /// A flat curve has no span, so it gets one unit of padding instead.
    /// The result is clamped to finite values.
    pub fn padded(min: f64, max: f64, fraction: f64) -> Self {
        let span = max - min;
        let pad = if span > 0.0 { span * fraction } else { 1.0 };
        Self {
            min: (min - pad).max(f64::MIN),
            max: (max + pad).min(f64::MAX),
        }
    }
}

/// Window metadata returned when sampling into caller sinks.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleWindow {
    /// The x domain is `[-domain_half_width, domain_half_width]`.
    pub domain_half_width: f64,
    /// Padded range of the user curve.
    pub y_bounds: AxisBounds,
    /// Grid points dropped because the user value was not finite.
    pub discarded: usize,
}

/// Sampled user and reference curves, both in ascending x order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sampled {
    pub user: Vec<Point<f64>>,
    pub reference: Vec<Point<f64>>,
    pub domain_half_width: f64,
    pub y_bounds: AxisBounds,
    pub discarded: usize,
}

/// Sample a parsed expression with the default [`SamplerConfig`].
pub fn sample(params: &ExpressionParameters) -> Result<Sampled, ExecInvariantViolation> {
    SamplerKernel::default().run(params)
}

/// Return the default plotting grid for a curve with `frequency`.
pub fn linspace_domain(frequency: f64, samples: usize) -> Result<Array1<f64>, ConfigError> {
    let kernel = SamplerKernel::try_new(SamplerConfig {
        samples,
        ..SamplerConfig::default()
    })?;
    Ok(kernel.grid(kernel.domain_half_width(frequency)))
}

/// Evaluate a transformed curve over an array of any shape.
pub fn trig_wave<F, S, D>(t: &ArrayBase<S, D>, params: &TrigParams) -> Result<Array<F, D>, ConfigError>
where
    F: RealField + Copy + FromPrimitive,
    S: Data<Elem = F>,
    D: Dimension,
{
    let kernel = TrigWaveKernel::try_new(TrigWaveConfig::from_params(params)?)?;
    Ok(t.mapv(|v| kernel.sample(v)))
}
