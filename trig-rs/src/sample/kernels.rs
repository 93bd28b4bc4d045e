//! Kernels for curve evaluation and plot sampling.

use crate::expr::{ExpressionParameters, TrigKind, TrigParams};
use crate::kernel::{
    ConfigError, ExecInvariantViolation, KernelLifecycle, PointSink, Read1D, Write1D,
};
use crate::traits::{PlotSample, TrigWave1D};
use core::f64::consts::TAU;
use nalgebra::RealField;
use ndarray::Array1;
use num_traits::FromPrimitive;
use tracing::debug;

use super::{AxisBounds, Point, SampleWindow, Sampled};

/// Constructor config for [`TrigWaveKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrigWaveConfig<F>
where
    F: RealField + Copy,
{
    /// Base function.
    pub kind: TrigKind,
    /// Vertical scale.
    pub amplitude: F,
    /// Argument scale, must be non-zero.
    pub frequency: F,
    /// Horizontal translation.
    pub phase_shift: F,
    /// Additive offset.
    pub vertical_shift: F,
}

impl<F> TrigWaveConfig<F>
where
    F: RealField + Copy + FromPrimitive,
{
    /// Convert parsed parameters to the kernel's float type.
    pub fn from_params(params: &TrigParams) -> Result<Self, ConfigError> {
        let convert = |value: f64, arg| {
            F::from_f64(value).ok_or(ConfigError::InvalidArgument {
                arg,
                reason: "value is not representable in the kernel float type",
            })
        };
        Ok(Self {
            kind: params.kind,
            amplitude: convert(params.amplitude, "amplitude")?,
            frequency: convert(params.frequency, "frequency")?,
            phase_shift: convert(params.phase_shift, "phase_shift")?,
            vertical_shift: convert(params.vertical_shift, "vertical_shift")?,
        })
    }

    /// Config of the unmodified base function.
    pub fn reference(kind: TrigKind) -> Self {
        Self {
            kind,
            amplitude: F::one(),
            frequency: F::one(),
            phase_shift: F::zero(),
            vertical_shift: F::zero(),
        }
    }
}

/// Evaluates `amplitude * base(frequency * (x - phase_shift)) + vertical_shift`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrigWaveKernel<F>
where
    F: RealField + Copy,
{
    kind: TrigKind,
    amplitude: F,
    frequency: F,
    phase_shift: F,
    vertical_shift: F,
}

impl<F> TrigWaveKernel<F>
where
    F: RealField + Copy,
{
    /// Return configured base function.
    pub fn kind(&self) -> TrigKind {
        self.kind
    }

    /// Evaluate the curve at one point.
    pub fn sample(&self, x: F) -> F {
        let arg = self.frequency * (x - self.phase_shift);
        let base = match self.kind {
            TrigKind::Sine => arg.sin(),
            TrigKind::Cosine => arg.cos(),
        };
        self.amplitude * base + self.vertical_shift
    }
}

impl<F> KernelLifecycle for TrigWaveKernel<F>
where
    F: RealField + Copy,
{
    type Config = TrigWaveConfig<F>;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        for (arg, value) in [
            ("amplitude", config.amplitude),
            ("frequency", config.frequency),
            ("phase_shift", config.phase_shift),
            ("vertical_shift", config.vertical_shift),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { arg });
            }
        }
        if config.frequency == F::zero() {
            return Err(ConfigError::InvalidArgument {
                arg: "frequency",
                reason: "frequency must be non-zero",
            });
        }
        Ok(Self {
            kind: config.kind,
            amplitude: config.amplitude,
            frequency: config.frequency,
            phase_shift: config.phase_shift,
            vertical_shift: config.vertical_shift,
        })
    }
}

impl<F> TrigWave1D<F> for TrigWaveKernel<F>
where
    F: RealField + Copy,
{
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<F> + ?Sized,
        O: Write1D<F> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        let out = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        if out.len() != input.len() {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: input.len(),
                got: out.len(),
            });
        }
        out.iter_mut()
            .zip(input.iter())
            .for_each(|(out, x)| *out = self.sample(*x));
        Ok(())
    }

    fn run_alloc<I>(&self, input: &I) -> Result<Vec<F>, ExecInvariantViolation>
    where
        I: Read1D<F> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        Ok(input.iter().map(|x| self.sample(*x)).collect())
    }
}

/// Constructor config for [`SamplerKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerConfig {
    /// Number of equally spaced samples, at least 2.
    pub samples: usize,
    /// Smallest half width of the plotted domain.
    pub min_half_width: f64,
    /// Half width of the domain in user periods.
    pub period_span: f64,
    /// Fraction of the y span added above and below the axis bounds.
    pub y_padding: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            samples: 1000,
            min_half_width: TAU,
            period_span: 1.5,
            y_padding: 0.1,
        }
    }
}

/// Samples a user curve and its reference over a frequency-adaptive window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerKernel {
    samples: usize,
    min_half_width: f64,
    period_span: f64,
    y_padding: f64,
}

impl SamplerKernel {
    /// Return configured sample count.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Half width of the plotted domain for `frequency`.
    ///
    /// At least `min_half_width` and at least `period_span` periods, so the
    /// default config always shows two full periods across the window.
    pub fn domain_half_width(&self, frequency: f64) -> f64 {
        let period = TAU / frequency.abs();
        self.min_half_width.max(self.period_span * period)
    }

    /// Equally spaced x grid over `[-half_width, half_width]`.
    pub fn grid(&self, half_width: f64) -> Array1<f64> {
        Array1::linspace(-half_width, half_width, self.samples)
    }
}

impl Default for SamplerKernel {
    fn default() -> Self {
        let config = SamplerConfig::default();
        Self {
            samples: config.samples,
            min_half_width: config.min_half_width,
            period_span: config.period_span,
            y_padding: config.y_padding,
        }
    }
}

impl KernelLifecycle for SamplerKernel {
    type Config = SamplerConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.samples < 2 {
            return Err(ConfigError::InvalidArgument {
                arg: "samples",
                reason: "at least two samples are needed to draw a line",
            });
        }
        for (arg, value) in [
            ("min_half_width", config.min_half_width),
            ("period_span", config.period_span),
            ("y_padding", config.y_padding),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { arg });
            }
        }
        if config.min_half_width <= 0.0 {
            return Err(ConfigError::InvalidArgument {
                arg: "min_half_width",
                reason: "min_half_width must be positive",
            });
        }
        if config.period_span <= 0.0 {
            return Err(ConfigError::InvalidArgument {
                arg: "period_span",
                reason: "period_span must be positive",
            });
        }
        if config.y_padding < 0.0 {
            return Err(ConfigError::InvalidArgument {
                arg: "y_padding",
                reason: "y_padding must not be negative",
            });
        }
        Ok(Self {
            samples: config.samples,
            min_half_width: config.min_half_width,
            period_span: config.period_span,
            y_padding: config.y_padding,
        })
    }
}

impl PlotSample for SamplerKernel {
    fn run_into<U, R>(
        &self,
        params: &TrigParams,
        user: &mut U,
        reference: &mut R,
    ) -> Result<SampleWindow, ExecInvariantViolation>
    where
        U: PointSink<f64> + ?Sized,
        R: PointSink<f64> + ?Sized,
    {
        let user_wave = TrigWaveKernel::try_new(TrigWaveConfig::from_params(params)?)?;
        let reference_wave = TrigWaveKernel::try_new(TrigWaveConfig::reference(params.kind))?;

        let half_width = self.domain_half_width(params.frequency);
        if !half_width.is_finite() {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "frequency is too small to produce a finite domain",
            });
        }
        let grid = self.grid(half_width);

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut discarded = 0;
        for &x in grid.iter() {
            let y = user_wave.sample(x);
            if !y.is_finite() {
                discarded += 1;
                continue;
            }
            min = min.min(y);
            max = max.max(y);
            user.push_point(Point { x, y });
            reference.push_point(Point {
                x,
                y: reference_wave.sample(x),
            });
        }
        if discarded > 0 {
            debug!(discarded, "dropped non-finite samples");
        }
        if discarded == grid.len() {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "no finite samples in the plotted domain",
            });
        }

        Ok(SampleWindow {
            domain_half_width: half_width,
            y_bounds: AxisBounds::padded(min, max, self.y_padding),
            discarded,
        })
    }

    fn run(&self, params: &ExpressionParameters) -> Result<Sampled, ExecInvariantViolation> {
        let params = params
            .params()
            .ok_or(ExecInvariantViolation::InvalidState {
                reason: "cannot sample an expression that failed to parse",
            })?;
        let mut user = Vec::with_capacity(self.samples);
        let mut reference = Vec::with_capacity(self.samples);
        let window = self.run_into(&params, &mut user, &mut reference)?;
        Ok(Sampled {
            user,
            reference,
            domain_half_width: window.domain_half_width,
            y_bounds: window.y_bounds,
            discarded: window.discarded,
        })
    }
}
