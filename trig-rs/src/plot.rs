use crate::sample::Sampled;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::time::{SystemTime, UNIX_EPOCH};

/// Failure to render a debug chart.
#[derive(Debug)]
pub enum PlotError {
    /// Spawning python or writing the chart failed.
    Io(std::io::Error),
    /// The script could not be piped into python.
    StdinUnavailable,
    /// Matplotlib exited with an error, usually because it is not installed.
    PythonExitFailure(ExitStatus),
}

impl core::fmt::Display for PlotError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PlotError::Io(err) => write!(f, "cannot render chart: {err}"),
            PlotError::StdinUnavailable => write!(f, "python stdin is closed"),
            PlotError::PythonExitFailure(status) => write!(f, "matplotlib script exited with {status}"),
        }
    }
}

impl std::error::Error for PlotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlotError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PlotError {
    fn from(value: std::io::Error) -> Self {
        PlotError::Io(value)
    }
}

/// Draw the user curve, the reference curve and the suggested axis bounds
/// with matplotlib.
///
/// Without an explicit path the PNG lands in `target/plots`. Returns the
/// output path when plotting succeeds.
pub fn python_plot_to_path<P: AsRef<Path>>(
    title: &str,
    sampled: &Sampled,
    output_path: Option<P>,
) -> Result<PathBuf, PlotError> {
    let output_path = match output_path {
        Some(path) => path.as_ref().to_path_buf(),
        None => {
            let ts = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs();
            PathBuf::from(format!("target/plots/trig_plot_{ts}.png"))
        }
    };
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let (ux, uy): (Vec<f64>, Vec<f64>) = sampled.user.iter().map(|p| (p.x, p.y)).unzip();
    let (rx, ry): (Vec<f64>, Vec<f64>) = sampled.reference.iter().map(|p| (p.x, p.y)).unzip();
    let output_path_literal = output_path.to_string_lossy().replace('\\', "\\\\");
    let script = format!(
        r#"
import matplotlib
matplotlib.use("Agg")
import matplotlib.pyplot as plt

fig, ax = plt.subplots(figsize=(10, 5))
ax.plot({rx:?}, {ry:?}, label="reference", linestyle="--", alpha=0.6)
ax.plot({ux:?}, {uy:?}, label={title:?}, linewidth=1.6)
ax.set_xlim({lo}, {hi})
ax.set_ylim({ymin}, {ymax})
ax.axhline(0.0, color="grey", linewidth=0.5)
ax.axvline(0.0, color="grey", linewidth=0.5)
ax.legend()
ax.set_xlabel("x")
fig.tight_layout()
fig.savefig(r"{output_path_literal}", dpi=150)
plt.close(fig)
"#,
        lo = -sampled.domain_half_width,
        hi = sampled.domain_half_width,
        ymin = sampled.y_bounds.min.min(-1.1),
        ymax = sampled.y_bounds.max.max(1.1),
    );
    let mut python = std::process::Command::new("python")
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::null()) // noisy
        .stderr(std::process::Stdio::null()) // noisy
        .spawn()?;

    if let Some(mut stdin) = python.stdin.take() {
        stdin.write_all(script.as_bytes())?;
    } else {
        return Err(PlotError::StdinUnavailable);
    }

    let status = python.wait()?;
    if !status.success() {
        return Err(PlotError::PythonExitFailure(status));
    }
    Ok(output_path)
}
