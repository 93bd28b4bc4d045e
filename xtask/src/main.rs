use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use trig_rs::describe::describe;
use trig_rs::expr::{parse_expression, PRESETS};
use trig_rs::plot::python_plot_to_path;
use trig_rs::sample::{sample, Point, SamplerKernel};
use trig_rs::traits::PlotSample;
use trig_rs::{analyze, TrigKind};

const PARAM_TOLERANCE: f64 = 1e-9;
const CURVE_TOLERANCE: f64 = 1e-9;

/// Expression plus the coefficients of its closed form `a*f(b*x + c) + d`.
struct ContractCase {
    expression: &'static str,
    kind: TrigKind,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

const CASES: &[ContractCase] = &[
    ContractCase {
        expression: "sin(x)",
        kind: TrigKind::Sine,
        a: 1.0,
        b: 1.0,
        c: 0.0,
        d: 0.0,
    },
    ContractCase {
        expression: "sen(x)",
        kind: TrigKind::Sine,
        a: 1.0,
        b: 1.0,
        c: 0.0,
        d: 0.0,
    },
    ContractCase {
        expression: "2*sen(x-1)+2",
        kind: TrigKind::Sine,
        a: 2.0,
        b: 1.0,
        c: -1.0,
        d: 2.0,
    },
    ContractCase {
        expression: "-3*cos(0.5x+1)-1",
        kind: TrigKind::Cosine,
        a: -3.0,
        b: 0.5,
        c: 1.0,
        d: -1.0,
    },
    ContractCase {
        expression: "-sin(4x)",
        kind: TrigKind::Sine,
        a: -1.0,
        b: 4.0,
        c: 0.0,
        d: 0.0,
    },
    ContractCase {
        expression: "0.25 * COS( -2x + 3 ) + 0.75",
        kind: TrigKind::Cosine,
        a: 0.25,
        b: -2.0,
        c: 3.0,
        d: 0.75,
    },
    ContractCase {
        expression: "cos(x+π/2)",
        kind: TrigKind::Cosine,
        a: 1.0,
        b: 1.0,
        c: PI / 2.0,
        d: 0.0,
    },
    ContractCase {
        expression: "1.5sin(0.1x-2)-4",
        kind: TrigKind::Sine,
        a: 1.5,
        b: 0.1,
        c: -2.0,
        d: -4.0,
    },
    ContractCase {
        expression: "sin(5)",
        kind: TrigKind::Sine,
        a: 1.0,
        b: 1.0,
        c: 5.0,
        d: 0.0,
    },
];

#[derive(Debug, Serialize, Deserialize, Clone)]
struct ContractRow {
    case_id: String,
    expression: String,
    max_param_error: f64,
    domain_half_width: f64,
    samples: usize,
    discarded: usize,
    pearson_r: f64,
    mae: f64,
    rmse: f64,
    max_abs: f64,
    reference_max_abs: f64,
    sample_ns: f64,
    overlay_plot: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContractBundle {
    generated_epoch_seconds: u64,
    param_tolerance: f64,
    curve_tolerance: f64,
    rows: Vec<ContractRow>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("analyze") => run_analyze(args.collect()),
        Some("presets") => run_presets(),
        Some("contracts") => run_contracts(args.any(|arg| arg == "--plot")),
        Some("plot") => {
            let expression = args.next().context("plot needs an expression")?;
            run_plot(&expression, args.next().map(PathBuf::from))
        }
        _ => {
            eprintln!("Usage:");
            eprintln!("  cargo run -p xtask -- analyze <expression>...");
            eprintln!("  cargo run -p xtask -- presets");
            eprintln!("  cargo run -p xtask -- contracts [--plot]");
            eprintln!("  cargo run -p xtask -- plot <expression> [output.png]");
            Ok(())
        }
    }
}

fn run_analyze(expressions: Vec<String>) -> Result<()> {
    if expressions.is_empty() {
        bail!("analyze needs at least one expression");
    }
    for expression in &expressions {
        let analysis = analyze(expression);
        let json = serde_json::to_string_pretty(&analysis)
            .with_context(|| format!("serializing analysis of {expression}"))?;
        println!("{json}");
    }
    Ok(())
}

fn run_presets() -> Result<()> {
    println!(
        "{:<20} {:>8} {:>10} {:>10} {:>10} {:>10}  summary",
        "expression", "kind", "amplitude", "frequency", "phase", "vertical"
    );
    for preset in PRESETS {
        let params = parse_expression(preset);
        let Some(description) = describe(&params) else {
            warn!(preset = %preset, reason = ?params.reason(), "preset was rejected");
            continue;
        };
        println!(
            "{:<20} {:>8} {:>10.4} {:>10.4} {:>10.4} {:>10.4}  {}",
            preset,
            params.kind().name(),
            params.amplitude(),
            params.frequency(),
            params.phase_shift(),
            params.vertical_shift(),
            description.transformation_summary()
        );
    }
    Ok(())
}

fn run_plot(expression: &str, output: Option<PathBuf>) -> Result<()> {
    let params = parse_expression(expression);
    if let Some(reason) = params.reason() {
        bail!("cannot plot `{expression}`: {reason}");
    }
    let sampled = sample(&params).map_err(|e| anyhow::anyhow!("sampling failed: {e}"))?;
    let path = python_plot_to_path(expression, &sampled, output)
        .with_context(|| format!("plotting {expression}"))?;
    info!(path = %path.display(), "wrote plot");
    Ok(())
}

fn run_contracts(with_plots: bool) -> Result<()> {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let out_dir = PathBuf::from(format!("target/contracts/{ts}"));
    let plots_dir = out_dir.join("plots");
    fs::create_dir_all(&plots_dir).context("creating contract output directories")?;

    let sampler = SamplerKernel::default();
    let mut rows = Vec::with_capacity(CASES.len());
    let mut failures = Vec::new();

    for (i, case) in CASES.iter().enumerate() {
        let case_id = format!("case_{i:02}_{}", case.kind.name());
        let params = parse_expression(case.expression);
        let Some(recovered) = params.params() else {
            failures.push(format!(
                "{case_id}: `{}` was rejected: {}",
                case.expression,
                params.reason().unwrap_or_default()
            ));
            continue;
        };
        if recovered.kind != case.kind {
            failures.push(format!("{case_id}: expected {}, got {}", case.kind, recovered.kind));
        }

        let expected_frequency = case.b;
        let expected_phase = -case.c / case.b;
        let max_param_error = [
            relative_error(recovered.amplitude, case.a),
            relative_error(recovered.frequency, expected_frequency),
            relative_error(recovered.phase_shift, expected_phase),
            relative_error(recovered.vertical_shift, case.d),
        ]
        .into_iter()
        .fold(0.0, f64::max);

        let mut user: Vec<Point<f64>> = Vec::with_capacity(sampler.samples());
        let mut reference: Vec<Point<f64>> = Vec::with_capacity(sampler.samples());
        let window = sampler
            .run_into(&recovered, &mut user, &mut reference)
            .map_err(|e| anyhow::anyhow!("{case_id}: sampling failed: {e}"))?;

        let period = TAU / case.b.abs();
        if window.domain_half_width < TAU || window.domain_half_width < 1.5 * period {
            failures.push(format!(
                "{case_id}: domain half width {} shows less than two periods",
                window.domain_half_width
            ));
        }

        let user_fit = CurveMetrics::against(&user, |x| {
            case.a * case.kind.eval(case.b * x + case.c) + case.d
        });
        let reference_fit = CurveMetrics::against(&reference, |x| case.kind.eval(x));

        let sample_ns = mean_run_ns(200, || {
            user.clear();
            reference.clear();
            sampler
                .run_into(&recovered, &mut user, &mut reference)
                .map(|_| ())
                .map_err(|e| anyhow::anyhow!("{case_id}: timed sampling failed: {e}"))
        })?;

        let overlay_plot = if with_plots {
            let sampled = sampler
                .run(&params)
                .map_err(|e| anyhow::anyhow!("{case_id}: sampling failed: {e}"))?;
            let path = plots_dir.join(format!("{case_id}.png"));
            match python_plot_to_path(case.expression, &sampled, Some(&path)) {
                Ok(path) => Some(path.to_string_lossy().into_owned()),
                Err(err) => {
                    warn!(case_id = %case_id, %err, "overlay plot failed");
                    None
                }
            }
        } else {
            None
        };

        let row = ContractRow {
            case_id: case_id.clone(),
            expression: case.expression.to_string(),
            max_param_error,
            domain_half_width: window.domain_half_width,
            samples: user_fit.count,
            discarded: window.discarded,
            pearson_r: user_fit.pearson_r,
            mae: user_fit.mae,
            rmse: user_fit.rmse,
            max_abs: user_fit.max_abs,
            reference_max_abs: reference_fit.max_abs,
            sample_ns,
            overlay_plot,
        };

        if row.max_param_error > PARAM_TOLERANCE {
            failures.push(format!(
                "{case_id}: parameter error {} exceeds {PARAM_TOLERANCE}",
                row.max_param_error
            ));
        }
        if row.max_abs > CURVE_TOLERANCE || row.reference_max_abs > CURVE_TOLERANCE {
            failures.push(format!(
                "{case_id}: curve deviates from its closed form by {}",
                row.max_abs.max(row.reference_max_abs)
            ));
        }
        info!(
            case_id = %case_id,
            expression = case.expression,
            max_abs = row.max_abs,
            sample_ns = row.sample_ns,
            "contract case"
        );
        rows.push(row);
    }

    write_summary_csv(&out_dir.join("summary.csv"), &rows)?;
    let bundle = ContractBundle {
        generated_epoch_seconds: ts,
        param_tolerance: PARAM_TOLERANCE,
        curve_tolerance: CURVE_TOLERANCE,
        rows,
    };
    let json_path = out_dir.join("contracts.json");
    fs::write(
        &json_path,
        serde_json::to_vec_pretty(&bundle).context("serializing contract bundle")?,
    )
    .with_context(|| format!("writing {}", json_path.display()))?;
    info!(dir = %out_dir.display(), "wrote contract report");

    if !failures.is_empty() {
        bail!("{} contract failures:\n{}", failures.len(), failures.join("\n"));
    }
    Ok(())
}

fn relative_error(got: f64, expected: f64) -> f64 {
    (got - expected).abs() / expected.abs().max(1.0)
}

/// Agreement between sampled points and the closed form they should follow.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CurveMetrics {
    count: usize,
    pearson_r: f64,
    mae: f64,
    rmse: f64,
    max_abs: f64,
}

impl CurveMetrics {
    /// Single pass over `points`, comparing each `y` with `expected(x)`.
    fn against(points: &[Point<f64>], expected: impl Fn(f64) -> f64) -> Self {
        let (mut sum_y, mut sum_e, mut sum_yy, mut sum_ee, mut sum_ye) = (0.0, 0.0, 0.0, 0.0, 0.0);
        let (mut abs_err, mut sq_err, mut max_abs) = (0.0, 0.0, 0.0f64);
        for point in points {
            let e = expected(point.x);
            let diff = (point.y - e).abs();
            abs_err += diff;
            sq_err += diff * diff;
            max_abs = max_abs.max(diff);
            sum_y += point.y;
            sum_e += e;
            sum_yy += point.y * point.y;
            sum_ee += e * e;
            sum_ye += point.y * e;
        }

        let count = points.len();
        let n = count.max(1) as f64;
        let cov = sum_ye - sum_y * sum_e / n;
        let var_y = sum_yy - sum_y * sum_y / n;
        let var_e = sum_ee - sum_e * sum_e / n;
        // Flat curves correlate perfectly only when they coincide.
        let pearson_r = if var_y <= f64::EPSILON || var_e <= f64::EPSILON {
            if max_abs <= CURVE_TOLERANCE {
                1.0
            } else {
                0.0
            }
        } else {
            cov / (var_y * var_e).sqrt()
        };

        Self {
            count,
            pearson_r,
            mae: abs_err / n,
            rmse: (sq_err / n).sqrt(),
            max_abs,
        }
    }
}

fn mean_run_ns(runs: u32, mut run: impl FnMut() -> Result<()>) -> Result<f64> {
    let start = Instant::now();
    for _ in 0..runs {
        run()?;
    }
    Ok((start.elapsed() / runs).as_nanos() as f64)
}

fn write_summary_csv(path: &Path, rows: &[ContractRow]) -> Result<()> {
    let mut out = String::new();
    out.push_str("case_id,expression,max_param_error,domain_half_width,samples,discarded,pearson_r,mae,rmse,max_abs,reference_max_abs,sample_ns,overlay_plot\n");
    for row in rows {
        out.push_str(&format!(
            "{},\"{}\",{:.3e},{:.12},{},{},{:.12},{:.3e},{:.3e},{:.3e},{:.3e},{:.3},{}\n",
            row.case_id,
            row.expression,
            row.max_param_error,
            row.domain_half_width,
            row.samples,
            row.discarded,
            row.pearson_r,
            row.mae,
            row.rmse,
            row.max_abs,
            row.reference_max_abs,
            row.sample_ns,
            row.overlay_plot.as_deref().unwrap_or("")
        ));
    }
    fs::write(path, out).with_context(|| format!("writing {}", path.display()))
}
