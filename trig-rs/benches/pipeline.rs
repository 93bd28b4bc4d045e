use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::ThreadRng;
use rand::Rng;
use trig_rs::analyze;
use trig_rs::expr::{normalize, parse_expression, PRESETS};

/// Random expressions in the canonical `A*f(Bx+C)+D` shape.
fn randomized_expressions(mut rng: ThreadRng, count: usize) -> Vec<String> {
    (0..count)
        .map(|_| {
            let name = if rng.random_bool(0.5) { "sen" } else { "cos" };
            let a: f64 = rng.random_range(-5.0..5.0);
            let b: f64 = rng.random_range(0.1..8.0);
            let c: f64 = rng.random_range(-3.0..3.0);
            let d: f64 = rng.random_range(-4.0..4.0);
            format!("{a:.3} * {name}( {b:.3}x + {c:.3} ) + {d:.3}")
        })
        .collect()
}

fn normalize_presets(c: &mut Criterion) {
    c.bench_function("normalize presets", |b| {
        b.iter(|| {
            for preset in PRESETS {
                black_box(normalize(black_box(preset)));
            }
        })
    });
}

fn extract_random(c: &mut Criterion) {
    let expressions = randomized_expressions(rand::rng(), 256);
    c.bench_function("parse 256 random expressions", |b| {
        b.iter(|| {
            for text in &expressions {
                black_box(parse_expression(black_box(text)));
            }
        })
    });
}

fn analyze_headline(c: &mut Criterion) {
    c.bench_function("analyze 2*sen(x-1)+2", |b| {
        b.iter(|| black_box(analyze(black_box("2*sen(x-1)+2"))))
    });
}

criterion_group!(benches, normalize_presets, extract_random, analyze_headline);
criterion_main!(benches);
