use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trig_rs::expr::parse_expression;
use trig_rs::kernel::KernelLifecycle;
use trig_rs::sample::{SamplerConfig, SamplerKernel, TrigWaveConfig, TrigWaveKernel};
use trig_rs::traits::{PlotSample, TrigWave1D};

fn sampler_sizes(c: &mut Criterion) {
    let params = parse_expression("-3*cos(0.5x+1)-1");
    let mut group = c.benchmark_group("sampler");
    for samples in [500usize, 1000, 4000] {
        let kernel = SamplerKernel::try_new(SamplerConfig {
            samples,
            ..SamplerConfig::default()
        })
        .unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(samples), &kernel, |b, kernel| {
            b.iter(|| black_box(kernel.run(black_box(&params)).unwrap()))
        });
    }
    group.finish();
}

fn wave_into_buffer(c: &mut Criterion) {
    let params = parse_expression("2*sin(3x-1)+0.5").params().unwrap();
    let kernel = TrigWaveKernel::<f32>::try_new(TrigWaveConfig::from_params(&params).unwrap())
        .unwrap();
    let input: Vec<f32> = (0..4096).map(|i| i as f32 * 0.01).collect();
    let mut out = vec![0.0f32; input.len()];
    c.bench_function("wave f32 run_into 4096", |b| {
        b.iter(|| kernel.run_into(black_box(&input), &mut out).unwrap())
    });
}

criterion_group!(benches, sampler_sizes, wave_into_buffer);
criterion_main!(benches);
