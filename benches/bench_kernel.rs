use criterion::{black_box, criterion_group, criterion_main, Criterion};
use optkernel::{
    kernel::OptimizationKernel,
    perturbation::{LevyFlight, LevyOutput},
    problem::{BoundsSpec, KernelOptions, Mode},
    repair::RepairPolicy,
    rng::RandomNumberGenerator,
};

fn rastrigin(x: &[f64]) -> f64 {
    10.0 * x.len() as f64
        + x.iter()
            .map(|v| v * v - 10.0 * (2.0 * std::f64::consts::PI * v).cos())
            .sum::<f64>()
}

fn kernel(dimension: usize) -> OptimizationKernel<fn(&[f64]) -> f64> {
    let options = KernelOptions::builder()
        .bounds(BoundsSpec::Scalar {
            lower: -5.12,
            upper: 5.12,
        })
        .dimension(dimension)
        .build()
        .unwrap();
    OptimizationKernel::new(
        rastrigin as fn(&[f64]) -> f64,
        options,
        RandomNumberGenerator::from_seed(42),
    )
}

fn bench_create_population(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_population");
    for size in [10, 100, 1000].iter() {
        let mut kernel = kernel(30);
        group.bench_function(&format!("create_population_{}", size), |b| {
            b.iter(|| black_box(kernel.create_population(*size)))
        });
    }
    group.finish();
}

fn bench_repair(c: &mut Criterion) {
    let mut kernel = kernel(100);
    let wild: Vec<f64> = (0..100).map(|i| (i as f64 - 50.0) * 0.2).collect();

    let mut group = c.benchmark_group("repair");
    for policy in [RepairPolicy::Clamp, RepairPolicy::Random] {
        group.bench_function(&format!("{:?}", policy), |b| {
            b.iter(|| kernel.amend_position(black_box(&wild), policy).unwrap())
        });
    }
    group.finish();
}

fn bench_levy(c: &mut Criterion) {
    let mut kernel = kernel(30);
    let position = kernel.create_solution(Mode::Minimize).position;
    let best = kernel.create_solution(Mode::Minimize).position;
    let flight = LevyFlight::default();

    let mut group = c.benchmark_group("levy_flight");
    group.bench_function("general", |b| {
        b.iter(|| {
            kernel
                .levy_flight(&flight, black_box(&position), black_box(&best), LevyOutput::Nudge)
                .unwrap()
        })
    });
    group.bench_function("fixed", |b| {
        b.iter(|| {
            kernel
                .levy_flight_fixed(black_box(&position), black_box(&best))
                .unwrap()
        })
    });
    group.finish();
}

criterion_group!(benches, bench_create_population, bench_repair, bench_levy);
criterion_main!(benches);
