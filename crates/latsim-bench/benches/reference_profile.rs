//! Criterion benchmarks for complete runs.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use latsim_bench::{build_index, reference_profile};
use latsim_engine::{simulate, NullSink, StochasticDriver};

fn bench_event_throughput_1k(c: &mut Criterion) {
    let index = build_index(&reference_profile(42)).unwrap();

    c.bench_function("event_throughput_1k", |b| {
        b.iter_batched(
            || StochasticDriver::seeded(index.clone(), 42),
            |mut driver| black_box(driver.warm_up(1.0, &mut NullSink)),
            BatchSize::SmallInput,
        );
    });
}

fn bench_simulate_1k(c: &mut Criterion) {
    let config = reference_profile(42);

    c.bench_function("simulate_1k", |b| {
        b.iter(|| {
            let report = simulate(&config).unwrap();
            black_box(report.metrics);
        });
    });
}

criterion_group!(benches, bench_event_throughput_1k, bench_simulate_1k);
criterion_main!(benches);
