//! Criterion micro-benchmarks for transition index operations.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use latsim_bench::{build_index, exchange_profile, reference_profile, stress_profile};

/// Deterministic uniform draws in `[0, 1)`.
fn draws(n: usize) -> Vec<f64> {
    (0..n)
        .map(|k| (k as f64 * 0.618_033_988_749_895).fract())
        .collect()
}

/// Benchmark: 1000 incremental sample-and-apply steps on 1000 sites.
fn bench_incremental_update_1k(c: &mut Criterion) {
    let index = build_index(&reference_profile(42)).unwrap();
    let us = draws(1000);

    c.bench_function("incremental_update_1k", |b| {
        b.iter_batched(
            || index.clone(),
            |mut index| {
                for &u in &us {
                    let r = u * index.total_rate();
                    black_box(index.sample_and_apply(r));
                }
                index
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: one full exit-rate rescan of 1000 sites, the cost an
/// incremental update avoids.
fn bench_full_rescan_1k(c: &mut Criterion) {
    let index = build_index(&reference_profile(42)).unwrap();

    c.bench_function("full_rescan_1k", |b| {
        b.iter(|| black_box(index.rescan_total_rate()));
    });
}

/// Benchmark: 1000 incremental steps on 100K sites. Should track the 1K
/// figure, not scale with length.
fn bench_incremental_update_100k(c: &mut Criterion) {
    let index = build_index(&stress_profile(42)).unwrap();
    let us = draws(1000);

    c.bench_function("incremental_update_100k", |b| {
        b.iter_batched(
            || index.clone(),
            |mut index| {
                for &u in &us {
                    let r = u * index.total_rate();
                    black_box(index.sample_and_apply(r));
                }
                index
            },
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark: construction scan of a three-species lattice.
fn bench_build_exchange_1k(c: &mut Criterion) {
    let config = exchange_profile(42);

    c.bench_function("build_exchange_1k", |b| {
        b.iter(|| black_box(build_index(&config).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_incremental_update_1k,
    bench_full_rescan_1k,
    bench_incremental_update_100k,
    bench_build_exchange_1k
);
criterion_main!(benches);
