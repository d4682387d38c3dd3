//! # Grid Benchmark
//!
//! Rebuild and 3x3 query cost for both grid indexes.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use starward_spatial::{HashGrid, SortedGrid, SpatialIndex, DEFAULT_CELL_SIZE};

fn layout(count: usize) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    (0..count * 2).map(|_| rng.gen_range(0.0..2000.0)).collect()
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_rebuild");

    for count in [100, 1_000, 5_000] {
        let positions = layout(count);

        let mut hash = HashGrid::new(DEFAULT_CELL_SIZE).unwrap();
        group.bench_with_input(BenchmarkId::new("hash", count), &positions, |b, p| {
            b.iter(|| hash.rebuild(black_box(p)).unwrap());
        });

        let mut sorted = SortedGrid::new(DEFAULT_CELL_SIZE).unwrap();
        group.bench_with_input(BenchmarkId::new("sorted", count), &positions, |b, p| {
            b.iter(|| sorted.rebuild(black_box(p)).unwrap());
        });
    }

    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_query");
    let positions = layout(2_000);

    let mut hash = HashGrid::new(DEFAULT_CELL_SIZE).unwrap();
    hash.rebuild(&positions).unwrap();
    let mut sorted = SortedGrid::new(DEFAULT_CELL_SIZE).unwrap();
    sorted.rebuild(&positions).unwrap();

    let mut out = Vec::with_capacity(256);
    group.bench_function("hash", |b| {
        b.iter(|| {
            out.clear();
            hash.query_into(black_box(1000.0), black_box(1000.0), &mut out);
            out.len()
        });
    });
    group.bench_function("sorted", |b| {
        b.iter(|| {
            out.clear();
            sorted.query_into(black_box(1000.0), black_box(1000.0), &mut out);
            out.len()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_rebuild, bench_query);
criterion_main!(benches);
