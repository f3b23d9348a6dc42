//! Criterion micro-benchmarks for the cell decomposer.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tessera_bench::reference_decomposer;
use tessera_test_utils::uniform_positions;

/// Benchmark: map 100K seeded positions to cell ids in a 34³ padded grid.
fn bench_cell_id_100k(c: &mut Criterion) {
    let cd = reference_decomposer().unwrap();
    let positions = uniform_positions(cd.domain(), 100_000, 42);

    c.bench_function("cell_id_100k", |b| {
        b.iter(|| {
            for pos in &positions {
                black_box(cd.cell_id(pos).unwrap());
            }
        });
    });
}

/// Benchmark: same positions, padded-frame ids.
fn bench_cell_id_padded_100k(c: &mut Criterion) {
    let cd = reference_decomposer().unwrap();
    let positions = uniform_positions(cd.domain(), 100_000, 42);

    c.bench_function("cell_id_padded_100k", |b| {
        b.iter(|| {
            for pos in &positions {
                black_box(cd.cell_id_padded(pos).unwrap_or(0));
            }
        });
    });
}

criterion_group!(benches, bench_cell_id_100k, bench_cell_id_padded_100k);
criterion_main!(benches);
