//! Criterion benchmarks for the MD5 hasher.
//!
//! Run with:
//!   cargo bench --bench md5

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use md5_resume::{md5_digest, Md5};

fn input(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i * 131 + 17) as u8).collect()
}

fn bench_one_shot(c: &mut Criterion) {
    let mut group = c.benchmark_group("md5_one_shot");

    for &size in &[64usize, 1024, 65_536, 1_048_576] {
        let data = input(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| md5_digest(black_box(data)))
        });
    }

    group.finish();
}

fn bench_incremental(c: &mut Criterion) {
    let mut group = c.benchmark_group("md5_incremental");
    let data = input(262_144);

    // Odd chunk sizes keep a partial block buffered between writes.
    for &chunk in &[1usize, 37, 64, 4096] {
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(chunk), &data, |b, data| {
            b.iter(|| {
                let mut d = Md5::new();
                for piece in data.chunks(chunk) {
                    d.update(black_box(piece));
                }
                d.finalize()
            })
        });
    }

    group.finish();
}

fn bench_state_transfer(c: &mut Criterion) {
    let mut d = Md5::new();
    d.update(&input(1000));
    let blob = d.get_state();

    c.bench_function("md5_get_state", |b| b.iter(|| black_box(&d).get_state()));
    c.bench_function("md5_from_state", |b| {
        b.iter(|| Md5::from_state(black_box(&blob)).unwrap())
    });
}

criterion_group!(benches, bench_one_shot, bench_incremental, bench_state_transfer);
criterion_main!(benches);
