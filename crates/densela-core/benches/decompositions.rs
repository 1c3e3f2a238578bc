//! Matrix product kernels and decompositions on random square matrices.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use densela_core::Matrix;
use densela_core::linalg;

const SIZES: [usize; 3] = [16, 64, 128];

fn spd(n: usize, seed: u64) -> Matrix {
    let b = Matrix::random_seeded(n, n, seed);
    let gram = b.transpose().multiply(&b).unwrap();
    gram.add(&Matrix::identity(n).scalar_multiply(n as f64)).unwrap()
}

fn multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply");
    for &n in &SIZES {
        let a = Matrix::random_seeded(n, n, 1);
        let b = Matrix::random_seeded(n, n, 2);
        group.bench_with_input(BenchmarkId::new("naive", n), &n, |bench, _| {
            bench.iter(|| linalg::multiply_naive(black_box(&a), black_box(&b)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("blocked", n), &n, |bench, _| {
            bench.iter(|| linalg::multiply_blocked(black_box(&a), black_box(&b)).unwrap());
        });
    }
    group.finish();
}

fn factorizations(c: &mut Criterion) {
    let mut group = c.benchmark_group("factorizations");
    for &n in &SIZES {
        let a = spd(n, 3);
        group.bench_with_input(BenchmarkId::new("lu", n), &a, |bench, a| {
            bench.iter(|| black_box(a).lu().unwrap());
        });
        group.bench_with_input(BenchmarkId::new("qr", n), &a, |bench, a| {
            bench.iter(|| black_box(a).qr().unwrap());
        });
        group.bench_with_input(BenchmarkId::new("cholesky", n), &a, |bench, a| {
            bench.iter(|| black_box(a).cholesky().unwrap());
        });
        group.bench_with_input(BenchmarkId::new("inverse", n), &a, |bench, a| {
            bench.iter(|| black_box(a).inverse().unwrap());
        });
    }
    group.finish();
}

fn spectral(c: &mut Criterion) {
    let mut group = c.benchmark_group("spectral");
    group.sample_size(20);
    for &n in &SIZES[..2] {
        let a = spd(n, 4);
        group.bench_with_input(BenchmarkId::new("svd", n), &a, |bench, a| {
            bench.iter(|| black_box(a).svd().unwrap());
        });
        group.bench_with_input(BenchmarkId::new("eigen_symmetric", n), &a, |bench, a| {
            bench.iter(|| black_box(a).eigen().unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, multiply, factorizations, spectral);
criterion_main!(benches);
