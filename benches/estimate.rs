use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use spectradim::{estimate, extract, search, search_with, DimensionSettings, DynMatrix, Parallelism, ThreadPool};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `blocks` communities of `size` nodes with a deterministic ripple.
fn block_graph(blocks: usize, size: usize) -> DynMatrix<f64> {
    let n = blocks * size;
    DynMatrix::from_fn(n, n, |i, j| {
        let p = if i / size == j / size { 0.9 } else { 0.1 };
        p + 0.05 * ((i * 13 + j * 7) as f64).sin()
    })
}

fn decaying_spectrum(n: usize) -> Vec<f64> {
    (0..n).map(|i| 100.0 / (1.0 + i as f64) + 0.01 * ((i * 31) as f64).sin()).collect()
}

// ---------------------------------------------------------------------------
// Spectrum extraction
// ---------------------------------------------------------------------------

fn extract_spectrum(c: &mut Criterion) {
    let mut g = c.benchmark_group("extract");
    for &n in &[20, 60, 120] {
        let a = block_graph(4, n / 4);
        g.bench_with_input(BenchmarkId::new("values", n), &a, |b, a| {
            b.iter(|| extract(std::hint::black_box(a), None))
        });
        g.bench_with_input(BenchmarkId::new("svd", n), &a, |b, a| {
            b.iter(|| std::hint::black_box(a).svd())
        });
    }
    g.finish();
}

// ---------------------------------------------------------------------------
// Split search
// ---------------------------------------------------------------------------

fn split_search(c: &mut Criterion) {
    let mut g = c.benchmark_group("search");
    let pool = ThreadPool::new(0).unwrap();
    for &n in &[100, 1_000, 10_000] {
        let sv = decaying_spectrum(n);
        g.bench_with_input(BenchmarkId::new("sequential", n), &sv, |b, sv| {
            b.iter(|| search(std::hint::black_box(sv), None, Parallelism::Sequential))
        });
        g.bench_with_input(BenchmarkId::new("shared_pool", n), &sv, |b, sv| {
            b.iter(|| search_with(std::hint::black_box(sv), None, &pool))
        });
    }
    g.finish();
}

fn end_to_end(c: &mut Criterion) {
    let a = block_graph(3, 20);
    let settings = DimensionSettings::default().with_parallelism(Parallelism::Sequential);
    c.bench_function("estimate_60x60", |b| {
        b.iter(|| estimate(std::hint::black_box(&a), None, &settings))
    });
}

criterion_group!(benches, extract_spectrum, split_search, end_to_end);
criterion_main!(benches);
