use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand::rngs::StdRng;

use robust_outliers::stats::univariate::Sample;
use robust_outliers::Detector;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn vec(size: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    (0..size).map(|_| rng.gen()).collect()
}

fn vec_with_missing(size: usize) -> Vec<Option<f64>> {
    vec(size)
        .into_iter()
        .enumerate()
        .map(|(i, x)| if i % 10 == 0 { None } else { Some(x) })
        .collect()
}

fn sample_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");
    for &size in SIZES.iter() {
        let v = vec(size);
        group.bench_with_input(BenchmarkId::new("median", size), &v, |b, v| {
            let s = Sample::new(v);
            b.iter(|| s.median())
        });
        group.bench_with_input(BenchmarkId::new("median_abs_dev", size), &v, |b, v| {
            let s = Sample::new(v);
            b.iter(|| s.median_abs_dev(None))
        });
    }
    group.finish();
}

fn detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect");
    for &size in SIZES.iter() {
        let v = vec(size);
        group.bench_with_input(BenchmarkId::new("complete", size), &v, |b, v| {
            let detector = Detector::new();
            b.iter(|| detector.detect_slice(v))
        });

        let v = vec_with_missing(size);
        group.bench_with_input(BenchmarkId::new("drop_missing", size), &v, |b, v| {
            let detector = Detector::new().drop_missing(true);
            b.iter(|| detector.detect(v))
        });
    }
    group.finish();
}

fn reduced_samples() -> Criterion {
    Criterion::default().sample_size(20)
}

criterion_group! {
    name = benches;
    config = reduced_samples();
    targets = sample_stats, detect
}
criterion_main!(benches);
