//! Benchmarks for the ROC area estimator and Hamming-distance binning.
//!
//! Run:
//! - cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use anomaly_graphs::core::histogram::hamming_histogram;
use anomaly_graphs::core::roc::{AucRule, PointOrdering, auc_from_fpr_tpr};
use rand::{Rng, SeedableRng, rngs::StdRng};

const CURVE_LENS: [usize; 3] = [19, 200, 2000];
const SAMPLE_LENS: [usize; 3] = [100, 1_000, 100_000];

fn make_curve(len: usize, rng: &mut StdRng) -> (Vec<f64>, Vec<f64>) {
    (0..len)
        .map(|_| (rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)))
        .unzip()
}

fn bench_auc(c: &mut Criterion) {
    let mut group = c.benchmark_group("auc_from_fpr_tpr");
    let mut rng = StdRng::seed_from_u64(11);

    for &len in &CURVE_LENS {
        let (fpr, tpr) = make_curve(len, &mut rng);
        for (name, rule, ordering) in [
            ("left_paired", AucRule::LeftRiemann, PointOrdering::Paired),
            ("trapezoid_paired", AucRule::Trapezoid, PointOrdering::Paired),
            ("left_independent", AucRule::LeftRiemann, PointOrdering::Independent),
        ] {
            let id = BenchmarkId::new(name, len);
            group.bench_with_input(id, &(&fpr, &tpr), |b, (fpr, tpr)| {
                b.iter(|| auc_from_fpr_tpr(black_box(fpr), black_box(tpr), rule, ordering));
            });
        }
    }
    group.finish();
}

fn bench_histogram(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamming_histogram");
    let mut rng = StdRng::seed_from_u64(23);

    for &len in &SAMPLE_LENS {
        let distances: Vec<u32> = (0..len).map(|_| rng.random_range(0..24)).collect();
        group.bench_with_input(BenchmarkId::new("bins", len), &distances, |b, d| {
            b.iter(|| hamming_histogram(black_box(d)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_auc, bench_histogram);
criterion_main!(benches);
