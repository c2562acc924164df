use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pa_base_algos::*;
use pa_generate::ErrorModel;

const E: f32 = 0.05;

fn aligners(c: &mut Criterion) {
    let mut group = c.benchmark_group("aligners");
    for n in [100, 1000, 3000] {
        let (ref a, ref b) = pa_generate::generate_model(n, E, ErrorModel::Uniform, 31415);
        for algorithm in Algorithm::ALL {
            let mut aligner = algorithm.build(&ScoringConfig::default()).unwrap();
            group.bench_function(BenchmarkId::new(algorithm.name(), n), |bb| {
                bb.iter(|| aligner.align(a, b))
            });
        }
        group.bench_function(BenchmarkId::new("score only", n), |bb| {
            bb.iter(|| global_score(a, b, &LinearScore::global_default()))
        });
    }
    group.finish();
}

criterion_group!(benches, aligners);
criterion_main!(benches);
