use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use songkmeans::{KMeans, KMeansConfig};
use std::time::Duration;

/// Song feature rows: danceability, energy, loudness, valence, tempo
const N_FEATURES: usize = 5;

fn benchmark_kmeans_varying_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_samples");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let k = 3;
    let sample_sizes = [1_000, 5_000, 20_000];

    for n_samples in sample_sizes.iter() {
        group.throughput(Throughput::Elements(*n_samples as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(n_samples),
            n_samples,
            |b, &n_samples| {
                let data = Array2::random((n_samples, N_FEATURES), Uniform::new(0.0, 100.0));
                let kmeans =
                    KMeans::with_config(KMeansConfig::new(k).with_max_iters(10).with_seed(42));

                b.iter(|| kmeans.fit(black_box(&data.view())).unwrap());
            },
        );
    }
    group.finish();
}

fn benchmark_kmeans_varying_clusters(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_clusters");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let n_samples = 5_000;
    let cluster_counts = [3, 10, 50];

    for k in cluster_counts.iter() {
        group.throughput(Throughput::Elements(*k as u64));
        group.bench_with_input(BenchmarkId::from_parameter(k), k, |b, &k| {
            let data = Array2::random((n_samples, N_FEATURES), Uniform::new(0.0, 100.0));
            let kmeans = KMeans::with_config(KMeansConfig::new(k).with_max_iters(10).with_seed(42));

            b.iter(|| kmeans.fit(black_box(&data.view())).unwrap());
        });
    }
    group.finish();
}

fn benchmark_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_predict");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let predict_sizes = [1_000, 10_000];

    let train_data = Array2::random((5_000, N_FEATURES), Uniform::new(0.0, 100.0));
    let result = KMeans::with_config(KMeansConfig::new(8).with_seed(42))
        .fit(&train_data.view())
        .unwrap();

    for n_predict in predict_sizes.iter() {
        group.throughput(Throughput::Elements(*n_predict as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(n_predict),
            n_predict,
            |b, &n_predict| {
                let test_data = Array2::random((n_predict, N_FEATURES), Uniform::new(0.0, 100.0));

                b.iter(|| result.predict(black_box(&test_data.view())).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_kmeans_varying_samples,
    benchmark_kmeans_varying_clusters,
    benchmark_predict,
);

criterion_main!(benches);
