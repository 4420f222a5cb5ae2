//! Basic example demonstrating songkmeans usage
//!
//! Run with: cargo run --example basic --release

use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use songkmeans::{cluster_profiles, KMeans, KMeansConfig, FEATURE_NAMES};

fn main() {
    println!("=== songkmeans example ===\n");

    // Three synthetic song styles:
    // danceability, energy, loudness (dB), valence, tempo (BPM)
    let styles = [
        ("calm", [30.0, 20.0, -14.0, 25.0, 75.0]),
        ("energetic", [55.0, 90.0, -4.0, 50.0, 150.0]),
        ("dance", [85.0, 70.0, -6.0, 80.0, 122.0]),
    ];
    let n_samples = 300;

    println!("Generating {} songs in {} styles...", n_samples, styles.len());

    let mut data = Array2::<f64>::zeros((n_samples, FEATURE_NAMES.len()));
    for i in 0..n_samples {
        let (_, center) = styles[i % styles.len()];
        let noise = Array2::random((1, FEATURE_NAMES.len()), Uniform::new(-3.0, 3.0));
        for j in 0..FEATURE_NAMES.len() {
            data[[i, j]] = center[j] + noise[[0, j]];
        }
    }

    let config = KMeansConfig::new(styles.len())
        .with_max_iters(100)
        .with_seed(42);

    println!("Running k-means with k={}...\n", config.k);

    let kmeans = KMeans::with_config(config);
    let result = kmeans.fit(&data.view()).expect("Clustering failed");

    println!(
        "Stopped after {} iterations ({:?})\n",
        result.n_iterations, result.termination
    );

    let profiles = cluster_profiles(&data.view(), &result.labels.view(), result.k())
        .expect("Profiling failed");

    println!("Cluster profiles:");
    for profile in &profiles {
        print!("  Cluster {} ({} songs):", profile.cluster, profile.size);
        if let Some(mean) = &profile.mean {
            for (name, value) in FEATURE_NAMES.iter().zip(mean.iter()) {
                print!(" {}={:.1}", name, value);
            }
        }
        println!();
    }

    println!("\nFirst 6 song assignments:");
    for i in 0..6 {
        println!(
            "  Song {} ({}) -> Cluster {}",
            i,
            styles[i % styles.len()].0,
            result.labels[i]
        );
    }

    println!("\n=== Done! ===");
}
