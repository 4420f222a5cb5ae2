//! Cluster songs by their audio features
//!
//! Reads a song CSV, runs k-means over danceability, energy, loudness,
//! valence and tempo, and writes `Title,Artist,Cluster` rows.
//!
//! With `--recommend` it also lists the songs of the chosen clusters.
//!
//! Usage: `songkmeans -i spotify.csv -o clustered_songs.csv -k 3 --profile`
//! or `songkmeans --recommend 0,2 --sort title-asc`

use anyhow::{Context, Result};
use clap::Parser;
use songkmeans::{
    cluster_profiles, cluster_sizes, load_songs, recommend, write_clustered_songs, KMeans,
    KMeansConfig, SortOrder, Termination,
};
use std::time::Instant;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Song clustering CLI using k-means on audio features
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input song CSV (comma or semicolon separated)
    #[arg(short, long, default_value = "spotify.csv")]
    input: String,

    /// Path of the clustered output CSV
    #[arg(short, long, default_value = "clustered_songs.csv")]
    output: String,

    /// Number of clusters
    #[arg(short = 'k', long, default_value = "3")]
    clusters: usize,

    /// Maximum assignment/update iterations
    #[arg(long, default_value = "100")]
    max_iters: usize,

    /// Seed for the initial centroid draw; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Print the average feature profile of every cluster
    #[arg(short, long)]
    profile: bool,

    /// List the songs of these clusters (comma separated, e.g. 0,2)
    #[arg(short, long, value_delimiter = ',')]
    recommend: Option<Vec<usize>>,

    /// Order of the recommended songs
    #[arg(long, value_enum, default_value_t = SortOrder::Unsorted)]
    sort: SortOrder,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

const PROFILE_LABELS: [&str; 5] = ["Danceability", "Energy", "Loudness", "Valence", "Tempo"];

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let start_time = Instant::now();

    let songs = load_songs(&args.input)
        .with_context(|| format!("Failed to load songs from {}", args.input))?;
    info!(songs = songs.len(), input = %args.input, "Loaded songs");

    let seed = args.seed.unwrap_or_else(rand::random);
    let config = KMeansConfig::new(args.clusters)
        .with_max_iters(args.max_iters)
        .with_seed(seed);
    info!(k = config.k, max_iters = config.max_iters, seed, "Fitting k-means");

    let result = KMeans::with_config(config)
        .fit(&songs.features.view())
        .context("Clustering failed")?;

    if result.termination == Termination::IterationCapReached {
        info!(
            iterations = result.n_iterations,
            "Assignments were still changing at the iteration cap"
        );
    }

    write_clustered_songs(&args.output, &songs, &result.labels.view())
        .with_context(|| format!("Failed to write {}", args.output))?;

    println!("file {}", args.output);

    println!("\n=== Cluster Sizes ===");
    let sizes = cluster_sizes(&result.labels.view(), result.k());
    for (i, &size) in sizes.iter().enumerate() {
        let percentage = (size as f64 / songs.len() as f64) * 100.0;
        println!("Cluster {}: {} songs ({:.1}%)", i, size, percentage);
    }

    if args.profile {
        println!("\n=== Average Values per Cluster ===");
        let profiles =
            cluster_profiles(&songs.features.view(), &result.labels.view(), result.k())?;
        for profile in &profiles {
            println!("Cluster {}:", profile.cluster);
            match &profile.mean {
                Some(mean) => {
                    for (label, value) in PROFILE_LABELS.iter().zip(mean.iter()) {
                        println!("   - {}: {:.2}", label, value);
                    }
                }
                None => println!("   (empty)"),
            }
            println!();
        }
    }

    if let Some(selected) = &args.recommend {
        if let Some(&unknown) = selected.iter().find(|&&c| c >= result.k()) {
            warn!(cluster = unknown, k = result.k(), "Requested cluster does not exist");
        }

        let picked = recommend(&songs, &result.labels.view(), selected, args.sort)?;

        println!("\n=== Recommended Songs (clusters {:?}) ===", selected);
        if picked.is_empty() {
            println!("No results.");
        }
        for (i, song) in picked.iter().enumerate() {
            println!("{}. {} - {}", i + 1, song.title, song.artist);
        }
    }

    info!(
        iterations = result.n_iterations,
        elapsed_secs = start_time.elapsed().as_secs_f64(),
        "Done"
    );

    Ok(())
}
