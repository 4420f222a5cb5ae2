//! # songkmeans
//!
//! K-means clustering of song audio features on top of ndarray.
//!
//! ## Features
//!
//! - **Plain Lloyd iterations**: rows go to their nearest centroid by
//!   Euclidean distance, centroids move to the mean of their rows, and the
//!   loop stops once no row changes cluster or the iteration cap is hit
//! - **Reproducible seeding**: initial centroids are distinct data rows drawn
//!   from a seeded `ChaCha8Rng`, or from any `rand::Rng` you pass in
//! - **Stateless fits**: centroids live in the returned [`KMeansResult`],
//!   never in the clusterer
//! - **Song CSV I/O**: load danceability, energy, loudness, valence and tempo
//!   columns from a comma- or semicolon-separated file, write cluster labels
//!   back out, and summarize each cluster's average profile
//!
//! ## Example
//!
//! ```rust
//! use songkmeans::{KMeans, KMeansConfig, Termination};
//! use ndarray::array;
//!
//! let data = array![
//!     [0.0, 0.0],
//!     [0.0, 1.0],
//!     [1.0, 0.0],
//!     [10.0, 10.0],
//!     [10.0, 11.0],
//!     [11.0, 10.0],
//! ];
//!
//! let config = KMeansConfig::new(2).with_max_iters(10).with_seed(42);
//! let result = KMeans::with_config(config).fit(&data.view()).unwrap();
//!
//! assert_eq!(result.termination, Termination::Converged);
//! assert_eq!(result.labels[0], result.labels[2]);
//! assert_ne!(result.labels[0], result.labels[3]);
//! ```
//!
//! ## Songs
//!
//! ```rust
//! use songkmeans::{cluster_profiles, read_songs, KMeans, KMeansConfig};
//!
//! let csv = "\
//! Title;Artist;Danceability;Energy;dB;Valence;BPM
//! Calm;A;20;15;-14;30;70
//! Quiet;B;25;10;-15;25;72
//! Loud;C;80;95;-3;70;128
//! Louder;D;85;90;-2;75;130
//! ";
//!
//! let songs = read_songs(csv.as_bytes()).unwrap();
//! let kmeans = KMeans::with_config(KMeansConfig::new(2).with_seed(1));
//! let result = kmeans.fit(&songs.features.view()).unwrap();
//!
//! let profiles =
//!     cluster_profiles(&songs.features.view(), &result.labels.view(), 2).unwrap();
//! assert_eq!(profiles.iter().map(|p| p.size).sum::<usize>(), 4);
//! ```

mod algorithm;
mod config;
mod distance;
mod error;
mod kmeans;
mod profile;
mod songs;

pub use algorithm::{KMeansResult, Termination};
pub use config::KMeansConfig;
pub use distance::euclidean_distance;
pub use error::{KMeansError, Result};
pub use kmeans::{features_from_rows, KMeans};
pub use profile::{cluster_profiles, cluster_sizes, ClusterProfile};
pub use songs::{
    load_songs, read_songs, recommend, write_clustered_songs, write_clustered_songs_to,
    Recommendation, SongTable, SortOrder, FEATURE_NAMES,
};
