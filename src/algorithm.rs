use crate::config::KMeansConfig;
use crate::distance::{compute_centroid_shift, find_nearest_centroids, nearest_centroid};
use crate::error::{KMeansError, Result};
use ndarray::{Array1, Array2, ArrayView2, Axis};
use rand::seq::index;
use rand::Rng;
use tracing::{debug, info};

/// How a fit ended. Both states carry a valid labelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// An assignment step moved no row
    Converged,
    /// `max_iters` cycles ran without reaching a stable assignment
    IterationCapReached,
}

/// Result of the k-means algorithm
#[derive(Debug, Clone)]
pub struct KMeansResult {
    /// Final centroids, one row per cluster
    pub centroids: Array2<f64>,
    /// Cluster index of every input row
    pub labels: Array1<usize>,
    /// Number of assignment/update cycles performed
    pub n_iterations: usize,
    pub termination: Termination,
}

impl KMeansResult {
    /// Number of clusters
    pub fn k(&self) -> usize {
        self.centroids.nrows()
    }

    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// Assign new vectors to their nearest fitted centroid.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if `data` does not have the same number
    /// of features as the centroids.
    pub fn predict(&self, data: &ArrayView2<f64>) -> Result<Array1<usize>> {
        if data.ncols() != self.centroids.ncols() {
            return Err(KMeansError::InvalidDimensions(format!(
                "Expected {} features, got {}",
                self.centroids.ncols(),
                data.ncols()
            )));
        }

        Ok(find_nearest_centroids(data, &self.centroids.view()))
    }
}

/// Check the data and configuration before any computation happens
pub fn validate_inputs(data: &ArrayView2<f64>, config: &KMeansConfig) -> Result<()> {
    let n_samples = data.nrows();
    let k = config.k;

    if k == 0 {
        return Err(KMeansError::InvalidConfiguration(
            "k must be greater than 0".to_string(),
        ));
    }

    if config.max_iters == 0 {
        return Err(KMeansError::InvalidConfiguration(
            "max_iters must be greater than 0".to_string(),
        ));
    }

    if n_samples == 0 {
        return Err(KMeansError::InvalidConfiguration(
            "dataset is empty".to_string(),
        ));
    }

    if data.ncols() == 0 {
        return Err(KMeansError::InvalidConfiguration(
            "feature vectors must have at least one column".to_string(),
        ));
    }

    if n_samples < k {
        return Err(KMeansError::InvalidConfiguration(format!(
            "Number of samples ({}) is less than k ({})",
            n_samples, k
        )));
    }

    if let Some(((row, col), value)) = data.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(KMeansError::InvalidConfiguration(format!(
            "non-finite value {} at row {}, column {}",
            value, row, col
        )));
    }

    Ok(())
}

/// Run k-means from centroids drawn out of `data` with `rng`
pub fn kmeans_fit<R: Rng + ?Sized>(
    data: &ArrayView2<f64>,
    config: &KMeansConfig,
    rng: &mut R,
) -> Result<KMeansResult> {
    validate_inputs(data, config)?;

    let (centroids, selected) = initialize_centroids(data, config.k, rng);

    // Each seed row already belongs to the centroid copied from it
    let mut labels = Array1::zeros(data.nrows());
    for (cluster, &row) in selected.iter().enumerate() {
        labels[row] = cluster;
    }

    run_iterations(data, config, centroids, labels)
}

/// Run k-means from caller-supplied starting centroids
pub fn kmeans_from_centroids(
    data: &ArrayView2<f64>,
    config: &KMeansConfig,
    centroids: Array2<f64>,
) -> Result<KMeansResult> {
    validate_inputs(data, config)?;

    if centroids.dim() != (config.k, data.ncols()) {
        return Err(KMeansError::InvalidConfiguration(format!(
            "initial centroids have shape {:?}, expected ({}, {})",
            centroids.shape(),
            config.k,
            data.ncols()
        )));
    }

    // Without known seed rows every row starts in cluster 0
    let labels = Array1::zeros(data.nrows());
    run_iterations(data, config, centroids, labels)
}

/// The assignment/update loop. Inputs are already validated.
fn run_iterations(
    data: &ArrayView2<f64>,
    config: &KMeansConfig,
    mut centroids: Array2<f64>,
    mut labels: Array1<usize>,
) -> Result<KMeansResult> {
    let n_samples = data.nrows();

    debug!(
        n_samples,
        n_features = data.ncols(),
        k = config.k,
        max_iters = config.max_iters,
        "Training k-means"
    );

    let mut n_iterations = 0;
    let mut termination = Termination::IterationCapReached;

    for iteration in 0..config.max_iters {
        n_iterations = iteration + 1;

        let changed = assign_labels(data, &centroids.view(), &mut labels);

        let prev_centroids = centroids.clone();
        let empty_clusters = update_centroids(data, &labels, &mut centroids);
        if !empty_clusters.is_empty() {
            debug!(
                iteration = n_iterations,
                clusters = ?empty_clusters,
                "Empty clusters keep their previous centroid"
            );
        }

        let shift = compute_centroid_shift(&prev_centroids.view(), &centroids.view());
        debug!(iteration = n_iterations, changed, shift, "k-means iteration");

        if changed == 0 {
            termination = Termination::Converged;
            break;
        }
    }

    match termination {
        Termination::Converged => info!(iterations = n_iterations, "k-means converged"),
        Termination::IterationCapReached => info!(
            iterations = n_iterations,
            "k-means stopped at the iteration cap without converging"
        ),
    }

    Ok(KMeansResult {
        centroids,
        labels,
        n_iterations,
        termination,
    })
}

/// Pick `k` distinct rows of `data` as starting centroids.
///
/// Returns the centroids together with the row index each one was copied
/// from. The centroids are copies, so later updates never touch `data`.
pub fn initialize_centroids<R: Rng + ?Sized>(
    data: &ArrayView2<f64>,
    k: usize,
    rng: &mut R,
) -> (Array2<f64>, Vec<usize>) {
    let selected = index::sample(rng, data.nrows(), k).into_vec();
    debug!(rows = ?selected, "Seeded centroids");

    (data.select(Axis(0), &selected), selected)
}

/// Assignment step: relabel every row with its nearest centroid.
///
/// Returns how many rows changed cluster.
pub fn assign_labels(
    data: &ArrayView2<f64>,
    centroids: &ArrayView2<f64>,
    labels: &mut Array1<usize>,
) -> usize {
    let mut changed = 0;

    for (row, label) in data.outer_iter().zip(labels.iter_mut()) {
        let best = nearest_centroid(&row, centroids);
        if *label != best {
            *label = best;
            changed += 1;
        }
    }

    changed
}

/// Update step: move each centroid to the mean of the rows labelled with it.
///
/// A cluster that owns no rows keeps its centroid as is. Returns the indices
/// of those empty clusters.
pub fn update_centroids(
    data: &ArrayView2<f64>,
    labels: &Array1<usize>,
    centroids: &mut Array2<f64>,
) -> Vec<usize> {
    let k = centroids.nrows();
    let mut cluster_sums: Array2<f64> = Array2::zeros(centroids.raw_dim());
    let mut cluster_counts = vec![0usize; k];

    for (row, &label) in data.outer_iter().zip(labels.iter()) {
        let mut sum = cluster_sums.row_mut(label);
        sum += &row;
        cluster_counts[label] += 1;
    }

    let mut empty_clusters = Vec::new();

    for (cluster_idx, &count) in cluster_counts.iter().enumerate() {
        if count == 0 {
            empty_clusters.push(cluster_idx);
            continue;
        }

        let mean = &cluster_sums.row(cluster_idx) / count as f64;
        centroids.row_mut(cluster_idx).assign(&mean);
    }

    empty_clusters
}
