use crate::algorithm::{kmeans_fit, kmeans_from_centroids, KMeansResult};
use crate::config::KMeansConfig;
use crate::error::{KMeansError, Result};
use ndarray::{Array1, Array2, ArrayView2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// K-means clusterer.
///
/// A `KMeans` holds only its configuration. Each fit seeds fresh centroids,
/// refines them, and hands them back inside the [`KMeansResult`], so fitting
/// the same instance twice never mixes state between calls.
///
/// # Example
///
/// ```
/// use songkmeans::{KMeans, KMeansConfig};
/// use ndarray::array;
///
/// let data = array![[0.0, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0]];
///
/// let kmeans = KMeans::with_config(KMeansConfig::new(2).with_seed(7));
/// let result = kmeans.fit(&data.view()).unwrap();
///
/// assert_eq!(result.labels.len(), 4);
/// assert_eq!(result.labels[0], result.labels[1]);
/// assert_ne!(result.labels[0], result.labels[2]);
/// ```
#[derive(Debug, Clone)]
pub struct KMeans {
    /// Model configuration
    config: KMeansConfig,
}

impl KMeans {
    /// Create a new clusterer with `k` clusters and default settings
    pub fn new(k: usize) -> Self {
        Self {
            config: KMeansConfig::new(k),
        }
    }

    /// Create a new clusterer with custom configuration
    pub fn with_config(config: KMeansConfig) -> Self {
        Self { config }
    }

    /// Fit the data, drawing initial centroids from a `ChaCha8Rng` seeded
    /// with `config.seed`.
    ///
    /// # Arguments
    ///
    /// * `data` - Feature matrix of shape (n_samples, n_features)
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if:
    /// - k or max_iters is zero
    /// - the data is empty or has no feature columns
    /// - there are fewer samples than clusters
    /// - a feature value is NaN or infinite
    pub fn fit(&self, data: &ArrayView2<f64>) -> Result<KMeansResult> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.fit_with_rng(data, &mut rng)
    }

    /// Fit the data, drawing initial centroids from `rng`
    pub fn fit_with_rng<R: Rng + ?Sized>(
        &self,
        data: &ArrayView2<f64>,
        rng: &mut R,
    ) -> Result<KMeansResult> {
        kmeans_fit(data, &self.config, rng)
    }

    /// Fit the data starting from the given centroids instead of sampled rows.
    ///
    /// `centroids` must have shape (k, n_features).
    pub fn fit_from_centroids(
        &self,
        data: &ArrayView2<f64>,
        centroids: Array2<f64>,
    ) -> Result<KMeansResult> {
        kmeans_from_centroids(data, &self.config, centroids)
    }

    /// Fit the data and return only the cluster label of every row
    pub fn fit_predict(&self, data: &ArrayView2<f64>) -> Result<Array1<usize>> {
        Ok(self.fit(data)?.labels)
    }

    /// Get the number of clusters.
    pub fn k(&self) -> usize {
        self.config.k
    }

    pub fn max_iters(&self) -> usize {
        self.config.max_iters
    }

    /// Get the configuration.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }
}

/// Build a feature matrix from row vectors.
///
/// # Errors
///
/// Returns `InvalidConfiguration` if `rows` is empty or the rows do not all
/// have the same length.
pub fn features_from_rows(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let Some(first) = rows.first() else {
        return Err(KMeansError::InvalidConfiguration(
            "dataset is empty".to_string(),
        ));
    };
    let n_features = first.len();

    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_features) {
        return Err(KMeansError::InvalidConfiguration(format!(
            "row {} has {} features, expected {}",
            i,
            row.len(),
            n_features
        )));
    }

    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((rows.len(), n_features), flat)
        .map_err(|e| KMeansError::InvalidDimensions(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Termination;
    use ndarray::array;
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;

    #[test]
    fn test_kmeans_new() {
        let kmeans = KMeans::new(10);
        assert_eq!(kmeans.k(), 10);
        assert_eq!(kmeans.max_iters(), 100);
    }

    #[test]
    fn test_kmeans_fit() {
        let data = Array2::random((500, 5), Uniform::new(-1.0, 1.0));
        let kmeans = KMeans::new(4);

        let result = kmeans.fit(&data.view()).unwrap();

        assert_eq!(result.k(), 4);
        assert_eq!(result.centroids.ncols(), 5);
        assert_eq!(result.labels.len(), 500);
        assert!(result.labels.iter().all(|&l| l < 4));
    }

    #[test]
    fn test_kmeans_fit_predict() {
        let data = Array2::random((300, 8), Uniform::new(-1.0, 1.0));
        let kmeans = KMeans::with_config(KMeansConfig::new(3).with_seed(11));

        let labels = kmeans.fit_predict(&data.view()).unwrap();
        let result = kmeans.fit(&data.view()).unwrap();

        assert_eq!(labels, result.labels);
    }

    #[test]
    fn test_repeated_fit_is_stateless() {
        let data = Array2::random((200, 5), Uniform::new(-1.0, 1.0));
        let kmeans = KMeans::with_config(KMeansConfig::new(5).with_seed(3));

        let first = kmeans.fit(&data.view()).unwrap();
        let second = kmeans.fit(&data.view()).unwrap();

        assert_eq!(first.labels, second.labels);
        assert_eq!(first.centroids, second.centroids);
        assert_eq!(second.centroids.nrows(), 5);
    }

    #[test]
    fn test_fit_does_not_mutate_input() {
        let data = array![[0.0, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0]];
        let copy = data.clone();

        KMeans::new(2).fit(&data.view()).unwrap();

        assert_eq!(data, copy);
    }

    #[test]
    fn test_k_equals_one() {
        let data = array![[1.0, 2.0], [3.0, 4.0], [5.0, 9.0]];
        let result = KMeans::new(1).fit(&data.view()).unwrap();

        assert_eq!(result.labels.to_vec(), vec![0, 0, 0]);
        assert_eq!(result.termination, Termination::Converged);
        assert_eq!(result.n_iterations, 1);
        assert_eq!(result.centroids, array![[3.0, 5.0]]);
    }

    #[test]
    fn test_invalid_k_zero() {
        let data = array![[1.0], [2.0]];
        let result = KMeans::new(0).fit(&data.view());
        assert!(matches!(result, Err(KMeansError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_features_from_rows() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        let features = features_from_rows(&rows).unwrap();

        assert_eq!(features, array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
    }

    #[test]
    fn test_features_from_rows_rejects_ragged_and_empty() {
        let ragged = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            features_from_rows(&ragged),
            Err(KMeansError::InvalidConfiguration(_))
        ));

        assert!(matches!(
            features_from_rows(&[]),
            Err(KMeansError::InvalidConfiguration(_))
        ));
    }
}
