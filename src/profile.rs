//! Per-cluster summaries of a labelled dataset

use crate::error::{KMeansError, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Size and averaged features of one cluster
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterProfile {
    /// Cluster index
    pub cluster: usize,
    /// Number of rows labelled with this cluster
    pub size: usize,
    /// Per-feature mean of the members, `None` when the cluster is empty
    pub mean: Option<Array1<f64>>,
}

impl ClusterProfile {
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// Count how many labels fall in each of `k` clusters.
///
/// Labels outside `[0, k)` are ignored.
pub fn cluster_sizes(labels: &ArrayView1<usize>, k: usize) -> Vec<usize> {
    let mut sizes = vec![0; k];
    for &label in labels.iter() {
        if label < k {
            sizes[label] += 1;
        }
    }
    sizes
}

/// Average the features of every cluster.
///
/// # Errors
///
/// Returns `InvalidDimensions` if `labels` and `features` disagree on the
/// number of rows, or if a label is not below `k`.
pub fn cluster_profiles(
    features: &ArrayView2<f64>,
    labels: &ArrayView1<usize>,
    k: usize,
) -> Result<Vec<ClusterProfile>> {
    if features.nrows() != labels.len() {
        return Err(KMeansError::InvalidDimensions(format!(
            "{} labels for {} rows",
            labels.len(),
            features.nrows()
        )));
    }

    if let Some(&bad) = labels.iter().find(|&&l| l >= k) {
        return Err(KMeansError::InvalidDimensions(format!(
            "label {} is out of range for {} clusters",
            bad, k
        )));
    }

    let mut sums = Array2::<f64>::zeros((k, features.ncols()));
    let sizes = cluster_sizes(labels, k);

    for (row, &label) in features.outer_iter().zip(labels.iter()) {
        let mut sum = sums.row_mut(label);
        sum += &row;
    }

    Ok(sizes
        .into_iter()
        .enumerate()
        .map(|(cluster, size)| ClusterProfile {
            cluster,
            size,
            mean: (size > 0).then(|| &sums.row(cluster) / size as f64),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_cluster_sizes() {
        let labels = array![0, 2, 2, 1, 2, 7];
        assert_eq!(cluster_sizes(&labels.view(), 3), vec![1, 1, 3]);
    }

    #[test]
    fn test_cluster_profiles() {
        let features = array![[0.2, 100.0], [0.4, 120.0], [0.9, 60.0]];
        let labels = array![1, 1, 0];

        let profiles = cluster_profiles(&features.view(), &labels.view(), 3).unwrap();

        assert_eq!(profiles.len(), 3);
        assert_eq!(profiles.iter().map(|p| p.size).sum::<usize>(), 3);

        let mean0 = profiles[0].mean.as_ref().unwrap();
        assert_relative_eq!(mean0[0], 0.9, epsilon = 1e-12);
        assert_relative_eq!(mean0[1], 60.0, epsilon = 1e-12);

        let mean1 = profiles[1].mean.as_ref().unwrap();
        assert_eq!(profiles[1].size, 2);
        assert_relative_eq!(mean1[0], 0.3, epsilon = 1e-12);
        assert_relative_eq!(mean1[1], 110.0, epsilon = 1e-12);

        assert!(profiles[2].is_empty());
        assert!(profiles[2].mean.is_none());
    }

    #[test]
    fn test_cluster_profiles_shape_errors() {
        let features = array![[1.0], [2.0]];

        let short = array![0];
        assert!(matches!(
            cluster_profiles(&features.view(), &short.view(), 2),
            Err(KMeansError::InvalidDimensions(_))
        ));

        let out_of_range = array![0, 5];
        assert!(matches!(
            cluster_profiles(&features.view(), &out_of_range.view(), 2),
            Err(KMeansError::InvalidDimensions(_))
        ));
    }
}
