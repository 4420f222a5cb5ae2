/// Configuration for a k-means fit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Maximum number of assignment/update cycles. Reaching it stops the fit
    /// with the current labels; it is not an error.
    pub max_iters: usize,

    /// Seed for the centroid sampler used by `KMeans::fit`
    pub seed: u64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 3,
            max_iters: 100,
            seed: 0,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Set the maximum number of iterations
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KMeansConfig::default();
        assert_eq!(config.k, 3);
        assert_eq!(config.max_iters, 100);
        assert_eq!(config.seed, 0);
    }

    #[test]
    fn test_builder_chain() {
        let config = KMeansConfig::new(7).with_max_iters(12).with_seed(99);
        assert_eq!(
            config,
            KMeansConfig {
                k: 7,
                max_iters: 12,
                seed: 99
            }
        );
    }
}
