use thiserror::Error;

/// Error types for the songkmeans library
#[derive(Error, Debug)]
pub enum KMeansError {
    /// The fit cannot start: bad k or iteration cap, empty or ragged data,
    /// or fewer rows than clusters
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Shape mismatch between data, labels, or fitted centroids
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),

    /// Required feature columns are absent from the CSV header
    #[error("Missing columns {missing:?}; header has {found:?}")]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },

    /// The CSV input has no header line
    #[error("Input has no header row")]
    EmptyInput,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, KMeansError>;
