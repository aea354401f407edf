//! Error types for Spendwise

/// Result type alias using Spendwise's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Spendwise operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The feature extractor was fit on zero texts
    #[error("cannot fit feature extractor on an empty corpus")]
    EmptyCorpus,

    /// The classifier was fit on zero examples
    #[error("cannot fit classifier on an empty training set")]
    EmptyTrainingSet,

    /// Feature vectors and labels have different lengths
    #[error("label count mismatch: {vectors} feature vectors but {labels} labels")]
    LabelCountMismatch { vectors: usize, labels: usize },

    /// A model was used before being fit
    #[error("model has not been fitted")]
    NotFitted,

    /// A feature vector does not match the fitted vocabulary size
    #[error("dimension mismatch: expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Record store errors
    #[error("storage error: {0}")]
    Storage(String),

    /// Invalid request data
    #[error("validation error: {0}")]
    Validation(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True for failures caused by bad caller input rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
