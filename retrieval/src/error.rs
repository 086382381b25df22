//! Error types for ranking and report generation.

use thiserror::Error;

/// Result type alias for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Errors that can occur while ranking and emitting recommendations.
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// Corpus loading or lookup error.
    #[error("embedding error: {0}")]
    Embedding(#[from] related_embeddings::EmbeddingError),

    /// Identifier could not be mapped to a permalink.
    #[error("permalink error: {0}")]
    Permalink(#[from] related_permalink::PermalinkError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Report rendering error.
    #[error("render error: {0}")]
    Render(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for RetrievalError {
    fn from(err: serde_json::Error) -> Self {
        Self::Render(err.to_string())
    }
}

impl From<serde_yaml::Error> for RetrievalError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Render(err.to_string())
    }
}

impl From<toml::de::Error> for RetrievalError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
