//! Error types for the embeddings corpus.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for embedding operations.
pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Errors that can occur while loading or querying the corpus.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Dimension mismatch.
    #[error("dimension mismatch for {id:?}: expected {expected}, got {actual}")]
    DimensionMismatch {
        id: String,
        expected: usize,
        actual: usize,
    },

    /// Two vectors compared directly have different lengths.
    #[error("vector length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The same identifier was loaded twice.
    #[error("duplicate identifier: {0}")]
    DuplicateIdentifier(String),

    /// Too few documents to rank anything.
    #[error("corpus needs at least 2 documents, got {count}")]
    EmptyCorpus { count: usize },

    /// Identifier not present in the corpus.
    #[error("unknown identifier: {0}")]
    UnknownIdentifier(String),

    /// A vector component is NaN or infinite.
    #[error("non-finite component at index {index} of {id:?}")]
    NonFiniteComponent { id: String, index: usize },

    /// A record file could not be interpreted as an embedding.
    #[error("invalid embedding record {}: {reason}", path.display())]
    InvalidRecord { path: PathBuf, reason: String },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
