//! Error types for permalink parsing.

use thiserror::Error;

/// Result type alias for permalink operations.
pub type Result<T> = std::result::Result<T, PermalinkError>;

/// Errors that can occur while mapping identifiers to permalinks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermalinkError {
    /// The identifier does not follow the `YYYY-MM-DD-<slug>.<ext>` layout.
    #[error("malformed identifier {id:?}: {reason}")]
    MalformedIdentifier { id: String, reason: String },
}

impl PermalinkError {
    pub(crate) fn malformed(id: &str, reason: impl Into<String>) -> Self {
        Self::MalformedIdentifier {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}
