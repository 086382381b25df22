//! # Embeddings
//!
//! This crate holds the document corpus used for related-post ranking:
//! one embedding per document, validated to share a single dimension.
//!
//! ## Features
//!
//! - **Corpus**: ordered, read-only view with `O(1)` lookup by identifier
//! - **Distance**: raw Euclidean distance between embeddings
//! - **Loader**: reads per-document embedding records from a directory
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Embeddings                                   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  load_records ──► (id, Embedding) pairs ──► Corpus::load        │
//! │                                                │                │
//! │                                                ▼                │
//! │                                      euclidean_distance         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod corpus;
pub mod error;
pub mod loader;
pub mod similarity;

pub use corpus::{Corpus, Document};
pub use error::{EmbeddingError, Result};
pub use loader::{EmbeddingRecord, load_records};
pub use similarity::euclidean_distance;

/// A dense vector embedding.
pub type Embedding = Vec<f32>;

/// Minimum number of documents for at least one neighbor to exist.
pub const MIN_CORPUS_SIZE: usize = 2;
