//! # Related Retrieval
//!
//! This crate ranks every post's nearest neighbors in embedding space and
//! turns the result into a related-posts report keyed by permalink.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Related Posts                                │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  load_records ──► Corpus ──► NeighborRanker ──► RankedMap       │
//! │                                                     │           │
//! │                                 LocatorCodec ──► emit           │
//! │                                                     │           │
//! │                                                     ▼           │
//! │                                       RecommendationReport      │
//! │                                       (text / json / yaml)      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use related_retrieval::RelatedPosts;
//!
//! let engine = RelatedPosts::builder()
//!     .with_data_dir("scripts/generate-related/data")
//!     .with_neighbors(2)
//!     .build()?;
//!
//! let (report, _stats) = engine.run().await?;
//! engine.write_report(&report).await?;
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod ranking;
pub mod report;

pub use config::{DEFAULT_NEIGHBORS, OutputFormat, RelatedConfig};
pub use engine::{RelatedPosts, RelatedPostsBuilder, RunStats};
pub use error::{Result, RetrievalError};
pub use ranking::{
    BruteForceRanker, NeighborEdge, NeighborRanker, RankedMap, RankedNeighbors, rank_neighbors,
};
pub use report::{RecommendationReport, ReportEntry, emit};

// Re-export from dependencies for convenience
pub use related_embeddings::{Corpus, Document, Embedding, EmbeddingError};
pub use related_permalink::{LocatorCodec, PostPermalink};
