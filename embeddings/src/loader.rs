//! Loading per-document embedding records from disk.
//!
//! Each document's embedding lives in its own file inside a data
//! directory, named after the source post. The file name is the
//! document identifier.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};

use crate::Embedding;
use crate::error::{EmbeddingError, Result};

/// On-disk shape of an embedding record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingRecord {
    /// A bare JSON array of numbers.
    Vector(Embedding),

    /// An object carrying the vector under `embedding`.
    Entry { embedding: Embedding },
}

impl EmbeddingRecord {
    /// Parse a record from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Consume the record, returning its vector.
    pub fn into_embedding(self) -> Embedding {
        match self {
            Self::Vector(embedding) | Self::Entry { embedding } => embedding,
        }
    }
}

/// Read every embedding record in `dir`.
///
/// Hidden files and subdirectories are skipped. Symbolic links are
/// followed, so a linked record loads like a regular one. Records are returned
/// sorted by file name so the load order does not depend on how the
/// filesystem lists the directory.
pub async fn load_records(dir: impl AsRef<Path>) -> Result<Vec<(String, Embedding)>> {
    let dir = dir.as_ref();
    let mut entries = fs::read_dir(dir).await?;
    let mut records = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            return Err(EmbeddingError::InvalidRecord {
                path,
                reason: "file name is not valid UTF-8".to_string(),
            });
        };

        if name.starts_with('.') {
            debug!("Skipping hidden file {}", path.display());
            continue;
        }
        if !fs::metadata(&path).await?.is_file() {
            debug!("Skipping non-file entry {}", path.display());
            continue;
        }

        let content = fs::read_to_string(&path).await?;
        let record = EmbeddingRecord::from_json(&content).map_err(|e| {
            EmbeddingError::InvalidRecord {
                path: path.clone(),
                reason: e.to_string(),
            }
        })?;

        records.push((name.to_string(), record.into_embedding()));
    }

    records.sort_by(|(a, _), (b, _)| a.cmp(b));
    info!(
        "Read {} embedding records from {}",
        records.len(),
        dir.display()
    );

    Ok(records)
}
