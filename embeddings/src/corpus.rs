//! Validated, read-only view over the loaded documents.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{EmbeddingError, Result};
use crate::similarity::l2;
use crate::{Embedding, MIN_CORPUS_SIZE};

/// A document and its embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Stable identifier (the source file name).
    pub id: String,

    /// The embedding vector.
    pub embedding: Embedding,
}

/// The set of documents considered in one run.
///
/// Documents keep the order they were loaded in. That order is the
/// tie-break order for ranking, so it is never rearranged.
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Documents in load order.
    documents: Vec<Document>,

    /// Position of each identifier in `documents`.
    positions: HashMap<String, usize>,

    /// Shared dimension, taken from the first document.
    dimension: usize,
}

impl Corpus {
    /// Build a corpus from `(id, embedding)` pairs.
    ///
    /// Fails if an identifier repeats, if any embedding's length differs
    /// from the first one's, if a component is not finite, or if fewer
    /// than two documents are supplied. When the first embedding is empty
    /// and a later one is not, the mismatch names the empty document.
    pub fn load<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Embedding)>,
        S: Into<String>,
    {
        let mut documents: Vec<Document> = Vec::new();
        let mut positions = HashMap::new();
        let mut dimension = None;

        for (id, embedding) in pairs {
            let id = id.into();

            if positions.contains_key(&id) {
                return Err(EmbeddingError::DuplicateIdentifier(id));
            }

            let expected = *dimension.get_or_insert(embedding.len());
            if embedding.len() != expected {
                if let Some(first) = documents.first().filter(|_| expected == 0) {
                    return Err(EmbeddingError::DimensionMismatch {
                        id: first.id.clone(),
                        expected: embedding.len(),
                        actual: 0,
                    });
                }
                return Err(EmbeddingError::DimensionMismatch {
                    id,
                    expected,
                    actual: embedding.len(),
                });
            }

            if let Some(index) = embedding.iter().position(|x| !x.is_finite()) {
                return Err(EmbeddingError::NonFiniteComponent { id, index });
            }

            debug!("Loaded embedding for {id}");
            positions.insert(id.clone(), documents.len());
            documents.push(Document { id, embedding });
        }

        if documents.len() < MIN_CORPUS_SIZE {
            return Err(EmbeddingError::EmptyCorpus {
                count: documents.len(),
            });
        }

        let dimension = dimension.unwrap_or_default();
        info!(
            "Loaded corpus of {} documents (dimension {dimension})",
            documents.len()
        );

        Ok(Self {
            documents,
            positions,
            dimension,
        })
    }

    /// All documents, in load order.
    pub fn all(&self) -> &[Document] {
        &self.documents
    }

    /// Look up the embedding of `id`.
    pub fn vector_of(&self, id: &str) -> Result<&[f32]> {
        self.positions
            .get(id)
            .map(|&pos| self.documents[pos].embedding.as_slice())
            .ok_or_else(|| EmbeddingError::UnknownIdentifier(id.to_string()))
    }

    /// Load-order position of `id`, if present.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Check if an ID exists in the corpus.
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Euclidean distance between two documents.
    pub fn distance_between(&self, a: &str, b: &str) -> Result<f32> {
        Ok(l2(self.vector_of(a)?, self.vector_of(b)?))
    }

    /// Euclidean distance between the documents at load positions `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of bounds.
    pub fn distance_at(&self, i: usize, j: usize) -> f32 {
        l2(&self.documents[i].embedding, &self.documents[j].embedding)
    }

    /// Shared embedding dimension.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if the corpus has no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
