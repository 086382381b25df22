//! Brute-force nearest-neighbor ranking.
//!
//! Every document is compared against every other document. Candidates are
//! sorted by ascending Euclidean distance with a stable sort, so exact ties
//! keep corpus load order. Nothing in this path iterates an unordered
//! collection, which keeps the output bit-reproducible for a fixed corpus.

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use related_embeddings::Corpus;

/// Distance from one document to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborEdge {
    /// Subject document id.
    pub from: String,

    /// Neighbor document id, never equal to `from`.
    pub to: String,

    /// Euclidean distance between the two embeddings.
    pub distance: f32,
}

/// Closest documents to one subject, nearest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedNeighbors {
    /// Subject document id.
    pub subject: String,

    /// Edges in non-decreasing distance order.
    pub ranked: Vec<NeighborEdge>,
}

impl RankedNeighbors {
    /// Neighbor ids in rank order.
    pub fn neighbor_ids(&self) -> impl Iterator<Item = &str> {
        self.ranked.iter().map(|edge| edge.to.as_str())
    }
}

/// Ranked neighbors keyed by subject id, in corpus load order.
pub type RankedMap = IndexMap<String, RankedNeighbors>;

/// Produces ranked neighbor lists for a corpus.
///
/// Implementations must return exactly `min(k, corpus.len() - 1)` edges per
/// document and key the map in corpus load order.
pub trait NeighborRanker {
    fn rank_neighbors(&self, corpus: &Corpus, k: usize) -> RankedMap;
}

/// Exhaustive O(N² · D) ranker.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceRanker {
    /// Rank subjects on the rayon thread pool.
    pub parallel: bool,
}

impl BruteForceRanker {
    /// Create a sequential ranker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel ranking.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl NeighborRanker for BruteForceRanker {
    fn rank_neighbors(&self, corpus: &Corpus, k: usize) -> RankedMap {
        // Requests beyond the available neighbors return all of them.
        let k = k.min(corpus.len().saturating_sub(1));
        let subjects = 0..corpus.len();

        let ranked: Vec<RankedNeighbors> = if self.parallel {
            subjects
                .into_par_iter()
                .map(|subject| rank_subject(corpus, subject, k))
                .collect()
        } else {
            subjects
                .map(|subject| rank_subject(corpus, subject, k))
                .collect()
        };

        info!(
            "Ranked {} documents, {k} neighbors each (parallel: {})",
            ranked.len(),
            self.parallel
        );

        ranked
            .into_iter()
            .map(|neighbors| (neighbors.subject.clone(), neighbors))
            .collect()
    }
}

/// Rank the neighbors of every document in `corpus` sequentially.
pub fn rank_neighbors(corpus: &Corpus, k: usize) -> RankedMap {
    BruteForceRanker::new().rank_neighbors(corpus, k)
}

fn rank_subject(corpus: &Corpus, subject: usize, k: usize) -> RankedNeighbors {
    let documents = corpus.all();
    let current = &documents[subject];

    let mut candidates: Vec<(usize, f32)> = (0..documents.len())
        .filter(|&position| position != subject)
        .map(|position| (position, corpus.distance_at(subject, position)))
        .collect();

    // `sort_by_key` is stable: equal distances keep load order.
    candidates.sort_by_key(|&(_, distance)| OrderedFloat(distance));
    candidates.truncate(k);

    debug!("Ranked {} neighbors for {}", candidates.len(), current.id);

    RankedNeighbors {
        subject: current.id.clone(),
        ranked: candidates
            .into_iter()
            .map(|(position, distance)| NeighborEdge {
                from: current.id.clone(),
                to: documents[position].id.clone(),
                distance,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn triangle() -> Corpus {
        Corpus::load(vec![
            ("origin", vec![0.0, 0.0]),
            ("near", vec![1.0, 0.0]),
            ("far", vec![5.0, 5.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_nearest_first() {
        let ranked = rank_neighbors(&triangle(), 2);
        let origin = &ranked["origin"];

        assert_eq!(origin.neighbor_ids().collect::<Vec<_>>(), vec!["near", "far"]);
        assert_eq!(origin.ranked[0].distance, 1.0);
        assert!((origin.ranked[1].distance - 50.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_map_in_load_order() {
        let ranked = rank_neighbors(&triangle(), 1);
        let subjects: Vec<&str> = ranked.keys().map(String::as_str).collect();
        assert_eq!(subjects, vec!["origin", "near", "far"]);
    }

    #[test]
    fn test_k_clamped_to_available() {
        let ranked = rank_neighbors(&triangle(), 10);
        for neighbors in ranked.values() {
            assert_eq!(neighbors.ranked.len(), 2);
        }

        let ranked = rank_neighbors(&triangle(), 0);
        assert!(ranked.values().all(|n| n.ranked.is_empty()));
    }

    #[test]
    fn test_edges_exclude_self_and_are_sorted() {
        let corpus = Corpus::load(vec![
            ("a", vec![0.3, 1.2, -0.4]),
            ("b", vec![0.1, 0.9, 0.0]),
            ("c", vec![-2.0, 0.5, 1.1]),
            ("d", vec![0.3, 1.1, -0.5]),
            ("e", vec![4.0, -3.0, 2.0]),
        ])
        .unwrap();

        let ranked = rank_neighbors(&corpus, 3);
        for (subject, neighbors) in &ranked {
            assert_eq!(neighbors.ranked.len(), 3);
            for edge in &neighbors.ranked {
                assert_eq!(&edge.from, subject);
                assert_ne!(&edge.to, subject);
                assert!(edge.distance >= 0.0);
            }
            assert!(
                neighbors
                    .ranked
                    .windows(2)
                    .all(|w| w[0].distance <= w[1].distance)
            );
        }
    }

    #[test]
    fn test_ties_follow_load_order() {
        // "left" and "right" are equidistant from "center"; "up" too.
        let corpus = Corpus::load(vec![
            ("right", vec![1.0, 0.0]),
            ("center", vec![0.0, 0.0]),
            ("up", vec![0.0, 1.0]),
            ("left", vec![-1.0, 0.0]),
        ])
        .unwrap();

        let ranked = rank_neighbors(&corpus, 3);
        assert_eq!(
            ranked["center"].neighbor_ids().collect::<Vec<_>>(),
            vec!["right", "up", "left"]
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let pairs: Vec<(String, Vec<f32>)> = (0..40)
            .map(|i| {
                let x = i as f32;
                (format!("doc-{i:02}"), vec![(x * 0.37).sin(), (x * 1.3).cos(), x % 7.0])
            })
            .collect();
        let corpus = Corpus::load(pairs).unwrap();

        let sequential = BruteForceRanker::new().rank_neighbors(&corpus, 5);
        let parallel = BruteForceRanker::new()
            .with_parallel(true)
            .rank_neighbors(&corpus, 5);

        assert_eq!(sequential, parallel);
    }
}
