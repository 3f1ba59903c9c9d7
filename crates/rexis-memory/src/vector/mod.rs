//! Vector similarity search for long-term and semantic memory
//!
//! [`VectorIndex`] is the contract every backend satisfies: dimension checks
//! before mutation, cosine scoring, inclusive threshold filtering, a stable
//! descending sort, and idempotent deletes. [`InMemoryVectorIndex`] is the exact
//! O(n) reference implementation; [`RemoteVectorIndex`] adapts an external
//! backend's [`VectorTransport`] to the same contract.

mod factory;
mod in_memory;
mod remote;

pub use factory::{VectorBackend, VectorIndexConfig, VectorIndexFactory};
pub use in_memory::InMemoryVectorIndex;
pub use remote::{RemoteVectorIndex, VectorTransport};

use crate::error::{MemoryError, MemoryResult};
use crate::types::MemoryValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A vector stored in an index, keyed by the owning memory's id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorItem {
    /// Id of the owning memory (or semantic key)
    pub id: String,

    /// The vector components
    pub vector: Vec<f32>,

    /// Light metadata; never the full memory content
    #[serde(default)]
    pub metadata: HashMap<String, MemoryValue>,
}

impl VectorItem {
    /// Create a new item without metadata
    pub fn new(id: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            vector,
            metadata: HashMap::new(),
        }
    }

    /// Replace the metadata map
    pub fn with_metadata(mut self, metadata: HashMap<String, MemoryValue>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Search hit with similarity score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Id of the matched item
    pub id: String,

    /// Cosine similarity in `[-1, 1]`, higher is more similar
    pub score: f32,

    /// Metadata stored alongside the vector
    #[serde(default)]
    pub metadata: HashMap<String, MemoryValue>,
}

impl SearchHit {
    /// Create a new hit
    pub fn new(id: impl Into<String>, score: f32) -> Self {
        Self {
            id: id.into(),
            score,
            metadata: HashMap::new(),
        }
    }

    /// Attach metadata
    pub fn with_metadata(mut self, metadata: HashMap<String, MemoryValue>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Similarity-search backend over fixed-dimension vectors
///
/// Implementations must preserve the ordering semantics callers rely on:
/// only scores `>= threshold`, sorted descending, ties in insertion order,
/// truncated to `limit`. Approximate backends may find fewer candidates but
/// must never reorder them differently.
#[async_trait::async_trait]
pub trait VectorIndex: Send + Sync {
    /// Configured vector dimension
    fn dimension(&self) -> usize;

    /// Backend tag of this implementation
    fn backend(&self) -> VectorBackend;

    /// Upsert a single item. Fails with `DimensionMismatch` before any write.
    async fn insert(&self, item: VectorItem) -> MemoryResult<()>;

    /// Upsert many items. Every dimension is validated before anything is written.
    async fn insert_many(&self, items: Vec<VectorItem>) -> MemoryResult<()>;

    /// Fetch an item; `None` when absent
    async fn get(&self, id: &str) -> MemoryResult<Option<VectorItem>>;

    /// Cosine-similarity search
    async fn search(
        &self,
        vector: &[f32],
        limit: usize,
        threshold: f32,
    ) -> MemoryResult<Vec<SearchHit>>;

    /// Remove an item; no-op when absent
    async fn delete(&self, id: &str) -> MemoryResult<()>;

    /// Remove every item
    async fn clear(&self) -> MemoryResult<()>;

    /// Number of stored items
    async fn len(&self) -> MemoryResult<usize>;

    /// Whether the index holds no items
    async fn is_empty(&self) -> MemoryResult<bool> {
        Ok(self.len().await? == 0)
    }
}

/// Cosine similarity `dot(a, b) / (|a| * |b|)`.
///
/// Returns `0.0` when either vector has zero magnitude. Callers check
/// dimensions first; the result is meaningless for vectors of unequal length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();

    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Fail with `DimensionMismatch` unless `vector` has `expected` components
pub fn check_dimension(expected: usize, vector: &[f32]) -> MemoryResult<()> {
    if vector.len() != expected {
        return Err(MemoryError::dimension_mismatch(expected, vector.len()));
    }
    Ok(())
}

/// Apply the contract's result policy to scored candidates.
///
/// Keeps scores `>= threshold`, sorts descending with a stable sort (so
/// candidates keep their incoming order on ties), and truncates to `limit`.
pub fn rank_hits(mut hits: Vec<SearchHit>, limit: usize, threshold: f32) -> Vec<SearchHit> {
    hits.retain(|hit| hit.score >= threshold);
    hits.sort_by(|a, b| b.score.total_cmp(&a.score));
    hits.truncate(limit);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_identical_and_orthogonal() {
        let a = [1.0, 2.0, 3.0];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-6);

        let x = [1.0, 0.0, 0.0];
        let y = [0.0, 1.0, 0.0];
        assert!(cosine_similarity(&x, &y).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let a = [1.0, 1.0];
        let b = [-1.0, -1.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_zero_magnitude_is_zero() {
        let zero = [0.0, 0.0, 0.0];
        let a = [0.3, 0.4, 0.5];

        let sim = cosine_similarity(&zero, &a);
        assert_eq!(sim, 0.0);
        assert!(!cosine_similarity(&zero, &zero).is_nan());
    }

    #[test]
    fn test_check_dimension() {
        assert!(check_dimension(3, &[0.0, 0.0, 0.0]).is_ok());

        let err = check_dimension(3, &[0.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            MemoryError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_rank_hits_threshold_is_inclusive() {
        let hits = vec![
            SearchHit::new("low", 0.2),
            SearchHit::new("edge", 0.5),
            SearchHit::new("high", 0.9),
        ];

        let ranked = rank_hits(hits, 10, 0.5);
        let ids: Vec<&str> = ranked.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "edge"]);
    }

    #[test]
    fn test_rank_hits_stable_on_ties() {
        let hits = vec![
            SearchHit::new("first", 0.7),
            SearchHit::new("second", 0.7),
            SearchHit::new("best", 0.8),
            SearchHit::new("third", 0.7),
        ];

        let ranked = rank_hits(hits, 3, 0.0);
        let ids: Vec<&str> = ranked.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["best", "first", "second"]);
    }
}
