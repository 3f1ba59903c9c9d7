//! Exact in-process vector index
//!
//! Scores every stored vector on each query (O(n)). Items are kept in
//! insertion order so that equal scores come back in the order they were
//! first inserted; re-inserting an id overwrites it in place.

use super::{
    check_dimension, cosine_similarity, rank_hits, SearchHit, VectorBackend, VectorIndex,
    VectorItem,
};
use crate::error::MemoryResult;
use parking_lot::RwLock;

/// Reference [`VectorIndex`] backed by an in-memory vector list
pub struct InMemoryVectorIndex {
    dimension: usize,
    items: RwLock<Vec<VectorItem>>,
}

impl InMemoryVectorIndex {
    /// Create an empty index for vectors of `dimension` components
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            items: RwLock::new(Vec::new()),
        }
    }

    fn upsert(items: &mut Vec<VectorItem>, item: VectorItem) {
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
    }
}

#[async_trait::async_trait]
impl VectorIndex for InMemoryVectorIndex {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn backend(&self) -> VectorBackend {
        VectorBackend::InMemory
    }

    async fn insert(&self, item: VectorItem) -> MemoryResult<()> {
        check_dimension(self.dimension, &item.vector)?;
        tracing::trace!(id = %item.id, "vector upserted");

        Self::upsert(&mut self.items.write(), item);
        Ok(())
    }

    async fn insert_many(&self, items: Vec<VectorItem>) -> MemoryResult<()> {
        for item in &items {
            check_dimension(self.dimension, &item.vector)?;
        }

        let count = items.len();
        let mut stored = self.items.write();
        for item in items {
            Self::upsert(&mut stored, item);
        }
        tracing::trace!(count, "vectors upserted");

        Ok(())
    }

    async fn get(&self, id: &str) -> MemoryResult<Option<VectorItem>> {
        Ok(self.items.read().iter().find(|item| item.id == id).cloned())
    }

    async fn search(
        &self,
        vector: &[f32],
        limit: usize,
        threshold: f32,
    ) -> MemoryResult<Vec<SearchHit>> {
        check_dimension(self.dimension, vector)?;

        let scored: Vec<SearchHit> = self
            .items
            .read()
            .iter()
            .map(|item| {
                SearchHit::new(item.id.clone(), cosine_similarity(vector, &item.vector))
                    .with_metadata(item.metadata.clone())
            })
            .collect();

        Ok(rank_hits(scored, limit, threshold))
    }

    async fn delete(&self, id: &str) -> MemoryResult<()> {
        self.items.write().retain(|item| item.id != id);
        Ok(())
    }

    async fn clear(&self) -> MemoryResult<()> {
        self.items.write().clear();
        Ok(())
    }

    async fn len(&self) -> MemoryResult<usize> {
        Ok(self.items.read().len())
    }
}
