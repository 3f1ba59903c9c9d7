//! Long-term memory - authoritative record store with optional vector search
//!
//! The id -> memory map is the source of truth. An optional [`VectorIndex`]
//! holds only the vector and light metadata of memories that carry an
//! embedding. Without an index, search degrades to the most recently added
//! memories with no ranking.
//!
//! Map and index updates are not transactional: if the index fails after the
//! map was written, the two stay inconsistent until the caller re-adds or
//! deletes the memory.

use crate::error::MemoryResult;
use crate::types::{Memory, MemoryValue};
use crate::vector::{check_dimension, VectorIndex, VectorItem};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Long-term memory store
pub struct LongTermStore {
    /// Authoritative records
    memories: HashMap<String, Memory>,

    /// Ids by add order, oldest first
    order: VecDeque<String>,

    /// Optional similarity index
    index: Option<Arc<dyn VectorIndex>>,
}

impl LongTermStore {
    /// Create a store without a vector index
    pub fn new() -> Self {
        Self {
            memories: HashMap::new(),
            order: VecDeque::new(),
            index: None,
        }
    }

    /// Create a store backed by a vector index
    pub fn with_index(index: Arc<dyn VectorIndex>) -> Self {
        Self {
            index: Some(index),
            ..Self::new()
        }
    }

    /// Whether a vector index is configured
    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    /// The configured vector index, if any
    pub fn index(&self) -> Option<&Arc<dyn VectorIndex>> {
        self.index.as_ref()
    }

    /// Upsert a memory and, if it has an embedding, its vector.
    ///
    /// Replacing a memory with one that has no embedding removes the old
    /// vector from the index. The embedding dimension is checked before either store is touched.
    pub async fn add(&mut self, memory: Memory) -> MemoryResult<()> {
        let item = match (&self.index, &memory.embedding) {
            (Some(index), Some(embedding)) => {
                check_dimension(index.dimension(), embedding)?;
                Some(
                    VectorItem::new(memory.id.clone(), embedding.clone())
                        .with_metadata(index_metadata(&memory)),
                )
            }
            _ => None,
        };

        let id = memory.id.clone();
        self.order.retain(|existing| existing != &id);
        self.order.push_back(id.clone());
        let replaced = self.memories.insert(id.clone(), memory).is_some();

        if let Some(index) = &self.index {
            let result = match item {
                Some(item) => index.insert(item).await,
                None if replaced => index.delete(&id).await,
                None => Ok(()),
            };
            if let Err(err) = result {
                tracing::warn!(%id, error = %err, "long-term index update failed after record write");
                return Err(err);
            }
        }

        tracing::debug!(%id, "long-term memory stored");
        Ok(())
    }

    /// Get a memory by id, counting the access
    pub fn get(&mut self, id: &str) -> Option<&Memory> {
        let memory = self.memories.get_mut(id)?;
        memory.record_access();
        Some(memory)
    }

    /// Whether an id is present (does not count as an access)
    pub fn contains(&self, id: &str) -> bool {
        self.memories.contains_key(id)
    }

    /// Search for memories similar to `query`.
    ///
    /// With an index: delegates to it and hydrates each hit from the
    /// authoritative map, dropping ids the map no longer holds. Without one:
    /// returns the `limit` most recently added memories, newest first, and
    /// ignores `query` and `threshold`. Every returned memory counts as an
    /// access.
    pub async fn search(
        &mut self,
        query: &[f32],
        limit: usize,
        threshold: f32,
    ) -> MemoryResult<Vec<Memory>> {
        let ids: Vec<String> = match &self.index {
            Some(index) => index
                .search(query, limit, threshold)
                .await?
                .into_iter()
                .map(|hit| hit.id)
                .collect(),
            None => self.order.iter().rev().take(limit).cloned().collect(),
        };

        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            match self.memories.get_mut(&id) {
                Some(memory) => {
                    memory.record_access();
                    results.push(memory.clone());
                }
                None => tracing::trace!(%id, "index hit without record dropped"),
            }
        }

        tracing::trace!(hits = results.len(), indexed = self.index.is_some(), "long-term search");
        Ok(results)
    }

    /// Delete a memory from the map and the index. Absent ids are a no-op.
    ///
    /// Returns whether the record existed.
    pub async fn delete(&mut self, id: &str) -> MemoryResult<bool> {
        let existed = self.memories.remove(id).is_some();
        if existed {
            self.order.retain(|existing| existing != id);
        }

        if let Some(index) = &self.index {
            if let Err(err) = index.delete(id).await {
                tracing::warn!(%id, error = %err, "long-term index delete failed after record removal");
                return Err(err);
            }
        }

        Ok(existed)
    }

    /// Remove every memory from the map and the index
    pub async fn clear(&mut self) -> MemoryResult<()> {
        self.memories.clear();
        self.order.clear();

        if let Some(index) = &self.index {
            index.clear().await?;
        }
        Ok(())
    }

    /// Number of stored memories
    pub fn size(&self) -> usize {
        self.memories.len()
    }
}

impl Default for LongTermStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Light metadata stored next to a vector: the memory's own metadata plus its kind
fn index_metadata(memory: &Memory) -> HashMap<String, MemoryValue> {
    let mut metadata = memory.metadata.clone();
    metadata.insert("kind".to_string(), MemoryValue::from(memory.kind.as_str()));
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MemoryKind;
    use crate::vector::InMemoryVectorIndex;

    fn memory(id: &str, embedding: Option<Vec<f32>>) -> Memory {
        let memory = Memory::new(MemoryKind::LongTerm, format!("fact {}", id)).with_id(id);
        match embedding {
            Some(embedding) => memory.with_embedding(embedding),
            None => memory,
        }
    }

    #[tokio::test]
    async fn test_fallback_returns_most_recent_without_index() {
        let mut store = LongTermStore::new();
        store.add(memory("first", None)).await.unwrap();
        store.add(memory("second", None)).await.unwrap();

        let results = store.search(&[0.3, 0.3], 1, 0.9).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "second");
    }

    #[tokio::test]
    async fn test_fallback_readd_moves_to_most_recent() {
        let mut store = LongTermStore::new();
        store.add(memory("a", None)).await.unwrap();
        store.add(memory("b", None)).await.unwrap();
        store.add(memory("a", None)).await.unwrap();

        let results = store.search(&[], 2, 0.0).await.unwrap();
        let ids: Vec<&str> = results.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(store.size(), 2);
    }

    #[tokio::test]
    async fn test_indexed_search_hydrates_and_counts_access() {
        let index = Arc::new(InMemoryVectorIndex::new(3));
        let mut store = LongTermStore::with_index(index.clone());

        store.add(memory("a", Some(vec![1.0, 0.0, 0.0]))).await.unwrap();
        store.add(memory("b", Some(vec![0.9, 0.1, 0.0]))).await.unwrap();
        store.add(memory("c", Some(vec![0.0, 1.0, 0.0]))).await.unwrap();
        store.add(memory("plain", None)).await.unwrap();

        assert_eq!(index.len().await.unwrap(), 3);
        assert_eq!(store.size(), 4);

        let results = store.search(&[0.95, 0.05, 0.0], 2, 0.0).await.unwrap();
        let ids: Vec<&str> = results.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(results[0].access_count, 1);
        assert_eq!(results[0].content.as_string(), Some("fact a"));

        let item = index.get("a").await.unwrap().unwrap();
        assert_eq!(item.metadata["kind"].as_string(), Some("long_term"));
    }

    #[tokio::test]
    async fn test_readd_without_embedding_drops_stale_vector() {
        let index = Arc::new(InMemoryVectorIndex::new(2));
        let mut store = LongTermStore::with_index(index.clone());

        store.add(memory("m", Some(vec![1.0, 0.0]))).await.unwrap();
        store.add(memory("m", None)).await.unwrap();

        assert_eq!(store.size(), 1);
        assert_eq!(index.len().await.unwrap(), 0);
        assert!(store.search(&[1.0, 0.0], 5, 0.0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_index_only_ids_are_dropped() {
        let index = Arc::new(InMemoryVectorIndex::new(2));
        index
            .insert(VectorItem::new("orphan", vec![1.0, 0.0]))
            .await
            .unwrap();

        let mut store = LongTermStore::with_index(index);
        store.add(memory("kept", Some(vec![0.9, 0.1]))).await.unwrap();

        let results = store.search(&[1.0, 0.0], 10, 0.0).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "kept");
    }

    #[tokio::test]
    async fn test_wrong_dimension_rejected_before_write() {
        let index = Arc::new(InMemoryVectorIndex::new(3));
        let mut store = LongTermStore::with_index(index.clone());

        let err = store
            .add(memory("bad", Some(vec![1.0, 0.0])))
            .await
            .unwrap_err();

        assert!(err.is_dimension_mismatch());
        assert_eq!(store.size(), 0);
        assert!(index.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_cascades_and_is_idempotent() {
        let index = Arc::new(InMemoryVectorIndex::new(2));
        let mut store = LongTermStore::with_index(index.clone());
        store.add(memory("a", Some(vec![1.0, 0.0]))).await.unwrap();

        assert!(store.delete("a").await.unwrap());
        assert!(store.get("a").is_none());
        assert!(index.get("a").await.unwrap().is_none());

        let removed = tokio_test::assert_ok!(store.delete("a").await);
        assert!(!removed);
    }

    #[tokio::test]
    async fn test_clear_cascades() {
        let index = Arc::new(InMemoryVectorIndex::new(2));
        let mut store = LongTermStore::with_index(index.clone());
        store.add(memory("a", Some(vec![1.0, 0.0]))).await.unwrap();
        store.add(memory("b", None)).await.unwrap();

        store.clear().await.unwrap();
        assert_eq!(store.size(), 0);
        assert!(index.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_get_counts_access() {
        let mut store = LongTermStore::new();
        store.add(memory("a", None)).await.unwrap();

        assert_eq!(store.get("a").unwrap().access_count, 1);
        assert!(store.contains("a"));
        assert_eq!(store.get("a").unwrap().access_count, 2);
    }
}
