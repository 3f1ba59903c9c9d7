//! Semantic memory - keyed knowledge storage
//!
//! Semantic memory stores facts and learned knowledge under a caller-chosen
//! concept key. Each key holds a single value: storing it again overwrites the
//! entry and its vector. Optional vector search works like long-term memory,
//! but without an index the fallback returns arbitrary entries rather than
//! the most recent ones.

use crate::error::MemoryResult;
use crate::types::MemoryValue;
use crate::vector::{check_dimension, VectorIndex, VectorItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// A piece of knowledge stored under a concept key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticEntry {
    /// Concept key (e.g. "user:alice:preferred_language")
    pub key: String,

    /// The knowledge itself
    pub value: MemoryValue,

    /// Optional vector embedding for similarity search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,

    /// When the entry was stored
    pub stored_at: DateTime<Utc>,

    /// Optional metadata
    #[serde(default)]
    pub metadata: HashMap<String, MemoryValue>,
}

impl SemanticEntry {
    /// Create a new entry
    pub fn new(key: impl Into<String>, value: impl Into<MemoryValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            embedding: None,
            stored_at: Utc::now(),
            metadata: HashMap::new(),
        }
    }

    /// Set the embedding for this entry
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MemoryValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Result of a semantic search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticHit {
    /// Concept key
    pub key: String,

    /// Stored value
    pub value: MemoryValue,

    /// Similarity score; `None` when no index is configured
    pub score: Option<f32>,

    /// Entry metadata
    pub metadata: HashMap<String, MemoryValue>,
}

/// Keyed knowledge store
pub struct SemanticStore {
    /// Entries by concept key
    entries: HashMap<String, SemanticEntry>,

    /// Optional similarity index keyed by concept key
    index: Option<Arc<dyn VectorIndex>>,
}

impl SemanticStore {
    /// Create a store without a vector index
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            index: None,
        }
    }

    /// Create a store backed by a vector index
    pub fn with_index(index: Arc<dyn VectorIndex>) -> Self {
        Self {
            entries: HashMap::new(),
            index: Some(index),
        }
    }

    /// Whether a vector index is configured
    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    /// Store a value under `key`, replacing any previous entry
    pub async fn store(
        &mut self,
        key: impl Into<String>,
        value: impl Into<MemoryValue>,
    ) -> MemoryResult<()> {
        self.store_entry(SemanticEntry::new(key, value)).await
    }

    /// Store a full entry, replacing any previous entry under its key.
    ///
    /// With an index, the vector is re-inserted under the same key; an
    /// entry stored without an embedding removes the previous vector.
    pub async fn store_entry(&mut self, entry: SemanticEntry) -> MemoryResult<()> {
        if let (Some(index), Some(embedding)) = (&self.index, &entry.embedding) {
            check_dimension(index.dimension(), embedding)?;
        }

        let key = entry.key.clone();
        let item = entry.embedding.as_ref().map(|embedding| {
            VectorItem::new(key.clone(), embedding.clone()).with_metadata(entry.metadata.clone())
        });
        let replaced = self.entries.insert(key.clone(), entry).is_some();

        if let Some(index) = &self.index {
            let result = match item {
                Some(item) => index.insert(item).await,
                None if replaced => index.delete(&key).await,
                None => Ok(()),
            };
            if let Err(err) = result {
                tracing::warn!(%key, error = %err, "semantic index update failed after entry write");
                return Err(err);
            }
        }

        tracing::debug!(%key, replaced, "semantic entry stored");
        Ok(())
    }

    /// Get an entry by key
    pub fn get(&self, key: &str) -> Option<&SemanticEntry> {
        self.entries.get(key)
    }

    /// Get just the value (without metadata)
    pub fn get_value(&self, key: &str) -> Option<&MemoryValue> {
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Whether a key exists
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Search for knowledge similar to `query`.
    ///
    /// With an index: scored hits hydrated from the entry map, dropping keys
    /// the map no longer holds. Without one: up to `limit` arbitrary entries,
    /// unscored.
    pub async fn search(
        &self,
        query: &[f32],
        limit: usize,
        threshold: f32,
    ) -> MemoryResult<Vec<SemanticHit>> {
        let Some(index) = &self.index else {
            return Ok(self
                .entries
                .values()
                .take(limit)
                .map(|entry| to_hit(entry, None))
                .collect());
        };

        let hits = index
            .search(query, limit, threshold)
            .await?
            .into_iter()
            .filter_map(|hit| {
                self.entries
                    .get(&hit.id)
                    .map(|entry| to_hit(entry, Some(hit.score)))
            })
            .collect::<Vec<_>>();

        tracing::trace!(hits = hits.len(), "semantic search");
        Ok(hits)
    }

    /// Delete an entry and its vector. Absent keys are a no-op.
    ///
    /// Returns whether the entry existed.
    pub async fn delete(&mut self, key: &str) -> MemoryResult<bool> {
        let existed = self.entries.remove(key).is_some();
        if let Some(index) = &self.index {
            index.delete(key).await?;
        }
        Ok(existed)
    }

    /// Remove every entry and vector
    pub async fn clear(&mut self) -> MemoryResult<()> {
        self.entries.clear();
        if let Some(index) = &self.index {
            index.clear().await?;
        }
        Ok(())
    }

    /// All keys, in no particular order
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Number of entries
    pub fn size(&self) -> usize {
        self.entries.len()
    }
}

impl Default for SemanticStore {
    fn default() -> Self {
        Self::new()
    }
}

fn to_hit(entry: &SemanticEntry, score: Option<f32>) -> SemanticHit {
    SemanticHit {
        key: entry.key.clone(),
        value: entry.value.clone(),
        score,
        metadata: entry.metadata.clone(),
    }
}
