//! Agent memory manager - coordinates all memory tiers
//!
//! Writes always land in short-term memory; memories judged important at
//! `remember()` time are also stored long-term. `recall()` blends vector
//! filtered long-term hits with the most recent short-term entries and ranks
//! the union by access frequency and recency.
//!
//! The manager does no internal locking. Share one instance between tasks by
//! wrapping it (e.g. in a `tokio::sync::Mutex`).

use super::config::MemoryConfig;
use super::long_term::LongTermStore;
use super::semantic::SemanticStore;
use super::short_term::ShortTermStore;
use super::working::WorkingStore;
use crate::error::MemoryResult;
use crate::types::{Memory, MemoryKind, MemoryStats};
use crate::vector::{check_dimension, VectorIndex, VectorIndexFactory};
use std::collections::HashSet;
use std::sync::Arc;

/// Number of recent short-term memories blended into every recall
pub const RECALL_RECENT_BUDGET: usize = 5;

/// Weight of one access in the recall ranking score
const ACCESS_WEIGHT: f64 = 0.7;

/// Divisor applied to creation seconds in the recall ranking score
const RECENCY_SCALE: f64 = 1e9;

/// Manages all memory tiers for an agent
pub struct MemoryManager {
    short_term: ShortTermStore,
    long_term: LongTermStore,
    working: WorkingStore,
    semantic: SemanticStore,
    config: MemoryConfig,
}

impl MemoryManager {
    /// Create a manager without vector indexes
    pub fn new(config: MemoryConfig) -> Self {
        Self {
            short_term: ShortTermStore::new(config.short_term_capacity),
            long_term: LongTermStore::new(),
            working: WorkingStore::new(),
            semantic: SemanticStore::new(),
            config,
        }
    }

    /// Create a manager with indexes built from `config.vector`.
    ///
    /// Long-term and semantic memory each get their own index so that memory
    /// ids and concept keys never collide.
    pub fn from_config(config: MemoryConfig, factory: &VectorIndexFactory) -> MemoryResult<Self> {
        config.validate()?;

        let mut manager = Self::new(config);
        if let Some(vector) = manager.config.vector.clone() {
            manager.long_term = LongTermStore::with_index(factory.create(&vector)?);
            manager.semantic = SemanticStore::with_index(factory.create(&vector)?);
            tracing::info!(
                backend = %vector.backend,
                dimension = vector.dimension,
                "memory manager using vector search"
            );
        }
        Ok(manager)
    }

    /// Use `index` for long-term search
    pub fn with_long_term_index(mut self, index: Arc<dyn VectorIndex>) -> Self {
        self.long_term = LongTermStore::with_index(index);
        self
    }

    /// Use `index` for semantic search
    pub fn with_semantic_index(mut self, index: Arc<dyn VectorIndex>) -> Self {
        self.semantic = SemanticStore::with_index(index);
        self
    }

    /// Whether a memory qualifies for long-term storage
    pub fn is_important(&self, memory: &Memory) -> bool {
        memory.access_count >= self.config.importance_threshold
            || memory.is_flagged_important()
            || memory.kind == MemoryKind::LongTerm
    }

    /// Remember a memory.
    ///
    /// Always stored short-term. Importance is evaluated once, here; a memory
    /// that becomes important later through reads is not promoted.
    pub async fn remember(&mut self, memory: Memory) -> MemoryResult<()> {
        if let (Some(index), Some(embedding)) = (self.long_term.index(), &memory.embedding) {
            check_dimension(index.dimension(), embedding)?;
        }

        let important = self.is_important(&memory);
        let id = memory.id.clone();

        if important {
            self.short_term.add(memory.clone());
            self.long_term.add(memory).await?;
        } else {
            self.short_term.add(memory);
        }

        tracing::debug!(%id, promoted = important, "memory remembered");
        Ok(())
    }

    /// Hybrid recall.
    ///
    /// Long-term hits for `query` come first, then up to
    /// [`RECALL_RECENT_BUDGET`] recent short-term memories. Duplicates keep
    /// their first occurrence, and the union is ranked by
    /// `access_count * 0.7 + created_at_seconds / 1e9`, descending.
    pub async fn recall(
        &mut self,
        query: &[f32],
        limit: usize,
        threshold: f32,
    ) -> MemoryResult<Vec<Memory>> {
        let long_term_hits = self.long_term.search(query, limit, threshold).await?;
        let recent_hits = self
            .short_term
            .get_recent(limit.min(RECALL_RECENT_BUDGET))
            .into_iter()
            .cloned();

        let mut seen = HashSet::new();
        let mut results: Vec<Memory> = long_term_hits
            .into_iter()
            .chain(recent_hits)
            .filter(|memory| seen.insert(memory.id.clone()))
            .collect();

        results.sort_by(|a, b| recall_score(b).total_cmp(&recall_score(a)));
        results.truncate(limit);

        tracing::trace!(results = results.len(), "recall complete");
        Ok(results)
    }

    /// Look up a memory by id in short-term, then long-term memory.
    ///
    /// Working and semantic memory are separate namespaces and are not consulted.
    pub fn get(&mut self, id: &str) -> Option<Memory> {
        if let Some(memory) = self.short_term.get(id) {
            return Some(memory.clone());
        }
        self.long_term.get(id).cloned()
    }

    /// Forget a memory from long-term storage.
    ///
    /// Short-term entries only leave through eviction or [`clear`](Self::clear).
    pub async fn forget(&mut self, id: &str) -> MemoryResult<bool> {
        let removed = self.long_term.delete(id).await?;
        tracing::debug!(%id, removed, "memory forgotten");
        Ok(removed)
    }

    /// Clear every tier
    pub async fn clear(&mut self) -> MemoryResult<()> {
        self.short_term.clear();
        self.working.clear();
        futures::try_join!(self.long_term.clear(), self.semantic.clear())?;

        tracing::debug!("all memory tiers cleared");
        Ok(())
    }

    /// Entry counts per tier
    pub fn get_stats(&self) -> MemoryStats {
        MemoryStats {
            short_term: self.short_term.size(),
            long_term: self.long_term.size(),
            working: self.working.size(),
            semantic: self.semantic.size(),
        }
    }

    /// Short-term memory
    pub fn short_term(&self) -> &ShortTermStore {
        &self.short_term
    }

    /// Long-term memory
    pub fn long_term(&self) -> &LongTermStore {
        &self.long_term
    }

    /// Mutable long-term memory
    pub fn long_term_mut(&mut self) -> &mut LongTermStore {
        &mut self.long_term
    }

    /// Working memory
    pub fn working(&self) -> &WorkingStore {
        &self.working
    }

    /// Mutable working memory
    pub fn working_mut(&mut self) -> &mut WorkingStore {
        &mut self.working
    }

    /// Semantic memory
    pub fn semantic(&self) -> &SemanticStore {
        &self.semantic
    }

    /// Mutable semantic memory
    pub fn semantic_mut(&mut self) -> &mut SemanticStore {
        &mut self.semantic
    }

    /// Get configuration
    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new(MemoryConfig::default())
    }
}

fn recall_score(memory: &Memory) -> f64 {
    memory.access_count as f64 * ACCESS_WEIGHT + memory.created_at_seconds() / RECENCY_SCALE
}
