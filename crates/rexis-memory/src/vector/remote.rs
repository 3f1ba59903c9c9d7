//! Adapter shim for external vector backends
//!
//! A concrete backend client (pgvector, Milvus, ...) only implements the
//! wire-level [`VectorTransport`]. [`RemoteVectorIndex`] wraps it and enforces
//! the [`VectorIndex`] contract on top: dimension checks happen before any
//! transport call, and whatever candidates the backend returns are re-filtered
//! and re-sorted with the same policy as the reference index.
//!
//! Transport errors are propagated unmodified. No retries, no timeouts; those
//! belong to whatever wraps the transport.

use super::{check_dimension, rank_hits, SearchHit, VectorBackend, VectorIndex, VectorItem};
use crate::error::MemoryResult;
use std::sync::Arc;

/// Wire-level operations a remote vector backend provides
#[async_trait::async_trait]
pub trait VectorTransport: Send + Sync {
    /// Backend tag this transport talks to
    fn backend(&self) -> VectorBackend;

    /// Upsert a batch of items by id
    async fn upsert(&self, items: &[VectorItem]) -> MemoryResult<()>;

    /// Fetch one item. May return `Ok(None)` or `Err(NotFound)` when absent.
    async fn fetch(&self, id: &str) -> MemoryResult<Option<VectorItem>>;

    /// Return up to `top_k` scored candidates.
    ///
    /// Candidates need not be sorted or filtered by threshold, but those with
    /// equal scores must come back in insertion order: ranking is a stable
    /// sort, so ties keep whatever order the transport returns.
    async fn query(&self, vector: &[f32], top_k: usize) -> MemoryResult<Vec<SearchHit>>;

    /// Remove one item. May return `Err(NotFound)` when absent.
    async fn remove(&self, id: &str) -> MemoryResult<()>;

    /// Remove every item
    async fn truncate(&self) -> MemoryResult<()>;

    /// Number of stored items
    async fn count(&self) -> MemoryResult<usize>;
}

/// [`VectorIndex`] over a remote backend's transport
pub struct RemoteVectorIndex {
    transport: Arc<dyn VectorTransport>,
    dimension: usize,
}

impl RemoteVectorIndex {
    /// Wrap a transport for vectors of `dimension` components
    pub fn new(transport: Arc<dyn VectorTransport>, dimension: usize) -> Self {
        Self {
            transport,
            dimension,
        }
    }
}

#[async_trait::async_trait]
impl VectorIndex for RemoteVectorIndex {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn backend(&self) -> VectorBackend {
        self.transport.backend()
    }

    #[tracing::instrument(skip(self, item), fields(backend = %self.backend(), id = %item.id))]
    async fn insert(&self, item: VectorItem) -> MemoryResult<()> {
        check_dimension(self.dimension, &item.vector)?;
        self.transport.upsert(std::slice::from_ref(&item)).await
    }

    #[tracing::instrument(skip(self, items), fields(backend = %self.backend(), count = items.len()))]
    async fn insert_many(&self, items: Vec<VectorItem>) -> MemoryResult<()> {
        for item in &items {
            check_dimension(self.dimension, &item.vector)?;
        }
        if items.is_empty() {
            return Ok(());
        }
        self.transport.upsert(&items).await
    }

    #[tracing::instrument(skip(self), fields(backend = %self.backend()))]
    async fn get(&self, id: &str) -> MemoryResult<Option<VectorItem>> {
        match self.transport.fetch(id).await {
            Err(err) if err.is_not_found() => Ok(None),
            other => other,
        }
    }

    #[tracing::instrument(skip(self, vector), fields(backend = %self.backend()))]
    async fn search(
        &self,
        vector: &[f32],
        limit: usize,
        threshold: f32,
    ) -> MemoryResult<Vec<SearchHit>> {
        check_dimension(self.dimension, vector)?;
        if limit == 0 {
            return Ok(Vec::new());
        }

        let candidates = self.transport.query(vector, limit).await?;
        let hits = rank_hits(candidates, limit, threshold);
        tracing::trace!(hits = hits.len(), "remote search complete");
        Ok(hits)
    }

    #[tracing::instrument(skip(self), fields(backend = %self.backend()))]
    async fn delete(&self, id: &str) -> MemoryResult<()> {
        match self.transport.remove(id).await {
            Err(err) if err.is_not_found() => Ok(()),
            other => other,
        }
    }

    #[tracing::instrument(skip(self), fields(backend = %self.backend()))]
    async fn clear(&self) -> MemoryResult<()> {
        self.transport.truncate().await
    }

    async fn len(&self) -> MemoryResult<usize> {
        self.transport.count().await
    }
}
