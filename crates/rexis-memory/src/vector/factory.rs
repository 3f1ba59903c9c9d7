//! Backend selection for vector indexes
//!
//! Backends are chosen at runtime by a [`VectorBackend`] tag. The reference
//! index is always available; remote backends must have a transport
//! registered with the [`VectorIndexFactory`] before they can be built.

use super::{InMemoryVectorIndex, RemoteVectorIndex, VectorIndex, VectorTransport};
use crate::error::{MemoryError, MemoryResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

/// Supported vector index backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorBackend {
    /// Exact in-process reference implementation
    #[serde(alias = "reference", alias = "memory")]
    InMemory,
    /// PostgreSQL with the pgvector extension
    Pgvector,
    /// Milvus vector database
    Milvus,
}

impl VectorBackend {
    /// Stable string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InMemory => "in_memory",
            Self::Pgvector => "pgvector",
            Self::Milvus => "milvus",
        }
    }

    /// Whether the backend talks to an external service
    pub fn is_remote(&self) -> bool {
        !matches!(self, Self::InMemory)
    }
}

impl std::fmt::Display for VectorBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VectorBackend {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in_memory" | "memory" | "reference" => Ok(Self::InMemory),
            "pgvector" | "postgres" => Ok(Self::Pgvector),
            "milvus" => Ok(Self::Milvus),
            other => Err(MemoryError::configuration(format!(
                "unknown vector backend '{}'",
                other
            ))),
        }
    }
}

/// Configuration for a single vector index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorIndexConfig {
    /// Which backend to build
    #[serde(default = "default_backend")]
    pub backend: VectorBackend,

    /// Vector dimension every item and query must have
    pub dimension: usize,
}

fn default_backend() -> VectorBackend {
    VectorBackend::InMemory
}

impl VectorIndexConfig {
    /// Create a config for the given backend and dimension
    pub fn new(backend: VectorBackend, dimension: usize) -> Self {
        Self { backend, dimension }
    }

    /// Config for the reference in-memory index
    pub fn in_memory(dimension: usize) -> Self {
        Self::new(VectorBackend::InMemory, dimension)
    }

    /// Reject configurations no backend can satisfy
    pub fn validate(&self) -> MemoryResult<()> {
        if self.dimension == 0 {
            return Err(MemoryError::configuration(
                "vector dimension must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Builds [`VectorIndex`] instances from a backend tag
#[derive(Default, Clone)]
pub struct VectorIndexFactory {
    transports: HashMap<VectorBackend, Arc<dyn VectorTransport>>,
}

impl VectorIndexFactory {
    /// Create a factory that can only build the in-memory index
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the transport used for its backend tag
    pub fn with_transport(mut self, transport: Arc<dyn VectorTransport>) -> Self {
        self.register(transport);
        self
    }

    /// Register (or replace) the transport for its backend tag
    pub fn register(&mut self, transport: Arc<dyn VectorTransport>) {
        let backend = transport.backend();
        if self.transports.insert(backend, transport).is_some() {
            tracing::debug!(%backend, "replaced vector transport");
        }
    }

    /// Whether a backend can be built by this factory
    pub fn supports(&self, backend: VectorBackend) -> bool {
        !backend.is_remote() || self.transports.contains_key(&backend)
    }

    /// Build an index for the given configuration
    pub fn create(&self, config: &VectorIndexConfig) -> MemoryResult<Arc<dyn VectorIndex>> {
        config.validate()?;

        let index: Arc<dyn VectorIndex> = match config.backend {
            VectorBackend::InMemory => Arc::new(InMemoryVectorIndex::new(config.dimension)),
            backend => {
                let transport = self.transports.get(&backend).ok_or_else(|| {
                    MemoryError::configuration(format!(
                        "no transport registered for vector backend '{}'",
                        backend
                    ))
                })?;
                Arc::new(RemoteVectorIndex::new(transport.clone(), config.dimension))
            }
        };

        tracing::debug!(
            backend = %config.backend,
            dimension = config.dimension,
            "vector index created"
        );
        Ok(index)
    }
}
