//! # Rexis Memory
//!
//! Multi-tier memory for autonomous agents: a place to persist observations
//! and recall the relevant ones later.
//!
//! ## Quick Start
//!
//! ```rust
//! use rexis_memory::{Memory, MemoryConfig, MemoryKind, MemoryManager, VectorBackend, VectorIndexFactory};
//!
//! # async fn example() -> Result<(), rexis_memory::MemoryError> {
//! let config = MemoryConfig::new()
//!     .with_short_term_capacity(50)
//!     .with_vector_index(VectorBackend::InMemory, 3);
//! let mut manager = MemoryManager::from_config(config, &VectorIndexFactory::new())?;
//!
//! // Important memories are also stored long-term and become searchable
//! let memory = Memory::new(MemoryKind::ShortTerm, "user prefers Rust")
//!     .with_embedding(vec![1.0, 0.0, 0.0])
//!     .mark_important();
//! manager.remember(memory).await?;
//!
//! let recalled = manager.recall(&[0.9, 0.1, 0.0], 5, 0.5).await?;
//! assert_eq!(recalled.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Vector backends
//!
//! Embeddings arrive pre-computed. Similarity search goes through the
//! [`VectorIndex`] trait; [`InMemoryVectorIndex`] is the exact reference
//! implementation, and remote backends plug in through a [`VectorTransport`]
//! registered with the [`VectorIndexFactory`].

#![warn(missing_docs)]

pub mod error;
pub mod memory;
pub mod types;
pub mod vector;

pub use error::{MemoryError, MemoryResult};
pub use memory::{
    LongTermStore, MemoryConfig, MemoryManager, SemanticEntry, SemanticHit, SemanticStore,
    ShortTermStore, WorkingStore,
};
pub use types::{Memory, MemoryKind, MemoryStats, MemoryValue};
pub use vector::{
    cosine_similarity, InMemoryVectorIndex, RemoteVectorIndex, SearchHit, VectorBackend,
    VectorIndex, VectorIndexConfig, VectorIndexFactory, VectorItem, VectorTransport,
};
