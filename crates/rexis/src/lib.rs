//! # Rexis - Agentic AI Framework for Rust
//!
//! **Rexis** gives autonomous agents a place to persist observations and
//! recall the relevant ones later:
//!
//! - **Short-term Memory**: Bounded cache of recent observations
//! - **Long-term Memory**: Important memories with optional vector search
//! - **Working Memory**: Temporary scratchpad for the current task
//! - **Semantic Memory**: Keyed knowledge with optional vector search
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rexis::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut memory = MemoryManager::new(MemoryConfig::default());
//!
//!     memory
//!         .remember(Memory::new(MemoryKind::LongTerm, "user prefers dark mode"))
//!         .await?;
//!
//!     println!("{:?}", memory.get_stats());
//!     Ok(())
//! }
//! ```
//!
//! ## Vector Search
//!
//! Pick a backend at runtime through the memory configuration:
//!
//! ```toml
//! [vector]
//! backend = "pgvector"
//! dimension = 1536
//! ```
//!
//! Remote backends need a transport registered with
//! [`VectorIndexFactory`](crate::memory::VectorIndexFactory).

#![doc(html_root_url = "https://docs.rs/rexis/0.1.0")]
#![warn(missing_docs)]

// Re-export sub-crates
#[cfg(feature = "memory")]
pub use rexis_memory as memory;

/// Commonly used types and traits
pub mod prelude {
    #[cfg(feature = "memory")]
    pub use crate::memory::{
        Memory, MemoryConfig, MemoryError, MemoryKind, MemoryManager, MemoryResult, MemoryStats,
        MemoryValue, SemanticEntry, VectorBackend, VectorIndex, VectorIndexFactory,
    };
}
