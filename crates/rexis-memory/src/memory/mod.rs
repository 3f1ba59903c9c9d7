//! # Agent Memory Tiers
//!
//! - **Short-term**: bounded FIFO cache of recent observations
//! - **Long-term**: authoritative store of important memories, optionally vector indexed
//! - **Working**: unbounded scratchpad for the current task
//! - **Semantic**: knowledge keyed by concept, optionally vector indexed
//!
//! [`MemoryManager`] orchestrates the four tiers and never bypasses their APIs.

mod config;
mod long_term;
mod manager;
mod semantic;
mod short_term;
mod working;

pub use config::{MemoryConfig, DEFAULT_IMPORTANCE_THRESHOLD, DEFAULT_SHORT_TERM_CAPACITY};
pub use long_term::LongTermStore;
pub use manager::{MemoryManager, RECALL_RECENT_BUDGET};
pub use semantic::{SemanticEntry, SemanticHit, SemanticStore};
pub use short_term::ShortTermStore;
pub use working::WorkingStore;
