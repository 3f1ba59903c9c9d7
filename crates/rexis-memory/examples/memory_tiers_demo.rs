//! # Memory Tiers Demo
//!
//! Walks through the four memory tiers:
//!
//! 1. Short-term memory with FIFO eviction
//! 2. Promotion to long-term memory and hybrid recall
//! 3. Working memory as a task scratchpad
//! 4. Semantic memory with vector search
//!
//! ## Run This Example
//!
//! ```bash
//! RUST_LOG=rexis_memory=debug cargo run -p rexis-memory --example memory_tiers_demo
//! ```

use rexis_memory::{
    Memory, MemoryConfig, MemoryKind, MemoryManager, SemanticEntry, VectorBackend,
    VectorIndexFactory,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("=== Memory Tiers Demo ===");

    let config = MemoryConfig::from_toml_str(
        r#"
        short_term_capacity = 3
        importance_threshold = 3

        [vector]
        backend = "reference"
        dimension = 3
        "#,
    )?;
    let mut manager = MemoryManager::from_config(config, &VectorIndexFactory::new())?;

    // ========================================
    // 1. SHORT-TERM MEMORY
    // ========================================
    info!("=== 1. Short-term memory ===");
    for (i, text) in ["opened editor", "ran tests", "read logs", "fixed typo"]
        .iter()
        .enumerate()
    {
        let memory = Memory::new(MemoryKind::ShortTerm, *text).with_id(format!("obs-{}", i));
        manager.remember(memory).await?;
    }
    info!(
        "Short-term holds {} of capacity {}; obs-0 evicted: {}",
        manager.short_term().size(),
        manager.short_term().capacity(),
        manager.get("obs-0").is_none()
    );

    // ========================================
    // 2. PROMOTION AND RECALL
    // ========================================
    info!("=== 2. Promotion and recall ===");
    manager
        .remember(
            Memory::new(MemoryKind::ShortTerm, "user prefers Rust")
                .with_id("pref-rust")
                .with_embedding(vec![1.0, 0.0, 0.0])
                .mark_important(),
        )
        .await?;
    manager
        .remember(
            Memory::new(MemoryKind::LongTerm, "deploys happen on Fridays")
                .with_id("deploy-day")
                .with_embedding(vec![0.0, 1.0, 0.0]),
        )
        .await?;

    for memory in manager.recall(&[0.9, 0.1, 0.0], 4, 0.5).await? {
        info!(
            "  recalled {} (accessed {}x): {:?}",
            memory.id, memory.access_count, memory.content
        );
    }

    // ========================================
    // 3. WORKING MEMORY
    // ========================================
    info!("=== 3. Working memory ===");
    let working = manager.working_mut();
    working.set("current_step", 2i64);
    working.set("hypothesis", "flaky test caused by timezone");
    info!("Working keys: {:?}", working.keys());

    // ========================================
    // 4. SEMANTIC MEMORY
    // ========================================
    info!("=== 4. Semantic memory ===");
    let semantic = manager.semantic_mut();
    semantic
        .store_entry(
            SemanticEntry::new("lang:rust", "systems language").with_embedding(vec![1.0, 0.0, 0.0]),
        )
        .await?;
    semantic
        .store_entry(
            SemanticEntry::new("lang:python", "scripting language")
                .with_embedding(vec![0.0, 0.0, 1.0]),
        )
        .await?;
    for hit in semantic.search(&[0.8, 0.0, 0.2], 2, 0.0).await? {
        info!("  {} => {:?} (score {:?})", hit.key, hit.value, hit.score);
    }

    let stats = manager.get_stats();
    info!("Stats: {}", serde_json::to_string(&stats)?);

    manager.clear().await?;
    info!("After clear: {} entries", manager.get_stats().total());

    info!("=== Demo Complete ===");
    Ok(())
}
