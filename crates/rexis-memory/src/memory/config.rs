//! Memory configuration

use crate::error::{MemoryError, MemoryResult};
use crate::vector::{VectorBackend, VectorIndexConfig};
use serde::{Deserialize, Serialize};

/// Default short-term capacity
pub const DEFAULT_SHORT_TERM_CAPACITY: usize = 100;

/// Default access count at which a memory counts as important
pub const DEFAULT_IMPORTANCE_THRESHOLD: u32 = 3;

/// Configuration for the memory manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Maximum number of short-term memories before FIFO eviction
    pub short_term_capacity: usize,

    /// Access count at or above which `remember()` promotes to long-term
    pub importance_threshold: u32,

    /// Vector index for long-term and semantic search; `None` means
    /// both tiers fall back to unranked results
    pub vector: Option<VectorIndexConfig>,
}

impl MemoryConfig {
    /// Create a configuration with defaults and no vector index
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document. Missing fields take their defaults.
    ///
    /// ```toml
    /// short_term_capacity = 50
    /// importance_threshold = 3
    ///
    /// [vector]
    /// backend = "pgvector"
    /// dimension = 1536
    /// ```
    pub fn from_toml_str(input: &str) -> MemoryResult<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the short-term capacity
    pub fn with_short_term_capacity(mut self, capacity: usize) -> Self {
        self.short_term_capacity = capacity;
        self
    }

    /// Set the importance threshold
    pub fn with_importance_threshold(mut self, threshold: u32) -> Self {
        self.importance_threshold = threshold;
        self
    }

    /// Configure the vector index
    pub fn with_vector_index(mut self, backend: VectorBackend, dimension: usize) -> Self {
        self.vector = Some(VectorIndexConfig::new(backend, dimension));
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> MemoryResult<()> {
        if self.short_term_capacity == 0 {
            return Err(MemoryError::configuration(
                "short_term_capacity must be greater than zero",
            ));
        }
        if let Some(vector) = &self.vector {
            vector.validate()?;
        }
        Ok(())
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            short_term_capacity: DEFAULT_SHORT_TERM_CAPACITY,
            importance_threshold: DEFAULT_IMPORTANCE_THRESHOLD,
            vector: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MemoryConfig::default();
        assert_eq!(config.short_term_capacity, 100);
        assert_eq!(config.importance_threshold, 3);
        assert!(config.vector.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = MemoryConfig::new()
            .with_short_term_capacity(5)
            .with_importance_threshold(2)
            .with_vector_index(VectorBackend::InMemory, 3);

        assert_eq!(config.short_term_capacity, 5);
        assert_eq!(config.importance_threshold, 2);
        assert_eq!(config.vector, Some(VectorIndexConfig::in_memory(3)));
    }

    #[test]
    fn test_from_toml() {
        let config = MemoryConfig::from_toml_str(
            r#"
            short_term_capacity = 10

            [vector]
            backend = "reference"
            dimension = 384
            "#,
        )
        .unwrap();

        assert_eq!(config.short_term_capacity, 10);
        assert_eq!(config.importance_threshold, DEFAULT_IMPORTANCE_THRESHOLD);
        assert_eq!(config.vector, Some(VectorIndexConfig::in_memory(384)));
    }

    #[test]
    fn test_from_toml_rejects_invalid() {
        assert!(matches!(
            MemoryConfig::from_toml_str("short_term_capacity = 0"),
            Err(MemoryError::Configuration { .. })
        ));
        assert!(matches!(
            MemoryConfig::from_toml_str("short_term_capacity = \"many\""),
            Err(MemoryError::Config(_))
        ));
        assert!(MemoryConfig::from_toml_str("[vector]\ndimension = 0").is_err());
    }
}
