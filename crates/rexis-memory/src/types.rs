//! Core memory types
//!
//! A [`Memory`] is the unit every tier tracks by id. Its `content` and
//! metadata values are [`MemoryValue`]s, an opaque payload the memory system
//! stores but never interprets (apart from the `important` metadata flag).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata key that flags a memory as important at `remember()` time
pub const IMPORTANT_KEY: &str = "important";

/// A value stored in memory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MemoryValue {
    /// UTF-8 text
    String(String),
    /// Signed integer
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// Boolean flag
    Boolean(bool),
    /// Arbitrary structured data
    Json(serde_json::Value),
    /// Raw bytes
    Bytes(Vec<u8>),
}

impl MemoryValue {
    /// Borrow as a string slice
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Read as an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Read as a float (integers are widened)
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Read as a boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow as JSON
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(j) => Some(j),
            _ => None,
        }
    }

    /// Borrow as bytes
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl From<String> for MemoryValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for MemoryValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for MemoryValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for MemoryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for MemoryValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<serde_json::Value> for MemoryValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<Vec<u8>> for MemoryValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

/// Which tier a memory was created for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
    /// Recent observations, bounded FIFO cache
    ShortTerm,
    /// Important memories, optionally vector indexed
    LongTerm,
    /// Ephemeral scratchpad data
    Working,
    /// Keyed knowledge
    Semantic,
}

impl MemoryKind {
    /// Stable string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShortTerm => "short_term",
            Self::LongTerm => "long_term",
            Self::Working => "working",
            Self::Semantic => "semantic",
        }
    }
}

impl std::fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A remembered unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    /// Unique identifier (unique per tier)
    pub id: String,

    /// Tier the memory was created for
    pub kind: MemoryKind,

    /// Opaque payload
    pub content: MemoryValue,

    /// Optional embedding; must match the index dimension when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,

    /// When the memory was created
    pub created_at: DateTime<Utc>,

    /// Number of successful reads that returned this memory
    pub access_count: u32,

    /// Free-form metadata
    #[serde(default)]
    pub metadata: HashMap<String, MemoryValue>,
}

impl Memory {
    /// Create a new memory with a generated id
    pub fn new(kind: MemoryKind, content: impl Into<MemoryValue>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            content: content.into(),
            embedding: None,
            created_at: Utc::now(),
            access_count: 0,
            metadata: HashMap::new(),
        }
    }

    /// Override the generated id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Attach an embedding
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MemoryValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Start from a caller-supplied access count
    pub fn with_access_count(mut self, access_count: u32) -> Self {
        self.access_count = access_count;
        self
    }

    /// Override the creation timestamp
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Set the `important` metadata flag
    pub fn mark_important(self) -> Self {
        self.with_metadata(IMPORTANT_KEY, true)
    }

    /// Whether the `important` metadata flag is set to `true`
    pub fn is_flagged_important(&self) -> bool {
        self.metadata
            .get(IMPORTANT_KEY)
            .and_then(MemoryValue::as_boolean)
            .unwrap_or(false)
    }

    /// Creation time as fractional Unix seconds
    pub fn created_at_seconds(&self) -> f64 {
        self.created_at.timestamp_millis() as f64 / 1000.0
    }

    pub(crate) fn record_access(&mut self) {
        self.access_count = self.access_count.saturating_add(1);
    }
}

/// Entry counts per tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStats {
    /// Entries in the short-term store
    pub short_term: usize,
    /// Entries in the long-term store
    pub long_term: usize,
    /// Keys in the working store
    pub working: usize,
    /// Keys in the semantic store
    pub semantic: usize,
}

impl MemoryStats {
    /// Sum of all tier counts
    pub fn total(&self) -> usize {
        self.short_term + self.long_term + self.working + self.semantic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_builder() {
        let memory = Memory::new(MemoryKind::ShortTerm, "user prefers dark mode")
            .with_id("m1")
            .with_embedding(vec![1.0, 0.0])
            .with_access_count(2)
            .with_metadata("source", "chat");

        assert_eq!(memory.id, "m1");
        assert_eq!(memory.content.as_string(), Some("user prefers dark mode"));
        assert_eq!(memory.embedding.as_deref(), Some(&[1.0, 0.0][..]));
        assert_eq!(memory.access_count, 2);
        assert!(!memory.is_flagged_important());
    }

    #[test]
    fn test_important_flag_requires_boolean_true() {
        let flagged = Memory::new(MemoryKind::ShortTerm, "x").mark_important();
        assert!(flagged.is_flagged_important());

        let stringly = Memory::new(MemoryKind::ShortTerm, "x").with_metadata(IMPORTANT_KEY, "true");
        assert!(!stringly.is_flagged_important());

        let off = Memory::new(MemoryKind::ShortTerm, "x").with_metadata(IMPORTANT_KEY, false);
        assert!(!off.is_flagged_important());
    }

    #[test]
    fn test_memory_serde() {
        let memory = Memory::new(MemoryKind::LongTerm, 42i64).with_metadata("tag", "numbers");
        let json = serde_json::to_value(&memory).unwrap();

        assert_eq!(json["kind"], "long_term");
        assert!(json.get("embedding").is_none());

        let back: Memory = serde_json::from_value(json).unwrap();
        assert_eq!(back, memory);
    }

    #[test]
    fn test_memory_value_accessors() {
        assert_eq!(MemoryValue::from(7i64).as_float(), Some(7.0));
        assert_eq!(MemoryValue::from(true).as_boolean(), Some(true));
        assert_eq!(MemoryValue::from("a").as_integer(), None);
        assert_eq!(
            MemoryValue::from(vec![1u8, 2]).as_bytes(),
            Some(&[1u8, 2][..])
        );
    }

    #[test]
    fn test_stats_total() {
        let stats = MemoryStats {
            short_term: 2,
            long_term: 1,
            working: 3,
            semantic: 4,
        };
        assert_eq!(stats.total(), 10);
    }
}
