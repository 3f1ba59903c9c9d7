//! Working memory - temporary scratchpad for agent reasoning
//!
//! Working memory gives an agent somewhere to keep intermediate results,
//! thoughts, and data while it executes a task. Nothing is evicted and
//! nothing is tracked; callers own its lifetime, typically one task.

use crate::types::MemoryValue;
use std::collections::HashMap;

/// Unbounded key/value scratchpad
#[derive(Debug, Clone, Default)]
pub struct WorkingStore {
    values: HashMap<String, MemoryValue>,
}

impl WorkingStore {
    /// Create an empty working store
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any previous one
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<MemoryValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Get a value
    pub fn get(&self, key: &str) -> Option<&MemoryValue> {
        self.values.get(key)
    }

    /// Check if a key exists
    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Delete a value, returning whether it existed
    pub fn delete(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    /// Clear all working memory
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// All keys, in no particular order
    pub fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    /// Snapshot of every key/value pair
    pub fn get_all(&self) -> HashMap<String, MemoryValue> {
        self.values.clone()
    }

    /// Set multiple values at once
    pub fn set_many(&mut self, pairs: &[(&str, MemoryValue)]) {
        for (key, value) in pairs {
            self.values.insert((*key).to_string(), value.clone());
        }
    }

    /// Get multiple values at once, preserving the order of `keys`
    pub fn get_many(&self, keys: &[&str]) -> Vec<Option<&MemoryValue>> {
        keys.iter().map(|key| self.values.get(*key)).collect()
    }

    /// Number of keys
    pub fn size(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_working_memory_basic_operations() {
        let mut working = WorkingStore::new();

        // Set and get
        working.set("temp_result", 42i64);
        assert_eq!(working.get("temp_result").unwrap().as_integer(), Some(42));

        // Has
        assert!(working.has("temp_result"));
        assert!(!working.has("nonexistent"));

        // Delete
        assert!(working.delete("temp_result"));
        assert!(!working.has("temp_result"));
        assert!(!working.delete("temp_result"));
    }

    #[test]
    fn test_working_memory_multiple_operations() {
        let mut working = WorkingStore::new();

        let pairs = [
            ("key1", MemoryValue::from("value1")),
            ("key2", MemoryValue::from(100i64)),
            ("key3", MemoryValue::from(true)),
        ];
        working.set_many(&pairs);

        let values = working.get_many(&["key1", "key2", "key3", "missing"]);
        assert_eq!(values[0].unwrap().as_string(), Some("value1"));
        assert_eq!(values[1].unwrap().as_integer(), Some(100));
        assert_eq!(values[2].unwrap().as_boolean(), Some(true));
        assert!(values[3].is_none());

        assert_eq!(working.size(), 3);

        let mut keys = working.keys();
        keys.sort();
        assert_eq!(keys, vec!["key1", "key2", "key3"]);
        assert_eq!(working.get_all().len(), 3);
    }

    #[test]
    fn test_working_memory_overwrite_and_clear() {
        let mut working = WorkingStore::new();
        working.set("plan", "step one");
        working.set("plan", "step two");

        assert_eq!(working.size(), 1);
        assert_eq!(working.get("plan").unwrap().as_string(), Some("step two"));

        working.clear();
        assert_eq!(working.size(), 0);
        assert!(working.keys().is_empty());
    }
}
