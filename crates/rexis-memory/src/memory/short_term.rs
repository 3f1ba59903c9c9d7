//! Short-term memory - bounded recency cache
//!
//! Holds the most recent observations up to a fixed capacity. When full, the
//! oldest-inserted entry is evicted (FIFO, not LRU: reads do not refresh an
//! entry's position).

use crate::types::Memory;
use std::collections::{HashMap, VecDeque};

/// Capacity-bounded FIFO store
#[derive(Debug, Clone)]
pub struct ShortTermStore {
    /// Maximum number of entries
    capacity: usize,

    /// Entries by id
    memories: HashMap<String, Memory>,

    /// Ids in insertion order, oldest first
    order: VecDeque<String>,
}

impl ShortTermStore {
    /// Create a store holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            memories: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    /// Add a memory, evicting the oldest entry if the store is full.
    ///
    /// A zero-capacity store keeps nothing. Re-adding an existing id replaces the value in place without
    /// changing its position or evicting anything.
    pub fn add(&mut self, memory: Memory) {
        if let Some(existing) = self.memories.get_mut(&memory.id) {
            *existing = memory;
            return;
        }

        if self.capacity == 0 {
            tracing::debug!(id = %memory.id, "short-term memory has zero capacity, entry dropped");
            return;
        }

        if self.order.len() >= self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.memories.remove(&evicted);
                tracing::debug!(%evicted, capacity = self.capacity, "short-term memory evicted");
            }
        }

        self.order.push_back(memory.id.clone());
        self.memories.insert(memory.id.clone(), memory);
    }

    /// Get a memory by id, counting the access
    pub fn get(&mut self, id: &str) -> Option<&Memory> {
        let memory = self.memories.get_mut(id)?;
        memory.record_access();
        Some(memory)
    }

    /// Whether an id is present (does not count as an access)
    pub fn contains(&self, id: &str) -> bool {
        self.memories.contains_key(id)
    }

    /// The `n` most recently inserted memories, oldest of the window first
    pub fn get_recent(&self, n: usize) -> Vec<&Memory> {
        let skip = self.order.len().saturating_sub(n);
        self.order
            .iter()
            .skip(skip)
            .filter_map(|id| self.memories.get(id))
            .collect()
    }

    /// Ids in insertion order, oldest first
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.memories.clear();
        self.order.clear();
    }

    /// Number of entries
    pub fn size(&self) -> usize {
        self.memories.len()
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MemoryKind;

    fn memory(id: &str) -> Memory {
        Memory::new(MemoryKind::ShortTerm, format!("observation {}", id)).with_id(id)
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let mut store = ShortTermStore::new(5);
        for i in 1..=6 {
            store.add(memory(&i.to_string()));
        }

        assert_eq!(store.size(), 5);
        assert!(store.get("1").is_none());
        assert!(store.get("6").is_some());
    }

    #[test]
    fn test_eviction_ignores_access_order() {
        let mut store = ShortTermStore::new(2);
        store.add(memory("a"));
        store.add(memory("b"));

        // Reading "a" must not protect it from eviction
        store.get("a");
        store.add(memory("c"));

        assert!(!store.contains("a"));
        assert!(store.contains("b"));
        assert!(store.contains("c"));
    }

    #[test]
    fn test_get_counts_access_only_on_hit() {
        let mut store = ShortTermStore::new(3);
        store.add(memory("a").with_access_count(1));

        assert_eq!(store.get("a").unwrap().access_count, 2);
        assert_eq!(store.get("a").unwrap().access_count, 3);
        assert!(store.get("missing").is_none());
        assert_eq!(store.size(), 1);
    }

    #[test]
    fn test_get_recent_window_is_oldest_first() {
        let mut store = ShortTermStore::new(10);
        for id in ["a", "b", "c", "d"] {
            store.add(memory(id));
        }

        let recent: Vec<&str> = store.get_recent(2).iter().map(|m| m.id.as_str()).collect();
        assert_eq!(recent, vec!["c", "d"]);

        assert_eq!(store.get_recent(10).len(), 4);
        assert!(store.get_recent(0).is_empty());
    }

    #[test]
    fn test_get_recent_does_not_count_access() {
        let mut store = ShortTermStore::new(2);
        store.add(memory("a"));

        store.get_recent(1);
        assert_eq!(store.get_recent(1)[0].access_count, 0);
    }

    #[test]
    fn test_readd_replaces_in_place() {
        let mut store = ShortTermStore::new(2);
        store.add(memory("a"));
        store.add(memory("b"));
        store.add(Memory::new(MemoryKind::ShortTerm, "updated").with_id("a"));

        assert_eq!(store.size(), 2);
        assert_eq!(store.ids().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(
            store.get("a").unwrap().content.as_string(),
            Some("updated")
        );
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut store = ShortTermStore::new(0);
        store.add(memory("a"));
        store.add(memory("b"));

        assert_eq!(store.size(), 0);
        assert!(store.get("a").is_none());
        assert!(store.get_recent(5).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut store = ShortTermStore::new(3);
        store.add(memory("a"));
        store.add(memory("b"));

        store.clear();
        assert_eq!(store.size(), 0);
        assert!(store.get_recent(5).is_empty());
        assert_eq!(store.capacity(), 3);
    }
}
