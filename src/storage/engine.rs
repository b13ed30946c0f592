//! In-Memory Storage Engine
//!
//! This module implements the reference storage engine for Guppy: a plain
//! `HashMap<String, String>` with operation counters.
//!
//! ## Design Decisions
//!
//! 1. **No Locks**: The engine is owned by a single `Database` and driven by a
//!    single caller. Mutations go through `&mut self`.
//! 2. **Validate First**: `set` checks its inputs before inserting, so a
//!    rejected write never leaves a trace in the map.
//! 3. **Strict Delete**: `del` looks the key up first and reports the same
//!    `KeyNotFound` error that `get` would.
//! 4. **Counters**: `AtomicU64` counters let `get` record statistics through
//!    a shared reference.

use crate::storage::{Engine, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// The in-memory storage engine.
///
/// Data lives for as long as the engine does; nothing is persisted and
/// nothing is evicted.
///
/// # Example
///
/// ```
/// use guppy::storage::{Engine, InMemoryEngine};
///
/// let mut engine = InMemoryEngine::new();
///
/// // Set a key
/// engine.set("weather", "cold").unwrap();
///
/// // Get the value
/// assert_eq!(engine.get("weather").unwrap(), "cold");
/// assert_eq!(engine.len(), 1);
/// ```
pub struct InMemoryEngine {
    /// The stored key-value pairs
    data: HashMap<String, String>,

    /// Statistics: total GET operations
    get_count: AtomicU64,

    /// Statistics: total SET operations
    set_count: AtomicU64,

    /// Statistics: total DEL operations
    del_count: AtomicU64,

    /// Statistics: GET/DEL operations on absent keys
    miss_count: AtomicU64,
}

impl std::fmt::Debug for InMemoryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryEngine")
            .field("keys", &self.data.len())
            .field("get_count", &self.get_count.load(Ordering::Relaxed))
            .field("set_count", &self.set_count.load(Ordering::Relaxed))
            .field("del_count", &self.del_count.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for InMemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEngine {
    /// Creates a new, empty engine.
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            get_count: AtomicU64::new(0),
            set_count: AtomicU64::new(0),
            del_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
        }
    }

    /// Looks a key up without touching the GET counter.
    fn lookup(&self, key: &str) -> StorageResult<&String> {
        self.data.get(key).ok_or_else(|| {
            self.miss_count.fetch_add(1, Ordering::Relaxed);
            StorageError::KeyNotFound(key.to_string())
        })
    }

    /// Returns the number of keys in the engine.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the engine holds no keys.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns engine statistics.
    pub fn stats(&self) -> StorageStats {
        StorageStats {
            keys: self.data.len() as u64,
            get_ops: self.get_count.load(Ordering::Relaxed),
            set_ops: self.set_count.load(Ordering::Relaxed),
            del_ops: self.del_count.load(Ordering::Relaxed),
            misses: self.miss_count.load(Ordering::Relaxed),
        }
    }
}

impl Engine for InMemoryEngine {
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.set_count.fetch_add(1, Ordering::Relaxed);

        if key.is_empty() {
            return Err(StorageError::EmptyKey);
        }
        if value.is_empty() {
            return Err(StorageError::EmptyValue);
        }

        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> StorageResult<String> {
        self.get_count.fetch_add(1, Ordering::Relaxed);
        self.lookup(key).cloned()
    }

    fn del(&mut self, key: &str) -> StorageResult<()> {
        self.del_count.fetch_add(1, Ordering::Relaxed);

        self.lookup(key)?;
        self.data.remove(key);
        Ok(())
    }
}

/// Engine statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of keys currently stored
    pub keys: u64,
    /// Total GET operations
    pub get_ops: u64,
    /// Total SET operations, including rejected ones
    pub set_ops: u64,
    /// Total DEL operations, including failed ones
    pub del_ops: u64,
    /// GET and DEL operations that found no key
    pub misses: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut engine = InMemoryEngine::new();

        engine.set("key", "value").unwrap();
        assert_eq!(engine.get("key"), Ok("value".to_string()));
    }

    #[test]
    fn test_set_overwrites() {
        let mut engine = InMemoryEngine::new();

        engine.set("key", "value1").unwrap();
        engine.set("key", "value2").unwrap();
        assert_eq!(engine.get("key"), Ok("value2".to_string()));
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn test_set_is_idempotent() {
        let mut engine = InMemoryEngine::new();

        engine.set("key", "value").unwrap();
        engine.set("key", "value").unwrap();
        assert_eq!(engine.get("key"), Ok("value".to_string()));
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn test_set_rejects_empty_key() {
        let mut engine = InMemoryEngine::new();

        assert_eq!(engine.set("", "value"), Err(StorageError::EmptyKey));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_set_rejects_empty_value() {
        let mut engine = InMemoryEngine::new();

        engine.set("key", "old").unwrap();
        assert_eq!(engine.set("key", ""), Err(StorageError::EmptyValue));

        // The previous value survives a rejected write
        assert_eq!(engine.get("key"), Ok("old".to_string()));
    }

    #[test]
    fn test_empty_key_reported_before_empty_value() {
        let mut engine = InMemoryEngine::new();
        assert_eq!(engine.set("", ""), Err(StorageError::EmptyKey));
    }

    #[test]
    fn test_get_nonexistent() {
        let engine = InMemoryEngine::new();
        assert_eq!(
            engine.get("nonexistent"),
            Err(StorageError::KeyNotFound("nonexistent".to_string()))
        );
    }

    #[test]
    fn test_delete() {
        let mut engine = InMemoryEngine::new();

        engine.set("key", "value").unwrap();
        assert_eq!(engine.del("key"), Ok(()));
        assert!(matches!(engine.get("key"), Err(StorageError::KeyNotFound(_))));
    }

    #[test]
    fn test_delete_nonexistent_is_an_error() {
        let mut engine = InMemoryEngine::new();

        let del_err = engine.del("key").unwrap_err();
        let get_err = engine.get("key").unwrap_err();
        assert_eq!(del_err, get_err);

        engine.set("key", "value").unwrap();
        engine.del("key").unwrap();
        assert!(engine.del("key").is_err()); // Already deleted
    }

    #[test]
    fn test_stats() {
        let mut engine = InMemoryEngine::new();
        assert_eq!(engine.stats(), StorageStats::default());

        engine.set("a", "1").unwrap();
        engine.set("b", "2").unwrap();
        let _ = engine.set("", "3");
        engine.get("a").unwrap();
        let _ = engine.get("missing");
        engine.del("b").unwrap();
        let _ = engine.del("b");

        let stats = engine.stats();
        assert_eq!(stats.keys, 1);
        assert_eq!(stats.set_ops, 3);
        assert_eq!(stats.get_ops, 2);
        assert_eq!(stats.del_ops, 2);
        assert_eq!(stats.misses, 2);
    }
}
