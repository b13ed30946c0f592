//! Storage Engine Module
//!
//! This module defines what Guppy expects from a storage engine and provides
//! the in-memory reference implementation.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Database                               │
//! └──────────────────────────┬──────────────────────────────────┘
//!                            │ set / get / del
//!                            ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   trait Engine                              │
//! │  ┌────────────────┐   ┌ ─ ─ ─ ─ ─ ─ ─ ┐   ┌ ─ ─ ─ ─ ─ ─ ─ ┐  │
//! │  │ InMemoryEngine │     persistent        sharded          │
//! │  │   (HashMap)    │   │  (future)     │   │  (future)     │  │
//! │  └────────────────┘   └ ─ ─ ─ ─ ─ ─ ─ ┘   └ ─ ─ ─ ─ ─ ─ ─ ┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract
//!
//! - `set` rejects empty keys and empty values before touching any state
//! - `get` fails with [`StorageError::KeyNotFound`] for absent keys
//! - `del` fails with the same error for absent keys; deleting twice is an error
//!
//! Engines are not required to be thread-safe. Mutating operations take
//! `&mut self`, so a caller that wants to share an engine must serialize
//! access itself.
//!
//! ## Example
//!
//! ```
//! use guppy::storage::{Engine, InMemoryEngine, StorageError};
//!
//! let mut engine = InMemoryEngine::new();
//! engine.set("name", "guppy").unwrap();
//! assert_eq!(engine.get("name").unwrap(), "guppy");
//!
//! engine.del("name").unwrap();
//! assert!(matches!(engine.del("name"), Err(StorageError::KeyNotFound(_))));
//! ```

pub mod engine;

use thiserror::Error;

// Re-export commonly used types
pub use engine::{InMemoryEngine, StorageStats};

/// Errors returned by storage engines.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// `set` was called with an empty key
    #[error("key is empty")]
    EmptyKey,

    /// `set` was called with an empty value
    #[error("value is empty")]
    EmptyValue,

    /// The key is not present
    #[error("key not found: '{0}'")]
    KeyNotFound(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// The capability set every storage engine provides.
pub trait Engine {
    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// [`StorageError::EmptyKey`] or [`StorageError::EmptyValue`]; the engine
    /// is unchanged when either is returned.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Returns the current value of `key`.
    ///
    /// # Errors
    ///
    /// [`StorageError::KeyNotFound`] if the key is absent.
    fn get(&self, key: &str) -> StorageResult<String>;

    /// Removes `key`.
    ///
    /// # Errors
    ///
    /// [`StorageError::KeyNotFound`] if the key is absent.
    fn del(&mut self, key: &str) -> StorageResult<()>;
}
