//! Database Module
//!
//! This module is the single entry point for request processing. A
//! [`Database`] owns a parser and a storage engine, and turns each input line
//! into a reply or an error.
//!
//! ## Architecture
//!
//! ```text
//! Input line
//!       │
//!       ▼
//! ┌─────────────────┐
//! │  TextParser     │  (protocol module)
//! └────────┬────────┘
//!          │ Query
//!          ▼
//! ┌─────────────────┐
//! │    Database     │  (this module)
//! │                 │
//! │  - Dispatch     │
//! │  - Wrap errors  │
//! │  - Trace        │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  impl Engine    │  (storage module)
//! └─────────────────┘
//! ```
//!
//! ## Errors
//!
//! Failures come back as [`DatabaseError`], which names the failing stage
//! (`parse`, `execute`, `set`, `get`, `delete`) and keeps the underlying error as its
//! source. [`DatabaseError::kind`] flattens that into an [`ErrorKind`].

pub mod error;
pub mod handler;

// Re-export the main database type
pub use error::{DatabaseError, ErrorKind};
pub use handler::{Database, OK};
