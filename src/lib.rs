//! # Guppy - A Minimal In-Memory Key-Value Database
//!
//! Guppy accepts one textual command per line, validates it into a
//! structured query, runs it against a pluggable storage engine and replies
//! with one line of text.
//!
//! ## Features
//!
//! - **Strict Protocol**: A small, case-sensitive grammar with no quoting rules
//! - **Validate Once**: Queries are checked at the boundary; nothing downstream re-checks
//! - **Pluggable Storage**: Any type implementing [`Engine`] can back a database
//! - **Typed Errors**: Every failure keeps its kind and the stage it came from
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                               Guppy                                     │
//! │                                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐                  │
//! │  │   Shell     │───>│  Database   │───>│ TextParser  │                  │
//! │  │ (line I/O)  │    │ (dispatch)  │    │ (validate)  │                  │
//! │  └─────────────┘    └──────┬──────┘    └─────────────┘                  │
//! │                            │                                            │
//! │                            ▼                                            │
//! │                     ┌──────────────────────────────┐                    │
//! │                     │        trait Engine          │                    │
//! │                     │  ┌────────────────────────┐  │                    │
//! │                     │  │    InMemoryEngine      │  │                    │
//! │                     │  │  HashMap<String,String>│  │                    │
//! │                     │  └────────────────────────┘  │                    │
//! │                     └──────────────────────────────┘                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use guppy::{Database, ErrorKind};
//!
//! let mut db = Database::in_memory();
//!
//! assert_eq!(db.process("SET weather_2_pm cold").unwrap(), "OK");
//! assert_eq!(db.process("GET weather_2_pm").unwrap(), "cold");
//! assert_eq!(db.process("DEL weather_2_pm").unwrap(), "OK");
//!
//! let err = db.process("GET weather_2_pm").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::KeyNotFound);
//! ```
//!
//! ## Supported Commands
//!
//! - `SET key value` - replies `OK`
//! - `GET key` - replies with the value
//! - `DEL key` - replies `OK`
//!
//! Arguments may only contain ASCII letters, digits, `*`, `/` and `_`.
//!
//! ## Module Overview
//!
//! - [`protocol`]: Command table, query value and the line parser
//! - [`storage`]: The `Engine` trait and the in-memory engine
//! - [`database`]: The dispatcher tying parser and engine together
//! - [`shell`]: The interactive line loop used by the binary
//!
//! ## Design Highlights
//!
//! ### Explicit Dependencies
//!
//! A [`Database`] receives its parser and engine in its constructor. There
//! is no global state, so tests can swap either collaborator.
//!
//! ### Single Caller
//!
//! Engines are not synchronized. Mutating engine methods take `&mut self`,
//! so sharing a database between tasks requires the caller to add locking.

pub mod database;
pub mod protocol;
pub mod shell;
pub mod storage;

// Re-export commonly used types for convenience
pub use database::{Database, DatabaseError, ErrorKind};
pub use protocol::{parse_query, Command, ParseError, Parser, Query, TextParser};
pub use shell::{Shell, ShellError, ShellOptions, ShellStats};
pub use storage::{Engine, InMemoryEngine, StorageError, StorageStats};

/// Version of Guppy
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
