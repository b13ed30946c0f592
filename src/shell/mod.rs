//! Shell Module
//!
//! This module drives a [`Database`](crate::database::Database) from a line
//! oriented input stream. The binary runs it on stdin/stdout, tests run it
//! on in-memory buffers.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 stdin / any AsyncRead                       │
//! └──────────────────────┬──────────────────────────────────────┘
//!                        │ bytes
//!                        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Shell                                  │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐      │
//! │  │ Split lines │───>│  process()  │───>│ Write reply │      │
//! │  └─────────────┘    └─────────────┘    └─────────────┘      │
//! └──────────────────────┬──────────────────────────────────────┘
//!                        │ one line per request
//!                        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                stdout / any AsyncWrite                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reply Format
//!
//! - Success: the result text (`OK`, or the value for `GET`)
//! - Failure: `error: ` followed by the error message
//!
//! ## Example
//!
//! ```
//! use guppy::database::Database;
//! use guppy::shell::{Shell, ShellOptions, ShellStats};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let input: &[u8] = b"SET name guppy\nGET name\n";
//! let mut output = Vec::new();
//!
//! let mut shell = Shell::new(
//!     input,
//!     &mut output,
//!     Database::in_memory(),
//!     ShellOptions::quiet(),
//!     Arc::new(ShellStats::new()),
//! );
//! shell.run().await.unwrap();
//! drop(shell);
//!
//! assert_eq!(output, b"OK\nguppy\n");
//! # });
//! ```

pub mod handler;

// Re-export commonly used types
pub use handler::{Shell, ShellError, ShellOptions, ShellStats, DEFAULT_MAX_LINE, GREETING};
