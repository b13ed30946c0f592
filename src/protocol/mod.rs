//! Query Protocol Implementation
//!
//! This module turns lines of text into structured queries.
//!
//! ## Overview
//!
//! The Guppy protocol is one command per line:
//!
//! ```text
//! SET <key> <value>
//! GET <key>
//! DEL <key>
//! ```
//!
//! ## Modules
//!
//! - `types`: Defines the `Command` table and the `Query` value
//! - `parser`: Tokenizer and validator for incoming lines
//!
//! ## Example
//!
//! ```
//! use guppy::protocol::{parse_query, Command, ParseError};
//!
//! let query = parse_query("GET weather").unwrap();
//! assert_eq!(query.command(), Command::Get);
//!
//! assert_eq!(parse_query("   "), Err(ParseError::EmptyInput));
//! ```

pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use parser::{parse_query, ParseError, ParseResult, Parser, TextParser};
pub use types::{Command, Query};
