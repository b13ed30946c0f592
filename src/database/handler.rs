//! Database Dispatcher
//!
//! This module implements request processing for Guppy. It parses incoming
//! lines, executes the resulting queries against the storage engine and
//! returns the text to send back.
//!
//! ## Supported Commands
//!
//! - `SET key value` - Store a value, replies `OK`
//! - `GET key` - Fetch a value, replies with the value
//! - `DEL key` - Remove a key, replies `OK`
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Database                             │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐      │
//! │  │   parse()   │───>│  execute()  │───>│ set/get/del │      │
//! │  └─────────────┘    └─────────────┘    └─────────────┘      │
//! │                                               │             │
//! │                                               ▼             │
//! │                                         impl Engine         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every request produces one tracing event: `info` when it succeeds,
//! `error` when any stage fails.

use crate::database::error::DatabaseError;
use crate::protocol::parser::check_arity;
use crate::protocol::{Command, Parser, Query, TextParser};
use crate::storage::{Engine, InMemoryEngine};
use tracing::{debug, error, info};

/// Reply sent for successful SET and DEL commands.
pub const OK: &str = "OK";

/// Routes queries from a parser to a storage engine.
///
/// Both collaborators are passed in at construction; the database owns them
/// for its whole lifetime.
#[derive(Debug)]
pub struct Database<P, E> {
    /// Turns raw lines into queries
    parser: P,
    /// Where the data lives
    engine: E,
}

impl Database<TextParser, InMemoryEngine> {
    /// Creates a database with the text parser and an empty in-memory engine.
    pub fn in_memory() -> Self {
        Self::new(TextParser::new(), InMemoryEngine::new())
    }
}

impl<P: Parser, E: Engine> Database<P, E> {
    /// Creates a new database from a parser and an engine.
    pub fn new(parser: P, engine: E) -> Self {
        Self { parser, engine }
    }

    /// Returns a shared reference to the storage engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Processes one line of input.
    ///
    /// # Returns
    ///
    /// The reply text: `OK` for SET and DEL, the stored value for GET.
    ///
    /// # Example
    ///
    /// ```
    /// use guppy::database::{Database, ErrorKind};
    ///
    /// let mut db = Database::in_memory();
    /// assert_eq!(db.process("SET weather cold").unwrap(), "OK");
    /// assert_eq!(db.process("GET weather").unwrap(), "cold");
    /// assert_eq!(db.process("GET nothing").unwrap_err().kind(), ErrorKind::KeyNotFound);
    /// ```
    pub fn process(&mut self, input: &str) -> Result<String, DatabaseError> {
        let query = match self.parser.parse(input) {
            Ok(query) => query,
            Err(err) => {
                error!(error = %err, input = %input, "cannot parse request");
                return Err(err.into());
            }
        };

        debug!(query = %query, "parsed request");
        self.execute(&query)
    }

    /// Executes an already parsed query.
    ///
    /// Queries that did not come from [`TextParser`] are checked against the
    /// command's arity before any argument is read.
    pub fn execute(&mut self, query: &Query) -> Result<String, DatabaseError> {
        let command = query.command();
        let args = query.args();

        if let Err(err) = check_arity(command, args.len()) {
            error!(error = %err, query = %query, "malformed query");
            return Err(DatabaseError::Execute(err));
        }

        match command {
            Command::Set => self.set(&args[0], &args[1]),
            Command::Get => self.get(&args[0]),
            Command::Del => self.del(&args[0]),
        }
    }

    /// SET key value
    fn set(&mut self, key: &str, value: &str) -> Result<String, DatabaseError> {
        if let Err(err) = self.engine.set(key, value) {
            error!(command = "SET", key, value, error = %err, "command SET has failed");
            return Err(DatabaseError::Set(err));
        }

        info!(command = "SET", key, value, "set value of a key");
        Ok(OK.to_string())
    }

    /// GET key
    fn get(&self, key: &str) -> Result<String, DatabaseError> {
        match self.engine.get(key) {
            Ok(value) => {
                info!(command = "GET", key, value = %value, "got value of a key");
                Ok(value)
            }
            Err(err) => {
                error!(command = "GET", key, error = %err, "command GET has failed");
                Err(DatabaseError::Get(err))
            }
        }
    }

    /// DEL key
    fn del(&mut self, key: &str) -> Result<String, DatabaseError> {
        if let Err(err) = self.engine.del(key) {
            error!(command = "DEL", key, error = %err, "command DEL has failed");
            return Err(DatabaseError::Del(err));
        }

        info!(command = "DEL", key, "removed a key");
        Ok(OK.to_string())
    }
}
