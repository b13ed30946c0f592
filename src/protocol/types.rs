//! Query Model
//!
//! This module defines the command vocabulary understood by Guppy and the
//! structured [`Query`] value that the parser produces.
//!
//! ## Command Table
//!
//! Every command has a fixed number of arguments:
//!
//! | Command | Arity | Form                |
//! |---------|-------|---------------------|
//! | `SET`   | 2     | `SET <key> <value>` |
//! | `GET`   | 1     | `GET <key>`         |
//! | `DEL`   | 1     | `DEL <key>`         |
//!
//! [`COMMAND_TABLE`] is the only place that knows these names and arities.
//! Both command recognition and argument-count validation read from it.

use std::fmt;

/// A database command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Store a value under a key
    Set,
    /// Fetch the value of a key
    Get,
    /// Remove a key
    Del,
}

/// Describes one entry of the command table.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    /// The command this entry describes
    pub command: Command,
    /// Exact, case-sensitive name on the wire
    pub name: &'static str,
    /// Required number of arguments
    pub arity: usize,
}

/// Static dispatch table: command → (name, arity).
pub const COMMAND_TABLE: [CommandSpec; 3] = [
    CommandSpec {
        command: Command::Set,
        name: "SET",
        arity: 2,
    },
    CommandSpec {
        command: Command::Get,
        name: "GET",
        arity: 1,
    },
    CommandSpec {
        command: Command::Del,
        name: "DEL",
        arity: 1,
    },
];

impl Command {
    /// All known commands, in table order.
    pub const ALL: [Command; 3] = [Command::Set, Command::Get, Command::Del];

    /// Looks a command up by its exact name.
    ///
    /// Matching is case-sensitive: `"SET"` is a command, `"set"` is not.
    ///
    /// # Example
    /// ```
    /// use guppy::protocol::Command;
    /// assert_eq!(Command::from_name("DEL"), Some(Command::Del));
    /// assert_eq!(Command::from_name("del"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Command> {
        COMMAND_TABLE
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.command)
    }

    /// Returns the table entry for this command.
    fn spec(self) -> &'static CommandSpec {
        // Every variant has exactly one table row.
        match self {
            Command::Set => &COMMAND_TABLE[0],
            Command::Get => &COMMAND_TABLE[1],
            Command::Del => &COMMAND_TABLE[2],
        }
    }

    /// The wire name of the command.
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// The number of arguments the command requires.
    pub fn arity(self) -> usize {
        self.spec().arity
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A structured database query: a command plus its arguments.
///
/// Queries built by [`TextParser`](crate::protocol::TextParser) always carry
/// exactly [`Command::arity`] arguments, each matching the symbol grammar.
/// [`Query::new`] performs no validation at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    command: Command,
    args: Vec<String>,
}

impl Query {
    /// Creates a query without validating it.
    ///
    /// # Example
    /// ```
    /// use guppy::protocol::{Command, Query};
    /// let query = Query::new(Command::Set, ["weather", "cold"]);
    /// assert_eq!(query.args(), ["weather", "cold"]);
    /// ```
    pub fn new<I, S>(command: Command, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// The command of this query.
    pub fn command(&self) -> Command {
        self.command
    }

    /// The arguments of this query, in input order.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command.name())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
