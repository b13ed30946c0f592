//! Query Parser
//!
//! Turns one line of untrusted text into a validated [`Query`].
//!
//! ## Grammar
//!
//! ```text
//! line    := ws* command (ws+ symbol)* ws*
//! command := "SET" | "GET" | "DEL"
//! symbol  := [A-Za-z0-9*/_]+
//! ```
//!
//! Tokens are separated by any run of whitespace. There is no quoting and no
//! escaping: a symbol is anything made of ASCII letters, digits, `*`, `/` and
//! `_`, which keeps keys like `/etc/nginx/config` or `user_****` usable
//! without extra syntax.
//!
//! ## Validation Order
//!
//! 1. At least one token must be present
//! 2. The first token must name a command exactly
//! 3. The number of remaining tokens must equal the command's arity
//! 4. Every remaining token must be a valid symbol
//!
//! Validation happens once, here. Everything downstream of the parser can
//! trust the shape of the query it receives.

use crate::protocol::types::{Command, Query};
use thiserror::Error;

/// Errors that can occur while parsing a query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input contains no tokens
    #[error("empty input")]
    EmptyInput,

    /// The first token is not a known command
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// Fewer arguments than the command requires
    #[error("not enough arguments for '{command}': expected {expected}, got {got}")]
    NotEnoughArgs {
        command: Command,
        expected: usize,
        got: usize,
    },

    /// More arguments than the command accepts
    #[error("too many arguments for '{command}': expected {expected}, got {got}")]
    TooManyArgs {
        command: Command,
        expected: usize,
        got: usize,
    },

    /// An argument contains a character outside the symbol grammar
    #[error("input contains invalid symbols: '{0}'")]
    BadSymbol(String),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Anything that can turn raw text into a [`Query`].
///
/// The dispatcher depends on this trait rather than on [`TextParser`]
/// directly, so tests can feed it queries from elsewhere.
pub trait Parser {
    /// Parses one line of input.
    fn parse(&self, input: &str) -> ParseResult<Query>;
}

/// The line parser for the Guppy text protocol.
///
/// # Example
///
/// ```
/// use guppy::protocol::{Command, Parser, Query, TextParser};
///
/// let query = TextParser::new().parse("SET   abc    2").unwrap();
/// assert_eq!(query, Query::new(Command::Set, ["abc", "2"]));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TextParser;

impl TextParser {
    /// Creates a new parser instance.
    pub fn new() -> Self {
        Self
    }
}

impl Parser for TextParser {
    fn parse(&self, input: &str) -> ParseResult<Query> {
        let mut tokens = input.split_whitespace();

        let name = tokens.next().ok_or(ParseError::EmptyInput)?;
        let command =
            Command::from_name(name).ok_or_else(|| ParseError::UnknownCommand(name.to_string()))?;

        let args: Vec<&str> = tokens.collect();
        check_arity(command, args.len())?;

        if let Some(bad) = args.iter().find(|arg| !is_valid_symbol(arg)) {
            return Err(ParseError::BadSymbol(bad.to_string()));
        }

        Ok(Query::new(command, args))
    }
}

/// Checks an argument count against the command's arity.
pub fn check_arity(command: Command, got: usize) -> ParseResult<()> {
    let expected = command.arity();

    if got < expected {
        return Err(ParseError::NotEnoughArgs {
            command,
            expected,
            got,
        });
    }

    if got > expected {
        return Err(ParseError::TooManyArgs {
            command,
            expected,
            got,
        });
    }

    Ok(())
}

/// Returns true if `token` matches `^[A-Za-z0-9*/_]+$`.
#[inline]
pub fn is_valid_symbol(token: &str) -> bool {
    !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'*' | b'/' | b'_'))
}

/// Helper function to parse a single line with the default parser.
pub fn parse_query(input: &str) -> ParseResult<Query> {
    TextParser::new().parse(input)
}
