//! Dispatcher errors
//!
//! A [`DatabaseError`] records which stage of request processing failed and
//! carries the underlying parser or engine error unchanged.

use crate::protocol::ParseError;
use crate::storage::StorageError;
use thiserror::Error;

/// Errors returned by [`Database::process`](crate::database::Database::process).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DatabaseError {
    /// The input could not be parsed into a query
    #[error("parse input: {0}")]
    Parse(#[from] ParseError),

    /// A query handed to `execute` has the wrong number of arguments
    #[error("execute query: {0}")]
    Execute(#[source] ParseError),

    /// The engine rejected a SET
    #[error("set key value: {0}")]
    Set(#[source] StorageError),

    /// The engine rejected a GET
    #[error("get key: {0}")]
    Get(#[source] StorageError),

    /// The engine rejected a DEL
    #[error("delete key: {0}")]
    Del(#[source] StorageError),
}

/// Flat classification of every failure a request can end with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Nothing but whitespace was given
    EmptyInput,
    /// First token is not a known command
    UnknownCommand,
    /// Fewer arguments than the command takes
    NotEnoughArgs,
    /// More arguments than the command takes
    TooManyArgs,
    /// An argument contains a character outside the symbol set
    BadSymbol,
    /// The engine got an empty key
    EmptyKey,
    /// The engine got an empty value
    EmptyValue,
    /// The key is not stored
    KeyNotFound,
}

impl From<&ParseError> for ErrorKind {
    fn from(err: &ParseError) -> Self {
        match err {
            ParseError::EmptyInput => ErrorKind::EmptyInput,
            ParseError::UnknownCommand(_) => ErrorKind::UnknownCommand,
            ParseError::NotEnoughArgs { .. } => ErrorKind::NotEnoughArgs,
            ParseError::TooManyArgs { .. } => ErrorKind::TooManyArgs,
            ParseError::BadSymbol(_) => ErrorKind::BadSymbol,
        }
    }
}

impl From<&StorageError> for ErrorKind {
    fn from(err: &StorageError) -> Self {
        match err {
            StorageError::EmptyKey => ErrorKind::EmptyKey,
            StorageError::EmptyValue => ErrorKind::EmptyValue,
            StorageError::KeyNotFound(_) => ErrorKind::KeyNotFound,
        }
    }
}

impl DatabaseError {
    /// Returns the kind of the underlying error, ignoring the stage.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DatabaseError::Parse(err) | DatabaseError::Execute(err) => err.into(),
            DatabaseError::Set(err) | DatabaseError::Get(err) | DatabaseError::Del(err) => {
                err.into()
            }
        }
    }

    /// Returns the name of the stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            DatabaseError::Parse(_) => "parse",
            DatabaseError::Execute(_) => "execute",
            DatabaseError::Set(_) => "set",
            DatabaseError::Get(_) => "get",
            DatabaseError::Del(_) => "delete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_kind_survives_wrapping() {
        let err = DatabaseError::from(ParseError::EmptyInput);
        assert_eq!(err.kind(), ErrorKind::EmptyInput);
        assert_eq!(err.stage(), "parse");

        let err = DatabaseError::Del(StorageError::KeyNotFound("k".to_string()));
        assert_eq!(err.kind(), ErrorKind::KeyNotFound);
        assert_eq!(err.stage(), "delete");

        let err = DatabaseError::Execute(ParseError::TooManyArgs {
            command: crate::protocol::Command::Del,
            expected: 1,
            got: 2,
        });
        assert_eq!(err.kind(), ErrorKind::TooManyArgs);
        assert_eq!(err.stage(), "execute");
    }

    #[test]
    fn test_source_is_the_inner_error() {
        let err = DatabaseError::Set(StorageError::EmptyValue);
        let source = err.source().unwrap();
        assert_eq!(
            source.downcast_ref::<StorageError>(),
            Some(&StorageError::EmptyValue)
        );
    }

    #[test]
    fn test_display_includes_stage_context() {
        let err = DatabaseError::Get(StorageError::KeyNotFound("weather".to_string()));
        assert_eq!(err.to_string(), "get key: key not found: 'weather'");

        let err = DatabaseError::from(ParseError::UnknownCommand("SELECT".to_string()));
        assert_eq!(err.to_string(), "parse input: unknown command 'SELECT'");
    }
}
