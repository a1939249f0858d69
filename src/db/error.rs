//! Score store error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// What part of the score store failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DbErrorKind {
    /// The database file could not be opened.
    #[display("connection")]
    Connection,
    /// Schema migrations could not be applied.
    #[display("migration")]
    Migration,
    /// A query or statement failed.
    #[display("query")]
    Query,
    /// A stored row does not describe a valid best score.
    #[display("corrupt record")]
    CorruptRecord,
}

/// Score store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Score store {} error: {} at {}:{}", kind, message, file, line)]
pub struct DbError {
    /// Failure category.
    pub kind: DbErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: DbErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns true if the error came from unreadable stored data.
    pub fn is_corrupt(&self) -> bool {
        self.kind == DbErrorKind::CorruptRecord
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(DbErrorKind::Query, err.to_string())
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(DbErrorKind::Connection, err.to_string())
    }
}

impl From<pairs_core::GameError> for DbError {
    #[track_caller]
    fn from(err: pairs_core::GameError) -> Self {
        Self::new(DbErrorKind::CorruptRecord, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_caller_location() {
        let err = DbError::new(DbErrorKind::Query, "boom");
        assert!(err.file.ends_with("error.rs"));
        assert!(err.to_string().starts_with("Score store query error: boom"));
    }

    #[test]
    fn test_game_error_is_corrupt_record() {
        let err = DbError::from(pairs_core::GameError::InvalidBoardSize(5));
        assert!(err.is_corrupt());
    }
}
