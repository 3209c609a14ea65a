//! Error types for threadboard.

use thiserror::Error;

/// Common error type for threadboard.
#[derive(Error, Debug)]
pub enum BoardError {
    /// Malformed or missing required input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Referenced entity or attachment is absent.
    #[error("{0} not found")]
    NotFound(String),

    /// The relational store could not complete an operation.
    ///
    /// Covers connection failures, constraint violations that are not
    /// translated to `NotFound`, and row decoding errors.
    #[error("storage error: {0}")]
    Storage(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl BoardError {
    /// Whether this error is an expected outcome the caller must handle
    /// (as opposed to an infrastructure failure).
    pub fn is_expected(&self) -> bool {
        matches!(self, BoardError::Validation(_) | BoardError::NotFound(_))
    }
}

impl From<sqlx::Error> for BoardError {
    fn from(e: sqlx::Error) -> Self {
        BoardError::Storage(e.to_string())
    }
}

/// Map an insert failure to `NotFound` when it was caused by a dangling
/// foreign key, otherwise to `Storage`.
pub(crate) fn map_insert_error(e: sqlx::Error, parent: &str) -> BoardError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            BoardError::NotFound(parent.to_string())
        }
        _ => BoardError::from(e),
    }
}

/// Result type alias for threadboard operations.
pub type Result<T> = std::result::Result<T, BoardError>;
