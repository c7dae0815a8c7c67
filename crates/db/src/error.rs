//! Typed error type for the db crate.

use thiserror::Error;

/// Every failure a query can hit, from statement execution through cursor
/// release.
///
/// Repository methods pass these through unchanged; none of them is
/// retried.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("row not found")]
    NotFound,

    /// The database rejected or failed to run the statement.
    #[error("query `{sql}` failed: {message}")]
    Query { sql: String, message: String },

    /// Reading a row failed after the query had started returning rows.
    #[error("failed to read row {index}: {message}")]
    Row { index: usize, message: String },

    /// Releasing the result cursor failed.
    #[error("failed to close result set: {0}")]
    Close(String),
}
