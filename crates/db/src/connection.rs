//! The capability traits a database handle must provide to back a
//! repository.

use async_trait::async_trait;

use crate::DbError;

/// Anything that can run a SQL statement and hand back a cursor over its
/// rows.
///
/// The statement text is sent as-is; no parameters are bound.
#[async_trait]
pub trait Connection: Send + Sync {
    async fn query(&self, sql: &str) -> Result<Box<dyn RowCursor>, DbError>;
}

/// A forward-only cursor yielding the first column of each row as text.
#[async_trait]
pub trait RowCursor: Send {
    /// Advance to the next row. `Ok(None)` marks the end of the result set.
    async fn next_value(&mut self) -> Result<Option<String>, DbError>;

    /// Release the result set. Must be called exactly once on every path.
    async fn close(&mut self) -> Result<(), DbError>;
}
