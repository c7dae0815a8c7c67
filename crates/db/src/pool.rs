//! Postgres connection pool and its [`Connection`] implementation.

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::{debug, info};

use crate::{Connection, DbError, RowCursor};

/// Type alias for the shared Postgres pool used across the whole application.
pub type DbPool = PgPool;

/// Create a new connection pool from the given `database_url`.
///
/// `max_connections` controls the pool ceiling.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, DbError> {
    info!("Connecting to database (max_connections={})", max_connections);
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

#[async_trait]
impl Connection for PgPool {
    async fn query(&self, sql: &str) -> Result<Box<dyn RowCursor>, DbError> {
        let rows = sqlx::query(sql)
            .fetch_all(self)
            .await
            .map_err(|e| DbError::Query {
                sql: sql.to_string(),
                message: e.to_string(),
            })?;

        debug!(rows = rows.len(), "query returned");
        Ok(Box::new(PgRowCursor::new(rows)))
    }
}

/// Cursor over rows already fetched from Postgres.
///
/// Decoding happens lazily, one row per [`RowCursor::next_value`] call, so a
/// row whose first column is not text surfaces as [`DbError::Row`].
pub struct PgRowCursor {
    rows: std::vec::IntoIter<PgRow>,
    index: usize,
    closed: bool,
}

impl PgRowCursor {
    fn new(rows: Vec<PgRow>) -> Self {
        Self {
            rows: rows.into_iter(),
            index: 0,
            closed: false,
        }
    }
}

#[async_trait]
impl RowCursor for PgRowCursor {
    async fn next_value(&mut self) -> Result<Option<String>, DbError> {
        if self.closed {
            return Ok(None);
        }
        let Some(row) = self.rows.next() else {
            return Ok(None);
        };

        let index = self.index;
        self.index += 1;
        row.try_get::<String, _>(0)
            .map(Some)
            .map_err(|e| DbError::Row {
                index,
                message: e.to_string(),
            })
    }

    async fn close(&mut self) -> Result<(), DbError> {
        // Rows are buffered, so releasing them cannot fail.
        self.closed = true;
        self.rows = Vec::new().into_iter();
        Ok(())
    }
}
