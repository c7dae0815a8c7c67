//! Read-only queries over the `users` table.

use tracing::{debug, warn};

use crate::{Connection, DbError, RowCursor};

/// Statement issued by [`NameRepository::get_names`].
pub const SELECT_NAMES_SQL: &str = "SELECT name FROM users";

/// Two read operations over a connection the caller owns.
///
/// The repository never opens or closes the connection and keeps no state
/// besides the reference, so one instance can serve any number of calls.
pub struct NameRepository<'c, C: ?Sized> {
    conn: &'c C,
}

impl<'c, C: Connection + ?Sized> NameRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    /// Return every `users.name` in the order the database yields them.
    pub async fn get_names(&self) -> Result<Vec<String>, DbError> {
        self.fetch_strings(SELECT_NAMES_SQL).await
    }

    /// Return the distinct values of `column` in `table`.
    ///
    /// Both identifiers are spliced into the statement verbatim. They are
    /// neither quoted nor validated, so callers must never pass untrusted
    /// input here.
    pub async fn select_unique_values(
        &self,
        column: &str,
        table: &str,
    ) -> Result<Vec<String>, DbError> {
        let sql = format!("SELECT DISTINCT {column} FROM {table}");
        self.fetch_strings(&sql).await
    }

    /// Run `sql` and collect the first column of every row.
    ///
    /// The cursor is closed whether or not iteration succeeded. A row error
    /// takes precedence over a close error; either discards the values read
    /// so far.
    async fn fetch_strings(&self, sql: &str) -> Result<Vec<String>, DbError> {
        debug!(sql, "running query");
        let mut cursor = self.conn.query(sql).await?;

        let collected = drain(&mut cursor).await;
        let closed = cursor.close().await;

        match (collected, closed) {
            (Ok(values), Ok(())) => {
                debug!(count = values.len(), "query complete");
                Ok(values)
            }
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(close_err)) => {
                warn!(error = %close_err, "close failed after row error");
                Err(e)
            }
        }
    }
}

async fn drain(cursor: &mut Box<dyn RowCursor>) -> Result<Vec<String>, DbError> {
    let mut values = Vec::new();
    while let Some(value) = cursor.next_value().await? {
        values.push(value);
    }
    Ok(values)
}
