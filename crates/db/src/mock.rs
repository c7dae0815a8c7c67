//! `MockConnection` — a scripted test double for [`Connection`].
//!
//! Useful in unit and integration tests where a live Postgres instance is
//! either unavailable or irrelevant. Each expected query is paired with the
//! rows it should yield, and failures can be injected at any stage: the
//! query itself, a specific row, or the final close.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::{Connection, DbError, RowCursor};

/// Rows returned for one expected query, plus any injected failures.
#[derive(Debug, Default)]
pub struct MockRows {
    values: Vec<String>,
    row_errors: HashMap<usize, DbError>,
    close_error: Option<DbError>,
}

impl MockRows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row whose single column holds `value`.
    pub fn add_row(mut self, value: impl Into<String>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Fail when the cursor advances to row `index` (zero-based).
    ///
    /// Rows before `index` are read normally.
    pub fn row_error(mut self, index: usize, err: DbError) -> Self {
        self.row_errors.insert(index, err);
        self
    }

    /// Fail when the cursor is closed.
    pub fn close_error(mut self, err: DbError) -> Self {
        self.close_error = Some(err);
        self
    }
}

struct Expectation {
    sql: String,
    outcome: Result<MockRows, DbError>,
}

/// A mock connection that records every statement it receives and answers
/// from a FIFO queue of expectations.
///
/// SQL must match the next expectation exactly; anything else fails with
/// [`DbError::Query`].
#[derive(Default)]
pub struct MockConnection {
    expectations: Mutex<VecDeque<Expectation>>,
    /// All statements seen by this connection (in call order).
    pub queries: Arc<Mutex<Vec<String>>>,
    open_cursors: Arc<AtomicUsize>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect `sql` next and answer it with `rows`.
    pub fn expect_query(&self, sql: impl Into<String>, rows: MockRows) {
        self.push(sql.into(), Ok(rows));
    }

    /// Expect `sql` next and fail it with `err` before any row is produced.
    pub fn expect_query_error(&self, sql: impl Into<String>, err: DbError) {
        self.push(sql.into(), Err(err));
    }

    /// `true` once every queued expectation has been consumed.
    pub fn expectations_met(&self) -> bool {
        self.expectations.lock().unwrap().is_empty()
    }

    /// Cursors handed out and not yet closed.
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }

    fn push(&self, sql: String, outcome: Result<MockRows, DbError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation { sql, outcome });
    }
}

#[async_trait]
impl Connection for MockConnection {
    async fn query(&self, sql: &str) -> Result<Box<dyn RowCursor>, DbError> {
        self.queries.lock().unwrap().push(sql.to_string());

        let next = self.expectations.lock().unwrap().pop_front();
        let expectation = match next {
            Some(e) if e.sql == sql => e,
            Some(e) => {
                return Err(DbError::Query {
                    sql: sql.to_string(),
                    message: format!("unexpected query, expected `{}`", e.sql),
                })
            }
            None => {
                return Err(DbError::Query {
                    sql: sql.to_string(),
                    message: "no query was expected".into(),
                })
            }
        };

        let rows = expectation.outcome?;
        self.open_cursors.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockCursor {
            values: rows.values.into_iter(),
            index: 0,
            row_errors: rows.row_errors,
            close_error: rows.close_error,
            closed: false,
            open_cursors: Arc::clone(&self.open_cursors),
        }))
    }
}

struct MockCursor {
    values: std::vec::IntoIter<String>,
    index: usize,
    row_errors: HashMap<usize, DbError>,
    close_error: Option<DbError>,
    closed: bool,
    open_cursors: Arc<AtomicUsize>,
}

#[async_trait]
impl RowCursor for MockCursor {
    async fn next_value(&mut self) -> Result<Option<String>, DbError> {
        if self.closed {
            return Ok(None);
        }
        if let Some(err) = self.row_errors.remove(&self.index) {
            return Err(err);
        }
        let value = self.values.next();
        if value.is_some() {
            self.index += 1;
        }
        Ok(value)
    }

    async fn close(&mut self) -> Result<(), DbError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.open_cursors.fetch_sub(1, Ordering::SeqCst);
        match self.close_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
