//! `db` crate — read-only access to the `users` table.
//!
//! Provides a connection pool, the [`Connection`] / [`RowCursor`] capability
//! traits with a Postgres implementation, the [`NameRepository`], and an
//! in-process mock driver for tests.

pub mod connection;
pub mod error;
pub mod mock;
pub mod pool;
pub mod repository;

pub use connection::{Connection, RowCursor};
pub use error::DbError;
pub use pool::DbPool;
pub use repository::NameRepository;
