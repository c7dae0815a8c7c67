//! Repositories — each wraps a borrowed [`Connection`](crate::Connection)
//! behind named read operations.
//!
//! No business logic, no domain types — pure SQL.

pub mod names;

pub use names::NameRepository;
