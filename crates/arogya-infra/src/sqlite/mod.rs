//! SQLite storage layer.
//!
//! Chat session persistence backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod chat;
pub mod pool;
