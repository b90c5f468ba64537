//! Core database infrastructure
//!
//! This module provides the foundational database components used by check-db:
//! - `DatabaseConn`: read-only SQLite connection wrapper
//! - `ColumnValue`: a single projected value, one per SQLite storage class

mod connection;

pub use connection::{quote_identifier, ColumnValue, DatabaseConn};
