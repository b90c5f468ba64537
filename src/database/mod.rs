//! Database module
//!
//! All SQLite access in check-db goes through this module.
//!
//! ```text
//! database/
//! └── core/           # Foundation
//!     └── connection  # Read-only DatabaseConn wrapper, catalog and column queries
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use check_db::database::DatabaseConn;
//!
//! let db = DatabaseConn::open_read_only("embeddings.db")?;
//! if db.table_exists("embeddings")? {
//!     for value in db.column_values("embeddings", "name")? {
//!         println!("{}", value);
//!     }
//! }
//! db.close()?;
//! ```

pub mod core;

pub use core::{quote_identifier, ColumnValue, DatabaseConn};
