#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! check-db - inspect one column of a table in a local SQLite database
//!
//! check-db opens a database file read-only, looks up a table in the catalog,
//! and prints the values of one of its columns. When the table is absent it
//! prints a fixed diagnostic line instead. It can be used as both a
//! command-line application and a library.
//!
//! # Feature Flags
//!
//! | Feature | Description | Key Dependencies |
//! |---------|-------------|------------------|
//! | `display` | Table/markdown output with `tabled` | `tabled` |
//! | `cli` | The `check-db` binary | `clap`, `tracing-subscriber` |
//!
//! # Architecture
//!
//! - **[`database`]**: read-only SQLite connection wrapper and catalog queries
//! - **[`lens`]**: the inspection routine and output formatting
//! - **[`config`]**: configuration from an optional file and built-in defaults
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use check_db::{CheckDbConfig, InspectLens, OutputFormat};
//!
//! let config = CheckDbConfig::new(&None)?;
//! let outcome = InspectLens::new(config.target()).inspect()?;
//! print!("{}", outcome.render(OutputFormat::Plain)?);
//! ```

pub mod config;
pub mod database;
pub mod lens;

pub use config::CheckDbConfig;

pub use database::{ColumnValue, DatabaseConn};

pub use lens::inspect::{InspectLens, InspectOutcome, InspectTarget};
pub use lens::utils::OutputFormat;
