//! Inspect lens module
//!
//! Opens a database read-only, checks the catalog for the target table, and
//! lists one column of it when present.
//!
//! # Usage
//!
//! ```rust,ignore
//! use check_db::lens::inspect::{InspectLens, InspectTarget};
//! use check_db::lens::utils::OutputFormat;
//!
//! let lens = InspectLens::new(InspectTarget::new("embeddings.db", "embeddings", "name"));
//! let outcome = lens.inspect()?;
//! print!("{}", outcome.render(OutputFormat::Plain)?);
//! ```

mod types;

pub use types::{InspectOutcome, InspectTarget, CONTENTS_HEADER};

use anyhow::Result;
use tracing::{debug, info, Level};

use crate::database::DatabaseConn;

/// Inspection lens over a single target
pub struct InspectLens {
    target: InspectTarget,
}

impl InspectLens {
    pub fn new(target: InspectTarget) -> Self {
        Self { target }
    }

    /// Run the inspection
    ///
    /// Only storage-access failures are errors; a missing table yields
    /// [`InspectOutcome::Missing`]. The connection is closed before returning
    /// on the normal path and dropped on every error path.
    pub fn inspect(&self) -> Result<InspectOutcome> {
        let InspectTarget {
            database_path,
            table,
            column,
        } = &self.target;

        let db = DatabaseConn::open_read_only(database_path)?;
        let outcome = Self::inspect_with(&db, table, column)?;
        db.close()?;

        info!(
            path = %database_path,
            table = %table,
            exists = outcome.exists(),
            rows = outcome.values().len(),
            "inspection finished"
        );
        Ok(outcome)
    }

    /// Run the inspection against an already open connection
    pub fn inspect_with(db: &DatabaseConn, table: &str, column: &str) -> Result<InspectOutcome> {
        if !db.table_exists(table)? {
            if tracing::enabled!(Level::DEBUG) {
                let available = db.table_names()?;
                debug!(table = %table, available = ?available, "table not in catalog");
            }
            return Ok(InspectOutcome::Missing {
                table: table.to_string(),
            });
        }

        let values = db.column_values(table, column)?;
        Ok(InspectOutcome::Found {
            table: table.to_string(),
            column: column.to_string(),
            values,
        })
    }
}
