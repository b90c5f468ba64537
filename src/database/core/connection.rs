//! Database connection management
//!
//! This module provides the read-only connection wrapper used by the inspection lens.

use anyhow::{anyhow, Result};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// A single value projected out of a table column
///
/// Variants mirror SQLite's storage classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl TryFrom<ValueRef<'_>> for ColumnValue {
    type Error = anyhow::Error;

    fn try_from(value: ValueRef<'_>) -> Result<Self> {
        Ok(match value {
            ValueRef::Null => ColumnValue::Null,
            ValueRef::Integer(i) => ColumnValue::Integer(i),
            ValueRef::Real(f) => ColumnValue::Real(f),
            ValueRef::Text(s) => ColumnValue::Text(
                std::str::from_utf8(s)
                    .map_err(|e| anyhow!("Could not decode TEXT value as UTF-8: {}", e))?
                    .to_string(),
            ),
            ValueRef::Blob(b) => ColumnValue::Blob(b.to_vec()),
        })
    }
}

impl fmt::Display for ColumnValue {
    /// Raw rendering of the stored value, no quoting or padding.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Null => write!(f, "None"),
            ColumnValue::Integer(i) => write!(f, "{}", i),
            ColumnValue::Real(r) => write!(f, "{}", format_real(*r)),
            ColumnValue::Text(s) => write!(f, "{}", s),
            ColumnValue::Blob(b) => match std::str::from_utf8(b) {
                Ok(s) => write!(f, "{}", s),
                Err(_) => b.iter().try_for_each(|byte| write!(f, "{:02x}", byte)),
            },
        }
    }
}

/// Format a REAL with the shortest digits that round-trip
///
/// Decimal exponents in `-4..16` print positionally and always keep a
/// fractional part (`3.0`); anything else prints in scientific notation with a
/// signed, two-digit minimum exponent (`1e-07`, `1.5e+20`).
fn format_real(r: f64) -> String {
    if r.is_nan() {
        return "nan".to_string();
    }
    if r.is_infinite() {
        return if r > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // `{:e}` yields the shortest round-trip mantissa, e.g. "-1.25e-7"
    let sci = format!("{:e}", r);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(m) => ("-", m),
        None => ("", mantissa),
    };

    if !(-4..16).contains(&exp) {
        let exp_sign = if exp < 0 { '-' } else { '+' };
        return format!("{}{}e{}{:02}", sign, mantissa, exp_sign, exp.abs());
    }

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    if exp < 0 {
        let zeros = "0".repeat((-exp - 1) as usize);
        return format!("{}0.{}{}", sign, zeros, digits);
    }

    let int_len = exp as usize + 1;
    if digits.len() <= int_len {
        let zeros = "0".repeat(int_len - digits.len());
        format!("{}{}{}.0", sign, digits, zeros)
    } else {
        format!("{}{}.{}", sign, &digits[..int_len], &digits[int_len..])
    }
}

/// Quote an SQL identifier (table or column name)
///
/// Embedded double quotes are doubled, so any name found in the catalog
/// can be used safely in a statement.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Core database connection wrapper
///
/// `DatabaseConn` owns the SQLite handle for its whole lifetime. The handle is
/// released when the wrapper is dropped, or explicitly through [`DatabaseConn::close`].
pub struct DatabaseConn {
    conn: Connection,
}

impl DatabaseConn {
    /// Open an existing database file read-only
    ///
    /// The file is never created: a missing path is an error.
    pub fn open_read_only(path: &str) -> Result<Self> {
        if !Path::new(path).is_file() {
            return Err(anyhow!(
                "Failed to open database at '{}': no such file",
                path
            ));
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags)
            .map_err(|e| anyhow!("Failed to open database at '{}': {}", path, e))?;

        debug!(path = %path, "opened database read-only");
        Ok(DatabaseConn { conn })
    }

    /// Create an in-memory database seeded by `sql`, for fixtures
    #[cfg(test)]
    pub(crate) fn open_in_memory_with(sql: &str) -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| anyhow!("Failed to create in-memory database: {}", e))?;
        conn.execute_batch(sql)
            .map_err(|e| anyhow!("Failed to seed in-memory database: {}", e))?;
        Ok(DatabaseConn { conn })
    }

    /// Check if a table exists in the database
    pub fn table_exists(&self, table_name: &str) -> Result<bool> {
        let count: i32 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [table_name],
                |row| row.get(0),
            )
            .map_err(|e| anyhow!("Failed to check table existence: {}", e))?;
        Ok(count > 0)
    }

    /// List the names of all tables in the catalog
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .map_err(|e| anyhow!("Failed to read catalog: {}", e))?;

        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| anyhow!("Failed to read catalog: {}", e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| anyhow!("Failed to read catalog row: {}", e))?;
        Ok(names)
    }

    /// Fetch every value of one column, in the order the engine returns them
    pub fn column_values(&self, table_name: &str, column: &str) -> Result<Vec<ColumnValue>> {
        let query = format!(
            "SELECT {} FROM {}",
            quote_identifier(column),
            quote_identifier(table_name)
        );
        let mut stmt = self.conn.prepare(&query).map_err(|e| {
            anyhow!(
                "Failed to query column '{}' of table '{}': {}",
                column,
                table_name,
                e
            )
        })?;

        let mut rows = stmt
            .query([])
            .map_err(|e| anyhow!("Failed to query table '{}': {}", table_name, e))?;

        let mut values = Vec::new();
        while let Some(row) = rows
            .next()
            .map_err(|e| anyhow!("Failed to read row from '{}': {}", table_name, e))?
        {
            let value = row
                .get_ref(0)
                .map_err(|e| anyhow!("Failed to read value from '{}': {}", table_name, e))?;
            let value = ColumnValue::try_from(value).map_err(|e| {
                anyhow!("Failed to read value from '{}': {}", table_name, e)
            })?;
            values.push(value);
        }
        Ok(values)
    }

    /// Close the connection, reporting any error SQLite raises while doing so
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| anyhow!("Failed to close database: {}", e))
    }
}
