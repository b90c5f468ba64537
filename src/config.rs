use anyhow::{anyhow, Result};
use config::Config;
use std::collections::HashMap;
use std::path::Path;

use crate::lens::inspect::InspectTarget;

/// Database file inspected when nothing else is configured, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "embeddings.db";

/// Table whose existence is checked
pub const DEFAULT_TABLE: &str = "embeddings";

/// Column listed when the table exists
pub const DEFAULT_COLUMN: &str = "name";

pub struct CheckDbConfig {
    /// Path to the SQLite database file to inspect
    pub database_path: String,

    /// Name of the table to look up in the catalog
    pub table: String,

    /// Column projected from the table
    pub column: String,
}

const EMPTY_CONFIG: &str = r#"### check-db configuration file

### database file to inspect
# database_path = "embeddings.db"

### table and column to list
# table = "embeddings"
# column = "name"
"#;

impl Default for CheckDbConfig {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            table: DEFAULT_TABLE.to_string(),
            column: DEFAULT_COLUMN.to_string(),
        }
    }
}

impl CheckDbConfig {
    /// Function to create and initialize a new configuration
    ///
    /// Only the TOML file given in `path` is read; without it the built-in
    /// defaults apply. The environment is never consulted and nothing is
    /// written to disk.
    pub fn new(path: &Option<String>) -> Result<CheckDbConfig> {
        let p = match path {
            Some(p) => p,
            None => return Ok(CheckDbConfig::default()),
        };

        let path = Path::new(p.as_str());
        if !path.exists() {
            return Err(anyhow!("Config file '{}' does not exist", p));
        }
        let path_str = path
            .to_str()
            .ok_or_else(|| anyhow!("Could not convert path to string"))?;

        let settings = Config::builder()
            .add_source(config::File::with_name(path_str))
            .build()
            .map_err(|e| anyhow!("Failed to build configuration: {}", e))?;

        let config = settings
            .try_deserialize::<HashMap<String, String>>()
            .map_err(|e| anyhow!("Failed to deserialize configuration: {}", e))?;

        let defaults = CheckDbConfig::default();
        let pick = |key: &str, default: String| -> Result<String> {
            match config.get(key) {
                Some(v) if v.is_empty() => Err(anyhow!("Configuration key '{}' is empty", key)),
                Some(v) => Ok(v.clone()),
                None => Ok(default),
            }
        };

        Ok(CheckDbConfig {
            database_path: pick("database_path", defaults.database_path)?,
            table: pick("table", defaults.table)?,
            column: pick("column", defaults.column)?,
        })
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn with_overrides(
        mut self,
        database_path: Option<String>,
        table: Option<String>,
        column: Option<String>,
    ) -> Self {
        if let Some(p) = database_path {
            self.database_path = p;
        }
        if let Some(t) = table {
            self.table = t;
        }
        if let Some(c) = column {
            self.column = c;
        }
        self
    }

    /// The inspection target described by this configuration
    pub fn target(&self) -> InspectTarget {
        InspectTarget::new(&self.database_path, &self.table, &self.column)
    }

    /// Display configuration summary
    pub fn summary(&self) -> String {
        [
            format!("Database Path:      {}", self.database_path),
            format!("Table:              {}", self.table),
            format!("Column:             {}", self.column),
        ]
        .join("\n")
    }

    /// Template for a new configuration file, every key commented out
    pub fn template() -> &'static str {
        EMPTY_CONFIG
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CheckDbConfig::default();
        assert_eq!(config.database_path, "embeddings.db");
        assert_eq!(config.table, "embeddings");
        assert_eq!(config.column, "name");
    }

    #[test]
    fn test_no_config_file_uses_defaults() {
        let config = CheckDbConfig::new(&None).unwrap();
        assert_eq!(config.database_path, DEFAULT_DATABASE_PATH);
        assert_eq!(config.table, DEFAULT_TABLE);
        assert_eq!(config.column, DEFAULT_COLUMN);
    }

    #[test]
    fn test_malformed_config_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("check-db.toml");
        std::fs::write(&path, "table = [\n").unwrap();

        assert!(CheckDbConfig::new(&Some(path.to_str().unwrap().to_string())).is_err());
    }

    #[test]
    fn test_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("check-db.toml");
        std::fs::write(&path, "table = \"documents\"\ncolumn = \"title\"\n").unwrap();

        let config = CheckDbConfig::new(&Some(path.to_str().unwrap().to_string())).unwrap();
        assert_eq!(config.table, "documents");
        assert_eq!(config.column, "title");
        assert_eq!(config.database_path, DEFAULT_DATABASE_PATH);
    }

    #[test]
    fn test_template_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("check-db.toml");
        std::fs::write(&path, CheckDbConfig::template()).unwrap();

        let config = CheckDbConfig::new(&Some(path.to_str().unwrap().to_string())).unwrap();
        assert_eq!(config.database_path, DEFAULT_DATABASE_PATH);
        assert_eq!(config.table, DEFAULT_TABLE);
        assert_eq!(config.column, DEFAULT_COLUMN);
    }

    #[test]
    fn test_missing_config_file_is_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let result = CheckDbConfig::new(&Some(path.to_str().unwrap().to_string()));
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_with_overrides() {
        let config = CheckDbConfig::default().with_overrides(
            Some("/tmp/other.db".to_string()),
            None,
            Some("label".to_string()),
        );
        assert_eq!(config.database_path, "/tmp/other.db");
        assert_eq!(config.table, "embeddings");
        assert_eq!(config.column, "label");

        let target = config.target();
        assert_eq!(target.database_path, "/tmp/other.db");
        assert_eq!(target.column, "label");
    }

    #[test]
    fn test_summary() {
        let summary = CheckDbConfig::default().summary();
        assert!(summary.contains("embeddings.db"));
        assert_eq!(summary.lines().count(), 3);
    }
}
