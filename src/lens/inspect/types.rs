//! Types for the inspect lens module

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::database::ColumnValue;
use crate::lens::utils::OutputFormat;

/// Header printed above the listed values in plain output
pub const CONTENTS_HEADER: &str = "Database contents:";

// =============================================================================
// Target
// =============================================================================

/// What to inspect: a database file, a table in it, and one column of that table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectTarget {
    pub database_path: String,
    pub table: String,
    pub column: String,
}

impl InspectTarget {
    pub fn new(database_path: &str, table: &str, column: &str) -> Self {
        Self {
            database_path: database_path.to_string(),
            table: table.to_string(),
            column: column.to_string(),
        }
    }
}

// =============================================================================
// Outcome
// =============================================================================

/// Result of one inspection run
///
/// A missing table is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum InspectOutcome {
    Found {
        table: String,
        column: String,
        values: Vec<ColumnValue>,
    },
    Missing {
        table: String,
    },
}

/// JSON shape shared by both outcomes
#[derive(Serialize)]
struct OutcomeJson<'a> {
    table: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<&'a str>,
    exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    values: Option<&'a [ColumnValue]>,
}

impl InspectOutcome {
    pub fn exists(&self) -> bool {
        matches!(self, InspectOutcome::Found { .. })
    }

    /// Values listed from the column; empty when the table is missing
    pub fn values(&self) -> &[ColumnValue] {
        match self {
            InspectOutcome::Found { values, .. } => values,
            InspectOutcome::Missing { .. } => &[],
        }
    }

    /// The fixed line printed when the table is absent
    pub fn missing_message(table: &str) -> String {
        format!("The '{}' table doesn't exist", table)
    }

    fn as_json(&self) -> OutcomeJson<'_> {
        match self {
            InspectOutcome::Found {
                table,
                column,
                values,
            } => OutcomeJson {
                table: table.as_str(),
                column: Some(column.as_str()),
                exists: true,
                values: Some(values.as_slice()),
            },
            InspectOutcome::Missing { table } => OutcomeJson {
                table: table.as_str(),
                column: None,
                exists: false,
                values: None,
            },
        }
    }

    /// Render the outcome in the requested format
    ///
    /// The returned text always ends with a newline, so callers print it as-is.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Plain => Ok(self.render_plain()),
            OutputFormat::Table | OutputFormat::Markdown => Ok(self.render_table(format)),
            OutputFormat::Json => serde_json::to_string(&self.as_json())
                .map(|s| s + "\n")
                .map_err(|e| anyhow!("Failed to serialize outcome: {}", e)),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(&self.as_json())
                .map(|s| s + "\n")
                .map_err(|e| anyhow!("Failed to serialize outcome: {}", e)),
            OutputFormat::JsonLine => match self {
                InspectOutcome::Found { values, .. } => {
                    let mut out = String::new();
                    for value in values {
                        let line = serde_json::to_string(value)
                            .map_err(|e| anyhow!("Failed to serialize value: {}", e))?;
                        out.push_str(&line);
                        out.push('\n');
                    }
                    Ok(out)
                }
                InspectOutcome::Missing { .. } => serde_json::to_string(&self.as_json())
                    .map(|s| s + "\n")
                    .map_err(|e| anyhow!("Failed to serialize outcome: {}", e)),
            },
        }
    }

    fn render_plain(&self) -> String {
        match self {
            InspectOutcome::Found { values, .. } => {
                let mut out = format!("{}\n", CONTENTS_HEADER);
                for value in values {
                    out.push_str(&value.to_string());
                    out.push('\n');
                }
                out
            }
            InspectOutcome::Missing { table } => {
                format!("{}\n", Self::missing_message(table))
            }
        }
    }

    #[cfg(feature = "display")]
    fn render_table(&self, format: OutputFormat) -> String {
        use tabled::builder::Builder;
        use tabled::settings::Style;

        let (column, values) = match self {
            InspectOutcome::Found { column, values, .. } => (column, values),
            InspectOutcome::Missing { .. } => return self.render_plain(),
        };

        let mut builder = Builder::default();
        builder.push_record([column.to_string()]);
        for value in values {
            builder.push_record([value.to_string()]);
        }

        let mut table = builder.build();
        match format {
            OutputFormat::Markdown => table.with(Style::markdown()),
            _ => table.with(Style::rounded()),
        };
        format!("{}\n", table)
    }

    #[cfg(not(feature = "display"))]
    fn render_table(&self, _format: OutputFormat) -> String {
        self.render_plain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(values: &[&str]) -> InspectOutcome {
        InspectOutcome::Found {
            table: "embeddings".to_string(),
            column: "name".to_string(),
            values: values
                .iter()
                .map(|v| ColumnValue::Text(v.to_string()))
                .collect(),
        }
    }

    fn missing() -> InspectOutcome {
        InspectOutcome::Missing {
            table: "embeddings".to_string(),
        }
    }

    #[test]
    fn test_render_plain_found() {
        let out = found(&["alpha", "beta"]).render(OutputFormat::Plain).unwrap();
        assert_eq!(out, "Database contents:\nalpha\nbeta\n");
    }

    #[test]
    fn test_render_plain_missing() {
        let out = missing().render(OutputFormat::Plain).unwrap();
        assert_eq!(out, "The 'embeddings' table doesn't exist\n");
    }

    #[test]
    fn test_render_plain_empty_table() {
        let out = found(&[]).render(OutputFormat::Plain).unwrap();
        assert_eq!(out, "Database contents:\n");
    }

    #[test]
    fn test_render_plain_null_keeps_line() {
        let outcome = InspectOutcome::Found {
            table: "embeddings".to_string(),
            column: "name".to_string(),
            values: vec![
                ColumnValue::Null,
                ColumnValue::Integer(3),
                ColumnValue::Real(3.0),
            ],
        };
        let out = outcome.render(OutputFormat::Plain).unwrap();
        assert_eq!(out, "Database contents:\nNone\n3\n3.0\n");
    }

    #[test]
    fn test_render_json() {
        let out = found(&["alpha"]).render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["table"], "embeddings");
        assert_eq!(value["column"], "name");
        assert_eq!(value["exists"], true);
        assert_eq!(value["values"][0], "alpha");

        let out = missing().render(OutputFormat::JsonPretty).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["exists"], false);
        assert!(value.get("values").is_none());
    }

    #[test]
    fn test_render_json_line() {
        let out = found(&["alpha", "beta"]).render(OutputFormat::JsonLine).unwrap();
        assert_eq!(out, "\"alpha\"\n\"beta\"\n");

        let out = missing().render(OutputFormat::JsonLine).unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("\"exists\":false"));
    }

    #[cfg(feature = "display")]
    #[test]
    fn test_render_table() {
        let out = found(&["alpha", "beta"]).render(OutputFormat::Table).unwrap();
        assert!(out.contains("name"));
        assert!(out.contains("alpha"));
        assert!(out.contains("beta"));

        let out = found(&["alpha"]).render(OutputFormat::Markdown).unwrap();
        assert!(out.starts_with("| name"));

        let out = missing().render(OutputFormat::Table).unwrap();
        assert_eq!(out, "The 'embeddings' table doesn't exist\n");
    }

    #[test]
    fn test_outcome_accessors() {
        let outcome = found(&["alpha"]);
        assert!(outcome.exists());
        assert_eq!(outcome.values().len(), 1);

        let outcome = missing();
        assert!(!outcome.exists());
        assert!(outcome.values().is_empty());
    }
}
