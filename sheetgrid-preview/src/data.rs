//! Grid contents for the preview: a JSON file or built-in sample data.

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use sheetgrid::{Cell, Column, Row};

use crate::error::{PreviewError, Result};

/// Columns and rows as stored on disk.
///
/// ```json
/// { "columns": [{ "header": "Name", "key": "name" }],
///   "rows": [{ "name": "Ada" }, { "name": { "value": "Bob", "editable": false } }] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridData {
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl GridData {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| PreviewError::ReadData {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| PreviewError::ParseData {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load `path` if given, otherwise or on failure use the sample data.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::sample();
        };

        match Self::from_file(path) {
            Ok(data) => {
                info!(
                    "Loaded {} columns, {} rows from {}",
                    data.columns.len(),
                    data.rows.len(),
                    path.display()
                );
                data
            }
            Err(e) => {
                warn!("{e}; using sample data");
                Self::sample()
            }
        }
    }

    pub fn sample() -> Self {
        let columns = vec![
            Column::new("Name", "name").width(16),
            Column::new("Email", "email").width(22),
            Column::new("Age", "age").width(5),
            Column::new("Role", "role"),
            Column::new("Notes", "notes").sortable(false),
        ];

        let people = [
            ("John Doe", "john@example.com", 30, "Engineer"),
            ("Jane Smith", "jane@example.com", 25, "Designer"),
            ("Émile Zola", "emile@example.com", 41, "writer"),
            ("bob Brown", "bob@example.com", 35, "Manager"),
            ("Alice Wong", "alice@example.com", 28, "Engineer"),
            ("Zoë Park", "zoe@example.com", 33, "designer"),
        ];

        let mut rows: Vec<Row> = people
            .into_iter()
            .map(|(name, email, age, role)| {
                Row::new()
                    .with("name", name)
                    .with("email", email)
                    .with("age", age)
                    .with("role", role)
            })
            .collect();

        rows[0].insert("notes", "Team lead");
        rows[1].insert("email", Cell::read_only("jane@example.com"));
        rows.push(Row::new().with("name", "Pending hire").with("role", "Engineer"));

        Self { columns, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_accepts_bare_and_full_cells() {
        let data = GridData::from_json(
            r#"{
                "columns": [
                    { "header": "Name", "key": "name", "width": 12 },
                    { "header": "Age", "key": "age", "sortable": false }
                ],
                "rows": [
                    { "name": "Ada", "age": 36 },
                    { "name": { "value": "Bob", "editable": false } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(data.columns[0].width, Some(12));
        assert!(!data.columns[1].sortable);
        assert_eq!(data.rows[0].get("age"), Some(&Cell::new(36)));
        assert_eq!(data.rows[1].get("name"), Some(&Cell::read_only("Bob")));
        assert!(data.rows[1].get("age").is_none());
    }

    #[test]
    fn test_rows_default_to_empty() {
        let data = GridData::from_json(r#"{ "columns": [] }"#).unwrap();
        assert!(data.rows.is_empty());
    }

    #[test]
    fn test_missing_file_falls_back_to_sample() {
        let data = GridData::load(Some(Path::new("/nonexistent/sheetgrid.json")));
        assert_eq!(data, GridData::sample());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = GridData::from_file(Path::new("/nonexistent/sheetgrid.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/sheetgrid.json"));
    }

    #[test]
    fn test_sample_builds_a_grid() {
        let data = GridData::sample();
        assert!(sheetgrid::SpreadsheetGrid::new(data.columns, data.rows).is_ok());
    }
}
