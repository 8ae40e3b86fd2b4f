//! Column, cell and row definitions.
//!
//! The grid never owns these in the sense of mutating them: callers pass
//! columns and rows in, and edits are reported back through callbacks.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

// =============================================================================
// Column
// =============================================================================

/// A grid column definition.
///
/// # Examples
///
/// ```
/// use sheetgrid::Column;
///
/// let columns = vec![
///     Column::new("Name", "name").width(24),
///     Column::new("Notes", "notes").sortable(false),
/// ];
/// assert!(columns[0].sortable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Header text.
    pub header: String,
    /// Key used to look up cells in each row.
    pub key: String,
    /// Display width in terminal columns. Falls back to a size-based default.
    #[serde(default)]
    pub width: Option<u16>,
    /// Whether clicking the header cycles the sort.
    #[serde(default = "default_true")]
    pub sortable: bool,
}

impl Column {
    /// Create a sortable column with no explicit width.
    pub fn new(header: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            key: key.into(),
            width: None,
            sortable: true,
        }
    }

    /// Set a fixed display width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Set whether this column is sortable.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }
}

// =============================================================================
// CellValue
// =============================================================================

/// The value stored in a cell: either text or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            // Negative zero prints as "0".
            Self::Number(n) if *n == 0.0 => f.write_str("0"),
            Self::Number(n) if n.abs() >= 1e21 || n.abs() < 1e-6 => write_exponent(f, *n),
            // f64's Display already drops the fractional part of integral values.
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Shortest exponent form with a signed exponent: `1e+21`, `-1.5e-7`.
fn write_exponent(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    let text = format!("{n:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            write!(f, "{mantissa}e+{exponent}")
        }
        _ => f.write_str(&text),
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        Self::Number(n as f64)
    }
}

// =============================================================================
// Cell
// =============================================================================

/// A single cell: a value and whether it may be edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CellRepr")]
pub struct Cell {
    pub value: CellValue,
    pub editable: bool,
}

/// Accepts both `{ "value": .., "editable": .. }` and a bare value.
#[derive(Deserialize)]
#[serde(untagged)]
enum CellRepr {
    Full {
        value: CellValue,
        #[serde(default = "default_true")]
        editable: bool,
    },
    Bare(CellValue),
}

impl From<CellRepr> for Cell {
    fn from(repr: CellRepr) -> Self {
        match repr {
            CellRepr::Full { value, editable } => Self { value, editable },
            CellRepr::Bare(value) => Self::new(value),
        }
    }
}

impl Cell {
    /// Create an editable cell.
    pub fn new(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            editable: true,
        }
    }

    /// Create a cell that can never be edited.
    pub fn read_only(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            editable: false,
        }
    }

    /// Set whether the cell is editable.
    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// The value as displayed and as seeded into the editor.
    pub fn text(&self) -> String {
        self.value.to_string()
    }
}

macro_rules! cell_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Cell {
                fn from(value: $ty) -> Self {
                    Self::new(value)
                }
            }
        )*
    };
}

cell_from!(CellValue, &str, String, f64, i32, i64, u32);

// =============================================================================
// Row
// =============================================================================

/// A row record: column key to cell.
///
/// Keys without a matching column are carried but never displayed; columns
/// without a matching key display as empty, non-editable cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: HashMap<String, Cell>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, cell: impl Into<Cell>) -> Self {
        self.insert(key, cell);
        self
    }

    /// Insert or replace the cell for a column key.
    pub fn insert(&mut self, key: impl Into<String>, cell: impl Into<Cell>) {
        self.cells.insert(key.into(), cell.into());
    }

    /// Get the cell for a column key.
    pub fn get(&self, key: &str) -> Option<&Cell> {
        self.cells.get(key)
    }

    /// Get the value for a column key.
    pub fn value(&self, key: &str) -> Option<&CellValue> {
        self.cells.get(key).map(|c| &c.value)
    }
}

impl<K: Into<String>, C: Into<Cell>> FromIterator<(K, C)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, C)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, c)| (k.into(), c.into()))
                .collect(),
        }
    }
}
