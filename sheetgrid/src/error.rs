//! Error types for grid construction and configuration.

/// Errors raised when building or reconfiguring a [`SpreadsheetGrid`](crate::SpreadsheetGrid).
///
/// Interaction never fails: clicks, keys and edits that make no sense for the
/// current grid are ignored instead. Only caller-supplied definitions are
/// validated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Two columns share the same key.
    #[error("Duplicate column key '{key}'")]
    DuplicateColumn { key: String },

    /// A sort configuration names a column that does not exist.
    #[error("Sort column '{key}' not found in grid")]
    UnknownColumn { key: String },

    /// A sort configuration names a column marked as not sortable.
    #[error("Column '{key}' is not sortable")]
    UnsortableColumn { key: String },
}

impl GridError {
    /// Creates a new duplicate column error.
    pub fn duplicate_column(key: impl Into<String>) -> Self {
        Self::DuplicateColumn { key: key.into() }
    }

    /// Creates a new unknown column error.
    pub fn unknown_column(key: impl Into<String>) -> Self {
        Self::UnknownColumn { key: key.into() }
    }

    /// Creates a new unsortable column error.
    pub fn unsortable_column(key: impl Into<String>) -> Self {
        Self::UnsortableColumn { key: key.into() }
    }
}
