//! Selection and edit state machine.
//!
//! The grid moves between three states: nothing selected, a cell selected,
//! and a cell being edited (which is always also the selected cell).
//! [`GridState::reduce`] is a pure transition function over the displayed
//! grid, so it can be exercised without any rendering.

use crate::event::Key;
use crate::model::{Cell, Column, Row};

// =============================================================================
// GridView
// =============================================================================

/// Read access to the grid as it is displayed (after sorting).
///
/// Row indices are display positions, not input positions.
pub trait GridView {
    /// Number of displayed rows.
    fn row_count(&self) -> usize;

    /// Number of columns.
    fn column_count(&self) -> usize;

    /// Key of the column at a display position.
    fn column_key(&self, index: usize) -> Option<&str>;

    /// Display position of a column key.
    fn column_index(&self, key: &str) -> Option<usize>;

    /// Cell at a displayed row for a column key.
    fn cell(&self, row: usize, key: &str) -> Option<&Cell>;

    /// Input-order index of a displayed row.
    fn source_row(&self, row: usize) -> Option<usize>;
}

/// A [`GridView`] over borrowed columns and rows in a given display order.
#[derive(Debug, Clone, Copy)]
pub struct DisplayedGrid<'a> {
    pub columns: &'a [Column],
    pub rows: &'a [Row],
    /// `order[displayed] = input index`.
    pub order: &'a [usize],
}

impl GridView for DisplayedGrid<'_> {
    fn row_count(&self) -> usize {
        self.order.len()
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column_key(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(|c| c.key.as_str())
    }

    fn column_index(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }

    fn cell(&self, row: usize, key: &str) -> Option<&Cell> {
        self.order
            .get(row)
            .and_then(|&index| self.rows.get(index))
            .and_then(|r| r.get(key))
    }

    fn source_row(&self, row: usize) -> Option<usize> {
        self.order.get(row).copied()
    }
}

// =============================================================================
// State types
// =============================================================================

/// A cell position: displayed row index and column key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub row: usize,
    pub column: String,
}

impl CellPos {
    pub fn new(row: usize, column: impl Into<String>) -> Self {
        Self {
            row,
            column: column.into(),
        }
    }

    fn is(&self, row: usize, column: &str) -> bool {
        self.row == row && self.column == column
    }
}

/// An in-progress edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub cell: CellPos,
    /// The text as it was when editing started.
    pub original: String,
    /// The pending text.
    pub draft: String,
}

/// A committed edit that changed the cell's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellChange {
    /// Displayed row index at the time of the edit.
    pub row: usize,
    /// Input-order index of the edited row.
    ///
    /// Stays valid when the displayed order changes right after the commit,
    /// as it does when a header click ends the edit.
    pub source_row: usize,
    pub column: String,
    pub value: String,
}

/// An interaction with the grid body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridAction {
    /// Pointer click on a cell.
    ClickCell { row: usize, column: String },
    /// Key press while the grid has focus.
    Key(Key),
    /// Replace the pending edit text.
    Input(String),
    /// Keyboard focus entered the grid.
    Focus,
    /// The editor lost focus.
    Blur,
}

/// Flags and data a transition reads.
#[derive(Clone, Copy)]
pub struct ReduceContext<'a> {
    pub view: &'a dyn GridView,
    /// Grid-level editing switch.
    pub editable: bool,
    /// Suppresses every interaction.
    pub disabled: bool,
}

/// Outcome of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: GridState,
    pub change: Option<CellChange>,
}

// =============================================================================
// GridState
// =============================================================================

/// Selection and editing state of one grid instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridState {
    selected: Option<CellPos>,
    editing: Option<EditState>,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected cell, if any.
    pub fn selected(&self) -> Option<&CellPos> {
        self.selected.as_ref()
    }

    /// The in-progress edit, if any.
    pub fn editing(&self) -> Option<&EditState> {
        self.editing.as_ref()
    }

    pub fn is_selected(&self, row: usize, column: &str) -> bool {
        self.selected.as_ref().is_some_and(|p| p.is(row, column))
    }

    pub fn is_editing(&self, row: usize, column: &str) -> bool {
        self.editing.as_ref().is_some_and(|e| e.cell.is(row, column))
    }

    /// Apply an action and return the next state plus any committed change.
    ///
    /// `self` is left untouched. A disabled context always yields an
    /// unchanged state and no change.
    pub fn reduce(&self, action: &GridAction, cx: &ReduceContext<'_>) -> Transition {
        let mut next = self.clone();
        if cx.disabled {
            return Transition {
                state: next,
                change: None,
            };
        }

        let change = match action {
            GridAction::ClickCell { row, column } => next.click_cell(*row, column, cx),
            GridAction::Key(key) => next.key(*key, cx),
            GridAction::Input(text) => {
                if let Some(edit) = next.editing.as_mut() {
                    edit.draft = text.clone();
                }
                None
            }
            GridAction::Focus => {
                next.focus(cx);
                None
            }
            GridAction::Blur => next.commit(cx),
        };

        Transition {
            state: next,
            change,
        }
    }

    /// Drop any in-progress edit without reporting it.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Drop a selection or edit that no longer points at a displayed cell.
    pub fn reconcile(&mut self, view: &dyn GridView) {
        let valid =
            |p: &CellPos| p.row < view.row_count() && view.column_index(&p.column).is_some();

        if !self.selected.as_ref().is_some_and(valid) {
            self.selected = None;
            self.editing = None;
        }
        if !self.editing.as_ref().is_some_and(|e| valid(&e.cell)) {
            self.editing = None;
        }
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    fn click_cell(
        &mut self,
        row: usize,
        column: &str,
        cx: &ReduceContext<'_>,
    ) -> Option<CellChange> {
        if row >= cx.view.row_count() || cx.view.column_index(column).is_none() {
            return None;
        }
        // Click inside the open editor.
        if self.is_editing(row, column) {
            return None;
        }

        // The open editor loses focus before the new cell is selected.
        let change = self.commit(cx);

        let target = CellPos::new(row, column);
        self.selected = Some(target.clone());
        self.begin_edit(target, cx);
        change
    }

    fn key(&mut self, key: Key, cx: &ReduceContext<'_>) -> Option<CellChange> {
        match key {
            Key::Enter => {
                if self.editing.is_some() {
                    return self.commit(cx);
                }
                if let Some(target) = self.selected.clone() {
                    self.begin_edit(target, cx);
                }
                None
            }
            Key::Escape => {
                if self.editing.take().is_some() {
                    log::trace!("edit cancelled");
                }
                None
            }
            Key::Up | Key::Down | Key::Left | Key::Right => {
                self.navigate(key, cx);
                None
            }
            Key::Char(c) => {
                if let Some(edit) = self.editing.as_mut() {
                    edit.draft.push(c);
                }
                None
            }
            Key::Backspace => {
                if let Some(edit) = self.editing.as_mut() {
                    edit.draft.pop();
                }
                None
            }
            _ => None,
        }
    }

    fn focus(&mut self, cx: &ReduceContext<'_>) {
        if self.selected.is_some() || cx.view.row_count() == 0 {
            return;
        }
        if let Some(key) = cx.view.column_key(0) {
            self.selected = Some(CellPos::new(0, key));
        }
    }

    /// Move the selection one cell. Clamped: at the edge nothing changes.
    fn navigate(&mut self, key: Key, cx: &ReduceContext<'_>) {
        let Some(current) = self.selected.as_ref() else {
            return;
        };
        let Some(col) = cx.view.column_index(&current.column) else {
            return;
        };

        let (row, col) = match key {
            Key::Up if current.row > 0 => (current.row - 1, col),
            Key::Down if current.row + 1 < cx.view.row_count() => (current.row + 1, col),
            Key::Left if col > 0 => (current.row, col - 1),
            Key::Right if col + 1 < cx.view.column_count() => (current.row, col + 1),
            _ => return,
        };
        let Some(column) = cx.view.column_key(col) else {
            return;
        };

        self.selected = Some(CellPos::new(row, column));
        // Moving away discards the pending text.
        self.editing = None;
    }

    fn begin_edit(&mut self, target: CellPos, cx: &ReduceContext<'_>) {
        if !cx.editable {
            return;
        }
        let Some(cell) = cx.view.cell(target.row, &target.column) else {
            return;
        };
        if !cell.editable {
            return;
        }

        let text = cell.text();
        self.editing = Some(EditState {
            cell: target,
            original: text.clone(),
            draft: text,
        });
    }

    fn commit(&mut self, cx: &ReduceContext<'_>) -> Option<CellChange> {
        let edit = self.editing.take()?;
        let current = cx
            .view
            .cell(edit.cell.row, &edit.cell.column)
            .map(Cell::text)
            .unwrap_or(edit.original);

        if edit.draft == current {
            return None;
        }

        Some(CellChange {
            row: edit.cell.row,
            source_row: cx.view.source_row(edit.cell.row).unwrap_or(edit.cell.row),
            column: edit.cell.column,
            value: edit.draft,
        })
    }
}
