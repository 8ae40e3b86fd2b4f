//! The spreadsheet grid component.
//!
//! [`SpreadsheetGrid`] wires the sort engine and the selection/edit state
//! machine together, keeps the displayed row order in sync with the active
//! sort, and reports edits and sort requests through callbacks.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::event::{EventResult, Key};
use crate::model::{Cell, Column, Row};
use crate::sort::{SortConfig, UNSORTED_INDICATOR, cycle_sort, sorted_order};
use crate::state::{
    CellChange, CellPos, DisplayedGrid, EditState, GridAction, GridState, ReduceContext,
    Transition,
};
use crate::style::{GridSize, Variant};

/// Unique identifier for a grid instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridId(usize);

impl GridId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__grid_{}", self.0)
    }
}

// =============================================================================
// GridOptions
// =============================================================================

/// Display and interaction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    pub variant: Variant,
    pub size: GridSize,
    pub show_row_numbers: bool,
    /// Grid-level switch for in-place editing.
    pub editable: bool,
    /// Suppresses selection, editing and sorting.
    pub disabled: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            variant: Variant::Primary,
            size: GridSize::Md,
            show_row_numbers: true,
            editable: false,
            disabled: false,
        }
    }
}

impl GridOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: GridSize) -> Self {
        self.size = size;
        self
    }

    pub fn show_row_numbers(mut self, show: bool) -> Self {
        self.show_row_numbers = show;
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

// =============================================================================
// SpreadsheetGrid
// =============================================================================

/// Who owns the sort state.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SortSource {
    /// The grid owns the sort and updates it on header clicks.
    Internal(Option<SortConfig>),
    /// The caller owns the sort; header clicks only request a change.
    External(Option<SortConfig>),
}

type CellChangeHandler = Box<dyn FnMut(&CellChange)>;
type SortChangeHandler = Box<dyn FnMut(Option<&SortConfig>)>;

/// A spreadsheet-like grid with sortable columns, in-place editing and
/// keyboard navigation.
///
/// Rows are never modified by the grid. Committed edits are reported through
/// [`on_cell_change`](Self::on_cell_change) with the *displayed* row index;
/// [`CellChange::source_row`] names the input row to update. Hand updated
/// data back with [`set_rows`](Self::set_rows).
///
/// # Example
///
/// ```
/// use sheetgrid::{Column, GridOptions, Row, SpreadsheetGrid};
///
/// let columns = vec![Column::new("Name", "name"), Column::new("Age", "age")];
/// let rows = vec![
///     Row::new().with("name", "Bob").with("age", 30),
///     Row::new().with("name", "Amy").with("age", 25),
/// ];
///
/// let mut grid = SpreadsheetGrid::new(columns, rows)
///     .unwrap()
///     .with_options(GridOptions::new().editable(true));
///
/// grid.click_header("name");
/// assert_eq!(grid.cell_text(0, "name"), "Amy");
/// ```
pub struct SpreadsheetGrid {
    id: GridId,
    columns: Vec<Column>,
    rows: Vec<Row>,
    options: GridOptions,
    sort: SortSource,
    /// `order[displayed] = input index`.
    order: Vec<usize>,
    state: GridState,
    on_cell_change: Option<CellChangeHandler>,
    on_sort_change: Option<SortChangeHandler>,
}

impl fmt::Debug for SpreadsheetGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpreadsheetGrid")
            .field("id", &self.id)
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("options", &self.options)
            .field("sort", &self.sort)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl SpreadsheetGrid {
    /// Create an uncontrolled grid.
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Result<Self, GridError> {
        validate_columns(&columns)?;

        let order = (0..rows.len()).collect();
        Ok(Self {
            id: GridId::new(),
            columns,
            rows,
            options: GridOptions::default(),
            sort: SortSource::Internal(None),
            order,
            state: GridState::new(),
            on_cell_change: None,
            on_sort_change: None,
        })
    }

    /// Set display and interaction options.
    pub fn with_options(mut self, options: GridOptions) -> Self {
        self.set_options(options);
        self
    }

    /// Hand sort ownership to the caller, starting from `sort`.
    ///
    /// Header clicks then only call the sort callback; the displayed order
    /// changes when the caller pushes the new value with [`set_sort`](Self::set_sort).
    pub fn with_sort(mut self, sort: Option<SortConfig>) -> Result<Self, GridError> {
        self.validate_sort(sort.as_ref())?;
        self.sort = SortSource::External(sort);
        self.refresh_order();
        Ok(self)
    }

    /// Register the cell-change callback.
    pub fn on_cell_change(mut self, handler: impl FnMut(&CellChange) + 'static) -> Self {
        self.on_cell_change = Some(Box::new(handler));
        self
    }

    /// Register the sort-change callback.
    pub fn on_sort_change(mut self, handler: impl FnMut(Option<&SortConfig>) + 'static) -> Self {
        self.on_sort_change = Some(Box::new(handler));
        self
    }

    /// Get the unique ID.
    pub fn id(&self) -> GridId {
        self.id
    }

    // -------------------------------------------------------------------------
    // Options
    // -------------------------------------------------------------------------

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// Replace the options. Turning editing off, or disabling the grid,
    /// discards any pending edit without reporting it.
    pub fn set_options(&mut self, options: GridOptions) {
        if (options.disabled || !options.editable) && self.state.editing().is_some() {
            log::debug!("{}: pending edit discarded by option change", self.id);
            self.state.cancel_edit();
        }
        self.options = options;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.set_options(self.options.disabled(disabled));
    }

    pub fn is_disabled(&self) -> bool {
        self.options.disabled
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Rows in input order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Replace the rows, keeping the sort and any still-valid selection.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.refresh_order();
    }

    /// Replace the columns.
    ///
    /// An uncontrolled sort on a column that disappears or stops being
    /// sortable is cleared; a controlled one is an error.
    pub fn set_columns(&mut self, columns: Vec<Column>) -> Result<(), GridError> {
        validate_columns(&columns)?;

        let sort_error = self
            .sort()
            .and_then(|sort| sort_problem(&columns, sort).err());
        match (&mut self.sort, sort_error) {
            (SortSource::External(_), Some(err)) => return Err(err),
            (SortSource::Internal(sort), Some(_)) => {
                log::debug!("{}: clearing sort on removed column", self.id);
                *sort = None;
            }
            _ => {}
        }

        self.columns = columns;
        self.refresh_order();
        Ok(())
    }

    /// Input-order index of the row displayed at `displayed`.
    pub fn original_index(&self, displayed: usize) -> Option<usize> {
        self.order.get(displayed).copied()
    }

    /// Input-order indices in display order.
    pub fn display_order(&self) -> &[usize] {
        &self.order
    }

    /// Cell at a displayed row.
    pub fn cell(&self, displayed: usize, key: &str) -> Option<&Cell> {
        self.original_index(displayed)
            .and_then(|i| self.rows.get(i))
            .and_then(|row| row.get(key))
    }

    /// Text shown for a cell; missing cells show nothing.
    pub fn cell_text(&self, displayed: usize, key: &str) -> String {
        self.cell(displayed, key).map(Cell::text).unwrap_or_default()
    }

    /// Whether clicking the cell would open the editor.
    pub fn is_cell_editable(&self, displayed: usize, key: &str) -> bool {
        self.options.editable && self.cell(displayed, key).is_some_and(|c| c.editable)
    }

    fn view(&self) -> DisplayedGrid<'_> {
        DisplayedGrid {
            columns: &self.columns,
            rows: &self.rows,
            order: &self.order,
        }
    }

    // -------------------------------------------------------------------------
    // Sort
    // -------------------------------------------------------------------------

    /// The sort in effect: the caller's when controlled, otherwise the grid's.
    pub fn sort(&self) -> Option<&SortConfig> {
        match &self.sort {
            SortSource::Internal(sort) | SortSource::External(sort) => sort.as_ref(),
        }
    }

    /// Whether the caller owns the sort state.
    pub fn is_sort_controlled(&self) -> bool {
        matches!(self.sort, SortSource::External(_))
    }

    /// Set the sort directly. No callback fires.
    pub fn set_sort(&mut self, sort: Option<SortConfig>) -> Result<(), GridError> {
        self.validate_sort(sort.as_ref())?;
        match &mut self.sort {
            SortSource::Internal(current) | SortSource::External(current) => *current = sort,
        }
        self.refresh_order();
        Ok(())
    }

    /// Header sort indicator, or `None` for columns that cannot be sorted.
    pub fn sort_indicator(&self, key: &str) -> Option<&'static str> {
        let column = self.columns.iter().find(|c| c.key == key)?;
        if !column.sortable {
            return None;
        }
        match self.sort() {
            Some(sort) if sort.column_key == key => Some(sort.direction.indicator()),
            _ => Some(UNSORTED_INDICATOR),
        }
    }

    fn validate_sort(&self, sort: Option<&SortConfig>) -> Result<(), GridError> {
        match sort {
            Some(sort) => sort_problem(&self.columns, sort),
            None => Ok(()),
        }
    }

    fn refresh_order(&mut self) {
        let sort = match &self.sort {
            SortSource::Internal(sort) | SortSource::External(sort) => sort.as_ref(),
        };
        self.order = sorted_order(&self.rows, sort);

        let view = DisplayedGrid {
            columns: &self.columns,
            rows: &self.rows,
            order: &self.order,
        };
        self.state.reconcile(&view);
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn selected(&self) -> Option<&CellPos> {
        self.state.selected()
    }

    pub fn editing(&self) -> Option<&EditState> {
        self.state.editing()
    }

    // -------------------------------------------------------------------------
    // Event handlers
    // -------------------------------------------------------------------------

    /// Header click: cycle the sort for `key`.
    ///
    /// Ignored for unknown or unsortable columns and while disabled.
    pub fn click_header(&mut self, key: &str) -> EventResult {
        if self.options.disabled {
            return EventResult::Ignored;
        }
        let Some(column) = self.columns.iter().find(|c| c.key == key) else {
            return EventResult::Ignored;
        };
        if !column.sortable {
            return EventResult::Ignored;
        }

        // The open editor loses focus before the header takes the click.
        self.dispatch(GridAction::Blur);

        let next = cycle_sort(self.sort(), key, true);
        log::debug!("{}: sort {:?} -> {:?}", self.id, self.sort(), next);

        if let SortSource::Internal(current) = &mut self.sort {
            *current = next.clone();
            self.refresh_order();
        }
        if let Some(handler) = self.on_sort_change.as_mut() {
            handler(next.as_ref());
        }
        EventResult::Consumed
    }

    /// Pointer click on a displayed cell.
    pub fn click_cell(&mut self, row: usize, key: &str) -> EventResult {
        self.dispatch(GridAction::ClickCell {
            row,
            column: key.to_string(),
        })
    }

    /// Key press while the grid has focus.
    pub fn key(&mut self, key: Key) -> EventResult {
        self.dispatch(GridAction::Key(key))
    }

    /// Replace the pending edit text.
    pub fn input(&mut self, text: impl Into<String>) -> EventResult {
        self.dispatch(GridAction::Input(text.into()))
    }

    /// Keyboard focus entered the grid.
    pub fn focus(&mut self) -> EventResult {
        self.dispatch(GridAction::Focus)
    }

    /// The editor lost focus: commit any pending edit.
    pub fn blur(&mut self) -> EventResult {
        self.dispatch(GridAction::Blur)
    }

    /// Run one action through the state machine and fire the change callback.
    pub fn dispatch(&mut self, action: GridAction) -> EventResult {
        let view = self.view();
        let cx = ReduceContext {
            view: &view,
            editable: self.options.editable,
            disabled: self.options.disabled,
        };
        let Transition { state, change } = self.state.reduce(&action, &cx);

        let handled = state != self.state || change.is_some();
        self.state = state;

        if let Some(change) = change {
            log::debug!(
                "{}: cell ({}, {}) changed to {:?}",
                self.id,
                change.row,
                change.column,
                change.value
            );
            if let Some(handler) = self.on_cell_change.as_mut() {
                handler(&change);
            }
        }

        if handled {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}

fn validate_columns(columns: &[Column]) -> Result<(), GridError> {
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if !seen.insert(column.key.as_str()) {
            return Err(GridError::duplicate_column(&column.key));
        }
    }
    Ok(())
}

fn sort_problem(columns: &[Column], sort: &SortConfig) -> Result<(), GridError> {
    match columns.iter().find(|c| c.key == sort.column_key) {
        None => Err(GridError::unknown_column(&sort.column_key)),
        Some(c) if !c.sortable => Err(GridError::unsortable_column(&sort.column_key)),
        Some(_) => Ok(()),
    }
}
