#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use sheetgrid::{CellChange, Column, GridOptions, Row, SortConfig, SpreadsheetGrid};

/// Calls captured from the grid callbacks.
#[derive(Debug, Default)]
pub struct Recorded {
    pub changes: Vec<CellChange>,
    pub sorts: Vec<Option<SortConfig>>,
}

pub type Recorder = Rc<RefCell<Recorded>>;

pub fn people_columns() -> Vec<Column> {
    vec![
        Column::new("Name", "name"),
        Column::new("Email", "email"),
        Column::new("Age", "age"),
    ]
}

pub fn people_rows() -> Vec<Row> {
    vec![
        Row::new()
            .with("name", "John Doe")
            .with("email", "john@example.com")
            .with("age", 30),
        Row::new()
            .with("name", "Jane Smith")
            .with("email", "jane@example.com")
            .with("age", 25),
    ]
}

pub fn name_age() -> (Vec<Column>, Vec<Row>) {
    (
        vec![Column::new("Name", "name"), Column::new("Age", "age")],
        vec![
            Row::new().with("name", "Bob").with("age", 30),
            Row::new().with("name", "Amy").with("age", 25),
        ],
    )
}

/// Attach recording callbacks to a grid.
pub fn record(grid: SpreadsheetGrid) -> (SpreadsheetGrid, Recorder) {
    let recorder = Recorder::default();
    let changes = recorder.clone();
    let sorts = recorder.clone();
    let grid = grid
        .on_cell_change(move |change| changes.borrow_mut().changes.push(change.clone()))
        .on_sort_change(move |sort| sorts.borrow_mut().sorts.push(sort.cloned()));
    (grid, recorder)
}

pub fn grid(
    columns: Vec<Column>,
    rows: Vec<Row>,
    options: GridOptions,
) -> (SpreadsheetGrid, Recorder) {
    record(SpreadsheetGrid::new(columns, rows).unwrap().with_options(options))
}

pub fn names(grid: &SpreadsheetGrid) -> Vec<String> {
    (0..grid.row_count())
        .map(|i| grid.cell_text(i, "name"))
        .collect()
}
