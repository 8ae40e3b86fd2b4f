mod common;

use common::{grid, name_age, people_columns, people_rows};
use sheetgrid::{
    Cell, CellChange, CellPos, Column, EventResult, GridOptions, Key, Row, SortConfig,
};

/// A change on a grid whose displayed order matches input order.
fn change(row: usize, column: &str, value: &str) -> CellChange {
    CellChange {
        row,
        source_row: row,
        column: column.to_string(),
        value: value.to_string(),
    }
}

fn editable() -> GridOptions {
    GridOptions::new().editable(true)
}

#[test]
fn test_click_opens_editor_and_blur_commits() {
    let (mut grid, rec) = grid(people_columns(), people_rows(), editable());

    grid.click_cell(0, "name");
    assert_eq!(grid.editing().unwrap().draft, "John Doe");

    grid.input("John Smith");
    grid.blur();

    assert_eq!(rec.borrow().changes, vec![change(0, "name", "John Smith")]);
    assert!(grid.editing().is_none());
    assert_eq!(grid.selected(), Some(&CellPos::new(0, "name")));
    // The grid never edits its own data.
    assert_eq!(grid.cell_text(0, "name"), "John Doe");
}

#[test]
fn test_blur_unchanged_fires_nothing() {
    let (mut grid, rec) = grid(people_columns(), people_rows(), editable());

    grid.click_cell(0, "age");
    assert_eq!(grid.editing().unwrap().draft, "30");
    grid.blur();

    assert!(rec.borrow().changes.is_empty());
    assert!(grid.editing().is_none());
}

#[test]
fn test_enter_commits_exactly_once() {
    let (mut grid, rec) = grid(people_columns(), people_rows(), editable());

    grid.click_cell(1, "email");
    grid.input("jane@corp.example");
    grid.key(Key::Enter);
    grid.blur();

    assert_eq!(
        rec.borrow().changes,
        vec![change(1, "email", "jane@corp.example")]
    );
}

#[test]
fn test_enter_on_selected_cell_starts_editing() {
    let (mut grid, _) = grid(people_columns(), people_rows(), editable());

    grid.click_cell(0, "name");
    grid.key(Key::Escape);
    assert!(grid.editing().is_none());

    assert_eq!(grid.key(Key::Enter), EventResult::Consumed);
    assert_eq!(grid.editing().unwrap().cell, CellPos::new(0, "name"));
}

#[test]
fn test_escape_discards_edit() {
    let (mut grid, rec) = grid(people_columns(), people_rows(), editable());

    grid.click_cell(0, "name");
    grid.input("Someone Else");
    grid.key(Key::Escape);
    grid.blur();

    assert!(rec.borrow().changes.is_empty());
    assert!(grid.editing().is_none());
    assert_eq!(grid.cell_text(0, "name"), "John Doe");
}

#[test]
fn test_typing_edits_draft() {
    let (mut grid, rec) = grid(people_columns(), people_rows(), editable());

    grid.click_cell(1, "age");
    grid.key(Key::Backspace);
    grid.key(Key::Backspace);
    grid.key(Key::Char('4'));
    grid.key(Key::Char('2'));
    grid.key(Key::Enter);

    assert_eq!(rec.borrow().changes, vec![change(1, "age", "42")]);
}

#[test]
fn test_not_editable_grid_only_selects() {
    let (mut grid, rec) = grid(people_columns(), people_rows(), GridOptions::new());

    grid.click_cell(0, "name");
    assert_eq!(grid.selected(), Some(&CellPos::new(0, "name")));
    assert!(grid.editing().is_none());

    grid.key(Key::Enter);
    assert!(grid.editing().is_none());
    assert!(rec.borrow().changes.is_empty());
}

#[test]
fn test_read_only_cell_not_edited() {
    let rows = vec![Row::new().with("name", Cell::read_only("Locked"))];
    let (mut grid, _) = grid(vec![Column::new("Name", "name")], rows, editable());

    grid.click_cell(0, "name");
    assert!(grid.editing().is_none());
    assert!(!grid.is_cell_editable(0, "name"));
}

#[test]
fn test_missing_cell_is_empty_and_not_editable() {
    let columns = vec![Column::new("Name", "name"), Column::new("Phone", "phone")];
    let (mut grid, _) = grid(columns, people_rows(), editable());

    assert_eq!(grid.cell_text(0, "phone"), "");
    grid.click_cell(0, "phone");
    assert_eq!(grid.selected(), Some(&CellPos::new(0, "phone")));
    assert!(grid.editing().is_none());
}

#[test]
fn test_clicking_another_cell_commits_first() {
    let (mut grid, rec) = grid(people_columns(), people_rows(), editable());

    grid.click_cell(0, "name");
    grid.input("Johnny");
    grid.click_cell(1, "name");

    assert_eq!(rec.borrow().changes, vec![change(0, "name", "Johnny")]);
    assert_eq!(grid.editing().unwrap().cell, CellPos::new(1, "name"));
}

#[test]
fn test_clicking_edited_cell_keeps_draft() {
    let (mut grid, rec) = grid(people_columns(), people_rows(), editable());

    grid.click_cell(0, "name");
    grid.input("Jo");
    assert_eq!(grid.click_cell(0, "name"), EventResult::Ignored);

    assert_eq!(grid.editing().unwrap().draft, "Jo");
    assert!(rec.borrow().changes.is_empty());
}

#[test]
fn test_edit_reports_displayed_row_index() {
    let (columns, rows) = name_age();
    let (mut grid, rec) = grid(columns, rows, editable());

    grid.click_header("name");
    assert_eq!(grid.cell_text(1, "name"), "Bob");

    grid.click_cell(1, "name");
    grid.input("Robert");
    grid.blur();

    let expected = CellChange {
        source_row: 0,
        ..change(1, "name", "Robert")
    };
    assert_eq!(rec.borrow().changes, vec![expected]);
    assert_eq!(grid.original_index(1), Some(0));
}

#[test]
fn test_header_click_commits_pending_edit() {
    let (columns, rows) = name_age();
    let (mut grid, rec) = grid(columns, rows, editable());

    grid.click_cell(0, "age");
    grid.input("31");
    grid.click_header("age");

    let rec = rec.borrow();
    assert_eq!(rec.changes, vec![change(0, "age", "31")]);
    assert_eq!(rec.sorts, vec![Some(SortConfig::ascending("age"))]);
    assert!(grid.editing().is_none());
}

#[test]
fn test_caller_applies_change_via_set_rows() {
    let (columns, rows) = name_age();
    let (mut grid, rec) = grid(columns, rows, editable());
    grid.click_header("name");

    grid.click_cell(1, "name");
    grid.input("Robert");
    grid.blur();

    let applied = rec.borrow().changes[0].clone();
    let mut rows = grid.rows().to_vec();
    rows[applied.source_row].insert(applied.column.as_str(), applied.value.as_str());
    grid.set_rows(rows);

    assert_eq!(common::names(&grid), ["Amy", "Robert"]);
    assert_eq!(grid.selected(), Some(&CellPos::new(1, "name")));
}

#[test]
fn test_numeric_cell_commit_compares_as_text() {
    let rows = vec![Row::new().with("n", 2.5)];
    let (mut grid, rec) = grid(vec![Column::new("N", "n")], rows, editable());

    grid.click_cell(0, "n");
    assert_eq!(grid.editing().unwrap().draft, "2.5");
    grid.input("2.50");
    grid.blur();

    assert_eq!(rec.borrow().changes, vec![change(0, "n", "2.50")]);
}

#[test]
fn test_header_click_reports_row_before_resort() {
    let (columns, rows) = name_age();
    let (mut grid, rec) = grid(columns, rows, editable());

    // Unsorted: displayed row 0 is Bob.
    grid.click_cell(0, "name");
    grid.input("Robert");
    grid.click_header("name");

    let applied = rec.borrow().changes[0].clone();
    assert_eq!(applied.row, 0);
    assert_eq!(applied.source_row, 0);
    // The sort already moved Bob to displayed row 1.
    assert_eq!(grid.original_index(0), Some(1));

    let mut rows = grid.rows().to_vec();
    rows[applied.source_row].insert(applied.column.as_str(), applied.value.as_str());
    grid.set_rows(rows);

    let input: Vec<String> = grid
        .rows()
        .iter()
        .map(|row| row.get("name").unwrap().text())
        .collect();
    assert_eq!(input, ["Robert", "Amy"]);
    assert_eq!(common::names(&grid), ["Amy", "Robert"]);
}
