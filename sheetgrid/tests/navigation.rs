mod common;

use common::{grid, name_age, people_columns, people_rows};
use sheetgrid::{CellPos, EventResult, GridAction, GridOptions, Key, SortConfig};

#[test]
fn test_arrow_down_moves_selection() {
    let (mut grid, _) = grid(people_columns(), people_rows(), GridOptions::new());

    grid.click_cell(0, "name");
    assert_eq!(grid.key(Key::Down), EventResult::Consumed);
    assert_eq!(grid.selected(), Some(&CellPos::new(1, "name")));
    assert_eq!(grid.cell_text(1, "name"), "Jane Smith");
}

#[test]
fn test_arrow_right_and_left_follow_column_order() {
    let (mut grid, _) = grid(people_columns(), people_rows(), GridOptions::new());

    grid.click_cell(0, "name");
    grid.key(Key::Right);
    assert_eq!(grid.selected(), Some(&CellPos::new(0, "email")));
    grid.key(Key::Right);
    assert_eq!(grid.selected(), Some(&CellPos::new(0, "age")));
    grid.key(Key::Left);
    assert_eq!(grid.selected(), Some(&CellPos::new(0, "email")));
}

#[test]
fn test_top_left_edges_are_noops() {
    let (mut grid, _) = grid(people_columns(), people_rows(), GridOptions::new());
    grid.click_cell(0, "name");

    assert_eq!(grid.key(Key::Up), EventResult::Ignored);
    assert_eq!(grid.key(Key::Left), EventResult::Ignored);
    assert_eq!(grid.selected(), Some(&CellPos::new(0, "name")));
}

#[test]
fn test_bottom_right_edges_are_noops() {
    let (mut grid, _) = grid(people_columns(), people_rows(), GridOptions::new());
    grid.click_cell(1, "age");

    assert_eq!(grid.key(Key::Down), EventResult::Ignored);
    assert_eq!(grid.key(Key::Right), EventResult::Ignored);
    assert_eq!(grid.selected(), Some(&CellPos::new(1, "age")));
}

#[test]
fn test_navigation_discards_pending_edit() {
    let (mut grid, rec) = grid(
        people_columns(),
        people_rows(),
        GridOptions::new().editable(true),
    );

    grid.click_cell(0, "name");
    grid.input("Changed");
    grid.key(Key::Down);

    assert!(grid.editing().is_none());
    assert_eq!(grid.selected(), Some(&CellPos::new(1, "name")));
    assert!(rec.borrow().changes.is_empty());
}

#[test]
fn test_arrows_without_selection_do_nothing() {
    let (mut grid, _) = grid(people_columns(), people_rows(), GridOptions::new());
    assert_eq!(grid.key(Key::Down), EventResult::Ignored);
    assert!(grid.selected().is_none());
}

#[test]
fn test_focus_selects_first_cell() {
    let (mut grid, _) = grid(people_columns(), people_rows(), GridOptions::new());
    assert_eq!(grid.focus(), EventResult::Consumed);
    assert_eq!(grid.selected(), Some(&CellPos::new(0, "name")));
}

#[test]
fn test_focus_on_empty_grid_is_noop() {
    let (mut grid, _) = grid(people_columns(), vec![], GridOptions::new());
    assert_eq!(grid.focus(), EventResult::Ignored);
    assert!(grid.selected().is_none());
}

#[test]
fn test_navigation_uses_displayed_order() {
    let (columns, rows) = name_age();
    let (mut grid, _) = grid(columns, rows, GridOptions::new());
    grid.click_header("name");

    grid.click_cell(0, "name");
    assert_eq!(grid.cell_text(0, "name"), "Amy");
    grid.key(Key::Down);
    assert_eq!(grid.selected(), Some(&CellPos::new(1, "name")));
    assert_eq!(grid.cell_text(1, "name"), "Bob");
}

#[test]
fn test_shrinking_rows_drops_stale_selection() {
    let (mut grid, _) = grid(people_columns(), people_rows(), GridOptions::new());
    grid.click_cell(1, "email");

    grid.set_rows(people_rows().into_iter().take(1).collect());
    assert!(grid.selected().is_none());
}

// ============================================================================
// Disabled grids
// ============================================================================

#[test]
fn test_disabled_grid_ignores_everything() {
    let (mut grid, rec) = grid(
        people_columns(),
        people_rows(),
        GridOptions::new().editable(true).disabled(true),
    );

    assert_eq!(grid.click_header("name"), EventResult::Ignored);
    assert_eq!(grid.click_cell(0, "name"), EventResult::Ignored);
    assert_eq!(grid.focus(), EventResult::Ignored);
    for key in [Key::Enter, Key::Down, Key::Right, Key::Escape, Key::Char('x')] {
        assert_eq!(grid.key(key), EventResult::Ignored);
    }
    grid.input("anything");
    grid.blur();

    assert!(grid.selected().is_none());
    assert!(grid.editing().is_none());
    assert_eq!(grid.sort(), None);
    let rec = rec.borrow();
    assert!(rec.changes.is_empty());
    assert!(rec.sorts.is_empty());
}

#[test]
fn test_disabling_mid_edit_discards_it() {
    let (mut grid, rec) = grid(
        people_columns(),
        people_rows(),
        GridOptions::new().editable(true),
    );

    grid.click_cell(0, "name");
    grid.input("Pending");
    grid.set_disabled(true);
    grid.blur();
    grid.dispatch(GridAction::Key(Key::Enter));

    assert!(grid.editing().is_none());
    assert!(rec.borrow().changes.is_empty());
}

#[test]
fn test_disabled_controlled_grid_requests_nothing() {
    let (columns, rows) = name_age();
    let grid = sheetgrid::SpreadsheetGrid::new(columns, rows)
        .unwrap()
        .with_sort(Some(SortConfig::ascending("name")))
        .unwrap()
        .with_options(GridOptions::new().disabled(true));
    let (mut grid, rec) = common::record(grid);

    grid.click_header("name");
    assert!(rec.borrow().sorts.is_empty());
    assert_eq!(grid.sort(), Some(&SortConfig::ascending("name")));
}
