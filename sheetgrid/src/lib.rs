//! A spreadsheet-style grid component.
//!
//! - [`sort`]: the three-state per-column sort cycle and stable ordering
//! - [`state`]: the selection/edit state machine as a pure reducer
//! - [`grid`]: [`SpreadsheetGrid`], which owns the state and reports edits
//!   and sort requests through callbacks
//! - [`render`]: draws a grid into a terminal [`Buffer`]

pub mod buffer;
pub mod error;
pub mod event;
pub mod grid;
pub mod model;
pub mod render;
pub mod sort;
pub mod state;
pub mod style;
pub mod text;

pub use buffer::Buffer;
pub use error::GridError;
pub use event::{EventResult, Key, Modifiers, MouseButton};
pub use grid::{GridId, GridOptions, SpreadsheetGrid};
pub use model::{Cell, CellValue, Column, Row};
pub use render::{Frame, HitTarget, Rect, render};
pub use sort::{SortConfig, SortDirection, cycle_sort, sorted_order};
pub use state::{CellChange, CellPos, EditState, GridAction, GridState, GridView};
pub use style::{GridSize, Rgb, Style, Variant};
