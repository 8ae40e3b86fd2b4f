use crate::style::Style;

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub style: Style,
    /// Right half of a double-width character drawn in the cell before.
    pub wide_continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            style: Style::default(),
            wide_continuation: false,
        }
    }
}

impl Cell {
    pub fn new(char: char, style: Style) -> Self {
        Self {
            char,
            style,
            wide_continuation: false,
        }
    }
}
