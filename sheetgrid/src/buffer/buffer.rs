use crate::style::Style;
use crate::text::char_width;

use super::Cell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::default(); (width as usize) * (height as usize)];
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    /// Paint `width` cells starting at (x, y) with blanks in `style`.
    pub fn fill(&mut self, x: u16, y: u16, width: u16, style: Style) {
        for dx in 0..width {
            self.set(x.saturating_add(dx), y, Cell::new(' ', style));
        }
    }

    /// Write a string at (x, y), clipped to `max_width` columns.
    ///
    /// Returns the number of columns written.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, max_width: u16, style: Style) -> u16 {
        let mut written: u16 = 0;
        for ch in s.chars() {
            let w = char_width(ch) as u16;
            if w == 0 {
                continue;
            }
            if written.saturating_add(w) > max_width {
                break;
            }
            let cx = x.saturating_add(written);
            self.set(cx, y, Cell::new(ch, style));
            if w == 2 {
                self.set(
                    cx.saturating_add(1),
                    y,
                    Cell {
                        wide_continuation: true,
                        ..Cell::new(' ', style)
                    },
                );
            }
            written += w;
        }
        written
    }

    /// Text of one line, skipping wide-character continuation cells.
    pub fn line(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|c| !c.wide_continuation)
            .map(|c| c.char)
            .collect()
    }

    /// Copy `other` into this buffer with its top-left corner at (x, y).
    pub fn blit(&mut self, x: u16, y: u16, other: &Buffer) {
        for oy in 0..other.height {
            for ox in 0..other.width {
                if let Some(cell) = other.get(ox, oy) {
                    self.set(x.saturating_add(ox), y.saturating_add(oy), *cell);
                }
            }
        }
    }

    fn index(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| {
                let x = (i % self.width as usize) as u16;
                let y = (i / self.width as usize) as u16;
                (x, y, cell)
            })
    }
}
