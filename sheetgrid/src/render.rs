//! Terminal rendering of a grid into a [`Buffer`].
//!
//! Layout, top to bottom: header row, a rule line, then data rows. Each row
//! is `size.row_height()` lines tall. Columns are separated by a one-column
//! rule. Rows that do not fit are scrolled so the selected row stays visible.

use crate::buffer::Buffer;
use crate::grid::SpreadsheetGrid;
use crate::style::{GridSize, Style, VariantStyle};
use crate::text::{display_width, tail_to_width, truncate_to_width};

const CARET: char = '▏';

/// A rectangle in buffer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && x < self.x.saturating_add(self.width)
            && y >= self.y
            && y < self.y.saturating_add(self.height)
    }
}

/// What lies under a point of a rendered frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HitTarget {
    Header(String),
    Cell { row: usize, column: String },
    RowNumber(usize),
}

/// A rendered grid plus the hit regions needed to route clicks.
#[derive(Debug, Clone)]
pub struct Frame {
    pub buffer: Buffer,
    hits: Vec<(Rect, HitTarget)>,
}

impl Frame {
    /// Find the target under (x, y).
    pub fn hit_test(&self, x: u16, y: u16) -> Option<&HitTarget> {
        self.hits
            .iter()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|(_, target)| target)
    }

    /// Region occupied by a target, if rendered.
    pub fn rect_of(&self, target: &HitTarget) -> Option<Rect> {
        self.hits
            .iter()
            .find(|(_, t)| t == target)
            .map(|(rect, _)| *rect)
    }

    fn buffer_fill(&mut self, style: Style) {
        for y in 0..self.buffer.height() {
            self.buffer.fill(0, y, self.buffer.width(), style);
        }
    }
}

/// One laid-out column: key (None for the row-number column) and outer width.
struct Slot<'a> {
    key: Option<&'a str>,
    x: u16,
    width: u16,
}

/// Render `grid` into a `width` x `height` frame.
///
/// `hovered` highlights the target under the pointer.
pub fn render(
    grid: &SpreadsheetGrid,
    width: u16,
    height: u16,
    hovered: Option<&HitTarget>,
) -> Frame {
    let options = grid.options();
    let size = options.size;
    let mut styles = options.variant.style();
    if options.disabled {
        styles = dimmed(styles);
    }

    let mut frame = Frame {
        buffer: Buffer::new(width, height),
        hits: Vec::new(),
    };
    frame.buffer_fill(styles.cell);

    let slots = layout_columns(grid, size, width);
    let row_h = size.row_height();
    let pad_x = size.padding_x();

    // Header
    for slot in &slots {
        let rect = Rect::new(slot.x, 0, slot.width, row_h);
        fill_rect(&mut frame.buffer, rect, styles.header);

        let label = match slot.key {
            None => "#".to_string(),
            Some(key) => header_label(grid, key),
        };
        put_padded(&mut frame.buffer, rect, size, &label, styles.header);

        if let Some(key) = slot.key {
            frame.hits.push((rect, HitTarget::Header(key.to_string())));
        }
    }
    draw_separators(&mut frame.buffer, &slots, 0, row_h, styles);

    // Rule under the header
    let rule_y = row_h;
    for x in 0..width {
        let junction = slots.iter().skip(1).any(|s| s.x > 0 && s.x - 1 == x);
        let ch = if junction { '┼' } else { '─' };
        frame
            .buffer
            .put_str(x, rule_y, &ch.to_string(), 1, styles.cell.fg(styles.border));
    }

    // Body
    let body_top = rule_y + 1;
    let capacity = (height.saturating_sub(body_top) / row_h.max(1)) as usize;
    let first = first_visible_row(grid, capacity);

    for (line, displayed) in (first..grid.row_count()).take(capacity).enumerate() {
        let y = body_top + (line as u16) * row_h;

        for slot in &slots {
            let rect = Rect::new(slot.x, y, slot.width, row_h);
            match slot.key {
                None => {
                    fill_rect(&mut frame.buffer, rect, styles.row_number);
                    let n = (displayed + 1).to_string();
                    let offset = slot.width.saturating_sub(display_width(&n) as u16) / 2;
                    frame.buffer.put_str(
                        rect.x + offset,
                        rect.y + size.padding_y(),
                        &n,
                        slot.width - offset,
                        styles.row_number,
                    );
                    frame.hits.push((rect, HitTarget::RowNumber(displayed)));
                }
                Some(key) => {
                    let target = HitTarget::Cell {
                        row: displayed,
                        column: key.to_string(),
                    };
                    let style = cell_style(grid, displayed, key, &target, hovered, styles);
                    fill_rect(&mut frame.buffer, rect, style);

                    let editing = grid
                        .editing()
                        .filter(|e| e.cell.row == displayed && e.cell.column == key);
                    match editing {
                        Some(edit) => {
                            let inner = slot.width.saturating_sub(2 * pad_x) as usize;
                            let mut text = tail_to_width(&edit.draft, inner.saturating_sub(1));
                            text.push(CARET);
                            put_raw(&mut frame.buffer, rect, size, &text, style.underline());
                        }
                        None => {
                            let text = grid.cell_text(displayed, key);
                            put_padded(&mut frame.buffer, rect, size, &text, style);
                        }
                    }
                    frame.hits.push((rect, target));
                }
            }
        }
        draw_separators(&mut frame.buffer, &slots, y, row_h, styles);
    }

    frame
}

/// Lay out columns left to right, clipped to `frame_width`.
///
/// Columns starting past the right edge are not laid out at all.
fn layout_columns(grid: &SpreadsheetGrid, size: GridSize, frame_width: u16) -> Vec<Slot<'_>> {
    let pad = 2 * size.padding_x();
    let mut slots = Vec::with_capacity(grid.columns().len() + 1);
    let mut x: u16 = 0;

    let row_numbers = grid.options().show_row_numbers.then(|| {
        let digits = grid.row_count().max(1).to_string().len() as u16;
        (None, digits)
    });
    let columns = grid.columns().iter().map(|column| {
        let content = column.width.unwrap_or(size.default_column_width());
        (Some(column.key.as_str()), content)
    });

    for (key, content) in row_numbers.into_iter().chain(columns) {
        if x >= frame_width {
            break;
        }
        let width = content.saturating_add(pad).min(frame_width - x);
        slots.push(Slot { key, x, width });
        // One column for the separator.
        x = x.saturating_add(width).saturating_add(1);
    }

    slots
}

fn header_label(grid: &SpreadsheetGrid, key: &str) -> String {
    let header = grid
        .columns()
        .iter()
        .find(|c| c.key == key)
        .map(|c| c.header.as_str())
        .unwrap_or_default();

    match grid.sort_indicator(key) {
        Some(indicator) => format!("{header} {indicator}"),
        None => header.to_string(),
    }
}

fn cell_style(
    grid: &SpreadsheetGrid,
    row: usize,
    key: &str,
    target: &HitTarget,
    hovered: Option<&HitTarget>,
    styles: VariantStyle,
) -> Style {
    if grid.state().is_selected(row, key) {
        styles.selected
    } else if !grid.is_disabled() && hovered == Some(target) {
        styles.hover
    } else {
        styles.cell
    }
}

/// Scroll offset that keeps the selected row on screen.
fn first_visible_row(grid: &SpreadsheetGrid, capacity: usize) -> usize {
    match grid.selected() {
        Some(sel) if capacity > 0 && sel.row >= capacity => sel.row + 1 - capacity,
        _ => 0,
    }
}

fn fill_rect(buffer: &mut Buffer, rect: Rect, style: Style) {
    for dy in 0..rect.height {
        buffer.fill(rect.x, rect.y + dy, rect.width, style);
    }
}

/// Truncated text inside the cell padding, on the middle line.
fn put_padded(buffer: &mut Buffer, rect: Rect, size: GridSize, text: &str, style: Style) {
    let inner = rect.width.saturating_sub(2 * size.padding_x());
    let text = truncate_to_width(text, inner as usize);
    put_raw(buffer, rect, size, &text, style);
}

fn put_raw(buffer: &mut Buffer, rect: Rect, size: GridSize, text: &str, style: Style) {
    let inner = rect.width.saturating_sub(2 * size.padding_x());
    buffer.put_str(
        rect.x.saturating_add(size.padding_x()),
        rect.y.saturating_add(size.padding_y()),
        text,
        inner,
        style,
    );
}

fn draw_separators(
    buffer: &mut Buffer,
    slots: &[Slot<'_>],
    y: u16,
    height: u16,
    styles: VariantStyle,
) {
    for slot in slots.iter().skip(1) {
        if slot.x == 0 {
            continue;
        }
        for dy in 0..height {
            buffer.put_str(slot.x - 1, y + dy, "│", 1, styles.cell.fg(styles.border));
        }
    }
}

fn dimmed(styles: VariantStyle) -> VariantStyle {
    VariantStyle {
        header: styles.header.dim(),
        cell: styles.cell.dim(),
        selected: styles.selected.dim(),
        hover: styles.hover.dim(),
        row_number: styles.row_number.dim(),
        border: styles.border,
    }
}
