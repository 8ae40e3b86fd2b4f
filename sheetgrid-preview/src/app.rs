//! The preview application: owns the data, feeds terminal input to the grid
//! and applies the edits the grid reports.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use log::{debug, info};
use sheetgrid::style::Theme;
use sheetgrid::{
    Buffer, Cell, CellChange, CellValue, EventResult, Frame, GridOptions, HitTarget, Key,
    Modifiers, MouseButton, SpreadsheetGrid, Style, render,
};

use crate::data::GridData;
use crate::error::Result;
use crate::terminal::Terminal;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Status line plus key help.
const FOOTER_LINES: u16 = 2;

const HELP: &str =
    "Tab focus  arrows move  Enter edit  Esc cancel  v variant  s size  e editable  d disable  q quit";

pub struct App {
    grid: SpreadsheetGrid,
    changes: Rc<RefCell<VecDeque<CellChange>>>,
    frame: Option<Frame>,
    hovered: Option<HitTarget>,
    theme: Theme,
    status: String,
    quit: bool,
}

impl App {
    pub fn new(data: GridData, options: GridOptions) -> Result<Self> {
        let changes: Rc<RefCell<VecDeque<CellChange>>> = Rc::default();
        let queue = changes.clone();

        let grid = SpreadsheetGrid::new(data.columns, data.rows)?
            .with_options(options)
            .on_cell_change(move |change| queue.borrow_mut().push_back(change.clone()))
            .on_sort_change(|sort| match sort {
                Some(sort) => info!("Sort changed: {} {:?}", sort.column_key, sort.direction),
                None => info!("Sort cleared"),
            });

        info!("{} ready with {} rows", grid.id(), grid.row_count());

        Ok(Self {
            grid,
            changes,
            frame: None,
            hovered: None,
            theme: Theme::default(),
            status: String::new(),
            quit: false,
        })
    }

    pub fn run(mut self) -> Result<()> {
        let mut terminal = Terminal::new()?;

        while !self.quit {
            let (width, height) = terminal.size()?;
            terminal.draw(self.compose(width, height))?;

            for event in terminal.poll(POLL_INTERVAL)? {
                self.handle_event(event);
            }
        }

        info!("Quit");
        Ok(())
    }

    /// Render the grid and footer into a full-screen buffer.
    ///
    /// The grid frame is kept for hit-testing the next mouse event.
    pub fn compose(&mut self, width: u16, height: u16) -> Buffer {
        let grid_height = height.saturating_sub(FOOTER_LINES);
        let frame = render(&self.grid, width, grid_height, self.hovered.as_ref());

        let mut screen = Buffer::new(width, height);
        let background = Style::new(self.theme.foreground, self.theme.background);
        for y in 0..height {
            screen.fill(0, y, width, background);
        }
        screen.blit(0, 0, &frame.buffer);

        if height >= FOOTER_LINES {
            let status_style = Style::new(self.theme.foreground, self.theme.surface);
            let help_style = Style::new(self.theme.muted, self.theme.background);
            let status_y = height - FOOTER_LINES;

            screen.fill(0, status_y, width, status_style);
            let max_width = width.saturating_sub(1);
            screen.put_str(1, status_y, &self.status_line(), max_width, status_style);
            screen.put_str(1, status_y + 1, HELP, max_width, help_style);
        }

        self.frame = Some(frame);
        screen
    }

    fn status_line(&self) -> String {
        let options = self.grid.options();
        let sort = match self.grid.sort() {
            Some(sort) => format!("{} {}", sort.column_key, sort.direction.indicator()),
            None => "none".to_string(),
        };

        let mut line = format!("{} | {} | sort: {}", options.variant, options.size, sort);
        if options.editable {
            line.push_str(" | editable");
        }
        if options.disabled {
            line.push_str(" | disabled");
        }
        if !self.status.is_empty() {
            line.push_str(" | ");
            line.push_str(&self.status);
        }
        line
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::FocusLost => {
                self.grid.blur();
            }
            _ => {}
        }
        self.apply_changes();
    }

    fn handle_key(&mut self, event: KeyEvent) {
        if event.kind != KeyEventKind::Press {
            return;
        }

        let key = Key::from(event.code);
        let mods = Modifiers::from(event.modifiers);

        if mods.ctrl && key == Key::Char('c') {
            self.quit = true;
            return;
        }

        let editing = self.grid.editing().is_some();
        if !editing && mods.none() {
            match key {
                Key::Char('q') => {
                    self.quit = true;
                    return;
                }
                Key::Char('v') => {
                    let options = *self.grid.options();
                    self.grid.set_options(options.variant(options.variant.next()));
                    return;
                }
                Key::Char('s') => {
                    let options = *self.grid.options();
                    self.grid.set_options(options.size(options.size.next()));
                    return;
                }
                Key::Char('e') => {
                    let options = *self.grid.options();
                    self.grid.set_options(options.editable(!options.editable));
                    return;
                }
                Key::Char('d') => {
                    let disabled = !self.grid.is_disabled();
                    self.grid.set_disabled(disabled);
                    return;
                }
                _ => {}
            }
        }

        let result = match key {
            Key::Tab => self.grid.focus(),
            Key::BackTab => self.grid.blur(),
            _ => self.grid.key(key),
        };
        if result == EventResult::Ignored {
            debug!("Key {key:?} ignored");
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) {
        let target = self
            .frame
            .as_ref()
            .and_then(|frame| frame.hit_test(event.column, event.row))
            .cloned();

        match event.kind {
            MouseEventKind::Moved => self.hovered = target,
            MouseEventKind::Down(button) if MouseButton::from(button) == MouseButton::Left => {
                match target {
                    Some(HitTarget::Header(key)) => {
                        self.grid.click_header(&key);
                    }
                    Some(HitTarget::Cell { row, column }) => {
                        self.grid.click_cell(row, &column);
                    }
                    Some(HitTarget::RowNumber(_)) | None => {
                        self.grid.blur();
                    }
                }
            }
            _ => {}
        }
    }

    /// Write reported edits back into the owned rows and hand them to the grid.
    fn apply_changes(&mut self) {
        let pending: Vec<CellChange> = self.changes.borrow_mut().drain(..).collect();
        if pending.is_empty() {
            return;
        }

        let mut rows = self.grid.rows().to_vec();
        for change in &pending {
            let Some(row) = rows.get_mut(change.source_row) else {
                continue;
            };

            let cell = match row.get(&change.column) {
                Some(previous) => Cell::new(coerce_like(&previous.value, &change.value))
                    .editable(previous.editable),
                None => Cell::new(change.value.as_str()),
            };
            row.insert(change.column.as_str(), cell);

            info!(
                "Row {} {} set to {:?}",
                change.row + 1,
                change.column,
                change.value
            );
            self.status = format!("row {} {} = {}", change.row + 1, change.column, change.value);
        }

        self.grid.set_rows(rows);
    }
}

/// Keep numeric cells numeric when the new text parses as a number.
fn coerce_like(previous: &CellValue, text: &str) -> CellValue {
    match previous {
        CellValue::Number(_) => match text.trim().parse::<f64>() {
            Ok(n) => CellValue::Number(n),
            Err(_) => CellValue::from(text),
        },
        CellValue::Text(_) => CellValue::from(text),
    }
}
