use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event},
    execute, queue,
    style::{Attribute, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};
use sheetgrid::Buffer;
use sheetgrid::style::TextStyle;
use sheetgrid::text::char_width;

/// Raw-mode alternate screen that redraws only the cells that changed.
pub struct Terminal {
    stdout: io::Stdout,
    previous: Buffer,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        // Until setup completes, an early return must hand the shell back.
        let setup = Rollback::new(|| restore(&mut io::stdout()));
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;
        setup.disarm();
        Ok(Self {
            stdout,
            previous: Buffer::new(width, height),
        })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Wait up to `timeout` for input, then drain whatever else is pending.
    pub fn poll(&self, timeout: Duration) -> io::Result<Vec<Event>> {
        let mut events = Vec::new();
        if event::poll(timeout)? {
            events.push(event::read()?);
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }
        }
        Ok(events)
    }

    /// Draw `buffer`, writing only cells that differ from the last draw.
    pub fn draw(&mut self, buffer: Buffer) -> io::Result<()> {
        if buffer.width() != self.previous.width() || buffer.height() != self.previous.height() {
            self.previous = Buffer::new(buffer.width(), buffer.height());
            execute!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        }

        self.flush_diff(&buffer)?;
        self.previous = buffer;
        Ok(())
    }

    fn flush_diff(&mut self, current: &Buffer) -> io::Result<()> {
        let mut last_x = u16::MAX;
        let mut last_y = u16::MAX;
        let mut last_char_width: u16 = 1;
        let mut last_fg = None;
        let mut last_bg = None;
        let mut last_text = TextStyle::new();

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;

        for (x, y, cell) in current.diff(&self.previous) {
            if cell.wide_continuation {
                continue;
            }

            if y != last_y || x != last_x.wrapping_add(last_char_width) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }

            if last_fg != Some(cell.style.fg) {
                queue!(self.stdout, SetForegroundColor(cell.style.fg.into()))?;
                last_fg = Some(cell.style.fg);
            }
            if last_bg != Some(cell.style.bg) {
                queue!(self.stdout, SetBackgroundColor(cell.style.bg.into()))?;
                last_bg = Some(cell.style.bg);
            }

            let text = cell.style.text;
            if text != last_text {
                // Bold and dim share NormalIntensity, so reset and reapply.
                queue!(self.stdout, SetAttribute(Attribute::Reset))?;
                if let Some(fg) = last_fg {
                    queue!(self.stdout, SetForegroundColor(fg.into()))?;
                }
                if let Some(bg) = last_bg {
                    queue!(self.stdout, SetBackgroundColor(bg.into()))?;
                }
                for (on, attr) in [
                    (text.bold, Attribute::Bold),
                    (text.dim, Attribute::Dim),
                    (text.underline, Attribute::Underlined),
                ] {
                    if on {
                        queue!(self.stdout, SetAttribute(attr))?;
                    }
                }
                last_text = text;
            }

            write!(self.stdout, "{}", cell.char)?;

            last_x = x;
            last_y = y;
            last_char_width = char_width(cell.char).max(1) as u16;
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore(&mut self.stdout);
    }
}

fn restore(stdout: &mut io::Stdout) {
    let _ = execute!(
        stdout,
        event::DisableMouseCapture,
        cursor::Show,
        terminal::LeaveAlternateScreen
    );
    let _ = terminal::disable_raw_mode();
}

/// Runs `undo` when dropped, unless disarmed first.
struct Rollback<F: FnOnce()> {
    undo: Option<F>,
}

impl<F: FnOnce()> Rollback<F> {
    fn new(undo: F) -> Self {
        Self { undo: Some(undo) }
    }

    fn disarm(mut self) {
        self.undo = None;
    }
}

impl<F: FnOnce()> Drop for Rollback<F> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            undo();
        }
    }
}
