//! Colors and the closed variant/size style table.

mod color;
mod variant;

pub use color::Rgb;
pub use variant::{GridSize, Theme, Variant, VariantStyle};

/// Text attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub dim: bool,
    pub underline: bool,
}

impl TextStyle {
    pub const fn new() -> Self {
        Self {
            bold: false,
            dim: false,
            underline: false,
        }
    }
}

/// Foreground, background and attributes of a span of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Rgb,
    pub bg: Rgb,
    pub text: TextStyle,
}

impl Style {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            text: TextStyle::new(),
        }
    }

    pub fn fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    pub fn bold(mut self) -> Self {
        self.text.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.text.dim = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.text.underline = true;
        self
    }
}
