use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Rgb, Style};

/// Visual color scheme of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Primary,
    Secondary,
    Success,
    Warning,
    Danger,
}

impl Variant {
    pub const ALL: [Variant; 5] = [
        Variant::Primary,
        Variant::Secondary,
        Variant::Success,
        Variant::Warning,
        Variant::Danger,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    /// The next variant in [`Variant::ALL`], wrapping around.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|v| *v == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Accent color in OKLCH.
    fn accent(self) -> Rgb {
        match self {
            Self::Primary => Rgb::oklch(0.62, 0.19, 260.0),
            Self::Secondary => Rgb::oklch(0.55, 0.04, 260.0),
            Self::Success => Rgb::oklch(0.65, 0.17, 150.0),
            Self::Warning => Rgb::oklch(0.75, 0.16, 70.0),
            Self::Danger => Rgb::oklch(0.60, 0.21, 25.0),
        }
    }

    /// Resolve the style table for this variant.
    pub fn style(self) -> VariantStyle {
        let theme = Theme::default();
        let accent = self.accent();

        VariantStyle {
            header: Style::new(theme.foreground, accent).bold(),
            cell: Style::new(theme.foreground, theme.background),
            border: accent.mix(theme.background, 0.8),
            selected: Style::new(theme.foreground, accent.mix(theme.background, 0.55)).bold(),
            hover: Style::new(theme.foreground, accent.mix(theme.background, 0.95)),
            row_number: Style::new(theme.muted, theme.surface).bold(),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown variant '{s}'"))
    }
}

/// Cell density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl GridSize {
    pub const ALL: [GridSize; 3] = [GridSize::Sm, GridSize::Md, GridSize::Lg];

    pub fn name(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Sm => Self::Md,
            Self::Md => Self::Lg,
            Self::Lg => Self::Sm,
        }
    }

    /// Horizontal padding on each side of cell text.
    pub fn padding_x(self) -> u16 {
        match self {
            Self::Sm => 1,
            Self::Md => 2,
            Self::Lg => 3,
        }
    }

    /// Blank lines above and below cell text.
    pub fn padding_y(self) -> u16 {
        match self {
            Self::Sm | Self::Md => 0,
            Self::Lg => 1,
        }
    }

    /// Column content width when a column sets none.
    pub fn default_column_width(self) -> u16 {
        match self {
            Self::Sm => 10,
            Self::Md => 14,
            Self::Lg => 18,
        }
    }

    /// Total height of one row including vertical padding.
    pub fn row_height(self) -> u16 {
        1 + 2 * self.padding_y()
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GridSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown size '{s}'"))
    }
}

/// Styles for each part of the grid under one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantStyle {
    pub header: Style,
    pub cell: Style,
    /// Separator color between cells.
    pub border: Rgb,
    pub selected: Style,
    pub hover: Style,
    pub row_number: Style,
}

/// Base palette shared by all variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgb,
    pub foreground: Rgb,
    pub surface: Rgb,
    pub muted: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Rgb::oklch(0.18, 0.0, 0.0),
            foreground: Rgb::oklch(0.97, 0.0, 0.0),
            surface: Rgb::oklch(0.24, 0.0, 0.0),
            muted: Rgb::oklch(0.65, 0.0, 0.0),
        }
    }
}
