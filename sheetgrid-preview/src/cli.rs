use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use sheetgrid::{GridOptions, GridSize, Variant};

/// Interactive preview of the spreadsheet grid.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON file with `columns` and `rows`; built-in sample data when omitted
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Color variant (primary, secondary, success, warning, danger)
    #[arg(long, default_value = "primary")]
    pub variant: Variant,

    /// Density (sm, md, lg)
    #[arg(long, default_value = "md")]
    pub size: GridSize,

    /// Allow editing cells
    #[arg(long)]
    pub editable: bool,

    /// Start with the grid disabled
    #[arg(long)]
    pub disabled: bool,

    /// Hide the row-number column
    #[arg(long)]
    pub no_row_numbers: bool,

    /// Log file verbosity
    #[arg(long, default_value = "info", value_name = "LEVEL")]
    pub log_level: LevelFilter,
}

impl Args {
    pub fn grid_options(&self) -> GridOptions {
        GridOptions::new()
            .variant(self.variant)
            .size(self.size)
            .editable(self.editable)
            .disabled(self.disabled)
            .show_row_numbers(!self.no_row_numbers)
    }
}
