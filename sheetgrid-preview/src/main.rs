mod app;
mod cli;
mod data;
mod error;
mod paths;
mod terminal;

use std::fs::File;

use clap::Parser;
use log::info;
use simplelog::{Config, WriteLogger};

use crate::app::App;
use crate::cli::Args;
use crate::data::GridData;
use crate::error::Result;

fn init_logging(args: &Args) -> Result<()> {
    paths::rotate_logs();
    let path = paths::log_file();
    let file = File::create(&path)?;
    WriteLogger::init(args.log_level, Config::default(), file)?;
    info!("Logging to {}", path.display());
    Ok(())
}

fn run(args: Args) -> Result<()> {
    init_logging(&args)?;

    let data = GridData::load(args.data.as_deref());
    App::new(data, args.grid_options())?.run()
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        log::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
