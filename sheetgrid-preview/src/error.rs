use std::path::PathBuf;

use sheetgrid::GridError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PreviewError>;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read {path}: {source}")]
    ReadData {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid data in {path}: {source}")]
    ParseData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("failed to initialize logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}
