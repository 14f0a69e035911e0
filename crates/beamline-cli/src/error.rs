use beamline::core::io::line::LineFileError;
use beamline::core::models::table::TableError;
use beamline::engine::error::SequenceError;
use beamline::sequences::twiss::TwissError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error(transparent)]
    LineFile(#[from] LineFileError),

    #[error(transparent)]
    Twiss(#[from] TwissError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to write table: {0}")]
    Table(#[from] TableError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
