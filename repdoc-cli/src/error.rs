//! Errors surfaced by the `repdoc` binary.

use config::ConfigError;
use repdoc_babel::FormatError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// The input file does not exist. Reported apart from every other failure.
    #[error("File '{}' not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("Error reading file '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Error writing file '{}': {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("Could not detect format from filename '{0}'. Please specify --from explicitly")]
    UnknownFormat(String),

    #[error("Invalid value '{value}' for --extra-{flag}: {reason}")]
    InvalidOption {
        flag: String,
        value: String,
        reason: String,
    },
}

impl CliError {
    /// Map an I/O failure on the input file, keeping "not found" apart.
    pub fn reading(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            CliError::InputNotFound(path)
        } else {
            CliError::Read { path, source }
        }
    }
}
