use std::path::PathBuf;

use thiserror::Error;

use crate::mt::MtError;

/// Everything that can abort a translation run.
///
/// No variant is recoverable per entry: the merged table is written once at
/// the end, so any error leaves the target file untouched.
#[derive(Debug, Error)]
pub enum Error {
    /// The source-language table does not exist.
    #[error("Source table not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A table file line that is neither an entry nor array scaffolding.
    #[error("Malformed table '{}' at line {line}: {message}", path.display())]
    MalformedTable {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error(transparent)]
    Translation(#[from] MtError),

    #[error("Confirmation prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
