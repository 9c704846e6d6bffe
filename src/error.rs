//! Error types for table loading, mutation and serialization

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the table store, loader and writer
#[derive(Debug, Error)]
pub enum Error {
    /// The input file could not be opened or a line could not be read
    #[error("failed to read {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Creating, writing or closing an output file failed
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A named-column append was attempted on a table without a header
    #[error("cannot append by column name: table has no header")]
    NoHeader,

    /// A named-column append referenced a column missing from the header
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// A named-column append listed the same column twice
    #[error("column given more than once: {0}")]
    DuplicateColumn(String),

    /// A configuration file could not be read
    #[error("failed to read configuration {}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A configuration file is not valid JSON for [`Config`](crate::Config)
    #[error("invalid configuration {}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
