use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Load failures for locally saved game files.
///
/// Every variant is recoverable: callers log it and continue with an
/// empty or partial collection.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The input file does not exist.
    #[error("game file not found: {0}")]
    FileNotFound(PathBuf),

    /// The file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file contents are not a valid game document.
    #[error("invalid game JSON in {path}: {source}")]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
