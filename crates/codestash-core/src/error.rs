use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodestashError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No snippet matched the token by id or title.
    #[error("Snippet '{0}' not found")]
    NotFound(String),

    /// The store file exists but is not a JSON array of snippets.
    #[error("Snippet store at {} is corrupt: {source}", .path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Validation(String),

    #[error("Unknown field '{field}'. Valid fields: {valid}")]
    UnknownField { field: String, valid: String },

    #[error("Snippet '{0}' is not marked as executable")]
    NotExecutable(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Unsupported platform: {0}")]
    PlatformUnsupported(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

pub type Result<T> = std::result::Result<T, CodestashError>;
