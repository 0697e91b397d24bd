//! Directory error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("roster file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed roster entry at line {line}: {source}")]
    Malformed {
        line: usize,
        source: serde_json::Error,
    },
}
