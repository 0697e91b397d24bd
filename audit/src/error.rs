//! Audit log error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit log I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("audit record encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}
