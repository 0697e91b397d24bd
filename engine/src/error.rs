//! Engine error types.
//!
//! Everything user-correctable is an outcome, not an error; these are the
//! faults the adapter can only log and surface generically.

use gauth_audit::AuditError;
use gauth_directory::DirectoryError;
use gauth_platform::PlatformError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("directory lookup failed: {0}")]
    Directory(#[from] DirectoryError),

    #[error("audit log failure: {0}")]
    Audit(#[from] AuditError),

    #[error("unexpected platform failure: {0}")]
    Platform(PlatformError),
}
