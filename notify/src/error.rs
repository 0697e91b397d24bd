//! Notifier error classification.
//!
//! The engine never retries permanent failures (a bad address needs a
//! roster correction, not another attempt); transient failures may be
//! retried by the user immediately via a fresh `start`.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NotifyError {
    /// Permanent: the destination address is invalid or rejected.
    #[error("invalid or unregistered email address: {0}")]
    InvalidAddress(String),

    /// Transient: delivery failed but a retry may succeed.
    #[error("code delivery failed: {0}")]
    Delivery(String),
}

impl NotifyError {
    pub fn is_permanent(&self) -> bool {
        matches!(self, NotifyError::InvalidAddress(_))
    }
}
