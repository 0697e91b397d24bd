//! Platform binding error types.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform refused the action for permission reasons.
    #[error("platform denied the action: insufficient permissions")]
    Forbidden,

    /// The platform answered with an unexpected status or body.
    #[error("platform API error: {0}")]
    Api(String),

    /// The platform could not be reached.
    #[error("platform unreachable: {0}")]
    Transport(String),
}
