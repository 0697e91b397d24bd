//! Chat platform binding.
//!
//! The engine needs exactly three things from the platform: "does this
//! requester already hold the verified role," "grant the verified role,"
//! and "change the display name" (cosmetic, best-effort). Everything else
//! about the platform — UI, events, latency rules — stays outside.

pub mod error;
pub mod rest;

pub use error::PlatformError;
pub use rest::RestPlatform;

use gauth_types::RequesterId;
use std::future::Future;

/// Platform actions consumed by the engine.
///
/// `grant_role` distinguishes a permission refusal
/// ([`PlatformError::Forbidden`]) from transport or API faults; the engine
/// treats the former as an operational outcome and the latter as an
/// unexpected error.
pub trait PlatformBinding: Send + Sync {
    /// Whether the requester already holds the verified role.
    fn has_role(
        &self,
        requester: RequesterId,
    ) -> impl Future<Output = Result<bool, PlatformError>> + Send;

    /// Grant the verified role.
    fn grant_role(
        &self,
        requester: RequesterId,
    ) -> impl Future<Output = Result<(), PlatformError>> + Send;

    /// Set the requester's display name. Best-effort; callers swallow
    /// failures.
    fn set_display_name(
        &self,
        requester: RequesterId,
        name: &str,
    ) -> impl Future<Output = Result<(), PlatformError>> + Send;
}

impl<T: PlatformBinding> PlatformBinding for std::sync::Arc<T> {
    fn has_role(
        &self,
        requester: RequesterId,
    ) -> impl Future<Output = Result<bool, PlatformError>> + Send {
        self.as_ref().has_role(requester)
    }

    fn grant_role(
        &self,
        requester: RequesterId,
    ) -> impl Future<Output = Result<(), PlatformError>> + Send {
        self.as_ref().grant_role(requester)
    }

    fn set_display_name(
        &self,
        requester: RequesterId,
        name: &str,
    ) -> impl Future<Output = Result<(), PlatformError>> + Send {
        self.as_ref().set_display_name(requester, name)
    }
}
