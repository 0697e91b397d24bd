//! Out-of-band code delivery.
//!
//! The engine only needs "deliver this code to this address, and tell me
//! whether a failure is worth the user retrying." Transport details live
//! behind the [`Notifier`] trait; the shipped implementation posts to an
//! HTTP mail API.

pub mod error;
pub mod http;

pub use error::NotifyError;
pub use http::HttpNotifier;

use std::future::Future;

/// Code delivery interface consumed by the engine.
pub trait Notifier: Send + Sync {
    /// Deliver `code` to `to_email`, addressing the member by `full_name`.
    fn send(
        &self,
        to_email: &str,
        code: &str,
        full_name: &str,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

impl<T: Notifier> Notifier for std::sync::Arc<T> {
    fn send(
        &self,
        to_email: &str,
        code: &str,
        full_name: &str,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send {
        self.as_ref().send(to_email, code, full_name)
    }
}
