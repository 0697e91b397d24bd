//! One-time-passcode state for the GAUTH verification service.
//!
//! Three pieces, each keyed by requester id:
//! - [`OtpStore`]: at most one live challenge per requester, lazy expiry.
//! - [`AttemptTracker`]: consecutive wrong-submission counter with an
//!   independent lifecycle from the challenge itself.
//! - [`CodeGenerator`]: 6-digit code source, pluggable so tests can inject
//!   deterministic codes.

pub mod attempts;
pub mod code;
pub mod store;

pub use attempts::AttemptTracker;
pub use code::{CodeGenerator, RandomCodes};
pub use store::{Challenge, OtpStore};
