//! Verification engine — the OTP verification state machine.
//!
//! Per requester session: `NO_CHALLENGE → CHALLENGE_ISSUED → {VERIFIED,
//! LOCKED_OUT}`. Terminal states only bind the current challenge; a fresh
//! `start` always re-enters `CHALLENGE_ISSUED`.
//!
//! The engine orchestrates the external collaborators (directory,
//! notifier, platform binding) and the shared stores (challenges,
//! attempts, audit). Every recoverable condition becomes a typed outcome;
//! only genuinely unexpected faults surface as [`EngineError`].

pub mod engine;
pub mod error;
pub mod nickname;
pub mod outcome;
pub mod session;

pub use engine::VerificationEngine;
pub use error::EngineError;
pub use nickname::nickname_from_full_name;
pub use outcome::{StartOutcome, SubmitOutcome};
pub use session::SessionLocks;
