//! Fundamental types for the GAUTH verification service.
//!
//! This crate defines the types shared across every other crate in the
//! workspace: requester identities, member records, timestamps, and the
//! operator-tunable verification parameters.

pub mod member;
pub mod params;
pub mod requester;
pub mod time;

pub use member::MemberRecord;
pub use params::VerifyParams;
pub use requester::{Requester, RequesterId};
pub use time::Timestamp;
