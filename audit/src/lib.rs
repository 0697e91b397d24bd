//! Durable audit log of terminal verification outcomes.
//!
//! Success and lockout records are appended as one JSON object per line,
//! never mutated, never deleted. The query surface is a handful of
//! summary reads used by the operator stats endpoint.

pub mod error;
pub mod log;
pub mod record;

pub use error::AuditError;
pub use log::AuditLog;
pub use record::{AuditStatus, VerificationRecord};
