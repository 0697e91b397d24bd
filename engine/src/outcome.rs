//! Typed outcomes returned to the platform adapter.

use gauth_notify::NotifyError;

/// Result of a `start` (identifier submission) event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    /// A code was issued and delivered to this email.
    Sent { email: String },
    /// No roster member matches the identifier. User-correctable; no state
    /// change, no audit entry.
    NotFound,
    /// Delivery failed; the issued challenge has been rolled back so no
    /// valid-but-undelivered code remains.
    NotifyFailed { error: NotifyError },
}

/// Result of a `submit` (code submission) event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Code mismatch with budget remaining.
    Wrong { remaining: u32 },
    /// Wrong-attempt budget exhausted: challenge and counter cleared,
    /// failure audited. Terminal for this session.
    LockedOut,
    /// Code matched and the role was granted. Terminal; exactly one
    /// success audit entry was appended.
    Verified { nickname: Option<String> },
    /// No live challenge (never issued, consumed, or expired). Not a
    /// security event; the user should request a new code.
    Expired,
    /// The platform reports the requester already holds the verified role.
    /// The challenge is left untouched and nothing is audited.
    AlreadyVerified,
    /// The platform refused the role grant. The identity was proven, so
    /// this is an operational error, not a verification failure: stores
    /// are untouched and nothing is audited.
    GrantDenied,
}
