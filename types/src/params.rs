//! Operator-tunable verification parameters.

use serde::{Deserialize, Serialize};

/// Default challenge time-to-live: five minutes.
pub const DEFAULT_OTP_TTL_SECS: u64 = 300;

/// Default wrong-attempt budget per OTP session.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Operator-facing bounds on the wrong-attempt budget.
pub const MIN_MAX_ATTEMPTS: u32 = 1;
pub const MAX_MAX_ATTEMPTS: u32 = 10;

/// Parameters governing a verification deployment.
///
/// The engine itself accepts any positive attempt budget from its caller;
/// the clamp applies only at the operator-facing configuration surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyParams {
    /// Challenge time-to-live in seconds.
    pub otp_ttl_secs: u64,
    /// Maximum wrong submissions before lockout.
    pub max_attempts: u32,
}

impl VerifyParams {
    /// Build params with the attempt budget clamped to the operator range.
    pub fn clamped(otp_ttl_secs: u64, max_attempts: u32) -> Self {
        Self {
            otp_ttl_secs,
            max_attempts: max_attempts.clamp(MIN_MAX_ATTEMPTS, MAX_MAX_ATTEMPTS),
        }
    }
}

impl Default for VerifyParams {
    fn default() -> Self {
        Self {
            otp_ttl_secs: DEFAULT_OTP_TTL_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}
