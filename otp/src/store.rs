//! Challenge store — at most one live OTP challenge per requester.
//!
//! Expiry is lazy: an expired entry is purged the moment a `peek` touches
//! it. No background sweep is required for correctness; the engine's idle
//! cleanup covers memory hygiene under churn.

use gauth_types::{MemberRecord, RequesterId, Timestamp};
use std::collections::HashMap;
use std::sync::Mutex;

/// A single issued OTP challenge with its binding metadata and expiry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Challenge {
    /// 6-digit numeric code, zero-padded.
    pub code: String,
    /// Email the code was delivered to.
    pub email: String,
    /// Roster full name bound at issue time.
    pub full_name: String,
    /// Roster student id bound at issue time.
    pub student_id: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl Challenge {
    /// A challenge is live strictly before its expiry instant.
    pub fn is_live(&self, now: Timestamp) -> bool {
        now < self.expires_at
    }
}

/// Keyed challenge map guarded by a single mutex.
///
/// Operations are O(1) map touches, so one coarse lock is enough; the
/// engine's per-requester session locks provide the cross-operation
/// serialization the state machine needs.
#[derive(Default)]
pub struct OtpStore {
    by_requester: Mutex<HashMap<RequesterId, Challenge>>,
}

impl OtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a challenge, unconditionally replacing any prior one for the
    /// same requester (no stacking).
    pub fn issue(
        &self,
        requester: RequesterId,
        code: String,
        member: &MemberRecord,
        ttl_secs: u64,
        now: Timestamp,
    ) {
        let challenge = Challenge {
            code,
            email: member.email.clone(),
            full_name: member.full_name.clone(),
            student_id: member.student_id.clone(),
            created_at: now,
            expires_at: now.saturating_add_secs(ttl_secs),
        };
        self.by_requester
            .lock()
            .expect("otp store lock poisoned")
            .insert(requester, challenge);
    }

    /// Fetch the live challenge for a requester.
    ///
    /// An entry at or past its expiry is treated as absent and removed.
    pub fn peek(&self, requester: RequesterId, now: Timestamp) -> Option<Challenge> {
        let mut map = self.by_requester.lock().expect("otp store lock poisoned");
        match map.get(&requester) {
            Some(entry) if entry.is_live(now) => Some(entry.clone()),
            Some(_) => {
                map.remove(&requester);
                None
            }
            None => None,
        }
    }

    /// Remove any challenge for a requester. Idempotent.
    pub fn clear(&self, requester: RequesterId) {
        self.by_requester
            .lock()
            .expect("otp store lock poisoned")
            .remove(&requester);
    }
}
