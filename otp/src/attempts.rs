//! Wrong-submission counter, keyed by requester.
//!
//! The counter's lifecycle is deliberately independent from the challenge:
//! it is cleared on lockout, on success, and when a fresh challenge is
//! issued — never merely because a challenge expired.

use gauth_types::RequesterId;
use std::collections::HashMap;
use std::sync::Mutex;

/// Per-requester non-negative attempt counter.
///
/// `increment` is a single read-modify-write under the lock; undercounting
/// here would let an attacker exceed the wrong-attempt budget.
#[derive(Default)]
pub struct AttemptTracker {
    counts: Mutex<HashMap<RequesterId, u32>>,
}

impl AttemptTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically increment and return the new count. First call for a
    /// fresh requester returns 1.
    pub fn increment(&self, requester: RequesterId) -> u32 {
        let mut counts = self.counts.lock().expect("attempt tracker lock poisoned");
        let count = counts.entry(requester).or_insert(0);
        *count += 1;
        *count
    }

    /// Current count, 0 if absent.
    pub fn get(&self, requester: RequesterId) -> u32 {
        self.counts
            .lock()
            .expect("attempt tracker lock poisoned")
            .get(&requester)
            .copied()
            .unwrap_or(0)
    }

    /// Reset to absent (logically 0). Idempotent.
    pub fn clear(&self, requester: RequesterId) {
        self.counts
            .lock()
            .expect("attempt tracker lock poisoned")
            .remove(&requester);
    }
}
