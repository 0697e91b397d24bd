//! Per-requester session locks.
//!
//! `start` and `submit` for the same requester must be serialized relative
//! to each other; different requesters must not block each other. A keyed
//! map of async mutexes gives exactly that, with idle locks reclaimed once
//! nobody holds a handle.

use gauth_types::RequesterId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Keyed async mutexes, one per requester with in-flight work.
#[derive(Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<RequesterId, Arc<Mutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the lock for a requester. The caller locks the
    /// returned handle for the duration of the session operation.
    pub async fn acquire(&self, requester: RequesterId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(requester)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Number of requesters with a lock entry.
    pub async fn active(&self) -> usize {
        self.locks.lock().await.len()
    }

    /// Drop lock entries nobody is holding. Purely memory hygiene; expiry
    /// of challenges is handled by the OTP store.
    pub async fn cleanup(&self) {
        let mut locks = self.locks.lock().await;
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }
}
