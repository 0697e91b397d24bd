//! Nullable notifier — records deliveries, fails on demand.

use gauth_notify::{Notifier, NotifyError};
use std::sync::Mutex;

/// A message the nullable notifier "delivered".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentMessage {
    pub to: String,
    pub code: String,
    pub full_name: String,
}

/// Notifier that records every send and can be told to fail.
pub struct NullNotifier {
    failure: Option<NotifyError>,
    sent: Mutex<Vec<SentMessage>>,
}

impl NullNotifier {
    /// A notifier that always succeeds.
    pub fn working() -> Self {
        Self {
            failure: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// A notifier that always fails with the given error.
    pub fn failing(error: NotifyError) -> Self {
        Self {
            failure: Some(error),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Messages successfully "delivered" so far.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for NullNotifier {
    async fn send(&self, to_email: &str, code: &str, full_name: &str) -> Result<(), NotifyError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.sent.lock().unwrap().push(SentMessage {
            to: to_email.to_string(),
            code: code.to_string(),
            full_name: full_name.to_string(),
        });
        Ok(())
    }
}
