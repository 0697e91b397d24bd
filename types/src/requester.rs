//! Requester identity — the platform-assigned end user attempting verification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A platform user id (numeric snowflake).
///
/// Challenges, attempt counters, and session locks are all keyed by this id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequesterId(u64);

impl RequesterId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequesterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RequesterId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// A requester as seen by the engine: platform id plus the display name the
/// platform currently shows for them (used in audit records).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    pub id: RequesterId,
    pub display_name: String,
}

impl Requester {
    pub fn new(id: impl Into<RequesterId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}
