//! Nullable platform binding — programmable role state.

use gauth_platform::{PlatformBinding, PlatformError};
use gauth_types::RequesterId;
use std::collections::HashSet;
use std::sync::Mutex;

/// How the nullable platform responds to `grant_role`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GrantBehavior {
    Grant,
    Forbid,
    Fail,
}

/// Platform binding with an in-memory role set.
pub struct NullPlatform {
    grant_behavior: GrantBehavior,
    nickname_forbidden: bool,
    holders: Mutex<HashSet<RequesterId>>,
    nicknames: Mutex<Vec<(RequesterId, String)>>,
}

impl NullPlatform {
    /// A platform that grants roles and accepts nickname changes.
    pub fn permissive() -> Self {
        Self {
            grant_behavior: GrantBehavior::Grant,
            nickname_forbidden: false,
            holders: Mutex::new(HashSet::new()),
            nicknames: Mutex::new(Vec::new()),
        }
    }

    pub fn with_grant_behavior(behavior: GrantBehavior) -> Self {
        Self {
            grant_behavior: behavior,
            ..Self::permissive()
        }
    }

    /// A permissive platform that refuses nickname changes (cosmetic
    /// failures must be swallowed by callers).
    pub fn nickname_forbidden() -> Self {
        Self {
            nickname_forbidden: true,
            ..Self::permissive()
        }
    }

    /// Pre-grant the role, as if the requester verified earlier.
    pub fn seed_role(&self, requester: RequesterId) {
        self.holders.lock().unwrap().insert(requester);
    }

    pub fn holds_role(&self, requester: RequesterId) -> bool {
        self.holders.lock().unwrap().contains(&requester)
    }

    /// Nickname changes applied, in order.
    pub fn nicknames(&self) -> Vec<(RequesterId, String)> {
        self.nicknames.lock().unwrap().clone()
    }
}

impl PlatformBinding for NullPlatform {
    async fn has_role(&self, requester: RequesterId) -> Result<bool, PlatformError> {
        Ok(self.holds_role(requester))
    }

    async fn grant_role(&self, requester: RequesterId) -> Result<(), PlatformError> {
        match self.grant_behavior {
            GrantBehavior::Grant => {
                self.holders.lock().unwrap().insert(requester);
                Ok(())
            }
            GrantBehavior::Forbid => Err(PlatformError::Forbidden),
            GrantBehavior::Fail => Err(PlatformError::Transport("null platform down".into())),
        }
    }

    async fn set_display_name(&self, requester: RequesterId, name: &str) -> Result<(), PlatformError> {
        if self.nickname_forbidden {
            return Err(PlatformError::Forbidden);
        }
        self.nicknames
            .lock()
            .unwrap()
            .push((requester, name.to_string()));
        Ok(())
    }
}
