//! Nullable directory — an in-memory roster.

use gauth_directory::{Directory, DirectoryError};
use gauth_types::MemberRecord;

/// Directory backed by a fixed set of records, matched with the same
/// rules as the real roster (exact student id, case-insensitive email).
pub struct NullDirectory {
    members: Vec<MemberRecord>,
}

impl NullDirectory {
    pub fn new(members: Vec<MemberRecord>) -> Self {
        Self { members }
    }

    /// A directory that never finds anyone.
    pub fn empty() -> Self {
        Self { members: Vec::new() }
    }
}

impl Directory for NullDirectory {
    fn find(&self, identifier: &str) -> Result<Option<MemberRecord>, DirectoryError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Ok(None);
        }
        if let Some(hit) = self.members.iter().find(|m| m.student_id == identifier) {
            return Ok(Some(hit.clone()));
        }
        let identifier_lower = identifier.to_lowercase();
        Ok(self
            .members
            .iter()
            .find(|m| m.email.to_lowercase() == identifier_lower)
            .cloned())
    }
}
