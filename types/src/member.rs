//! Member records from the external roster directory.

use serde::{Deserialize, Serialize};

/// A single member as registered in the roster.
///
/// Owned by the directory; the rest of the system only reads it. The email
/// is stored lowercased so identifier matching stays case-insensitive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub full_name: String,
    pub student_id: String,
    pub email: String,
    pub birthdate: String,
}

impl MemberRecord {
    /// Build a record with each field trimmed and the email lowercased.
    pub fn normalized(
        full_name: &str,
        student_id: &str,
        email: &str,
        birthdate: &str,
    ) -> Self {
        Self {
            full_name: full_name.trim().to_string(),
            student_id: student_id.trim().to_string(),
            email: email.trim().to_lowercase(),
            birthdate: birthdate.trim().to_string(),
        }
    }
}
