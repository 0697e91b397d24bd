//! Audit record shape — one immutable entry per terminal outcome.

use gauth_types::Requester;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    Success,
    Failure,
}

/// A single verification outcome, as persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// ISO-8601 timestamp.
    pub timestamp: String,
    pub requester_id: u64,
    pub requester_display_name: String,
    pub full_name: String,
    pub student_id: String,
    pub email: String,
    pub status: AuditStatus,
    /// Failure reason; absent on success records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl VerificationRecord {
    /// Build a success record stamped with the current UTC time.
    pub fn success(requester: &Requester, full_name: &str, student_id: &str, email: &str) -> Self {
        Self::stamped(requester, full_name, student_id, email, AuditStatus::Success, None)
    }

    /// Build a failure record stamped with the current UTC time.
    pub fn failure(
        requester: &Requester,
        full_name: &str,
        student_id: &str,
        email: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::stamped(
            requester,
            full_name,
            student_id,
            email,
            AuditStatus::Failure,
            Some(reason.into()),
        )
    }

    fn stamped(
        requester: &Requester,
        full_name: &str,
        student_id: &str,
        email: &str,
        status: AuditStatus,
        reason: Option<String>,
    ) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            requester_id: requester.id.as_u64(),
            requester_display_name: requester.display_name.clone(),
            full_name: full_name.to_string(),
            student_id: student_id.to_string(),
            email: email.to_string(),
            status,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_record_has_no_reason_field() {
        let r = VerificationRecord::success(
            &Requester::new(1u64, "user#1"),
            "Nguyen Van A",
            "SV001",
            "a@example.com",
        );
        let json = serde_json::to_string(&r).unwrap();
        assert!(!json.contains("reason"));
        assert!(json.contains(r#""status":"success""#));
    }

    #[test]
    fn failure_record_roundtrips_reason() {
        let r = VerificationRecord::failure(
            &Requester::new(1u64, "user#1"),
            "Nguyen Van A",
            "SV001",
            "a@example.com",
            "exceeded 5 wrong attempts",
        );
        let json = serde_json::to_string(&r).unwrap();
        let back: VerificationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.reason.as_deref(), Some("exceeded 5 wrong attempts"));
        assert_eq!(back.status, AuditStatus::Failure);
    }

    #[test]
    fn timestamp_is_iso8601() {
        let r = VerificationRecord::success(&Requester::new(1u64, "u"), "n", "s", "e");
        assert!(chrono::DateTime::parse_from_rfc3339(&r.timestamp).is_ok());
    }
}
