//! Request handlers and wire types.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use gauth_directory::Directory;
use gauth_engine::{EngineError, StartOutcome, SubmitOutcome, VerificationEngine};
use gauth_notify::Notifier;
use gauth_platform::PlatformBinding;
use gauth_types::Requester;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared state handed to every handler.
pub struct AppState<D, N, P> {
    pub engine: VerificationEngine<D, N, P>,
}

// ── Verification ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct StartRequest {
    pub requester_id: u64,
    pub display_name: String,
    pub identifier: String,
}

#[derive(Deserialize)]
pub struct SubmitRequest {
    pub requester_id: u64,
    pub display_name: String,
    pub code: String,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct VerifyResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub message: String,
}

impl VerifyResponse {
    fn bare(status: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            email: None,
            remaining: None,
            nickname: None,
            message: message.into(),
        }
    }
}

/// Map a `start` outcome to its user-presentable response.
pub fn start_response(outcome: StartOutcome) -> VerifyResponse {
    match outcome {
        StartOutcome::Sent { email } => {
            let message = format!("A verification code was sent to {email}.");
            VerifyResponse {
                email: Some(email),
                ..VerifyResponse::bare("sent", message)
            }
        }
        StartOutcome::NotFound => VerifyResponse::bare(
            "not_found",
            "No matching member found. Check your student id or email.",
        ),
        StartOutcome::NotifyFailed { error } => {
            // Permanent errors are surfaced verbatim (the address needs a
            // roster correction); transient ones stay generic.
            if error.is_permanent() {
                VerifyResponse::bare("notify_failed", error.to_string())
            } else {
                VerifyResponse::bare(
                    "notify_failed",
                    "Could not deliver the code. Please try again shortly.",
                )
            }
        }
    }
}

/// Map a `submit` outcome to its user-presentable response.
pub fn submit_response(outcome: SubmitOutcome) -> VerifyResponse {
    match outcome {
        SubmitOutcome::Wrong { remaining } => {
            let message = format!("Wrong code. {remaining} attempts left.");
            VerifyResponse {
                remaining: Some(remaining),
                ..VerifyResponse::bare("wrong", message)
            }
        }
        SubmitOutcome::LockedOut => VerifyResponse::bare(
            "locked_out",
            "Too many wrong codes. This session is locked; contact support or start over.",
        ),
        SubmitOutcome::Verified { nickname } => {
            let message = match &nickname {
                Some(nick) => format!("Verification successful. Welcome, {nick}!"),
                None => "Verification successful.".to_string(),
            };
            VerifyResponse {
                nickname,
                ..VerifyResponse::bare("verified", message)
            }
        }
        SubmitOutcome::Expired => VerifyResponse::bare(
            "expired",
            "The code expired or was never requested. Request a new one.",
        ),
        SubmitOutcome::AlreadyVerified => {
            VerifyResponse::bare("already_verified", "You are already verified.")
        }
        SubmitOutcome::GrantDenied => VerifyResponse::bare(
            "grant_denied",
            "Your identity checked out, but the role could not be granted. Contact an operator.",
        ),
    }
}

fn internal_error(error: EngineError) -> (StatusCode, Json<VerifyResponse>) {
    tracing::error!(%error, "verification request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(VerifyResponse::bare(
            "error",
            "Something went wrong. Please try again later.",
        )),
    )
}

pub async fn start_handler<D, N, P>(
    State(state): State<Arc<AppState<D, N, P>>>,
    Json(request): Json<StartRequest>,
) -> Result<Json<VerifyResponse>, (StatusCode, Json<VerifyResponse>)>
where
    D: Directory + 'static,
    N: Notifier + 'static,
    P: PlatformBinding + 'static,
{
    let requester = Requester::new(request.requester_id, request.display_name);
    let outcome = state
        .engine
        .start(&requester, &request.identifier)
        .await
        .map_err(internal_error)?;
    Ok(Json(start_response(outcome)))
}

pub async fn submit_handler<D, N, P>(
    State(state): State<Arc<AppState<D, N, P>>>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<VerifyResponse>, (StatusCode, Json<VerifyResponse>)>
where
    D: Directory + 'static,
    N: Notifier + 'static,
    P: PlatformBinding + 'static,
{
    let requester = Requester::new(request.requester_id, request.display_name);
    let max_attempts = state.engine.params().max_attempts;
    let outcome = state
        .engine
        .submit(&requester, &request.code, max_attempts)
        .await
        .map_err(internal_error)?;
    Ok(Json(submit_response(outcome)))
}

// ── Operator stats ───────────────────────────────────────────────────────

/// How many failure entries the stats endpoint reports.
const RECENT_FAILURE_LIMIT: usize = 10;

#[derive(Serialize)]
pub struct StatsResponse {
    pub verified: usize,
    pub failed: usize,
    pub recent_failures: Vec<FailureSummary>,
}

#[derive(Serialize)]
pub struct FailureSummary {
    pub timestamp: String,
    pub requester_display_name: String,
    pub student_id: String,
    pub reason: String,
}

pub async fn stats_handler<D, N, P>(
    State(state): State<Arc<AppState<D, N, P>>>,
) -> Result<Json<StatsResponse>, (StatusCode, Json<VerifyResponse>)>
where
    D: Directory + 'static,
    N: Notifier + 'static,
    P: PlatformBinding + 'static,
{
    let audit = state.engine.audit();
    let stats = (|| {
        let verified = audit.count_success()?;
        let failed = audit.count_failure()?;
        let recent_failures = audit
            .recent_failures(RECENT_FAILURE_LIMIT)?
            .into_iter()
            .map(|r| FailureSummary {
                timestamp: r.timestamp,
                requester_display_name: r.requester_display_name,
                student_id: r.student_id,
                reason: r.reason.unwrap_or_default(),
            })
            .collect();
        Ok::<_, gauth_audit::AuditError>(StatsResponse {
            verified,
            failed,
            recent_failures,
        })
    })()
    .map_err(|e| internal_error(EngineError::Audit(e)))?;

    Ok(Json(stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauth_notify::NotifyError;

    #[test]
    fn sent_outcome_reports_the_email() {
        let response = start_response(StartOutcome::Sent {
            email: "a@example.com".into(),
        });
        assert_eq!(response.status, "sent");
        assert_eq!(response.email.as_deref(), Some("a@example.com"));
        assert!(response.message.contains("a@example.com"));
    }

    #[test]
    fn permanent_notify_failure_is_surfaced_verbatim() {
        let response = start_response(StartOutcome::NotifyFailed {
            error: NotifyError::InvalidAddress("x".into()),
        });
        assert_eq!(response.status, "notify_failed");
        assert!(response.message.contains("invalid"));
    }

    #[test]
    fn transient_notify_failure_stays_generic() {
        let response = start_response(StartOutcome::NotifyFailed {
            error: NotifyError::Delivery("smtp exploded".into()),
        });
        assert_eq!(response.status, "notify_failed");
        assert!(!response.message.contains("exploded"));
    }

    #[test]
    fn wrong_outcome_carries_remaining_count() {
        let response = submit_response(SubmitOutcome::Wrong { remaining: 3 });
        assert_eq!(response.status, "wrong");
        assert_eq!(response.remaining, Some(3));
        assert!(response.message.contains('3'));
    }

    #[test]
    fn verified_outcome_greets_by_nickname() {
        let response = submit_response(SubmitOutcome::Verified {
            nickname: Some("Nguyen Van A".into()),
        });
        assert_eq!(response.status, "verified");
        assert!(response.message.contains("Nguyen Van A"));

        let response = submit_response(SubmitOutcome::Verified { nickname: None });
        assert_eq!(response.message, "Verification successful.");
    }

    #[test]
    fn response_serialization_omits_empty_fields() {
        let json = serde_json::to_string(&submit_response(SubmitOutcome::Expired)).unwrap();
        assert!(!json.contains("email"));
        assert!(!json.contains("remaining"));
        assert!(!json.contains("nickname"));
    }
}
