//! The verification engine proper.
//!
//! Orchestrates the full flow: identifier to directory lookup, challenge
//! issue and code delivery, code submission, then role grant or lockout
//! with an audit record. Stores are injected, never ambient; all
//! operations for one requester run under that requester's session lock.

use crate::error::EngineError;
use crate::nickname::nickname_from_full_name;
use crate::outcome::{StartOutcome, SubmitOutcome};
use crate::session::SessionLocks;
use gauth_audit::{AuditLog, VerificationRecord};
use gauth_directory::Directory;
use gauth_notify::Notifier;
use gauth_otp::{AttemptTracker, CodeGenerator, OtpStore};
use gauth_platform::{PlatformBinding, PlatformError};
use gauth_types::{Requester, Timestamp, VerifyParams};
use std::sync::Arc;

/// The OTP verification state machine.
///
/// Generic over its three external collaborators so tests can swap in
/// deterministic implementations.
pub struct VerificationEngine<D, N, P> {
    directory: D,
    notifier: N,
    platform: P,
    otp: Arc<OtpStore>,
    attempts: Arc<AttemptTracker>,
    audit: Arc<AuditLog>,
    codes: Arc<dyn CodeGenerator>,
    params: VerifyParams,
    sessions: SessionLocks,
}

impl<D, N, P> VerificationEngine<D, N, P>
where
    D: Directory,
    N: Notifier,
    P: PlatformBinding,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        directory: D,
        notifier: N,
        platform: P,
        otp: Arc<OtpStore>,
        attempts: Arc<AttemptTracker>,
        audit: Arc<AuditLog>,
        codes: Arc<dyn CodeGenerator>,
        params: VerifyParams,
    ) -> Self {
        Self {
            directory,
            notifier,
            platform,
            otp,
            attempts,
            audit,
            codes,
            params,
            sessions: SessionLocks::new(),
        }
    }

    /// The audit log this engine appends to (operator reporting reads it).
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    pub fn params(&self) -> VerifyParams {
        self.params
    }

    /// Reclaim idle per-requester session locks.
    pub async fn cleanup_idle_sessions(&self) {
        self.sessions.cleanup().await;
    }

    /// Handle an identifier submission: resolve the member, issue a fresh
    /// challenge (replacing any prior one), reset the attempt budget, and
    /// deliver the code.
    ///
    /// A delivery failure rolls the challenge back so no
    /// valid-but-undelivered code remains.
    pub async fn start(
        &self,
        requester: &Requester,
        raw_identifier: &str,
    ) -> Result<StartOutcome, EngineError> {
        let lock = self.sessions.acquire(requester.id).await;
        let _guard = lock.lock().await;

        let identifier = raw_identifier.trim();
        let member = match self.directory.find(identifier)? {
            Some(member) => member,
            None => {
                tracing::debug!(requester = %requester.id, "identifier not found in roster");
                return Ok(StartOutcome::NotFound);
            }
        };

        let code = self.codes.six_digit();
        self.otp
            .issue(requester.id, code.clone(), &member, self.params.otp_ttl_secs, Timestamp::now());
        // Fresh challenge, fresh attempt budget: one OTP session = one budget.
        self.attempts.clear(requester.id);

        if let Err(error) = self.notifier.send(&member.email, &code, &member.full_name).await {
            self.otp.clear(requester.id);
            tracing::warn!(requester = %requester.id, %error, "code delivery failed, challenge rolled back");
            return Ok(StartOutcome::NotifyFailed { error });
        }

        tracing::info!(requester = %requester.id, email = %member.email, "challenge issued and delivered");
        Ok(StartOutcome::Sent { email: member.email })
    }

    /// Handle a code submission against the live challenge.
    ///
    /// `max_attempts` is taken from the caller (any positive value); the
    /// operator-facing clamp happens upstream in configuration.
    pub async fn submit(
        &self,
        requester: &Requester,
        raw_code: &str,
        max_attempts: u32,
    ) -> Result<SubmitOutcome, EngineError> {
        let lock = self.sessions.acquire(requester.id).await;
        let _guard = lock.lock().await;

        let challenge = match self.otp.peek(requester.id, Timestamp::now()) {
            Some(challenge) => challenge,
            None => return Ok(SubmitOutcome::Expired),
        };

        // The count includes the submission being processed, successful or not.
        let count = self.attempts.increment(requester.id);

        if raw_code.trim() != challenge.code {
            if count >= max_attempts {
                let record = VerificationRecord::failure(
                    requester,
                    &challenge.full_name,
                    &challenge.student_id,
                    &challenge.email,
                    format!("exceeded {max_attempts} wrong attempts"),
                );
                self.audit.append_failure(&record)?;
                self.otp.clear(requester.id);
                self.attempts.clear(requester.id);
                tracing::info!(requester = %requester.id, "locked out after {count} wrong attempts");
                return Ok(SubmitOutcome::LockedOut);
            }
            return Ok(SubmitOutcome::Wrong {
                remaining: max_attempts - count,
            });
        }

        // Identity proven. Short-circuit before consuming the challenge if
        // the platform says the role is already there.
        if self
            .platform
            .has_role(requester.id)
            .await
            .map_err(EngineError::Platform)?
        {
            tracing::debug!(requester = %requester.id, "already holds the verified role");
            return Ok(SubmitOutcome::AlreadyVerified);
        }

        // Grant before touching any store state: a refused grant must not
        // leave the stores partially cleared.
        match self.platform.grant_role(requester.id).await {
            Ok(()) => {}
            Err(PlatformError::Forbidden) => {
                tracing::warn!(requester = %requester.id, "platform refused the role grant");
                return Ok(SubmitOutcome::GrantDenied);
            }
            Err(error) => return Err(EngineError::Platform(error)),
        }

        let record = VerificationRecord::success(
            requester,
            &challenge.full_name,
            &challenge.student_id,
            &challenge.email,
        );
        self.audit.append_success(&record)?;
        self.otp.clear(requester.id);
        self.attempts.clear(requester.id);

        // Cosmetic: failures are swallowed and never affect the outcome.
        let nickname = nickname_from_full_name(&challenge.full_name);
        if let Some(ref nick) = nickname {
            if let Err(error) = self.platform.set_display_name(requester.id, nick).await {
                tracing::warn!(requester = %requester.id, %error, "display name change failed");
            }
        }

        tracing::info!(requester = %requester.id, student_id = %challenge.student_id, "verified");
        Ok(SubmitOutcome::Verified { nickname })
    }
}
