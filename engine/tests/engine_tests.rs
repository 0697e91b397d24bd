//! End-to-end tests of the verification state machine against nullable
//! collaborators.

use gauth_audit::AuditLog;
use gauth_engine::{StartOutcome, SubmitOutcome, VerificationEngine};
use gauth_notify::NotifyError;
use gauth_nullables::{GrantBehavior, NullCodes, NullDirectory, NullNotifier, NullPlatform};
use gauth_otp::{AttemptTracker, OtpStore};
use gauth_types::{MemberRecord, Requester, Timestamp, VerifyParams};
use std::sync::Arc;

type NullEngine = VerificationEngine<NullDirectory, Arc<NullNotifier>, Arc<NullPlatform>>;

struct Harness {
    engine: NullEngine,
    otp: Arc<OtpStore>,
    attempts: Arc<AttemptTracker>,
    audit: Arc<AuditLog>,
    notifier: Arc<NullNotifier>,
    platform: Arc<NullPlatform>,
    _audit_dir: tempfile::TempDir,
}

fn roster() -> Vec<MemberRecord> {
    vec![MemberRecord::normalized(
        "Nguyen Van A",
        "SV001",
        "a@example.com",
        "2004-01-01",
    )]
}

fn harness_with(
    notifier: NullNotifier,
    platform: NullPlatform,
    codes: NullCodes,
    params: VerifyParams,
) -> Harness {
    let otp = Arc::new(OtpStore::new());
    let attempts = Arc::new(AttemptTracker::new());
    let audit_dir = tempfile::tempdir().unwrap();
    let audit = Arc::new(AuditLog::open(audit_dir.path()).unwrap());
    let notifier = Arc::new(notifier);
    let platform = Arc::new(platform);

    let engine = VerificationEngine::new(
        NullDirectory::new(roster()),
        Arc::clone(&notifier),
        Arc::clone(&platform),
        Arc::clone(&otp),
        Arc::clone(&attempts),
        Arc::clone(&audit),
        Arc::new(codes),
        params,
    );

    Harness {
        engine,
        otp,
        attempts,
        audit,
        notifier,
        platform,
        _audit_dir: audit_dir,
    }
}

fn harness() -> Harness {
    harness_with(
        NullNotifier::working(),
        NullPlatform::permissive(),
        NullCodes::constant("654321"),
        VerifyParams::default(),
    )
}

fn requester() -> Requester {
    Requester::new(100u64, "user#100")
}

#[tokio::test]
async fn start_issues_code_and_delivers_it() {
    let h = harness();

    let outcome = h.engine.start(&requester(), " SV001 ").await.unwrap();
    assert_eq!(
        outcome,
        StartOutcome::Sent {
            email: "a@example.com".into()
        }
    );

    let challenge = h.otp.peek(requester().id, Timestamp::now()).unwrap();
    assert_eq!(challenge.code, "654321");
    assert_eq!(challenge.student_id, "SV001");

    let sent = h.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "a@example.com");
    assert_eq!(sent[0].code, "654321");
    assert_eq!(sent[0].full_name, "Nguyen Van A");
}

#[tokio::test]
async fn unknown_identifier_creates_no_challenge() {
    let h = harness();

    let outcome = h.engine.start(&requester(), "ZZZ999").await.unwrap();
    assert_eq!(outcome, StartOutcome::NotFound);
    assert!(h.otp.peek(requester().id, Timestamp::now()).is_none());
    assert!(h.notifier.sent().is_empty());
}

#[tokio::test]
async fn notify_failure_rolls_back_the_challenge() {
    let h = harness_with(
        NullNotifier::failing(NotifyError::InvalidAddress("a@example.com".into())),
        NullPlatform::permissive(),
        NullCodes::constant("654321"),
        VerifyParams::default(),
    );

    let outcome = h.engine.start(&requester(), "SV001").await.unwrap();
    match outcome {
        StartOutcome::NotifyFailed { error } => assert!(error.is_permanent()),
        other => panic!("expected NotifyFailed, got {other:?}"),
    }
    assert!(h.otp.peek(requester().id, Timestamp::now()).is_none());
}

#[tokio::test]
async fn wrong_codes_count_down_then_lock_out() {
    let h = harness();
    let user = requester();
    h.engine.start(&user, "SV001").await.unwrap();

    for expected_remaining in [4u32, 3, 2, 1] {
        let outcome = h.engine.submit(&user, "000000", 5).await.unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Wrong {
                remaining: expected_remaining
            }
        );
    }

    let outcome = h.engine.submit(&user, "000000", 5).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::LockedOut);

    // Challenge and counter are gone; the failure was audited exactly once.
    assert!(h.otp.peek(user.id, Timestamp::now()).is_none());
    assert_eq!(h.attempts.get(user.id), 0);
    assert_eq!(h.audit.count_failure().unwrap(), 1);
    let failures = h.audit.recent_failures(1).unwrap();
    assert!(failures[0].reason.as_deref().unwrap().contains('5'));
}

#[tokio::test]
async fn wrong_guesses_before_lockout_are_not_audited() {
    let h = harness();
    let user = requester();
    h.engine.start(&user, "SV001").await.unwrap();

    h.engine.submit(&user, "000000", 5).await.unwrap();
    h.engine.submit(&user, "111111", 5).await.unwrap();

    assert_eq!(h.audit.count_failure().unwrap(), 0);
    assert_eq!(h.audit.count_success().unwrap(), 0);
}

#[tokio::test]
async fn correct_code_verifies_clears_state_and_audits_once() {
    let h = harness();
    let user = requester();
    h.engine.start(&user, "SV001").await.unwrap();

    // Two wrong guesses first; success on the third attempt still verifies.
    h.engine.submit(&user, "000001", 5).await.unwrap();
    h.engine.submit(&user, "000002", 5).await.unwrap();
    let outcome = h.engine.submit(&user, " 654321 ", 5).await.unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Verified {
            nickname: Some("Nguyen Van A".into())
        }
    );

    assert!(h.otp.peek(user.id, Timestamp::now()).is_none());
    assert_eq!(h.attempts.get(user.id), 0);
    assert_eq!(h.audit.count_success().unwrap(), 1);
    assert_eq!(h.audit.count_failure().unwrap(), 0);

    assert!(h.platform.holds_role(user.id));
    assert_eq!(h.platform.nicknames(), vec![(user.id, "Nguyen Van A".into())]);
}

#[tokio::test]
async fn submit_without_challenge_is_expired() {
    let h = harness();
    let outcome = h.engine.submit(&requester(), "654321", 5).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Expired);
}

#[tokio::test]
async fn expired_challenge_is_treated_as_absent() {
    let h = harness_with(
        NullNotifier::working(),
        NullPlatform::permissive(),
        NullCodes::constant("654321"),
        VerifyParams {
            otp_ttl_secs: 0,
            max_attempts: 5,
        },
    );
    let user = requester();
    h.engine.start(&user, "SV001").await.unwrap();

    let outcome = h.engine.submit(&user, "654321", 5).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Expired);
    // An expired-session submit never touches the attempt counter.
    assert_eq!(h.attempts.get(user.id), 0);
}

#[tokio::test]
async fn already_verified_leaves_the_challenge_intact() {
    let h = harness();
    let user = requester();
    h.platform.seed_role(user.id);
    h.engine.start(&user, "SV001").await.unwrap();

    let outcome = h.engine.submit(&user, "654321", 5).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::AlreadyVerified);
    assert!(
        h.otp.peek(user.id, Timestamp::now()).is_some(),
        "challenge must not be consumed"
    );
    assert_eq!(h.audit.count_success().unwrap(), 0);
}

#[tokio::test]
async fn forbidden_grant_leaves_stores_untouched() {
    let h = harness_with(
        NullNotifier::working(),
        NullPlatform::with_grant_behavior(GrantBehavior::Forbid),
        NullCodes::constant("654321"),
        VerifyParams::default(),
    );
    let user = requester();
    h.engine.start(&user, "SV001").await.unwrap();

    let outcome = h.engine.submit(&user, "654321", 5).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::GrantDenied);

    // Identity was proven but the grant was refused: no lockout, no audit
    // entry, challenge still live for a retry once permissions are fixed.
    assert!(h.otp.peek(user.id, Timestamp::now()).is_some());
    assert_eq!(h.audit.count_failure().unwrap(), 0);
    assert_eq!(h.audit.count_success().unwrap(), 0);
}

#[tokio::test]
async fn unexpected_platform_fault_is_an_error_and_keeps_state() {
    let h = harness_with(
        NullNotifier::working(),
        NullPlatform::with_grant_behavior(GrantBehavior::Fail),
        NullCodes::constant("654321"),
        VerifyParams::default(),
    );
    let user = requester();
    h.engine.start(&user, "SV001").await.unwrap();

    let result = h.engine.submit(&user, "654321", 5).await;
    assert!(result.is_err());
    assert!(h.otp.peek(user.id, Timestamp::now()).is_some());
    assert_eq!(h.audit.count_success().unwrap(), 0);
}

#[tokio::test]
async fn nickname_failure_never_affects_verification() {
    let h = harness_with(
        NullNotifier::working(),
        NullPlatform::nickname_forbidden(),
        NullCodes::constant("654321"),
        VerifyParams::default(),
    );
    let user = requester();
    h.engine.start(&user, "SV001").await.unwrap();

    let outcome = h.engine.submit(&user, "654321", 5).await.unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Verified {
            nickname: Some("Nguyen Van A".into())
        }
    );
    assert_eq!(h.audit.count_success().unwrap(), 1);
    assert!(h.platform.nicknames().is_empty());
}

#[tokio::test]
async fn fresh_start_resets_the_attempt_budget() {
    let h = harness();
    let user = requester();
    h.engine.start(&user, "SV001").await.unwrap();

    h.engine.submit(&user, "000000", 5).await.unwrap();
    h.engine.submit(&user, "000000", 5).await.unwrap();
    assert_eq!(h.attempts.get(user.id), 2);

    // One OTP session = one attempt budget.
    h.engine.start(&user, "SV001").await.unwrap();
    let outcome = h.engine.submit(&user, "000000", 5).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Wrong { remaining: 4 });
}

#[tokio::test]
async fn lockout_does_not_block_a_fresh_session() {
    let h = harness();
    let user = requester();
    h.engine.start(&user, "SV001").await.unwrap();
    for _ in 0..5 {
        h.engine.submit(&user, "000000", 5).await.unwrap();
    }

    // Lockout is terminal for the session, not the requester.
    let outcome = h.engine.start(&user, "SV001").await.unwrap();
    assert!(matches!(outcome, StartOutcome::Sent { .. }));
    let outcome = h.engine.submit(&user, "654321", 5).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Verified { .. }));
}

#[tokio::test]
async fn reissue_keeps_only_the_newest_challenge() {
    let h = harness_with(
        NullNotifier::working(),
        NullPlatform::permissive(),
        NullCodes::new(vec!["111111", "222222"]),
        VerifyParams::default(),
    );
    let user = requester();
    h.engine.start(&user, "SV001").await.unwrap();
    h.engine.start(&user, "SV001").await.unwrap();

    let challenge = h.otp.peek(user.id, Timestamp::now()).unwrap();
    assert_eq!(challenge.code, "222222");

    // The replaced code no longer verifies.
    let outcome = h.engine.submit(&user, "111111", 5).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Wrong { remaining: 4 });
    let outcome = h.engine.submit(&user, "222222", 5).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Verified { .. }));
}

#[tokio::test]
async fn sessions_for_different_requesters_are_independent() {
    let h = harness();
    let alice = Requester::new(1u64, "alice");
    let bob = Requester::new(2u64, "bob");

    h.engine.start(&alice, "SV001").await.unwrap();
    h.engine.start(&bob, "a@example.com").await.unwrap();

    // Alice locks out; Bob's session is untouched.
    for _ in 0..5 {
        h.engine.submit(&alice, "000000", 5).await.unwrap();
    }
    let outcome = h.engine.submit(&bob, "654321", 5).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Verified { .. }));
}

#[tokio::test]
async fn concurrent_submits_for_one_requester_stay_consistent() {
    let h = harness();
    let user = requester();
    h.engine.start(&user, "SV001").await.unwrap();

    let engine = Arc::new(h.engine);
    let mut handles = Vec::new();
    for _ in 0..4 {
        let engine = Arc::clone(&engine);
        let user = user.clone();
        handles.push(tokio::spawn(async move {
            engine.submit(&user, "000000", 10).await.unwrap()
        }));
    }

    let mut remaining_seen = Vec::new();
    for handle in handles {
        match handle.await.unwrap() {
            SubmitOutcome::Wrong { remaining } => remaining_seen.push(remaining),
            other => panic!("expected Wrong, got {other:?}"),
        }
    }
    remaining_seen.sort_unstable();

    // Serialized per requester: four distinct decrements, none lost.
    assert_eq!(remaining_seen, vec![6, 7, 8, 9]);
    assert_eq!(h.attempts.get(user.id), 4);
}
