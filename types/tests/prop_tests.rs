use proptest::prelude::*;

use gauth_types::{MemberRecord, RequesterId, Timestamp, VerifyParams};

proptest! {
    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Timestamp elapsed_since: elapsed_since(now) = now - self (saturating).
    #[test]
    fn timestamp_elapsed_since(base in 0u64..1_000_000, offset in 0u64..1_000_000) {
        let t = Timestamp::new(base);
        let now = Timestamp::new(base + offset);
        prop_assert_eq!(t.elapsed_since(now), offset);
    }

    /// saturating_add_secs never wraps and never moves backwards.
    #[test]
    fn timestamp_add_monotone(base in 0u64..u64::MAX, secs in 0u64..u64::MAX) {
        let t = Timestamp::new(base);
        prop_assert!(t.saturating_add_secs(secs) >= t);
    }

    /// Clamped attempt budget always lands in the operator range.
    #[test]
    fn params_clamp_in_range(ttl in 0u64..1_000_000, attempts in 0u32..1_000) {
        let p = VerifyParams::clamped(ttl, attempts);
        prop_assert!(p.max_attempts >= 1 && p.max_attempts <= 10);
        prop_assert_eq!(p.otp_ttl_secs, ttl);
    }

    /// RequesterId JSON roundtrip.
    #[test]
    fn requester_id_json_roundtrip(raw in 0u64..u64::MAX) {
        let id = RequesterId::new(raw);
        let encoded = serde_json::to_string(&id).unwrap();
        let decoded: RequesterId = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(decoded, id);
    }

    /// normalized email is always lowercase regardless of input casing.
    #[test]
    fn member_email_lowercased(local in "[a-zA-Z]{1,12}", domain in "[a-zA-Z]{1,12}") {
        let email = format!("{local}@{domain}.com");
        let r = MemberRecord::normalized("Name", "ID", &email, "");
        prop_assert_eq!(r.email, email.to_lowercase());
    }
}
