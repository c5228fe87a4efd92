mod support;

use support::{registrar, FakeStore, ScriptedCodes};
use waitlist_worker::referral::{ReferralError, ReferralLookup, SignupRequest};

#[tokio::test]
async fn unknown_code_is_not_found() {
    let lookup = ReferralLookup::new(FakeStore::default());

    let err = lookup.profile(Some("ZZZZ9999")).await.unwrap_err();

    assert!(matches!(err, ReferralError::NotFound));
    assert_eq!(err.status(), 404);
    assert_eq!(err.public_message(), "Referral code not found");
}

#[tokio::test]
async fn missing_code_is_a_validation_error() {
    let lookup = ReferralLookup::new(FakeStore::default());

    for code in [None, Some(""), Some("   ")] {
        let err = lookup.profile(code).await.unwrap_err();
        assert!(matches!(err, ReferralError::Validation(_)), "{code:?}");
        assert_eq!(err.status(), 400);
    }
}

#[tokio::test]
async fn issued_code_returns_registrant_fields() {
    let reg = registrar(ScriptedCodes::new(&["KATE5555"], &[]));
    let resp = reg
        .register(SignupRequest {
            email: "kate@x.com".to_string(),
            referrer_code: None,
        })
        .await
        .unwrap();
    let row = reg.store().get("kate@x.com").await.unwrap();

    let lookup = ReferralLookup::new(reg.into_store());
    let profile = lookup.profile(Some(resp.referral_code.as_str())).await.unwrap();

    assert_eq!(profile.email, "kate@x.com");
    assert_eq!(profile.referral_code, "KATE5555");
    assert_eq!(profile.referral_count, 0);
    assert_eq!(profile.created_at, waitlist_worker::util::ts_to_rfc3339(row.created_at));
}

#[tokio::test]
async fn lookup_is_case_insensitive_and_serializes_public_fields() {
    let store = FakeStore::default();
    store.seed("leo@x.com", "LEO7777", 3).await;
    let lookup = ReferralLookup::new(store);

    let profile = lookup.profile(Some(" leo7777")).await.unwrap();
    let json = serde_json::to_value(&profile).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "email": "leo@x.com",
            "referral_code": "LEO7777",
            "referral_count": 3,
            "created_at": "2023-11-14T22:13:20+00:00",
        })
    );
}
