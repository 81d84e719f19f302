use proptest::prelude::*;

use super::*;

fn sample_notification() -> NotificationRequest {
    NotificationRequest {
        merchant_id: 1,
        pos_id: 1,
        session_id: "abc".to_owned(),
        amount: 100,
        origin_amount: 100,
        currency: "PLN".to_owned(),
        order_id: 42,
        method_id: 25,
        statement: "p24-A1-B2-C3".to_owned(),
        sign: String::new(),
    }
}

#[test]
fn test_registration_golden_vector() {
    // sha384 of {"sessionId":"abc","merchantId":1,"amount":100,"currency":"PLN","crc":"secret"}
    assert_eq!(
        registration_signature("abc", 1, 100, "PLN", "secret"),
        "7d1bbe864b37834746bbe2131597c9d0794f9aa84beb69d0032f24b8e4146252\
         d3d0fb64e13936f1c853d4ae008f9302"
    );
}

#[test]
fn test_verification_golden_vector() {
    // sha384 of {"sessionId":"abc","orderId":42,"amount":100,"currency":"PLN","crc":"secret"}
    assert_eq!(
        verification_signature("abc", 42, 100, "PLN", "secret"),
        "95a15cd649183cb04a9e1b37e045ea38e30d633180688f90403485fc7fff3f2d\
         c993b41915e8b62abb7ae6bd07bab8d0"
    );
}

#[test]
fn test_notification_golden_vector() {
    assert_eq!(
        notification_signature(&sample_notification(), "secret"),
        "a9306a86a926693556e2ebda2c6798a4080e73df507748f967475a3ccca02703\
         29b218ba10f0d832a3270514bd52f449"
    );
}

#[test]
fn test_notification_signature_ignores_inbound_sign() {
    let mut notification = sample_notification();
    let before = notification_signature(&notification, "secret");
    notification.sign = "tampered".to_owned();
    assert_eq!(notification_signature(&notification, "secret"), before);
}

#[test]
fn test_registration_and_verification_differ() {
    // Same numbers in the merchantId/orderId slot must still yield different texts.
    assert_ne!(
        registration_signature("abc", 1, 100, "PLN", "secret"),
        verification_signature("abc", 1, 100, "PLN", "secret")
    );
}

#[test]
fn test_strings_are_not_escaped() {
    let quoted = registration_signature(r#"a"b"#, 1, 100, "PLN", "secret");
    let expected =
        digest_hex(r#"{"sessionId":"a"b","merchantId":1,"amount":100,"currency":"PLN","crc":"secret"}"#);
    assert_eq!(quoted, expected);

    let unicode = registration_signature("zażółć", 1, 100, "PLN", "secret");
    let expected =
        digest_hex(r#"{"sessionId":"zażółć","merchantId":1,"amount":100,"currency":"PLN","crc":"secret"}"#);
    assert_eq!(unicode, expected);
}

#[test]
fn test_signatures_match() {
    let sign = registration_signature("abc", 1, 100, "PLN", "secret");
    assert!(signatures_match(&sign, &sign.clone()));
    assert!(!signatures_match(&sign, &sign.to_uppercase()));
    assert!(!signatures_match(&sign, &sign[..SIGNATURE_HEX_LEN - 1]));
    assert!(!signatures_match(&sign, ""));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_registration_signature_is_deterministic(
        session_id in "[a-zA-Z0-9-_]{1,64}",
        merchant_id in any::<u32>(),
        amount in any::<u64>(),
        currency in "[A-Z]{3}",
        crc in "[a-f0-9]{16}",
    ) {
        let first = registration_signature(&session_id, merchant_id, amount, &currency, &crc);
        // An unrelated call in between must not influence the result.
        let _ = verification_signature(&session_id, 7, amount, &currency, &crc);
        let second = registration_signature(&session_id, merchant_id, amount, &currency, &crc);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), SIGNATURE_HEX_LEN);
        prop_assert!(first.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_verification_signature_depends_on_crc(
        session_id in "[a-zA-Z0-9-_]{1,64}",
        order_id in any::<u64>(),
        amount in any::<u64>(),
        crc in "[a-f0-9]{16}",
    ) {
        let with_crc = verification_signature(&session_id, order_id, amount, "PLN", &crc);
        let other_crc = format!("{crc}x");
        let with_other = verification_signature(&session_id, order_id, amount, "PLN", &other_crc);

        prop_assert_ne!(with_crc, with_other);
    }
}
