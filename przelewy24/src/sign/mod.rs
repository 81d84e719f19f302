//! Przelewy24 request signatures.
//!
//! Every signed call carries a `sign` field: the SHA-384 digest of a small
//! JSON-shaped text, rendered as lowercase hex. The text is fixed by the
//! gateway. Field order and punctuation must match byte for byte, and values
//! are substituted verbatim without escaping.
//!
//! ```text
//! register:     {"sessionId":"<s>","merchantId":<m>,"amount":<a>,"currency":"<c>","crc":"<crc>"}
//! verify:       {"sessionId":"<s>","orderId":<o>,"amount":<a>,"currency":"<c>","crc":"<crc>"}
//! notification: {"merchantId":<m>,"posId":<p>,"sessionId":"<s>","amount":<a>,
//!                "originAmount":<oa>,"currency":"<c>","orderId":<o>,"methodId":<id>,
//!                "statement":"<st>","crc":"<crc>"}
//! ```
//!
//! The canonical text is never produced by a JSON encoder: the gateway signs
//! the unescaped text, quotes and non-ASCII characters included.
//!
//! # Examples
//!
//! ```
//! use przelewy24::sign::registration_signature;
//!
//! let sign = registration_signature("abc", 1, 100, "PLN", "secret");
//! assert_eq!(sign.len(), 96);
//! assert_eq!(sign, registration_signature("abc", 1, 100, "PLN", "secret"));
//! ```

use sha2::{Digest, Sha384};
use subtle::ConstantTimeEq;

use crate::model::NotificationRequest;

/// Length of a rendered signature in hex characters.
pub const SIGNATURE_HEX_LEN: usize = 96;

/// Signature sent with `transaction/register`.
#[must_use]
pub fn registration_signature(
    session_id: &str,
    merchant_id: u32,
    amount: u64,
    currency: &str,
    crc: &str,
) -> String {
    digest_hex(&format!(
        r#"{{"sessionId":"{session_id}","merchantId":{merchant_id},"amount":{amount},"currency":"{currency}","crc":"{crc}"}}"#
    ))
}

/// Signature sent with `transaction/verify`.
#[must_use]
pub fn verification_signature(
    session_id: &str,
    order_id: u64,
    amount: u64,
    currency: &str,
    crc: &str,
) -> String {
    digest_hex(&format!(
        r#"{{"sessionId":"{session_id}","orderId":{order_id},"amount":{amount},"currency":"{currency}","crc":"{crc}"}}"#
    ))
}

/// Signature the gateway is expected to put on a payment notification.
#[must_use]
pub fn notification_signature(notification: &NotificationRequest, crc: &str) -> String {
    let NotificationRequest {
        merchant_id,
        pos_id,
        session_id,
        amount,
        origin_amount,
        currency,
        order_id,
        method_id,
        statement,
        sign: _,
    } = notification;

    digest_hex(&format!(
        r#"{{"merchantId":{merchant_id},"posId":{pos_id},"sessionId":"{session_id}","amount":{amount},"originAmount":{origin_amount},"currency":"{currency}","orderId":{order_id},"methodId":{method_id},"statement":"{statement}","crc":"{crc}"}}"#
    ))
}

/// Compares two hex signatures in constant time.
///
/// Case-sensitive: the gateway always emits lowercase hex.
#[must_use]
pub fn signatures_match(expected: &str, received: &str) -> bool {
    expected.as_bytes().ct_eq(received.as_bytes()).into()
}

fn digest_hex(canonical: &str) -> String {
    hex::encode(Sha384::digest(canonical.as_bytes()))
}

#[cfg(test)]
mod tests;
