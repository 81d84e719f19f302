//! Protocol records exchanged with the gateway.
//!
//! Caller-facing types ([`TransactionRequest`], [`NotificationRequest`],
//! [`RegisteredTransaction`]) are separate from the wire payloads
//! ([`RegisterPayload`], [`VerifyPayload`]): merchant identity and `sign` are
//! never caller fields, they are filled in by the client right before sending.

use serde::{Deserialize, Serialize};

/// Parameters of a transaction to register.
///
/// `session_id` is chosen by the caller and must be unique per payment attempt.
/// `amount` is expressed in minor currency units (grosze for PLN).
///
/// # Examples
///
/// ```
/// use przelewy24::model::TransactionRequest;
///
/// let request = TransactionRequest {
///     session_id: "order-1001-attempt-1".to_owned(),
///     amount: 12_50,
///     currency: "PLN".to_owned(),
///     description: "Order #1001".to_owned(),
///     email: "buyer@example.com".to_owned(),
///     country: "PL".to_owned(),
///     language: "pl".to_owned(),
///     url_return: "https://shop.example.com/return".to_owned(),
///     url_status: "https://shop.example.com/p24/status".to_owned(),
/// };
/// assert_eq!(request.amount, 1250);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// Unique session identifier.
    pub session_id: String,
    /// Amount in minor currency units.
    pub amount: u64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Description shown to the payer.
    pub description: String,
    /// Payer email.
    pub email: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
    /// Language of the payment page (e.g. "pl", "en").
    pub language: String,
    /// URL the payer returns to after the payment.
    pub url_return: String,
    /// URL receiving the asynchronous status notification.
    pub url_status: String,
}

/// Body of `POST /api/v1/transaction/register`.
///
/// Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    /// Configured merchant id.
    pub merchant_id: u32,
    /// Configured point-of-sale id.
    pub pos_id: u32,
    /// Session identifier.
    pub session_id: String,
    /// Amount in minor currency units.
    pub amount: u64,
    /// Currency code.
    pub currency: String,
    /// Description.
    pub description: String,
    /// Payer email.
    pub email: String,
    /// Country code.
    pub country: String,
    /// Language code.
    pub language: String,
    /// Return URL.
    pub url_return: String,
    /// Status notification URL.
    pub url_status: String,
    /// Registration signature.
    pub sign: String,
}

impl RegisterPayload {
    /// Binds a caller request to the merchant identity it will be sent under.
    ///
    /// `sign` is left empty until the client signs the payload.
    #[must_use]
    pub fn new(request: TransactionRequest, merchant_id: u32, pos_id: u32) -> Self {
        let TransactionRequest {
            session_id,
            amount,
            currency,
            description,
            email,
            country,
            language,
            url_return,
            url_status,
        } = request;

        Self {
            merchant_id,
            pos_id,
            session_id,
            amount,
            currency,
            description,
            email,
            country,
            language,
            url_return,
            url_status,
            sign: String::new(),
        }
    }
}

/// Payment notification posted by the gateway to `urlStatus`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    /// Merchant id the payment was made to.
    pub merchant_id: u32,
    /// Point-of-sale id the payment was made to.
    pub pos_id: u32,
    /// Session identifier from registration.
    pub session_id: String,
    /// Paid amount in minor units.
    pub amount: u64,
    /// Amount originally registered.
    pub origin_amount: u64,
    /// Currency code.
    pub currency: String,
    /// Gateway-assigned order id.
    pub order_id: u64,
    /// Payment method used.
    pub method_id: u32,
    /// Bank statement title.
    pub statement: String,
    /// Signature computed by the gateway.
    pub sign: String,
}

/// Body of `PUT /api/v1/transaction/verify`.
///
/// A narrower projection of [`NotificationRequest`]: `originAmount`,
/// `methodId`, `statement` and the inbound `sign` are not forwarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPayload {
    /// Merchant id from the notification.
    pub merchant_id: u32,
    /// Point-of-sale id from the notification.
    pub pos_id: u32,
    /// Session identifier.
    pub session_id: String,
    /// Amount in minor units.
    pub amount: u64,
    /// Currency code.
    pub currency: String,
    /// Gateway order id.
    pub order_id: u64,
    /// Verification signature.
    pub sign: String,
}

impl From<&NotificationRequest> for VerifyPayload {
    fn from(notification: &NotificationRequest) -> Self {
        Self {
            merchant_id: notification.merchant_id,
            pos_id: notification.pos_id,
            session_id: notification.session_id.clone(),
            amount: notification.amount,
            currency: notification.currency.clone(),
            order_id: notification.order_id,
            sign: String::new(),
        }
    }
}

/// Response body shared by the register and verify endpoints.
///
/// Every field is optional on the wire. Missing fields decode to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GatewayResponse {
    /// Payload on success.
    pub data: Option<ResponseData>,
    /// Gateway response code.
    pub response_code: i64,
    /// Error message on failure.
    pub error: String,
    /// Error code on failure.
    pub code: i64,
}

impl GatewayResponse {
    /// Token from the `data` object, if present and non-empty.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.data.as_ref().map(|data| data.token.as_str()).filter(|token| !token.is_empty())
    }
}

/// `data` object of a [`GatewayResponse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResponseData {
    /// Transaction token (registration only).
    pub token: String,
}

/// A successfully registered transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredTransaction {
    /// Opaque gateway token.
    pub token: String,
    /// URL the payer must be redirected to.
    pub redirect_url: String,
}
