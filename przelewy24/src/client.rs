//! Przelewy24 gateway client.
//!
//! [`Przelewy24`] holds merchant credentials and a [`Transport`], and exposes
//! the two-step payment protocol:
//!
//! 1. [`register_transaction`](Przelewy24::register_transaction) signs and
//!    registers a transaction, returning the URL the payer is redirected to.
//! 2. After the gateway posts a payment notification,
//!    [`verify_transaction`](Przelewy24::verify_transaction) confirms the order
//!    server-to-server. Until it succeeds the payment is not final.
//!
//! Both calls are single-shot and stateless. Nothing is retried.

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    config::{GatewayConfig, GatewayCredentials},
    error::{P24Error, Result},
    model::{
        GatewayResponse, NotificationRequest, RegisterPayload, RegisteredTransaction,
        TransactionRequest, VerifyPayload,
    },
    sign,
    transport::{BasicAuth, HttpTransport, Method, Transport, TransportRequest},
};

const REGISTER_PATH: &str = "/api/v1/transaction/register";
const VERIFY_PATH: &str = "/api/v1/transaction/verify";
const REDIRECT_PATH: &str = "/trnRequest/";
const JSON_MEDIA_TYPE: &str = "application/json";

/// Client for the Przelewy24 REST API.
///
/// Holds no mutable state, so one instance can serve concurrent calls.
///
/// # Examples
///
/// ```rust,no_run
/// use przelewy24::{
///     Przelewy24,
///     config::{Environment, GatewayCredentials},
///     model::TransactionRequest,
/// };
///
/// # async fn example() -> przelewy24::error::Result<()> {
/// let credentials = GatewayCredentials::new(12345, 12345, "api-key", "crc", Environment::Sandbox);
/// let client = Przelewy24::new(credentials)?;
///
/// let registered = client
///     .register_transaction(TransactionRequest {
///         session_id: "order-1001".to_owned(),
///         amount: 1250,
///         currency: "PLN".to_owned(),
///         description: "Order #1001".to_owned(),
///         email: "buyer@example.com".to_owned(),
///         country: "PL".to_owned(),
///         language: "pl".to_owned(),
///         url_return: "https://shop.example.com/return".to_owned(),
///         url_status: "https://shop.example.com/p24/status".to_owned(),
///     })
///     .await?;
///
/// println!("Redirect payer to {}", registered.redirect_url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Przelewy24<T = HttpTransport> {
    credentials: GatewayCredentials,
    transport: T,
}

impl Przelewy24<HttpTransport> {
    /// Creates a client on the default HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP transport cannot be created.
    pub fn new(credentials: GatewayCredentials) -> Result<Self> {
        Ok(Self::with_transport(credentials, HttpTransport::new()?))
    }

    /// Creates a client from TOML configuration, resolving secrets from the
    /// environment and building an HTTP transport from the `[http]` table.
    ///
    /// # Errors
    ///
    /// Returns [`P24Error::Config`] if secrets are missing or settings are out
    /// of bounds.
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        config.validate()?;
        let credentials = config.credentials()?;
        let transport = HttpTransport::with_config(&config.http)?;
        Ok(Self::with_transport(credentials, transport))
    }
}

impl<T: Transport> Przelewy24<T> {
    /// Creates a client on a caller-supplied transport.
    #[must_use]
    pub const fn with_transport(credentials: GatewayCredentials, transport: T) -> Self {
        Self { credentials, transport }
    }

    /// Credentials this client signs and authenticates with.
    #[must_use]
    pub const fn credentials(&self) -> &GatewayCredentials {
        &self.credentials
    }

    /// Base URL of the configured environment.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        self.credentials.environment().base_url()
    }

    /// URL the payer is sent to for a registered token.
    #[must_use]
    pub fn redirect_url(&self, token: &str) -> String {
        format!("{}{REDIRECT_PATH}{token}", self.base_url())
    }

    /// Registers a transaction and returns the payer redirect URL.
    ///
    /// The merchant and PoS ids sent (and signed) are always the configured
    /// ones.
    ///
    /// # Errors
    ///
    /// - [`P24Error::Transport`] if the gateway could not be reached
    /// - [`P24Error::Decode`] if the response body is malformed, or a 200
    ///   response carries no token
    /// - [`P24Error::Gateway`] if the gateway answered with a non-200 status
    #[instrument(
        skip(self, request),
        fields(session_id = %request.session_id, environment = self.credentials.environment().as_str())
    )]
    pub async fn register_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<RegisteredTransaction> {
        let mut payload = RegisterPayload::new(
            request,
            self.credentials.merchant_id(),
            self.credentials.pos_id(),
        );
        payload.sign = sign::registration_signature(
            &payload.session_id,
            payload.merchant_id,
            payload.amount,
            &payload.currency,
            self.credentials.crc(),
        );

        let (status, response) = self.exchange(Method::Post, REGISTER_PATH, &payload).await?;
        if status != 200 {
            return Err(gateway_error(status, response));
        }

        let token = response.token().ok_or_else(|| {
            P24Error::Decode("registration response carries no token".to_owned())
        })?;

        info!("transaction registered");
        Ok(RegisteredTransaction { token: token.to_owned(), redirect_url: self.redirect_url(token) })
    }

    /// Confirms a notified payment with the gateway.
    ///
    /// Sends the notification's merchant/PoS ids, session id, amount, currency
    /// and order id, signed with the configured CRC. The notification's own
    /// `sign` is not checked here; call
    /// [`verify_notification`](Self::verify_notification) first for that.
    ///
    /// # Errors
    ///
    /// - [`P24Error::Transport`] if the gateway could not be reached
    /// - [`P24Error::Decode`] if the response body is malformed
    /// - [`P24Error::Gateway`] if the gateway answered with a non-200 status
    #[instrument(
        skip(self, notification),
        fields(
            session_id = %notification.session_id,
            order_id = notification.order_id,
            environment = self.credentials.environment().as_str()
        )
    )]
    pub async fn verify_transaction(&self, notification: &NotificationRequest) -> Result<()> {
        let mut payload = VerifyPayload::from(notification);
        payload.sign = sign::verification_signature(
            &payload.session_id,
            payload.order_id,
            payload.amount,
            &payload.currency,
            self.credentials.crc(),
        );

        let (status, response) = self.exchange(Method::Put, VERIFY_PATH, &payload).await?;
        if status != 200 {
            return Err(gateway_error(status, response));
        }

        info!("transaction verified");
        Ok(())
    }

    /// Checks that a notification was issued by the gateway for this merchant.
    ///
    /// Compares the notification's merchant/PoS ids with the configured ones
    /// and its `sign` with the expected notification signature.
    ///
    /// # Errors
    ///
    /// - [`P24Error::InvalidNotification`] if the ids do not match
    /// - [`P24Error::SignatureMismatch`] if the signature does not match
    pub fn verify_notification(&self, notification: &NotificationRequest) -> Result<()> {
        if notification.merchant_id != self.credentials.merchant_id()
            || notification.pos_id != self.credentials.pos_id()
        {
            warn!(
                merchant_id = notification.merchant_id,
                pos_id = notification.pos_id,
                "notification addressed to another merchant"
            );
            return Err(P24Error::InvalidNotification(format!(
                "merchant/pos {}/{} does not match configured {}/{}",
                notification.merchant_id,
                notification.pos_id,
                self.credentials.merchant_id(),
                self.credentials.pos_id()
            )));
        }

        let expected = sign::notification_signature(notification, self.credentials.crc());
        if !sign::signatures_match(&expected, &notification.sign) {
            warn!(session_id = %notification.session_id, "notification signature mismatch");
            return Err(P24Error::SignatureMismatch);
        }

        Ok(())
    }

    /// Sends a signed payload and decodes the gateway's response record.
    async fn exchange<P: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        payload: &P,
    ) -> Result<(u16, GatewayResponse)> {
        let body = serde_json::to_vec(payload)
            .map_err(|e| P24Error::Encode(format!("request serialization failed: {e}")))?;

        let url = format!("{}{path}", self.base_url());
        let username = self.credentials.pos_id().to_string();

        let request = TransportRequest {
            method,
            url: &url,
            headers: vec![("Content-Type", JSON_MEDIA_TYPE), ("Accept", JSON_MEDIA_TYPE)],
            basic_auth: Some(BasicAuth {
                username: &username,
                password: self.credentials.api_key(),
            }),
            body,
        };

        let response = self.transport.send(request).await?;
        debug!(status = response.status, protocol = self.transport.protocol_name(), "response received");

        let decoded = serde_json::from_slice::<GatewayResponse>(&response.body)
            .map_err(|e| P24Error::Decode(format!("HTTP {}: {e}", response.status)))?;

        Ok((response.status, decoded))
    }
}

fn gateway_error(status: u16, response: GatewayResponse) -> P24Error {
    warn!(status, code = response.code, error = %response.error, "gateway rejected request");
    P24Error::Gateway { status, code: response.code, message: response.error }
}
