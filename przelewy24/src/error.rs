//! Error types for the Przelewy24 client.
//!
//! All errors implement the standard [`std::error::Error`] trait via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Network Errors** ([`P24Error::Transport`]): the request never produced a response
//! - **Protocol Errors** ([`P24Error::Decode`], [`P24Error::Gateway`]): the gateway answered,
//!   but not with what was asked for
//! - **Local Errors** ([`P24Error::Encode`], [`P24Error::Config`]): nothing was sent
//! - **Notification Errors** ([`P24Error::SignatureMismatch`],
//!   [`P24Error::InvalidNotification`]): an inbound notification failed the opt-in check
//!
//! None of these are retried by the client. Retry policy belongs to the caller.
//!
//! # Examples
//!
//! ```
//! use przelewy24::error::{P24Error, Result};
//!
//! fn require_token(token: Option<String>) -> Result<String> {
//!     token.ok_or_else(|| P24Error::Decode("missing token".to_owned()))
//! }
//!
//! assert!(require_token(None).is_err());
//! ```

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, P24Error>;

/// Errors that can occur while talking to the Przelewy24 gateway.
///
/// Every variant is terminal for the call that produced it.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum P24Error {
    /// HTTP request failed before a response was received.
    ///
    /// Wraps [`reqwest::Error`]: connection refused, DNS failure, TLS errors and
    /// request timeouts (10 seconds by default) all end up here.
    ///
    /// # Recovery
    ///
    /// The transaction state on the gateway side is unknown. Registration can be
    /// retried with a fresh session id; verification can be retried as is.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway response body was not a well-formed response record.
    #[error("Invalid gateway response: {0}")]
    Decode(String),

    /// The gateway rejected the request.
    ///
    /// `code` and `message` are the values the gateway put in its response body,
    /// surfaced unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use przelewy24::error::P24Error;
    ///
    /// let err = P24Error::Gateway { status: 400, code: 99, message: "bad".to_owned() };
    /// assert_eq!(err.to_string(), "Gateway rejected request (HTTP 400, code 99): bad");
    /// ```
    #[error("Gateway rejected request (HTTP {status}, code {code}): {message}")]
    Gateway {
        /// HTTP status code of the response.
        status: u16,
        /// Gateway error code from the response body.
        code: i64,
        /// Gateway error message from the response body.
        message: String,
    },

    /// A request record could not be serialized.
    #[error("Request encoding failed: {0}")]
    Encode(String),

    /// Configuration is invalid or incomplete.
    ///
    /// Raised while parsing TOML, resolving secrets from the environment, or
    /// validating timeout bounds.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The `sign` field of a notification does not match the expected signature.
    #[error("Notification signature mismatch")]
    SignatureMismatch,

    /// A notification does not belong to the configured merchant.
    #[error("Invalid notification: {0}")]
    InvalidNotification(String),
}

impl P24Error {
    /// Returns the gateway error code, if the gateway produced this error.
    #[must_use]
    pub const fn gateway_code(&self) -> Option<i64> {
        match self {
            Self::Gateway { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns true if the error happened before a response was received.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_display() {
        let error = P24Error::Gateway { status: 400, code: 99, message: "bad".to_owned() };
        assert_eq!(error.to_string(), "Gateway rejected request (HTTP 400, code 99): bad");
        assert_eq!(error.gateway_code(), Some(99));
        assert!(!error.is_transport());
    }

    #[test]
    fn test_decode_error() {
        let error = P24Error::Decode("expected value at line 1 column 1".into());
        assert!(error.to_string().contains("Invalid gateway response"));
        assert_eq!(error.gateway_code(), None);
    }

    #[test]
    fn test_config_error() {
        let error = P24Error::Config("P24_API_KEY is not set".to_owned());
        assert_eq!(error.to_string(), "Invalid configuration: P24_API_KEY is not set");
    }

    #[test]
    fn test_signature_mismatch_display() {
        assert_eq!(P24Error::SignatureMismatch.to_string(), "Notification signature mismatch");
    }
}
