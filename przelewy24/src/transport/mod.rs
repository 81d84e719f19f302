//! Transport abstraction.
//!
//! The client only needs one capability from the network: send a request,
//! receive a status and a body. [`Transport`] captures exactly that, so the
//! protocol logic in [`crate::client`] can run against [`HttpTransport`] in
//! production and against an in-memory double in tests.
//!
//! Non-2xx responses are returned as [`TransportResponse`]s, not errors: the
//! gateway puts its error code and message in the body, and decoding it is the
//! client's job.
//!
//! # Examples
//!
//! ```rust,no_run
//! use przelewy24::transport::{BasicAuth, HttpTransport, Method, Transport, TransportRequest};
//!
//! # async fn example() -> przelewy24::error::Result<()> {
//! let transport = HttpTransport::new()?;
//!
//! let request = TransportRequest {
//!     method: Method::Put,
//!     url: "https://sandbox.przelewy24.pl/api/v1/transaction/verify",
//!     headers: vec![("Content-Type", "application/json")],
//!     basic_auth: Some(BasicAuth { username: "12345", password: "api-key" }),
//!     body: b"{}".to_vec(),
//! };
//!
//! let response = transport.send(request).await?;
//! println!("Status: {}", response.status);
//! # Ok(())
//! # }
//! ```

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::{future::Future, sync::Arc};

use crate::error::Result;

pub mod config;
pub mod http;

pub use config::{HttpConfig, HttpVersion};
pub use http::HttpTransport;

/// HTTP methods used by the gateway API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `POST`, used by transaction registration.
    Post,
    /// `PUT`, used by transaction verification.
    Put,
}

impl Method {
    /// Method name as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

/// HTTP Basic credentials.
///
/// `Debug` does not print the password.
#[derive(Clone, Copy)]
pub struct BasicAuth<'a> {
    /// User name.
    pub username: &'a str,
    /// Password.
    pub password: &'a str,
}

impl std::fmt::Debug for BasicAuth<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A request handed to a [`Transport`].
#[derive(Debug, Clone)]
pub struct TransportRequest<'a> {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: &'a str,
    /// Additional HTTP headers.
    pub headers: Vec<(&'a str, &'a str)>,
    /// Basic authentication, if any.
    pub basic_auth: Option<BasicAuth<'a>>,
    /// Raw request body.
    pub body: Vec<u8>,
}

/// Response from a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
}

/// The "send request, receive response" capability.
///
/// Implementations must be safe to share between concurrent calls and must
/// surface timeouts as errors.
pub trait Transport: Send + Sync {
    /// Sends a request and returns the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`P24Error::Transport`](crate::error::P24Error::Transport) if no
    /// response was received.
    fn send<'a>(
        &'a self,
        request: TransportRequest<'a>,
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;

    /// Returns the protocol name for logging.
    fn protocol_name(&self) -> &'static str;
}

impl<T: Transport> Transport for &T {
    fn send<'a>(
        &'a self,
        request: TransportRequest<'a>,
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a {
        (**self).send(request)
    }

    fn protocol_name(&self) -> &'static str {
        (**self).protocol_name()
    }
}

impl<T: Transport> Transport for Arc<T> {
    fn send<'a>(
        &'a self,
        request: TransportRequest<'a>,
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a {
        (**self).send(request)
    }

    fn protocol_name(&self) -> &'static str {
        (**self).protocol_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_as_str() {
        assert_eq!(Method::Post.as_str(), "POST");
        assert_eq!(Method::Put.as_str(), "PUT");
    }

    #[test]
    fn test_basic_auth_debug_redacts_password() {
        let auth = BasicAuth { username: "12345", password: "api-key" };
        let debug_str = format!("{auth:?}");

        assert!(debug_str.contains("12345"));
        assert!(!debug_str.contains("api-key"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_transport_request_debug_redacts_password() {
        let request = TransportRequest {
            method: Method::Post,
            url: "https://sandbox.przelewy24.pl/api/v1/transaction/register",
            headers: vec![("Accept", "application/json")],
            basic_auth: Some(BasicAuth { username: "1", password: "hunter2" }),
            body: b"{}".to_vec(),
        };

        let debug_str = format!("{request:?}");
        assert!(debug_str.contains("TransportRequest"));
        assert!(debug_str.contains("transaction/register"));
        assert!(!debug_str.contains("hunter2"));
    }

    #[test]
    fn test_transport_response_creation() {
        let response = TransportResponse { status: 400, body: br#"{"code":99}"#.to_vec() };

        assert_eq!(response.status, 400);
        assert_eq!(response.body, br#"{"code":99}"#);
    }
}
