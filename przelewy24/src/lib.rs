//! Przelewy24: signed-request client for the Przelewy24 payment gateway
//!
//! Registers payment transactions (obtaining the URL the payer is redirected
//! to) and confirms completed payments with the gateway after its status
//! notification arrives.
//!
//! # Protocol
//!
//! ```text
//! ┌──────────┐  register (POST, signed)     ┌──────────────┐
//! │          │ ───────────────────────────▶ │              │
//! │  Shop    │ ◀─────────── token ───────── │  Przelewy24  │
//! │ (this    │                              │              │
//! │  crate)  │ ◀──── notification (POST) ── │              │
//! │          │  verify (PUT, signed)        │              │
//! │          │ ───────────────────────────▶ │              │
//! └──────────┘                              └──────────────┘
//!        payer is redirected to {base}/trnRequest/{token}
//! ```
//!
//! Every request carries a `sign` field: the SHA-384 hex digest of a fixed
//! JSON-shaped text containing the key transaction fields and the merchant's
//! CRC secret (see [`sign`]). Requests authenticate with HTTP Basic, user =
//! PoS id, password = API key.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use przelewy24::{
//!     Przelewy24,
//!     config::{Environment, GatewayCredentials},
//!     model::{NotificationRequest, TransactionRequest},
//! };
//!
//! # async fn example(notification: NotificationRequest) -> przelewy24::Result<()> {
//! let credentials = GatewayCredentials::new(12345, 12345, "api-key", "crc", Environment::Sandbox);
//! let client = Przelewy24::new(credentials)?;
//!
//! // 1. Register and redirect the payer.
//! let registered = client
//!     .register_transaction(TransactionRequest {
//!         session_id: "order-1001".to_owned(),
//!         amount: 1250,
//!         currency: "PLN".to_owned(),
//!         description: "Order #1001".to_owned(),
//!         email: "buyer@example.com".to_owned(),
//!         country: "PL".to_owned(),
//!         language: "pl".to_owned(),
//!         url_return: "https://shop.example.com/return".to_owned(),
//!         url_status: "https://shop.example.com/p24/status".to_owned(),
//!     })
//!     .await?;
//! println!("{}", registered.redirect_url);
//!
//! // 2. When the notification arrives on url_status, confirm it.
//! client.verify_notification(&notification)?;
//! client.verify_transaction(&notification).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`client`]: the gateway client and its two operations
//! - [`sign`]: canonical signing text and SHA-384 signatures
//! - [`model`]: request, notification and response records
//! - [`transport`]: the send/receive capability and its reqwest implementation
//! - [`config`]: credentials, environments and TOML configuration
//! - [`error`]: error types
//!
//! # Error Handling
//!
//! All operations return [`Result<T, P24Error>`](error::Result). Nothing is
//! retried:
//!
//! ```rust
//! use przelewy24::P24Error;
//!
//! fn describe(result: przelewy24::Result<()>) -> String {
//!     match result {
//!         Ok(()) => "verified".to_owned(),
//!         Err(P24Error::Gateway { code, message, .. }) => format!("rejected ({code}): {message}"),
//!         Err(P24Error::Transport(e)) => format!("network error: {e}"),
//!         Err(e) => format!("error: {e}"),
//!     }
//! }
//!
//! assert_eq!(describe(Ok(())), "verified");
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from reqwest"
)]

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod sign;
pub mod transport;

pub use client::Przelewy24;
pub use config::{Environment, GatewayConfig, GatewayCredentials};
pub use error::{P24Error, Result};
