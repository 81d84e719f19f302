//! Merchant credentials and gateway configuration.
//!
//! [`GatewayCredentials`] is what the client holds for its lifetime. It can be
//! built directly, or resolved from a TOML [`GatewayConfig`] whose secrets live
//! in environment variables.
//!
//! ```toml
//! environment = "sandbox"
//! merchant_id = 12345
//! pos_id = 12345
//! api_key_env = "P24_API_KEY"
//! crc_env = "P24_CRC"
//!
//! [http]
//! timeout_secs = 10
//! ```

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{
    error::{P24Error, Result},
    transport::HttpConfig,
};

const SANDBOX_BASE_URL: &str = "https://sandbox.przelewy24.pl";
const PRODUCTION_BASE_URL: &str = "https://secure.przelewy24.pl";

/// Gateway environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Test gateway; no real money moves.
    #[default]
    Sandbox,
    /// Live gateway.
    Production,
}

impl Environment {
    /// Base URL of the gateway, without a trailing slash.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_BASE_URL,
            Self::Production => PRODUCTION_BASE_URL,
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Production => "production",
        }
    }
}

/// Merchant identity and secrets.
///
/// Immutable once constructed. The API key and CRC are never printed by `Debug`.
///
/// # Examples
///
/// ```
/// use przelewy24::config::{Environment, GatewayCredentials};
///
/// let credentials = GatewayCredentials::new(12345, 12345, "api-key", "crc", Environment::Sandbox);
/// assert_eq!(credentials.pos_id(), 12345);
/// assert!(!format!("{credentials:?}").contains("api-key"));
/// ```
#[derive(Debug)]
pub struct GatewayCredentials {
    merchant_id: u32,
    pos_id: u32,
    api_key: SecretString,
    crc: SecretString,
    environment: Environment,
}

impl GatewayCredentials {
    /// Creates credentials from plain values.
    #[must_use]
    pub fn new(
        merchant_id: u32,
        pos_id: u32,
        api_key: impl Into<String>,
        crc: impl Into<String>,
        environment: Environment,
    ) -> Self {
        let api_key: String = api_key.into();
        let crc: String = crc.into();

        Self {
            merchant_id,
            pos_id,
            api_key: SecretString::from(api_key),
            crc: SecretString::from(crc),
            environment,
        }
    }

    /// Merchant identifier.
    #[must_use]
    pub const fn merchant_id(&self) -> u32 {
        self.merchant_id
    }

    /// Point-of-sale identifier.
    #[must_use]
    pub const fn pos_id(&self) -> u32 {
        self.pos_id
    }

    /// Selected gateway environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    pub(crate) fn crc(&self) -> &str {
        self.crc.expose_secret()
    }
}

/// TOML configuration of a gateway client.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Gateway environment.
    #[serde(default)]
    pub environment: Environment,

    /// Merchant identifier.
    pub merchant_id: u32,

    /// Point-of-sale identifier (usually equal to the merchant id).
    pub pos_id: u32,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Environment variable holding the CRC secret.
    #[serde(default = "default_crc_env")]
    pub crc_env: String,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,
}

impl GatewayConfig {
    /// Parses and validates a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`P24Error::Config`] if the TOML is malformed or fails validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use przelewy24::config::{Environment, GatewayConfig};
    ///
    /// let config = GatewayConfig::from_toml(r#"
    ///     environment = "production"
    ///     merchant_id = 1
    ///     pos_id = 1
    /// "#).unwrap();
    ///
    /// assert_eq!(config.environment, Environment::Production);
    /// assert_eq!(config.api_key_env, "P24_API_KEY");
    /// ```
    pub fn from_toml(toml: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml)
            .map_err(|e| P24Error::Config(format!("failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates identifiers, environment variable names and HTTP bounds.
    ///
    /// # Errors
    ///
    /// Returns [`P24Error::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.merchant_id == 0 {
            return Err(P24Error::Config("merchant_id must be non-zero".to_owned()));
        }
        if self.pos_id == 0 {
            return Err(P24Error::Config("pos_id must be non-zero".to_owned()));
        }

        validate_env_var_name("api_key_env", &self.api_key_env)?;
        validate_env_var_name("crc_env", &self.crc_env)?;

        self.http.validate()
    }

    /// Resolves secrets from the environment into credentials.
    ///
    /// # Errors
    ///
    /// Returns [`P24Error::Config`] if either variable is unset or empty.
    pub fn credentials(&self) -> Result<GatewayCredentials> {
        self.credentials_from(|name| std::env::var(name).ok())
    }

    fn credentials_from(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<GatewayCredentials> {
        let api_key = read_secret(&lookup, &self.api_key_env)?;
        let crc = read_secret(&lookup, &self.crc_env)?;

        Ok(GatewayCredentials::new(self.merchant_id, self.pos_id, api_key, crc, self.environment))
    }
}

fn default_api_key_env() -> String {
    "P24_API_KEY".to_owned()
}

fn default_crc_env() -> String {
    "P24_CRC".to_owned()
}

fn validate_env_var_name(field: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(P24Error::Config(format!("{field} must not be empty")));
    }
    if !name.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_') {
        return Err(P24Error::Config(format!(
            "{field} must contain only A-Z, 0-9 and '_': {name}"
        )));
    }
    Ok(())
}

fn read_secret(lookup: impl Fn(&str) -> Option<String>, var: &str) -> Result<String> {
    match lookup(var) {
        Some(value) if !value.is_empty() => Ok(value),
        Some(_) => Err(P24Error::Config(format!("{var} is empty"))),
        None => Err(P24Error::Config(format!("{var} is not set"))),
    }
}
