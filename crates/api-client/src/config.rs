//! Configuration for the PayCrypt API client
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{ApiError, ApiResult};
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::time::Duration;

/// Production API URL
pub const PRODUCTION_URL: &str = "https://api.paycrypt.online";

/// Sandbox API URL
pub const SANDBOX_URL: &str = "https://sandbox-api.paycrypt.online";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Live gateway
    #[default]
    Production,
    /// Sandbox gateway; no real funds move
    Sandbox,
}

impl Environment {
    /// Parse an environment name; anything unrecognised means production.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "sandbox" | "test" | "testing" => Self::Sandbox,
            _ => Self::Production,
        }
    }

    /// Gateway URL for this environment
    #[must_use]
    pub fn default_url(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_URL,
            Self::Sandbox => SANDBOX_URL,
        }
    }
}

/// Client configuration
#[derive(Clone)]
pub struct ClientConfig {
    /// Gateway base URL, without a trailing path
    pub base_url: String,
    /// Public API key, sent as `X-API-Key`
    pub api_key: String,
    /// API secret used to sign requests
    pub api_secret: SecretString,
    /// Current environment
    pub environment: Environment,
    /// Request timeout
    pub timeout: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("environment", &self.environment)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Create a production configuration for the given credentials
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            base_url: Environment::Production.default_url().to_string(),
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
            environment: Environment::Production,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `PAYCRYPT_API_KEY`: API key (required)
    /// - `PAYCRYPT_API_SECRET`: API secret (required)
    /// - `PAYCRYPT_ENV`: `production` (default) or `sandbox`
    /// - `PAYCRYPT_BASE_URL`: Custom base URL (ignored in sandbox)
    /// - `PAYCRYPT_TIMEOUT_SECS`: Request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("PAYCRYPT_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ApiError::missing_env("PAYCRYPT_API_KEY"))?;
        let api_secret = lookup("PAYCRYPT_API_SECRET")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ApiError::missing_env("PAYCRYPT_API_SECRET"))?;

        let mut config = Self::new(api_key, api_secret);

        if let Some(url) = lookup("PAYCRYPT_BASE_URL") {
            config = config.with_base_url(url);
        }

        if let Some(secs) = lookup("PAYCRYPT_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            config = config.with_timeout(Duration::from_secs(secs));
        }

        if lookup("PAYCRYPT_ENV").map(|v| Environment::parse(&v)) == Some(Environment::Sandbox) {
            config = config.sandbox();
        }

        Ok(config)
    }

    /// Switch to the sandbox gateway.
    ///
    /// The sandbox URL replaces any custom base URL.
    #[must_use]
    pub fn sandbox(mut self) -> Self {
        self.environment = Environment::Sandbox;
        self.base_url = Environment::Sandbox.default_url().to_string();
        self
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Borrow the API secret
    pub(crate) fn api_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        if self.api_key.trim().is_empty() {
            return Err(ApiError::config("api_key cannot be empty"));
        }

        if HeaderValue::from_str(&self.api_key).is_err() {
            return Err(ApiError::config("api_key is not a valid header value"));
        }

        if self.api_secret().trim().is_empty() {
            return Err(ApiError::config("api_secret cannot be empty"));
        }

        Ok(())
    }
}
