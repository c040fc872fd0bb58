//! API credentials.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

use crate::{CryptoError, Result};

/// API key and secret issued to an integrator.
///
/// The secret is held in a [`SecretString`] and never appears in `Debug`
/// output. Both fields are checked at construction so that a missing key or
/// secret fails immediately instead of on the first request.
pub struct Credential {
    api_key: String,
    api_secret: SecretString,
}

impl Credential {
    /// Create a credential, rejecting empty or whitespace-only values.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.trim().is_empty() {
            return Err(CryptoError::InvalidKey("api key is missing".to_string()));
        }
        if api_secret.trim().is_empty() {
            return Err(CryptoError::InvalidKey("api secret is missing".to_string()));
        }

        Ok(Self {
            api_key,
            api_secret: SecretString::from(api_secret),
        })
    }

    /// Public key identifier, sent verbatim as `X-API-Key`.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn secret_bytes(&self) -> &[u8] {
        self.api_secret.expose_secret().as_bytes()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_credential() {
        let credential = Credential::new("pk_live_123", "s3cret").unwrap();
        assert_eq!(credential.api_key(), "pk_live_123");
        assert_eq!(credential.secret_bytes(), b"s3cret");
    }

    #[test]
    fn test_missing_key_fails_fast() {
        let err = Credential::new("", "s3cret").unwrap_err();
        assert!(matches!(err, CryptoError::InvalidKey(_)));
    }

    #[test]
    fn test_blank_secret_fails_fast() {
        let err = Credential::new("pk_live_123", "   ").unwrap_err();
        assert!(matches!(err, CryptoError::InvalidKey(_)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let credential = Credential::new("pk_live_123", "do-not-print").unwrap();
        let debug = format!("{credential:?}");
        assert!(debug.contains("pk_live_123"));
        assert!(!debug.contains("do-not-print"));
    }
}
