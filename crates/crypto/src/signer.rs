//! Request signing.
//!
//! A signed request carries three headers:
//!
//! | Header | Value |
//! |--------|-------|
//! | `X-API-Key` | the credential's public key, verbatim |
//! | `X-Timestamp` | milliseconds since the Unix epoch, decimal |
//! | `X-Signature` | lowercase hex `HMAC-SHA256(api_secret, signing_string)` |
//!
//! The signing string is the concatenation, with no separators, of the
//! upper-cased method, the path, the canonical JSON body (`{}` when there is
//! no body) and the decimal timestamp.
//!
//! The path is the request target relative to the API base URL: it starts
//! with `/`, has no scheme or host, and keeps any query string verbatim.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::canonical::{canonical_json, EMPTY_BODY};
use crate::credential::Credential;
use crate::hmac_impl::hmac_sha256;
use crate::{CryptoError, Result};

/// Header carrying the public API key.
pub const X_API_KEY: &str = "X-API-Key";

/// Header carrying the signing timestamp in milliseconds.
pub const X_TIMESTAMP: &str = "X-Timestamp";

/// Header carrying the hex signature.
pub const X_SIGNATURE: &str = "X-Signature";

/// Everything that goes into one request signature.
#[derive(Debug, Clone, PartialEq)]
pub struct SigningContext {
    method: String,
    path: String,
    body: Option<Value>,
    timestamp_millis: i64,
}

impl SigningContext {
    /// Build a context stamped with the current wall-clock time.
    pub fn now(method: impl Into<String>, path: impl Into<String>) -> Result<Self> {
        Self::at(method, path, Utc::now().timestamp_millis())
    }

    /// Build a context with an explicit timestamp.
    ///
    /// Outgoing requests should use [`SigningContext::now`]; this exists for
    /// receivers reconstructing a signature from headers and for fixtures.
    pub fn at(
        method: impl Into<String>,
        path: impl Into<String>,
        timestamp_millis: i64,
    ) -> Result<Self> {
        let path = path.into();
        validate_path(&path)?;

        Ok(Self {
            method: method.into(),
            path,
            body: None,
            timestamp_millis,
        })
    }

    /// Attach a JSON body.
    ///
    /// Fails with [`CryptoError::Serialization`] when `body` has no JSON
    /// representation.
    pub fn with_body<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach an already-built JSON value as the body.
    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// HTTP method as given (not yet upper-cased).
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Request path relative to the API base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Request body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Signing time in milliseconds since the epoch.
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp_millis
    }

    /// Canonical JSON of the body, `{}` when there is none.
    ///
    /// This is also the exact body that must go on the wire.
    #[must_use]
    pub fn canonical_body(&self) -> String {
        self.body
            .as_ref()
            .map_or_else(|| EMPTY_BODY.to_string(), canonical_json)
    }

    /// The exact string fed to HMAC.
    #[must_use]
    pub fn signing_string(&self) -> String {
        format!(
            "{}{}{}{}",
            self.method.to_uppercase(),
            self.path,
            self.canonical_body(),
            self.timestamp_millis
        )
    }
}

fn validate_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CryptoError::InvalidPath("path is empty".to_string()));
    }
    if !path.starts_with('/') {
        return Err(CryptoError::InvalidPath(format!(
            "path must start with '/': {path}"
        )));
    }
    Ok(())
}

/// Lowercase hex HMAC-SHA256 digest, 64 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    pub(crate) fn from_hex(hex: String) -> Self {
        Self(hex)
    }

    /// Borrow the hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the hex string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Signature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Header values for one signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// Value for `X-API-Key`
    pub api_key: String,
    /// Value for `X-Timestamp`
    pub timestamp: String,
    /// Value for `X-Signature`
    pub signature: Signature,
}

impl SignedHeaders {
    /// Header name/value pairs in a fixed order.
    #[must_use]
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            (X_API_KEY, self.api_key.as_str()),
            (X_TIMESTAMP, self.timestamp.as_str()),
            (X_SIGNATURE, self.signature.as_str()),
        ]
    }
}

/// Sign a context with a credential.
///
/// Pure and deterministic: identical inputs always give identical output.
#[must_use]
pub fn sign(credential: &Credential, context: &SigningContext) -> Signature {
    let message = context.signing_string();
    Signature::from_hex(hmac_sha256(credential.secret_bytes(), message.as_bytes()))
}

/// Immutable signer shared by every request of a client.
///
/// Cloning is cheap; all clones share one [`Credential`].
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credential: Arc<Credential>,
}

impl RequestSigner {
    /// Wrap an already-validated credential.
    #[must_use]
    pub fn new(credential: Credential) -> Self {
        Self {
            credential: Arc::new(credential),
        }
    }

    /// Validate key and secret, then build a signer.
    pub fn from_parts(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self> {
        Ok(Self::new(Credential::new(api_key, api_secret)?))
    }

    /// Public key identifier.
    #[must_use]
    pub fn api_key(&self) -> &str {
        self.credential.api_key()
    }

    /// Compute the signature for `context`.
    #[must_use]
    pub fn sign(&self, context: &SigningContext) -> Signature {
        sign(&self.credential, context)
    }

    /// Compute all three authentication header values for `context`.
    #[must_use]
    pub fn signed_headers(&self, context: &SigningContext) -> SignedHeaders {
        SignedHeaders {
            api_key: self.credential.api_key().to_string(),
            timestamp: context.timestamp_millis().to_string(),
            signature: self.sign(context),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    const FIXTURE_SIGNATURE: &str =
        "117b549016521c7c414cf976a10224f31c3cc3047d7982a86c9167eda3fa43b6";

    fn signer() -> RequestSigner {
        RequestSigner::from_parts("pk_test", "testsecret").unwrap()
    }

    fn fixture_context() -> SigningContext {
        SigningContext::at("POST", "/payments", 1_700_000_000_000)
            .unwrap()
            .with_json(json!({"amount": 100, "currency": "USD"}))
    }

    #[test]
    fn test_fixture_signing_string() {
        assert_eq!(
            fixture_context().signing_string(),
            r#"POST/payments{"amount":100,"currency":"USD"}1700000000000"#
        );
    }

    #[test]
    fn test_fixture_signature() {
        let signature = signer().sign(&fixture_context());
        assert_eq!(signature.as_str(), FIXTURE_SIGNATURE);
    }

    #[test]
    fn test_fixture_independent_of_key_order() {
        let context = SigningContext::at("post", "/payments", 1_700_000_000_000)
            .unwrap()
            .with_json(json!({"currency": "USD", "amount": 100}));
        assert_eq!(signer().sign(&context).as_str(), FIXTURE_SIGNATURE);
    }

    #[test]
    fn test_missing_body_signs_empty_object() {
        let context = SigningContext::at("get", "/account", 1_700_000_000_000).unwrap();
        assert_eq!(context.signing_string(), "GET/account{}1700000000000");
        assert_eq!(
            signer().sign(&context).as_str(),
            "b234a0ac9bbaa5558953e01fec850ad5028fa3da9801d1f6a3fe45a13ee60474"
        );
    }

    #[test]
    fn test_deterministic() {
        let context = fixture_context();
        assert_eq!(signer().sign(&context), signer().sign(&context));
    }

    #[test]
    fn test_sensitive_to_every_input() {
        let base = signer().sign(&fixture_context());

        let method = SigningContext::at("PUT", "/payments", 1_700_000_000_000)
            .unwrap()
            .with_json(json!({"amount": 100, "currency": "USD"}));
        let path = SigningContext::at("POST", "/payments/", 1_700_000_000_000)
            .unwrap()
            .with_json(json!({"amount": 100, "currency": "USD"}));
        let body = SigningContext::at("POST", "/payments", 1_700_000_000_000)
            .unwrap()
            .with_json(json!({"amount": 101, "currency": "USD"}));
        let timestamp = SigningContext::at("POST", "/payments", 1_700_000_000_001)
            .unwrap()
            .with_json(json!({"amount": 100, "currency": "USD"}));

        for context in [method, path, body, timestamp] {
            assert_ne!(signer().sign(&context), base);
        }

        let other_secret = RequestSigner::from_parts("pk_test", "testsecret2").unwrap();
        assert_ne!(other_secret.sign(&fixture_context()), base);
    }

    #[test]
    fn test_api_key_does_not_affect_signature() {
        let other_key = RequestSigner::from_parts("pk_other", "testsecret").unwrap();
        assert_eq!(other_key.sign(&fixture_context()), signer().sign(&fixture_context()));
    }

    #[test]
    fn test_signed_headers() {
        let headers = signer().signed_headers(&fixture_context());
        assert_eq!(headers.api_key, "pk_test");
        assert_eq!(headers.timestamp, "1700000000000");
        assert_eq!(headers.signature.as_str(), FIXTURE_SIGNATURE);

        let pairs = headers.pairs();
        assert_eq!(pairs[0], ("X-API-Key", "pk_test"));
        assert_eq!(pairs[1], ("X-Timestamp", "1700000000000"));
        assert_eq!(pairs[2], ("X-Signature", FIXTURE_SIGNATURE));
    }

    #[test]
    fn test_now_uses_current_time() {
        let before = Utc::now().timestamp_millis();
        let context = SigningContext::now("GET", "/account").unwrap();
        let after = Utc::now().timestamp_millis();
        assert!(context.timestamp_millis() >= before && context.timestamp_millis() <= after);
    }

    #[test]
    fn test_path_validation() {
        assert!(matches!(
            SigningContext::at("GET", "", 0),
            Err(CryptoError::InvalidPath(_))
        ));
        assert!(matches!(
            SigningContext::at("GET", "https://api.paycrypt.online/account", 0),
            Err(CryptoError::InvalidPath(_))
        ));
        assert!(SigningContext::at("GET", "/payments?status=pending", 0).is_ok());
    }

    #[test]
    fn test_unserializable_body_is_serialization_error() {
        let mut body = HashMap::new();
        body.insert((1, 2), "tuple keys are not JSON");

        let err = SigningContext::at("POST", "/payments", 0)
            .unwrap()
            .with_body(&body)
            .unwrap_err();
        assert!(matches!(err, CryptoError::Serialization(_)));
    }

    #[test]
    fn test_signer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RequestSigner>();
    }
}
