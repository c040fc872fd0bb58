//! Server-side verification of signed requests.

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::time::Duration;

use crate::hmac_impl::{hmac_sha256, SIGNATURE_HEX_LEN};
use crate::signer::SigningContext;
use crate::timing::constant_time_compare;
use crate::{CryptoError, Result};

/// Default accepted distance between a request timestamp and the server clock.
pub const DEFAULT_MAX_SKEW: Duration = Duration::from_secs(300);

/// Rebuilds the signing string of an inbound request and checks its signature.
///
/// Uses the same canonical body serialization as [`crate::RequestSigner`].
pub struct RequestVerifier {
    api_secret: SecretString,
    max_skew: Duration,
}

impl RequestVerifier {
    /// Create a verifier for the secret paired with one API key.
    pub fn new(api_secret: impl Into<String>) -> Result<Self> {
        let api_secret = api_secret.into();
        if api_secret.trim().is_empty() {
            return Err(CryptoError::InvalidKey("api secret is missing".to_string()));
        }
        Ok(Self {
            api_secret: SecretString::from(api_secret),
            max_skew: DEFAULT_MAX_SKEW,
        })
    }

    /// Override the accepted clock skew.
    #[must_use]
    pub fn with_max_skew(mut self, max_skew: Duration) -> Self {
        self.max_skew = max_skew;
        self
    }

    /// Accepted clock skew.
    #[must_use]
    pub fn max_skew(&self) -> Duration {
        self.max_skew
    }

    /// Verify one request.
    ///
    /// `timestamp_header` and `signature_header` are the raw `X-Timestamp`
    /// and `X-Signature` values; `now_millis` is the server clock.
    pub fn verify(
        &self,
        method: &str,
        path: &str,
        body: Option<&Value>,
        timestamp_header: &str,
        signature_header: &str,
        now_millis: i64,
    ) -> Result<()> {
        let timestamp = parse_timestamp(timestamp_header)?;

        let skew_ms = timestamp.saturating_sub(now_millis);
        let max_skew_ms = i64::try_from(self.max_skew.as_millis()).unwrap_or(i64::MAX);
        if skew_ms.unsigned_abs() > max_skew_ms.unsigned_abs() {
            return Err(CryptoError::StaleTimestamp { skew_ms });
        }

        let mut context = SigningContext::at(method, path, timestamp)?;
        if let Some(body) = body {
            context = context.with_json(body.clone());
        }

        let expected = hmac_sha256(
            self.api_secret.expose_secret().as_bytes(),
            context.signing_string().as_bytes(),
        );

        if signature_header.len() == SIGNATURE_HEX_LEN
            && constant_time_compare(expected.as_bytes(), signature_header.as_bytes())
        {
            Ok(())
        } else {
            Err(CryptoError::SignatureMismatch)
        }
    }
}

impl std::fmt::Debug for RequestVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestVerifier")
            .field("api_secret", &"[REDACTED]")
            .field("max_skew", &self.max_skew)
            .finish()
    }
}

fn parse_timestamp(raw: &str) -> Result<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CryptoError::InvalidTimestamp(raw.to_string()));
    }
    raw.parse()
        .map_err(|_| CryptoError::InvalidTimestamp(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RequestSigner;
    use serde_json::json;

    const NOW: i64 = 1_700_000_000_000;

    fn signed(body: &Value, timestamp: i64) -> (String, String) {
        let signer = RequestSigner::from_parts("pk_test", "testsecret").unwrap();
        let context = SigningContext::at("POST", "/payments", timestamp)
            .unwrap()
            .with_json(body.clone());
        let headers = signer.signed_headers(&context);
        (headers.timestamp, headers.signature.into_string())
    }

    #[test]
    fn test_accepts_fresh_signed_request() {
        let body = json!({"amount": 100, "currency": "USD"});
        let (timestamp, signature) = signed(&body, NOW);

        let verifier = RequestVerifier::new("testsecret").unwrap();
        verifier
            .verify("POST", "/payments", Some(&body), &timestamp, &signature, NOW + 1_000)
            .unwrap();
    }

    #[test]
    fn test_body_key_order_does_not_matter() {
        let (timestamp, signature) = signed(&json!({"amount": 100, "currency": "USD"}), NOW);
        let reordered = json!({"currency": "USD", "amount": 100});

        let verifier = RequestVerifier::new("testsecret").unwrap();
        assert!(verifier
            .verify("post", "/payments", Some(&reordered), &timestamp, &signature, NOW)
            .is_ok());
    }

    #[test]
    fn test_rejects_tampered_body() {
        let (timestamp, signature) = signed(&json!({"amount": 100}), NOW);

        let verifier = RequestVerifier::new("testsecret").unwrap();
        let err = verifier
            .verify("POST", "/payments", Some(&json!({"amount": 1})), &timestamp, &signature, NOW)
            .unwrap_err();
        assert!(matches!(err, CryptoError::SignatureMismatch));
    }

    #[test]
    fn test_rejects_stale_and_future_timestamps() {
        let body = json!({});
        let verifier = RequestVerifier::new("testsecret")
            .unwrap()
            .with_max_skew(Duration::from_secs(60));

        let (old_ts, old_sig) = signed(&body, NOW - 61_000);
        let err = verifier
            .verify("POST", "/payments", Some(&body), &old_ts, &old_sig, NOW)
            .unwrap_err();
        assert!(matches!(err, CryptoError::StaleTimestamp { skew_ms: -61_000 }));

        let (future_ts, future_sig) = signed(&body, NOW + 61_000);
        assert!(matches!(
            verifier.verify("POST", "/payments", Some(&body), &future_ts, &future_sig, NOW),
            Err(CryptoError::StaleTimestamp { .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_timestamp() {
        let verifier = RequestVerifier::new("testsecret").unwrap();
        for raw in ["", "-5", "17e11", "12.5", " 1700000000000"] {
            assert!(matches!(
                verifier.verify("GET", "/account", None, raw, "00", NOW),
                Err(CryptoError::InvalidTimestamp(_))
            ));
        }
    }

    #[test]
    fn test_rejects_short_signature() {
        let verifier = RequestVerifier::new("testsecret").unwrap();
        let err = verifier
            .verify("GET", "/account", None, &NOW.to_string(), "b234a0", NOW)
            .unwrap_err();
        assert!(matches!(err, CryptoError::SignatureMismatch));
    }

    #[test]
    fn test_absent_body_matches_empty_object() {
        let verifier = RequestVerifier::new("testsecret").unwrap();
        verifier
            .verify(
                "GET",
                "/account",
                None,
                "1700000000000",
                "b234a0ac9bbaa5558953e01fec850ad5028fa3da9801d1f6a3fe45a13ee60474",
                NOW,
            )
            .unwrap();
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(RequestVerifier::new("").is_err());
    }
}
