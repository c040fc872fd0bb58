//! Error types for the crypto crate.

use thiserror::Error;

/// Result type alias for crypto operations.
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Errors that can occur while signing or verifying requests.
///
/// Webhook verification never produces one of these: it answers with a
/// plain `bool` so that attacker-controlled input cannot make it fail.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Missing or empty credential material
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Request path is not usable in a signing string
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Request body could not be turned into JSON
    #[error("Body serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// `X-Timestamp` header is not a decimal millisecond count
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Timestamp is outside the accepted clock-skew window
    #[error("Timestamp outside allowed window ({skew_ms} ms from now)")]
    StaleTimestamp {
        /// Signed distance between the request timestamp and now
        skew_ms: i64,
    },

    /// Signature verification failed
    #[error("Signature mismatch")]
    SignatureMismatch,
}
