//! Request signing and webhook verification for PayCrypt.
//!
//! This crate provides:
//! - HMAC-SHA256 request signatures over method, path, canonical body and timestamp
//! - Canonical JSON serialization shared by signer and verifier
//! - Constant-time webhook signature verification
//! - Server-side verification of signed requests with a clock-skew window
//!
//! # Example
//!
//! ```rust
//! use paycrypt_crypto::{verify_webhook, RequestSigner, SigningContext};
//! use serde_json::json;
//!
//! let signer = RequestSigner::from_parts("pk_test", "testsecret")?;
//! let context = SigningContext::at("POST", "/payments", 1_700_000_000_000)?
//!     .with_json(json!({"amount": 100, "currency": "USD"}));
//!
//! assert_eq!(
//!     context.signing_string(),
//!     r#"POST/payments{"amount":100,"currency":"USD"}1700000000000"#
//! );
//! let headers = signer.signed_headers(&context);
//! assert_eq!(headers.signature.as_str().len(), 64);
//!
//! assert!(!verify_webhook(b"{}", "not-a-signature", "whsec"));
//! # Ok::<(), paycrypt_crypto::CryptoError>(())
//! ```

#![warn(missing_docs)]

mod canonical;
mod credential;
mod error;
mod hmac_impl;
mod signer;
mod timing;
mod verifier;
mod webhook;

#[cfg(feature = "wasm")]
mod wasm;

pub use canonical::{canonical_json, to_canonical_json, EMPTY_BODY};
pub use credential::Credential;
pub use error::{CryptoError, Result};
pub use hmac_impl::{hmac_sha256, SIGNATURE_HEX_LEN};
pub use signer::{
    sign, RequestSigner, Signature, SignedHeaders, SigningContext, X_API_KEY, X_SIGNATURE,
    X_TIMESTAMP,
};
pub use timing::constant_time_compare;
pub use verifier::{RequestVerifier, DEFAULT_MAX_SKEW};
pub use webhook::{sign_webhook, verify_webhook, WebhookVerificationRequest};
