//! Webhook signature verification.
//!
//! The gateway signs each webhook body with `HMAC-SHA256(shared_secret, raw_body)`
//! and sends the lowercase hex digest in `X-Signature`. Receivers must verify
//! against the raw bytes exactly as received, before parsing them.

use crate::hmac_impl::{hmac_sha256, SIGNATURE_HEX_LEN};
use crate::signer::Signature;
use crate::timing::constant_time_compare;

/// Compute the signature a sender attaches to a webhook payload.
#[must_use]
pub fn sign_webhook(raw_payload: impl AsRef<[u8]>, shared_secret: &str) -> Signature {
    Signature::from_hex(hmac_sha256(shared_secret.as_bytes(), raw_payload.as_ref()))
}

/// Check a webhook signature.
///
/// Returns `true` only when `provided_signature` is exactly the 64-character
/// lowercase hex HMAC of `raw_payload`. Never panics: malformed signatures
/// of any length or alphabet simply yield `false`.
///
/// The length is checked first. Equal-length inputs are compared over their
/// full length in constant time.
#[must_use]
pub fn verify_webhook(
    raw_payload: impl AsRef<[u8]>,
    provided_signature: &str,
    shared_secret: &str,
) -> bool {
    if provided_signature.len() != SIGNATURE_HEX_LEN {
        return false;
    }
    let expected = hmac_sha256(shared_secret.as_bytes(), raw_payload.as_ref());
    constant_time_compare(expected.as_bytes(), provided_signature.as_bytes())
}

/// One inbound webhook awaiting verification.
#[derive(Debug, Clone, Copy)]
pub struct WebhookVerificationRequest<'a> {
    /// Body exactly as received
    pub raw_payload: &'a [u8],
    /// Value of the sender's `X-Signature` header
    pub provided_signature: &'a str,
    /// Secret shared out-of-band with the sender
    pub shared_secret: &'a str,
}

impl<'a> WebhookVerificationRequest<'a> {
    /// Bundle the three inputs.
    #[must_use]
    pub fn new(raw_payload: &'a [u8], provided_signature: &'a str, shared_secret: &'a str) -> Self {
        Self {
            raw_payload,
            provided_signature,
            shared_secret,
        }
    }

    /// See [`verify_webhook`].
    #[must_use]
    pub fn verify(&self) -> bool {
        verify_webhook(self.raw_payload, self.provided_signature, self.shared_secret)
    }
}
