//! WASM bindings for request signing and webhook verification.

use wasm_bindgen::prelude::*;

/// Sign a request and return the hex signature.
///
/// `body_json` is parsed and re-serialized canonically; pass an empty string
/// for requests without a body.
#[wasm_bindgen]
pub fn sign_request(
    api_key: &str,
    api_secret: &str,
    method: &str,
    path: &str,
    body_json: &str,
    timestamp_millis: f64,
) -> Result<String, JsError> {
    let signer = crate::RequestSigner::from_parts(api_key, api_secret)?;

    // JS numbers are f64; millisecond timestamps fit exactly.
    #[allow(clippy::cast_possible_truncation)]
    let mut context = crate::SigningContext::at(method, path, timestamp_millis as i64)?;
    if !body_json.is_empty() {
        let body: serde_json::Value = serde_json::from_str(body_json)?;
        context = context.with_json(body);
    }

    Ok(signer.sign(&context).into_string())
}

/// Verify a webhook signature (constant-time comparison).
///
/// # Arguments
/// * `payload` - The raw webhook body
/// * `signature_hex` - The `X-Signature` header value
/// * `secret` - The shared webhook secret
///
/// # Returns
/// true if signature matches, false otherwise
#[wasm_bindgen]
pub fn verify_webhook_signature(payload: &str, signature_hex: &str, secret: &str) -> bool {
    crate::verify_webhook(payload, signature_hex, secret)
}
