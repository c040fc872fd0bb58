//! Webhook verification command

use crate::output::{print_json, Format, Status};
use anyhow::{Context, Result};
use paycrypt_crypto::WebhookVerificationRequest;
use std::path::Path;

/// Verify a webhook payload given inline or from a file
pub fn run(
    secret: &str,
    signature: &str,
    payload: Option<&str>,
    file: Option<&Path>,
    format: Format,
) -> Result<bool> {
    let raw: Vec<u8> = match (payload, file) {
        (Some(p), _) => p.as_bytes().to_vec(),
        (None, Some(path)) => std::fs::read(path)
            .with_context(|| format!("failed to read payload from {}", path.display()))?,
        (None, None) => anyhow::bail!("either --payload or --file is required"),
    };

    let valid = WebhookVerificationRequest::new(&raw, signature.trim(), secret).verify();

    if format == Format::Json {
        print_json(&serde_json::json!({ "valid": valid }))?;
    } else if valid {
        Status::success("Webhook signature is valid");
    } else {
        Status::error("Webhook signature is invalid");
    }

    Ok(valid)
}
