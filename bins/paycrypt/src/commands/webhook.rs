//! Webhook configuration command

use super::client_from_env;
use crate::output::{or_dash, print_json, Format, Status};
use anyhow::Result;
use paycrypt_api_client::endpoints::webhooks::WebhookConfig;

/// Register the webhook endpoint
pub async fn configure(url: &str, events: Vec<String>, format: Format) -> Result<bool> {
    let config = WebhookConfig {
        url: url.to_string(),
        events,
    };
    config.validate()?;

    let endpoint = client_from_env()?.webhooks().configure(&config).await?;

    if format == Format::Json {
        print_json(&endpoint)?;
        return Ok(true);
    }

    Status::success("Webhook endpoint configured");
    Status::field("URL", or_dash(endpoint.url.as_deref()));
    Status::field("Events", &endpoint.events.join(", "));
    if endpoint.secret.is_some() {
        Status::field("Secret", "returned (use --format json to view)");
    }
    Ok(true)
}
