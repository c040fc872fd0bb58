//! Webhook configuration endpoint

use crate::client::PayCryptClient;
use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Webhooks API interface
#[derive(Clone)]
pub struct WebhooksApi {
    client: PayCryptClient,
}

impl WebhooksApi {
    /// Create a new webhooks API interface
    pub(crate) fn new(client: PayCryptClient) -> Self {
        Self { client }
    }

    /// Register or update the webhook endpoint
    pub async fn configure(&self, config: &WebhookConfig) -> ApiResult<WebhookEndpoint> {
        config.validate()?;
        self.client.post("/webhooks", config).await
    }
}

/// Webhook endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// HTTPS URL the gateway will POST events to
    pub url: String,
    /// Event types to subscribe to (e.g. `payment.completed`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<String>,
}

impl WebhookConfig {
    /// Create a configuration for `url` with no event filter
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            events: Vec::new(),
        }
    }

    /// Builder-style method to subscribe to an event
    #[must_use]
    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.events.push(event.into());
        self
    }

    /// Check the URL
    pub fn validate(&self) -> ApiResult<()> {
        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            return Err(ApiError::validation("webhook url must start with http:// or https://"));
        }
        Ok(())
    }
}

/// Webhook endpoint as stored by the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEndpoint {
    /// Registered URL
    #[serde(default)]
    pub url: Option<String>,
    /// Subscribed events
    #[serde(default)]
    pub events: Vec<String>,
    /// Secret used to sign webhook deliveries, when the gateway returns one
    #[serde(default)]
    pub secret: Option<String>,
    /// Any other fields the gateway returns
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
