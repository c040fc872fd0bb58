//! Payment endpoints
//!
//! - `POST /payments` creates a payment and returns the deposit address
//! - `GET /payments/{id}` returns the current payment status

use crate::client::PayCryptClient;
use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Payments API interface
#[derive(Clone)]
pub struct PaymentsApi {
    client: PayCryptClient,
}

impl PaymentsApi {
    /// Create a new payments API interface
    pub(crate) fn new(client: PayCryptClient) -> Self {
        Self { client }
    }

    /// Create a new payment
    ///
    /// The request is validated locally first; an invalid request never
    /// reaches the network.
    pub async fn create(&self, request: &CreatePaymentRequest) -> ApiResult<Payment> {
        request.validate()?;
        self.client.post("/payments", request).await
    }

    /// Get payment status
    pub async fn get(&self, payment_id: &str) -> ApiResult<Payment> {
        self.client.get(&payment_path(payment_id)?).await
    }
}

fn payment_path(payment_id: &str) -> ApiResult<String> {
    let id = payment_id.trim();
    if id.is_empty() {
        return Err(ApiError::validation("payment_id cannot be empty"));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
    {
        return Err(ApiError::validation(format!(
            "payment_id contains unsupported characters: {id}"
        )));
    }
    Ok(format!("/payments/{id}"))
}

/// Payment creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    /// Amount in fiat currency
    pub amount: f64,
    /// Fiat currency code (e.g. `USD`)
    pub currency: String,
    /// Crypto currency to pay with (e.g. `BTC`, `ETH`)
    pub crypto_currency: String,
    /// Merchant's unique order identifier
    pub order_id: String,
    /// Webhook callback URL for this payment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// Where to send the customer after payment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreatePaymentRequest {
    /// Create a request with the required fields
    pub fn new(
        amount: f64,
        currency: impl Into<String>,
        crypto_currency: impl Into<String>,
        order_id: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            currency: currency.into(),
            crypto_currency: crypto_currency.into(),
            order_id: order_id.into(),
            callback_url: None,
            return_url: None,
            description: None,
        }
    }

    /// Builder-style method to set callback URL
    #[must_use]
    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// Builder-style method to set return URL
    #[must_use]
    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }

    /// Builder-style method to set description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check required fields
    pub fn validate(&self) -> ApiResult<()> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ApiError::validation("amount must be a positive number"));
        }
        for (field, value) in [
            ("currency", &self.currency),
            ("crypto_currency", &self.crypto_currency),
            ("order_id", &self.order_id),
        ] {
            if value.trim().is_empty() {
                return Err(ApiError::validation(format!("Missing required field: {field}")));
            }
        }
        Ok(())
    }
}

/// Payment as returned by the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Gateway payment identifier
    pub payment_id: String,
    /// Payment status (e.g. `pending`, `completed`, `failed`)
    #[serde(default)]
    pub status: Option<String>,
    /// Deposit address
    #[serde(default)]
    pub address: Option<String>,
    /// Amount of crypto to send
    #[serde(default)]
    pub crypto_amount: Option<Value>,
    /// Crypto currency code
    #[serde(default)]
    pub crypto_currency: Option<String>,
    /// QR code image URL or data URI
    #[serde(default)]
    pub qr_code: Option<String>,
    /// Any other fields the gateway returns
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
