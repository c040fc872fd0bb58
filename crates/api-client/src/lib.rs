//! Async client for the PayCrypt crypto payment gateway
//!
//! Every request carries `X-API-Key`, `X-Timestamp` and `X-Signature`
//! headers computed by [`paycrypt_crypto::RequestSigner`]. The client is a
//! thin pass-through: one HTTP call per operation, errors surfaced as
//! [`ApiError`].
//!
//! # Features
//!
//! - **Environment-based configuration**: Load credentials and URLs from environment variables
//! - **Fail-fast credentials**: Missing key or secret is rejected at construction
//! - **Request correlation**: Track requests with unique IDs for debugging
//! - **Webhook verification**: Constant-time signature check for inbound webhooks
//!
//! # Example
//!
//! ```rust,no_run
//! use paycrypt_api_client::{ClientConfig, PayCryptClient};
//! use paycrypt_api_client::endpoints::payments::CreatePaymentRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("your_api_key", "your_api_secret").sandbox();
//!     let client = PayCryptClient::with_config(config)?;
//!
//!     let request = CreatePaymentRequest::new(100.0, "USD", "BTC", "ORDER_12345")
//!         .with_callback_url("https://shop.example/paycrypt/webhook");
//!     let payment = client.payments().create(&request).await?;
//!     println!("Send funds to {:?}", payment.address);
//!
//!     let status = client.payments().get(&payment.payment_id).await?;
//!     println!("Status: {:?}", status.status);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;

pub use client::PayCryptClient;
pub use config::{ClientConfig, Environment};
pub use error::{ApiError, ApiResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::PayCryptClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::account::{Account, Usage};
    pub use crate::endpoints::payments::{CreatePaymentRequest, Payment};
    pub use crate::endpoints::webhooks::{WebhookConfig, WebhookEndpoint};
    pub use crate::endpoints::{AccountApi, PaymentsApi, WebhooksApi};
    pub use crate::error::{ApiError, ApiResult};
}
