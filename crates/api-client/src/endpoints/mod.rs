//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for a specific set of gateway endpoints.
//!
//! | Module | Paths | Description |
//! |--------|-------|-------------|
//! | `payments` | `/payments`, `/payments/{id}` | Create payments and poll their status |
//! | `account` | `/account`, `/account/usage` | Merchant account and usage statistics |
//! | `webhooks` | `/webhooks` | Register the merchant's webhook endpoint |

pub mod account;
pub mod payments;
pub mod webhooks;

pub use account::AccountApi;
pub use payments::PaymentsApi;
pub use webhooks::WebhooksApi;
