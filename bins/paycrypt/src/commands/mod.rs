//! CLI command implementations
//!
//! Each command returns `Ok(true)` on success and `Ok(false)` when it ran
//! correctly but the answer is negative (for example an invalid signature).

pub mod account;
pub mod payment;
pub mod sign;
pub mod verify;
pub mod webhook;

use anyhow::{Context, Result};
use paycrypt_api_client::PayCryptClient;

/// Build a client from `PAYCRYPT_*` environment variables
pub fn client_from_env() -> Result<PayCryptClient> {
    PayCryptClient::new().context("failed to configure PayCrypt client")
}
