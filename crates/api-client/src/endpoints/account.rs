//! Account endpoints

use crate::client::PayCryptClient;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Account API interface
#[derive(Clone)]
pub struct AccountApi {
    client: PayCryptClient,
}

impl AccountApi {
    /// Create a new account API interface
    pub(crate) fn new(client: PayCryptClient) -> Self {
        Self { client }
    }

    /// Get account information
    pub async fn get(&self) -> ApiResult<Account> {
        self.client.get("/account").await
    }

    /// Get usage statistics
    pub async fn usage(&self) -> ApiResult<Usage> {
        self.client.get("/account/usage").await
    }
}

/// Merchant account information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Account identifier
    #[serde(default)]
    pub id: Option<Value>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Subscribed package
    #[serde(default)]
    pub package: Option<String>,
    /// Any other fields the gateway returns
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Usage statistics for the current billing period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    /// Transactions made this period
    #[serde(default)]
    pub transactions: Option<u64>,
    /// Transaction limit, if any
    #[serde(default)]
    pub limit: Option<u64>,
    /// Any other fields the gateway returns
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
