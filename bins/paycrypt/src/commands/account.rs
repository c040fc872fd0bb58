//! Account commands

use super::client_from_env;
use crate::output::{or_dash, print_json, Format, Status};
use anyhow::Result;

/// Show account information
pub async fn info(format: Format) -> Result<bool> {
    let account = client_from_env()?.account().get().await?;

    if format == Format::Json {
        print_json(&account)?;
        return Ok(true);
    }

    Status::header("Account");
    let id = account.id.as_ref().map(ToString::to_string);
    Status::field("ID", or_dash(id.as_deref()));
    Status::field("Name", or_dash(account.name.as_deref()));
    Status::field("Email", or_dash(account.email.as_deref()));
    Status::field("Package", or_dash(account.package.as_deref()));
    Ok(true)
}

/// Show usage statistics
pub async fn usage(format: Format) -> Result<bool> {
    let usage = client_from_env()?.account().usage().await?;

    if format == Format::Json {
        print_json(&usage)?;
        return Ok(true);
    }

    Status::header("Usage");
    let transactions = usage.transactions.map(|n| n.to_string());
    let limit = usage.limit.map_or_else(|| "unlimited".to_string(), |n| n.to_string());
    Status::field("Transactions", or_dash(transactions.as_deref()));
    Status::field("Limit", &limit);
    for (key, value) in &usage.extra {
        Status::field(key, &value.to_string());
    }
    Ok(true)
}
