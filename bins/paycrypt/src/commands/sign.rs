//! Sign command

use crate::output::{print_json, Format, Status};
use anyhow::{Context, Result};
use paycrypt_crypto::{RequestSigner, SigningContext};
use serde::Serialize;

/// Inputs for the sign command
pub struct SignArgs {
    pub api_key: String,
    pub api_secret: String,
    pub method: String,
    pub path: String,
    pub body: Option<String>,
    pub timestamp: Option<i64>,
}

#[derive(Serialize)]
struct SignOutput<'a> {
    signing_string: &'a str,
    headers: SignedHeadersOutput<'a>,
}

#[derive(Serialize)]
struct SignedHeadersOutput<'a> {
    #[serde(rename = "X-API-Key")]
    api_key: &'a str,
    #[serde(rename = "X-Timestamp")]
    timestamp: &'a str,
    #[serde(rename = "X-Signature")]
    signature: &'a str,
}

/// Print the signing string and authentication headers
pub fn run(args: &SignArgs, format: Format) -> Result<bool> {
    let signer = RequestSigner::from_parts(args.api_key.as_str(), args.api_secret.as_str())
        .context("invalid credentials")?;

    let mut context = match args.timestamp {
        Some(ts) => SigningContext::at(args.method.as_str(), args.path.as_str(), ts),
        None => SigningContext::now(args.method.as_str(), args.path.as_str()),
    }?;

    if let Some(ref raw) = args.body {
        let body: serde_json::Value =
            serde_json::from_str(raw).context("--body is not valid JSON")?;
        context = context.with_json(body);
    }

    let signing_string = context.signing_string();
    let headers = signer.signed_headers(&context);

    tracing::debug!(method = %args.method, path = %args.path, "Signed request");

    if format == Format::Json {
        print_json(&SignOutput {
            signing_string: &signing_string,
            headers: SignedHeadersOutput {
                api_key: &headers.api_key,
                timestamp: &headers.timestamp,
                signature: headers.signature.as_str(),
            },
        })?;
        return Ok(true);
    }

    Status::header("Signed request");
    Status::field("Signing string", &signing_string);
    for (name, value) in headers.pairs() {
        Status::field(name, value);
    }
    Ok(true)
}
