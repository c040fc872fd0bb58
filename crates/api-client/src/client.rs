//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{AccountApi, PaymentsApi, WebhooksApi};
use crate::error::{ApiError, ApiResult, ErrorContext};
use paycrypt_crypto::{RequestSigner, SigningContext};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Request, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
pub const X_REQUEST_ID: &str = "X-Request-ID";

const SDK_USER_AGENT: &str = concat!("paycrypt-sdk-rust/", env!("CARGO_PKG_VERSION"));

/// PayCrypt API client
///
/// Every request is signed with the configured credentials: the client adds
/// `X-API-Key`, `X-Timestamp` and `X-Signature`, and sends the canonical JSON
/// that was signed as the body. Each logical operation is a single HTTP call;
/// failures are returned to the caller without retrying.
#[derive(Clone)]
pub struct PayCryptClient {
    inner: Client,
    config: Arc<ClientConfig>,
    signer: RequestSigner,
}

impl PayCryptClient {
    /// Create a new client with configuration from environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    ///
    /// Missing credentials or an unusable base URL fail here, not on the
    /// first request.
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;
        Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", config.base_url)))?;

        let signer = RequestSigner::from_parts(config.api_key.clone(), config.api_secret())?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(USER_AGENT, HeaderValue::from_static(SDK_USER_AGENT));

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        debug!(
            base_url = %config.base_url,
            environment = ?config.environment,
            "PayCrypt client initialized"
        );

        Ok(Self {
            inner,
            config: Arc::new(config),
            signer,
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the signer used for outgoing requests
    #[must_use]
    pub fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access payment endpoints
    #[must_use]
    pub fn payments(&self) -> PaymentsApi {
        PaymentsApi::new(self.clone())
    }

    /// Access account endpoints
    #[must_use]
    pub fn account(&self) -> AccountApi {
        AccountApi::new(self.clone())
    }

    /// Access webhook configuration endpoints
    #[must_use]
    pub fn webhooks(&self) -> WebhooksApi {
        WebhooksApi::new(self.clone())
    }

    /// Verify an inbound webhook signature.
    ///
    /// `payload` must be the raw body exactly as received. Returns `false`
    /// for any malformed signature instead of failing.
    #[must_use]
    pub fn verify_webhook_signature(payload: impl AsRef<[u8]>, signature: &str, secret: &str) -> bool {
        paycrypt_crypto::verify_webhook(payload, signature, secret)
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods
    // -------------------------------------------------------------------------

    /// Perform a signed GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(Method::GET, path, Option::<&()>::None).await
    }

    /// Perform a signed POST request
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Build a signed request without sending it
    ///
    /// `path` is relative to the base URL and must start with `/`; it is
    /// signed exactly as given, query string included. A path the URL parser
    /// would rewrite on the wire (dot segments, unencoded characters, a
    /// `#fragment`) is rejected with [`ApiError::InvalidUrl`].
    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<Request> {
        let request_id = Uuid::new_v4().to_string();
        let request = self
            .signed_builder(method, path, body, &request_id)?
            .build()?;
        Ok(request)
    }

    /// Sign and send one request
    #[instrument(skip(self, body), fields(request_id))]
    async fn request<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let context = ErrorContext {
            request_id: Some(request_id.clone()),
            path: path.to_string(),
            method: method.to_string(),
        };

        let request = self
            .signed_builder(method, path, body, &request_id)?
            .build()?;

        let start = Instant::now();
        let response = self.inner.execute(request).await.map_err(|e| {
            warn!(context = %context, error = %e, "Request failed");
            ApiError::Request(e)
        })?;

        debug!(
            context = %context,
            status = response.status().as_u16(),
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Response received"
        );

        self.handle_response(response, &context).await
    }

    /// Attach URL, correlation ID, authentication headers and canonical body
    fn signed_builder<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        request_id: &str,
    ) -> ApiResult<RequestBuilder> {
        let mut context = SigningContext::now(method.as_str(), path)?;
        if let Some(body) = body {
            context = context.with_body(body)?;
        }

        let url = self.url_for(path)?;
        let headers = self.signer.signed_headers(&context);

        let mut builder = self
            .inner
            .request(method, url)
            .header(X_REQUEST_ID, request_id);

        for (name, value) in headers.pairs() {
            builder = builder.header(name, value);
        }

        if context.body().is_some() {
            builder = builder.body(context.canonical_body());
        }

        Ok(builder)
    }

    /// Resolve `path` against the base URL.
    ///
    /// The request target that goes on the wire must equal the signed path,
    /// otherwise the server rebuilds a different signing string.
    fn url_for(&self, path: &str) -> ApiResult<Url> {
        let raw = format!("{}{}", self.config.base_url, path);
        let url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;

        let base = Url::parse(&self.config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.config.base_url)))?;
        let base_path = base.path().trim_end_matches('/');

        let target = wire_target(&url);
        if url.fragment().is_some() || target.strip_prefix(base_path) != Some(path) {
            return Err(ApiError::InvalidUrl(format!(
                "path {path:?} would be sent as {target:?}"
            )));
        }
        Ok(url)
    }

    /// Handle HTTP response and deserialize
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
        context: &ErrorContext,
    ) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            let text = response.text().await.unwrap_or_default();
            let message = extract_error_message(&text)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
            warn!(
                context = %context,
                status = status.as_u16(),
                message = %message,
                "API returned an error"
            );
            Err(ApiError::api_response(status.as_u16(), message))
        }
    }
}

/// Path and query exactly as they appear in the request line.
fn wire_target(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    }
}

/// Pull a human-readable message out of an error body.
///
/// Prefers a JSON `message` (or `error`) field and falls back to the raw text.
fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let from_json = serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|value| {
            ["message", "error"]
                .iter()
                .find_map(|key| value.get(key).and_then(serde_json::Value::as_str).map(str::to_owned))
        });

    Some(from_json.unwrap_or_else(|| trimmed.to_string()))
}
