//! OST REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderValue;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use secrecy::SecretString;
use serde_json::Value;

use crate::auth::{Credentials, SystemClock, TimestampProvider, canonical_query, sign_query};
use crate::config::ClientConfig;
use crate::error::{ApiError, OstError, error_codes};
use crate::params::{ParamOrder, QueryParams};
use crate::rest::endpoint::Endpoint;
use crate::rest::request::{HttpMethod, SignedRequest};
use crate::rest::response::{Envelope, normalize};

/// Product name sent in the `User-Agent` header.
pub const SDK_NAME: &str = "ost-sdk-rs";

/// The OST REST API client.
///
/// Every call is signed with the client's own credentials, dispatched as a
/// single HTTP request and normalized into an [`Envelope`]. [`OstClient::get`]
/// and [`OstClient::post`] return `Ok(data)` for a successful envelope and
/// `Err(ApiError)` for everything else: server failures, HTTP error statuses,
/// transport errors and malformed bodies.
///
/// The client holds no mutable state, so it can be cloned and shared across
/// tasks freely.
///
/// # Example
///
/// ```rust,no_run
/// use ost_sdk::params::QueryParams;
/// use ost_sdk::rest::OstClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = OstClient::builder()
///         .api_key("api_key")
///         .api_secret("api_secret")
///         .api_endpoint("https://sandboxapi.ost.com/v1.1/")
///         .build()?;
///
///     let params = QueryParams::new().with("page_no", 1).with("limit", 10);
///     match client.get("/users", params).await {
///         Ok(data) => println!("Users: {data}"),
///         Err(err) => println!("Request failed: {err}"),
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct OstClient {
    http_client: ClientWithMiddleware,
    endpoint: Endpoint,
    credentials: Arc<Credentials>,
    timestamp_provider: Arc<dyn TimestampProvider>,
    param_order: ParamOrder,
    user_agent: HeaderValue,
}

impl OstClient {
    /// Create a client from a [`ClientConfig`].
    ///
    /// Fails with [`OstError::Config`] when the key, secret or endpoint is missing.
    pub fn new(config: ClientConfig) -> Result<Self, OstError> {
        Self::builder().config(config).build()
    }

    /// Create a new client builder.
    pub fn builder() -> OstClientBuilder {
        OstClientBuilder::new()
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Send a signed GET request; the signed parameters travel in the query string.
    pub async fn get(&self, resource: &str, params: QueryParams) -> Result<Value, ApiError> {
        self.send(HttpMethod::Get, resource, params)
            .await
            .into_result()
    }

    /// Send a signed POST request; the signed parameters travel as the form body.
    pub async fn post(&self, resource: &str, params: QueryParams) -> Result<Value, ApiError> {
        self.send(HttpMethod::Post, resource, params)
            .await
            .into_result()
    }

    /// Sign and dispatch a request, returning the normalized envelope.
    pub async fn send(&self, method: HttpMethod, resource: &str, params: QueryParams) -> Envelope {
        match self.sign(method, resource, params) {
            Ok(request) => self.dispatch(request).await,
            Err(err) => Envelope::failure(err),
        }
    }

    /// Build the signed request for a call without sending it.
    pub fn sign(
        &self,
        method: HttpMethod,
        resource: &str,
        params: QueryParams,
    ) -> Result<SignedRequest, ApiError> {
        let url = self.endpoint.resolve(resource).map_err(|e| {
            tracing::error!(resource, "Failed to resolve request URL: {}", e);
            ApiError::sdk(error_codes::SOMETHING_WENT_WRONG)
        })?;

        let timestamp = self.timestamp_provider.unix_timestamp();
        let canonical = canonical_query(params, &self.credentials, timestamp, self.param_order);
        let signed = sign_query(&self.credentials, resource, &canonical).map_err(|e| {
            tracing::error!(resource, "Failed to sign request: {}", e);
            ApiError::sdk(error_codes::SOMETHING_WENT_WRONG)
        })?;

        Ok(SignedRequest::new(method, url, signed, self.user_agent.clone()))
    }

    /// Send a signed request and normalize whatever comes back.
    async fn dispatch(&self, request: SignedRequest) -> Envelope {
        tracing::debug!(
            method = %request.method(),
            path = request.path(),
            "Dispatching request"
        );

        let (method, url, headers, body) = request.into_parts();
        let mut builder = self
            .http_client
            .request(method.into(), url)
            .headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Request error: {}", e);
                return normalize(None, None);
            }
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => normalize(Some(&body), Some(status)),
            Err(e) => {
                tracing::error!(status, "Failed to read response body: {}", e);
                normalize(None, Some(status))
            }
        }
    }
}

impl std::fmt::Debug for OstClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OstClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &self.credentials.api_key())
            .field("param_order", &self.param_order)
            .finish()
    }
}

/// Builder for [`OstClient`].
pub struct OstClientBuilder {
    api_key: Option<String>,
    api_secret: Option<SecretString>,
    api_endpoint: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    param_order: ParamOrder,
    timestamp_provider: Option<Arc<dyn TimestampProvider>>,
}

impl OstClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            api_endpoint: None,
            user_agent: None,
            timeout: None,
            param_order: ParamOrder::default(),
            timestamp_provider: None,
        }
    }

    /// Apply every setting from a [`ClientConfig`].
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.timeout = config.timeout();
        self.api_key = Some(config.api_key);
        self.api_secret = Some(config.api_secret);
        self.api_endpoint = Some(config.api_endpoint);
        self.param_order = config.param_order;
        self.user_agent = config.user_agent;
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn api_secret(mut self, api_secret: impl Into<SecretString>) -> Self {
        self.api_secret = Some(api_secret.into());
        self
    }

    /// Set the version-specific base URL (a mock server URL in tests).
    pub fn api_endpoint(mut self, url: impl Into<String>) -> Self {
        self.api_endpoint = Some(url.into());
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a whole-request timeout. None is applied by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the order parameters are signed and sent in.
    pub fn param_order(mut self, order: ParamOrder) -> Self {
        self.param_order = order;
        self
    }

    /// Set a custom source for `request_timestamp`.
    pub fn timestamp_provider(mut self, provider: Arc<dyn TimestampProvider>) -> Self {
        self.timestamp_provider = Some(provider);
        self
    }

    /// Build the client.
    ///
    /// Credentials are validated before anything else; no network activity
    /// happens here.
    pub fn build(self) -> Result<OstClient, OstError> {
        let credentials = Credentials::new(
            self.api_key.unwrap_or_default(),
            self.api_secret.unwrap_or_default(),
        )?;
        let endpoint = Endpoint::parse(self.api_endpoint.as_deref().unwrap_or_default())?;

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("{} {}", SDK_NAME, env!("CARGO_PKG_VERSION")));
        let user_agent = HeaderValue::from_str(&user_agent)
            .map_err(|_| OstError::Config(format!("Invalid user agent: {user_agent}")))?;

        let mut reqwest_builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            reqwest_builder = reqwest_builder.timeout(timeout);
        }
        let reqwest_client = reqwest_builder.build()?;

        let http_client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let timestamp_provider = self
            .timestamp_provider
            .unwrap_or_else(|| Arc::new(SystemClock));

        Ok(OstClient {
            http_client,
            endpoint,
            credentials: Arc::new(credentials),
            timestamp_provider,
            param_order: self.param_order,
            user_agent,
        })
    }
}

impl Default for OstClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
