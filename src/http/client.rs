//! HTTP client with rate-limit retry
//!
//! Provides the async transport shared by every source client:
//! - Authentication applied per attempt (cached bearer tokens are reused)
//! - Bounded retry on 429 responses via [`RetryPolicy`]
//! - Status classification into the crate error taxonomy
//! - JSON decoding with parse errors surfaced as decode failures

use super::rate_limit::RetryPolicy;
use super::response::classify_status;
use crate::auth::{AuthConfig, Authenticator};
use crate::config::HttpClientConfig;
use crate::error::{Error, Result};
use bytes::Bytes;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters, sent in insertion order
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
    /// Override max retries for this request
    pub max_retries: Option<u32>,
    /// Send without credentials (CDN downloads)
    pub skip_auth: bool,
    /// Name of the requested entity, used in not-found errors
    pub resource: Option<String>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add several query parameters
    #[must_use]
    pub fn query_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set max retries
    #[must_use]
    pub fn retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Send this request without credentials
    #[must_use]
    pub fn skip_auth(mut self) -> Self {
        self.skip_auth = true;
        self
    }

    /// Name the requested entity for not-found errors
    #[must_use]
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub(crate) fn resource_or<'a>(&'a self, url: &'a str) -> &'a str {
        self.resource.as_deref().unwrap_or(url)
    }
}

/// Async HTTP client with rate-limit retry
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Authenticator,
    retry: RetryPolicy,
}

impl HttpClient {
    /// Create a new HTTP client without authentication
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        Self::with_auth(config, AuthConfig::None)
    }

    /// Create a client with authentication
    pub fn with_auth(config: HttpClientConfig, auth_config: AuthConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let authenticator = Authenticator::with_client(auth_config, client.clone());
        let retry = RetryPolicy::from_config(&config);

        Ok(Self {
            client,
            config,
            authenticator,
            retry,
        })
    }

    /// Transport configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Retry policy applied to every request
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Authenticator used for requests
    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Make a GET request and parse the JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, config: RequestConfig) -> Result<T> {
        let response = self.get(url, &config).await?;
        let text = response.text().await?;
        decode_json(url, &text)
    }

    /// Make a GET request and return the raw body
    pub async fn get_bytes(&self, url: &str, config: RequestConfig) -> Result<Bytes> {
        let response = self.get(url, &config).await?;
        Ok(response.bytes().await?)
    }

    /// Make a GET request, retrying on rate limits
    pub async fn get(&self, url: &str, config: &RequestConfig) -> Result<Response> {
        let full_url = self.build_url(url);
        let policy = match config.max_retries {
            Some(retries) => self.retry.with_max_retries(retries),
            None => self.retry,
        };

        policy.execute(|| self.attempt(&full_url, config)).await
    }

    async fn attempt(&self, full_url: &str, config: &RequestConfig) -> Result<Response> {
        let mut req = self.client.get(full_url);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if !config.query.is_empty() {
            req = req.query(&config.query);
        }
        if let Some(timeout) = config.timeout {
            req = req.timeout(timeout);
        }
        if !config.skip_auth {
            req = self.authenticator.apply(req).await?;
        }

        let response = req.send().await?;
        let status = response.status();
        if status.is_success() {
            debug!("Request succeeded: GET {}", full_url);
            return Ok(response);
        }

        let headers = response.headers().clone();
        let body = response.text().await.unwrap_or_default();
        Err(classify_status(
            status,
            &headers,
            config.resource_or(full_url),
            body,
        ))
    }

    /// Build full URL from path
    pub fn build_url(&self, path: &str) -> String {
        build_url(self.config.base_url.as_deref(), path)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("retry", &self.retry)
            .field("has_credentials", &self.authenticator.has_credentials())
            .finish_non_exhaustive()
    }
}

/// Join a base URL and a path; absolute URLs pass through untouched
/// Parse a response body, naming the endpoint on failure
pub(crate) fn decode_json<T: DeserializeOwned>(url: &str, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| Error::decode(format!("{url}: {e}")))
}

pub(crate) fn build_url(base_url: Option<&str>, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    match base_url {
        Some(base) => {
            let base = base.trim_end_matches('/');
            let path = path.trim_start_matches('/');
            format!("{base}/{path}")
        }
        None => path.to_string(),
    }
}
