//! Blocking HTTP client
//!
//! Same request pipeline as [`HttpClient`](super::HttpClient), driven by
//! `reqwest::blocking`. Rate-limit waits park the calling thread only.

use super::client::{build_url, decode_json, RequestConfig};
use super::rate_limit::RetryPolicy;
use super::response::classify_status;
use crate::auth::{AuthConfig, BlockingAuthenticator};
use crate::config::HttpClientConfig;
use crate::error::Result;
use bytes::Bytes;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Blocking HTTP client with rate-limit retry
pub struct BlockingHttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: BlockingAuthenticator,
    retry: RetryPolicy,
}

impl BlockingHttpClient {
    /// Create a new blocking client without authentication
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        Self::with_auth(config, AuthConfig::None)
    }

    /// Create a blocking client with authentication
    pub fn with_auth(config: HttpClientConfig, auth_config: AuthConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let authenticator = BlockingAuthenticator::with_client(auth_config, client.clone());
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
    pub fn authenticator(&self) -> &BlockingAuthenticator {
        &self.authenticator
    }

    /// Make a GET request and parse the JSON response
    pub fn get_json<T: DeserializeOwned>(&self, url: &str, config: RequestConfig) -> Result<T> {
        let response = self.get(url, &config)?;
        let text = response.text()?;
        decode_json(url, &text)
    }

    /// Make a GET request and return the raw body
    pub fn get_bytes(&self, url: &str, config: RequestConfig) -> Result<Bytes> {
        let response = self.get(url, &config)?;
        Ok(response.bytes()?)
    }

    /// Make a GET request, retrying on rate limits
    pub fn get(&self, url: &str, config: &RequestConfig) -> Result<Response> {
        let full_url = build_url(self.config.base_url.as_deref(), url);
        let policy = match config.max_retries {
            Some(retries) => self.retry.with_max_retries(retries),
            None => self.retry,
        };

        policy.execute_blocking(|| self.attempt(&full_url, config))
    }

    fn attempt(&self, full_url: &str, config: &RequestConfig) -> Result<Response> {
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
            req = self.authenticator.apply(req)?;
        }

        let response = req.send()?;
        let status = response.status();
        if status.is_success() {
            debug!("Request succeeded: GET {}", full_url);
            return Ok(response);
        }

        let headers = response.headers().clone();
        let body = response.text().unwrap_or_default();
        Err(classify_status(
            status,
            &headers,
            config.resource_or(full_url),
            body,
        ))
    }
}

impl std::fmt::Debug for BlockingHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingHttpClient")
            .field("config", &self.config)
            .field("retry", &self.retry)
            .field("has_credentials", &self.authenticator.has_credentials())
            .finish_non_exhaustive()
    }
}
