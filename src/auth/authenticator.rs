//! Authenticator implementation
//!
//! Applies credentials to outgoing requests. Static keys are attached as
//! configured; OAuth2 client-credentials tokens are fetched on first use,
//! cached, and refreshed once they come within the expiry margin.

use super::cache::{BlockingTokenCache, TokenCache};
use super::types::{AuthConfig, AuthPart, Credential, Secret, DEFAULT_TOKEN_LIFETIME_SECS};
use crate::error::{Error, Result};
use crate::http::retry_after;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

/// Authenticator for the async transport
#[derive(Debug)]
pub struct Authenticator {
    config: AuthConfig,
    cache: TokenCache,
    http_client: reqwest::Client,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Create an authenticator with a custom HTTP client for token requests
    pub fn with_client(config: AuthConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            cache: TokenCache::new(),
            http_client,
        }
    }

    /// Auth configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Whether any credential is configured
    pub fn has_credentials(&self) -> bool {
        self.config.is_configured()
    }

    /// Resolve the auth part for the next request
    pub async fn resolve(&self) -> Result<Option<AuthPart>> {
        match &self.config {
            AuthConfig::None => Ok(None),
            AuthConfig::ApiKey { .. } => Ok(self.config.static_part()),
            AuthConfig::Oauth2ClientCredentials { .. } => {
                let credential = self
                    .cache
                    .get_or_refresh(|| self.fetch_new_token())
                    .await?;
                Ok(Some(AuthPart::bearer(&credential.token)))
            }
        }
    }

    /// Apply authentication to a request builder
    pub async fn apply(&self, req: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
        Ok(match self.resolve().await? {
            None => req,
            Some(AuthPart::Header { name, value }) => req.header(name, value.expose()),
            Some(AuthPart::Query { name, value }) => req.query(&[(name.as_str(), value.expose())]),
        })
    }

    /// Currently cached bearer credential
    pub async fn cached_credential(&self) -> Option<Credential> {
        self.cache.current().await
    }

    /// Forget the cached credential
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    async fn fetch_new_token(&self) -> Result<Credential> {
        let grant = TokenGrant::from_config(&self.config)?;
        debug!("Requesting client-credentials token from {}", grant.token_url);

        let response = self
            .http_client
            .post(grant.token_url)
            .basic_auth(grant.client_id, Some(grant.client_secret.expose()))
            .form(&grant.form())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            return Err(token_error(status, &headers, body));
        }

        let token: TokenResponse = response.json().await?;
        token.into_credential()
    }
}

/// Authenticator for the blocking transport
#[derive(Debug)]
pub struct BlockingAuthenticator {
    config: AuthConfig,
    cache: BlockingTokenCache,
    http_client: reqwest::blocking::Client,
}

impl BlockingAuthenticator {
    /// Create an authenticator with a custom HTTP client for token requests
    pub fn with_client(config: AuthConfig, http_client: reqwest::blocking::Client) -> Self {
        Self {
            config,
            cache: BlockingTokenCache::new(),
            http_client,
        }
    }

    /// Auth configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Whether any credential is configured
    pub fn has_credentials(&self) -> bool {
        self.config.is_configured()
    }

    /// Resolve the auth part for the next request
    pub fn resolve(&self) -> Result<Option<AuthPart>> {
        match &self.config {
            AuthConfig::None => Ok(None),
            AuthConfig::ApiKey { .. } => Ok(self.config.static_part()),
            AuthConfig::Oauth2ClientCredentials { .. } => {
                let credential = self.cache.get_or_refresh(|| self.fetch_new_token())?;
                Ok(Some(AuthPart::bearer(&credential.token)))
            }
        }
    }

    /// Apply authentication to a request builder
    pub fn apply(
        &self,
        req: reqwest::blocking::RequestBuilder,
    ) -> Result<reqwest::blocking::RequestBuilder> {
        Ok(match self.resolve()? {
            None => req,
            Some(AuthPart::Header { name, value }) => req.header(name, value.expose()),
            Some(AuthPart::Query { name, value }) => req.query(&[(name.as_str(), value.expose())]),
        })
    }

    /// Currently cached bearer credential
    pub fn cached_credential(&self) -> Option<Credential> {
        self.cache.current()
    }

    /// Forget the cached credential
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn fetch_new_token(&self) -> Result<Credential> {
        let grant = TokenGrant::from_config(&self.config)?;
        debug!("Requesting client-credentials token from {}", grant.token_url);

        let response = self
            .http_client
            .post(grant.token_url)
            .basic_auth(grant.client_id, Some(grant.client_secret.expose()))
            .form(&grant.form())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().unwrap_or_default();
            return Err(token_error(status, &headers, body));
        }

        let token: TokenResponse = response.json()?;
        token.into_credential()
    }
}

/// Borrowed client-credentials settings for one token request
struct TokenGrant<'a> {
    token_url: &'a str,
    client_id: &'a str,
    client_secret: &'a Secret,
    scopes: &'a [String],
}

impl<'a> TokenGrant<'a> {
    fn from_config(config: &'a AuthConfig) -> Result<Self> {
        match config {
            AuthConfig::Oauth2ClientCredentials {
                token_url,
                client_id,
                client_secret,
                scopes,
            } => Ok(Self {
                token_url,
                client_id,
                client_secret,
                scopes,
            }),
            _ => Err(Error::auth("Token refresh not supported for this auth type")),
        }
    }

    fn form(&self) -> Vec<(&'static str, String)> {
        let mut form = vec![("grant_type", "client_credentials".to_string())];
        if !self.scopes.is_empty() {
            form.push(("scope", self.scopes.join(" ")));
        }
        form
    }
}

fn token_error(status: StatusCode, headers: &HeaderMap, body: String) -> Error {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::auth(format!(
            "Token endpoint rejected the client credentials ({status}). Check the client ID and secret."
        )),
        StatusCode::TOO_MANY_REQUESTS => Error::rate_limited(retry_after(headers)),
        _ => Error::token_refresh(format!("Token request failed with status {status}: {body}")),
    }
}

/// OAuth2 token response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<i64>,
    #[allow(dead_code)]
    token_type: Option<String>,
}

impl TokenResponse {
    fn into_credential(self) -> Result<Credential> {
        let token = self
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::auth("Token response did not contain an access_token"))?;
        Ok(Credential::expires_in(
            token,
            self.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS),
        ))
    }
}
