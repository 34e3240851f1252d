//! Async Reddit client

use super::blocking::BlockingReddit;
use super::models::{Listing, RawListing, RedditPost, Thing};
use super::params::RedditParams;
use crate::auth::AuthConfig;
use crate::config::{
    resolve_required, HttpClientConfig, REDDIT_CLIENT_ID, REDDIT_CLIENT_SECRET,
    REDDIT_USER_AGENT,
};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{Page, PageParams};
use crate::source::{MediaItem, MediaSource};
use crate::types::JsonValue;
use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

/// OAuth API endpoint
pub const BASE_URL: &str = "https://oauth.reddit.com";

/// App-only token endpoint
pub const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

/// Builder shared by the async and blocking clients
///
/// Reddit rejects requests without a descriptive user agent, recommended
/// as `platform:app_id/version (by u/username)`.
#[derive(Default)]
pub struct RedditBuilder {
    client_id: Option<String>,
    client_secret: Option<String>,
    user_agent: Option<String>,
    token_url: Option<String>,
    config: Option<HttpClientConfig>,
    ignore_env: bool,
}

impl RedditBuilder {
    /// Set the app client ID (falls back to `REDDIT_CLIENT_ID`)
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set the app secret (falls back to `REDDIT_CLIENT_SECRET`)
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Set the user agent (falls back to `REDDIT_USER_AGENT`)
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Override the token endpoint
    pub fn token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = Some(token_url.into());
        self
    }

    /// Do not fall back to the `REDDIT_*` environment variables
    pub fn ignore_env(mut self) -> Self {
        self.ignore_env = true;
        self
    }

    /// Set the transport configuration (falls back to the environment)
    pub fn config(mut self, config: HttpClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the async client
    pub fn build(self) -> Result<Reddit> {
        let (config, auth) = self.resolve()?;
        Ok(Reddit {
            http: HttpClient::with_auth(config, auth)?,
        })
    }

    /// Build the blocking client
    pub fn build_blocking(self) -> Result<BlockingReddit> {
        let (config, auth) = self.resolve()?;
        BlockingReddit::from_parts(config, auth)
    }

    fn resolve(self) -> Result<(HttpClientConfig, AuthConfig)> {
        let required = |value: Option<String>, name: &str, what: &str| {
            if self.ignore_env {
                value
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| Error::auth(format!("{what} is required.")))
            } else {
                resolve_required(value, name, what)
            }
        };

        let client_id = required(self.client_id.clone(), REDDIT_CLIENT_ID, "Reddit client_id")?;
        let client_secret = required(
            self.client_secret.clone(),
            REDDIT_CLIENT_SECRET,
            "Reddit client_secret",
        )?;
        let user_agent = required(self.user_agent.clone(), REDDIT_USER_AGENT, "Reddit user_agent")?;

        let mut config = match self.config {
            Some(config) => config,
            None => HttpClientConfig::from_env()?,
        };
        if config.base_url.is_none() {
            config.base_url = Some(BASE_URL.to_string());
        }
        config.user_agent = user_agent;

        let token_url = self.token_url.unwrap_or_else(|| TOKEN_URL.to_string());

        Ok((
            config,
            AuthConfig::client_credentials(token_url, client_id, client_secret),
        ))
    }
}

impl std::fmt::Debug for RedditBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedditBuilder")
            .field("client_id", &self.client_id)
            .field("user_agent", &self.user_agent)
            .field("token_url", &self.token_url)
            .finish_non_exhaustive()
    }
}

/// Async client for the Reddit OAuth API
///
/// Uses app-only client credentials; the bearer token is fetched on the
/// first request and reused until shortly before it expires.
pub struct Reddit {
    http: HttpClient,
}

impl Reddit {
    /// Client configured from the environment
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a new client builder
    pub fn builder() -> RedditBuilder {
        RedditBuilder::default()
    }

    /// One page of media posts
    ///
    /// Galleries are expanded and the media and NSFW filters of `params`
    /// are applied, so a page may hold fewer posts than requested.
    pub async fn listing(&self, params: &RedditParams) -> Result<Page<RedditPost>> {
        debug!(
            "Reddit listing {} page {} after {:?}",
            params.path(),
            params.page(),
            params.after()
        );
        let raw: Thing<RawListing> = self
            .http
            .get_json(&params.path(), listing_request(params))
            .await?;
        Ok(Listing::from_raw(raw.data, params).into_page(params))
    }

    /// Media posts of one submission
    ///
    /// Empty for text posts and unsupported links; a gallery yields one
    /// post per image.
    pub async fn post(&self, id: &str) -> Result<Vec<RedditPost>> {
        let body: Vec<JsonValue> = self
            .http
            .get_json(&format!("comments/{id}"), post_request(id))
            .await?;
        parse_post(body)
    }
}

#[async_trait]
impl MediaSource for Reddit {
    type Params = RedditParams;
    type Item = RedditPost;

    fn name(&self) -> &'static str {
        "reddit"
    }

    async fn fetch_page(&self, params: &RedditParams) -> Result<Page<RedditPost>> {
        self.listing(params).await
    }

    async fn download(&self, post: &RedditPost) -> Result<Bytes> {
        let url = download_url(post)?;
        self.http.get_bytes(url, download_request(post)).await
    }
}

impl std::fmt::Debug for Reddit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Reddit(authenticated)")
    }
}

// ============================================================================
// Request building shared with the blocking client
// ============================================================================

pub(super) fn listing_request(params: &RedditParams) -> RequestConfig {
    RequestConfig::new()
        .query_pairs(params.to_query())
        .resource(format!("subreddit {}", params.subreddit()))
}

pub(super) fn post_request(id: &str) -> RequestConfig {
    RequestConfig::new()
        .query("raw_json", "1")
        .resource(format!("post {id}"))
}

/// First element of `/comments/{id}` is a listing holding the submission
pub(super) fn parse_post(body: Vec<JsonValue>) -> Result<Vec<RedditPost>> {
    let Some(first) = body.into_iter().next() else {
        return Ok(Vec::new());
    };
    let listing: Thing<RawListing> = serde_json::from_value(first)?;
    Ok(listing
        .data
        .children
        .into_iter()
        .next()
        .map(|child| child.data.into_posts())
        .unwrap_or_default())
}

pub(super) fn download_url(post: &RedditPost) -> Result<&str> {
    post.media_url().ok_or_else(|| {
        Error::validation(format!("Post '{}' has no downloadable URL", post.id))
    })
}

pub(super) fn download_request(post: &RedditPost) -> RequestConfig {
    RequestConfig::new()
        .skip_auth()
        .resource(format!("media for post {}", post.id))
}
