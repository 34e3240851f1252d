//! Blocking Reddit client

use super::client::{
    download_request, download_url, listing_request, parse_post, post_request, RedditBuilder,
};
use super::models::{Listing, RawListing, RedditPost, Thing};
use super::params::RedditParams;
use crate::auth::AuthConfig;
use crate::config::HttpClientConfig;
use crate::error::Result;
use crate::http::BlockingHttpClient;
use crate::pagination::{Page, PageParams};
use crate::source::BlockingMediaSource;
use crate::types::JsonValue;
use bytes::Bytes;
use tracing::debug;

/// Blocking client for the Reddit OAuth API
pub struct BlockingReddit {
    http: BlockingHttpClient,
}

impl BlockingReddit {
    /// Client configured from the environment
    pub fn new() -> Result<Self> {
        RedditBuilder::default().build_blocking()
    }

    /// Create a new client builder
    pub fn builder() -> RedditBuilder {
        RedditBuilder::default()
    }

    pub(super) fn from_parts(config: HttpClientConfig, auth: AuthConfig) -> Result<Self> {
        Ok(Self {
            http: BlockingHttpClient::with_auth(config, auth)?,
        })
    }

    /// One page of media posts
    pub fn listing(&self, params: &RedditParams) -> Result<Page<RedditPost>> {
        debug!(
            "Reddit listing {} page {} after {:?}",
            params.path(),
            params.page(),
            params.after()
        );
        let raw: Thing<RawListing> = self.http.get_json(&params.path(), listing_request(params))?;
        Ok(Listing::from_raw(raw.data, params).into_page(params))
    }

    /// Media posts of one submission
    pub fn post(&self, id: &str) -> Result<Vec<RedditPost>> {
        let body: Vec<JsonValue> = self
            .http
            .get_json(&format!("comments/{id}"), post_request(id))?;
        parse_post(body)
    }
}

impl BlockingMediaSource for BlockingReddit {
    type Params = RedditParams;
    type Item = RedditPost;

    fn name(&self) -> &'static str {
        "reddit"
    }

    fn fetch_page(&self, params: &RedditParams) -> Result<Page<RedditPost>> {
        self.listing(params)
    }

    fn download(&self, post: &RedditPost) -> Result<Bytes> {
        let url = download_url(post)?;
        self.http.get_bytes(url, download_request(post))
    }
}

impl std::fmt::Debug for BlockingReddit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BlockingReddit(authenticated)")
    }
}
