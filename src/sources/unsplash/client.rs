//! Async Unsplash client

use super::blocking::BlockingUnsplash;
use super::models::{DownloadLink, Photo, SearchResult};
use super::params::{RandomParams, SearchParams};
use crate::auth::AuthConfig;
use crate::config::{resolve_required, HttpClientConfig, UNSPLASH_ACCESS_KEY};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{Page, PageParams};
use crate::source::MediaSource;
use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

/// Public API endpoint
pub const BASE_URL: &str = "https://api.unsplash.com";

/// Builder shared by the async and blocking clients
#[derive(Debug)]
pub struct UnsplashBuilder {
    access_key: Option<String>,
    config: Option<HttpClientConfig>,
    read_env: bool,
}

impl Default for UnsplashBuilder {
    fn default() -> Self {
        Self {
            access_key: None,
            config: None,
            read_env: true,
        }
    }
}

impl UnsplashBuilder {
    /// Set the access key (falls back to `UNSPLASH_ACCESS_KEY`)
    pub fn access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    /// Do not fall back to `UNSPLASH_ACCESS_KEY`
    pub fn ignore_env(mut self) -> Self {
        self.read_env = false;
        self
    }

    /// Set the transport configuration (falls back to the environment)
    pub fn config(mut self, config: HttpClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the async client
    pub fn build(self) -> Result<Unsplash> {
        let (config, auth) = self.resolve()?;
        Ok(Unsplash {
            http: HttpClient::with_auth(config, auth)?,
        })
    }

    /// Build the blocking client
    pub fn build_blocking(self) -> Result<BlockingUnsplash> {
        let (config, auth) = self.resolve()?;
        BlockingUnsplash::from_parts(config, auth)
    }

    fn resolve(self) -> Result<(HttpClientConfig, AuthConfig)> {
        let access_key = if self.read_env {
            resolve_required(self.access_key, UNSPLASH_ACCESS_KEY, "Unsplash access key")?
        } else {
            self.access_key
                .filter(|key| !key.is_empty())
                .ok_or_else(|| Error::auth("Unsplash access key is required."))?
        };

        let mut config = match self.config {
            Some(config) => config,
            None => HttpClientConfig::from_env()?,
        };
        if config.base_url.is_none() {
            config.base_url = Some(BASE_URL.to_string());
        }

        Ok((
            config,
            AuthConfig::prefixed_header("Authorization", "Client-ID ", access_key),
        ))
    }
}

/// Async client for the Unsplash API
///
/// Downloads register themselves with the tracking endpoint before the
/// image is fetched, as the API terms require.
pub struct Unsplash {
    http: HttpClient,
}

impl Unsplash {
    /// Client configured from the environment
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a new client builder
    pub fn builder() -> UnsplashBuilder {
        UnsplashBuilder::default()
    }

    /// One page of search results
    pub async fn search(&self, params: &SearchParams) -> Result<Page<Photo>> {
        debug!("Unsplash search page {}", params.page());
        let result: SearchResult = self
            .http
            .get_json("search/photos", search_request(params))
            .await?;
        Ok(result.into_page(params))
    }

    /// Full photo by ID
    pub async fn photo(&self, id: &str) -> Result<Photo> {
        self.http
            .get_json(&format!("photos/{id}"), RequestConfig::new().resource(format!("photo {id}")))
            .await
    }

    /// One random photo, optionally narrowed by `params`
    pub async fn random(&self, params: Option<&RandomParams>) -> Result<Photo> {
        self.http.get_json("photos/random", random_request(params)).await
    }
}

#[async_trait]
impl MediaSource for Unsplash {
    type Params = SearchParams;
    type Item = Photo;

    fn name(&self) -> &'static str {
        "unsplash"
    }

    async fn fetch_page(&self, params: &SearchParams) -> Result<Page<Photo>> {
        self.search(params).await
    }

    async fn download(&self, photo: &Photo) -> Result<Bytes> {
        let link: DownloadLink = self
            .http
            .get_json(&photo.links.download_location, tracking_request(photo))
            .await?;
        self.http.get_bytes(&link.url, image_request(photo)).await
    }
}

impl std::fmt::Debug for Unsplash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Unsplash(authenticated)")
    }
}

// ============================================================================
// Request building shared with the blocking client
// ============================================================================

pub(super) fn search_request(params: &SearchParams) -> RequestConfig {
    RequestConfig::new()
        .query_pairs(params.to_query())
        .resource("search")
}

pub(super) fn random_request(params: Option<&RandomParams>) -> RequestConfig {
    let config = RequestConfig::new().resource("random photo");
    match params {
        Some(params) => config.query_pairs(params.to_query()),
        None => config,
    }
}

pub(super) fn tracking_request(photo: &Photo) -> RequestConfig {
    RequestConfig::new().resource(format!("download link for photo {}", photo.id))
}

pub(super) fn image_request(photo: &Photo) -> RequestConfig {
    RequestConfig::new()
        .skip_auth()
        .resource(format!("image for photo {}", photo.id))
}
