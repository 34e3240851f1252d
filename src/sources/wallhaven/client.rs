//! Async Wallhaven client

use super::blocking::BlockingWallhaven;
use super::models::{Collection, Envelope, Listing, Tag, UserSettings, Wallpaper};
use super::params::SearchParams;
use crate::auth::AuthConfig;
use crate::config::{resolve, HttpClientConfig, WALLHAVEN_API_KEY};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{Page, PageParams};
use crate::source::MediaSource;
use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

/// Public API endpoint
pub const BASE_URL: &str = "https://wallhaven.cc/api/v1";

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Builder shared by the async and blocking clients
#[derive(Debug)]
pub struct WallhavenBuilder {
    api_key: Option<String>,
    config: Option<HttpClientConfig>,
    read_env: bool,
}

impl Default for WallhavenBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            config: None,
            read_env: true,
        }
    }
}

impl WallhavenBuilder {
    /// Set the API key (falls back to `WALLHAVEN_API_KEY`)
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Do not fall back to `WALLHAVEN_API_KEY`
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
    pub fn build(self) -> Result<Wallhaven> {
        let (config, auth) = self.resolve()?;
        let has_key = auth.is_configured();
        Ok(Wallhaven {
            http: HttpClient::with_auth(config, auth)?,
            has_key,
        })
    }

    /// Build the blocking client
    pub fn build_blocking(self) -> Result<BlockingWallhaven> {
        let (config, auth) = self.resolve()?;
        BlockingWallhaven::from_parts(config, auth)
    }

    fn resolve(self) -> Result<(HttpClientConfig, AuthConfig)> {
        let mut config = match self.config {
            Some(config) => config,
            None => HttpClientConfig::from_env()?,
        };
        if config.base_url.is_none() {
            config.base_url = Some(BASE_URL.to_string());
        }

        let api_key = if self.read_env {
            resolve(self.api_key, WALLHAVEN_API_KEY)
        } else {
            self.api_key.filter(|key| !key.is_empty())
        };
        let auth = match api_key {
            Some(key) => AuthConfig::header(API_KEY_HEADER, key),
            None => AuthConfig::None,
        };
        Ok((config, auth))
    }
}

/// Async client for the Wallhaven API v1
///
/// An API key is only needed for NSFW content, account settings, and the
/// key owner's own collections.
pub struct Wallhaven {
    http: HttpClient,
    has_key: bool,
}

impl Wallhaven {
    /// Client configured from the environment
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a new client builder
    pub fn builder() -> WallhavenBuilder {
        WallhavenBuilder::default()
    }

    /// Whether an API key is configured
    pub fn is_authenticated(&self) -> bool {
        self.has_key
    }

    /// Full metadata for one wallpaper
    pub async fn wallpaper(&self, id: &str) -> Result<Wallpaper> {
        let envelope: Envelope<Wallpaper> = self
            .http
            .get_json(&format!("w/{id}"), RequestConfig::new().resource(format!("wallpaper {id}")))
            .await?;
        Ok(envelope.data)
    }

    /// One page of search results
    pub async fn search(&self, params: &SearchParams) -> Result<Page<Wallpaper>> {
        check_nsfw_access(self.has_key, params)?;
        debug!("Wallhaven search page {}", params.page());
        let listing: Listing = self.http.get_json("search", search_request(params)).await?;
        Ok(listing.into())
    }

    /// Tag metadata
    pub async fn tag(&self, id: u64) -> Result<Tag> {
        let envelope: Envelope<Tag> = self
            .http
            .get_json(&format!("tag/{id}"), RequestConfig::new().resource(format!("tag {id}")))
            .await?;
        Ok(envelope.data)
    }

    /// Settings of the key owner
    pub async fn settings(&self) -> Result<UserSettings> {
        require_key(self.has_key, "User settings")?;
        let envelope: Envelope<UserSettings> =
            self.http.get_json("settings", RequestConfig::new()).await?;
        Ok(envelope.data)
    }

    /// Collections of `username`, or of the key owner when `None`
    pub async fn collections(&self, username: Option<&str>) -> Result<Vec<Collection>> {
        let (path, config) = collections_request(self.has_key, username)?;
        let envelope: Envelope<Vec<Collection>> = self.http.get_json(&path, config).await?;
        Ok(envelope.data)
    }

    /// One page of wallpapers in a collection
    pub async fn collection(&self, username: &str, id: u64, page: u32) -> Result<Page<Wallpaper>> {
        let (path, config) = collection_request(username, id, page);
        let listing: Listing = self.http.get_json(&path, config).await?;
        Ok(listing.into())
    }
}

#[async_trait]
impl MediaSource for Wallhaven {
    type Params = SearchParams;
    type Item = Wallpaper;

    fn name(&self) -> &'static str {
        "wallhaven"
    }

    async fn fetch_page(&self, params: &SearchParams) -> Result<Page<Wallpaper>> {
        self.search(params).await
    }

    async fn download(&self, wallpaper: &Wallpaper) -> Result<Bytes> {
        self.http.get_bytes(&wallpaper.path, download_request(wallpaper)).await
    }
}

impl std::fmt::Debug for Wallhaven {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallhaven")
            .field("authenticated", &self.has_key)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Request building shared with the blocking client
// ============================================================================

pub(super) fn check_nsfw_access(has_key: bool, params: &SearchParams) -> Result<()> {
    if params.wants_nsfw() && !has_key {
        return Err(Error::auth(
            "NSFW content requires an API key. Provide one when creating the Wallhaven client.",
        ));
    }
    Ok(())
}

pub(super) fn require_key(has_key: bool, what: &str) -> Result<()> {
    if has_key {
        Ok(())
    } else {
        Err(Error::auth(format!(
            "{what} require an API key. Provide one when creating the Wallhaven client."
        )))
    }
}

pub(super) fn search_request(params: &SearchParams) -> RequestConfig {
    RequestConfig::new()
        .query_pairs(params.to_query())
        .resource("search")
}

pub(super) fn collections_request(
    has_key: bool,
    username: Option<&str>,
) -> Result<(String, RequestConfig)> {
    match username {
        Some(user) => Ok((
            format!("collections/{user}"),
            RequestConfig::new().resource(format!("collections of {user}")),
        )),
        None => {
            require_key(has_key, "Your own collections")?;
            Ok(("collections".to_string(), RequestConfig::new()))
        }
    }
}

pub(super) fn collection_request(username: &str, id: u64, page: u32) -> (String, RequestConfig) {
    let mut config = RequestConfig::new().resource(format!("collection {username}/{id}"));
    if page > 1 {
        config = config.query("page", page.to_string());
    }
    (format!("collections/{username}/{id}"), config)
}

pub(super) fn download_request(wallpaper: &Wallpaper) -> RequestConfig {
    RequestConfig::new()
        .skip_auth()
        .resource(format!("image for wallpaper {}", wallpaper.id))
}
