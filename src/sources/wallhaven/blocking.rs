//! Blocking Wallhaven client

use super::client::{
    check_nsfw_access, collection_request, collections_request, download_request, require_key,
    search_request, WallhavenBuilder,
};
use super::models::{Collection, Envelope, Listing, Tag, UserSettings, Wallpaper};
use super::params::SearchParams;
use crate::auth::AuthConfig;
use crate::config::HttpClientConfig;
use crate::error::Result;
use crate::http::{BlockingHttpClient, RequestConfig};
use crate::pagination::{Page, PageParams};
use crate::source::BlockingMediaSource;
use bytes::Bytes;
use tracing::debug;

/// Blocking client for the Wallhaven API v1
pub struct BlockingWallhaven {
    http: BlockingHttpClient,
    has_key: bool,
}

impl BlockingWallhaven {
    /// Client configured from the environment
    pub fn new() -> Result<Self> {
        WallhavenBuilder::default().build_blocking()
    }

    /// Create a new client builder
    pub fn builder() -> WallhavenBuilder {
        WallhavenBuilder::default()
    }

    pub(super) fn from_parts(config: HttpClientConfig, auth: AuthConfig) -> Result<Self> {
        let has_key = auth.is_configured();
        Ok(Self {
            http: BlockingHttpClient::with_auth(config, auth)?,
            has_key,
        })
    }

    /// Whether an API key is configured
    pub fn is_authenticated(&self) -> bool {
        self.has_key
    }

    /// Full metadata for one wallpaper
    pub fn wallpaper(&self, id: &str) -> Result<Wallpaper> {
        let envelope: Envelope<Wallpaper> = self.http.get_json(
            &format!("w/{id}"),
            RequestConfig::new().resource(format!("wallpaper {id}")),
        )?;
        Ok(envelope.data)
    }

    /// One page of search results
    pub fn search(&self, params: &SearchParams) -> Result<Page<Wallpaper>> {
        check_nsfw_access(self.has_key, params)?;
        debug!("Wallhaven search page {}", params.page());
        let listing: Listing = self.http.get_json("search", search_request(params))?;
        Ok(listing.into())
    }

    /// Tag metadata
    pub fn tag(&self, id: u64) -> Result<Tag> {
        let envelope: Envelope<Tag> = self.http.get_json(
            &format!("tag/{id}"),
            RequestConfig::new().resource(format!("tag {id}")),
        )?;
        Ok(envelope.data)
    }

    /// Settings of the key owner
    pub fn settings(&self) -> Result<UserSettings> {
        require_key(self.has_key, "User settings")?;
        let envelope: Envelope<UserSettings> =
            self.http.get_json("settings", RequestConfig::new())?;
        Ok(envelope.data)
    }

    /// Collections of `username`, or of the key owner when `None`
    pub fn collections(&self, username: Option<&str>) -> Result<Vec<Collection>> {
        let (path, config) = collections_request(self.has_key, username)?;
        let envelope: Envelope<Vec<Collection>> = self.http.get_json(&path, config)?;
        Ok(envelope.data)
    }

    /// One page of wallpapers in a collection
    pub fn collection(&self, username: &str, id: u64, page: u32) -> Result<Page<Wallpaper>> {
        let (path, config) = collection_request(username, id, page);
        let listing: Listing = self.http.get_json(&path, config)?;
        Ok(listing.into())
    }
}

impl BlockingMediaSource for BlockingWallhaven {
    type Params = SearchParams;
    type Item = Wallpaper;

    fn name(&self) -> &'static str {
        "wallhaven"
    }

    fn fetch_page(&self, params: &SearchParams) -> Result<Page<Wallpaper>> {
        self.search(params)
    }

    fn download(&self, wallpaper: &Wallpaper) -> Result<Bytes> {
        self.http.get_bytes(&wallpaper.path, download_request(wallpaper))
    }
}

impl std::fmt::Debug for BlockingWallhaven {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingWallhaven")
            .field("authenticated", &self.has_key)
            .finish_non_exhaustive()
    }
}
