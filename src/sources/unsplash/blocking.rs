//! Blocking Unsplash client

use super::client::{
    image_request, random_request, search_request, tracking_request, UnsplashBuilder,
};
use super::models::{DownloadLink, Photo, SearchResult};
use super::params::{RandomParams, SearchParams};
use crate::auth::AuthConfig;
use crate::config::HttpClientConfig;
use crate::error::Result;
use crate::http::{BlockingHttpClient, RequestConfig};
use crate::pagination::{Page, PageParams};
use crate::source::BlockingMediaSource;
use bytes::Bytes;
use tracing::debug;

/// Blocking client for the Unsplash API
pub struct BlockingUnsplash {
    http: BlockingHttpClient,
}

impl BlockingUnsplash {
    /// Client configured from the environment
    pub fn new() -> Result<Self> {
        UnsplashBuilder::default().build_blocking()
    }

    /// Create a new client builder
    pub fn builder() -> UnsplashBuilder {
        UnsplashBuilder::default()
    }

    pub(super) fn from_parts(config: HttpClientConfig, auth: AuthConfig) -> Result<Self> {
        Ok(Self {
            http: BlockingHttpClient::with_auth(config, auth)?,
        })
    }

    /// One page of search results
    pub fn search(&self, params: &SearchParams) -> Result<Page<Photo>> {
        debug!("Unsplash search page {}", params.page());
        let result: SearchResult = self.http.get_json("search/photos", search_request(params))?;
        Ok(result.into_page(params))
    }

    /// Full photo by ID
    pub fn photo(&self, id: &str) -> Result<Photo> {
        self.http.get_json(
            &format!("photos/{id}"),
            RequestConfig::new().resource(format!("photo {id}")),
        )
    }

    /// One random photo, optionally narrowed by `params`
    pub fn random(&self, params: Option<&RandomParams>) -> Result<Photo> {
        self.http.get_json("photos/random", random_request(params))
    }
}

impl BlockingMediaSource for BlockingUnsplash {
    type Params = SearchParams;
    type Item = Photo;

    fn name(&self) -> &'static str {
        "unsplash"
    }

    fn fetch_page(&self, params: &SearchParams) -> Result<Page<Photo>> {
        self.search(params)
    }

    fn download(&self, photo: &Photo) -> Result<Bytes> {
        let link: DownloadLink = self
            .http
            .get_json(&photo.links.download_location, tracking_request(photo))?;
        self.http.get_bytes(&link.url, image_request(photo))
    }
}

impl std::fmt::Debug for BlockingUnsplash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BlockingUnsplash(authenticated)")
    }
}
