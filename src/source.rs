//! Source capability traits
//!
//! Every source adapter implements the same two operations, fetching one
//! page and downloading one item. Pagination over any source comes for free
//! from the provided `pages` / `items` methods.

use crate::download;
use crate::error::Result;
use crate::pagination::{flatten, flatten_blocking, paginate, paginate_blocking, Page, PageParams};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{BoxStream, StreamExt};
use std::path::Path;

/// A downloadable item returned by a source
pub trait MediaItem {
    /// Source-specific identifier
    fn id(&self) -> &str;

    /// URL of the full-size media, if the item has one
    fn media_url(&self) -> Option<&str>;

    /// File name to use when saving the media
    fn file_name(&self) -> String {
        let extension = self
            .media_url()
            .and_then(download::extension_from_url)
            .unwrap_or_else(|| "jpg".to_string());
        format!("{}.{extension}", self.id())
    }
}

/// Async source client
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Parameter set for one page request
    type Params: PageParams + Send + Sync + 'static;
    /// Item type on each page
    type Item: MediaItem + Send + Sync + 'static;

    /// Short source name used in logs
    fn name(&self) -> &'static str;

    /// Fetch exactly one page
    async fn fetch_page(&self, params: &Self::Params) -> Result<Page<Self::Item>>;

    /// Download the full-size media for one item
    async fn download(&self, item: &Self::Item) -> Result<Bytes>;

    /// Download one item and write it to `path`, returning the bytes
    async fn download_to(&self, item: &Self::Item, path: &Path) -> Result<Bytes> {
        let bytes = self.download(item).await?;
        download::save(&bytes, path).await?;
        Ok(bytes)
    }

    /// Lazily walk every page starting at `params`
    fn pages(&self, params: Self::Params) -> BoxStream<'_, Result<Page<Self::Item>>>
    where
        Self: Sized,
    {
        paginate(params, move |p: Self::Params| async move { self.fetch_page(&p).await }).boxed()
    }

    /// Lazily walk every item starting at `params`
    fn items(&self, params: Self::Params) -> BoxStream<'_, Result<Self::Item>>
    where
        Self: Sized,
    {
        flatten(params, move |p: Self::Params| async move { self.fetch_page(&p).await }).boxed()
    }
}

/// Blocking source client
pub trait BlockingMediaSource {
    /// Parameter set for one page request
    type Params: PageParams + 'static;
    /// Item type on each page
    type Item: MediaItem + 'static;

    /// Short source name used in logs
    fn name(&self) -> &'static str;

    /// Fetch exactly one page
    fn fetch_page(&self, params: &Self::Params) -> Result<Page<Self::Item>>;

    /// Download the full-size media for one item
    fn download(&self, item: &Self::Item) -> Result<Bytes>;

    /// Download one item and write it to `path`, returning the bytes
    fn download_to(&self, item: &Self::Item, path: &Path) -> Result<Bytes> {
        let bytes = self.download(item)?;
        download::save_blocking(&bytes, path)?;
        Ok(bytes)
    }

    /// Lazily walk every page starting at `params`
    fn pages(
        &self,
        params: Self::Params,
    ) -> Box<dyn Iterator<Item = Result<Page<Self::Item>>> + '_>
    where
        Self: Sized,
    {
        Box::new(paginate_blocking(params, move |p: &Self::Params| {
            self.fetch_page(p)
        }))
    }

    /// Lazily walk every item starting at `params`
    fn items(&self, params: Self::Params) -> Box<dyn Iterator<Item = Result<Self::Item>> + '_>
    where
        Self: Sized,
    {
        Box::new(flatten_blocking(params, move |p: &Self::Params| {
            self.fetch_page(p)
        }))
    }
}
