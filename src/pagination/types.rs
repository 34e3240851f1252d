//! Pagination types and traits
//!
//! Defines the page container and the continuation contract shared by the
//! async stream and the blocking iterator.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pagination metadata reported by one fetch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Page number of this page (1-based)
    pub current_page: u32,
    /// Last page number, when the source reports one
    pub last_page: Option<u32>,
    /// Items per page, when reported
    pub per_page: Option<u32>,
    /// Total number of items across all pages, when reported
    pub total: Option<u64>,
    /// Server-issued seed pinning a random ordering
    pub seed: Option<String>,
    /// Cursor for the next page (cursor-paginated sources)
    pub next_cursor: Option<String>,
}

impl PaginationMeta {
    /// Metadata for a page-numbered source
    pub fn numbered(current_page: u32, last_page: u32) -> Self {
        Self {
            current_page,
            last_page: Some(last_page),
            ..Self::default()
        }
    }

    /// Metadata for a cursor-paginated source
    pub fn cursor(current_page: u32, next_cursor: Option<String>) -> Self {
        Self {
            current_page,
            next_cursor,
            ..Self::default()
        }
    }

    /// Attach a seed
    #[must_use]
    pub fn with_seed(mut self, seed: Option<String>) -> Self {
        self.seed = seed;
        self
    }

    /// Whether another page follows this one
    ///
    /// With a known last page this is `current_page < last_page`, so a
    /// report of `last_page < current_page` (empty result sets) stops too.
    /// Without one, a next cursor decides.
    pub fn has_next(&self) -> bool {
        match self.last_page {
            Some(last_page) => self.current_page < last_page,
            None => self.next_cursor.is_some(),
        }
    }
}

/// One fetched batch of items plus its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in server order
    pub items: Vec<T>,
    /// Pagination metadata
    pub meta: PaginationMeta,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(items: Vec<T>, meta: PaginationMeta) -> Self {
        Self { items, meta }
    }

    /// Whether another page follows this one
    pub fn has_next(&self) -> bool {
        self.meta.has_next()
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if this page has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Parameters that can be advanced to the next page
///
/// Every `with_*` method returns a derived copy; the receiver is never
/// changed, since it may still be captured by an in-flight request.
pub trait PageParams: Clone {
    /// Page number these parameters request
    fn page(&self) -> u32;

    /// Copy requesting another page
    #[must_use]
    fn with_page(&self, page: u32) -> Self;

    /// Seed already bound to these parameters
    fn seed(&self) -> Option<&str> {
        None
    }

    /// Copy with a server-issued seed bound
    #[must_use]
    fn with_seed(&self, _seed: &str) -> Self {
        self.clone()
    }

    /// Copy continuing after a cursor
    #[must_use]
    fn with_cursor(&self, _cursor: &str) -> Self {
        self.clone()
    }
}

/// Parameters for the page after `page`, or `None` when the walk is done
///
/// The page number advances by exactly one. A seed reported by the server
/// is bound only when the parameters carry none yet, and a reported cursor
/// is threaded through.
pub fn next_params<P: PageParams, T>(params: &P, page: &Page<T>) -> Option<P> {
    debug!(
        "Fetched page {} ({} items, last {:?})",
        page.meta.current_page,
        page.len(),
        page.meta.last_page
    );
    if !page.has_next() {
        return None;
    }

    let mut next = params.with_page(params.page().saturating_add(1));

    if let Some(seed) = page.meta.seed.as_deref() {
        if params.seed().is_none() {
            next = next.with_seed(seed);
        }
    }

    if let Some(cursor) = page.meta.next_cursor.as_deref() {
        next = next.with_cursor(cursor);
    }

    Some(next)
}
