//! Blocking pagination
//!
//! Iterator counterparts of [`paginate`](super::paginate) and
//! [`flatten`](super::flatten) with the same continuation rules.

use super::types::{next_params, Page, PageParams};
use crate::error::Result;

/// Iterator over pages, fetching one page per call to `next`
pub struct Pages<P, F> {
    next: Option<P>,
    fetch: F,
}

impl<P, F> Pages<P, F> {
    /// Start a walk at `initial`
    pub fn new(initial: P, fetch: F) -> Self {
        Self {
            next: Some(initial),
            fetch,
        }
    }
}

impl<P, T, F> Iterator for Pages<P, F>
where
    P: PageParams,
    F: FnMut(&P) -> Result<Page<T>>,
{
    type Item = Result<Page<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        let params = self.next.take()?;
        match (self.fetch)(&params) {
            Ok(page) => {
                self.next = next_params(&params, &page);
                Some(Ok(page))
            }
            // `next` stays empty, so the walk ends after an error
            Err(err) => Some(Err(err)),
        }
    }
}

impl<P, T, F> std::iter::FusedIterator for Pages<P, F>
where
    P: PageParams,
    F: FnMut(&P) -> Result<Page<T>>,
{
}

/// Iterator over items across all pages
pub struct Items<P, F, T> {
    pages: Pages<P, F>,
    current: std::vec::IntoIter<T>,
}

impl<P, F, T> Items<P, F, T> {
    /// Start a walk at `initial`
    pub fn new(initial: P, fetch: F) -> Self {
        Self {
            pages: Pages::new(initial, fetch),
            current: Vec::new().into_iter(),
        }
    }
}

impl<P, T, F> Iterator for Items<P, F, T>
where
    P: PageParams,
    F: FnMut(&P) -> Result<Page<T>>,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.next() {
                return Some(Ok(item));
            }
            match self.pages.next()? {
                Ok(page) => self.current = page.items.into_iter(),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

/// Blocking [`paginate`](super::paginate)
pub fn paginate_blocking<P, T, F>(initial: P, fetch: F) -> Pages<P, F>
where
    P: PageParams,
    F: FnMut(&P) -> Result<Page<T>>,
{
    Pages::new(initial, fetch)
}

/// Blocking [`flatten`](super::flatten)
pub fn flatten_blocking<P, T, F>(initial: P, fetch: F) -> Items<P, F, T>
where
    P: PageParams,
    F: FnMut(&P) -> Result<Page<T>>,
{
    Items::new(initial, fetch)
}
