//! Async pagination
//!
//! Pull-based streams over a page fetcher. Nothing is fetched until the
//! consumer polls, pages are requested strictly one after another, and
//! dropping the stream abandons any pending request or retry wait.

use super::types::{next_params, Page, PageParams};
use crate::error::Result;
use futures::stream::{self, Stream, TryStreamExt};
use std::future::Future;

/// Lazily fetch every page starting from `initial`
///
/// The stream ends after the last page, or right after yielding the first
/// error from `fetch`.
pub fn paginate<P, T, F, Fut>(initial: P, fetch: F) -> impl Stream<Item = Result<Page<T>>>
where
    P: PageParams,
    F: FnMut(P) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    stream::try_unfold((Some(initial), fetch), |(params, mut fetch)| async move {
        let Some(params) = params else {
            return Ok(None);
        };

        let page = fetch(params.clone()).await?;
        let next = next_params(&params, &page);
        Ok(Some((page, (next, fetch))))
    })
}

/// Lazily yield every item across all pages, in page order
pub fn flatten<P, T, F, Fut>(initial: P, fetch: F) -> impl Stream<Item = Result<T>>
where
    P: PageParams,
    F: FnMut(P) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    paginate(initial, fetch)
        .map_ok(|page| stream::iter(page.items.into_iter().map(Ok)))
        .try_flatten()
}
