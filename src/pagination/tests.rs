//! Tests for the pagination module

use super::*;
use crate::error::{Error, ErrorKind, Result};
use futures::{StreamExt, TryStreamExt};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default, PartialEq)]
struct TestParams {
    page: u32,
    seed: Option<String>,
    after: Option<String>,
}

impl TestParams {
    fn first() -> Self {
        Self {
            page: 1,
            ..Self::default()
        }
    }
}

impl PageParams for TestParams {
    fn page(&self) -> u32 {
        self.page
    }

    fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    fn seed(&self) -> Option<&str> {
        self.seed.as_deref()
    }

    fn with_seed(&self, seed: &str) -> Self {
        Self {
            seed: Some(seed.to_string()),
            ..self.clone()
        }
    }

    fn with_cursor(&self, cursor: &str) -> Self {
        Self {
            after: Some(cursor.to_string()),
            ..self.clone()
        }
    }
}

/// Fetcher stub over fixed pages, recording every call
#[derive(Clone, Default)]
struct Recorder {
    calls: Arc<Mutex<Vec<TestParams>>>,
}

impl Recorder {
    fn calls(&self) -> Vec<TestParams> {
        self.calls.lock().unwrap().clone()
    }

    fn numbered(
        &self,
        pages: Vec<Vec<&'static str>>,
        seed: Option<&str>,
    ) -> impl FnMut(TestParams) -> futures::future::Ready<Result<Page<&'static str>>> {
        let calls = Arc::clone(&self.calls);
        let seed = seed.map(str::to_string);
        let last = pages.len() as u32;
        move |params: TestParams| {
            calls.lock().unwrap().push(params.clone());
            let items = pages[(params.page - 1) as usize].clone();
            let meta = PaginationMeta::numbered(params.page, last).with_seed(seed.clone());
            futures::future::ready(Ok(Page::new(items, meta)))
        }
    }
}

// ============================================================================
// PaginationMeta / next_params
// ============================================================================

#[test]
fn test_has_next() {
    assert!(PaginationMeta::numbered(1, 3).has_next());
    assert!(!PaginationMeta::numbered(3, 3).has_next());
    // reported last page below the current one terminates
    assert!(!PaginationMeta::numbered(1, 0).has_next());
    assert!(PaginationMeta::cursor(1, Some("t3_x".to_string())).has_next());
    assert!(!PaginationMeta::cursor(1, None).has_next());
}

#[test]
fn test_next_params_advances_by_one() {
    let params = TestParams::first();
    let page: Page<()> = Page::new(vec![], PaginationMeta::numbered(1, 5));
    let next = next_params(&params, &page).unwrap();
    assert_eq!(next.page, 2);
    assert_eq!(params.page, 1);
}

#[test]
fn test_next_params_binds_seed_once() {
    let params = TestParams::first();
    let page: Page<()> = Page::new(
        vec![],
        PaginationMeta::numbered(1, 5).with_seed(Some("abc123".to_string())),
    );
    let next = next_params(&params, &page).unwrap();
    assert_eq!(next.seed.as_deref(), Some("abc123"));
    assert!(params.seed.is_none());

    // an already bound seed is not replaced
    let page: Page<()> = Page::new(
        vec![],
        PaginationMeta::numbered(2, 5).with_seed(Some("zzz999".to_string())),
    );
    let after = next_params(&next, &page).unwrap();
    assert_eq!(after.seed.as_deref(), Some("abc123"));
}

#[test]
fn test_next_params_threads_cursor() {
    let params = TestParams::first();
    let page: Page<()> = Page::new(vec![], PaginationMeta::cursor(1, Some("t3_abc".to_string())));
    let next = next_params(&params, &page).unwrap();
    assert_eq!(next.after.as_deref(), Some("t3_abc"));
    assert_eq!(next.page, 2);

    let page: Page<()> = Page::new(vec![], PaginationMeta::cursor(2, None));
    assert!(next_params(&next, &page).is_none());
}

// ============================================================================
// Async stream
// ============================================================================

#[tokio::test]
async fn test_paginate_yields_every_page_then_stops() {
    let recorder = Recorder::default();
    let fetch = recorder.numbered(vec![vec!["a"], vec!["b"], vec!["c"]], None);

    let pages: Vec<Page<&str>> = paginate(TestParams::first(), fetch)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(pages.len(), 3);
    let pages_seen: Vec<u32> = recorder.calls().iter().map(|p| p.page).collect();
    assert_eq!(pages_seen, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_paginate_is_lazy() {
    let recorder = Recorder::default();
    let fetch = recorder.numbered(vec![vec!["a"]; 10], None);

    let stream = paginate(TestParams::first(), fetch);
    assert!(recorder.calls().is_empty());

    let pages: Vec<_> = stream.take(2).collect().await;
    assert_eq!(pages.len(), 2);
    assert_eq!(recorder.calls().len(), 2);
}

#[tokio::test]
async fn test_paginate_propagates_seed() {
    let recorder = Recorder::default();
    let fetch = recorder.numbered(vec![vec!["a"], vec!["b"], vec!["c"]], Some("abc123"));

    let _: Vec<Page<&str>> = paginate(TestParams::first(), fetch)
        .try_collect()
        .await
        .unwrap();

    let calls = recorder.calls();
    assert_eq!(calls[0].seed, None);
    assert_eq!(calls[1].seed.as_deref(), Some("abc123"));
    assert_eq!(calls[2].seed.as_deref(), Some("abc123"));
}

#[tokio::test]
async fn test_flatten_preserves_order() {
    let recorder = Recorder::default();
    let fetch = recorder.numbered(vec![vec!["a", "b"], vec!["c", "d"]], None);

    let items: Vec<&str> = flatten(TestParams::first(), fetch)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(items, vec!["a", "b", "c", "d"]);
}

#[tokio::test]
async fn test_zero_result_page() {
    let recorder = Recorder::default();
    let pages: Vec<Page<&str>> = paginate(TestParams::first(), recorder.numbered(vec![vec![]], None))
        .try_collect()
        .await
        .unwrap();
    assert_eq!(pages.len(), 1);
    assert!(pages[0].is_empty());

    let items: Vec<&str> = flatten(TestParams::first(), recorder.numbered(vec![vec![]], None))
        .try_collect()
        .await
        .unwrap();
    assert!(items.is_empty());
    assert_eq!(recorder.calls().len(), 2);
}

#[tokio::test]
async fn test_last_page_below_current_yields_single_page() {
    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);
    let fetch = move |params: TestParams| {
        *counter.lock().unwrap() += 1;
        let meta = PaginationMeta::numbered(params.page, 0);
        async move { Ok::<_, Error>(Page::<u8>::new(vec![], meta)) }
    };

    let pages: Vec<_> = paginate(TestParams::first(), fetch)
        .try_collect()
        .await
        .unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(*calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_error_ends_stream_after_yielded_pages() {
    let fetch = |params: TestParams| async move {
        match params.page {
            1 => Ok(Page::new(vec![1, 2], PaginationMeta::numbered(1, 3))),
            2 => Err(Error::not_found("page 2")),
            _ => panic!("page 3 must not be fetched"),
        }
    };

    let results: Vec<Result<i32>> = flatten(TestParams::first(), fetch).collect().await;

    assert_eq!(results.len(), 3);
    assert_eq!(*results[0].as_ref().unwrap(), 1);
    assert_eq!(*results[1].as_ref().unwrap(), 2);
    assert_eq!(results[2].as_ref().unwrap_err().kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_cursor_walk() {
    let fetch = |params: TestParams| async move {
        let (items, cursor) = match params.after.as_deref() {
            None => (vec!["p1"], Some("t3_1".to_string())),
            Some("t3_1") => (vec!["p2"], Some("t3_2".to_string())),
            Some("t3_2") => (vec!["p3"], None),
            other => panic!("unexpected cursor {other:?}"),
        };
        Ok::<_, Error>(Page::new(items, PaginationMeta::cursor(params.page, cursor)))
    };

    let items: Vec<&str> = flatten(TestParams::first(), fetch)
        .try_collect()
        .await
        .unwrap();
    assert_eq!(items, vec!["p1", "p2", "p3"]);
}

#[test]
fn test_paginate_on_plain_executor() {
    let recorder = Recorder::default();
    let fetch = recorder.numbered(vec![vec!["x"], vec!["y"]], None);

    let items: Vec<&str> =
        tokio_test::block_on(flatten(TestParams::first(), fetch).try_collect()).unwrap();
    assert_eq!(items, vec!["x", "y"]);
}

// ============================================================================
// Blocking iterator
// ============================================================================

fn blocking_fetch<'a>(
    calls: &'a RefCell<Vec<TestParams>>,
    pages: Vec<Vec<&'static str>>,
    seed: Option<&'static str>,
) -> impl FnMut(&TestParams) -> Result<Page<&'static str>> + 'a {
    let last = pages.len() as u32;
    move |params: &TestParams| {
        calls.borrow_mut().push(params.clone());
        let items = pages[(params.page - 1) as usize].clone();
        Ok(Page::new(
            items,
            PaginationMeta::numbered(params.page, last).with_seed(seed.map(str::to_string)),
        ))
    }
}

#[test]
fn test_blocking_paginate_and_seed() {
    let calls = RefCell::new(Vec::new());
    let fetch = blocking_fetch(&calls, vec![vec!["a"], vec!["b"], vec!["c"]], Some("s33d00"));

    let pages: Vec<_> = paginate_blocking(TestParams::first(), fetch)
        .collect::<Result<_>>()
        .unwrap();
    assert_eq!(pages.len(), 3);

    let calls = calls.into_inner();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].seed, None);
    assert_eq!(calls[2].seed.as_deref(), Some("s33d00"));
}

#[test]
fn test_blocking_is_lazy() {
    let calls = RefCell::new(Vec::new());
    let fetch = blocking_fetch(&calls, vec![vec!["a"]; 5], None);

    let taken: Vec<_> = paginate_blocking(TestParams::first(), fetch).take(2).collect();
    assert_eq!(taken.len(), 2);
    assert_eq!(calls.borrow().len(), 2);
}

#[test]
fn test_blocking_flatten_order() {
    let calls = RefCell::new(Vec::new());
    let fetch = blocking_fetch(&calls, vec![vec!["a", "b"], vec![], vec!["c", "d"]], None);

    let items: Vec<&str> = flatten_blocking(TestParams::first(), fetch)
        .collect::<Result<_>>()
        .unwrap();
    assert_eq!(items, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_blocking_fused_after_error() {
    let mut calls = 0;
    let fetch = |_: &TestParams| -> Result<Page<u8>> {
        calls += 1;
        Err(Error::rate_limited(None))
    };

    let mut pages = paginate_blocking(TestParams::first(), fetch);
    assert!(pages.next().unwrap().is_err());
    assert!(pages.next().is_none());
    drop(pages);
    assert_eq!(calls, 1);
}
