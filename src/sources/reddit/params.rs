//! Reddit listing parameters

use super::types::{is_valid_subreddit, Sort, TimeFilter};
use crate::error::{Error, Result};
use crate::pagination::PageParams;
use crate::types::{MediaType, QueryPairs};

/// Largest listing size the API accepts
pub const MAX_LIMIT: u32 = 100;

/// Listing size used when none is set
pub const DEFAULT_LIMIT: u32 = 25;

/// Validated parameters for `/r/{subreddit}/{sort}`
///
/// Reddit paginates by cursor. The engine threads the `after` cursor of
/// each listing into the next request; `page` only counts fetched pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedditParams {
    subreddit: String,
    sort: Sort,
    time_filter: TimeFilter,
    limit: u32,
    after: Option<String>,
    media_type: MediaType,
    include_nsfw: bool,
    page: u32,
}

impl RedditParams {
    /// Create a builder for listings of `subreddit` (`a+b` combines several)
    pub fn builder(subreddit: impl Into<String>) -> RedditParamsBuilder {
        RedditParamsBuilder {
            params: Self {
                subreddit: subreddit.into(),
                sort: Sort::default(),
                time_filter: TimeFilter::default(),
                limit: DEFAULT_LIMIT,
                after: None,
                media_type: MediaType::Any,
                include_nsfw: false,
                page: 1,
            },
        }
    }

    pub fn subreddit(&self) -> &str {
        &self.subreddit
    }

    pub fn sort(&self) -> Sort {
        self.sort
    }

    /// Cursor this request continues after
    pub fn after(&self) -> Option<&str> {
        self.after.as_deref()
    }

    /// Client-side media filter
    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn include_nsfw(&self) -> bool {
        self.include_nsfw
    }

    /// Listing endpoint path
    pub fn path(&self) -> String {
        format!("r/{}/{}", self.subreddit, self.sort.as_str())
    }

    /// Query string for the API
    pub fn to_query(&self) -> QueryPairs {
        let mut query = vec![
            ("limit".to_string(), self.limit.to_string()),
            ("raw_json".to_string(), "1".to_string()),
        ];
        if let Some(after) = &self.after {
            query.push(("after".to_string(), after.clone()));
        }
        if self.sort.uses_time_filter() {
            query.push(("t".to_string(), self.time_filter.as_str().to_string()));
        }
        query
    }

    /// Copy continuing after `after`
    #[must_use]
    pub fn with_after(&self, after: impl Into<String>) -> Self {
        Self {
            after: Some(after.into()),
            ..self.clone()
        }
    }

    fn validate(&self) -> Result<()> {
        if !is_valid_subreddit(&self.subreddit) {
            return Err(Error::validation(format!(
                "Invalid subreddit '{}'. Use letters, digits and underscores, joined by '+'",
                self.subreddit
            )));
        }
        if !(1..=MAX_LIMIT).contains(&self.limit) {
            return Err(Error::validation(format!(
                "limit must be between 1 and {MAX_LIMIT} (got {})",
                self.limit
            )));
        }
        Ok(())
    }
}

impl PageParams for RedditParams {
    fn page(&self) -> u32 {
        self.page
    }

    fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    fn with_cursor(&self, cursor: &str) -> Self {
        self.with_after(cursor)
    }
}

/// Builder for [`RedditParams`]
#[derive(Debug)]
pub struct RedditParamsBuilder {
    params: RedditParams,
}

impl RedditParamsBuilder {
    pub fn sort(mut self, sort: Sort) -> Self {
        self.params.sort = sort;
        self
    }

    /// Time window, sent only for top and controversial listings
    pub fn time_filter(mut self, time_filter: TimeFilter) -> Self {
        self.params.time_filter = time_filter;
        self
    }

    /// Posts per page (1 to 100)
    pub fn limit(mut self, limit: u32) -> Self {
        self.params.limit = limit;
        self
    }

    /// Start after a post fullname such as `t3_abc123`
    pub fn after(mut self, after: impl Into<String>) -> Self {
        self.params.after = Some(after.into());
        self
    }

    pub fn media_type(mut self, media_type: MediaType) -> Self {
        self.params.media_type = media_type;
        self
    }

    pub fn include_nsfw(mut self, include: bool) -> Self {
        self.params.include_nsfw = include;
        self
    }

    /// Validate and build the parameters
    pub fn build(self) -> Result<RedditParams> {
        self.params.validate()?;
        Ok(self.params)
    }
}
