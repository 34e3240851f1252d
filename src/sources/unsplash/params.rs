//! Unsplash request parameters

use super::types::{Color, ContentFilter, OrderBy, Orientation};
use crate::error::{Error, Result};
use crate::pagination::PageParams;
use crate::types::QueryPairs;

/// Largest page size the API accepts
pub const MAX_PER_PAGE: u32 = 30;

/// Page size used when none is set
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Validated parameters for `/search/photos`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    query: String,
    page: u32,
    per_page: u32,
    order_by: OrderBy,
    collections: Vec<String>,
    content_filter: ContentFilter,
    color: Option<Color>,
    orientation: Option<Orientation>,
}

impl SearchParams {
    /// Create a builder for a search on `query`
    pub fn builder(query: impl Into<String>) -> SearchParamsBuilder {
        SearchParamsBuilder {
            params: Self {
                query: query.into(),
                page: 1,
                per_page: DEFAULT_PER_PAGE,
                order_by: OrderBy::default(),
                collections: Vec::new(),
                content_filter: ContentFilter::default(),
                color: None,
                orientation: None,
            },
        }
    }

    /// Search terms
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Results per page
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Query string for the API
    pub fn to_query(&self) -> QueryPairs {
        let mut query = vec![("query".to_string(), self.query.clone())];
        if self.page > 1 {
            query.push(("page".to_string(), self.page.to_string()));
        }
        query.push(("per_page".to_string(), self.per_page.to_string()));
        query.push(("order_by".to_string(), self.order_by.as_str().to_string()));
        if !self.collections.is_empty() {
            query.push(("collections".to_string(), self.collections.join(",")));
        }
        if self.content_filter != ContentFilter::Low {
            query.push((
                "content_filter".to_string(),
                self.content_filter.as_str().to_string(),
            ));
        }
        if let Some(color) = self.color {
            query.push(("color".to_string(), color.as_str().to_string()));
        }
        if let Some(orientation) = self.orientation {
            query.push(("orientation".to_string(), orientation.as_str().to_string()));
        }
        query
    }

    fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(Error::validation("Unsplash search requires a non-empty query"));
        }
        if self.page < 1 {
            return Err(Error::validation("page must be at least 1"));
        }
        if !(1..=MAX_PER_PAGE).contains(&self.per_page) {
            return Err(Error::validation(format!(
                "per_page must be between 1 and {MAX_PER_PAGE} (got {})",
                self.per_page
            )));
        }
        Ok(())
    }
}

impl PageParams for SearchParams {
    fn page(&self) -> u32 {
        self.page
    }

    fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }
}

/// Builder for [`SearchParams`]
#[derive(Debug)]
pub struct SearchParamsBuilder {
    params: SearchParams,
}

impl SearchParamsBuilder {
    /// Set the starting page
    pub fn page(mut self, page: u32) -> Self {
        self.params.page = page;
        self
    }

    /// Set results per page (1 to 30)
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.params.per_page = per_page;
        self
    }

    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.params.order_by = order_by;
        self
    }

    /// Restrict the search to a collection
    pub fn collection(mut self, id: impl Into<String>) -> Self {
        self.params.collections.push(id.into());
        self
    }

    pub fn content_filter(mut self, filter: ContentFilter) -> Self {
        self.params.content_filter = filter;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.params.color = Some(color);
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.params.orientation = Some(orientation);
        self
    }

    /// Validate and build the parameters
    pub fn build(self) -> Result<SearchParams> {
        self.params.validate()?;
        Ok(self.params)
    }
}

/// Validated parameters for `/photos/random`
///
/// With nothing set, any photo is eligible. Collections and topics cannot
/// be combined with a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RandomParams {
    collections: Vec<String>,
    topics: Vec<String>,
    username: Option<String>,
    query: Option<String>,
    orientation: Option<Orientation>,
    content_filter: ContentFilter,
}

impl RandomParams {
    /// Create a new parameter builder
    pub fn builder() -> RandomParamsBuilder {
        RandomParamsBuilder::default()
    }

    /// Query string for the API
    pub fn to_query(&self) -> QueryPairs {
        let mut query = QueryPairs::new();
        if !self.collections.is_empty() {
            query.push(("collections".to_string(), self.collections.join(",")));
        }
        if !self.topics.is_empty() {
            query.push(("topics".to_string(), self.topics.join(",")));
        }
        if let Some(username) = &self.username {
            query.push(("username".to_string(), username.clone()));
        }
        if let Some(q) = &self.query {
            query.push(("query".to_string(), q.clone()));
        }
        if let Some(orientation) = self.orientation {
            query.push(("orientation".to_string(), orientation.as_str().to_string()));
        }
        if self.content_filter != ContentFilter::Low {
            query.push((
                "content_filter".to_string(),
                self.content_filter.as_str().to_string(),
            ));
        }
        query
    }

    fn validate(&self) -> Result<()> {
        let has_query = self.query.as_deref().is_some_and(|q| !q.is_empty());
        if has_query && (!self.collections.is_empty() || !self.topics.is_empty()) {
            return Err(Error::validation(
                "collections and topics cannot be combined with a query",
            ));
        }
        Ok(())
    }
}

/// Builder for [`RandomParams`]
#[derive(Debug, Default)]
pub struct RandomParamsBuilder {
    params: RandomParams,
}

impl RandomParamsBuilder {
    pub fn collection(mut self, id: impl Into<String>) -> Self {
        self.params.collections.push(id.into());
        self
    }

    pub fn topic(mut self, id: impl Into<String>) -> Self {
        self.params.topics.push(id.into());
        self
    }

    /// Restrict to photos by one user
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.params.username = Some(username.into());
        self
    }

    /// Restrict to photos matching a search term
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.params.query = Some(query.into());
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.params.orientation = Some(orientation);
        self
    }

    pub fn content_filter(mut self, filter: ContentFilter) -> Self {
        self.params.content_filter = filter;
        self
    }

    /// Validate and build the parameters
    pub fn build(self) -> Result<RandomParams> {
        self.params.validate()?;
        Ok(self.params)
    }
}
