//! Wallhaven search parameters

use super::types::{
    bitmask, is_valid_ratio, is_valid_resolution, is_valid_seed, Category, Color, FileType,
    Order, Purity, Sort, TopRange,
};
use crate::error::{Error, Result};
use crate::pagination::PageParams;
use crate::types::QueryPairs;

/// Validated parameters for `/search`
///
/// Built through [`SearchParams::builder`]; invalid combinations fail at
/// `build()` before any request is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    query: Option<String>,
    categories: Vec<Category>,
    purity: Vec<Purity>,
    sorting: Sort,
    order: Order,
    top_range: Option<TopRange>,
    resolutions: Vec<String>,
    ratios: Vec<String>,
    colors: Vec<Color>,
    page: u32,
    seed: Option<String>,
    file_type: Option<FileType>,
    like: Option<String>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: None,
            categories: Category::ALL.to_vec(),
            purity: vec![Purity::Sfw],
            sorting: Sort::default(),
            order: Order::default(),
            top_range: None,
            resolutions: Vec::new(),
            ratios: Vec::new(),
            colors: Vec::new(),
            page: 1,
            seed: None,
            file_type: None,
            like: None,
        }
    }
}

impl SearchParams {
    /// Create a new parameter builder
    pub fn builder() -> SearchParamsBuilder {
        SearchParamsBuilder::default()
    }

    /// Search query
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Requested purity levels
    pub fn purity(&self) -> &[Purity] {
        &self.purity
    }

    /// Requested sorting
    pub fn sorting(&self) -> Sort {
        self.sorting
    }

    /// Whether NSFW content is requested
    pub fn wants_nsfw(&self) -> bool {
        self.purity.contains(&Purity::Nsfw)
    }

    /// Query string for the API, in a stable order
    pub fn to_query(&self) -> QueryPairs {
        let mut query = QueryPairs::new();
        let mut push = |key: &str, value: String| query.push((key.to_string(), value));

        if let Some(q) = self.query.as_deref().filter(|q| !q.is_empty()) {
            push("q", q.to_string());
        }
        if !self.categories.is_empty() {
            push("categories", bitmask(Category::ALL, &self.categories));
        }
        if !self.purity.is_empty() {
            push("purity", bitmask(Purity::ALL, &self.purity));
        }
        push("sorting", self.sorting.as_str().to_string());
        push("order", self.order.as_str().to_string());
        if let Some(range) = self.top_range {
            push("topRange", range.as_str().to_string());
        }
        if !self.resolutions.is_empty() {
            push("resolutions", self.resolutions.join(","));
        }
        if !self.ratios.is_empty() {
            push("ratios", self.ratios.join(","));
        }
        if !self.colors.is_empty() {
            let colors: Vec<&str> = self.colors.iter().map(Color::as_str).collect();
            push("colors", colors.join(","));
        }
        if self.page > 1 {
            push("page", self.page.to_string());
        }
        if let Some(seed) = &self.seed {
            push("seed", seed.clone());
        }
        if let Some(file_type) = self.file_type {
            push("type", file_type.as_str().to_string());
        }
        if let Some(like) = &self.like {
            push("like", like.clone());
        }

        query
    }

    fn validate(&self) -> Result<()> {
        if self.page < 1 {
            return Err(Error::validation("page must be at least 1"));
        }
        if let Some(seed) = self.seed.as_deref() {
            if !is_valid_seed(seed) {
                return Err(Error::validation(format!(
                    "Invalid seed: {seed}. Seed must be exactly 6 alphanumeric characters."
                )));
            }
        }
        if let Some(bad) = self.resolutions.iter().find(|r| !is_valid_resolution(r)) {
            return Err(Error::validation(format!(
                "Invalid resolution format: {bad}. Expected WIDTHxHEIGHT (e.g., 1920x1080)"
            )));
        }
        if let Some(bad) = self.ratios.iter().find(|r| !is_valid_ratio(r)) {
            return Err(Error::validation(format!(
                "Invalid ratio format: {bad}. Expected WIDTH:HEIGHT or WIDTHxHEIGHT (e.g., 16:9)"
            )));
        }
        if self.top_range.is_some() && self.sorting != Sort::Toplist {
            return Err(Error::validation(format!(
                "top_range can only be used when sorting is 'toplist' (got '{}')",
                self.sorting
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

    fn seed(&self) -> Option<&str> {
        self.seed.as_deref()
    }

    fn with_seed(&self, seed: &str) -> Self {
        Self {
            seed: Some(seed.to_string()),
            ..self.clone()
        }
    }
}

/// Builder for [`SearchParams`]
#[derive(Debug, Default)]
pub struct SearchParamsBuilder {
    params: SearchParams,
}

impl SearchParamsBuilder {
    /// Set the search query (supports Wallhaven operators like `+tag -tag @user id:123`)
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.params.query = Some(query.into());
        self
    }

    /// Set categories (default: all three)
    pub fn categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.params.categories = categories.into_iter().collect();
        self
    }

    /// Set purity levels (default: SFW only)
    pub fn purity(mut self, purity: impl IntoIterator<Item = Purity>) -> Self {
        self.params.purity = purity.into_iter().collect();
        self
    }

    /// Set sorting
    pub fn sorting(mut self, sorting: Sort) -> Self {
        self.params.sorting = sorting;
        self
    }

    /// Set sort direction
    pub fn order(mut self, order: Order) -> Self {
        self.params.order = order;
        self
    }

    /// Set the toplist time range (requires [`Sort::Toplist`])
    pub fn top_range(mut self, range: TopRange) -> Self {
        self.params.top_range = Some(range);
        self
    }

    /// Add an exact resolution filter (`WIDTHxHEIGHT`)
    pub fn resolution(mut self, resolution: impl Into<String>) -> Self {
        self.params.resolutions.push(resolution.into());
        self
    }

    /// Add an aspect ratio filter (`16:9` or `16x9`)
    pub fn ratio(mut self, ratio: impl Into<String>) -> Self {
        self.params.ratios.push(ratio.into());
        self
    }

    /// Add a color filter
    pub fn color(mut self, color: Color) -> Self {
        self.params.colors.push(color);
        self
    }

    /// Set the starting page
    pub fn page(mut self, page: u32) -> Self {
        self.params.page = page;
        self
    }

    /// Pin a random ordering seed
    pub fn seed(mut self, seed: impl Into<String>) -> Self {
        self.params.seed = Some(seed.into());
        self
    }

    /// Filter by file type
    pub fn file_type(mut self, file_type: FileType) -> Self {
        self.params.file_type = Some(file_type);
        self
    }

    /// Find wallpapers with tags similar to this wallpaper ID
    pub fn like(mut self, wallpaper_id: impl Into<String>) -> Self {
        self.params.like = Some(wallpaper_id.into());
        self
    }

    /// Validate and build the parameters
    pub fn build(self) -> Result<SearchParams> {
        self.params.validate()?;
        Ok(self.params)
    }
}
