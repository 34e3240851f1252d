//! Reddit enumerations and name validation

use crate::types::wire_enum;
use regex::Regex;
use std::sync::LazyLock;

static SUBREDDIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+(\+[A-Za-z0-9_]+)*$").unwrap());

wire_enum! {
    /// Listing sort order
    #[derive(Default)]
    pub enum Sort {
        #[default]
        Hot => "hot",
        New => "new",
        /// Highest score, narrowed by a [`TimeFilter`]
        Top => "top",
        Rising => "rising",
        /// Divisive posts, narrowed by a [`TimeFilter`]
        Controversial => "controversial",
    }
}

impl Sort {
    /// Whether the listing honors the `t` time filter
    pub fn uses_time_filter(&self) -> bool {
        matches!(self, Sort::Top | Sort::Controversial)
    }
}

wire_enum! {
    /// Time window for top and controversial listings
    #[derive(Default)]
    pub enum TimeFilter {
        Hour => "hour",
        Day => "day",
        Week => "week",
        Month => "month",
        Year => "year",
        #[default]
        All => "all",
    }
}

/// One or more subreddit names joined by `+`
pub fn is_valid_subreddit(name: &str) -> bool {
    SUBREDDIT_REGEX.is_match(name)
}
