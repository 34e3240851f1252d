//! Reddit source
//!
//! Media posts from subreddit listings over `https://oauth.reddit.com`.
//! Listings paginate by cursor: each page reports an `after` fullname that
//! the next request continues from.

mod blocking;
mod client;
mod models;
mod params;
mod types;

pub use blocking::BlockingReddit;
pub use client::{Reddit, RedditBuilder, BASE_URL, TOKEN_URL};
pub use models::{Listing, RedditPost};
pub use params::{RedditParams, RedditParamsBuilder, DEFAULT_LIMIT, MAX_LIMIT};
pub use types::{is_valid_subreddit, Sort, TimeFilter};
