//! CLI commands and argument parsing

use crate::sources::{reddit, unsplash, wallhaven};
use crate::types::MediaType;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Search and download media from Wallhaven, Unsplash and Reddit
#[derive(Parser, Debug)]
#[command(name = "xanax")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Retries on rate-limit responses (0 = fail fast)
    #[arg(long, global = true, default_value_t = 0)]
    pub max_retries: u32,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Stop after this many items
    #[arg(short = 'n', long, global = true)]
    pub limit: Option<usize>,

    /// Download every item into this directory
    #[arg(short, long, global = true)]
    pub download: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true, hide = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search wallpapers on Wallhaven
    Wallhaven {
        /// Search query (supports +tag -tag @user id:123)
        query: Option<String>,

        /// API key, needed for NSFW content (default: $WALLHAVEN_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Sorting
        #[arg(long, default_value = "date_added")]
        sorting: wallhaven::Sort,

        /// Sort direction
        #[arg(long, default_value = "desc")]
        order: wallhaven::Order,

        /// Purity levels (comma-separated)
        #[arg(long, value_delimiter = ',', default_value = "sfw")]
        purity: Vec<wallhaven::Purity>,

        /// Categories (comma-separated, default all)
        #[arg(long, value_delimiter = ',')]
        categories: Vec<wallhaven::Category>,

        /// Toplist range, only with --sorting toplist
        #[arg(long)]
        top_range: Option<wallhaven::TopRange>,

        /// Exact resolution filter (WIDTHxHEIGHT, repeatable)
        #[arg(long)]
        resolution: Vec<String>,

        /// Aspect ratio filter (W:H, repeatable)
        #[arg(long)]
        ratio: Vec<String>,

        /// Dominant colors as hex codes (comma-separated)
        #[arg(long, value_delimiter = ',')]
        colors: Vec<wallhaven::Color>,

        /// Random ordering seed (6 alphanumerics)
        #[arg(long)]
        seed: Option<String>,

        /// First page to fetch
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Search photos on Unsplash
    Unsplash {
        /// Search query
        query: String,

        /// Access key (default: $UNSPLASH_ACCESS_KEY)
        #[arg(long)]
        access_key: Option<String>,

        /// Results per page (1 to 30)
        #[arg(long, default_value_t = unsplash::DEFAULT_PER_PAGE)]
        per_page: u32,

        /// Result ordering
        #[arg(long, default_value = "relevant")]
        order_by: unsplash::OrderBy,

        #[arg(long)]
        orientation: Option<unsplash::Orientation>,

        #[arg(long)]
        color: Option<unsplash::Color>,

        /// Strict content filtering
        #[arg(long)]
        safe: bool,

        /// First page to fetch
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Fetch media posts from a subreddit
    Reddit {
        /// Subreddit name; combine several with '+'
        subreddit: String,

        /// App client ID (default: $REDDIT_CLIENT_ID)
        #[arg(long)]
        client_id: Option<String>,

        /// App secret (default: $REDDIT_CLIENT_SECRET)
        #[arg(long)]
        client_secret: Option<String>,

        /// User agent (default: $REDDIT_USER_AGENT)
        #[arg(long)]
        user_agent: Option<String>,

        /// Listing sort
        #[arg(long, default_value = "hot")]
        sort: reddit::Sort,

        /// Time window for top and controversial
        #[arg(long, default_value = "all")]
        time: reddit::TimeFilter,

        /// Posts per request (1 to 100)
        #[arg(long, default_value_t = reddit::DEFAULT_LIMIT)]
        page_size: u32,

        /// Only yield this media type
        #[arg(long, default_value = "any")]
        media_type: MediaType,

        /// Include NSFW posts
        #[arg(long)]
        nsfw: bool,
    },
}
