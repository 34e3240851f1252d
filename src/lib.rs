// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # xanax
//!
//! Typed clients for searching and downloading media from Wallhaven,
//! Unsplash and Reddit, with lazy pagination over every source.
//!
//! ## Features
//!
//! - **Three sources**: Wallhaven wallpapers, Unsplash photos, Reddit media posts
//! - **Async and blocking**: every client comes in both flavors with the same API
//! - **Lazy pagination**: walk pages or items as a `Stream` / `Iterator`,
//!   carrying random seeds and cursors forward automatically
//! - **Rate limits**: optional retry with backoff that honors `Retry-After`
//! - **Auth**: API keys, `Client-ID` headers and OAuth2 client credentials with token caching
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use xanax::sources::wallhaven::{Purity, SearchParams, Wallhaven};
//! use xanax::MediaSource;
//!
//! #[tokio::main]
//! async fn main() -> xanax::Result<()> {
//!     let client = Wallhaven::builder().build()?;
//!     let params = SearchParams::builder()
//!         .query("mountains")
//!         .purity([Purity::Sfw])
//!         .build()?;
//!
//!     let mut items = client.items(params);
//!     while let Some(wallpaper) = items.try_next().await? {
//!         println!("{}", wallpaper.path);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │        MediaSource / BlockingMediaSource traits          │
//! │   fetch_page()  download()  pages()  items()             │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌───────────────┬────────────┴──┬──────────────────────────┐
//! │   Wallhaven   │   Unsplash    │        Reddit            │
//! ├───────────────┴───────────────┴──────────────────────────┤
//! │  Auth (key, Client-ID, OAuth2)  │  HTTP + retry  │ Paging │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Credentials and token caching
pub mod auth;

/// HTTP clients with rate-limit retry
pub mod http;

/// Page types and lazy page walkers
pub mod pagination;

/// Transport configuration and environment lookup
pub mod config;

/// Source capability traits
pub mod source;

/// Source adapters
pub mod sources;

/// Saving downloaded media
pub mod download;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::HttpClientConfig;
pub use error::{Error, ErrorKind, Result};
pub use pagination::{Page, PageParams, PaginationMeta};
pub use source::{BlockingMediaSource, MediaItem, MediaSource};
pub use types::MediaType;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
