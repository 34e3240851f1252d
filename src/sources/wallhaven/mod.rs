//! Wallhaven source
//!
//! Wallpaper search over `https://wallhaven.cc/api/v1`. Searches sorted
//! randomly return a seed with the first page; the pagination engine binds
//! it to every later page so the ordering stays stable.

mod blocking;
mod client;
mod models;
mod params;
mod types;

pub use blocking::BlockingWallhaven;
pub use client::{Wallhaven, WallhavenBuilder, API_KEY_HEADER, BASE_URL};
pub use models::{
    Avatar, Collection, Listing, ListingMeta, MetaQuery, QueryInfo, Tag, Thumbnails, Uploader,
    UserSettings, Wallpaper,
};
pub use params::{SearchParams, SearchParamsBuilder};
pub use types::{
    is_valid_ratio, is_valid_resolution, is_valid_seed, Category, Color, FileType, Order, Purity,
    Sort, TopRange,
};
