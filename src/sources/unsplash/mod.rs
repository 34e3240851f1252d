//! Unsplash source
//!
//! Photo search over `https://api.unsplash.com`. Every request carries the
//! access key as `Authorization: Client-ID <key>`.

mod blocking;
mod client;
mod models;
mod params;
mod types;

pub use blocking::BlockingUnsplash;
pub use client::{Unsplash, UnsplashBuilder, BASE_URL};
pub use models::{
    Exif, Location, Photo, PhotoLinks, PhotoTag, PhotoUrls, Position, ProfileImage, SearchResult,
    User, UserLinks,
};
pub use params::{
    RandomParams, RandomParamsBuilder, SearchParams, SearchParamsBuilder, DEFAULT_PER_PAGE,
    MAX_PER_PAGE,
};
pub use types::{Color, ContentFilter, OrderBy, Orientation};
