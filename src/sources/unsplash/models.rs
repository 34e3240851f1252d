//! Unsplash response models
//!
//! Search results carry abbreviated photos. Detail and random lookups add
//! EXIF, location, tags and download counts, so those fields are optional.

use super::params::SearchParams;
use crate::pagination::{Page, PageParams, PaginationMeta};
use crate::source::MediaItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// CDN URLs at various sizes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUrls {
    pub raw: String,
    pub full: String,
    pub regular: String,
    pub small: String,
    pub thumb: String,
}

/// Hypermedia links of a photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub html: String,
    pub download: String,
    /// Endpoint that must be hit to register a download
    pub download_location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileImage {
    pub small: String,
    pub medium: String,
    pub large: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub html: String,
    pub photos: String,
    pub portfolio: Option<String>,
}

/// Photographer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub portfolio_url: Option<String>,
    pub instagram_username: Option<String>,
    pub twitter_username: Option<String>,
    #[serde(default)]
    pub total_collections: u64,
    pub profile_image: Option<ProfileImage>,
    pub links: Option<UserLinks>,
}

/// Camera metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exif {
    pub make: Option<String>,
    pub model: Option<String>,
    pub name: Option<String>,
    pub exposure_time: Option<String>,
    pub aperture: Option<String>,
    pub focal_length: Option<String>,
    pub iso: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: Option<String>,
    pub country: Option<String>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoTag {
    pub title: String,
}

/// A photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub width: u32,
    pub height: u32,
    /// Dominant color as `#rrggbb`
    pub color: Option<String>,
    pub blur_hash: Option<String>,
    pub description: Option<String>,
    pub alt_description: Option<String>,
    pub urls: PhotoUrls,
    pub links: PhotoLinks,
    pub user: User,
    pub downloads: Option<u64>,
    pub public_domain: Option<bool>,
    pub exif: Option<Exif>,
    pub location: Option<Location>,
    #[serde(default)]
    pub tags: Vec<PhotoTag>,
}

impl Photo {
    /// `WIDTHxHEIGHT`
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// Width over height, rounded to two decimals
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        (f64::from(self.width) / f64::from(self.height) * 100.0).round() / 100.0
    }
}

impl MediaItem for Photo {
    fn id(&self) -> &str {
        &self.id
    }

    fn media_url(&self) -> Option<&str> {
        Some(&self.urls.full)
    }

    fn file_name(&self) -> String {
        // CDN URLs have no extension; `full` is always a JPEG
        format!("unsplash-{}.jpg", self.id)
    }
}

/// Body of `/search/photos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub total: u64,
    pub total_pages: u32,
    pub results: Vec<Photo>,
}

impl SearchResult {
    /// Page for the request that produced this result
    ///
    /// The body does not echo the page number, so it comes from `params`.
    pub fn into_page(self, params: &SearchParams) -> Page<Photo> {
        Page::new(
            self.results,
            PaginationMeta {
                current_page: params.page(),
                last_page: Some(self.total_pages),
                per_page: Some(params.per_page()),
                total: Some(self.total),
                seed: None,
                next_cursor: None,
            },
        )
    }
}

/// Body of a download registration
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DownloadLink {
    pub url: String,
}
