//! Wallhaven response models

use crate::pagination::{Page, PaginationMeta};
use crate::source::MediaItem;
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Avatar URLs keyed by pixel size
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    #[serde(rename = "200px")]
    pub large: Option<String>,
    #[serde(rename = "128px")]
    pub medium: Option<String>,
    #[serde(rename = "32px")]
    pub small: Option<String>,
    #[serde(rename = "20px")]
    pub tiny: Option<String>,
}

/// Wallpaper uploader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uploader {
    pub username: String,
    pub group: String,
    pub avatar: Option<Avatar>,
}

/// Thumbnail URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnails {
    pub large: String,
    pub original: String,
    pub small: String,
}

/// Tag metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    pub alias: Option<String>,
    pub category_id: Option<u64>,
    pub category: Option<String>,
    pub purity: Option<String>,
    #[serde(default, with = "wallhaven_datetime::option")]
    pub created_at: Option<NaiveDateTime>,
}

/// A single wallpaper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallpaper {
    pub id: String,
    pub url: String,
    pub short_url: String,
    pub views: u64,
    pub favorites: u64,
    pub source: String,
    pub purity: String,
    pub category: String,
    pub dimension_x: u32,
    pub dimension_y: u32,
    pub resolution: String,
    pub ratio: String,
    pub file_size: u64,
    pub file_type: String,
    #[serde(with = "wallhaven_datetime")]
    pub created_at: NaiveDateTime,
    pub colors: Vec<String>,
    /// Full-resolution image URL
    pub path: String,
    pub thumbs: Thumbnails,
    /// Present only on single-wallpaper lookups
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub uploader: Option<Uploader>,
}

impl MediaItem for Wallpaper {
    fn id(&self) -> &str {
        &self.id
    }

    fn media_url(&self) -> Option<&str> {
        Some(&self.path)
    }

    fn file_name(&self) -> String {
        // The CDN name already carries the source prefix and extension
        self.path
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .map_or_else(|| format!("wallhaven-{}.jpg", self.id), str::to_string)
    }
}

/// Tag a search query resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryInfo {
    pub id: u64,
    pub tag: String,
}

/// Resolved query as reported in `meta.query`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaQuery {
    Text(String),
    Tag(QueryInfo),
}

/// Pagination metadata of a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingMeta {
    pub current_page: u32,
    pub last_page: u32,
    /// Sent as a number by `/search` and as a string by some endpoints
    #[serde(deserialize_with = "number_or_string")]
    pub per_page: u32,
    pub total: u64,
    pub query: Option<MetaQuery>,
    pub seed: Option<String>,
}

/// Wallpaper listing (`/search`, `/collections/{user}/{id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub data: Vec<Wallpaper>,
    pub meta: ListingMeta,
}

impl From<Listing> for Page<Wallpaper> {
    fn from(listing: Listing) -> Self {
        let meta = listing.meta;
        Page::new(
            listing.data,
            PaginationMeta {
                current_page: meta.current_page,
                last_page: Some(meta.last_page),
                per_page: Some(meta.per_page),
                total: Some(meta.total),
                seed: meta.seed,
                next_cursor: None,
            },
        )
    }
}

/// Account settings of the key owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub thumb_size: String,
    pub per_page: String,
    pub purity: Vec<String>,
    pub categories: Vec<String>,
    pub resolutions: Vec<String>,
    pub aspect_ratios: Vec<String>,
    pub toplist_range: String,
    pub tag_blacklist: Vec<String>,
    pub user_blacklist: Vec<String>,
}

/// A user collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: u64,
    pub label: String,
    pub views: u64,
    pub public: u8,
    pub count: u64,
}

/// `{ "data": ... }` envelope used by single-entity endpoints
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

fn number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// `YYYY-MM-DD HH:MM:SS` timestamps
mod wallhaven_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use super::FORMAT;
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<NaiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => serializer.serialize_str(&value.format(FORMAT).to_string()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| NaiveDateTime::parse_from_str(&raw, FORMAT))
                .transpose()
                .map_err(serde::de::Error::custom)
        }
    }
}
