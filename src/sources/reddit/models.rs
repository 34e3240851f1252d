//! Reddit response models
//!
//! Listings arrive as nested `Thing` wrappers around loosely typed post
//! objects. They are parsed into a raw form first and then flattened into
//! [`RedditPost`] values, one per downloadable media file.

use super::params::RedditParams;
use crate::download::extension_from_url;
use crate::pagination::{Page, PageParams, PaginationMeta};
use crate::source::MediaItem;
use crate::types::MediaType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Hosts serving direct image files
const IMAGE_DOMAINS: &[&str] = &["i.redd.it", "i.imgur.com"];

/// One media file posted to Reddit
///
/// Gallery submissions are expanded into one post per image, with
/// `gallery_id` naming the submission and `gallery_index` the position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedditPost {
    /// Base-36 ID, or `<post>_<media>` for gallery images
    pub id: String,
    /// Fullname such as `t3_abc123`
    pub fullname: String,
    pub title: String,
    pub subreddit: String,
    pub author: String,
    pub score: i64,
    /// Direct media URL
    pub url: String,
    pub media_type: MediaType,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Seconds, for videos and GIFs
    pub duration: Option<u32>,
    /// Video-only stream of a `v.redd.it` post (no audio)
    pub video_url: Option<String>,
    pub is_nsfw: bool,
    pub permalink: String,
    pub created_utc: DateTime<Utc>,
    pub is_gallery: bool,
    pub gallery_index: Option<usize>,
    pub gallery_id: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl MediaItem for RedditPost {
    fn id(&self) -> &str {
        &self.id
    }

    fn media_url(&self) -> Option<&str> {
        match self.media_type {
            MediaType::Video | MediaType::Gif => self.video_url.as_deref().or(Some(self.url.as_str())),
            _ => Some(self.url.as_str()),
        }
        .filter(|url| !url.is_empty())
    }

    fn file_name(&self) -> String {
        let extension = self
            .media_url()
            .and_then(extension_from_url)
            .unwrap_or_else(|| match self.media_type {
                MediaType::Video | MediaType::Gif => "mp4".to_string(),
                _ => "jpg".to_string(),
            });
        format!("reddit-{}.{extension}", self.id)
    }
}

/// One page of a subreddit listing, after filtering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub posts: Vec<RedditPost>,
    /// Cursor for the next page
    pub after: Option<String>,
    pub before: Option<String>,
    /// Children returned by the API before any filtering
    pub dist: u32,
}

impl Listing {
    /// Parse a raw listing, expanding galleries and applying the
    /// client-side media and NSFW filters of `params`
    pub(crate) fn from_raw(raw: RawListing, params: &RedditParams) -> Self {
        let dist = raw.dist.unwrap_or(raw.children.len() as u32);
        let posts = raw
            .children
            .into_iter()
            .flat_map(|child| child.data.into_posts())
            .filter(|post| params.include_nsfw() || !post.is_nsfw)
            .filter(|post| params.media_type().accepts(post.media_type))
            .collect();

        Self {
            posts,
            after: raw.after,
            before: raw.before,
            dist,
        }
    }

    /// Page for the request that produced this listing
    ///
    /// A listing whose raw page was empty ends the walk even if the API
    /// still reported a cursor.
    pub fn into_page(self, params: &RedditParams) -> Page<RedditPost> {
        let next_cursor = self.after.filter(|_| self.dist > 0);
        let mut meta = PaginationMeta::cursor(params.page(), next_cursor);
        meta.per_page = Some(self.dist);
        Page::new(self.posts, meta)
    }
}

// ============================================================================
// Raw API shapes
// ============================================================================

/// `{ "kind": ..., "data": ... }` wrapper
#[derive(Debug, Deserialize)]
pub(crate) struct Thing<T> {
    pub data: T,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawListing {
    pub children: Vec<Thing<RawPost>>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub dist: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawPost {
    pub id: String,
    pub name: Option<String>,
    pub title: Option<String>,
    pub subreddit: Option<String>,
    pub author: Option<String>,
    pub score: i64,
    pub url: Option<String>,
    pub url_overridden_by_dest: Option<String>,
    pub domain: Option<String>,
    pub post_hint: Option<String>,
    pub is_self: bool,
    pub is_video: bool,
    pub is_gallery: Option<bool>,
    pub over_18: bool,
    pub permalink: Option<String>,
    pub created_utc: f64,
    pub thumbnail: Option<String>,
    pub secure_media: Option<RawMedia>,
    pub media: Option<RawMedia>,
    pub preview: Option<RawPreview>,
    pub gallery_data: Option<RawGalleryData>,
    pub media_metadata: Option<HashMap<String, RawMediaMetadata>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawMedia {
    pub reddit_video: Option<RawVideo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawVideo {
    pub fallback_url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub duration: Option<u32>,
    pub is_gif: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawPreview {
    pub images: Vec<RawPreviewImage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawPreviewImage {
    pub source: Option<RawImageSource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawImageSource {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawGalleryData {
    pub items: Vec<RawGalleryItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawGalleryItem {
    pub media_id: String,
}

/// One entry of `media_metadata`; `s` is the full-size source
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawMediaMetadata {
    pub s: Option<RawMetadataSource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawMetadataSource {
    pub u: Option<String>,
    pub gif: Option<String>,
    pub x: Option<u32>,
    pub y: Option<u32>,
}

impl RawPost {
    /// Media posts carried by this submission
    ///
    /// Text posts and links to unsupported hosts yield nothing. A gallery
    /// yields one post per image it has metadata for.
    pub(crate) fn into_posts(self) -> Vec<RedditPost> {
        if self.is_self {
            return Vec::new();
        }

        let domain = self.domain.as_deref().unwrap_or("");
        if self.is_video && domain == "v.redd.it" {
            return vec![self.video_post()];
        }
        if self.is_gallery.unwrap_or(false) {
            return self.gallery_posts();
        }
        let is_image = self.post_hint.as_deref() == Some("image") || IMAGE_DOMAINS.contains(&domain);
        if is_image {
            return vec![self.image_post()];
        }
        Vec::new()
    }

    fn video_post(&self) -> RedditPost {
        let video = self
            .secure_media
            .as_ref()
            .and_then(|m| m.reddit_video.clone())
            .or_else(|| self.media.as_ref().and_then(|m| m.reddit_video.clone()))
            .unwrap_or_default();

        let fallback = video.fallback_url.filter(|url| !url.is_empty());
        let mut post = self.base_post(
            self.id.clone(),
            fallback.clone().unwrap_or_default(),
            if video.is_gif {
                MediaType::Gif
            } else {
                MediaType::Video
            },
        );
        post.width = video.width;
        post.height = video.height;
        post.duration = video.duration;
        post.video_url = fallback;
        post
    }

    fn image_post(&self) -> RedditPost {
        let url = self
            .url_overridden_by_dest
            .clone()
            .or_else(|| self.url.clone())
            .unwrap_or_default();
        let source = self
            .preview
            .as_ref()
            .and_then(|p| p.images.first())
            .and_then(|image| image.source.as_ref());

        let mut post = self.base_post(self.id.clone(), url, MediaType::Image);
        post.width = source.and_then(|s| s.width);
        post.height = source.and_then(|s| s.height);
        post
    }

    fn gallery_posts(&self) -> Vec<RedditPost> {
        let (Some(gallery), Some(metadata)) = (&self.gallery_data, &self.media_metadata) else {
            return Vec::new();
        };

        gallery
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.media_id.is_empty())
            .filter_map(|(index, item)| {
                let source = metadata.get(&item.media_id)?.s.as_ref()?;
                let url = source
                    .u
                    .as_deref()
                    .or(source.gif.as_deref())
                    .filter(|url| !url.is_empty())?
                    .replace("&amp;", "&");

                let mut post = self.base_post(
                    format!("{}_{}", self.id, item.media_id),
                    url,
                    MediaType::Image,
                );
                post.width = source.x;
                post.height = source.y;
                post.gallery_index = Some(index);
                post.gallery_id = Some(self.id.clone());
                Some(post)
            })
            .collect()
    }

    fn base_post(&self, id: String, url: String, media_type: MediaType) -> RedditPost {
        RedditPost {
            id,
            fullname: self
                .name
                .clone()
                .unwrap_or_else(|| format!("t3_{}", self.id)),
            title: self.title.clone().unwrap_or_default(),
            subreddit: self.subreddit.clone().unwrap_or_default(),
            author: self
                .author
                .clone()
                .unwrap_or_else(|| "[deleted]".to_string()),
            score: self.score,
            url,
            media_type,
            width: None,
            height: None,
            duration: None,
            video_url: None,
            is_nsfw: self.over_18,
            permalink: self.permalink.clone().unwrap_or_default(),
            created_utc: DateTime::<Utc>::from_timestamp(self.created_utc as i64, 0).unwrap_or_default(),
            is_gallery: self.is_gallery.unwrap_or(false),
            gallery_index: None,
            gallery_id: None,
            thumbnail_url: self
                .thumbnail
                .clone()
                .filter(|thumb| thumb.starts_with("http")),
        }
    }
}
