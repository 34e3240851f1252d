//! Wallhaven enumerations and format validators

use crate::types::wire_enum;
use regex::Regex;
use std::sync::LazyLock;

static RESOLUTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i)(\d+)x(\d+)$").unwrap());

static RATIO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i)(\d+(?:\.\d+)?)[x:](\d+(?:\.\d+)?)$").unwrap());

static SEED_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6}$").unwrap());

wire_enum! {
    /// Wallpaper categories, sent as a `general/anime/people` bitmask
    pub enum Category {
        General => "general",
        Anime => "anime",
        People => "people",
    }
}

wire_enum! {
    /// Content purity levels, sent as a `sfw/sketchy/nsfw` bitmask
    pub enum Purity {
        /// Safe for work
        Sfw => "sfw",
        /// May be questionable
        Sketchy => "sketchy",
        /// Not safe for work, requires an API key
        Nsfw => "nsfw",
    }
}

wire_enum! {
    /// Result ordering
    #[derive(Default)]
    pub enum Sort {
        #[default]
        DateAdded => "date_added",
        Relevance => "relevance",
        /// Random ordering; the server issues a seed to keep pages stable
        Random => "random",
        Views => "views",
        Favorites => "favorites",
        /// Toplist ordering, the only sorting that accepts a top range
        Toplist => "toplist",
    }
}

wire_enum! {
    /// Sort direction
    #[derive(Default)]
    pub enum Order {
        #[default]
        Desc => "desc",
        Asc => "asc",
    }
}

wire_enum! {
    /// Time window for toplist sorting
    pub enum TopRange {
        OneDay => "1d",
        ThreeDays => "3d",
        OneWeek => "1w",
        OneMonth => "1M",
        ThreeMonths => "3M",
        SixMonths => "6M",
        OneYear => "1y",
    }
}

wire_enum! {
    /// Colors accepted by color search, as hex without `#`
    pub enum Color {
        Maroon => "660000",
        DarkRed => "990000",
        Red => "cc0000",
        Crimson => "cc3333",
        Pink => "ea4c88",
        Purple => "993399",
        Plum => "663399",
        Indigo => "333399",
        Blue => "0066cc",
        Azure => "0099cc",
        Cyan => "66cccc",
        Teal => "77cc33",
        Green => "669900",
        DarkGreen => "336600",
        Olive => "666600",
        YellowGreen => "999900",
        Yellow => "cccc33",
        YellowBright => "ffff00",
        Orange => "ffcc33",
        OrangeBright => "ff9900",
        Vermillion => "ff6600",
        RedOrange => "cc6633",
        Brown => "996633",
        DarkBrown => "663300",
        Black => "000000",
        Grey => "999999",
        Silver => "cccccc",
        White => "ffffff",
        Charcoal => "424153",
    }
}

wire_enum! {
    /// File type filter
    pub enum FileType {
        Png => "png",
        Jpg => "jpg",
    }
}

/// Encode a selection as a Wallhaven bitmask string (e.g. `"110"`)
pub(crate) fn bitmask<T: PartialEq>(all: &[T], selected: &[T]) -> String {
    all.iter()
        .map(|v| if selected.contains(v) { '1' } else { '0' })
        .collect()
}

/// `WIDTHxHEIGHT` with both sides at least 1
pub fn is_valid_resolution(resolution: &str) -> bool {
    RESOLUTION_REGEX
        .captures(resolution)
        .and_then(|caps| {
            let width: u32 = caps[1].parse().ok()?;
            let height: u32 = caps[2].parse().ok()?;
            Some(width >= 1 && height >= 1)
        })
        .unwrap_or(false)
}

/// `WIDTH:HEIGHT` or `WIDTHxHEIGHT` with both sides positive
pub fn is_valid_ratio(ratio: &str) -> bool {
    RATIO_REGEX
        .captures(ratio)
        .and_then(|caps| {
            let width: f64 = caps[1].parse().ok()?;
            let height: f64 = caps[2].parse().ok()?;
            Some(width > 0.0 && height > 0.0)
        })
        .unwrap_or(false)
}

/// Exactly six ASCII alphanumerics
pub fn is_valid_seed(seed: &str) -> bool {
    SEED_REGEX.is_match(seed)
}
