//! Common types used throughout xanax
//!
//! Shared definitions that do not belong to a single source.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Ordered list of query parameters
pub type QueryPairs = Vec<(String, String)>;

// ============================================================================
// Media Type
// ============================================================================

/// Kind of media carried by an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Static image (jpg, png, webp, ...)
    Image,
    /// Video file
    Video,
    /// Animated GIF or silent looping video
    Gif,
    /// No filter, include everything
    #[default]
    Any,
}

impl MediaType {
    /// Wire/CLI name of this media type
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
            MediaType::Gif => "gif",
            MediaType::Any => "any",
        }
    }

    /// Check whether an item of type `other` passes this filter
    pub fn accepts(&self, other: MediaType) -> bool {
        *self == MediaType::Any || *self == other
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "image" => Ok(MediaType::Image),
            "video" => Ok(MediaType::Video),
            "gif" => Ok(MediaType::Gif),
            "any" => Ok(MediaType::Any),
            other => Err(crate::Error::validation(format!(
                "Unknown media type '{other}'. Expected image, video, gif or any"
            ))),
        }
    }
}

// ============================================================================
// Wire Enums
// ============================================================================

/// Declare a fieldless enum whose variants map to fixed wire strings
///
/// Generates serde renames, `ALL`, `as_str`, `Display`, and a
/// case-insensitive `FromStr` that fails with a validation error.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire name of this value
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::Error;

            fn from_str(s: &str) -> $crate::error::Result<Self> {
                let s = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .or_else(|| $name::ALL.iter().copied().find(|v| v.as_str().eq_ignore_ascii_case(s)))
                    .ok_or_else(|| {
                        $crate::error::Error::validation(format!(
                            "Invalid {} '{}'. Expected one of: {}",
                            stringify!($name),
                            s,
                            $name::ALL.iter().map(|v| v.as_str()).collect::<Vec<_>>().join(", ")
                        ))
                    })
            }
        }
    };
}

pub(crate) use wire_enum;
