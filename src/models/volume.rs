//! Bibliographic data returned by the volumes API and its normalized form

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder title used when enrichment finds nothing
pub const UNKNOWN_TITLE: &str = "Unknown Title";
/// Placeholder author used when enrichment finds nothing
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// `volumeInfo` section of a volume. Keys not modelled here are kept in
/// `extra` so the raw document can be handed back to clients unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_links: Option<ImageLinks>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Book fields populated from a lookup
#[derive(Debug, Clone, PartialEq)]
pub struct BookMetadata {
    pub title: String,
    pub subtitle: Option<String>,
    pub author: String,
    pub small_thumbnail_url: Option<String>,
    pub large_thumbnail_url: Option<String>,
    pub details: Option<String>,
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl From<Option<&VolumeInfo>> for BookMetadata {
    fn from(info: Option<&VolumeInfo>) -> Self {
        let Some(info) = info else {
            return Self::default();
        };
        let links = info.image_links.as_ref();
        Self {
            title: non_blank(info.title.as_ref()).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            subtitle: non_blank(info.subtitle.as_ref()),
            author: non_blank(info.authors.first())
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            small_thumbnail_url: non_blank(links.and_then(|l| l.small_thumbnail.as_ref())),
            large_thumbnail_url: non_blank(links.and_then(|l| l.thumbnail.as_ref())),
            details: non_blank(info.description.as_ref()),
        }
    }
}

impl Default for BookMetadata {
    fn default() -> Self {
        Self {
            title: UNKNOWN_TITLE.to_string(),
            subtitle: None,
            author: UNKNOWN_AUTHOR.to_string(),
            small_thumbnail_url: None,
            large_thumbnail_url: None,
            details: None,
        }
    }
}
