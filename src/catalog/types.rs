//! Shared types used by the catalog client.

use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Errors returned while resolving catalog nodes or caption resources.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Base URL failed to parse or normalize.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
    /// HTTP layer failed before receiving a usable response.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Catalog responded with an unexpected status code.
    #[error("Unexpected catalog response ({status}): {body}")]
    UnexpectedStatus {
        /// HTTP status returned from the catalog.
        status: StatusCode,
        /// Body payload associated with the failing response.
        body: String,
    },
    /// Catalog response parsed but did not carry the expected shape.
    #[error("Malformed catalog response: {0}")]
    Malformed(String),
}

/// Opaque bearer credential attached to every catalog request.
#[derive(Clone)]
pub struct CatalogSession {
    token: String,
}

impl CatalogSession {
    /// Wrap a raw bearer token obtained from the token endpoint.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for CatalogSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CatalogSession(..)")
    }
}

/// Reference to one catalog node, as listed by its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryNode {
    /// Catalog key identifying the node.
    pub key: String,
}

/// One playable media item of a leaf catalog node.
#[derive(Debug, Clone)]
pub struct MediaItem {
    /// Display title of the video.
    pub title: String,
    /// First-published timestamp as reported by the catalog (ISO-8601).
    pub first_published: String,
    /// Caption track reference, when the item carries one.
    pub caption: Option<CaptionTrack>,
}

impl MediaItem {
    /// Date portion of the first-published timestamp.
    pub fn published_date(&self) -> &str {
        self.first_published
            .split('T')
            .next()
            .unwrap_or(&self.first_published)
    }
}

/// Resolvable caption resource belonging to one media item.
#[derive(Debug, Clone)]
pub struct CaptionTrack {
    /// URL of the caption resource.
    pub url: String,
}

#[derive(Deserialize)]
pub(crate) struct CategoryResponse {
    pub(crate) category: CategoryBody,
}

#[derive(Deserialize)]
pub(crate) struct CategoryBody {
    #[serde(default)]
    pub(crate) subcategories: Option<Vec<SubcategoryEntry>>,
    #[serde(default)]
    pub(crate) media: Option<Vec<MediaEntry>>,
}

#[derive(Deserialize)]
pub(crate) struct SubcategoryEntry {
    pub(crate) key: String,
}

#[derive(Deserialize)]
pub(crate) struct MediaEntry {
    pub(crate) title: String,
    #[serde(rename = "firstPublished")]
    pub(crate) first_published: String,
    #[serde(default)]
    pub(crate) files: Vec<MediaFile>,
}

#[derive(Deserialize)]
pub(crate) struct MediaFile {
    #[serde(default)]
    pub(crate) subtitles: Option<SubtitleRef>,
}

#[derive(Deserialize)]
pub(crate) struct SubtitleRef {
    pub(crate) url: String,
}

impl MediaEntry {
    /// Narrow the wire entry down to the internal media item view.
    pub(crate) fn into_media_item(self) -> MediaItem {
        let caption = self
            .files
            .into_iter()
            .next()
            .and_then(|file| file.subtitles)
            .map(|subtitles| CaptionTrack { url: subtitles.url });
        MediaItem {
            title: self.title,
            first_published: self.first_published,
            caption,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_date_keeps_date_portion() {
        let item = MediaItem {
            title: "A".into(),
            first_published: "2024-05-01T09:30:00Z".into(),
            caption: None,
        };
        assert_eq!(item.published_date(), "2024-05-01");
    }

    #[test]
    fn published_date_passes_through_bare_dates() {
        let item = MediaItem {
            title: "A".into(),
            first_published: "2024-05-01".into(),
            caption: None,
        };
        assert_eq!(item.published_date(), "2024-05-01");
    }

    #[test]
    fn media_entry_without_subtitles_maps_to_no_caption() {
        let entry: MediaEntry = serde_json::from_value(serde_json::json!({
            "title": "B",
            "firstPublished": "2024-05-02T00:00:00Z",
            "files": [{}]
        }))
        .expect("entry");
        let item = entry.into_media_item();
        assert!(item.caption.is_none());
        assert_eq!(item.title, "B");
    }

    #[test]
    fn media_entry_with_subtitles_carries_url() {
        let entry: MediaEntry = serde_json::from_value(serde_json::json!({
            "title": "C",
            "firstPublished": "2024-05-03T00:00:00Z",
            "files": [{ "subtitles": { "url": "https://cdn.example/c.vtt" } }]
        }))
        .expect("entry");
        let item = entry.into_media_item();
        assert_eq!(
            item.caption.map(|track| track.url).as_deref(),
            Some("https://cdn.example/c.vtt")
        );
    }

    #[test]
    fn session_debug_redacts_token() {
        let session = CatalogSession::new("secret-jwt");
        assert_eq!(format!("{session:?}"), "CatalogSession(..)");
    }
}
