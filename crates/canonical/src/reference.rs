use std::fmt;

use serde::{Deserialize, Serialize};

/// What a link points to, independent of how it was written.
///
/// Every query string is stored without its leading `?`. An empty string
/// means "no query"; builders treat the two identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CanonicalReference {
    /// `watch?v=<id>` or a bare short-link id. `extra_query` is the original
    /// query verbatim, companion parameters such as `list` included.
    Video {
        video_id: String,
        extra_query: String,
    },
    Shorts {
        shorts_id: String,
        extra_query: String,
    },
    Live {
        live_id: String,
        extra_query: String,
    },
    /// `query` is already reduced to `list` and the optional `si` share token.
    Playlist { playlist_id: String, query: String },
    /// `channel/<id>`, `c/<name>`, `user/<name>`, or `@<handle>`, kept whole.
    Channel { channel_path: String, query: String },
    /// Anything unrecognized, passed through unchanged.
    Opaque { original_path: String, query: String },
}

impl CanonicalReference {
    pub fn kind(&self) -> ContentKind {
        match self {
            CanonicalReference::Video { .. } => ContentKind::Video,
            CanonicalReference::Shorts { .. } => ContentKind::Shorts,
            CanonicalReference::Live { .. } => ContentKind::Live,
            CanonicalReference::Playlist { .. } => ContentKind::Playlist,
            CanonicalReference::Channel { .. } => ContentKind::Channel,
            CanonicalReference::Opaque { .. } => ContentKind::Unknown,
        }
    }

    /// Id of the video-like content, if this reference names one.
    pub fn video_like_id(&self) -> Option<&str> {
        match self {
            CanonicalReference::Video { video_id: id, .. }
            | CanonicalReference::Shorts { shorts_id: id, .. }
            | CanonicalReference::Live { live_id: id, .. } => Some(id),
            _ => None,
        }
    }
}

/// Coarse content classification shared by the parser, the metadata
/// resolver, and the preview renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Video,
    Playlist,
    Channel,
    Shorts,
    Live,
    Unknown,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Video => "video",
            ContentKind::Playlist => "playlist",
            ContentKind::Channel => "channel",
            ContentKind::Shorts => "shorts",
            ContentKind::Live => "live",
            ContentKind::Unknown => "unknown",
        }
    }

    /// Video, shorts, and live streams are all playable videos.
    pub fn is_video_like(self) -> bool {
        matches!(
            self,
            ContentKind::Video | ContentKind::Shorts | ContentKind::Live
        )
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
