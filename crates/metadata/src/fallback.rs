use canonical::{ContentKind, PlatformConfig};

use crate::classify::classify_url;
use crate::types::DisplayMetadata;

/// Best-effort record used whenever a lookup fails or times out.
///
/// Kind and id come from the URL shape, so a failed lookup for a video still
/// previews with that video's thumbnail.
pub fn fallback(web_url: &str, platform: &PlatformConfig) -> DisplayMetadata {
    let content = classify_url(web_url, platform);
    placeholder(content.kind, content.id.as_deref(), web_url, platform)
}

/// Fixed per-kind title and description, with an id-derived thumbnail for
/// video-like content.
pub fn placeholder(
    kind: ContentKind,
    id: Option<&str>,
    web_url: &str,
    platform: &PlatformConfig,
) -> DisplayMetadata {
    let name = &platform.name;
    let (title, description) = match kind {
        ContentKind::Video | ContentKind::Shorts | ContentKind::Live => {
            (format!("{name} video"), format!("Watch on {name}"))
        }
        ContentKind::Playlist => (
            format!("{name} playlist"),
            format!("Browse this playlist on {name}"),
        ),
        ContentKind::Channel => (
            format!("{name} channel"),
            format!("Visit this channel on {name}"),
        ),
        ContentKind::Unknown => (name.clone(), format!("Watch on {name}")),
    };

    DisplayMetadata {
        title,
        description,
        thumbnail_url: default_thumbnail(kind, id, platform),
        canonical_url: web_url.to_string(),
        kind,
        site_name: Some(name.clone()),
        embed_video_url: None,
    }
}

pub(crate) fn default_thumbnail(
    kind: ContentKind,
    id: Option<&str>,
    platform: &PlatformConfig,
) -> String {
    match id {
        Some(id) if kind.is_video_like() => platform.thumbnail_for(id),
        _ => platform.default_image.clone(),
    }
}
