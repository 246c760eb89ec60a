//! Content classification from the shape of a final web URL.
//!
//! Runs on the URL we are about to show a preview for, not on the raw link
//! the user pasted, so it does not go through the canonical parser.

use canonical::{ContentKind, PlatformConfig};
use url::Url;

/// Kind of content a web URL points at, plus its id when one is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlContent {
    pub kind: ContentKind,
    pub id: Option<String>,
}

impl UrlContent {
    fn new(kind: ContentKind, id: Option<&str>) -> Self {
        Self {
            kind,
            id: id.filter(|id| !id.is_empty()).map(str::to_string),
        }
    }

    fn unknown() -> Self {
        Self::new(ContentKind::Unknown, None)
    }
}

/// Rules, first match wins:
///
/// 1. `/shorts/<id>` → shorts
/// 2. `/live/<id>` → live
/// 3. `/watch?v=<id>`, `/embed/<id>`, or `<short_host>/<id>` → video
/// 4. `/playlist` or any `list` parameter → playlist
/// 5. `/channel/`, `/c/`, `/user/`, `/@` → channel
/// 6. otherwise unknown
pub fn classify_url(web_url: &str, platform: &PlatformConfig) -> UrlContent {
    let Ok(url) = Url::parse(web_url.trim()) else {
        return UrlContent::unknown();
    };

    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let path = url.path();
    let param = |name: &str| {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    };

    if let Some(id) = segment_after(path, "/shorts/") {
        return UrlContent::new(ContentKind::Shorts, Some(id));
    }
    if let Some(id) = segment_after(path, "/live/") {
        return UrlContent::new(ContentKind::Live, Some(id));
    }
    if path == "/watch" {
        return UrlContent::new(ContentKind::Video, param("v").as_deref());
    }
    if let Some(id) = segment_after(path, "/embed/") {
        return UrlContent::new(ContentKind::Video, Some(id));
    }
    if host == platform.short_host.to_ascii_lowercase() {
        let id = path.trim_start_matches('/').split('/').next();
        if id.is_some_and(|id| !id.is_empty()) {
            return UrlContent::new(ContentKind::Video, id);
        }
    }

    let list = param("list");
    if path == "/playlist" || list.is_some() {
        return UrlContent::new(ContentKind::Playlist, list.as_deref());
    }

    for prefix in ["/channel/", "/c/", "/user/", "/@"] {
        if let Some(rest) = path.strip_prefix(prefix) {
            let id = rest.split('/').next();
            return UrlContent::new(ContentKind::Channel, id);
        }
    }

    UrlContent::unknown()
}

fn segment_after<'a>(path: &'a str, marker: &str) -> Option<&'a str> {
    let start = path.find(marker)? + marker.len();
    path[start..].split('/').next()
}
