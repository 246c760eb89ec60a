//! Destination URL builders.
//!
//! Three pure functions, one per destination scheme, each dispatching on the
//! same [`CanonicalReference`] variants:
//!
//! | Reference | Path and query                            |
//! |-----------|-------------------------------------------|
//! | Video     | `/watch?v=<id>` + remaining extra query   |
//! | Shorts    | `/shorts/<id>`                            |
//! | Live      | `/live/<id>`                              |
//! | Playlist  | `/playlist?<reduced query>`               |
//! | Channel   | `/<channel path>` + query                 |
//! | Opaque    | `/<original path>` + query                |
//!
//! ```rust
//! use canonical::{parse, DestinationSet, PlatformConfig};
//!
//! let cfg = PlatformConfig::default();
//! let set = DestinationSet::build(&parse("shorts/abc123"), &cfg);
//! assert_eq!(set.web, "https://www.youtube.com/shorts/abc123");
//! assert_eq!(set.ios_scheme, "youtube://www.youtube.com/shorts/abc123");
//! assert!(set.android_intent.starts_with("intent://www.youtube.com/shorts/abc123#Intent;"));
//! ```

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::config::PlatformConfig;
use crate::reference::CanonicalReference;

/// The three equivalent destinations of one reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationSet {
    pub web: String,
    pub ios_scheme: String,
    pub android_intent: String,
}

impl DestinationSet {
    pub fn build(reference: &CanonicalReference, cfg: &PlatformConfig) -> Self {
        Self {
            web: web_url(reference, cfg),
            ios_scheme: ios_url(reference, cfg),
            android_intent: android_intent_url(reference, cfg),
        }
    }
}

/// `https://<web_host>/...`
pub fn web_url(reference: &CanonicalReference, cfg: &PlatformConfig) -> String {
    format!("https://{}{}", cfg.web_host, path_and_query(reference))
}

/// `<app_scheme>://<web_host>/...`, opened by the iOS app when installed.
pub fn ios_url(reference: &CanonicalReference, cfg: &PlatformConfig) -> String {
    format!(
        "{}://{}{}",
        cfg.app_scheme,
        cfg.web_host,
        path_and_query(reference)
    )
}

/// Android intent URL. Chrome opens `android_package` when installed and
/// otherwise navigates to the URL-encoded web destination.
pub fn android_intent_url(reference: &CanonicalReference, cfg: &PlatformConfig) -> String {
    let fallback = urlencoding::encode(&web_url(reference, cfg)).into_owned();
    format!(
        "intent://{}{}#Intent;scheme=https;package={};S.browser_fallback_url={};end",
        cfg.web_host,
        path_and_query(reference),
        cfg.android_package,
        fallback
    )
}

fn path_and_query(reference: &CanonicalReference) -> String {
    match reference {
        CanonicalReference::Video {
            video_id,
            extra_query,
        } => {
            let mut out = format!("/watch?v={}", encode_component(video_id));
            let companions = without_param(extra_query, "v");
            if !companions.is_empty() {
                out.push('&');
                out.push_str(&companions);
            }
            out
        }
        CanonicalReference::Shorts { shorts_id, .. } => format!("/shorts/{shorts_id}"),
        CanonicalReference::Live { live_id, .. } => format!("/live/{live_id}"),
        CanonicalReference::Playlist { playlist_id, query } => {
            if query.trim_start_matches('?').is_empty() {
                format!("/playlist?list={}", encode_component(playlist_id))
            } else {
                format!("/playlist{}", with_query(query))
            }
        }
        CanonicalReference::Channel {
            channel_path,
            query,
        } => format!("/{channel_path}{}", with_query(query)),
        CanonicalReference::Opaque {
            original_path,
            query,
        } => format!("/{original_path}{}", with_query(query)),
    }
}

/// `?<query>` or nothing. Tolerates a query that still carries its `?`.
fn with_query(query: &str) -> String {
    let query = query.trim_start_matches('?');
    if query.is_empty() {
        String::new()
    } else {
        format!("?{query}")
    }
}

/// Drop every `name=` pair, keeping the other pairs byte-for-byte so that
/// already-encoded values are not encoded twice.
fn without_param(query: &str, name: &str) -> String {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| {
            let key = pair.split('=').next().unwrap_or_default();
            !pair.is_empty() && key != name
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn cfg() -> PlatformConfig {
        PlatformConfig::default()
    }

    #[test]
    fn video_merges_companion_params() {
        let reference = parse("watch?v=dQw4w9WgXcQ&list=PL1&t=30");
        assert_eq!(
            web_url(&reference, &cfg()),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PL1&t=30"
        );
        assert_eq!(
            ios_url(&reference, &cfg()),
            "youtube://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PL1&t=30"
        );
    }

    #[test]
    fn video_without_query_has_no_separator() {
        let reference = CanonicalReference::Video {
            video_id: "dQw4w9WgXcQ".into(),
            extra_query: String::new(),
        };
        assert_eq!(
            web_url(&reference, &cfg()),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );

        let lone_mark = CanonicalReference::Video {
            video_id: "dQw4w9WgXcQ".into(),
            extra_query: "?".into(),
        };
        assert_eq!(
            web_url(&lone_mark, &cfg()),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }

    #[test]
    fn encoded_companions_are_not_reencoded() {
        let reference = parse("watch?v=abc&q=a%20b%26c");
        assert_eq!(
            web_url(&reference, &cfg()),
            "https://www.youtube.com/watch?v=abc&q=a%20b%26c"
        );
    }

    #[test]
    fn shorts_and_live_drop_query() {
        assert_eq!(
            web_url(&parse("shorts/abc123?feature=share"), &cfg()),
            "https://www.youtube.com/shorts/abc123"
        );
        assert_eq!(
            web_url(&parse("live/xyz789?si=t"), &cfg()),
            "https://www.youtube.com/live/xyz789"
        );
    }

    #[test]
    fn playlist_defaults_to_list_param() {
        let bare = CanonicalReference::Playlist {
            playlist_id: "PL1".into(),
            query: String::new(),
        };
        assert_eq!(
            web_url(&bare, &cfg()),
            "https://www.youtube.com/playlist?list=PL1"
        );
        assert_eq!(
            web_url(&parse("playlist?list=PL1&si=abc&utm_source=x"), &cfg()),
            "https://www.youtube.com/playlist?list=PL1&si=abc"
        );
    }

    #[test]
    fn channel_and_opaque_pass_through() {
        assert_eq!(
            web_url(&parse("@handle?sub_confirmation=1"), &cfg()),
            "https://www.youtube.com/@handle?sub_confirmation=1"
        );
        assert_eq!(
            web_url(&parse("feed/trending"), &cfg()),
            "https://www.youtube.com/feed/trending"
        );
    }

    #[test]
    fn android_intent_wraps_encoded_web_url() {
        let reference = parse("watch?v=dQw4w9WgXcQ&list=PL1");
        let web = web_url(&reference, &cfg());
        let intent = android_intent_url(&reference, &cfg());

        assert_eq!(
            intent,
            format!(
                "intent://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PL1#Intent;scheme=https;\
                 package=com.google.android.youtube;S.browser_fallback_url={};end",
                urlencoding::encode(&web)
            )
        );
        assert!(intent.contains(
            "S.browser_fallback_url=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3DdQw4w9WgXcQ%26list%3DPL1;"
        ));
    }

    #[test]
    fn builders_are_deterministic() {
        let inputs = [
            "dQw4w9WgXcQ",
            "watch?v=dQw4w9WgXcQ&list=PL1",
            "shorts/abc123",
            "live/xyz",
            "playlist?list=PL1&si=x",
            "@handle",
            "anything/else?x=1",
        ];
        for input in inputs {
            let reference = parse(input);
            let first = DestinationSet::build(&reference, &cfg());
            let second = DestinationSet::build(&reference, &cfg());
            assert_eq!(first, second, "input {input:?}");
        }
    }

    #[test]
    fn custom_scheme_and_package() {
        let cfg = PlatformConfig {
            app_scheme: "vnd.youtube".into(),
            android_package: "app.revanced.android.youtube".into(),
            ..Default::default()
        };
        let set = DestinationSet::build(&parse("shorts/abc123"), &cfg);
        assert_eq!(set.ios_scheme, "vnd.youtube://www.youtube.com/shorts/abc123");
        assert!(set
            .android_intent
            .contains(";package=app.revanced.android.youtube;"));
    }
}
