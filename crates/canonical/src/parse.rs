use url::form_urlencoded;

use crate::config::PlatformConfig;
use crate::reference::CanonicalReference;

/// Parse a raw path-and-query into a [`CanonicalReference`] using the default
/// platform hosts.
///
/// Never fails: anything unrecognized comes back as
/// [`CanonicalReference::Opaque`]. An empty input yields an `Opaque` with an
/// empty path, which callers are expected to special-case.
pub fn parse(raw: &str) -> CanonicalReference {
    parse_with(raw, &PlatformConfig::default())
}

/// Same as [`parse`], recognizing the hosts named by `cfg`.
pub fn parse_with(raw: &str, cfg: &PlatformConfig) -> CanonicalReference {
    let clean = strip_location(raw, cfg);
    let (path, query) = clean.split_once('?').unwrap_or((clean, ""));
    classify(path, query)
}

/// Peel whitespace, scheme, host prefixes, and slashes off a pasted link so
/// that only the platform-relative path and query remain.
fn strip_location<'a>(raw: &'a str, cfg: &PlatformConfig) -> &'a str {
    let mut rest = raw.trim().trim_start_matches('/');

    rest = strip_scheme(rest);
    rest = strip_prefix_ignore_case(rest, "www.").unwrap_or(rest);
    rest = strip_prefix_ignore_case(rest, "m.").unwrap_or(rest);

    for host in [cfg.bare_web_host(), cfg.short_host.as_str()] {
        if let Some(after) = strip_prefix_ignore_case(rest, host) {
            if after.is_empty() || after.starts_with(['/', '?']) {
                rest = after;
                break;
            }
        }
    }

    rest.trim_start_matches('/')
}

/// `http:` or `https:` followed by one or two slashes. Proxies and chat apps
/// often collapse `//` to `/`, so a single slash is accepted.
fn strip_scheme(input: &str) -> &str {
    for scheme in ["https:", "http:"] {
        if let Some(after) = strip_prefix_ignore_case(input, scheme) {
            let slashes = after.bytes().take(2).take_while(|b| *b == b'/').count();
            if slashes > 0 {
                return &after[slashes..];
            }
        }
    }
    input
}

fn strip_prefix_ignore_case<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    let head = input.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &input[prefix.len()..])
}

fn classify(path: &str, query: &str) -> CanonicalReference {
    if let Some(shorts_id) = leading_segment(path, "shorts/") {
        return CanonicalReference::Shorts {
            shorts_id: shorts_id.to_string(),
            extra_query: query.to_string(),
        };
    }

    if let Some(live_id) = leading_segment(path, "live/") {
        return CanonicalReference::Live {
            live_id: live_id.to_string(),
            extra_query: query.to_string(),
        };
    }

    if path == "watch" {
        if let Some(video_id) = query_param(query, "v") {
            return CanonicalReference::Video {
                video_id,
                extra_query: query.to_string(),
            };
        }
    }

    if path == "playlist" {
        if let Some(playlist_id) = query_param(query, "list") {
            let mut reduced = form_urlencoded::Serializer::new(String::new());
            reduced.append_pair("list", &playlist_id);
            if let Some(share_token) = query_param(query, "si") {
                reduced.append_pair("si", &share_token);
            }
            return CanonicalReference::Playlist {
                playlist_id,
                query: reduced.finish(),
            };
        }
    }

    if ["channel/", "c/", "user/", "@"]
        .iter()
        .any(|prefix| path.starts_with(prefix))
    {
        return CanonicalReference::Channel {
            channel_path: path.to_string(),
            query: query.to_string(),
        };
    }

    if is_short_link_id(path) {
        return CanonicalReference::Video {
            video_id: path.to_string(),
            extra_query: query.to_string(),
        };
    }

    CanonicalReference::Opaque {
        original_path: path.to_string(),
        query: query.to_string(),
    }
}

/// First segment after `prefix`, if non-empty.
fn leading_segment<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix)?;
    let segment = rest.split('/').next().unwrap_or_default();
    (!segment.is_empty()).then_some(segment)
}

/// First non-empty value of `name`, percent-decoded.
fn query_param(query: &str, name: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Bare `youtu.be/<id>` ids: 10 to 12 characters of `[A-Za-z0-9_-]`.
fn is_short_link_id(path: &str) -> bool {
    (10..=12).contains(&path.len())
        && path
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, query: &str) -> CanonicalReference {
        CanonicalReference::Video {
            video_id: id.into(),
            extra_query: query.into(),
        }
    }

    #[test]
    fn video_shaped_inputs_resolve_to_the_same_id() {
        let inputs = [
            "watch?v=dQw4w9WgXcQ",
            "/watch?v=dQw4w9WgXcQ",
            "dQw4w9WgXcQ",
            "youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https:/www.youtube.com/watch?v=dQw4w9WgXcQ",
            "http://m.youtube.com/watch?v=dQw4w9WgXcQ",
            "  HTTPS://WWW.YOUTUBE.COM/watch?v=dQw4w9WgXcQ  ",
            "//youtube.com/watch?v=dQw4w9WgXcQ",
        ];

        for input in inputs {
            let parsed = parse(input);
            match parsed {
                CanonicalReference::Video { ref video_id, .. } => {
                    assert_eq!(video_id, "dQw4w9WgXcQ", "input {input:?}")
                }
                other => panic!("{input:?} parsed as {other:?}"),
            }
        }
    }

    #[test]
    fn watch_keeps_full_query() {
        assert_eq!(
            parse("watch?v=dQw4w9WgXcQ&list=PL1"),
            video("dQw4w9WgXcQ", "v=dQw4w9WgXcQ&list=PL1")
        );
    }

    #[test]
    fn watch_without_v_is_opaque() {
        assert_eq!(
            parse("watch?list=PL1"),
            CanonicalReference::Opaque {
                original_path: "watch".into(),
                query: "list=PL1".into(),
            }
        );
        assert!(matches!(
            parse("watch?v="),
            CanonicalReference::Opaque { .. }
        ));
    }

    #[test]
    fn short_link_keeps_query() {
        assert_eq!(
            parse("youtu.be/dQw4w9WgXcQ?si=abc&t=42"),
            video("dQw4w9WgXcQ", "si=abc&t=42")
        );
    }

    #[test]
    fn short_link_id_length_bounds() {
        assert!(matches!(parse("abcdefghi"), CanonicalReference::Opaque { .. }));
        assert!(matches!(parse("abcdefghij"), CanonicalReference::Video { .. }));
        assert!(matches!(parse("abcdefghijkl"), CanonicalReference::Video { .. }));
        assert!(matches!(
            parse("abcdefghijklm"),
            CanonicalReference::Opaque { .. }
        ));
        assert!(matches!(
            parse("abc.efghijk"),
            CanonicalReference::Opaque { .. }
        ));
    }

    #[test]
    fn shorts_and_live() {
        assert_eq!(
            parse("shorts/abc123"),
            CanonicalReference::Shorts {
                shorts_id: "abc123".into(),
                extra_query: String::new(),
            }
        );
        assert_eq!(
            parse("https://youtube.com/shorts/abc123/extra?feature=share"),
            CanonicalReference::Shorts {
                shorts_id: "abc123".into(),
                extra_query: "feature=share".into(),
            }
        );
        assert_eq!(
            parse("www.youtube.com/live/xyz789?si=tok"),
            CanonicalReference::Live {
                live_id: "xyz789".into(),
                extra_query: "si=tok".into(),
            }
        );
    }

    #[test]
    fn empty_shorts_id_falls_through() {
        assert_eq!(
            parse("shorts/"),
            CanonicalReference::Opaque {
                original_path: "shorts/".into(),
                query: String::new(),
            }
        );
    }

    #[test]
    fn playlist_query_is_reduced() {
        assert_eq!(
            parse("playlist?list=PL1&si=abc&utm_source=x"),
            CanonicalReference::Playlist {
                playlist_id: "PL1".into(),
                query: "list=PL1&si=abc".into(),
            }
        );
        assert_eq!(
            parse("youtube.com/playlist?feature=share&list=PL2"),
            CanonicalReference::Playlist {
                playlist_id: "PL2".into(),
                query: "list=PL2".into(),
            }
        );
    }

    #[test]
    fn channel_forms() {
        for path in [
            "channel/UC38IQsAvIsxxjztdMZQtwHA",
            "c/SomeName",
            "user/legacy",
            "@handle",
            "@handle/videos",
        ] {
            assert_eq!(
                parse(&format!("https://www.youtube.com/{path}")),
                CanonicalReference::Channel {
                    channel_path: path.into(),
                    query: String::new(),
                },
            );
        }
    }

    #[test]
    fn unknown_paths_pass_through() {
        assert_eq!(
            parse("feed/subscriptions?flow=2"),
            CanonicalReference::Opaque {
                original_path: "feed/subscriptions".into(),
                query: "flow=2".into(),
            }
        );
    }

    #[test]
    fn empty_input_is_opaque_with_empty_path() {
        for input in ["", "   ", "/", "https://www.youtube.com/", "youtu.be"] {
            assert_eq!(
                parse(input),
                CanonicalReference::Opaque {
                    original_path: String::new(),
                    query: String::new(),
                },
                "input {input:?}"
            );
        }
    }

    #[test]
    fn host_must_end_at_a_boundary() {
        assert_eq!(
            parse("youtube.community/post"),
            CanonicalReference::Opaque {
                original_path: "youtube.community/post".into(),
                query: String::new(),
            }
        );
    }

    #[test]
    fn scheme_without_slash_is_kept() {
        assert!(matches!(
            parse("https:dQw4w9WgXcQ"),
            CanonicalReference::Opaque { .. }
        ));
    }

    #[test]
    fn custom_platform_hosts() {
        let cfg = PlatformConfig {
            web_host: "www.example.tv".into(),
            short_host: "ex.tv".into(),
            ..Default::default()
        };
        assert_eq!(
            parse_with("https://ex.tv/dQw4w9WgXcQ", &cfg),
            video("dQw4w9WgXcQ", "")
        );
        assert_eq!(
            parse_with("example.tv/watch?v=dQw4w9WgXcQ", &cfg),
            video("dQw4w9WgXcQ", "v=dQw4w9WgXcQ")
        );
    }
}
