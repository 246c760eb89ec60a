//! HTML documents served by the router and the interstitial endpoint.
//!
//! Every interpolated value goes through [`escape_html`]; values placed inside
//! the interstitial script are emitted as JSON string literals with `<`
//! escaped so a URL cannot close the `<script>` element.

use std::fmt::Write as _;

use agent::Platform;
use canonical::PlatformConfig;
use metadata::DisplayMetadata;
use serde::{Deserialize, Serialize};

const OG_IMAGE_WIDTH: u32 = 1280;
const OG_IMAGE_HEIGHT: u32 = 720;

/// Escape `& < > " '` for use in element text and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Link preview page for crawlers.
///
/// Carries Open Graph and Twitter card tags built from `meta`, and sends any
/// human that ends up here on to `redirect_url` via meta refresh and script.
pub fn render_preview(
    meta: &DisplayMetadata,
    redirect_url: &str,
    platform: &PlatformConfig,
) -> String {
    let title = escape_html(&meta.title);
    let description = escape_html(&meta.description);
    let image = escape_html(&meta.thumbnail_url);
    let canonical = escape_html(&meta.canonical_url);
    let site_name = escape_html(meta.site_name.as_deref().unwrap_or(&platform.name));
    let redirect = escape_html(redirect_url);
    let og_type = if meta.kind.is_video_like() {
        "video.other"
    } else {
        "website"
    };

    let mut video_tags = String::new();
    if let Some(embed) = meta.embed_video_url.as_deref() {
        let embed = escape_html(embed);
        // Writing to a String cannot fail.
        let _ = write!(
            video_tags,
            "\n    <meta property=\"og:video:url\" content=\"{embed}\" />\
             \n    <meta property=\"og:video:secure_url\" content=\"{embed}\" />\
             \n    <meta property=\"og:video:type\" content=\"text/html\" />\
             \n    <meta property=\"og:video:width\" content=\"{OG_IMAGE_WIDTH}\" />\
             \n    <meta property=\"og:video:height\" content=\"{OG_IMAGE_HEIGHT}\" />"
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{title}</title>
    <meta name="description" content="{description}" />
    <link rel="canonical" href="{canonical}" />
    <meta property="og:type" content="{og_type}" />
    <meta property="og:title" content="{title}" />
    <meta property="og:description" content="{description}" />
    <meta property="og:image" content="{image}" />
    <meta property="og:image:width" content="{OG_IMAGE_WIDTH}" />
    <meta property="og:image:height" content="{OG_IMAGE_HEIGHT}" />
    <meta property="og:url" content="{canonical}" />
    <meta property="og:site_name" content="{site_name}" />{video_tags}
    <meta name="twitter:card" content="summary_large_image" />
    <meta name="twitter:title" content="{title}" />
    <meta name="twitter:description" content="{description}" />
    <meta name="twitter:image" content="{image}" />
    <meta http-equiv="refresh" content="0; url={redirect}" />
  </head>
  <body>
    <p><a href="{redirect}">{title}</a></p>
    <script>window.location.href = {redirect_js};</script>
  </body>
</html>
"#,
        redirect_js = js_string(redirect_url),
    )
}

/// Knobs for the mobile interstitial page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterstitialConfig {
    /// Delay before falling back to the web URL after a native-open attempt.
    pub fallback_delay_ms: u64,
    /// Try the native app as soon as the page loads.
    pub auto_open: bool,
    /// Arm the fallback timer after each native-open attempt.
    pub auto_fallback: bool,
}

impl Default for InterstitialConfig {
    fn default() -> Self {
        Self {
            fallback_delay_ms: 2_000,
            auto_open: true,
            auto_fallback: true,
        }
    }
}

/// Destinations handed to the interstitial by the router's redirect URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterstitialParams {
    pub web: String,
    pub android: Option<String>,
    pub ios: Option<String>,
    pub platform: Platform,
}

impl InterstitialParams {
    /// Build from raw query values. `None` when `web` is missing, empty, or not
    /// `http(s)`, or when a native URL uses a scheme other than `intent`
    /// (Android) or `app_scheme` (iOS). The page would otherwise navigate to
    /// whatever the query names.
    ///
    /// Any platform other than `ios` is treated as Android.
    pub fn from_query(
        web: Option<String>,
        android: Option<String>,
        ios: Option<String>,
        platform: Option<&str>,
        app_scheme: &str,
    ) -> Option<Self> {
        let web = web.filter(|value| !value.is_empty())?;
        if !has_scheme(&web, &["http", "https"]) {
            return None;
        }
        let android = android.filter(|value| !value.is_empty());
        if android.as_deref().is_some_and(|url| !has_scheme(url, &["intent"])) {
            return None;
        }
        let ios = ios.filter(|value| !value.is_empty());
        if ios.as_deref().is_some_and(|url| !has_scheme(url, &[app_scheme])) {
            return None;
        }

        let platform = match platform {
            Some(value) if value.eq_ignore_ascii_case("ios") => Platform::Ios,
            _ => Platform::Android,
        };
        Some(Self {
            web,
            android,
            ios,
            platform,
        })
    }

    /// The native URL for the caller's platform, if one was supplied.
    pub fn app_url(&self) -> Option<&str> {
        match self.platform {
            Platform::Ios => self.ios.as_deref(),
            _ => self.android.as_deref(),
        }
    }
}

/// Mobile landing page: attempt the native app, then fall back to the web URL
/// after a fixed delay unless the user picks a button first.
pub fn render_interstitial(
    params: &InterstitialParams,
    cfg: &InterstitialConfig,
    platform: &PlatformConfig,
) -> String {
    let app_url = params.app_url();
    let name = escape_html(&platform.name);
    let app_href = escape_html(app_url.unwrap_or(&params.web));
    let web_href = escape_html(&params.web);
    let app_js = app_url.map_or_else(|| "null".to_owned(), js_string);
    let web_js = js_string(&params.web);
    let delay = cfg.fallback_delay_ms;
    let auto_open = bool_js(cfg.auto_open);
    let auto_fallback = bool_js(cfg.auto_fallback);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <meta name="robots" content="noindex" />
    <title>Opening {name}</title>
    <style>
      body {{ font-family: system-ui, sans-serif; margin: 0; min-height: 100vh; display: flex; align-items: center; justify-content: center; }}
      main {{ text-align: center; padding: 24px; }}
      a.button {{ display: block; margin: 12px auto; padding: 12px 20px; max-width: 260px; border-radius: 8px; text-decoration: none; }}
      #open-app {{ background: #ff0000; color: #ffffff; }}
      #open-web {{ border: 1px solid #cccccc; color: #333333; }}
    </style>
  </head>
  <body>
    <main>
      <p>Opening {name}&hellip;</p>
      <a class="button" id="open-app" href="{app_href}">Open in app</a>
      <a class="button" id="open-web" href="{web_href}">Open in browser</a>
    </main>
    <script>
      (function () {{
        var appUrl = {app_js};
        var webUrl = {web_js};
        var delay = {delay};
        var autoOpen = {auto_open};
        var autoFallback = {auto_fallback};
        var timer = null;

        function cancel() {{
          if (timer !== null) {{
            clearTimeout(timer);
            timer = null;
          }}
        }}

        function openWeb() {{
          cancel();
          window.location.href = webUrl;
        }}

        function openApp() {{
          if (!appUrl) {{
            openWeb();
            return;
          }}
          cancel();
          window.location.href = appUrl;
          if (autoFallback) {{
            timer = setTimeout(function () {{
              timer = null;
              window.location.href = webUrl;
            }}, delay);
          }}
        }}

        document.getElementById("open-app").addEventListener("click", function (event) {{
          event.preventDefault();
          openApp();
        }});
        document.getElementById("open-web").addEventListener("click", function (event) {{
          event.preventDefault();
          openWeb();
        }});

        if (autoOpen) {{
          openApp();
        }}
      }})();
    </script>
  </body>
</html>
"#
    )
}

/// JavaScript string literal safe to embed inside a `<script>` element.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_owned())
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
}

fn has_scheme(raw: &str, allowed: &[&str]) -> bool {
    url::Url::parse(raw)
        .map(|url| allowed.iter().any(|scheme| url.scheme().eq_ignore_ascii_case(scheme)))
        .unwrap_or(false)
}

fn bool_js(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
    use canonical::ContentKind;

    use super::*;

    fn video_meta() -> DisplayMetadata {
        DisplayMetadata {
            title: "Tom & \"Jerry\" <live>".into(),
            description: "Video by O'Brien".into(),
            thumbnail_url: "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg".into(),
            canonical_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=1".into(),
            kind: ContentKind::Video,
            site_name: Some("YouTube".into()),
            embed_video_url: Some("https://www.youtube.com/embed/dQw4w9WgXcQ".into()),
        }
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#039;&amp;&#039;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn preview_contains_escaped_tags() {
        let html = render_preview(
            &video_meta(),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=1",
            &PlatformConfig::default(),
        );

        assert!(html.contains("<title>Tom &amp; &quot;Jerry&quot; &lt;live&gt;</title>"));
        assert!(html.contains(r#"<meta property="og:type" content="video.other" />"#));
        assert!(html.contains(r#"<meta property="og:description" content="Video by O&#039;Brien" />"#));
        assert!(html.contains(r#"<meta property="og:image:width" content="1280" />"#));
        assert!(html.contains(r#"<meta property="og:image:height" content="720" />"#));
        assert!(html.contains(r#"<meta property="og:video:url" content="https://www.youtube.com/embed/dQw4w9WgXcQ" />"#));
        assert!(html.contains(r#"<meta name="twitter:card" content="summary_large_image" />"#));
        assert!(html.contains(
            r#"<meta http-equiv="refresh" content="0; url=https://www.youtube.com/watch?v=dQw4w9WgXcQ&amp;t=1" />"#
        ));
        assert!(html.contains(
            r#"window.location.href = "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=1";"#
        ));
        assert!(!html.contains("<live>"));
    }

    #[test]
    fn preview_for_channel_is_website_without_video_tags() {
        let meta = DisplayMetadata {
            kind: ContentKind::Channel,
            embed_video_url: None,
            site_name: None,
            ..video_meta()
        };
        let html = render_preview(&meta, "https://www.youtube.com/@x", &PlatformConfig::default());

        assert!(html.contains(r#"<meta property="og:type" content="website" />"#));
        assert!(html.contains(r#"<meta property="og:site_name" content="YouTube" />"#));
        assert!(!html.contains("og:video"));
    }

    #[test]
    fn script_values_cannot_close_the_script_element() {
        let html = render_preview(
            &video_meta(),
            "https://x/</script><script>alert(1)</script>",
            &PlatformConfig::default(),
        );
        assert!(!html.contains("</script><script>alert"));
        assert!(html.contains(r#"</script>"#));
    }

    #[test]
    fn interstitial_params_require_web() {
        assert!(InterstitialParams::from_query(None, Some("intent://x".into()), None, None, "youtube").is_none());
        assert!(InterstitialParams::from_query(Some(String::new()), None, None, Some("ios"), "youtube").is_none());
    }

    #[test]
    fn interstitial_platform_defaults_to_android() {
        let params = InterstitialParams::from_query(
            Some("https://www.youtube.com/".into()),
            Some("intent://www.youtube.com/#Intent;end".into()),
            Some("youtube://www.youtube.com/".into()),
            Some("windows"),
            "youtube",
        )
        .expect("web present");
        assert_eq!(params.platform, Platform::Android);
        assert_eq!(params.app_url(), Some("intent://www.youtube.com/#Intent;end"));

        let ios = InterstitialParams::from_query(
            Some("https://www.youtube.com/".into()),
            None,
            Some("youtube://www.youtube.com/".into()),
            Some("ios"),
            "youtube",
        )
        .expect("web present");
        assert_eq!(ios.app_url(), Some("youtube://www.youtube.com/"));
    }

    #[test]
    fn interstitial_embeds_urls_and_delay() {
        let params = InterstitialParams::from_query(
            Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ&si=a".into()),
            None,
            Some("youtube://www.youtube.com/watch?v=dQw4w9WgXcQ&si=a".into()),
            Some("ios"),
            "youtube",
        )
        .expect("web present");
        let html = render_interstitial(
            &params,
            &InterstitialConfig::default(),
            &PlatformConfig::default(),
        );

        assert!(html.contains(r#"var appUrl = "youtube://www.youtube.com/watch?v=dQw4w9WgXcQ&si=a";"#));
        assert!(html.contains(r#"var webUrl = "https://www.youtube.com/watch?v=dQw4w9WgXcQ&si=a";"#));
        assert!(html.contains("var delay = 2000;"));
        assert!(html.contains("var autoOpen = true;"));
        assert!(html.contains(r#"href="https://www.youtube.com/watch?v=dQw4w9WgXcQ&amp;si=a""#));
        assert!(html.contains("Open in app"));
        assert!(html.contains("Open in browser"));
        assert!(!html.contains("__"));
    }

    #[test]
    fn interstitial_params_reject_foreign_schemes() {
        let web = || Some("https://www.youtube.com/".to_owned());

        assert!(InterstitialParams::from_query(
            Some("javascript:alert(1)".into()),
            None,
            None,
            None,
            "youtube",
        )
        .is_none());
        assert!(InterstitialParams::from_query(
            web(),
            Some("javascript:alert(1)//intent://x".into()),
            None,
            None,
            "youtube",
        )
        .is_none());
        assert!(InterstitialParams::from_query(
            web(),
            None,
            Some("data:text/html,hi".into()),
            Some("ios"),
            "youtube",
        )
        .is_none());
        assert!(InterstitialParams::from_query(
            web(),
            None,
            Some("YouTube://www.youtube.com/".into()),
            Some("ios"),
            "youtube",
        )
        .is_some());
    }

    #[test]
    fn interstitial_values_are_not_rescanned_for_placeholders() {
        let params = InterstitialParams::from_query(
            Some(r#"https://x/" onfocus="alert(1)"#.into()),
            Some("intent://x__WEB_JS__".into()),
            None,
            None,
            "youtube",
        )
        .expect("schemes allowed");
        let html = render_interstitial(
            &params,
            &InterstitialConfig::default(),
            &PlatformConfig::default(),
        );

        assert!(html.contains(
            r#"<a class="button" id="open-app" href="intent://x__WEB_JS__">Open in app</a>"#
        ));
        assert!(html.contains(
            r#"href="https://x/&quot; onfocus=&quot;alert(1)">Open in browser</a>"#
        ));
        assert!(!html.contains(r#"" onfocus=""#));
    }

    #[test]
    fn interstitial_without_app_url_falls_back_to_web() {
        let params = InterstitialParams::from_query(
            Some("https://www.youtube.com/".into()),
            None,
            None,
            None,
            "youtube",
        )
        .expect("web present");
        let cfg = InterstitialConfig {
            fallback_delay_ms: 500,
            auto_open: false,
            auto_fallback: false,
        };
        let html = render_interstitial(&params, &cfg, &PlatformConfig::default());

        assert!(html.contains("var appUrl = null;"));
        assert!(html.contains("var delay = 500;"));
        assert!(html.contains("var autoOpen = false;"));
        assert!(html.contains("var autoFallback = false;"));
    }
}
