//! Platform constants used by the parser and the destination builders.
//!
//! [`PlatformConfig`] names the hosts a link may arrive on and the identifiers
//! of the native apps it is handed to. The defaults describe YouTube; every
//! field can be overridden from the server configuration, but the URL shapes
//! themselves (`/watch`, `/shorts/...`, `/playlist`) are fixed.
//!
//! # Examples
//!
//! ```rust
//! use canonical::PlatformConfig;
//!
//! let config = PlatformConfig::default();
//! assert_eq!(config.web_host, "www.youtube.com");
//! assert_eq!(config.home_url(), "https://www.youtube.com");
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Hosts, app identifiers, and fallback assets of the target platform.
///
/// Serialized form (all fields optional, defaults shown):
///
/// ```json
/// {
///   "name": "YouTube",
///   "web_host": "www.youtube.com",
///   "short_host": "youtu.be",
///   "app_scheme": "youtube",
///   "android_package": "com.google.android.youtube",
///   "thumbnail_host": "img.youtube.com",
///   "default_image": "https://www.youtube.com/img/desktop/yt_1200.png"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PlatformConfig {
    /// Display name, used as `og:site_name` and in placeholder titles.
    pub name: String,

    /// Canonical web host. Destination URLs are built on `https://<web_host>`.
    ///
    /// The bare form (without a leading `www.`) is also recognized as an input
    /// host prefix by the parser.
    pub web_host: String,

    /// Short-link host (`youtu.be/<id>`).
    pub short_host: String,

    /// URL scheme registered by the iOS app. The iOS destination is
    /// `<app_scheme>://<web_host>/...`.
    pub app_scheme: String,

    /// Android application id targeted by the intent URL.
    pub android_package: String,

    /// Host serving per-video thumbnails (`/vi/<id>/hqdefault.jpg`).
    pub thumbnail_host: String,

    /// Image used in previews when no per-content thumbnail is known.
    pub default_image: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            name: "YouTube".to_string(),
            web_host: "www.youtube.com".to_string(),
            short_host: "youtu.be".to_string(),
            app_scheme: "youtube".to_string(),
            android_package: "com.google.android.youtube".to_string(),
            thumbnail_host: "img.youtube.com".to_string(),
            default_image: "https://www.youtube.com/img/desktop/yt_1200.png".to_string(),
        }
    }
}

impl PlatformConfig {
    /// Check that every field can be spliced into a URL.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        for (field, value) in [
            ("name", &self.name),
            ("web_host", &self.web_host),
            ("short_host", &self.short_host),
            ("thumbnail_host", &self.thumbnail_host),
            ("default_image", &self.default_image),
        ] {
            if value.trim().is_empty() {
                return Err(CanonicalError::InvalidConfig(format!(
                    "{field} must not be empty"
                )));
            }
        }

        for (field, host) in [
            ("web_host", &self.web_host),
            ("short_host", &self.short_host),
            ("thumbnail_host", &self.thumbnail_host),
        ] {
            if host.contains(['/', '?', '#', ' ']) {
                return Err(CanonicalError::InvalidConfig(format!(
                    "{field} must be a bare host, got {host:?}"
                )));
            }
        }

        // RFC 3986: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
        let mut scheme = self.app_scheme.chars();
        let valid_scheme = scheme.next().is_some_and(|c| c.is_ascii_alphabetic())
            && scheme.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if !valid_scheme {
            return Err(CanonicalError::InvalidConfig(format!(
                "app_scheme {:?} is not a valid URI scheme",
                self.app_scheme
            )));
        }

        if self.android_package.trim().is_empty() || self.android_package.contains([';', '#']) {
            return Err(CanonicalError::InvalidConfig(format!(
                "android_package {:?} is not a valid application id",
                self.android_package
            )));
        }

        Ok(())
    }

    /// Landing page used for empty links and every unrecoverable failure.
    pub fn home_url(&self) -> String {
        format!("https://{}", self.web_host)
    }

    /// Web host without a leading `www.`, as it appears in pasted links.
    pub fn bare_web_host(&self) -> &str {
        let host = self.web_host.as_str();
        match host.get(..4) {
            Some(prefix) if prefix.eq_ignore_ascii_case("www.") => &host[4..],
            _ => host,
        }
    }

    /// High-quality thumbnail for a video-like id.
    pub fn thumbnail_for(&self, video_id: &str) -> String {
        format!("https://{}/vi/{}/hqdefault.jpg", self.thumbnail_host, video_id)
    }
}
