use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::MetadataError;

/// Which [`MetadataSource`](crate::MetadataSource) the resolver is built on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Structured oEmbed lookup for videos, placeholders for everything else.
    #[default]
    Oembed,
    /// Fetch the destination page and read its meta tags.
    Scrape,
}

/// Metadata lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MetadataConfig {
    pub strategy: Strategy,

    /// Upper bound for one lookup, connection included.
    pub timeout_secs: u64,

    /// oEmbed endpoint; `url` and `format=json` are appended.
    pub oembed_endpoint: String,

    /// `User-Agent` sent with outbound lookups.
    pub user_agent: String,

    /// Scraped pages are truncated to this many bytes. Meta tags live in
    /// `<head>`, so the tail of a large page is never needed.
    pub max_body_bytes: usize,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            timeout_secs: 5,
            oembed_endpoint: "https://www.youtube.com/oembed".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl MetadataConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), MetadataError> {
        if self.timeout_secs == 0 {
            return Err(MetadataError::InvalidConfig(
                "timeout_secs must be >= 1".into(),
            ));
        }
        if self.max_body_bytes == 0 {
            return Err(MetadataError::InvalidConfig(
                "max_body_bytes must be >= 1".into(),
            ));
        }
        parse_endpoint(&self.oembed_endpoint)?;
        Ok(())
    }
}

pub(crate) fn parse_endpoint(endpoint: &str) -> Result<Url, MetadataError> {
    let url = Url::parse(endpoint).map_err(|err| {
        MetadataError::InvalidConfig(format!("oembed_endpoint {endpoint:?}: {err}"))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(MetadataError::InvalidConfig(format!(
            "oembed_endpoint {endpoint:?} must be http or https"
        )));
    }
    Ok(url)
}
