use async_trait::async_trait;
use canonical::PlatformConfig;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::classify::classify_url;
use crate::config::parse_endpoint;
use crate::error::MetadataError;
use crate::fallback::{default_thumbnail, placeholder};
use crate::source::MetadataSource;
use crate::types::DisplayMetadata;

/// Structured lookup through the platform's oEmbed endpoint.
///
/// Only video-like content with a known id is looked up; playlists, channels,
/// and unknown pages get a per-kind placeholder without any network call.
#[derive(Debug, Clone)]
pub struct OEmbedSource {
    client: reqwest::Client,
    endpoint: Url,
    platform: PlatformConfig,
}

/// Subset of the oEmbed response we use.
#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: Option<String>,
    author_name: Option<String>,
    thumbnail_url: Option<String>,
    provider_name: Option<String>,
}

impl OEmbedSource {
    pub fn new(
        client: reqwest::Client,
        endpoint: &str,
        platform: PlatformConfig,
    ) -> Result<Self, MetadataError> {
        Ok(Self {
            client,
            endpoint: parse_endpoint(endpoint)?,
            platform,
        })
    }

    fn lookup_url(&self, web_url: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("url", web_url)
            .append_pair("format", "json");
        url
    }
}

#[async_trait]
impl MetadataSource for OEmbedSource {
    fn name(&self) -> &'static str {
        "oembed"
    }

    async fn fetch(&self, web_url: &str) -> Result<DisplayMetadata, MetadataError> {
        let content = classify_url(web_url, &self.platform);
        let id = match content.id.as_deref() {
            Some(id) if content.kind.is_video_like() => id,
            _ => {
                return Ok(placeholder(
                    content.kind,
                    content.id.as_deref(),
                    web_url,
                    &self.platform,
                ))
            }
        };

        let lookup = self.lookup_url(web_url);
        debug!(lookup = %lookup, kind = %content.kind, "oembed_lookup");

        let response = self.client.get(lookup).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::Status {
                status: status.as_u16(),
                url: web_url.to_string(),
            });
        }
        let body: OEmbedResponse = response.json().await?;

        let name = &self.platform.name;
        Ok(DisplayMetadata {
            title: non_empty(body.title).unwrap_or_else(|| format!("{name} video")),
            description: non_empty(body.author_name)
                .map(|author| format!("Video by {author}"))
                .unwrap_or_else(|| format!("Watch on {name}")),
            thumbnail_url: non_empty(body.thumbnail_url)
                .unwrap_or_else(|| default_thumbnail(content.kind, Some(id), &self.platform)),
            canonical_url: web_url.to_string(),
            kind: content.kind,
            site_name: Some(non_empty(body.provider_name).unwrap_or_else(|| name.clone())),
            embed_video_url: Some(format!("https://{}/embed/{id}", self.platform.web_host)),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
