use async_trait::async_trait;
use canonical::PlatformConfig;
use tracing::debug;

use crate::classify::classify_url;
use crate::error::MetadataError;
use crate::fallback::{default_thumbnail, placeholder};
use crate::html::{link_href, meta_content, title_element};
use crate::source::MetadataSource;
use crate::types::DisplayMetadata;

const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Reads preview fields straight from the destination page's markup.
#[derive(Debug, Clone)]
pub struct ScrapeSource {
    client: reqwest::Client,
    platform: PlatformConfig,
    max_body_bytes: usize,
}

impl ScrapeSource {
    pub fn new(client: reqwest::Client, platform: PlatformConfig) -> Self {
        Self {
            client,
            platform,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes.max(1);
        self
    }
}

#[async_trait]
impl MetadataSource for ScrapeSource {
    fn name(&self) -> &'static str {
        "scrape"
    }

    async fn fetch(&self, web_url: &str) -> Result<DisplayMetadata, MetadataError> {
        let mut response = self
            .client
            .get(web_url)
            .header(reqwest::header::ACCEPT, "text/html")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::Status {
                status: status.as_u16(),
                url: web_url.to_string(),
            });
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            let room = self.max_body_bytes.saturating_sub(body.len());
            body.extend_from_slice(&chunk[..chunk.len().min(room)]);
            if body.len() >= self.max_body_bytes {
                break;
            }
        }
        let html = String::from_utf8_lossy(&body);
        debug!(bytes = body.len(), url = %web_url, "scrape_page_read");

        metadata_from_html(&html, web_url, &self.platform).ok_or_else(|| {
            MetadataError::Parse(format!("no title markers in page at {web_url}"))
        })
    }
}

/// Extract preview fields from page markup.
///
/// Per field, first hit wins:
///
/// | Field       | Platform tag                  | Social card        | Last resort            |
/// |-------------|-------------------------------|--------------------|------------------------|
/// | title       | `meta name=title`             | `og:title`         | `<title>`              |
/// | description | `meta name=description`       | `og:description`   | per-kind placeholder   |
/// | image       | `link itemprop=thumbnailUrl`  | `og:image`         | id thumbnail / default |
/// | canonical   | `link rel=canonical`          | `og:url`           | `web_url`              |
/// | site name   |                               | `og:site_name`     | platform name          |
/// | embed video | `link itemprop=embedUrl`      | `og:video:url`     | none                   |
///
/// Returns `None` when no title can be found at all, which marks the page as
/// something other than a content page (an error or consent interstitial).
pub fn metadata_from_html(
    html: &str,
    web_url: &str,
    platform: &PlatformConfig,
) -> Option<DisplayMetadata> {
    let content = classify_url(web_url, platform);
    let defaults = placeholder(content.kind, content.id.as_deref(), web_url, platform);

    let title = meta_content(html, "name", "title")
        .or_else(|| meta_content(html, "property", "og:title"))
        .or_else(|| title_element(html))?;

    let description = meta_content(html, "name", "description")
        .or_else(|| meta_content(html, "property", "og:description"))
        .unwrap_or(defaults.description);

    let thumbnail_url = link_href(html, "itemprop", "thumbnailUrl")
        .or_else(|| meta_content(html, "property", "og:image"))
        .unwrap_or_else(|| default_thumbnail(content.kind, content.id.as_deref(), platform));

    let canonical_url = link_href(html, "rel", "canonical")
        .or_else(|| meta_content(html, "property", "og:url"))
        .unwrap_or_else(|| web_url.to_string());

    let site_name =
        meta_content(html, "property", "og:site_name").or_else(|| Some(platform.name.clone()));

    let embed_video_url = link_href(html, "itemprop", "embedUrl")
        .or_else(|| meta_content(html, "property", "og:video:url"));

    Some(DisplayMetadata {
        title,
        description,
        thumbnail_url,
        canonical_url,
        kind: content.kind,
        site_name,
        embed_video_url,
    })
}
