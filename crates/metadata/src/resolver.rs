use std::sync::Arc;
use std::time::{Duration, Instant};

use canonical::PlatformConfig;
use tracing::{info, warn};

use crate::config::{MetadataConfig, Strategy};
use crate::error::MetadataError;
use crate::fallback::fallback;
use crate::oembed::OEmbedSource;
use crate::scrape::ScrapeSource;
use crate::source::{http_client, MetadataSource};
use crate::types::DisplayMetadata;

/// Timeout-bounded, infallible front for a [`MetadataSource`].
///
/// Cheap to clone; the source is shared behind an `Arc` and holds no
/// per-request state.
#[derive(Clone)]
pub struct Resolver {
    source: Arc<dyn MetadataSource>,
    timeout: Duration,
    platform: PlatformConfig,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("source", &self.source.name())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Resolver {
    pub fn new(source: Arc<dyn MetadataSource>, timeout: Duration, platform: PlatformConfig) -> Self {
        Self {
            source,
            timeout,
            platform,
        }
    }

    /// Build the configured strategy on a fresh HTTP client.
    pub fn from_config(
        cfg: &MetadataConfig,
        platform: &PlatformConfig,
    ) -> Result<Self, MetadataError> {
        cfg.validate()?;
        let client = http_client(cfg)?;
        let source: Arc<dyn MetadataSource> = match cfg.strategy {
            Strategy::Oembed => Arc::new(OEmbedSource::new(
                client,
                &cfg.oembed_endpoint,
                platform.clone(),
            )?),
            Strategy::Scrape => Arc::new(
                ScrapeSource::new(client, platform.clone())
                    .with_max_body_bytes(cfg.max_body_bytes),
            ),
        };
        Ok(Self::new(source, cfg.timeout(), platform.clone()))
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve preview metadata for `web_url`. Errors, non-success statuses,
    /// and timeouts all yield [`fallback`]. No retries.
    ///
    /// A panicking source is not caught here; it unwinds to the caller, which
    /// for link routing is `LinkRouter::route`.
    pub async fn resolve(&self, web_url: &str) -> DisplayMetadata {
        let start = Instant::now();
        let outcome = match tokio::time::timeout(self.timeout, self.source.fetch(web_url)).await {
            Ok(result) => result,
            Err(_) => Err(MetadataError::Timeout(self.timeout)),
        };
        let elapsed_ms = start.elapsed().as_millis();

        match outcome {
            Ok(metadata) => {
                info!(
                    source = self.source.name(),
                    kind = %metadata.kind,
                    url = %web_url,
                    elapsed_ms,
                    "metadata_resolved"
                );
                metadata
            }
            Err(err) => {
                warn!(
                    source = self.source.name(),
                    url = %web_url,
                    error = %err,
                    elapsed_ms,
                    "metadata_fallback"
                );
                fallback(web_url, &self.platform)
            }
        }
    }
}
