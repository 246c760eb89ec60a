use async_trait::async_trait;

use crate::config::MetadataConfig;
use crate::error::MetadataError;
use crate::types::DisplayMetadata;

/// One way of turning a web URL into [`DisplayMetadata`].
///
/// Implementations may fail; [`Resolver`](crate::Resolver) bounds them with a
/// timeout and substitutes a fallback record.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn fetch(&self, web_url: &str) -> Result<DisplayMetadata, MetadataError>;
}

/// Outbound HTTP client shared by the built-in sources.
pub fn http_client(cfg: &MetadataConfig) -> Result<reqwest::Client, MetadataError> {
    let client = reqwest::Client::builder()
        .user_agent(cfg.user_agent.as_str())
        .timeout(cfg.timeout())
        .build()?;
    Ok(client)
}
