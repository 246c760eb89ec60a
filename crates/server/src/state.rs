use std::sync::Arc;

use metadata::Resolver;
use tubelink::LinkRouter;

use crate::config::ServerConfig;
use crate::error::ServerResult;

/// Shared application state
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Link router (shared across requests, immutable)
    pub router: Arc<LinkRouter>,
}

impl ServerState {
    /// Create new server state with the configured metadata strategy.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        config.validate()?;
        let resolver = Resolver::from_config(&config.metadata, &config.platform)?;
        let router = LinkRouter::new(config.platform.clone(), resolver, config.router.clone());
        Ok(Self::with_router(config, router))
    }

    /// Use a prebuilt router, e.g. one backed by a mock metadata source.
    pub fn with_router(config: ServerConfig, router: LinkRouter) -> Self {
        Self {
            config: Arc::new(config),
            router: Arc::new(router),
        }
    }
}
