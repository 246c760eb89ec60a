use std::net::SocketAddr;
use std::time::Duration;

use canonical::PlatformConfig;
use config::builder::DefaultState;
use config::ConfigBuilder;
use metadata::MetadataConfig;
use serde::{Deserialize, Serialize};
use tubelink::{InterstitialConfig, RouterOptions};

use crate::error::{ServerError, ServerResult};

/// Paths the router mounts itself; the interstitial may not shadow them.
const RESERVED_PATHS: &[&str] = &["/health", "/ready"];

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Log filter directive, e.g. `info` or `server=debug,metadata=debug`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Externally visible `scheme://host[:port]`. When unset, the origin is
    /// taken from `X-Forwarded-Proto` and `Host`.
    #[serde(default)]
    pub public_base_url: Option<String>,

    /// Cache lifetime and interstitial path
    #[serde(default)]
    pub router: RouterOptions,

    /// Destination platform hosts, scheme, and package
    #[serde(default)]
    pub platform: PlatformConfig,

    /// Preview metadata lookups
    #[serde(default)]
    pub metadata: MetadataConfig,

    /// Mobile interstitial behaviour
    #[serde(default)]
    pub interstitial: InterstitialConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            log_level: default_log_level(),
            public_base_url: None,
            router: RouterOptions::default(),
            platform: PlatformConfig::default(),
            metadata: MetadataConfig::default(),
            interstitial: InterstitialConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `server.{toml,yaml,json}` (optional) and
    /// `TUBELINK_SERVER__*` environment variables, then validate it.
    pub fn load() -> ServerResult<Self> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("server").required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("TUBELINK_SERVER").separator("__"));

        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> ServerResult<Self> {
        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot start with.
    pub fn validate(&self) -> ServerResult<()> {
        self.platform.validate()?;
        self.metadata.validate()?;
        self.socket_addr()?;

        if let Some(base) = self.public_base_url.as_deref() {
            let parsed = url::Url::parse(base)
                .map_err(|err| ServerError::Config(format!("public_base_url {base:?}: {err}")))?;
            if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
                return Err(ServerError::Config(format!(
                    "public_base_url {base:?} must be an http(s) origin"
                )));
            }
        }

        let path = &self.router.interstitial_path;
        if !path.starts_with('/') || path.len() < 2 || path.contains(['?', '#']) {
            return Err(ServerError::Config(format!(
                "router.interstitial_path {path:?} must be an absolute path without query"
            )));
        }
        if RESERVED_PATHS.contains(&path.as_str()) {
            return Err(ServerError::Config(format!(
                "router.interstitial_path {path:?} collides with a built-in route"
            )));
        }

        tracing_subscriber::EnvFilter::try_new(&self.log_level)
            .map_err(|err| ServerError::Config(format!("log_level {:?}: {err}", self.log_level)))?;

        Ok(())
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> ServerResult<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}
