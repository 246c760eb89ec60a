//! tubelink server - HTTP front end for the link router
//!
//! Every request path that is not one of the fixed endpoints is treated as a
//! link to rewrite:
//!
//! - crawlers get a preview page with Open Graph and Twitter card tags
//! - desktop browsers get a 302 to the web page
//! - phones get a 302 to the interstitial, which tries the native app first
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe with the active configuration
//! - `GET /redirect?web=&android=&ios=&platform=` - Mobile interstitial
//! - `GET /<link>` - Link routing
//!
//! # Configuration
//!
//! `server.{toml,yaml,json}` in the working directory (optional), overridden by
//! `TUBELINK_SERVER__*` environment variables, e.g.
//! `TUBELINK_SERVER__METADATA__TIMEOUT_SECS=3`. A `.env` file is read by the
//! binary on startup.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
