//! Workspace umbrella crate for tubelink.
//!
//! tubelink answers links of the form `https://<our-host>/<anything-that-points-at-a-video>`.
//! Crawlers building link cards get a preview page, desktop browsers get a
//! redirect to the web page, and phones land on an interstitial that tries
//! the native app before falling back to the web.
//!
//! The pieces live in their own crates and are re-exported here:
//!
//! - [`canonical`]: raw path to [`CanonicalReference`] to [`DestinationSet`]
//! - [`agent`]: `User-Agent` to [`ClientProfile`]
//! - [`metadata`]: web URL to [`DisplayMetadata`], never failing
//!
//! [`LinkRouter`] ties them together and [`render`] holds the HTML.
//!
//! ```no_run
//! use tubelink::{LinkRouter, MetadataConfig, PlatformConfig, Resolver, RouteRequest, RouterOptions};
//!
//! # async fn demo() -> Result<(), tubelink::MetadataError> {
//! let platform = PlatformConfig::default();
//! let resolver = Resolver::from_config(&MetadataConfig::default(), &platform)?;
//! let router = LinkRouter::new(platform, resolver, RouterOptions::default());
//!
//! let outcome = router
//!     .route(&RouteRequest {
//!         raw: "/https:/youtu.be/dQw4w9WgXcQ",
//!         user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64)",
//!         origin: Some("https://link.example"),
//!     })
//!     .await;
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```

mod error;
pub mod render;
mod router;

pub use agent::{ClientProfile, Platform, classify, detect_platform, is_crawler};
pub use canonical::{
    CanonicalError, CanonicalReference, ContentKind, DestinationSet, PlatformConfig,
    android_intent_url, ios_url, parse, parse_with, web_url,
};
pub use metadata::{
    DisplayMetadata, MetadataConfig, MetadataError, MetadataSource, Resolver, Strategy, fallback,
};

pub use crate::error::RouteError;
pub use crate::render::{InterstitialConfig, InterstitialParams, escape_html};
pub use crate::router::{LinkRouter, RouteOutcome, RouteRequest, RouterOptions};
