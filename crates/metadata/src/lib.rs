//! tubelink preview metadata.
//!
//! Crawlers rendering a link card get a title, description, and thumbnail
//! for the destination. This crate finds them, and is built around one rule:
//! a lookup must never fail the request.
//!
//! ## Sources
//!
//! - [`OEmbedSource`]: the platform's structured oEmbed endpoint, video-like
//!   content only; other kinds get a placeholder without a network call
//! - [`ScrapeSource`]: fetch the page and read its meta tags
//! - [`mock::MockSource`]: scripted behaviour for tests
//!
//! ## Resolver
//!
//! [`Resolver`] wraps a source in a timeout and converts every failure
//! (transport, status, timeout, missing tags) into [`fallback`], a fixed
//! per-kind record whose thumbnail is derived from the content id when the
//! URL exposes one. Nothing is cached and nothing is retried.
//!
//! Content kind is re-derived from the final web URL by [`classify_url`], not
//! taken from the canonical parser.

mod classify;
mod config;
mod error;
mod fallback;
mod html;
pub mod mock;
mod oembed;
mod resolver;
mod scrape;
mod source;
mod types;

pub use crate::classify::{classify_url, UrlContent};
pub use crate::config::{MetadataConfig, Strategy};
pub use crate::error::MetadataError;
pub use crate::fallback::{fallback, placeholder};
pub use crate::oembed::OEmbedSource;
pub use crate::resolver::Resolver;
pub use crate::scrape::{metadata_from_html, ScrapeSource};
pub use crate::source::{http_client, MetadataSource};
pub use crate::types::DisplayMetadata;
