//! tubelink canonical link layer.
//!
//! Turns whatever a user pasted after our host (`/https:/youtu.be/...`,
//! `/watch?v=...`, `/@handle`, a bare id) into a typed [`CanonicalReference`],
//! and turns that reference into the three destinations we can send a client
//! to: the web page, the iOS app scheme, and an Android intent.
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock, no global state. The same input and
//! [`PlatformConfig`] always produce the same reference and the same URLs,
//! byte for byte.
//!
//! ## Invariants worth knowing
//!
//! - [`parse`] never fails; unrecognized input degrades to
//!   [`CanonicalReference::Opaque`]
//! - Queries are stored without a leading `?`, empty means absent
//! - Builders never emit `??`, `?&`, or a dangling separator
//! - Already-encoded query values are copied, never re-encoded
//!
//! ```rust
//! use canonical::{parse, web_url, CanonicalReference, PlatformConfig};
//!
//! let reference = parse("https:/youtu.be/dQw4w9WgXcQ?si=share");
//! assert!(matches!(reference, CanonicalReference::Video { .. }));
//! assert_eq!(
//!     web_url(&reference, &PlatformConfig::default()),
//!     "https://www.youtube.com/watch?v=dQw4w9WgXcQ&si=share"
//! );
//! ```

mod config;
mod destination;
mod error;
mod parse;
mod reference;

pub use crate::config::PlatformConfig;
pub use crate::destination::{android_intent_url, ios_url, web_url, DestinationSet};
pub use crate::error::CanonicalError;
pub use crate::parse::{parse, parse_with};
pub use crate::reference::{CanonicalReference, ContentKind};
