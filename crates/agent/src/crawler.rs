//! Crawler detection as a prioritized predicate chain.
//!
//! ```text
//! in-app marker? ──no──────────────────────────┐
//!      │ yes                                   ▼
//!      ▼                               denylist marker? ── yes → crawler
//! scraper override? ──yes──────────────────────┘    │
//!      │ no                                          no → not a crawler
//!      ▼
//! not a crawler
//! ```
//!
//! Some messengers ship both an in-app browser and a link-preview scraper
//! whose `User-Agent` strings share a substring (`kakaotalk` for Kakao). The
//! scraper-specific marker wins over the in-app allowlist.

/// Link-preview fetchers and search crawlers. Matched as lowercase substrings.
pub const CRAWLER_MARKERS: &[&str] = &[
    "kakaotalk-scrap",
    "kakao",
    "facebookexternalhit",
    "facebot",
    "twitterbot",
    "linkedinbot",
    "telegrambot",
    "slackbot",
    "discordbot",
    "whatsapp",
    "applebot",
    "googlebot",
    "bingbot",
    "yandexbot",
    "baiduspider",
    "daumoa",
    "yeti",
    "naverbot",
    "pinterestbot",
    "pinterest/",
    "snapchat",
    "linebot",
    "line-poker",
];

/// In-app browsers driven by a human. These are never treated as crawlers
/// unless a [`SCRAPER_OVERRIDES`] marker is also present.
pub const IN_APP_MARKERS: &[&str] = &["kakaotalk/", "inapp", "fban", "fbav", "instagram"];

/// Scrapers that share a substring with an in-app browser of the same vendor.
pub const SCRAPER_OVERRIDES: &[&str] = &["kakaotalk-scrap"];

/// First in-app browser marker found in `lowered`.
pub fn in_app_marker(lowered: &str) -> Option<&'static str> {
    first_match(lowered, IN_APP_MARKERS)
}

/// First scraper-override marker found in `lowered`.
pub fn scraper_override(lowered: &str) -> Option<&'static str> {
    first_match(lowered, SCRAPER_OVERRIDES)
}

/// First crawler marker found in `lowered`.
pub fn crawler_marker(lowered: &str) -> Option<&'static str> {
    first_match(lowered, CRAWLER_MARKERS)
}

/// Walk the chain and report which marker decided.
pub(crate) fn decide(lowered: &str) -> Decision {
    if let Some(in_app) = in_app_marker(lowered) {
        if scraper_override(lowered).is_none() {
            return Decision::InApp(in_app);
        }
    }

    match crawler_marker(lowered) {
        Some(marker) => Decision::Crawler(marker),
        None => Decision::Human,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    InApp(&'static str),
    Crawler(&'static str),
    Human,
}

impl Decision {
    pub(crate) fn is_crawler(self) -> bool {
        matches!(self, Decision::Crawler(_))
    }
}

fn first_match(lowered: &str, markers: &[&'static str]) -> Option<&'static str> {
    markers
        .iter()
        .copied()
        .find(|marker| lowered.contains(marker))
}
