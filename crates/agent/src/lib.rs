//! tubelink client classification.
//!
//! Reads one `User-Agent` string and answers two questions: is this an
//! automated link-preview crawler, and if not, which platform family is the
//! human on. The answer is a [`ClientProfile`], computed per request and never
//! stored.
//!
//! Matching is case-insensitive substring search over fixed marker lists
//! ([`CRAWLER_MARKERS`], [`IN_APP_MARKERS`], [`SCRAPER_OVERRIDES`]). The
//! marker predicates are exported so the precedence can be tested link by
//! link; they expect an ASCII-lowercased string.
//!
//! ```rust
//! use agent::{classify, Platform};
//!
//! let bot = classify("facebookexternalhit/1.1 (+http://www.facebook.com/externalhit_uatext.php)");
//! assert!(bot.is_crawler);
//!
//! let kakao_user = classify("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) KAKAOTALK/10.4.3");
//! assert!(!kakao_user.is_crawler);
//! assert_eq!(kakao_user.platform, Platform::Ios);
//! ```

mod crawler;
mod profile;

use tracing::debug;

pub use crate::crawler::{
    crawler_marker, in_app_marker, scraper_override, CRAWLER_MARKERS, IN_APP_MARKERS,
    SCRAPER_OVERRIDES,
};
pub use crate::profile::{ClientProfile, Platform};

/// Classify a caller from its `User-Agent`. An empty header is a desktop human.
pub fn classify(user_agent: &str) -> ClientProfile {
    let lowered = user_agent.to_ascii_lowercase();
    let decision = crawler::decide(&lowered);
    let platform = profile::platform_of(&lowered);

    debug!(
        user_agent = %truncate(user_agent, 100),
        ?decision,
        %platform,
        "client_classified"
    );

    ClientProfile {
        is_crawler: decision.is_crawler(),
        platform,
    }
}

/// Platform family only.
pub fn detect_platform(user_agent: &str) -> Platform {
    profile::platform_of(&user_agent.to_ascii_lowercase())
}

/// Crawler decision only.
pub fn is_crawler(user_agent: &str) -> bool {
    crawler::decide(&user_agent.to_ascii_lowercase()).is_crawler()
}

fn truncate(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
