use std::fmt;

use serde::{Deserialize, Serialize};

/// Platform family of the caller, as far as its `User-Agent` tells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    Desktop,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
            Platform::Desktop => "desktop",
        }
    }

    pub fn is_mobile(self) -> bool {
        !matches!(self, Platform::Desktop)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the router needs to know about who is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub is_crawler: bool,
    pub platform: Platform,
}

/// `iphone|ipad|ipod` → iOS, `android` → Android, anything else → desktop.
///
/// `lowered` must already be ASCII-lowercased.
pub(crate) fn platform_of(lowered: &str) -> Platform {
    if ["iphone", "ipad", "ipod"]
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        Platform::Ios
    } else if lowered.contains("android") {
        Platform::Android
    } else {
        Platform::Desktop
    }
}
