use canonical::ContentKind;
use serde::{Deserialize, Serialize};

/// Everything a preview page needs to show a link card.
///
/// Produced fresh for every crawler request and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMetadata {
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub canonical_url: String,
    pub kind: ContentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_video_url: Option<String>,
}
