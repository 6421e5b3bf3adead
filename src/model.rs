use serde::{Deserialize, Serialize};

/// Maximum number of media items composed into a card.
pub const MAX_MEDIA: usize = 4;

/// Normalized social-media post used as render input.
///
/// Records are produced by a [`PostSource`](crate::PostSource) (or deserialized from JSON) and
/// are only ever borrowed by the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub source_url: String,
    pub author_display_name: String,
    /// Canonical handle, including the leading `@`.
    pub author_handle: String,
    #[serde(default)]
    pub author_avatar_url: Option<String>,
    #[serde(default)]
    pub body_text: String,
    /// `"Dow Mon DD HH:MM:SS +0000 YYYY"`.
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub repost_count: u64,
    #[serde(default)]
    pub reply_count: u64,
    #[serde(default)]
    pub view_count: Option<u64>,
}

impl PostRecord {
    /// Image URLs that take part in composition, in input order.
    pub fn media_urls(&self) -> &[String] {
        &self.images[..self.images.len().min(MAX_MEDIA)]
    }
}

/// Convert `\r\n` and lone `\r` line breaks into `\n`.
pub fn normalize_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
