//! Resolution of post URLs into [`PostRecord`]s.

pub(crate) mod fxtwitter;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{foundation::error::PostframeResult, model::PostRecord};

pub use fxtwitter::{DEFAULT_API_BASE, FxTwitterSource, parse_fx_response};

static STATUS_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/status/(\d+)").expect("valid status id regex"));

/// Something that can turn a post URL into a normalized record.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn resolve(&self, url: &str) -> PostframeResult<PostRecord>;
}

/// Numeric status id from a `.../status/<digits>` URL.
pub fn extract_status_id(url: &str) -> Option<&str> {
    STATUS_ID_RE
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Collapse whitespace runs inside each line while keeping the line structure.
pub fn clean_text(text: &str) -> String {
    crate::model::normalize_line_breaks(text)
        .split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}
