use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    assets::fetch::USER_AGENT,
    foundation::error::{PostframeError, PostframeResult},
    model::PostRecord,
    source::{PostSource, clean_text, extract_status_id},
};

pub const DEFAULT_API_BASE: &str = "https://api.fxtwitter.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// [`PostSource`] backed by the public FixTweet (`api.fxtwitter.com`) JSON API.
#[derive(Clone, Debug)]
pub struct FxTwitterSource {
    client: reqwest::Client,
    api_base: String,
}

impl FxTwitterSource {
    pub fn new() -> PostframeResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| PostframeError::resolution(format!("build http client: {e}")))?;
        Ok(Self::with_client(client, DEFAULT_API_BASE))
    }

    pub fn with_client(client: reqwest::Client, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self { client, api_base }
    }

    pub fn with_api_base(self, api_base: impl Into<String>) -> Self {
        Self::with_client(self.client, api_base)
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

#[async_trait]
impl PostSource for FxTwitterSource {
    #[tracing::instrument(skip(self))]
    async fn resolve(&self, url: &str) -> PostframeResult<PostRecord> {
        let id = extract_status_id(url)
            .ok_or_else(|| PostframeError::resolution(format!("no status id in {url:?}")))?;
        let api_url = format!("{}/status/{id}", self.api_base);
        tracing::debug!(%api_url, "requesting post");

        let response = self
            .client
            .get(&api_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| PostframeError::resolution(format!("GET {api_url}: {e}")))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(PostframeError::resolution(format!(
                "GET {api_url}: status {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PostframeError::resolution(format!("read body of {api_url}: {e}")))?;
        let record = parse_fx_response(&body, url)?;
        tracing::info!(
            author = %record.author_handle,
            likes = record.like_count,
            images = record.images.len(),
            "post resolved"
        );
        Ok(record)
    }
}

#[derive(Debug, Deserialize)]
struct FxResponse {
    code: Option<i64>,
    message: Option<String>,
    tweet: Option<FxTweet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FxTweet {
    url: Option<String>,
    text: Option<String>,
    created_at: Option<String>,
    likes: Option<u64>,
    retweets: Option<u64>,
    replies: Option<u64>,
    views: Option<u64>,
    author: Option<FxAuthor>,
    media: Option<FxMedia>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FxAuthor {
    name: Option<String>,
    screen_name: Option<String>,
    avatar_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FxMedia {
    photos: Vec<FxPhoto>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FxPhoto {
    url: Option<String>,
}

/// Map a FixTweet response body onto a [`PostRecord`]. Videos are ignored.
pub fn parse_fx_response(body: &str, original_url: &str) -> PostframeResult<PostRecord> {
    let data: FxResponse = serde_json::from_str(body)
        .map_err(|e| PostframeError::resolution(format!("malformed api response: {e}")))?;

    if data.code != Some(200) || data.message.as_deref() != Some("OK") {
        return Err(PostframeError::resolution(format!(
            "api error: code={:?} message={:?}",
            data.code, data.message
        )));
    }
    let tweet = data
        .tweet
        .ok_or_else(|| PostframeError::resolution("api response has no tweet"))?;

    let author = tweet.author.unwrap_or_default();
    let images = tweet
        .media
        .unwrap_or_default()
        .photos
        .into_iter()
        .filter_map(|p| p.url.filter(|u| !u.is_empty()))
        .collect();

    Ok(PostRecord {
        source_url: tweet.url.unwrap_or_else(|| original_url.to_string()),
        author_display_name: author.name.unwrap_or_else(|| "Unknown".to_string()),
        author_handle: format!(
            "@{}",
            author.screen_name.as_deref().unwrap_or("unknown")
        ),
        author_avatar_url: author.avatar_url,
        body_text: clean_text(tweet.text.as_deref().unwrap_or_default()),
        created_at: tweet.created_at.unwrap_or_default(),
        images,
        like_count: tweet.likes.unwrap_or(0),
        repost_count: tweet.retweets.unwrap_or(0),
        reply_count: tweet.replies.unwrap_or(0),
        view_count: tweet.views,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/source/fxtwitter.rs"]
mod tests;
