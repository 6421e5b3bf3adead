use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;

use crate::foundation::error::{PostframeError, PostframeResult};

/// Browser-like user agent; some media CDNs reject unknown clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Remote bytes provider used for avatars and post images.
///
/// Implementations must return within roughly `timeout`; every error is treated by the engine
/// as "no image".
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> PostframeResult<Vec<u8>>;
}

/// [`MediaFetcher`] backed by a shared `reqwest` client.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> PostframeResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| PostframeError::fetch(format!("build http client: {e}")))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

/// [`MediaFetcher`] serving bytes from memory; unknown URLs fail.
///
/// Useful for offline renders and deterministic tests.
#[derive(Clone, Debug, Default)]
pub struct InMemoryFetcher {
    entries: HashMap<String, Vec<u8>>,
}

impl InMemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(url, bytes);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(url.into(), bytes);
    }
}

#[async_trait]
impl MediaFetcher for InMemoryFetcher {
    async fn fetch(&self, url: &str, _timeout: Duration) -> PostframeResult<Vec<u8>> {
        self.entries
            .get(url)
            .cloned()
            .ok_or_else(|| PostframeError::fetch(format!("no in-memory entry for {url}")))
    }
}

#[async_trait]
impl MediaFetcher for HttpFetcher {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn fetch(&self, url: &str, timeout: Duration) -> PostframeResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| PostframeError::fetch(format!("GET {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PostframeError::fetch(format!("GET {url}: status {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PostframeError::fetch(format!("read body of {url}: {e}")))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
