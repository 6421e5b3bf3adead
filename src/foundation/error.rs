/// Convenience result type used across postframe.
pub type PostframeResult<T> = Result<T, PostframeError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Only conditions without a visual fallback reach callers of
/// [`CardEngine::generate`](crate::CardEngine::generate): media, font and date failures are
/// absorbed where they happen.
#[derive(thiserror::Error, Debug)]
pub enum PostframeError {
    /// Invalid user-provided configuration or input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A post URL could not be resolved into a record.
    #[error("resolution error: {0}")]
    Resolution(String),

    /// A single remote media fetch failed (transport, timeout or status).
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Canvas allocation or rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PostframeError {
    /// Build a [`PostframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PostframeError::Resolution`] value.
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }

    /// Build a [`PostframeError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build a [`PostframeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PostframeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
