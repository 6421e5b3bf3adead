use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::{PostframeError, PostframeResult},
    text::fonts::FontConfig,
    theme::ThemeConfig,
};

/// Engine-wide settings, shared read-only by every render.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub output_dir: PathBuf,
    /// Over-allocated drawing surface; the output is cropped to content.
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Device scale factor applied to every layout constant and font size.
    pub scale: f64,
    pub fetch_timeout_ms: u64,
    pub fonts: FontConfig,
    pub themes: ThemeConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            canvas_width: 2000,
            canvas_height: 4000,
            scale: 1.0,
            fetch_timeout_ms: 15_000,
            fonts: FontConfig::default(),
            themes: ThemeConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> PostframeResult<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(PostframeError::validation(format!(
                "scale must be finite and > 0, got {}",
                self.scale
            )));
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(PostframeError::validation("canvas dimensions must be > 0"));
        }
        let limit = u32::from(u16::MAX);
        if self.canvas_width > limit || self.canvas_height > limit {
            return Err(PostframeError::validation(format!(
                "canvas {}x{} exceeds the {limit}px rasterizer limit",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.fetch_timeout_ms == 0 {
            return Err(PostframeError::validation("fetch_timeout_ms must be > 0"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(PostframeError::validation("output_dir must not be empty"));
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn from_json_str(s: &str) -> PostframeResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| PostframeError::serde(format!("engine config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> PostframeResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_json_str(&s)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
