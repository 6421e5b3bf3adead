//! postframe renders social-media posts into print-ready PNG cards.
//!
//! A render is a short pipeline owned by one [`CardEngine`] call:
//!
//! - fetch the avatar and up to four images concurrently through a [`MediaFetcher`]
//! - compose a pure [`CardPlan`] (header, entity-colored body, media grid, metrics, branding)
//! - rasterize it on the CPU and crop to content
//! - encode a 300 DPI PNG and persist it atomically
//!
//! Post URLs are turned into [`PostRecord`]s by a [`PostSource`] such as [`FxTwitterSource`].
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub(crate) mod compose;
/// Engine configuration.
pub mod config;
pub(crate) mod encode;
pub(crate) mod engine;
pub(crate) mod model;
/// CPU rasterization.
pub mod render;
/// Post URL resolution.
pub mod source;
pub(crate) mod text;
pub(crate) mod theme;

pub use crate::foundation::core::{Canvas, Point, Rect, Rgb8, Vec2};
pub use crate::foundation::error::{PostframeError, PostframeResult};

pub use crate::assets::PreparedImage;
pub use crate::assets::fetch::{HttpFetcher, InMemoryFetcher, MediaFetcher, USER_AGENT};
pub use crate::assets::prepared::PreparedMedia;
pub use crate::compose::{CardGeometry, CardPlan, DrawOp, LayoutCursor, compose_card};
pub use crate::config::EngineConfig;
pub use crate::encode::{DPI, encode_png, output_file_name, write_atomic};
pub use crate::engine::CardEngine;
pub use crate::model::{MAX_MEDIA, PostRecord, normalize_line_breaks};
pub use crate::render::{CpuRenderer, FrameRGBA};
pub use crate::source::{FxTwitterSource, PostSource, clean_text, extract_status_id};
pub use crate::text::entities::{EntityKind, TextEntity, segment_line};
pub use crate::text::fonts::{FontBook, FontConfig, FontRole, FontSet, VerticalMetrics};
pub use crate::text::format::{
    MetricItem, format_count, format_date_full, format_date_short, initials, metric_items,
    metrics_line,
};
pub use crate::text::wrap::{TextMeasure, wrap_paragraph};
pub use crate::theme::{ThemeConfig, ThemeName, ThemePalette};
