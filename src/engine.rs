use std::{path::PathBuf, sync::Arc};

use crate::{
    assets::{
        fetch::{HttpFetcher, MediaFetcher},
        prepared::PreparedMedia,
    },
    compose::{CardGeometry, compose_card},
    config::EngineConfig,
    encode::{encode_png, output_file_name, write_atomic},
    foundation::error::PostframeResult,
    model::PostRecord,
    render::{CpuRenderer, FrameRGBA},
    text::fonts::{FontBook, FontSet},
    theme::{ThemeName, ThemePalette},
};

/// Turns [`PostRecord`]s into PNG cards.
///
/// An engine is cheap to share: configuration, font bytes and the fetcher are immutable, and
/// every call to [`CardEngine::render`] owns its own canvas, cursor and shaping contexts.
pub struct CardEngine {
    config: EngineConfig,
    geometry: CardGeometry,
    fetcher: Arc<dyn MediaFetcher>,
    fonts: FontSet,
}

impl CardEngine {
    pub fn new(config: EngineConfig, fetcher: Arc<dyn MediaFetcher>) -> PostframeResult<Self> {
        config.validate()?;
        let geometry = CardGeometry::new(config.canvas_width, config.canvas_height, config.scale)?;
        let fonts = FontSet::load(&config.fonts);
        Ok(Self {
            config,
            geometry,
            fetcher,
            fonts,
        })
    }

    /// Engine fetching media over HTTP.
    pub fn with_http(config: EngineConfig) -> PostframeResult<Self> {
        Self::new(config, Arc::new(HttpFetcher::new()?))
    }

    /// Replace the font files resolved from the configuration.
    pub fn with_fonts(mut self, fonts: FontSet) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Render a card without writing it. `theme` falls back to the configured default.
    pub async fn render(
        &self,
        record: &PostRecord,
        theme: Option<&str>,
    ) -> PostframeResult<FrameRGBA> {
        let (_, frame) = self.render_themed(record, theme).await?;
        Ok(frame)
    }

    /// Render a card and persist it as `tweet_<timestamp>_<theme>.png` in the output directory.
    #[tracing::instrument(skip_all, fields(url = %record.source_url))]
    pub async fn generate(
        &self,
        record: &PostRecord,
        theme: Option<&str>,
    ) -> PostframeResult<PathBuf> {
        let (theme, frame) = self.render_themed(record, theme).await?;
        let bytes = encode_png(&frame)?;
        let name = output_file_name(&chrono::Local::now(), theme.as_str());
        write_atomic(&self.config.output_dir, &name, &bytes)
    }

    async fn render_themed(
        &self,
        record: &PostRecord,
        theme: Option<&str>,
    ) -> PostframeResult<(ThemeName, FrameRGBA)> {
        let (theme, palette) = self.config.themes.resolve(theme);
        tracing::info!(
            author = %record.author_handle,
            theme = theme.as_str(),
            images = record.media_urls().len(),
            "rendering card"
        );

        let media =
            PreparedMedia::prepare(record, self.fetcher.as_ref(), self.config.fetch_timeout())
                .await;
        let frame = self.rasterize(record, &media, palette)?;
        Ok((theme, frame))
    }

    fn rasterize(
        &self,
        record: &PostRecord,
        media: &PreparedMedia,
        palette: &ThemePalette,
    ) -> PostframeResult<FrameRGBA> {
        let mut fonts = FontBook::new(&self.fonts, self.geometry.scale as f32);
        let plan = compose_card(record, media, palette, &mut fonts, &self.geometry);
        CpuRenderer::new(&mut fonts).render(&plan)
    }
}
