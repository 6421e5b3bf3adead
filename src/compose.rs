//! Pure card layout: turns a post, its prepared media and a palette into a [`CardPlan`].
//!
//! Nothing here performs IO. Sections are stacked top to bottom by a single
//! [`LayoutCursor`]: header, body, media, metrics and branding.

pub(crate) mod body;
pub(crate) mod footer;
pub(crate) mod geometry;
pub(crate) mod header;
pub(crate) mod media;
pub(crate) mod plan;

use crate::{
    assets::prepared::PreparedMedia,
    model::PostRecord,
    text::fonts::{FontBook, FontRole},
    theme::ThemePalette,
};

pub use geometry::CardGeometry;
pub use plan::{CardPlan, DrawOp, LayoutCursor};

#[tracing::instrument(skip_all, fields(handle = %record.author_handle))]
pub fn compose_card(
    record: &PostRecord,
    media: &PreparedMedia,
    palette: &ThemePalette,
    fonts: &mut FontBook,
    geo: &CardGeometry,
) -> CardPlan {
    let mut ops = Vec::new();
    let mut cursor = LayoutCursor {
        x: geo.content_left(),
        y: geo.padding_top,
        max_width: geo.content_width(),
        font: FontRole::Body,
    };

    header::compose_header(
        record,
        media.avatar.as_ref(),
        geo,
        fonts,
        palette,
        &mut cursor,
        &mut ops,
    );
    body::flow_body(&record.body_text, &mut cursor, fonts, palette, &mut ops);
    media::compose_media(&media.images, geo, &mut cursor, &mut ops);
    footer::compose_footer(record, geo, fonts, palette, &mut cursor, &mut ops);

    tracing::debug!(ops = ops.len(), content_height = cursor.y, "card composed");
    CardPlan {
        canvas: geo.canvas,
        background: palette.background,
        ops,
        content_height: cursor.y,
        bottom_padding: geo.padding_bottom,
    }
}

#[cfg(test)]
#[path = "../tests/unit/compose.rs"]
mod tests;
