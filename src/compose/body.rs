use crate::{
    compose::plan::{DrawOp, LayoutCursor},
    foundation::core::Point,
    model::normalize_line_breaks,
    text::{entities::segment_line, fonts::FontBook, wrap::wrap_paragraph},
    theme::ThemePalette,
};

/// Fraction of a line height that an empty paragraph advances.
const BLANK_LINE_FRACTION: f64 = 0.5;

/// Lay out the post body starting at the cursor and return the advanced `y`.
///
/// Explicit line breaks are kept; each paragraph is wrapped to `cursor.max_width` and every
/// visual line is emitted as one text op per entity so links can be colored independently.
pub fn flow_body(
    text: &str,
    cursor: &mut LayoutCursor,
    fonts: &mut FontBook,
    palette: &ThemePalette,
    ops: &mut Vec<DrawOp>,
) -> f64 {
    let text = normalize_line_breaks(text);
    if text.is_empty() {
        return cursor.y;
    }

    let role = cursor.font;
    let line_height = f64::from(fonts.line_height(role));

    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            cursor.y += line_height * BLANK_LINE_FRACTION;
            continue;
        }

        let lines = {
            let mut measure = |s: &str| fonts.measure(role, s);
            wrap_paragraph(paragraph, cursor.max_width as f32, &mut measure)
        };
        for line in lines {
            emit_line(&line, cursor, fonts, palette, ops);
            cursor.y += line_height;
        }
    }

    cursor.y
}

fn emit_line(
    line: &str,
    cursor: &LayoutCursor,
    fonts: &mut FontBook,
    palette: &ThemePalette,
    ops: &mut Vec<DrawOp>,
) {
    let mut x = cursor.x;
    for entity in segment_line(line) {
        let width = f64::from(fonts.measure(cursor.font, &entity.content));
        let color = if entity.kind.is_link() {
            palette.accent
        } else {
            palette.primary_text
        };
        ops.push(DrawOp::Text {
            text: entity.content,
            origin: Point::new(x, cursor.y),
            role: cursor.font,
            color,
        });
        x += width;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/body.rs"]
mod tests;
