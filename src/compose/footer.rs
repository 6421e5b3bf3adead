use crate::{
    compose::{
        geometry::CardGeometry,
        plan::{DrawOp, LayoutCursor},
    },
    foundation::core::{Point, Rect, Rgb8},
    model::PostRecord,
    text::{
        fonts::{FontBook, FontRole},
        format::{format_date_full, metric_items},
    },
    theme::ThemePalette,
};

const METRIC_SEPARATOR: &str = " · ";
const BRANDING: &str = "Posted on X";

/// Divider, engagement line, second divider and the branding row.
pub fn compose_footer(
    record: &PostRecord,
    geo: &CardGeometry,
    fonts: &mut FontBook,
    palette: &ThemePalette,
    cursor: &mut LayoutCursor,
    ops: &mut Vec<DrawOp>,
) {
    cursor.y += geo.metrics_gap_before;
    divider(geo, cursor.y, palette.divider, ops);
    cursor.y += geo.divider_gap;

    metrics_runs(record, geo, fonts, palette, cursor, ops);
    cursor.y += geo.metrics_advance;

    divider(geo, cursor.y, palette.divider, ops);
    cursor.y += geo.divider_gap;

    branding_row(record, geo, fonts, palette, cursor, ops);
}

fn divider(geo: &CardGeometry, y: f64, color: Rgb8, ops: &mut Vec<DrawOp>) {
    ops.push(DrawOp::FillRect {
        rect: Rect::new(geo.content_left(), y, geo.content_right(), y + geo.divider_width),
        color,
    });
}

fn metrics_runs(
    record: &PostRecord,
    geo: &CardGeometry,
    fonts: &mut FontBook,
    palette: &ThemePalette,
    cursor: &LayoutCursor,
    ops: &mut Vec<DrawOp>,
) {
    let items = metric_items(
        record.reply_count,
        record.repost_count,
        record.like_count,
        record.view_count,
    );

    let mut x = geo.content_left();
    let mut push = |text: String, color: Rgb8, x: &mut f64| {
        let w = f64::from(fonts.measure(FontRole::Metrics, &text));
        ops.push(DrawOp::Text {
            text,
            origin: Point::new(*x, cursor.y),
            role: FontRole::Metrics,
            color,
        });
        *x += w;
    };

    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            push(METRIC_SEPARATOR.to_string(), palette.secondary_text, &mut x);
        }
        push(item.value, palette.primary_text, &mut x);
        push(format!(" {}", item.label), palette.secondary_text, &mut x);
    }
}

fn branding_row(
    record: &PostRecord,
    geo: &CardGeometry,
    fonts: &mut FontBook,
    palette: &ThemePalette,
    cursor: &mut LayoutCursor,
    ops: &mut Vec<DrawOp>,
) {
    let logo = geo.logo_size;
    let left = geo.content_left();
    x_logo(Point::new(left, cursor.y), logo, palette.primary_text, ops);

    let m = fonts.metrics(FontRole::Small);
    let text_h = f64::from(m.ascent + m.descent);
    let text_y = cursor.y + (logo - text_h) / 2.0;
    ops.push(DrawOp::Text {
        text: BRANDING.to_string(),
        origin: Point::new(left + logo + geo.logo_gap, text_y),
        role: FontRole::Small,
        color: palette.secondary_text,
    });

    let date = format_date_full(&record.created_at);
    if !date.is_empty() {
        let w = f64::from(fonts.measure(FontRole::Small, &date));
        ops.push(DrawOp::Text {
            text: date,
            origin: Point::new(geo.content_right() - w, text_y),
            role: FontRole::Small,
            color: palette.secondary_text,
        });
    }

    cursor.y += logo.max(f64::from(m.line_height()));
}

/// Two crossing strokes in a `size` square.
fn x_logo(origin: Point, size: f64, color: Rgb8, ops: &mut Vec<DrawOp>) {
    let width = (size / 8.0).max(3.0);
    ops.push(DrawOp::Line {
        from: origin,
        to: Point::new(origin.x + size, origin.y + size),
        width,
        color,
    });
    ops.push(DrawOp::Line {
        from: Point::new(origin.x + size, origin.y),
        to: Point::new(origin.x, origin.y + size),
        width,
        color,
    });
}

#[cfg(test)]
#[path = "../../tests/unit/compose/footer.rs"]
mod tests;
