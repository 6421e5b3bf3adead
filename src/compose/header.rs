use image::RgbaImage;

use crate::{
    assets::{
        decode::prepare_image,
        raster::{apply_mask, circle_mask, crop_to_fill},
    },
    compose::{
        geometry::CardGeometry,
        plan::{DrawOp, LayoutCursor},
    },
    foundation::core::{Point, Rect, Rgb8},
    model::PostRecord,
    text::{
        fonts::{FontBook, FontRole},
        format::{format_date_short, initials},
    },
    theme::ThemePalette,
};

/// Avatar, display name, verified badge and the handle/date line.
pub fn compose_header(
    record: &PostRecord,
    avatar: Option<&RgbaImage>,
    geo: &CardGeometry,
    fonts: &mut FontBook,
    palette: &ThemePalette,
    cursor: &mut LayoutCursor,
    ops: &mut Vec<DrawOp>,
) {
    let avatar_origin = Point::new(cursor.x, cursor.y);
    let size = geo.avatar_size;

    match avatar {
        Some(img) => {
            let d = size.round().max(1.0) as u32;
            let mut img = crop_to_fill(img, d, d);
            apply_mask(&mut img, &circle_mask(d));
            ops.push(DrawOp::Image {
                image: prepare_image(img),
                origin: avatar_origin,
            });
        }
        None => initials_avatar(
            &record.author_display_name,
            avatar_origin,
            size,
            fonts,
            palette,
            ops,
        ),
    }

    let text_x = avatar_origin.x + size + geo.name_gap;
    let name_y = cursor.y + geo.name_offset_y;
    let name_width = f64::from(fonts.measure(FontRole::Name, &record.author_display_name));
    ops.push(DrawOp::Text {
        text: record.author_display_name.clone(),
        origin: Point::new(text_x, name_y),
        role: FontRole::Name,
        color: palette.primary_text,
    });

    verified_badge(
        Point::new(text_x + name_width + geo.badge_gap, name_y + geo.badge_offset_y),
        geo.badge_size,
        palette.accent,
        ops,
    );

    let date = format_date_short(&record.created_at);
    let meta = if date.is_empty() {
        record.author_handle.clone()
    } else {
        format!("{} · {}", record.author_handle, date)
    };
    ops.push(DrawOp::Text {
        text: meta,
        origin: Point::new(text_x, name_y + geo.meta_offset_y),
        role: FontRole::Meta,
        color: palette.secondary_text,
    });

    cursor.y += size + geo.header_advance;
}

fn initials_avatar(
    name: &str,
    origin: Point,
    size: f64,
    fonts: &mut FontBook,
    palette: &ThemePalette,
    ops: &mut Vec<DrawOp>,
) {
    ops.push(DrawOp::FillEllipse {
        rect: Rect::new(origin.x, origin.y, origin.x + size, origin.y + size),
        color: palette.accent,
    });

    let letters = initials(name);
    if letters.is_empty() {
        return;
    }
    let w = f64::from(fonts.measure(FontRole::Initials, &letters));
    let m = fonts.metrics(FontRole::Initials);
    let h = f64::from(m.ascent + m.descent);
    ops.push(DrawOp::Text {
        text: letters,
        origin: Point::new(origin.x + (size - w) / 2.0, origin.y + (size - h) / 2.0),
        role: FontRole::Initials,
        color: Rgb8::WHITE,
    });
}

/// Filled circle with a white checkmark, `size` pixels square at `origin`.
fn verified_badge(origin: Point, size: f64, fill: Rgb8, ops: &mut Vec<DrawOp>) {
    ops.push(DrawOp::FillEllipse {
        rect: Rect::new(origin.x, origin.y, origin.x + size, origin.y + size),
        color: fill,
    });

    let at = |fx: f64, fy: f64| Point::new(origin.x + fx * size, origin.y + fy * size);
    let width = (size / 10.0).max(2.0);
    let (start, knee, end) = (at(0.27, 0.52), at(0.43, 0.68), at(0.74, 0.34));
    ops.push(DrawOp::Line {
        from: start,
        to: knee,
        width,
        color: Rgb8::WHITE,
    });
    ops.push(DrawOp::Line {
        from: knee,
        to: end,
        width,
        color: Rgb8::WHITE,
    });
}

#[cfg(test)]
#[path = "../../tests/unit/compose/header.rs"]
mod tests;
