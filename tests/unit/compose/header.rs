use image::Rgba;

use super::*;
use crate::text::fonts::FontSet;

fn record() -> PostRecord {
    PostRecord {
        author_display_name: "Jane Doe".to_string(),
        author_handle: "@jane".to_string(),
        created_at: "Thu Oct 13 20:47:08 +0000 2022".to_string(),
        ..PostRecord::default()
    }
}

fn run(avatar: Option<&RgbaImage>, record: &PostRecord) -> (LayoutCursor, Vec<DrawOp>) {
    let geo = CardGeometry::new(2000, 4000, 1.0).unwrap();
    let mut fonts = FontBook::new(&FontSet::system_only(), 1.0);
    let mut cursor = LayoutCursor {
        x: geo.content_left(),
        y: geo.padding_top,
        max_width: geo.content_width(),
        font: FontRole::Body,
    };
    let mut ops = Vec::new();
    compose_header(
        record,
        avatar,
        &geo,
        &mut fonts,
        &ThemePalette::DARK,
        &mut cursor,
        &mut ops,
    );
    (cursor, ops)
}

#[test]
fn missing_avatar_draws_initials_on_accent_circle() {
    let (cursor, ops) = run(None, &record());
    assert_eq!(cursor.y, 110.0 + 110.0 + 65.0);

    let DrawOp::FillEllipse { rect, color } = &ops[0] else {
        panic!("expected avatar circle first, got {:?}", ops[0]);
    };
    assert_eq!(*color, ThemePalette::DARK.accent);
    assert_eq!((rect.x0, rect.y0, rect.width()), (110.0, 110.0, 110.0));

    let DrawOp::Text {
        text, color, role, ..
    } = &ops[1]
    else {
        panic!("expected initials text");
    };
    assert_eq!(text, "JD");
    assert_eq!(*color, Rgb8::WHITE);
    assert_eq!(*role, FontRole::Initials);
}

#[test]
fn name_badge_and_meta_line_follow_the_avatar() {
    let (_, ops) = run(None, &record());

    let name = ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Text {
                text,
                origin,
                role: FontRole::Name,
                ..
            } => Some((text.clone(), *origin)),
            _ => None,
        })
        .unwrap();
    assert_eq!(name.0, "Jane Doe");
    assert_eq!(name.1, Point::new(110.0 + 110.0 + 20.0, 120.0));

    let badge = ops
        .iter()
        .skip(2)
        .find_map(|op| match op {
            DrawOp::FillEllipse { rect, .. } => Some(*rect),
            _ => None,
        })
        .unwrap();
    assert!(badge.x0 > name.1.x + 10.0 - 1e-9);
    assert_eq!(badge.y0, 128.0);
    assert_eq!(badge.width(), 30.0);

    let checks = ops
        .iter()
        .filter(|op| matches!(op, DrawOp::Line { color, .. } if *color == Rgb8::WHITE))
        .count();
    assert_eq!(checks, 2);

    let meta = ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Text {
                text,
                origin,
                role: FontRole::Meta,
                color,
            } => Some((text.clone(), *origin, *color)),
            _ => None,
        })
        .unwrap();
    assert_eq!(meta.0, "@jane · Oct 13, 2022");
    assert_eq!(meta.1.y, 120.0 + 82.0);
    assert_eq!(meta.2, ThemePalette::DARK.secondary_text);
}

#[test]
fn meta_line_is_just_the_handle_without_a_date() {
    let mut rec = record();
    rec.created_at.clear();
    let (_, ops) = run(None, &rec);
    assert!(ops.iter().any(|op| matches!(
        op,
        DrawOp::Text { text, role: FontRole::Meta, .. } if text == "@jane"
    )));
}

#[test]
fn loaded_avatar_is_cropped_to_a_circle() {
    let avatar = RgbaImage::from_pixel(300, 200, Rgba([200, 10, 10, 255]));
    let (_, ops) = run(Some(&avatar), &record());

    let DrawOp::Image { image, origin } = &ops[0] else {
        panic!("expected avatar image first");
    };
    assert_eq!(*origin, Point::new(110.0, 110.0));
    assert_eq!((image.width, image.height), (110, 110));
    let px = |x: u32, y: u32| image.rgba8_premul[((y * 110 + x) * 4 + 3) as usize];
    assert_eq!(px(0, 0), 0);
    assert_eq!(px(55, 55), 255);
    assert!(!ops.iter().any(|op| matches!(op, DrawOp::Text { role: FontRole::Initials, .. })));
}
