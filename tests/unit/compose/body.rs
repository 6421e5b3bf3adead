use super::*;
use crate::{
    foundation::core::Rgb8,
    text::fonts::{FontRole, FontSet},
};

fn cursor(max_width: f64) -> LayoutCursor {
    LayoutCursor {
        x: 110.0,
        y: 200.0,
        max_width,
        font: FontRole::Body,
    }
}

fn texts(ops: &[DrawOp]) -> Vec<(String, Rgb8, f64)> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::Text {
                text, color, origin, ..
            } => Some((text.clone(), *color, origin.y)),
            _ => None,
        })
        .collect()
}

#[test]
fn empty_body_does_not_advance() {
    let mut fonts = FontBook::new(&FontSet::system_only(), 1.0);
    let mut c = cursor(1780.0);
    let mut ops = Vec::new();
    let y = flow_body("", &mut c, &mut fonts, &ThemePalette::DARK, &mut ops);
    assert_eq!(y, 200.0);
    assert!(ops.is_empty());
}

#[test]
fn entities_are_colored_by_kind() {
    let palette = ThemePalette::DARK;
    let mut fonts = FontBook::new(&FontSet::system_only(), 1.0);
    let mut c = cursor(1.0e6);
    let mut ops = Vec::new();
    flow_body(
        "Hello @alice check #systems https://example.com/x",
        &mut c,
        &mut fonts,
        &palette,
        &mut ops,
    );

    let runs = texts(&ops);
    let joined: String = runs.iter().map(|(t, _, _)| t.as_str()).collect();
    assert_eq!(joined, "Hello @alice check #systems https://example.com/x");
    assert_eq!(runs[0].0, "Hello ");
    assert_eq!(runs[0].1, palette.primary_text);
    for (text, color, _) in &runs {
        let link = text.starts_with('@') || text.starts_with('#') || text.starts_with("http");
        let want = if link { palette.accent } else { palette.primary_text };
        assert_eq!(*color, want, "{text:?}");
    }
}

#[test]
fn runs_on_one_line_advance_left_to_right() {
    let mut fonts = FontBook::new(&FontSet::system_only(), 1.0);
    let mut c = cursor(1.0e6);
    let mut ops = Vec::new();
    flow_body("a @b c", &mut c, &mut fonts, &ThemePalette::DIM, &mut ops);

    let xs: Vec<f64> = ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { origin, .. } => Some(origin.x),
            _ => None,
        })
        .collect();
    assert_eq!(xs.len(), 3);
    assert_eq!(xs[0], 110.0);
    assert!(xs.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn blank_paragraph_advances_half_a_line() {
    let mut fonts = FontBook::new(&FontSet::system_only(), 1.0);
    let lh = f64::from(fonts.line_height(FontRole::Body));
    let mut c = cursor(1.0e6);
    let mut ops = Vec::new();
    let y = flow_body("first\r\n\r\nsecond", &mut c, &mut fonts, &ThemePalette::DARK, &mut ops);

    assert!((y - (200.0 + 2.5 * lh)).abs() < 1e-6);
    let runs = texts(&ops);
    assert_eq!(runs.len(), 2);
    assert!((runs[1].2 - runs[0].2 - 1.5 * lh).abs() < 1e-6);
}

#[test]
fn narrow_width_wraps_onto_more_lines() {
    let text = "one two three four five six seven eight nine ten";
    let mut fonts = FontBook::new(&FontSet::system_only(), 1.0);
    let lh = f64::from(fonts.line_height(FontRole::Body));

    let mut wide = cursor(1.0e6);
    let mut ops = Vec::new();
    let y_wide = flow_body(text, &mut wide, &mut fonts, &ThemePalette::DARK, &mut ops);
    assert!((y_wide - (200.0 + lh)).abs() < 1e-6);

    let narrow_width = f64::from(fonts.measure(FontRole::Body, "three four"));
    let mut narrow = cursor(narrow_width);
    let mut ops = Vec::new();
    let y_narrow = flow_body(text, &mut narrow, &mut fonts, &ThemePalette::DARK, &mut ops);
    assert!(y_narrow > 200.0 + 3.0 * lh);

    for op in &ops {
        if let DrawOp::Text { text, origin, .. } = op {
            let right = origin.x + f64::from(fonts.measure(FontRole::Body, text));
            assert!(right <= 110.0 + narrow_width + 1e-3, "{text:?} overflows");
        }
    }
}
