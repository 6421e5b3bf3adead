use super::*;
use crate::{foundation::core::Canvas, text::fonts::FontSet};

fn record() -> PostRecord {
    PostRecord {
        author_display_name: "Jane Doe".to_string(),
        author_handle: "@jane".to_string(),
        body_text: "Hello @alice check #systems https://example.com/x".to_string(),
        created_at: "Thu Oct 13 20:47:08 +0000 2022".to_string(),
        like_count: 2500,
        repost_count: 12,
        ..PostRecord::default()
    }
}

#[test]
fn sections_stack_in_order_and_fit_the_canvas() {
    let geo = CardGeometry::new(2000, 4000, 1.0).unwrap();
    let mut fonts = FontBook::new(&FontSet::system_only(), 1.0);
    let plan = compose_card(
        &record(),
        &PreparedMedia::default(),
        &ThemePalette::DARK,
        &mut fonts,
        &geo,
    );

    assert_eq!(plan.background, ThemePalette::DARK.background);
    assert_eq!(plan.canvas, geo.canvas);

    let texts: Vec<&str> = plan.text_ops().map(|(t, _)| t).collect();
    let pos = |needle: &str| texts.iter().position(|t| *t == needle).unwrap();
    assert!(pos("Jane Doe") < pos("Hello "));
    assert!(pos("@alice") < pos("12"));
    assert!(pos("12") < pos("Posted on X"));

    let h = plan.final_height();
    assert!(h <= 4000);
    assert!(f64::from(h) >= plan.content_height + plan.bottom_padding);
    assert!(plan.content_height > 110.0 + 175.0);
}

#[test]
fn final_height_clamps_to_canvas() {
    let plan = CardPlan {
        canvas: Canvas::new(100, 300).unwrap(),
        background: ThemePalette::DARK.background,
        ops: vec![],
        content_height: 10_000.0,
        bottom_padding: 110.0,
    };
    assert_eq!(plan.final_height(), 300);

    let tiny = CardPlan {
        content_height: 0.0,
        bottom_padding: 0.0,
        ..plan.clone()
    };
    assert_eq!(tiny.final_height(), 1);

    let normal = CardPlan {
        content_height: 150.2,
        bottom_padding: 10.0,
        ..plan
    };
    assert_eq!(normal.final_height(), 161);
}

#[test]
fn geometry_rejects_bad_scale_and_scales_constants() {
    assert!(CardGeometry::new(2000, 4000, 0.0).is_err());
    assert!(CardGeometry::new(2000, 4000, f64::NAN).is_err());
    assert!(CardGeometry::new(200, 4000, 1.0).is_err());

    let half = CardGeometry::new(1000, 2000, 0.5).unwrap();
    assert_eq!(half.padding_side, 55.0);
    assert_eq!(half.content_width(), 890.0);
    assert_eq!(half.grid_cell_height, 350.0);
    assert_eq!(half.divider_width, 1.0);
}
