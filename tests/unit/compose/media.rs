use image::Rgba;

use super::*;
use crate::text::fonts::FontRole;

fn geo() -> CardGeometry {
    CardGeometry::new(2000, 4000, 1.0).unwrap()
}

fn cursor(geo: &CardGeometry) -> LayoutCursor {
    LayoutCursor {
        x: geo.content_left(),
        y: 500.0,
        max_width: geo.content_width(),
        font: FontRole::Body,
    }
}

fn solid(w: u32, h: u32) -> Option<RgbaImage> {
    Some(RgbaImage::from_pixel(w, h, Rgba([10, 200, 30, 255])))
}

fn image_origins(ops: &[DrawOp]) -> Vec<(Point, u32, u32)> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::Image { image, origin } => Some((*origin, image.width, image.height)),
            _ => None,
        })
        .collect()
}

#[test]
fn grid_layout_only_for_two_to_four() {
    let g = geo();
    assert!(grid_layout(0, 1780.0, &g).is_none());
    assert!(grid_layout(1, 1780.0, &g).is_none());
    assert!(grid_layout(5, 1780.0, &g).is_none());
}

#[test]
fn four_images_make_a_uniform_two_by_two_grid() {
    let g = geo();
    let grid = grid_layout(4, g.content_width(), &g).unwrap();
    assert_eq!(grid.cells.len(), 4);
    for cell in &grid.cells {
        assert_eq!((cell.width(), cell.height()), (882.0, 700.0));
    }
    assert_eq!(grid.cells[1].x0, 882.0 + 16.0);
    assert_eq!(grid.cells[2].y0, 700.0 + 16.0);
    assert_eq!(grid.advance, 2.0 * 700.0 + 16.0 + 35.0);
}

#[test]
fn pair_and_triple_advances() {
    let g = geo();
    assert_eq!(grid_layout(2, 1780.0, &g).unwrap().advance, 850.0 + 35.0);
    let three = grid_layout(3, 1780.0, &g).unwrap();
    assert_eq!(three.cells.len(), 3);
    assert_eq!(three.advance, 2.0 * 700.0 + 16.0 + 35.0);
}

#[test]
fn failed_cell_stays_blank_and_layout_is_unchanged() {
    let g = geo();
    let images = vec![solid(400, 300), solid(300, 400), None, solid(50, 50)];
    let mut c = cursor(&g);
    let mut ops = Vec::new();
    compose_media(&images, &g, &mut c, &mut ops);

    let placed = image_origins(&ops);
    assert_eq!(placed.len(), 3);
    let top = 500.0 + 30.0;
    assert_eq!(placed[0], (Point::new(110.0, top), 882, 700));
    assert_eq!(placed[1], (Point::new(110.0 + 898.0, top), 882, 700));
    assert_eq!(placed[2], (Point::new(110.0 + 898.0, top + 716.0), 882, 700));
    assert_eq!(c.y, top + 2.0 * 700.0 + 16.0 + 35.0);
}

#[test]
fn single_image_spans_content_width() {
    let g = geo();
    let mut c = cursor(&g);
    let mut ops = Vec::new();
    compose_media(&[solid(890, 445)], &g, &mut c, &mut ops);

    let placed = image_origins(&ops);
    assert_eq!(placed, vec![(Point::new(110.0, 530.0), 1780, 890)]);
    assert_eq!(c.y, 530.0 + 890.0 + 35.0);
}

#[test]
fn tall_single_image_is_capped() {
    let g = geo();
    let mut c = cursor(&g);
    let mut ops = Vec::new();
    compose_media(&[solid(100, 1000)], &g, &mut c, &mut ops);
    assert_eq!(image_origins(&ops)[0].2, 1500);
}

#[test]
fn failed_single_image_keeps_only_the_leading_gap() {
    let g = geo();
    let mut c = cursor(&g);
    let mut ops = Vec::new();
    compose_media(&[None], &g, &mut c, &mut ops);
    assert!(ops.is_empty());
    assert_eq!(c.y, 530.0);

    compose_media(&[], &g, &mut c, &mut ops);
    assert_eq!(c.y, 530.0);
}

#[test]
fn fractional_cursor_is_snapped_before_placing_images() {
    let g = geo();
    let mut c = LayoutCursor {
        y: 442.1156,
        ..cursor(&g)
    };
    let mut ops = Vec::new();
    compose_media(&[solid(20, 20), solid(20, 20), solid(20, 20)], &g, &mut c, &mut ops);

    for (origin, _, _) in image_origins(&ops) {
        assert_eq!(origin.x, origin.x.round());
        assert_eq!(origin.y, origin.y.round());
    }
    assert_eq!(image_origins(&ops)[0].0.y, 472.0);
}

#[test]
fn grid_cells_have_rounded_corners() {
    let g = geo();
    let mut c = cursor(&g);
    let mut ops = Vec::new();
    compose_media(&[solid(10, 10), solid(10, 10)], &g, &mut c, &mut ops);
    let DrawOp::Image { image, .. } = &ops[0] else {
        panic!("expected image");
    };
    assert_eq!(image.rgba8_premul[3], 0);
    let center = ((425 * image.width + 441) * 4 + 3) as usize;
    assert_eq!(image.rgba8_premul[center], 255);
}
