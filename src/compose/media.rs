use image::RgbaImage;

use crate::{
    assets::{
        decode::prepare_image,
        raster::{apply_mask, crop_to_fill, resize_to_width, rounded_mask},
    },
    compose::{
        geometry::CardGeometry,
        plan::{DrawOp, LayoutCursor},
    },
    foundation::core::{Point, Rect},
    model::MAX_MEDIA,
};

/// Cell placement for a multi-image grid, relative to the grid's top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    pub cells: Vec<Rect>,
    /// Vertical advance of the whole grid, trailing gap included.
    pub advance: f64,
}

/// Two-column grid for 2..=4 images. Returns `None` for other counts.
pub fn grid_layout(count: usize, content_width: f64, geo: &CardGeometry) -> Option<GridLayout> {
    if !(2..=MAX_MEDIA).contains(&count) {
        return None;
    }

    let gap = geo.media_gap;
    let cell_w = ((content_width - gap) / 2.0).floor().max(1.0);
    let cell_h = if count == 2 {
        geo.pair_cell_height
    } else {
        geo.grid_cell_height
    }
    .round();
    let rows = count.div_ceil(2);

    let cells = (0..count)
        .map(|i| {
            let (col, row) = ((i % 2) as f64, (i / 2) as f64);
            let x = col * (cell_w + gap);
            let y = row * (cell_h + gap);
            Rect::new(x, y, x + cell_w, y + cell_h)
        })
        .collect();

    let rows = rows as f64;
    let advance = rows * cell_h + (rows - 1.0) * gap + geo.media_advance_after;
    Some(GridLayout { cells, advance })
}

/// Place the prepared images below the body.
///
/// `images[i]` is `None` when that slot failed to load; grid slots stay blank while the
/// layout is unchanged. A failed single image leaves only the leading gap.
/// Image origins are snapped to whole pixels.
pub fn compose_media(
    images: &[Option<RgbaImage>],
    geo: &CardGeometry,
    cursor: &mut LayoutCursor,
    ops: &mut Vec<DrawOp>,
) {
    let images = &images[..images.len().min(MAX_MEDIA)];
    if images.is_empty() {
        return;
    }
    cursor.y = (cursor.y + geo.media_gap_before).round();

    match images {
        [] => {}
        [single] => {
            let Some(img) = single else {
                tracing::debug!("single image unavailable, nothing placed");
                return;
            };

            let width = cursor.max_width.floor().max(1.0) as u32;
            let max_height = geo.single_max_height.round().max(1.0) as u32;
            let mut img = resize_to_width(img, width, max_height);
            let (w, h) = img.dimensions();
            apply_mask(&mut img, &rounded_mask(w, h, geo.single_radius.round() as u32));
            ops.push(DrawOp::Image {
                image: prepare_image(img),
                origin: Point::new(cursor.x.round(), cursor.y),
            });
            cursor.y += f64::from(h) + geo.media_advance_after;
        }
        many => {
            let Some(grid) = grid_layout(many.len(), cursor.max_width, geo) else {
                return;
            };

            let radius = geo.grid_radius.round() as u32;
            for (slot, cell) in many.iter().zip(&grid.cells) {
                let Some(img) = slot else {
                    continue;
                };
                let (w, h) = (cell.width() as u32, cell.height() as u32);
                let mut img = crop_to_fill(img, w, h);
                apply_mask(&mut img, &rounded_mask(w, h, radius));
                ops.push(DrawOp::Image {
                    image: prepare_image(img),
                    origin: Point::new(
                        (cursor.x + cell.x0).round(),
                        (cursor.y + cell.y0).round(),
                    ),
                });
            }
            cursor.y += grid.advance;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/media.rs"]
mod tests;
