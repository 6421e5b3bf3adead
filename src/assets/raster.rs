//! Pixel-level preparation of fetched media: aspect-preserving resize, crop-to-fill and
//! hard-edged rounded masks.

use image::{GrayImage, Luma, RgbaImage, imageops::FilterType};

const FILTER: FilterType = FilterType::Lanczos3;

/// Scale to `width`, keeping aspect. Images taller than `max_height` at that width are
/// center-cropped to `max_height` instead of being squashed.
pub fn resize_to_width(img: &RgbaImage, width: u32, max_height: u32) -> RgbaImage {
    let (sw, sh) = img.dimensions();
    if sw == 0 || sh == 0 || width == 0 {
        return RgbaImage::new(width.max(1), 1);
    }

    let natural_h = ((f64::from(width) * f64::from(sh) / f64::from(sw)).round() as u32).max(1);
    if natural_h > max_height {
        return crop_to_fill(img, width, max_height.max(1));
    }
    resize_exact(img, width, natural_h)
}

/// Fill a `width x height` box without distortion: keep the centered source region with the
/// target aspect, then scale only that region.
pub fn crop_to_fill(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (sw, sh) = img.dimensions();
    let (width, height) = (width.max(1), height.max(1));
    if sw == 0 || sh == 0 {
        return RgbaImage::new(width, height);
    }

    let scale = (f64::from(width) / f64::from(sw)).max(f64::from(height) / f64::from(sh));
    let crop_w = ((f64::from(width) / scale).round() as u32).clamp(1, sw);
    let crop_h = ((f64::from(height) / scale).round() as u32).clamp(1, sh);
    let left = (sw - crop_w) / 2;
    let top = (sh - crop_h) / 2;

    let region = image::imageops::crop_imm(img, left, top, crop_w, crop_h).to_image();
    resize_exact(&region, width, height)
}

fn resize_exact(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    image::imageops::resize(img, width, height, FILTER)
}

/// Single-channel rounded-rectangle mask (255 inside, 0 outside) without anti-aliasing.
///
/// Coverage is decided at pixel centers, so all four corners are mirror images.
pub fn rounded_mask(width: u32, height: u32, radius: u32) -> GrayImage {
    let r = f64::from(radius.min(width / 2).min(height / 2));
    let (w, h) = (f64::from(width), f64::from(height));

    GrayImage::from_fn(width, height, |x, y| {
        let px = f64::from(x) + 0.5;
        let py = f64::from(y) + 0.5;
        let cx = px.clamp(r, w - r);
        let cy = py.clamp(r, h - r);
        let (dx, dy) = (px - cx, py - cy);
        if dx * dx + dy * dy <= r * r {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

pub fn circle_mask(diameter: u32) -> GrayImage {
    rounded_mask(diameter, diameter, diameter.div_ceil(2))
}

/// Multiply the image alpha by `mask`. Both must share dimensions; extra pixels are untouched.
pub fn apply_mask(img: &mut RgbaImage, mask: &GrayImage) {
    for (x, y, px) in img.enumerate_pixels_mut() {
        if x >= mask.width() || y >= mask.height() {
            continue;
        }
        let m = u16::from(mask.get_pixel(x, y).0[0]);
        let a = u16::from(px.0[3]);
        px.0[3] = ((a * m + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/raster.rs"]
mod tests;
