use std::sync::Arc;

use anyhow::Context;

use crate::{assets::PreparedImage, foundation::error::PostframeResult};

/// Decode encoded image bytes (PNG, JPEG, WebP, GIF, ...) into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> PostframeResult<image::RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Convert a straight-alpha image into the premultiplied form consumed by the rasterizer.
pub fn prepare_image(img: image::RgbaImage) -> PreparedImage {
    let (width, height) = img.dimensions();
    let mut rgba8_premul = img.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
