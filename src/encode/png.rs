use std::{
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    foundation::error::{PostframeError, PostframeResult},
    render::FrameRGBA,
};

/// Print resolution advertised in the pHYs chunk.
pub const DPI: u32 = 300;

const INCH_PER_METER: f64 = 39.3701;
const MAX_NAME_ATTEMPTS: u32 = 1000;

fn pixels_per_meter(dpi: u32) -> u32 {
    (f64::from(dpi) * INCH_PER_METER).round() as u32
}

/// Encode a frame as 8-bit RGBA PNG tagged with [`DPI`].
pub fn encode_png(frame: &FrameRGBA) -> PostframeResult<Vec<u8>> {
    if frame.data.len() != frame.width as usize * frame.height as usize * 4 {
        return Err(PostframeError::render("frame byte length mismatch"));
    }

    let mut out = Vec::new();
    {
        let mut encoder = ::png::Encoder::new(&mut out, frame.width, frame.height);
        encoder.set_color(::png::ColorType::Rgba);
        encoder.set_depth(::png::BitDepth::Eight);
        let ppm = pixels_per_meter(DPI);
        encoder.set_pixel_dims(Some(::png::PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: ::png::Unit::Meter,
        }));

        let mut writer = encoder
            .write_header()
            .map_err(|e| PostframeError::render(format!("png header: {e}")))?;
        writer
            .write_image_data(&frame.data)
            .map_err(|e| PostframeError::render(format!("png data: {e}")))?;
        writer
            .finish()
            .map_err(|e| PostframeError::render(format!("png finish: {e}")))?;
    }
    Ok(out)
}

/// `tweet_<YYYYmmdd_HHMMSS_mmm>_<theme>.png`.
pub fn output_file_name<Tz>(now: &chrono::DateTime<Tz>, theme: &str) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("tweet_{}_{theme}.png", now.format("%Y%m%d_%H%M%S_%3f"))
}

/// Write `bytes` to `dir/file_name` through a temporary file in the same directory.
///
/// The target is never overwritten: on collision `_1`, `_2`, ... is inserted before the
/// extension. Returns the path actually written.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn write_atomic(dir: &Path, file_name: &str, bytes: &[u8]) -> PostframeResult<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output dir {}", dir.display()))?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".postframe-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .with_context(|| format!("create temp file in {}", dir.display()))?;
    tmp.write_all(bytes).context("write temp file")?;
    tmp.as_file().sync_all().context("sync temp file")?;

    let (stem, ext) = split_name(file_name);
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let name = if attempt == 0 {
            file_name.to_string()
        } else {
            format!("{stem}_{attempt}{ext}")
        };
        let target = dir.join(name);
        match tmp.persist_noclobber(&target) {
            Ok(_) => {
                tracing::info!(path = %target.display(), "card written");
                return Ok(target);
            }
            Err(err) if err.error.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!(path = %target.display(), "output name taken");
                tmp = err.file;
            }
            Err(err) => {
                return Err(anyhow::Error::new(err.error)
                    .context(format!("persist {}", target.display()))
                    .into());
            }
        }
    }

    Err(anyhow::anyhow!(
        "no free output name for {file_name} in {} after {MAX_NAME_ATTEMPTS} attempts",
        dir.display()
    )
    .into())
}

fn split_name(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(i) if i > 0 => file_name.split_at(i),
        _ => (file_name, ""),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
