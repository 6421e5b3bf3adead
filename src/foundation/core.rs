use crate::foundation::error::{PostframeError, PostframeResult};

pub use kurbo::{Point, Rect, Vec2};

/// Opaque sRGB color. Also used as the text brush for shaped layouts.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// Pixel dimensions of a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// The rasterizer addresses surfaces with 16-bit coordinates.
    pub fn new(width: u32, height: u32) -> PostframeResult<Self> {
        if width == 0 || height == 0 {
            return Err(PostframeError::validation("canvas dimensions must be > 0"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(PostframeError::validation(format!(
                "canvas {width}x{height} exceeds the 65535px rasterizer limit"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn to_u16(self) -> PostframeResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| PostframeError::render("canvas width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| PostframeError::render("canvas height exceeds u16"))?;
        Ok((w, h))
    }
}
