use crate::{
    assets::PreparedImage,
    foundation::core::{Canvas, Point, Rect, Rgb8},
    text::fonts::FontRole,
};

/// One backend-agnostic drawing instruction, in canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillRect {
        rect: Rect,
        color: Rgb8,
    },
    /// Ellipse inscribed in `rect`.
    FillEllipse {
        rect: Rect,
        color: Rgb8,
    },
    /// Straight stroke with butt caps.
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: Rgb8,
    },
    /// Premultiplied raster placed with its top-left corner at `origin`, unscaled.
    Image {
        image: PreparedImage,
        origin: Point,
    },
    /// Single-line text run; `origin` is the top-left of its line box.
    Text {
        text: String,
        origin: Point,
        role: FontRole,
        color: Rgb8,
    },
}

/// The composed card: an ordered op list on an over-allocated canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct CardPlan {
    pub canvas: Canvas,
    pub background: Rgb8,
    pub ops: Vec<DrawOp>,
    /// Cursor Y after the last section.
    pub content_height: f64,
    pub bottom_padding: f64,
}

impl CardPlan {
    /// Height of the cropped output, clamped to `1..=canvas.height`.
    pub fn final_height(&self) -> u32 {
        let wanted = (self.content_height + self.bottom_padding).ceil();
        if !wanted.is_finite() || wanted < 1.0 {
            return 1;
        }
        (wanted as u64).min(u64::from(self.canvas.height)) as u32
    }

    pub fn text_ops(&self) -> impl Iterator<Item = (&str, Rgb8)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, color, .. } => Some((text.as_str(), *color)),
            _ => None,
        })
    }

    pub fn image_ops(&self) -> impl Iterator<Item = (&PreparedImage, Point)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Image { image, origin } => Some((image, *origin)),
            _ => None,
        })
    }
}

/// Flow position while composing; owned by a single compose call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutCursor {
    pub x: f64,
    pub y: f64,
    pub max_width: f64,
    pub font: FontRole,
}
