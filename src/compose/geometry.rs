use crate::foundation::{
    core::Canvas,
    error::{PostframeError, PostframeResult},
};

/// Card layout constants in canvas pixels, already multiplied by the device scale factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardGeometry {
    pub canvas: Canvas,
    pub scale: f64,

    pub padding_side: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,

    pub avatar_size: f64,
    pub name_gap: f64,
    pub name_offset_y: f64,
    pub meta_offset_y: f64,
    pub badge_size: f64,
    pub badge_gap: f64,
    pub badge_offset_y: f64,
    pub header_advance: f64,

    pub media_gap_before: f64,
    pub media_gap: f64,
    pub media_advance_after: f64,
    pub single_max_height: f64,
    pub single_radius: f64,
    pub grid_radius: f64,
    pub pair_cell_height: f64,
    pub grid_cell_height: f64,

    pub metrics_gap_before: f64,
    pub divider_gap: f64,
    pub divider_width: f64,
    pub metrics_advance: f64,
    pub logo_size: f64,
    pub logo_gap: f64,
}

impl CardGeometry {
    pub fn new(canvas_width: u32, canvas_height: u32, scale: f64) -> PostframeResult<Self> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(PostframeError::validation(format!(
                "scale must be finite and > 0, got {scale}"
            )));
        }
        let canvas = Canvas::new(canvas_width, canvas_height)?;
        let s = |v: f64| v * scale;

        let geo = Self {
            canvas,
            scale,

            padding_side: s(110.0),
            padding_top: s(110.0),
            padding_bottom: s(110.0),

            avatar_size: s(110.0),
            name_gap: s(20.0),
            name_offset_y: s(10.0),
            meta_offset_y: s(82.0),
            badge_size: s(30.0),
            badge_gap: s(10.0),
            badge_offset_y: s(8.0),
            header_advance: s(65.0),

            media_gap_before: s(30.0),
            media_gap: s(16.0),
            media_advance_after: s(35.0),
            single_max_height: s(1500.0),
            single_radius: s(20.0),
            grid_radius: s(18.0),
            pair_cell_height: s(850.0),
            grid_cell_height: s(700.0),

            metrics_gap_before: s(45.0),
            divider_gap: s(55.0),
            divider_width: s(1.0).max(1.0),
            metrics_advance: s(75.0),
            logo_size: s(26.0),
            logo_gap: s(10.0),
        };

        if geo.content_width() < 1.0 {
            return Err(PostframeError::validation(format!(
                "canvas width {canvas_width} leaves no room for content at scale {scale}"
            )));
        }
        Ok(geo)
    }

    pub fn content_width(&self) -> f64 {
        f64::from(self.canvas.width) - 2.0 * self.padding_side
    }

    pub fn content_left(&self) -> f64 {
        self.padding_side
    }

    pub fn content_right(&self) -> f64 {
        f64::from(self.canvas.width) - self.padding_side
    }
}
