use std::{collections::HashMap, sync::Arc};

use kurbo::Shape;

use crate::{
    assets::PreparedImage,
    compose::plan::{CardPlan, DrawOp},
    foundation::{
        core::{Point, Rect, Rgb8},
        error::{PostframeError, PostframeResult},
    },
    render::FrameRGBA,
    text::fonts::{FontBook, FontRole},
};

/// Rasterizes a [`CardPlan`] with `vello_cpu`.
///
/// Text is shaped again through the borrowed [`FontBook`] so glyph positions match the
/// measurements the plan was composed with.
pub struct CpuRenderer<'a> {
    fonts: &'a mut FontBook,
    font_cache: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(fonts: &'a mut FontBook) -> Self {
        Self {
            fonts,
            font_cache: HashMap::new(),
        }
    }

    #[tracing::instrument(skip_all, fields(ops = plan.ops.len()))]
    pub fn render(&mut self, plan: &CardPlan) -> PostframeResult<FrameRGBA> {
        let (w, h) = plan.canvas.to_u16()?;
        let mut ctx = vello_cpu::RenderContext::new(w, h);

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color_to_cpu(plan.background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(w), f64::from(h)));

        for op in &plan.ops {
            self.draw_op(&mut ctx, op)?;
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        let height = plan.final_height();
        let len = usize::from(w) * height as usize * 4;
        let mut data = pixmap
            .data_as_u8_slice()
            .get(..len)
            .ok_or_else(|| PostframeError::render("pixmap smaller than requested crop"))?
            .to_vec();
        unpremultiply_rgba8_in_place(&mut data);

        tracing::debug!(width = w, height, "card rasterized");
        Ok(FrameRGBA {
            width: u32::from(w),
            height,
            data,
        })
    }

    fn draw_op(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        op: &DrawOp,
    ) -> PostframeResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match op {
            DrawOp::FillRect { rect, color } => {
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_rect(&rect_to_cpu(*rect));
            }
            DrawOp::FillEllipse { rect, color } => {
                ctx.set_paint(color_to_cpu(*color));
                let path = kurbo::Ellipse::from_rect(*rect).to_path(0.1);
                ctx.fill_path(&bezpath_to_cpu(&path));
            }
            DrawOp::Line {
                from,
                to,
                width,
                color,
            } => {
                let Some(path) = stroke_quad(*from, *to, *width) else {
                    return Ok(());
                };
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_path(&bezpath_to_cpu(&path));
            }
            DrawOp::Image { image, origin } => {
                // Whole pixels only; a fractional offset resamples the image.
                let paint = image_paint(image)?;
                ctx.set_transform(vello_cpu::kurbo::Affine::translate((
                    origin.x.round(),
                    origin.y.round(),
                )));
                ctx.set_paint(paint);
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    0.0,
                    0.0,
                    f64::from(image.width),
                    f64::from(image.height),
                ));
            }
            DrawOp::Text {
                text,
                origin,
                role,
                color,
            } => self.draw_text(ctx, text, *origin, *role, *color),
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        origin: Point,
        role: FontRole,
        color: Rgb8,
    ) {
        if text.trim().is_empty() {
            return;
        }
        let layout = self.fonts.layout(role, text, color);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(color_to_cpu(brush));

                let font = {
                    let f = run.run().font();
                    self.font_for_run(f.data.id(), f.index, f.data.data())
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    fn font_for_run(
        &mut self,
        blob_id: u64,
        index: u32,
        bytes: &[u8],
    ) -> vello_cpu::peniko::FontData {
        let key = (blob_id, index);
        if let Some(cached) = self.font_cache.get(&key) {
            return cached.clone();
        }
        let data =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.to_vec()), index);
        self.font_cache.insert(key, data.clone());
        data
    }
}

fn color_to_cpu(c: Rgb8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Butt-capped stroke outline of the segment `from..to`.
fn stroke_quad(from: Point, to: Point, width: f64) -> Option<kurbo::BezPath> {
    let d = to - from;
    let len = d.hypot();
    if len <= f64::EPSILON || width <= 0.0 {
        return None;
    }
    let n = kurbo::Vec2::new(-d.y, d.x) * (width / 2.0 / len);
    polygon(&[from + n, to + n, to - n, from - n])
}

fn polygon(points: &[Point]) -> Option<kurbo::BezPath> {
    let (first, rest) = points.split_first()?;
    if rest.len() < 2 {
        return None;
    }
    let mut path = kurbo::BezPath::new();
    path.move_to(*first);
    for p in rest {
        path.line_to(*p);
    }
    path.close_path();
    Some(path)
}

fn image_paint(image: &PreparedImage) -> PostframeResult<vello_cpu::Image> {
    let pixmap =
        image_premul_bytes_to_pixmap(image.rgba8_premul.as_slice(), image.width, image.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> PostframeResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PostframeError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PostframeError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(PostframeError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
