use kurbo::Shape;

use crate::config::RenderConfig;
use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8};
use crate::foundation::error::{VizError, VizResult};
use crate::render::FrameRGBA;
use crate::render::scene::{DrawOp, Scene, TextAlign};
use crate::render::text::TextEngine;

const PATH_TOLERANCE: f64 = 0.1;

/// Rasterizes [`Scene`]s on the CPU with `vello_cpu`.
///
/// The render context is reused between frames of the same size. Text needs a font; without one,
/// text operations are skipped and a single warning is logged.
pub struct CpuRasterizer {
    ctx: Option<vello_cpu::RenderContext>,
    text: Option<TextEngine>,
    warned_no_font: bool,
}

impl CpuRasterizer {
    /// Rasterizer using the font `cfg` resolves to (configured file, `DSVIZ_FONT`, or system).
    pub fn new(cfg: &RenderConfig) -> VizResult<Self> {
        let text = TextEngine::from_config(cfg)?;
        if let Some(engine) = &text {
            tracing::debug!(family = engine.family_name(), "text font loaded");
        }
        Ok(Self::with_text_engine(text))
    }

    /// Rasterizer that draws shapes only.
    pub fn without_text() -> Self {
        Self::with_text_engine(None)
    }

    pub(crate) fn with_text_engine(text: Option<TextEngine>) -> Self {
        Self {
            ctx: None,
            text,
            warned_no_font: false,
        }
    }

    /// `true` when a font is loaded and text will be drawn.
    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    /// Execute every operation of `scene` in order and return premultiplied pixels.
    pub fn render(&mut self, scene: &Scene) -> VizResult<FrameRGBA> {
        let (width, height) = canvas_u16(scene)?;
        let mut pixmap = vello_cpu::Pixmap::new(width, height);

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let drawn = self.draw_scene(scene, &mut ctx);
        if drawn.is_ok() {
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
        }
        self.ctx = Some(ctx);
        drawn?;

        Ok(FrameRGBA {
            width: scene.canvas.width,
            height: scene.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn draw_scene(&mut self, scene: &Scene, ctx: &mut vello_cpu::RenderContext) -> VizResult<()> {
        for item in &scene.items {
            ctx.set_transform(affine_to_cpu(Affine::IDENTITY));
            match &item.op {
                DrawOp::FillRect {
                    rect,
                    color,
                    radius,
                } => {
                    set_color(ctx, *color);
                    if *radius > 0.0 {
                        ctx.fill_path(&rounded_rect_path(*rect, *radius));
                    } else {
                        ctx.fill_rect(&rect_to_cpu(*rect));
                    }
                }
                DrawOp::StrokeRect {
                    rect,
                    color,
                    radius,
                    width,
                } => {
                    set_color(ctx, *color);
                    ctx.set_stroke(stroke(*width));
                    ctx.stroke_path(&rounded_rect_path(*rect, radius.max(0.0)));
                }
                DrawOp::Polyline {
                    points,
                    color,
                    width,
                } => {
                    if points.len() < 2 {
                        continue;
                    }
                    set_color(ctx, *color);
                    ctx.set_stroke(stroke(*width));
                    ctx.stroke_path(&bezpath_to_cpu(&polyline_path(points, false)));
                }
                DrawOp::Polygon { points, color } => {
                    if points.len() < 3 {
                        continue;
                    }
                    set_color(ctx, *color);
                    ctx.fill_path(&bezpath_to_cpu(&polyline_path(points, true)));
                }
                DrawOp::Text {
                    text,
                    anchor,
                    align,
                    size,
                    color,
                } => self.draw_text(ctx, text, *anchor, *align, *size, *color)?,
            }
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        anchor: Point,
        align: TextAlign,
        size: f64,
        color: Rgba8,
    ) -> VizResult<()> {
        if self.text.is_none() {
            if !self.warned_no_font {
                tracing::warn!(
                    "no font available (set font_path or DSVIZ_FONT); text is not drawn"
                );
                self.warned_no_font = true;
            }
            return Ok(());
        }
        let Some(engine) = self.text.as_mut() else {
            return Ok(());
        };

        let font = engine.font().clone();
        let layout = engine.layout_line(text, size as f32, color)?;
        let w = f64::from(layout.width());
        let h = f64::from(layout.height());
        let x = match align {
            TextAlign::Left => anchor.x,
            TextAlign::Center => anchor.x - w / 2.0,
        };
        let y = anchor.y - h / 2.0;
        ctx.set_transform(affine_to_cpu(Affine::translate((x, y))));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
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
        Ok(())
    }
}

fn canvas_u16(scene: &Scene) -> VizResult<(u16, u16)> {
    let c = scene.canvas;
    let w = u16::try_from(c.width).ok().filter(|v| *v > 0);
    let h = u16::try_from(c.height).ok().filter(|v| *v > 0);
    match (w, h) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(VizError::render(format!(
            "canvas {}x{} is outside the rasterizer's 1..=65535 range",
            c.width, c.height
        ))),
    }
}

fn set_color(ctx: &mut vello_cpu::RenderContext, c: Rgba8) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
}

fn stroke(width: f64) -> vello_cpu::kurbo::Stroke {
    vello_cpu::kurbo::Stroke::new(width)
        .with_join(vello_cpu::kurbo::Join::Round)
        .with_caps(vello_cpu::kurbo::Cap::Round)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn rounded_rect_path(rect: Rect, radius: f64) -> vello_cpu::kurbo::BezPath {
    let path = kurbo::RoundedRect::from_rect(rect, radius).to_path(PATH_TOLERANCE);
    bezpath_to_cpu(&path)
}

fn polyline_path(points: &[Point], closed: bool) -> BezPath {
    let mut path = BezPath::new();
    let mut it = points.iter();
    if let Some(first) = it.next() {
        path.move_to(*first);
        for p in it {
            path.line_to(*p);
        }
        if closed {
            path.close_path();
        }
    }
    path
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
