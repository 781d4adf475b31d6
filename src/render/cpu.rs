use std::sync::Arc;

use vello_cpu::kurbo::{self as vk, Shape as _};

use crate::{
    config::{Palette, Tone},
    foundation::{
        core::{Canvas, Point, Rgba8},
        error::{ChipflowError, ChipflowResult},
    },
    layout::{CircuitPath, Layout, Pin, Side},
    render::{
        FrameRGBA, Surface,
        glow::{self, GLOW_RADIUS_PX, GLOW_SIGMA},
        label::{PROCESSOR_LABEL, rasterize_label, system_fontdb},
    },
    scene::Scene,
};

const PATH_WIDTH: f64 = 2.0;
const PROCESSOR_BORDER_WIDTH: f64 = 1.5;
const JUNCTION_RADIUS: f64 = 2.5;
const ENDPOINT_RADIUS: f64 = 4.0;
const PULSE_RADIUS: f64 = 3.0;
const PULSE_HALO_RADIUS: f64 = 6.0;
const PIN_RADIUS: f64 = 3.0;
const PIN_LIT_RADIUS: f64 = 4.0;
/// Label font size relative to the processor half-size.
const LABEL_FONT_FRACTION: f64 = 0.8;

/// Raster surface backed by `vello_cpu`.
///
/// Draws into two layers per frame: a glow layer that is blurred, and the sharp layer on top.
pub struct CpuSurface {
    canvas: Canvas,
    fontdb: Option<Arc<usvg::fontdb::Database>>,
    label: Option<CachedLabel>,
    frame: Option<FrameRGBA>,
    frames_drawn: u64,
}

struct CachedLabel {
    size: u32,
    color: Rgba8,
    image: vello_cpu::Image,
}

impl CpuSurface {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            fontdb: None,
            label: None,
            frame: None,
            frames_drawn: 0,
        }
    }

    /// Use a preloaded font database instead of loading system fonts on first draw.
    pub fn with_fontdb(mut self, fontdb: Arc<usvg::fontdb::Database>) -> Self {
        self.fontdb = Some(fontdb);
        self
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Most recently drawn frame.
    pub fn frame(&self) -> Option<&FrameRGBA> {
        self.frame.as_ref()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Render the scene at the surface's current size.
    #[tracing::instrument(
        skip(self, scene),
        fields(width = self.canvas.width, height = self.canvas.height)
    )]
    pub fn render(&mut self, scene: &Scene) -> ChipflowResult<FrameRGBA> {
        if self.canvas.is_degenerate() {
            return Ok(FrameRGBA::empty(self.canvas));
        }
        let (w, h) = dims_u16(self.canvas)?;
        let px_count = usize::from(w) * usize::from(h);

        let cfg = scene.config();
        let layout = scene.layout();
        let palette = &cfg.palette;
        let lit = scene.pin_highlights();

        let mut out = match cfg.background {
            Some(bg) => bg.premultiplied().repeat(px_count),
            None => vec![0u8; px_count * 4],
        };

        if cfg.glow {
            let mut ctx = vello_cpu::RenderContext::new(w, h);
            draw_glow(&mut ctx, layout, &lit, palette);
            let layer = rasterize(&mut ctx, w, h);
            let blurred = glow::blur_premul(
                &layer,
                self.canvas.width,
                self.canvas.height,
                GLOW_RADIUS_PX,
                GLOW_SIGMA,
            )?;
            glow::over_in_place(&mut out, &blurred)?;
        }

        let label = self.label_image(layout, palette)?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        draw_paths(&mut ctx, layout, palette);
        draw_processor(&mut ctx, layout, palette, label);
        draw_pins(&mut ctx, layout, &lit, palette);
        let sharp = rasterize(&mut ctx, w, h);
        glow::over_in_place(&mut out, &sharp)?;

        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: out,
            premultiplied: true,
        })
    }

    fn label_image(
        &mut self,
        layout: &Layout,
        palette: &Palette,
    ) -> ChipflowResult<Option<&vello_cpu::Image>> {
        let size = (layout.processor_half * 2.0).ceil() as u32;
        if size == 0 {
            return Ok(None);
        }
        let color = palette.processor_text;

        let stale = self
            .label
            .as_ref()
            .is_none_or(|l| l.size != size || l.color != color);
        if stale {
            let fontdb = self.fontdb.get_or_insert_with(system_fontdb).clone();
            let raster = rasterize_label(
                PROCESSOR_LABEL,
                size,
                layout.processor_half * LABEL_FONT_FRACTION,
                color,
                fontdb,
            )?;
            let side: u16 = size
                .try_into()
                .map_err(|_| ChipflowError::render("label size exceeds u16"))?;
            let image = premul_bytes_to_image(&raster.rgba8_premul, side, side)?;
            self.label = Some(CachedLabel { size, color, image });
        }

        Ok(self.label.as_ref().map(|l| &l.image))
    }
}

impl Surface for CpuSurface {
    fn resize(&mut self, canvas: Canvas) -> ChipflowResult<()> {
        if canvas != self.canvas {
            tracing::debug!(
                width = canvas.width,
                height = canvas.height,
                "surface resized"
            );
            self.canvas = canvas;
        }
        Ok(())
    }

    fn draw(&mut self, scene: &Scene) -> ChipflowResult<()> {
        let frame = self.render(scene)?;
        self.frame = Some(frame);
        self.frames_drawn += 1;
        Ok(())
    }
}

fn dims_u16(canvas: Canvas) -> ChipflowResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| ChipflowError::render("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| ChipflowError::render("canvas height exceeds u16"))?;
    Ok((w, h))
}

fn rasterize(ctx: &mut vello_cpu::RenderContext, w: u16, h: u16) -> Vec<u8> {
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    pixmap.data_as_u8_slice().to_vec()
}

fn draw_glow(
    ctx: &mut vello_cpu::RenderContext,
    layout: &Layout,
    lit: &[bool],
    palette: &Palette,
) {
    reset(ctx);

    if layout.processor_half > 0.0 {
        ctx.set_paint(color_to_cpu(palette.processor_shadow));
        ctx.fill_rect(&rect_to_cpu(layout.processor_rect().inflate(4.0, 4.0)));
    }

    for path in &layout.paths {
        let tone = path.heading.tone(palette);
        ctx.set_paint(color_to_cpu(tone.glow));
        ctx.set_stroke(vk::Stroke::new(PATH_WIDTH * 2.0));
        ctx.stroke_path(&polyline(&path.points));
        fill_circle(ctx, path.end(), ENDPOINT_RADIUS * 1.5);

        ctx.set_paint(color_to_cpu(tone.bright));
        for pulse in &path.pulses {
            if let Some(p) = pulse.position_on(path) {
                fill_circle(ctx, p, PULSE_HALO_RADIUS + 1.0);
            }
        }
    }

    for (pin, &on) in layout.pins.iter().zip(lit) {
        if on {
            ctx.set_paint(color_to_cpu(pin_color(pin, true, palette)));
            fill_circle(ctx, pin.position, PIN_LIT_RADIUS * 1.5);
        }
    }
}

/// Paths in creation order, each fully drawn (line, junctions, endpoint, pulses) before the next.
fn draw_paths(ctx: &mut vello_cpu::RenderContext, layout: &Layout, palette: &Palette) {
    reset(ctx);
    ctx.set_stroke(vk::Stroke::new(PATH_WIDTH));

    for path in &layout.paths {
        let tone = path.heading.tone(palette);
        let line = color_to_cpu(tone.normal);

        ctx.set_paint(line);
        ctx.stroke_path(&polyline(&path.points));

        for &j in path.junctions() {
            fill_circle(ctx, j, JUNCTION_RADIUS);
        }

        fill_circle(ctx, path.end(), ENDPOINT_RADIUS);
        ctx.set_paint(color_to_cpu(palette.endpoint_core));
        fill_circle(ctx, path.end(), ENDPOINT_RADIUS * 0.4);

        draw_pulses(ctx, path, tone);
    }
}

fn draw_pulses(ctx: &mut vello_cpu::RenderContext, path: &CircuitPath, tone: Tone) {
    for pulse in &path.pulses {
        let Some(p) = pulse.position_on(path) else {
            continue;
        };
        ctx.set_paint(color_to_cpu(tone.bright.fade(0.35)));
        fill_circle(ctx, p, PULSE_HALO_RADIUS);
        ctx.set_paint(color_to_cpu(tone.bright));
        fill_circle(ctx, p, PULSE_RADIUS);
    }
}

fn draw_processor(
    ctx: &mut vello_cpu::RenderContext,
    layout: &Layout,
    palette: &Palette,
    label: Option<&vello_cpu::Image>,
) {
    if layout.processor_half <= 0.0 {
        return;
    }
    reset(ctx);
    let body = layout.processor_rect();

    ctx.set_paint(color_to_cpu(palette.processor_bg));
    ctx.fill_rect(&rect_to_cpu(body));

    ctx.set_paint(color_to_cpu(palette.processor_border));
    ctx.set_stroke(vk::Stroke::new(PROCESSOR_BORDER_WIDTH));
    ctx.stroke_rect(&rect_to_cpu(body));

    if let Some(image) = label {
        let (w, h) = match &image.image {
            vello_cpu::ImageSource::Pixmap(p) => (f64::from(p.width()), f64::from(p.height())),
            vello_cpu::ImageSource::OpaqueId(_) => return,
        };
        ctx.set_transform(vk::Affine::translate((body.x0, body.y0)));
        ctx.set_paint(image.clone());
        ctx.fill_rect(&vk::Rect::new(0.0, 0.0, w, h));
        ctx.set_transform(vk::Affine::IDENTITY);
    }
}

fn draw_pins(
    ctx: &mut vello_cpu::RenderContext,
    layout: &Layout,
    lit: &[bool],
    palette: &Palette,
) {
    reset(ctx);
    for (pin, &on) in layout.pins.iter().zip(lit) {
        ctx.set_paint(color_to_cpu(pin_color(pin, on, palette)));
        fill_circle(
            ctx,
            pin.position,
            if on { PIN_LIT_RADIUS } else { PIN_RADIUS },
        );
    }
}

/// Unclaimed pins are grey; claimed top/left pins blue, right/bottom orange.
fn pin_color(pin: &Pin, lit: bool, palette: &Palette) -> Rgba8 {
    if !pin.used_by_path {
        return palette.pin_idle;
    }
    let tone = match pin.side {
        Side::Top | Side::Left => palette.blue,
        Side::Right | Side::Bottom => palette.orange,
    };
    if lit { tone.bright } else { tone.normal }
}

fn reset(ctx: &mut vello_cpu::RenderContext) {
    ctx.set_transform(vk::Affine::IDENTITY);
    ctx.set_paint_transform(vk::Affine::IDENTITY);
}

fn fill_circle(ctx: &mut vello_cpu::RenderContext, center: Point, radius: f64) {
    let circle = vk::Circle::new(point_to_cpu(center), radius);
    ctx.fill_path(&circle.to_path(0.1));
}

fn polyline(points: &[Point]) -> vk::BezPath {
    let mut out = vk::BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        out.move_to(point_to_cpu(*first));
        for &p in rest {
            out.line_to(point_to_cpu(p));
        }
    }
    out
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vk::Point {
    vk::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: crate::foundation::core::Rect) -> vk::Rect {
    vk::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn premul_bytes_to_image(
    rgba8_premul: &[u8],
    w: u16,
    h: u16,
) -> ChipflowResult<vello_cpu::Image> {
    if rgba8_premul.len() != usize::from(w) * usize::from(h) * 4 {
        return Err(ChipflowError::render("label byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let pixels: Vec<_> = rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();

    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
