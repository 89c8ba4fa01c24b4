//! Stroke rasterization.
//!
//! Turns a segment list plus style parameters into an RGBA bitmap. The output
//! is a pure function of `(segments, options, width, height)`: every call
//! starts from a fresh pixmap, so nothing drawn earlier can leak into a later
//! render.

use std::path::Path as FsPath;

use image::{ImageFormat, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Stroke, StrokeDash, Transform,
};
use tracing::warn;

use crate::error::{Error, Result};
use crate::types::{Color, FrameBuffer, Segment};

/// Thickness multiplier applied to the configured stroke thickness.
pub const DEFAULT_THICKNESS_SCALE: f32 = 3.0;

// Cubic bezier handle length for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// Color and weight of the signature ink.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub thickness: f32,
    pub thickness_scale: f32,
}

impl StrokeStyle {
    pub fn new(color: Color, thickness: f32) -> Self {
        Self { color, thickness, thickness_scale: DEFAULT_THICKNESS_SCALE }
    }

    /// Width actually handed to the stroker.
    pub fn effective_width(&self) -> f32 {
        self.thickness * self.thickness_scale
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(Color::BLACK, 5.0)
    }
}

/// Dashed rounded rectangle hinting where to sign. Never part of the captured data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Guideline {
    pub color: Color,
    pub stroke_width: f32,
    pub dash_intervals: Vec<f32>,
    pub padding: f32,
    pub corner_radius: f32,
}

impl Default for Guideline {
    fn default() -> Self {
        Self {
            color: Color::GRAY,
            stroke_width: 1.0,
            dash_intervals: vec![16.0, 16.0],
            padding: 16.0,
            corner_radius: 8.0,
        }
    }
}

/// Everything a render pass needs besides the segments and the surface size.
/// Layers are composited background, then guideline, then strokes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    pub stroke: StrokeStyle,
    pub background: Option<Color>,
    pub guideline: Option<Guideline>,
}

impl RenderOptions {
    /// Strokes only, on a transparent surface.
    pub fn strokes_only(stroke: StrokeStyle) -> Self {
        Self { stroke, background: None, guideline: None }
    }
}

/// A rendered signature: straight-alpha RGBA8.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureImage(RgbaImage);

impl SignatureImage {
    pub fn blank(width: u32, height: u32) -> Self {
        Self(RgbaImage::new(width, height))
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.0.get_pixel_checked(x, y).map(|p| Color::rgba(p[0], p[1], p[2], p[3]))
    }

    /// True when every pixel is the same (nothing was drawn over the background).
    pub fn is_blank(&self) -> bool {
        let mut pixels = self.0.pixels();
        match pixels.next() {
            Some(first) => pixels.all(|p| p == first),
            None => true,
        }
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.0
    }

    pub fn into_rgba(self) -> RgbaImage {
        self.0
    }

    pub fn save_png(&self, path: impl AsRef<FsPath>) -> Result<()> {
        self.0
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| Error::ImageEncode(e.to_string()))
    }

    /// Composite over `backdrop` and pack as 0x00RRGGBB for the window.
    pub fn to_frame_buffer(&self, backdrop: Color) -> FrameBuffer {
        let mut fb = FrameBuffer::new(self.width() as usize, self.height() as usize, backdrop.to_u32());
        for (dst, p) in fb.pixels.iter_mut().zip(self.0.pixels()) {
            let a = p[3] as u32;
            if a == 0 {
                continue;
            }
            let mix = |src: u8, bg: u8| (src as u32 * a + bg as u32 * (255 - a) + 127) / 255;
            let r = mix(p[0], backdrop.r);
            let g = mix(p[1], backdrop.g);
            let b = mix(p[2], backdrop.b);
            *dst = (r << 16) | (g << 8) | b;
        }
        fb
    }

    fn from_pixmap(pixmap: &Pixmap) -> Self {
        let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
        // tiny-skia stores premultiplied alpha; images handed to callers are straight.
        for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Self(img)
    }
}

/// Draw `segments` onto a fresh `width` x `height` surface.
///
/// Each segment is a straight line with round caps and the style's effective
/// width, so consecutive segments read as one continuous stroke. Zero-length
/// segments become round dots. There is no error path: a zero-sized surface
/// yields an empty image and an empty segment list yields a background-only one.
pub fn render_segments(segments: &[Segment], width: u32, height: u32, options: &RenderOptions) -> SignatureImage {
    let Some(mut pixmap) = Pixmap::new(width, height) else {
        if width != 0 && height != 0 {
            warn!(width, height, "surface too large to allocate; returning empty image");
            return SignatureImage::blank(0, 0);
        }
        return SignatureImage::blank(width, height);
    };

    if let Some(bg) = options.background {
        pixmap.fill(bg.to_skia());
    }

    if let Some(guide) = &options.guideline {
        draw_guideline(&mut pixmap, guide);
    }

    draw_strokes(&mut pixmap, segments, &options.stroke);

    SignatureImage::from_pixmap(&pixmap)
}

fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
}

fn draw_strokes(pixmap: &mut Pixmap, segments: &[Segment], style: &StrokeStyle) {
    let width = style.effective_width();
    if segments.is_empty() || width.is_nan() || width <= 0.0 {
        return;
    }
    let paint = solid_paint(style.color);

    // All real lines go into one path so overlapping joints are not blended twice.
    let mut pb = PathBuilder::new();
    let mut dots = Vec::new();
    for seg in segments {
        if !(seg.start.is_finite() && seg.end.is_finite()) {
            continue;
        }
        if seg.is_degenerate() {
            dots.push(seg.start);
            continue;
        }
        pb.move_to(seg.start.x, seg.start.y);
        pb.line_to(seg.end.x, seg.end.y);
    }

    if let Some(path) = pb.finish() {
        let stroke = Stroke {
            width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    for p in dots {
        if let Some(dot) = PathBuilder::from_circle(p.x, p.y, width / 2.0) {
            pixmap.fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }
}

fn draw_guideline(pixmap: &mut Pixmap, guide: &Guideline) {
    let left = guide.padding;
    let top = guide.padding;
    let w = pixmap.width() as f32 - guide.padding * 2.0;
    let h = pixmap.height() as f32 - guide.padding * 2.0;
    if w <= 0.0 || h <= 0.0 || guide.stroke_width.is_nan() || guide.stroke_width <= 0.0 {
        return;
    }
    let Some(path) = rounded_rect(left, top, w, h, guide.corner_radius) else {
        return;
    };

    let dash = if guide.dash_intervals.is_empty() {
        None
    } else {
        let dash = StrokeDash::new(guide.dash_intervals.clone(), 0.0);
        if dash.is_none() {
            warn!(intervals = ?guide.dash_intervals, "invalid guideline dash pattern; drawing solid");
        }
        dash
    };

    let stroke = Stroke { width: guide.stroke_width, dash, ..Stroke::default() };
    pixmap.stroke_path(&path, &solid_paint(guide.color), &stroke, Transform::identity(), None);
}

/// Closed rounded rectangle; the radius is clamped to half the shorter side.
fn rounded_rect(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Option<Path> {
    let r = radius.max(0.0).min(w / 2.0).min(h / 2.0);
    let (right, bottom) = (x + w, y + h);
    let k = r * KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.cubic_to(right - r + k, y, right, y + r - k, right, y + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.cubic_to(x + r - k, bottom, x, bottom - r + k, x, bottom - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}
