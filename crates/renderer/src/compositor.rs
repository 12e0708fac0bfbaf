//! Stat card composition.
//!
//! Draw order is fixed, later steps occlude earlier ones:
//! 1. Background image stretched to the canvas
//! 2. Four rows, each a label bar, a value bar, then both texts
//! 3. Circle ornament (clipped image or solid fill), then its outline
//! 4. Square ornament (stretched image or solid fill), then its outline
//!
//! Colors behave like canvas fill and stroke styles: both start black, and an
//! unparseable color leaves the current style in place.

use std::time::Instant;
use tiny_skia::{
    FillRule, FilterQuality, Mask, Paint, Path, Pixmap, PixmapPaint, Stroke, Transform,
};
use tracing::debug;

use card_common::{CardError, CardResult, LayoutConfig, Ornament, Rect, Rgba};

use crate::fonts::FontRegistry;
use crate::geometry::{circle_path, rect_path, rounded_rect};
use crate::image_asset::ImageAsset;
use crate::text::draw_text_centered;

/// Largest canvas side we agree to allocate.
pub const MAX_CANVAS_SIDE: u32 = 8192;

/// Canvas line width used when the requested one is unusable.
const DEFAULT_LINE_WIDTH: f32 = 1.0;

/// Canvas miter limit.
const MITER_LIMIT: f32 = 10.0;

/// Images consumed by one composition.
#[derive(Debug, Clone)]
pub struct CardImages {
    /// Always present: the caller resolves the bundled fallback first.
    pub background: ImageAsset,
    pub circle: Option<ImageAsset>,
    pub square: Option<ImageAsset>,
}

impl CardImages {
    pub fn new(background: ImageAsset) -> Self {
        Self {
            background,
            circle: None,
            square: None,
        }
    }
}

/// Integer canvas dimensions for `layout`.
pub fn canvas_size(layout: &LayoutConfig) -> CardResult<(u32, u32)> {
    let invalid = || CardError::InvalidCanvas {
        width: layout.width,
        height: layout.height,
    };
    let side = |v: f64| -> Option<u32> {
        let v = v.round();
        (v.is_finite() && v >= 1.0 && v <= MAX_CANVAS_SIDE as f64).then_some(v as u32)
    };
    Ok((side(layout.width).ok_or_else(invalid)?, side(layout.height).ok_or_else(invalid)?))
}

/// Render the card described by `layout` onto a fresh canvas.
pub fn compose(
    layout: &LayoutConfig,
    images: &CardImages,
    fonts: &FontRegistry,
) -> CardResult<Pixmap> {
    let start = Instant::now();
    let (width, height) = canvas_size(layout)?;
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| CardError::InvalidCanvas {
        width: layout.width,
        height: layout.height,
    })?;

    let mut style = PaintState::default();
    draw_background(&mut pixmap, &images.background);
    draw_rows(&mut pixmap, &mut style, layout, fonts);

    let stroke_width = line_width(layout.stroke_width);
    draw_circle(&mut pixmap, &mut style, &layout.circle, images.circle.as_ref(), stroke_width);
    draw_square(&mut pixmap, &mut style, &layout.square, images.square.as_ref(), stroke_width);

    debug!(
        width,
        height,
        circle_image = images.circle.is_some(),
        square_image = images.square.is_some(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "Composed card"
    );
    Ok(pixmap)
}

fn draw_background(pixmap: &mut Pixmap, background: &ImageAsset) {
    let bounds = Rect::new(0.0, 0.0, pixmap.width() as f64, pixmap.height() as f64);
    blit_stretched(pixmap, background, &bounds, None);
}

/// Current fill and stroke colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PaintState {
    fill: Rgba,
    stroke: Rgba,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            fill: Rgba::BLACK,
            stroke: Rgba::BLACK,
        }
    }
}

impl PaintState {
    fn set_fill(&mut self, color: &str) -> Rgba {
        self.fill = parse_color(color).unwrap_or(self.fill);
        self.fill
    }

    fn set_stroke(&mut self, color: &str) -> Rgba {
        self.stroke = parse_color(color).unwrap_or(self.stroke);
        self.stroke
    }
}

fn draw_rows(
    pixmap: &mut Pixmap,
    style: &mut PaintState,
    layout: &LayoutConfig,
    fonts: &FontRegistry,
) {
    let bars = &layout.bars;
    let colors = &layout.colors;

    for (i, row) in layout.rows.iter().enumerate() {
        let label_rect = bars.label_rect(i);
        let value_rect = bars.value_rect(i);

        let label_bg = style.set_fill(&colors.label_bg);
        if let Some(path) = rounded_rect(&label_rect, bars.radius) {
            fill(pixmap, &path, label_bg);
        }
        let value_bg = style.set_fill(&colors.value_bg);
        if let Some(path) = rounded_rect(&value_rect, bars.radius) {
            fill(pixmap, &path, value_bg);
        }

        let (lx, ly) = label_rect.center();
        let label_color = style.set_fill(&colors.label_text);
        draw_text_centered(
            pixmap,
            fonts,
            &layout.label_font,
            label_color,
            &row.label,
            lx as f32,
            ly as f32,
        );

        let (vx, vy) = value_rect.center();
        let value_color = style.set_fill(&colors.value_text);
        draw_text_centered(
            pixmap,
            fonts,
            &layout.value_font,
            value_color,
            &row.value,
            vx as f32,
            vy as f32,
        );
    }
}

fn draw_circle(
    pixmap: &mut Pixmap,
    style: &mut PaintState,
    ornament: &Ornament,
    image: Option<&ImageAsset>,
    width: f32,
) {
    let bounds = ornament.bounds();
    let Some(path) = circle_path(&bounds) else {
        debug!(size = ornament.size, "Skipping degenerate circle");
        return;
    };

    match image {
        Some(image) => {
            if let Some(mask) = clip_mask(pixmap, &path) {
                blit_stretched(pixmap, image, &bounds, Some(&mask));
            }
        }
        None => fill(pixmap, &path, style.set_fill(&ornament.fill)),
    }
    stroke(pixmap, &path, style.set_stroke(&ornament.stroke), width);
}

fn draw_square(
    pixmap: &mut Pixmap,
    style: &mut PaintState,
    ornament: &Ornament,
    image: Option<&ImageAsset>,
    width: f32,
) {
    let bounds = ornament.bounds();
    let Some(path) = rect_path(&bounds) else {
        debug!(size = ornament.size, "Skipping degenerate square");
        return;
    };

    match image {
        Some(image) => blit_stretched(pixmap, image, &bounds, None),
        None => fill(pixmap, &path, style.set_fill(&ornament.fill)),
    }
    stroke(pixmap, &path, style.set_stroke(&ornament.stroke), width);
}

/// Draw `image` scaled to exactly cover `bounds`, ignoring aspect ratio.
fn blit_stretched(pixmap: &mut Pixmap, image: &ImageAsset, bounds: &Rect, mask: Option<&Mask>) {
    if !bounds.is_finite() || bounds.width == 0.0 || bounds.height == 0.0 {
        return;
    }
    let sx = (bounds.width / image.width() as f64) as f32;
    let sy = (bounds.height / image.height() as f64) as f32;
    let transform = Transform::from_row(sx, 0.0, 0.0, sy, bounds.x as f32, bounds.y as f32);

    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    pixmap.draw_pixmap(0, 0, image.pixmap().as_ref(), &paint, transform, mask);
}

fn clip_mask(pixmap: &Pixmap, path: &Path) -> Option<Mask> {
    let mut mask = Mask::new(pixmap.width(), pixmap.height())?;
    mask.fill_path(path, FillRule::Winding, true, Transform::identity());
    Some(mask)
}

fn fill(pixmap: &mut Pixmap, path: &Path, color: Rgba) {
    let paint = solid_paint(color);
    pixmap.fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
}

fn stroke(pixmap: &mut Pixmap, path: &Path, color: Rgba, width: f32) {
    let paint = solid_paint(color);
    let stroke = Stroke {
        width,
        miter_limit: MITER_LIMIT,
        ..Stroke::default()
    };
    pixmap.stroke_path(path, &paint, &stroke, Transform::identity(), None);
}

fn solid_paint(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

/// Parse a layout color; unparseable strings are logged and ignored.
fn parse_color(color: &str) -> Option<Rgba> {
    let parsed = Rgba::parse(color);
    if parsed.is_none() {
        debug!(color, "Unparseable color, keeping current style");
    }
    parsed
}

/// Line width the canvas would use for a requested width.
pub fn line_width(requested: f64) -> f32 {
    let width = requested as f32;
    if width.is_finite() && width > 0.0 {
        width
    } else {
        DEFAULT_LINE_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_size_rounds() {
        let layout = LayoutConfig {
            width: 200.4,
            height: 99.6,
            ..LayoutConfig::default()
        };
        assert_eq!(canvas_size(&layout).unwrap(), (200, 100));
    }

    #[test]
    fn test_canvas_size_rejects_degenerate() {
        for (w, h) in [(0.0, 10.0), (-5.0, 10.0), (10.0, f64::NAN), (9000.0, 10.0)] {
            let layout = LayoutConfig {
                width: w,
                height: h,
                ..LayoutConfig::default()
            };
            assert!(matches!(
                canvas_size(&layout),
                Err(CardError::InvalidCanvas { .. })
            ));
        }
    }

    #[test]
    fn test_line_width_fallback() {
        assert_eq!(line_width(4.0), 4.0);
        assert_eq!(line_width(0.0), DEFAULT_LINE_WIDTH);
        assert_eq!(line_width(-2.0), DEFAULT_LINE_WIDTH);
        assert_eq!(line_width(f64::INFINITY), DEFAULT_LINE_WIDTH);
    }

    #[test]
    fn test_invalid_color_keeps_current_style() {
        let mut style = PaintState::default();
        assert_eq!(style.set_fill("#zzzzzz"), Rgba::BLACK);
        assert_eq!(style.set_fill("#ffffff"), Rgba::opaque(255, 255, 255));
        assert_eq!(style.set_fill("ffffff"), Rgba::opaque(255, 255, 255));
        assert_eq!(style.set_fill("#12"), Rgba::opaque(255, 255, 255));

        assert_eq!(style.set_stroke("nope"), Rgba::BLACK);
        assert_eq!(style.set_stroke("#111111"), Rgba::opaque(0x11, 0x11, 0x11));
        assert_eq!(style.fill, Rgba::opaque(255, 255, 255));
    }
}
