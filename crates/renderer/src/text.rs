//! Centered single-line text drawing.
//!
//! Glyph outlines from rusttype are collected into one tiny-skia path and
//! filled, so rasterization is clipped to the canvas however large the font.
//! Text is never wrapped, truncated or shrunk.

use rusttype::{point, Font, OutlineBuilder, PositionedGlyph, Scale};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

use card_common::{FontSpec, Rgba};

use crate::fonts::FontRegistry;

/// Canvas default font size, used when the requested size is unusable.
const DEFAULT_FONT_SIZE: f32 = 10.0;

/// Weight used when the requested weight is outside 1..=1000.
const DEFAULT_WEIGHT: u16 = 400;

/// Font size in pixels after validation.
pub fn font_px(spec: &FontSpec) -> f32 {
    let size = spec.size as f32;
    if size.is_finite() && size > 0.0 {
        size
    } else {
        DEFAULT_FONT_SIZE
    }
}

/// Numeric weight after validation.
pub fn font_weight(spec: &FontSpec) -> u16 {
    if spec.weight.is_finite() && (1.0..=1000.0).contains(&spec.weight) {
        spec.weight.round() as u16
    } else {
        DEFAULT_WEIGHT
    }
}

/// Advance width of `text` in pixels at `scale`, including kerning.
pub fn measure(font: &Font<'_>, scale: Scale, text: &str) -> f32 {
    font.layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Draw `text` centered on (`cx`, `cy`), with a middle baseline.
///
/// Returns `false` when no font could be resolved and nothing was drawn.
pub fn draw_text_centered(
    pixmap: &mut Pixmap,
    fonts: &FontRegistry,
    spec: &FontSpec,
    color: Rgba,
    text: &str,
    cx: f32,
    cy: f32,
) -> bool {
    if text.is_empty() || !cx.is_finite() || !cy.is_finite() {
        return false;
    }
    let Some(font) = fonts.resolve(spec.families(), font_weight(spec)) else {
        return false;
    };

    let scale = Scale::uniform(font_px(spec));
    let metrics = font.v_metrics(scale);
    let width = measure(&font, scale, text);

    // Middle of the em box sits halfway between ascent and descent.
    let baseline = cy + (metrics.ascent + metrics.descent) / 2.0;
    let origin = point(cx - width / 2.0, baseline);

    let mut outline = GlyphOutline::default();
    for glyph in font.layout(text, scale, origin) {
        if !overlaps_canvas(&glyph, pixmap.width(), pixmap.height()) {
            continue;
        }
        let position = glyph.position();
        outline.offset = (position.x, position.y);
        glyph.unpositioned().build_outline(&mut outline);
    }

    if let Some(path) = outline.builder.finish() {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = true;
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
    true
}

/// Whether any part of the glyph's pixel box lies on a `width`x`height` canvas.
fn overlaps_canvas(glyph: &PositionedGlyph<'_>, width: u32, height: u32) -> bool {
    glyph.pixel_bounding_box().map_or(false, |bb| {
        bb.max.x > 0 && bb.max.y > 0 && bb.min.x < width as i32 && bb.min.y < height as i32
    })
}

/// Glyph outlines translated to canvas space.
#[derive(Default)]
struct GlyphOutline {
    builder: PathBuilder,
    offset: (f32, f32),
}

impl OutlineBuilder for GlyphOutline {
    fn move_to(&mut self, x: f32, y: f32) {
        let (dx, dy) = self.offset;
        self.builder.move_to(x + dx, y + dy);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (dx, dy) = self.offset;
        self.builder.line_to(x + dx, y + dy);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (dx, dy) = self.offset;
        self.builder.quad_to(x1 + dx, y1 + dy, x + dx, y + dy);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (dx, dy) = self.offset;
        self.builder
            .cubic_to(x1 + dx, y1 + dy, x2 + dx, y2 + dy, x + dx, y + dy);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_spec_validation() {
        let mut spec = FontSpec {
            weight: 700.0,
            size: 24.0,
            family: "Open Sans, sans-serif".to_string(),
        };
        assert_eq!(font_px(&spec), 24.0);
        assert_eq!(font_weight(&spec), 700);

        spec.size = -3.0;
        spec.weight = 5000.0;
        assert_eq!(font_px(&spec), DEFAULT_FONT_SIZE);
        assert_eq!(font_weight(&spec), DEFAULT_WEIGHT);
    }

    #[test]
    fn test_draw_without_fonts_is_noop() {
        let mut pixmap = Pixmap::new(20, 20).unwrap();
        let fonts = FontRegistry::with_fallback_dirs(Vec::new());
        let spec = FontSpec {
            weight: 400.0,
            size: 12.0,
            family: "Open Sans, sans-serif".to_string(),
        };
        let drawn = draw_text_centered(&mut pixmap, &fonts, &spec, Rgba::BLACK, "Hi", 10.0, 10.0);
        assert!(!drawn);
        assert!(pixmap.pixels().iter().all(|p| p.alpha() == 0));
    }
}
