//! Tests for card composition.
//!
//! Fonts are disabled in these tests so pixel checks only see shapes and
//! images; text rendering is covered in `text_tests.rs`.

use card_common::{LayoutConfig, Rgba};
use image::RgbaImage;
use renderer::{compose, render_png, CardImages, FontRegistry, ImageAsset};
use test_utils::{colors, decode_png, solid_png, split_png};

// ============================================================================
// Helper functions
// ============================================================================

fn no_fonts() -> FontRegistry {
    FontRegistry::with_fallback_dirs(Vec::new())
}

fn solid_asset(width: u32, height: u32, color: [u8; 4]) -> ImageAsset {
    ImageAsset::decode(&solid_png(width, height, color)).unwrap()
}

fn default_images() -> CardImages {
    CardImages::new(solid_asset(1530, 383, colors::BACKGROUND))
}

fn render(layout: &LayoutConfig, images: &CardImages) -> RgbaImage {
    decode_png(&render_png(layout, images, &no_fonts()).unwrap())
}

fn hex(color: &str) -> [u8; 4] {
    Rgba::parse(color).unwrap().to_array()
}

// ============================================================================
// Rows
// ============================================================================

#[test]
fn test_default_card_dimensions() {
    let img = render(&LayoutConfig::default(), &default_images());
    assert_eq!(img.dimensions(), (1530, 383));
}

#[test]
fn test_rows_drawn_at_expected_positions() {
    let img = render(&LayoutConfig::default(), &default_images());

    for y in [90u32, 152, 214, 276] {
        // Inside the label bar, left of the centered text
        assert_eq!(img.get_pixel(310, y + 24).0, hex("#2b3360"), "label bar at y={}", y);
        // Inside the value bar
        assert_eq!(img.get_pixel(530, y + 24).0, hex("#000000"), "value bar at y={}", y);
        // Gap below the row shows the background
        assert_eq!(img.get_pixel(310, y + 55).0, colors::BACKGROUND, "gap below y={}", y);
    }

    // Nothing drawn above the first row
    assert_eq!(img.get_pixel(310, 80).0, colors::BACKGROUND);
}

#[test]
fn test_rounded_corners_leave_background() {
    let img = render(&LayoutConfig::default(), &default_images());
    // Top-left corner pixel of the first label bar is outside the arc
    assert_eq!(img.get_pixel(300, 90).0, colors::BACKGROUND);

    let mut layout = LayoutConfig::default();
    layout.bars.radius = 0.0;
    let img = render(&layout, &default_images());
    assert_eq!(img.get_pixel(300, 90).0, hex("#2b3360"));
}

#[test]
fn test_oversized_radius_is_clamped() {
    let mut layout = LayoutConfig::default();
    layout.bars.radius = 10_000.0;
    let img = render(&layout, &default_images());
    // Still a pill: the vertical middle of the left edge is filled
    assert_eq!(img.get_pixel(302, 114).0, hex("#2b3360"));
    assert_eq!(img.get_pixel(300, 91).0, colors::BACKGROUND);
}

#[test]
fn test_custom_colors_are_used() {
    let mut layout = LayoutConfig::default();
    layout.colors.label_bg = "#ff0000".to_string();
    layout.colors.value_bg = "#0000ff80".to_string();
    let img = render(&layout, &default_images());

    assert_eq!(img.get_pixel(310, 114).0, colors::RED);
    // Half transparent blue over the opaque background
    let px = img.get_pixel(530, 114).0;
    assert_eq!(px[3], 255);
    assert!(px[2] > 120 && px[1] < 120, "unexpected blend {:?}", px);
}

#[test]
fn test_unparseable_label_bg_keeps_previous_fill() {
    let mut layout = LayoutConfig::default();
    layout.colors.label_bg = "#not-a-color".to_string();
    layout.colors.value_text = "#00ff00".to_string();
    let img = render(&layout, &default_images());

    // First row: nothing filled yet, so the initial black
    assert_eq!(img.get_pixel(310, 114).0, [0, 0, 0, 255]);
    // Later rows: value text color of the row above
    for y in [152u32, 214, 276] {
        assert_eq!(img.get_pixel(310, y + 24).0, hex("#00ff00"), "label bar at y={}", y);
    }
}

#[test]
fn test_unparseable_value_bg_reuses_label_bg() {
    let mut layout = LayoutConfig::default();
    layout.colors.value_bg = "#12345".to_string();
    let img = render(&layout, &default_images());

    for y in [90u32, 152, 214, 276] {
        assert_eq!(img.get_pixel(530, y + 24).0, hex("#2b3360"), "value bar at y={}", y);
    }
}

#[test]
fn test_unparseable_ornament_colors_keep_previous_style() {
    let mut layout = LayoutConfig::default();
    layout.colors.value_text = "#ff0000".to_string();
    layout.circle.fill = "#zzz".to_string();
    layout.circle.stroke = "#zzz".to_string();
    layout.square.fill = "#zzz".to_string();
    layout.square.stroke = "#0000ff".to_string();
    let img = render(&layout, &default_images());

    // Circle fill inherits the last text color, its stroke the initial black
    assert_eq!(img.get_pixel(130, 185).0, colors::RED);
    assert_eq!(img.get_pixel(130, 95).0, [0, 0, 0, 255]);
    // Square fill still inherits, its valid stroke applies
    assert_eq!(img.get_pixel(1345, 180).0, colors::RED);
    assert_eq!(img.get_pixel(1260, 180).0, colors::BLUE);
}

// ============================================================================
// Background
// ============================================================================

#[test]
fn test_background_is_stretched_to_canvas() {
    let layout = LayoutConfig {
        width: 100.0,
        height: 50.0,
        ..LayoutConfig::default()
    };
    let images = CardImages::new(ImageAsset::decode(&split_png(4, 4, colors::RED, colors::BLUE)).unwrap());
    let img = render(&layout, &images);

    assert_eq!(img.dimensions(), (100, 50));
    assert_eq!(img.get_pixel(5, 10).0, colors::RED);
    assert_eq!(img.get_pixel(95, 10).0, colors::BLUE);
}

// ============================================================================
// Ornaments
// ============================================================================

#[test]
fn test_solid_ornaments_with_outline() {
    let img = render(&LayoutConfig::default(), &default_images());

    // Circle: fill at the center, stroke on the top of the outline
    assert_eq!(img.get_pixel(130, 185).0, hex("#333333"));
    assert_eq!(img.get_pixel(130, 95).0, hex("#111111"));
    // Outside the circle but inside its bounding square
    assert_eq!(img.get_pixel(45, 100).0, colors::BACKGROUND);

    // Square: fill at the center, stroke on the left edge
    assert_eq!(img.get_pixel(1345, 180).0, hex("#333333"));
    assert_eq!(img.get_pixel(1260, 180).0, hex("#111111"));
    // Square corners are not rounded
    assert_eq!(img.get_pixel(1263, 98).0, hex("#333333"));
}

#[test]
fn test_circle_image_is_clipped() {
    let mut images = default_images();
    images.circle = Some(solid_asset(8, 8, colors::RED));
    let img = render(&LayoutConfig::default(), &images);

    assert_eq!(img.get_pixel(130, 185).0, colors::RED);
    // Image corners fall outside the circular clip
    assert_eq!(img.get_pixel(45, 100).0, colors::BACKGROUND);
    assert_eq!(img.get_pixel(215, 270).0, colors::BACKGROUND);
    // Outline is stroked regardless of the fill branch
    assert_eq!(img.get_pixel(130, 95).0, hex("#111111"));
}

#[test]
fn test_square_image_fills_box() {
    let mut images = default_images();
    images.square = Some(solid_asset(3, 5, colors::BLUE));
    let mut layout = LayoutConfig::default();
    layout.square.stroke = "#ffff00".to_string();
    let img = render(&layout, &images);

    assert_eq!(img.get_pixel(1345, 180).0, colors::BLUE);
    assert_eq!(img.get_pixel(1265, 100).0, colors::BLUE);
    assert_eq!(img.get_pixel(1260, 180).0, colors::YELLOW);
    // Just outside the box and its stroke
    assert_eq!(img.get_pixel(1345, 269).0, colors::BACKGROUND);
}

#[test]
fn test_stroke_width_is_configurable() {
    let mut layout = LayoutConfig::default();
    layout.stroke_width = 20.0;
    let img = render(&layout, &default_images());
    // Stroke spans 85..105 around the circle's top edge
    assert_eq!(img.get_pixel(130, 100).0, hex("#111111"));
    assert_eq!(img.get_pixel(130, 88).0, hex("#111111"));
}

#[test]
fn test_degenerate_ornaments_are_skipped() {
    let mut layout = LayoutConfig::default();
    layout.circle.size = f64::NAN;
    layout.square.size = 0.0;
    let pixmap = compose(&layout, &default_images(), &no_fonts()).unwrap();
    assert_eq!(pixmap.width(), 1530);
}

#[test]
fn test_invalid_canvas_is_an_error() {
    let layout = LayoutConfig {
        width: 0.0,
        ..LayoutConfig::default()
    };
    assert!(compose(&layout, &default_images(), &no_fonts()).is_err());
}
