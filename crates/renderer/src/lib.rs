//! Raster rendering for stat cards.
//!
//! Implements the drawing side of card generation:
//! - Rounded rectangle and ornament geometry
//! - Font registration and centered text
//! - Composition of background, bars and ornaments
//! - PNG encoding of the finished canvas

pub mod compositor;
pub mod fonts;
pub mod geometry;
pub mod image_asset;
pub mod png;
pub mod text;

pub use compositor::{compose, CardImages};
pub use fonts::FontRegistry;
pub use image_asset::ImageAsset;
pub use png::encode_pixmap;

/// Compose `layout` and encode the result as PNG bytes.
pub fn render_png(
    layout: &card_common::LayoutConfig,
    images: &CardImages,
    fonts: &FontRegistry,
) -> card_common::CardResult<Vec<u8>> {
    let pixmap = compose(layout, images, fonts)?;
    encode_pixmap(&pixmap)
}
