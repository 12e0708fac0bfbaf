//! Decoded bitmaps ready to be drawn onto the canvas.

use image::RgbaImage;
use tiny_skia::{ColorU8, Pixmap};

use card_common::{CardError, CardResult};

/// A decoded image with known pixel dimensions.
///
/// Stored premultiplied so it can be blitted without further conversion.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pixmap: Pixmap,
}

impl ImageAsset {
    /// Decode PNG, JPEG, GIF, WebP, BMP or any other format `image` sniffs.
    pub fn decode(bytes: &[u8]) -> CardResult<Self> {
        let decoded =
            image::load_from_memory(bytes).map_err(|e| CardError::ImageDecode(e.to_string()))?;
        Self::from_rgba(decoded.to_rgba8())
    }

    /// Wrap straight-alpha RGBA pixels.
    pub fn from_rgba(img: RgbaImage) -> CardResult<Self> {
        let (width, height) = img.dimensions();
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            CardError::ImageDecode(format!("unusable image dimensions {}x{}", width, height))
        })?;

        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(img.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }

        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}
