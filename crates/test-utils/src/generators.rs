//! Image generators for tests.
//!
//! All generators return encoded PNG bytes, the same form the service loads
//! from disk or over HTTP.

use image::{ImageOutputFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Encode an RGBA image as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, ImageOutputFormat::Png)
        .expect("PNG encoding of a test image failed");
    cursor.into_inner()
}

/// A single-color image.
pub fn solid_png(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    encode_png(&RgbaImage::from_pixel(width, height, Rgba(color)))
}

/// Left half `left`, right half `right`; useful to check stretch direction.
pub fn split_png(width: u32, height: u32, left: [u8; 4], right: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba(left)
        } else {
            Rgba(right)
        }
    });
    encode_png(&img)
}

/// Two-axis gradient; more than 256 unique colors once both sides exceed 16 px.
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 16 % 256) as u8, (y * 16 % 256) as u8, ((x + y) % 256) as u8, 255])
    });
    encode_png(&img)
}

/// Decode PNG bytes back into RGBA pixels.
pub fn decode_png(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory(bytes)
        .expect("test PNG should decode")
        .to_rgba8()
}
