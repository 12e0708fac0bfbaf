//! Tests for PNG encoding of card canvases.
//!
//! Output is decoded with the `image` crate to check it is a valid PNG with
//! the pixels we drew, in both indexed and RGBA modes.

use renderer::png::{encode_pixmap, encode_rgba};
use test_utils::{decode_png, gradient_png};
use tiny_skia::{Color, Pixmap};

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// IHDR color type byte (signature 8 + length 4 + "IHDR" 4 + w 4 + h 4 + depth 1)
fn color_type(png: &[u8]) -> u8 {
    png[25]
}

#[test]
fn test_few_colors_encode_indexed() {
    let pixels = [
        255, 0, 0, 255, // red
        0, 0, 255, 255, // blue
        0, 0, 255, 255, // blue
        255, 0, 0, 255, // red
    ];
    let png = encode_rgba(&pixels, 2, 2).unwrap();

    assert_eq!(&png[..8], &PNG_SIGNATURE);
    assert_eq!(color_type(&png), 3);

    let img = decode_png(&png);
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(1, 0).0, [0, 0, 255, 255]);
    assert_eq!(img.get_pixel(1, 1).0, [255, 0, 0, 255]);
}

#[test]
fn test_indexed_keeps_transparency() {
    let pixels = [
        255, 0, 0, 255, // opaque red
        0, 0, 0, 0, // transparent
    ];
    let img = decode_png(&encode_rgba(&pixels, 2, 1).unwrap());
    assert_eq!(img.get_pixel(0, 0).0[3], 255);
    assert_eq!(img.get_pixel(1, 0).0[3], 0);
}

#[test]
fn test_many_colors_encode_rgba() {
    let source = decode_png(&gradient_png(64, 64));
    let png = encode_rgba(source.as_raw(), 64, 64).unwrap();

    assert_eq!(color_type(&png), 6);
    let img = decode_png(&png);
    assert_eq!(img.as_raw(), source.as_raw());
}

#[test]
fn test_encode_pixmap_demultiplies() {
    let mut pixmap = Pixmap::new(3, 2).unwrap();
    pixmap.fill(Color::from_rgba8(200, 100, 0, 255));
    let img = decode_png(&encode_pixmap(&pixmap).unwrap());

    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(2, 1).0, [200, 100, 0, 255]);
}
