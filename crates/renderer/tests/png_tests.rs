//! Tests for PNG output.
//!
//! Covers encoding mode selection and that encoded files decode back to the
//! same pixels with a standard decoder.

use image::{Rgba, RgbaImage};
use renderer::png::{encode_png, encode_png_indexed, encode_png_rgba, write_png, Palette};
use test_utils::{coordinate_image, solid_image, OCEAN, RED};

/// Byte offset of the color type inside the IHDR chunk.
const COLOR_TYPE_OFFSET: usize = 8 + 8 + 9;

fn decode(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory(bytes).unwrap().to_rgba8()
}

// ============================================================================
// Mode selection
// ============================================================================

#[test]
fn test_few_colors_use_indexed() {
    let mut img = solid_image(64, 64, OCEAN);
    img.put_pixel(10, 10, RED);
    let png = encode_png(&img).unwrap();
    assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    assert_eq!(png[COLOR_TYPE_OFFSET], 3);
}

#[test]
fn test_many_colors_use_rgba() {
    let img = coordinate_image(300, 300);
    let png = encode_png(&img).unwrap();
    assert_eq!(png[COLOR_TYPE_OFFSET], 6);
}

#[test]
fn test_indexed_is_smaller_for_flat_map() {
    let img = solid_image(256, 256, OCEAN);
    let indexed = encode_png(&img).unwrap();
    let rgba = encode_png_rgba(&img).unwrap();
    assert!(indexed.len() <= rgba.len());
}

// ============================================================================
// Decoding back
// ============================================================================

#[test]
fn test_rgba_decodes_to_same_pixels() {
    let img = coordinate_image(300, 20);
    assert_eq!(decode(&encode_png(&img).unwrap()), img);
}

#[test]
fn test_indexed_with_transparency_decodes() {
    let img = RgbaImage::from_fn(16, 8, |x, _| {
        if x < 8 {
            Rgba([0, 0, 0, 128])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    let palette = Palette::extract(&img).unwrap();
    assert!(palette.has_transparency());
    let png = encode_png_indexed(16, 8, &palette).unwrap();
    assert_eq!(decode(&png), img);
}

#[test]
fn test_indexed_rejects_mismatched_palette() {
    let palette = Palette::extract(&solid_image(4, 4, RED)).unwrap();
    assert!(encode_png_indexed(5, 5, &palette).is_err());
}

#[test]
fn test_write_png_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pins.png");
    let img = solid_image(32, 16, RED);
    write_png(&path, &img).unwrap();
    let back = image::open(&path).unwrap().to_rgba8();
    assert_eq!(back, img);
}
