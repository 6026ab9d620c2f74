//! Synthetic rasters for compositing tests.
//!
//! These generators create predictable, verifiable pixel patterns so tests can
//! check exactly which pixels a draw touched.

use image::{Rgba, RgbaImage};

pub const OCEAN: Rgba<u8> = Rgba([40, 90, 160, 255]);
pub const RED: Rgba<u8> = Rgba([220, 30, 30, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Creates an image filled with a single color.
pub fn solid_image(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width, height, color)
}

/// Creates a map-like image where every pixel encodes its position:
/// `R = x % 256`, `G = y % 256`, `B = 128`, fully opaque.
///
/// Useful for checking that a crop is an exact sub-image of the source.
pub fn coordinate_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    })
}

/// Creates a semi-transparent "shadow" pin part.
pub fn shadow_part(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 128]))
}

/// Creates a pin body that is opaque in its lower half and transparent above,
/// so draws at different anchors are distinguishable.
pub fn body_part(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_fn(width, height, |_, y| {
        if y >= height / 2 {
            color
        } else {
            TRANSPARENT
        }
    })
}

/// Counts pixels equal to `color`.
pub fn count_pixels(img: &RgbaImage, color: Rgba<u8>) -> usize {
    img.pixels().filter(|p| **p == color).count()
}
