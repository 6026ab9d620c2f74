//! Pin compositing onto a base map.
//!
//! Pin parts are anchored at their bottom-center: the part's horizontal
//! middle sits on the pin's x and its bottom edge on the pin's y. Parts are
//! drawn layer by layer across all pins (every shadow, then every body), so
//! a shadow never covers another pin's body.

use image::{Rgba, RgbaImage};
use tracing::debug;

use pinmap_common::PixelPoint;

/// Normalized anchor within a pin part: horizontal center, bottom edge.
pub const PIN_ANCHOR: (f64, f64) = (0.5, 1.0);

/// Compose the base map and pin parts into a new image of the map's size.
///
/// `ordered` must already be in paint order; see [`crate::order`].
pub fn compose(base_map: &RgbaImage, pin_parts: &[RgbaImage], ordered: &[PixelPoint]) -> RgbaImage {
    let mut canvas = base_map.clone();

    // Looping over parts first keeps all shadows beneath all bodies.
    for (layer, part) in pin_parts.iter().enumerate() {
        debug!(
            layer,
            part_width = part.width(),
            part_height = part.height(),
            pins = ordered.len(),
            "Drawing pin layer"
        );
        for &point in ordered {
            draw_part(&mut canvas, part, point);
        }
    }

    canvas
}

/// Top-left corner of `part` when its [`PIN_ANCHOR`] sits on `anchor`.
pub fn part_origin(part: &RgbaImage, anchor: PixelPoint) -> (i64, i64) {
    let (ax, ay) = PIN_ANCHOR;
    let dx = (part.width() as f64 * ax).floor() as i64;
    let dy = (part.height() as f64 * ay).floor() as i64;
    (anchor.x as i64 - dx, anchor.y as i64 - dy)
}

/// Alpha-blend one pin part onto the canvas, clipping whatever falls outside.
pub fn draw_part(canvas: &mut RgbaImage, part: &RgbaImage, anchor: PixelPoint) {
    let (origin_x, origin_y) = part_origin(part, anchor);
    let canvas_w = canvas.width() as i64;
    let canvas_h = canvas.height() as i64;

    // Visible span in part coordinates
    let start_x = (-origin_x).clamp(0, part.width() as i64);
    let start_y = (-origin_y).clamp(0, part.height() as i64);
    let end_x = (canvas_w - origin_x).clamp(0, part.width() as i64);
    let end_y = (canvas_h - origin_y).clamp(0, part.height() as i64);

    if start_x >= end_x || start_y >= end_y {
        return;
    }

    for py in start_y..end_y {
        for px in start_x..end_x {
            let src = *part.get_pixel(px as u32, py as u32);
            if src[3] == 0 {
                continue;
            }
            let cx = (origin_x + px) as u32;
            let cy = (origin_y + py) as u32;
            blend_over(canvas.get_pixel_mut(cx, cy), src);
        }
    }
}

/// Source-over compositing of a straight-alpha pixel onto another.
pub fn blend_over(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let src_a = src[3];
    if src_a == 0 {
        return;
    }
    if src_a == 255 {
        *dst = src;
        return;
    }

    let src_a_f = src_a as f32 / 255.0;
    let dst_a_f = dst[3] as f32 / 255.0;
    let out_a = src_a_f + dst_a_f * (1.0 - src_a_f);

    if out_a <= 0.0 {
        return;
    }

    for c in 0..3 {
        let value = (src[c] as f32 * src_a_f + dst[c] as f32 * dst_a_f * (1.0 - src_a_f)) / out_a;
        dst[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}
