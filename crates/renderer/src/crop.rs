//! Crop rectangle resolution.
//!
//! Starting from the tight bounds of the pins, the rectangle is padded by the
//! crop margin, widened to the minimum width, then heightened to the minimum
//! (or ratio-derived) height. Every stage stays inside the map.

use image::{imageops, RgbaImage};
use tracing::debug;

use pinmap_common::{CropOption, PixelRect};

/// Resolve the final crop rectangle for pins bounded by `rect`.
///
/// The result always lies within `[0, map_width] x [0, map_height]`. Its width
/// is at least `min_width` when the map is that wide, and its height at least
/// the effective minimum height when the map is that tall.
pub fn resolve_crop(rect: PixelRect, crop: &CropOption, map_width: u32, map_height: u32) -> PixelRect {
    let w = map_width as i64;
    let h = map_height as i64;
    let bound = crop.bound as i64;

    // Margin, each edge clamped on its own axis
    let min_x = (rect.min_x as i64 - bound).clamp(0, w);
    let min_y = (rect.min_y as i64 - bound).clamp(0, h);
    let max_x = (rect.max_x as i64 + bound).clamp(0, w);
    let max_y = (rect.max_y as i64 + bound).clamp(0, h);

    let (min_x, max_x) = expand_span(min_x, max_x, crop.min_width as i64, w);

    let width = max_x - min_x;
    let min_height = effective_min_height(crop, width);

    let (min_y, max_y) = expand_span(min_y, max_y, min_height, h);

    let resolved = PixelRect::new(px(min_x), px(min_y), px(max_x), px(max_y));
    debug!(
        input = ?rect,
        resolved = ?resolved,
        min_height,
        "Resolved crop rectangle"
    );
    resolved
}

/// Minimum height for a crop of the given width.
///
/// With `preserve_ratio` the height tracks `width * min_height / min_width`
/// (truncated), but never drops below `min_height`.
pub fn effective_min_height(crop: &CropOption, width: i64) -> i64 {
    let floor = crop.min_height as i64;
    if crop.preserve_ratio && crop.min_width > 0 {
        let scaled = (crop.ratio() * width as f64) as i64;
        scaled.max(floor)
    } else {
        floor
    }
}

/// Grow `[lo, hi]` outward to at least `target`, split evenly between both
/// sides. Whatever would spill past `0` or `limit` moves to the other side.
fn expand_span(lo: i64, hi: i64, target: i64, limit: i64) -> (i64, i64) {
    let size = hi - lo;
    if size >= target {
        return (lo, hi);
    }

    let deficit = target - size;
    let mut lo = lo - deficit / 2;
    let mut hi = hi + (deficit - deficit / 2);

    if lo < 0 {
        hi += -lo;
        lo = 0;
    }
    if hi > limit {
        lo = (lo - (hi - limit)).max(0);
        hi = limit;
    }

    (lo, hi)
}

/// Saturating conversion for edges of maps wider than `i32::MAX`.
fn px(v: i64) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

/// Copy the `rect` region out of `img`. No resampling takes place.
pub fn crop_image(img: &RgbaImage, rect: PixelRect) -> RgbaImage {
    let rect = rect.clamp_to(img.width(), img.height());
    imageops::crop_imm(
        img,
        rect.min_x as u32,
        rect.min_y as u32,
        rect.width() as u32,
        rect.height() as u32,
    )
    .to_image()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crop(bound: u32, min_width: u32, min_height: u32, preserve_ratio: bool) -> CropOption {
        CropOption {
            bound,
            min_width,
            min_height,
            preserve_ratio,
        }
    }

    #[test]
    fn test_expand_span_even_split() {
        assert_eq!(expand_span(40, 60, 40, 100), (30, 70));
    }

    #[test]
    fn test_expand_span_odd_deficit_keeps_target() {
        let (lo, hi) = expand_span(40, 60, 41, 100);
        assert_eq!(hi - lo, 41);
        assert_eq!((lo, hi), (30, 71));
    }

    #[test]
    fn test_expand_span_shortfall_moves_right() {
        assert_eq!(expand_span(5, 15, 40, 100), (0, 40));
    }

    #[test]
    fn test_expand_span_overflow_moves_left() {
        assert_eq!(expand_span(90, 98, 40, 100), (60, 100));
    }

    #[test]
    fn test_expand_span_larger_than_limit() {
        assert_eq!(expand_span(10, 20, 500, 100), (0, 100));
    }

    #[test]
    fn test_margin_clamps_each_axis() {
        // maxY overflow must clamp maxY, not maxX
        let rect = PixelRect::new(100, 100, 150, 390);
        let out = resolve_crop(rect, &crop(20, 1, 1, false), 400, 400);
        assert_eq!(out, PixelRect::new(80, 80, 170, 400));
    }

    #[test]
    fn test_ratio_raises_min_height() {
        let rect = PixelRect::new(100, 200, 700, 210);
        let out = resolve_crop(rect, &crop(0, 300, 100, true), 1000, 1000);
        assert_eq!(out.width(), 600);
        assert_eq!(out.height(), 200);
        assert_eq!(out, PixelRect::new(100, 105, 700, 305));
    }

    #[test]
    fn test_ratio_never_lowers_min_height() {
        assert_eq!(effective_min_height(&crop(0, 300, 100, true), 150), 100);
        assert_eq!(effective_min_height(&crop(0, 300, 100, true), 600), 200);
        assert_eq!(effective_min_height(&crop(0, 300, 100, false), 600), 100);
    }

    #[test]
    fn test_effective_min_height_truncates() {
        // 543/640 * 1000 = 848.4375
        assert_eq!(effective_min_height(&CropOption::STANDARD, 1000), 848);
    }

    #[test]
    fn test_crop_image_region() {
        let img = RgbaImage::from_fn(10, 10, |x, y| image::Rgba([x as u8, y as u8, 0, 255]));
        let out = crop_image(&img, PixelRect::new(2, 3, 6, 8));
        assert_eq!(out.dimensions(), (4, 5));
        assert_eq!(out.get_pixel(0, 0), &image::Rgba([2, 3, 0, 255]));
        assert_eq!(out.get_pixel(3, 4), &image::Rgba([5, 7, 0, 255]));
    }
}
