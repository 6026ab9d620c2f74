//! Paint order for pins.
//!
//! Pins lower on the map are painted later so they overlap the pins above
//! them, which reads as nearer pins covering farther ones.

use std::cmp::Ordering;

use pinmap_common::PixelPoint;

/// Comparator for paint order: ascending y, then ascending x.
///
/// Points with identical coordinates compare equal; their relative order
/// after sorting is unspecified.
pub fn paint_cmp(a: &PixelPoint, b: &PixelPoint) -> Ordering {
    a.y.cmp(&b.y).then_with(|| a.x.cmp(&b.x))
}

/// Sort points in place into paint order.
pub fn sort_for_painting(points: &mut [PixelPoint]) {
    points.sort_unstable_by(paint_cmp);
}

/// Indices into `points` listed in paint order.
pub fn paint_order(points: &[PixelPoint]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_unstable_by(|&i, &j| paint_cmp(&points[i], &points[j]));
    order
}
