//! Tight pixel bounds around projected pins.

use pinmap_common::{PixelPoint, PixelRect};

/// Smallest rectangle containing every point, or `None` when there are none.
///
/// A single point yields a zero-sized rectangle.
pub fn bounds_of(points: &[PixelPoint]) -> Option<PixelRect> {
    let (first, rest) = points.split_first()?;
    let mut rect = PixelRect::at_point(*first);
    for p in rest {
        rect.include(*p);
    }
    Some(rect)
}
