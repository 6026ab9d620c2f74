//! Integer pixel rectangles.

use serde::{Deserialize, Serialize};

use crate::coord::PixelPoint;

/// An axis-aligned pixel rectangle with half-open extent
/// `[min_x, max_x) x [min_y, max_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl PixelRect {
    /// Create a rectangle from corner coordinates.
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Rectangle covering a whole `width x height` raster.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, dim(width), dim(height))
    }

    /// Zero-sized rectangle at a single point.
    pub const fn at_point(p: PixelPoint) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    pub fn width(&self) -> i32 {
        self.max_x.saturating_sub(self.min_x)
    }

    pub fn height(&self) -> i32 {
        self.max_y.saturating_sub(self.min_y)
    }

    /// Grow the rectangle so that it also covers `p`.
    pub fn include(&mut self, p: PixelPoint) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Check if a point lies within this rectangle, edges inclusive.
    pub fn contains_point(&self, p: PixelPoint) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Clamp every edge independently into `[0, width] x [0, height]`.
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        let (w, h) = (dim(width), dim(height));
        Self {
            min_x: self.min_x.clamp(0, w),
            min_y: self.min_y.clamp(0, h),
            max_x: self.max_x.clamp(0, w),
            max_y: self.max_y.clamp(0, h),
        }
    }

    /// True when the rectangle is well-formed and lies inside `[0, width] x [0, height]`.
    pub fn is_within(&self, width: u32, height: u32) -> bool {
        self.min_x >= 0
            && self.min_y >= 0
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
            && self.max_x <= dim(width)
            && self.max_y <= dim(height)
    }
}

/// Raster dimension as a signed pixel coordinate.
pub fn dim(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}
