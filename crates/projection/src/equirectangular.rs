//! Equirectangular (plate carrée) projection.

use pinmap_common::{Coord, PixelPoint};

use crate::Projection;

/// Linear lat/lon mapping: longitude -180..180 across the width,
/// latitude 90..-90 down the height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Equirectangular;

impl Projection for Equirectangular {
    fn convert(&self, coord: Coord, map_width: u32, map_height: u32) -> PixelPoint {
        let fx = (coord.lon + 180.0) * (map_width as f64 / 360.0);
        let fy = (90.0 - coord.lat) * (map_height as f64 / 180.0);
        PixelPoint::from_f64(fx, fy)
    }

    fn name(&self) -> &'static str {
        "equirectangular"
    }
}
