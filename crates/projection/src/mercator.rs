//! Mercator projection.
//!
//! The map is assumed to span longitudes -180..180 across its full width and
//! to be vertically centered on the equator. The vertical scale follows from
//! the width, so the map height only sets how far toward the poles it reaches.

use std::f64::consts::PI;

use pinmap_common::{Coord, PixelPoint};

use crate::Projection;

/// Spherical Mercator projection onto a world map raster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mercator;

impl Mercator {
    /// Mercator ordinate `ln(tan(π/4 + φ/2))` for a latitude in degrees.
    ///
    /// Diverges to ±∞ at the poles.
    pub fn lat_to_n(lat_deg: f64) -> f64 {
        let lat_rad = lat_deg * PI / 180.0;
        (PI / 4.0 + lat_rad / 2.0).tan().ln()
    }

    /// Inverse of [`Mercator::lat_to_n`], in degrees.
    pub fn n_to_lat(n: f64) -> f64 {
        n.sinh().atan() * 180.0 / PI
    }

    /// Unrounded pixel position.
    pub fn project(coord: Coord, map_width: u32, map_height: u32) -> (f64, f64) {
        let mw = map_width as f64;
        let mh = map_height as f64;
        let fx = (coord.lon + 180.0) * (mw / 360.0);
        let fy = (mh / 2.0) - (mw * Self::lat_to_n(coord.lat) / (2.0 * PI));
        (fx, fy)
    }

    /// Latitude shown at the top edge of a map of the given size.
    pub fn max_latitude(map_width: u32, map_height: u32) -> f64 {
        if map_width == 0 {
            return 90.0;
        }
        let n = PI * map_height as f64 / map_width as f64;
        Self::n_to_lat(n)
    }
}

impl Projection for Mercator {
    fn convert(&self, coord: Coord, map_width: u32, map_height: u32) -> PixelPoint {
        let (fx, fy) = Self::project(coord, map_width, map_height);
        PixelPoint::from_f64(fx, fy)
    }

    fn name(&self) -> &'static str {
        "mercator"
    }
}
