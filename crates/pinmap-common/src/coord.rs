//! Geographic coordinates and projected pixel positions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PinmapError;

/// A geographic coordinate in decimal degrees.
///
/// Latitude is expected in [-90, 90] and longitude in [-180, 180], but values
/// outside those ranges are not rejected; projections are total over `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    #[serde(alias = "latitude")]
    pub lat: f64,
    #[serde(alias = "longitude", alias = "lng", alias = "long")]
    pub lon: f64,
}

impl Coord {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Parses `"lat,lon"`, e.g. `"55.755833,37.617222"`.
impl FromStr for Coord {
    type Err = PinmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(PinmapError::InvalidCoord(format!(
                "{s}. Expected 'lat,lon'"
            )));
        }

        let lat: f64 = parts[0]
            .parse()
            .map_err(|_| PinmapError::InvalidCoord(format!("bad latitude '{}'", parts[0])))?;
        let lon: f64 = parts[1]
            .parse()
            .map_err(|_| PinmapError::InvalidCoord(format!("bad longitude '{}'", parts[1])))?;

        Ok(Self { lat, lon })
    }
}

/// An integer pixel position on a map raster.
///
/// Points may lie outside the raster (e.g. near the poles); consumers clip or
/// clamp them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Build a point from floating pixel coordinates, rounding half away from
    /// zero and saturating at the `i32` range. NaN maps to 0.
    pub fn from_f64(x: f64, y: f64) -> Self {
        Self {
            x: x.round() as i32,
            y: y.round() as i32,
        }
    }
}
