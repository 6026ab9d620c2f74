//! Map projections from geographic coordinates to raster pixels.
//!
//! Implements projections from scratch without external dependencies.

pub mod equirectangular;
pub mod mercator;

use pinmap_common::{Coord, PixelPoint};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use equirectangular::Equirectangular;
pub use mercator::Mercator;

/// Converts geographic coordinates into pixel positions on a map raster
/// drawn in the same projection.
///
/// Implementations are total over the `f64` domain: out-of-range input
/// produces out-of-range (saturated) pixels, never a panic.
pub trait Projection: Send + Sync {
    /// Convert a coordinate into a point on a `map_width x map_height` map.
    fn convert(&self, coord: Coord, map_width: u32, map_height: u32) -> PixelPoint;

    /// Short lowercase identifier.
    fn name(&self) -> &'static str;
}

impl<P: Projection + ?Sized> Projection for &P {
    fn convert(&self, coord: Coord, map_width: u32, map_height: u32) -> PixelPoint {
        (**self).convert(coord, map_width, map_height)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<P: Projection + ?Sized> Projection for Box<P> {
    fn convert(&self, coord: Coord, map_width: u32, map_height: u32) -> PixelPoint {
        (**self).convert(coord, map_width, map_height)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Built-in projections, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    #[default]
    Mercator,
    Equirectangular,
}

impl ProjectionKind {
    /// Static instance of the selected projection.
    pub fn projection(&self) -> &'static dyn Projection {
        match self {
            ProjectionKind::Mercator => &Mercator,
            ProjectionKind::Equirectangular => &Equirectangular,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("Unknown projection: {0}. Expected 'mercator' or 'equirectangular'")]
    Unknown(String),
}

impl FromStr for ProjectionKind {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mercator" => Ok(ProjectionKind::Mercator),
            "equirectangular" | "plate-carree" | "platecarree" => {
                Ok(ProjectionKind::Equirectangular)
            }
            _ => Err(ProjectionError::Unknown(s.to_string())),
        }
    }
}
