//! Public entry points: place pins on a map and optionally crop around them.

use image::RgbaImage;
use serde::Serialize;
use tracing::{debug, warn};

use pinmap_common::{Coord, CropOption, PinmapError, PinmapResult, PixelPoint, PixelRect};
use projection::{Mercator, Projection};

use crate::assets::AssetBundle;
use crate::bounds::bounds_of;
use crate::composite::compose;
use crate::crop::{crop_image, resolve_crop};
use crate::order::sort_for_painting;

/// Geometry of a pin map, computed without touching any pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PinLayout {
    /// Projected pins in paint order.
    pub points: Vec<PixelPoint>,
    /// Tight bounds of `points`, `None` when there are no pins.
    pub bounds: Option<PixelRect>,
    /// Final crop rectangle, `None` when no crop was requested.
    pub crop: Option<PixelRect>,
    /// Coordinates skipped because they were not finite.
    pub skipped: usize,
}

/// Project, order, bound and crop-resolve `coords` for a map of the given size.
///
/// Non-finite coordinates are skipped. Requesting a crop with no usable
/// coordinates fails with [`PinmapError::NoPins`].
pub fn plan_pins(
    projection: &dyn Projection,
    map_width: u32,
    map_height: u32,
    coords: &[Coord],
    crop: Option<CropOption>,
) -> PinmapResult<PinLayout> {
    if let Some(crop) = &crop {
        crop.validate()?;
    }

    let mut skipped = 0;
    let mut points = Vec::with_capacity(coords.len());
    for (index, coord) in coords.iter().enumerate() {
        if !coord.is_finite() {
            warn!(index, lat = coord.lat, lon = coord.lon, "Skipping non-finite coordinate");
            skipped += 1;
            continue;
        }
        points.push(projection.convert(*coord, map_width, map_height));
    }

    sort_for_painting(&mut points);
    let bounds = bounds_of(&points);

    let crop_rect = match (crop, bounds) {
        (None, _) => None,
        (Some(_), None) => return Err(PinmapError::NoPins),
        (Some(crop), Some(bounds)) => Some(resolve_crop(bounds, &crop, map_width, map_height)),
    };

    debug!(
        projection = projection.name(),
        map_width,
        map_height,
        pins = points.len(),
        skipped,
        bounds = ?bounds,
        crop = ?crop_rect,
        "Planned pin layout"
    );

    Ok(PinLayout {
        points,
        bounds,
        crop: crop_rect,
        skipped,
    })
}

/// Render `coords` as pins on `world_map` using `projection`.
///
/// `world_map` must be drawn in `projection`. `pin_parts` are drawn in order
/// across all pins, each anchored at its bottom center. With `crop = None` the
/// result has the map's size; otherwise it is the resolved crop region.
pub fn place_pins(
    projection: &dyn Projection,
    world_map: &RgbaImage,
    pin_parts: &[RgbaImage],
    coords: &[Coord],
    crop: Option<CropOption>,
) -> PinmapResult<RgbaImage> {
    let (map_width, map_height) = world_map.dimensions();
    let layout = plan_pins(projection, map_width, map_height, coords, crop)?;

    let composed = compose(world_map, pin_parts, &layout.points);

    Ok(match layout.crop {
        Some(rect) => crop_image(&composed, rect),
        None => composed,
    })
}

/// Like [`place_pins`] with the Mercator projection.
pub fn map_pins(
    world_map: &RgbaImage,
    pin_parts: &[RgbaImage],
    coords: &[Coord],
    crop: Option<CropOption>,
) -> PinmapResult<RgbaImage> {
    place_pins(&Mercator, world_map, pin_parts, coords, crop)
}

/// Like [`map_pins`] with the built-in map and pin.
pub fn pins(coords: &[Coord], crop: Option<CropOption>) -> PinmapResult<RgbaImage> {
    pins_with(AssetBundle::builtin(), coords, crop)
}

/// Like [`map_pins`] with the map and pin of `assets`.
pub fn pins_with(
    assets: &AssetBundle,
    coords: &[Coord],
    crop: Option<CropOption>,
) -> PinmapResult<RgbaImage> {
    map_pins(&assets.map, &assets.pin_parts, coords, crop)
}
