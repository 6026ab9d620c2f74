//! Default map and pin assets.
//!
//! The built-in bundle pairs a Mercator world canvas with a two-layer pin
//! (shadow, then body). It is built at most once per process and shared
//! read-only afterwards. Callers with their own rasters construct an
//! [`AssetBundle`] directly, from encoded bytes, or from files.

use std::path::Path;

use image::{Rgba, RgbaImage};
use once_cell::sync::Lazy;
use tiny_skia::{Color, Paint, PathBuilder, Pixmap, Stroke, Transform};
use tracing::{debug, info};

use pinmap_common::{Coord, CropOption, PinmapError, PinmapResult};
use projection::Mercator;

/// Embedded pin layers, drawn in this order.
const PIN_SHADOW_SVG: &str = include_str!("../assets/pin-shadow.svg");
const PIN_BODY_SVG: &str = include_str!("../assets/pin.svg");

/// Size of the built-in world map.
pub const BUILTIN_MAP_WIDTH: u32 = 1920;
pub const BUILTIN_MAP_HEIGHT: u32 = 1629;

/// Graticule spacing in degrees.
const GRATICULE_STEP: i32 = 30;

const OCEAN: (u8, u8, u8) = (170, 211, 223);
const GRID_LINE: (u8, u8, u8, u8) = (255, 255, 255, 140);
const GRID_LINE_MAJOR: (u8, u8, u8, u8) = (90, 130, 150, 200);

static BUILTIN: Lazy<AssetBundle> = Lazy::new(|| {
    let bundle = AssetBundle::build_builtin()
        .unwrap_or_else(|err| panic!("built-in pinmap assets are unusable: {err}"));
    info!(
        map_width = bundle.map.width(),
        map_height = bundle.map.height(),
        pin_layers = bundle.pin_parts.len(),
        "Initialized built-in assets"
    );
    bundle
});

/// A base map together with the ordered layers of a pin.
#[derive(Debug, Clone)]
pub struct AssetBundle {
    pub map: RgbaImage,
    pub pin_parts: Vec<RgbaImage>,
}

impl AssetBundle {
    pub fn new(map: RgbaImage, pin_parts: Vec<RgbaImage>) -> Self {
        Self { map, pin_parts }
    }

    /// The process-wide built-in bundle.
    ///
    /// # Panics
    ///
    /// On first access, if the embedded assets cannot be rasterized. This
    /// indicates a broken build, not a runtime condition.
    pub fn builtin() -> &'static AssetBundle {
        &BUILTIN
    }

    /// Decode a bundle from encoded images (PNG, JPEG, ...).
    pub fn decode(map: &[u8], pin_parts: &[&[u8]]) -> PinmapResult<Self> {
        let map = decode_image(map)?;
        let pin_parts = pin_parts
            .iter()
            .map(|bytes| decode_image(bytes))
            .collect::<PinmapResult<Vec<_>>>()?;
        Ok(Self { map, pin_parts })
    }

    /// Load a bundle from image files.
    pub fn open<M: AsRef<Path>, P: AsRef<Path>>(map_path: M, pin_paths: &[P]) -> PinmapResult<Self> {
        let map = open_image(map_path.as_ref())?;
        let pin_parts = pin_paths
            .iter()
            .map(|p| open_image(p.as_ref()))
            .collect::<PinmapResult<Vec<_>>>()?;
        Ok(Self { map, pin_parts })
    }

    /// Replace the pin layers, keeping the map.
    pub fn with_pin_parts(mut self, pin_parts: Vec<RgbaImage>) -> Self {
        self.pin_parts = pin_parts;
        self
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.map.dimensions()
    }

    /// Standard crop derived from this bundle's map size.
    pub fn standard_crop(&self) -> CropOption {
        CropOption::standard_for(self.map.width(), self.map.height())
    }

    fn build_builtin() -> PinmapResult<Self> {
        let map = draw_world_canvas(BUILTIN_MAP_WIDTH, BUILTIN_MAP_HEIGHT)?;
        let pin_parts = vec![rasterize_svg(PIN_SHADOW_SVG)?, rasterize_svg(PIN_BODY_SVG)?];
        Ok(Self { map, pin_parts })
    }
}

/// The built-in map.
pub fn default_map() -> &'static RgbaImage {
    &AssetBundle::builtin().map
}

/// The built-in pin layers: shadow, then body.
pub fn default_pin_parts() -> &'static [RgbaImage] {
    &AssetBundle::builtin().pin_parts
}

/// Standard crop for the built-in map.
pub fn standard_crop() -> CropOption {
    AssetBundle::builtin().standard_crop()
}

/// Decode an encoded raster into straight-alpha RGBA.
pub fn decode_image(bytes: &[u8]) -> PinmapResult<RgbaImage> {
    let img = image::load_from_memory(bytes).map_err(|e| PinmapError::Decode(e.to_string()))?;
    Ok(img.to_rgba8())
}

/// Read and decode one image file.
pub fn open_image(path: &Path) -> PinmapResult<RgbaImage> {
    debug!(path = %path.display(), "Loading image");
    let bytes = std::fs::read(path)?;
    decode_image(&bytes)
        .map_err(|e| PinmapError::Decode(format!("{}: {}", path.display(), e)))
}

/// Rasterize an SVG document at its intrinsic size.
pub fn rasterize_svg(svg: &str) -> PinmapResult<RgbaImage> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| PinmapError::Decode(e.to_string()))?;

    let size = tree.size();
    let width = size.width().ceil() as u32;
    let height = size.height().ceil() as u32;

    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        PinmapError::Decode(format!("invalid SVG size {}x{}", width, height))
    })?;

    resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());

    Ok(pixmap_to_image(&pixmap))
}

/// Convert a premultiplied pixmap into a straight-alpha image.
pub fn pixmap_to_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    img
}

/// Draw a Mercator world canvas: ocean fill with a graticule, the equator
/// and prime meridian emphasized.
fn draw_world_canvas(width: u32, height: u32) -> PinmapResult<RgbaImage> {
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        PinmapError::Decode(format!("invalid map size {}x{}", width, height))
    })?;
    pixmap.fill(Color::from_rgba8(OCEAN.0, OCEAN.1, OCEAN.2, 255));

    let (w, h) = (width as f32, height as f32);
    let top_lat = Mercator::max_latitude(width, height);

    let mut lon = -180 + GRATICULE_STEP;
    while lon < 180 {
        let (x, _) = Mercator::project(Coord::new(0.0, lon as f64), width, height);
        let major = lon == 0;
        stroke_line(&mut pixmap, (x as f32, 0.0), (x as f32, h), major);
        lon += GRATICULE_STEP;
    }

    let mut lat = -90 + GRATICULE_STEP;
    while lat < 90 {
        if (lat as f64).abs() < top_lat {
            let (_, y) = Mercator::project(Coord::new(lat as f64, 0.0), width, height);
            stroke_line(&mut pixmap, (0.0, y as f32), (w, y as f32), false);
        }
        lat += GRATICULE_STEP;
    }

    let (_, equator) = Mercator::project(Coord::new(0.0, 0.0), width, height);
    stroke_line(&mut pixmap, (0.0, equator as f32), (w, equator as f32), true);

    Ok(pixmap_to_image(&pixmap))
}

fn stroke_line(pixmap: &mut Pixmap, from: (f32, f32), to: (f32, f32), major: bool) {
    let (r, g, b, a) = if major { GRID_LINE_MAJOR } else { GRID_LINE };

    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: if major { 2.0 } else { 1.0 },
        ..Stroke::default()
    };

    let mut pb = PathBuilder::new();
    pb.move_to(from.0, from.1);
    pb.line_to(to.0, to.1);
    if let Some(path) = pb.finish() {
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}
