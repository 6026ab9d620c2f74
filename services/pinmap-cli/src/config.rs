//! Command-line and environment configuration.
//!
//! Flags take precedence over environment variables (`PINMAP_*`), which may
//! come from a `.env` file.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use pinmap_common::{Coord, CropOption};
use projection::ProjectionKind;

#[derive(Parser, Debug)]
#[command(name = "pinmap")]
#[command(about = "Mark coordinates as pins on a world map")]
pub struct Args {
    /// JSON or YAML file with a list of coordinates
    #[arg(short, long, env = "PINMAP_COORDS")]
    pub coords: Option<PathBuf>,

    /// A single pin as "LAT,LON" (repeatable)
    #[arg(short, long = "pin", allow_hyphen_values = true)]
    pub pins: Vec<Coord>,

    /// World map raster (defaults to the built-in map)
    #[arg(long, env = "PINMAP_MAP_PATH")]
    pub map: Option<PathBuf>,

    /// Pin layer rasters, bottom layer first (defaults to the built-in pin)
    #[arg(long = "pin-part", env = "PINMAP_PIN_PARTS", value_delimiter = ',')]
    pub pin_parts: Vec<PathBuf>,

    /// Projection the map is drawn in
    #[arg(long, default_value = "mercator")]
    pub projection: ProjectionKind,

    /// Crop preset
    #[arg(long, value_enum, default_value_t = CropPreset::None)]
    pub crop: CropPreset,

    /// JSON or YAML crop option file, used instead of a preset
    #[arg(long, conflicts_with = "crop")]
    pub crop_file: Option<PathBuf>,

    /// Override the crop margin in pixels
    #[arg(long)]
    pub bound: Option<u32>,

    /// Override the minimum crop width
    #[arg(long)]
    pub min_width: Option<u32>,

    /// Override the minimum crop height
    #[arg(long)]
    pub min_height: Option<u32>,

    /// Do not scale the minimum height with the crop width
    #[arg(long)]
    pub no_preserve_ratio: bool,

    /// Output PNG path
    #[arg(short, long, env = "PINMAP_OUTPUT", default_value = "pins.png")]
    pub output: PathBuf,

    /// Print the computed layout as JSON instead of rendering
    #[arg(long)]
    pub layout: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropPreset {
    /// Keep the whole map, unless a crop field is overridden
    None,
    /// Standard crop for the map's size
    Standard,
}

/// Crop settings before the map size is known.
#[derive(Debug, Clone, PartialEq)]
pub enum CropMode {
    None,
    /// Standard crop for the map, with per-field overrides.
    Standard(CropOverrides),
    /// Fully specified crop.
    Fixed(CropOption),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CropOverrides {
    pub bound: Option<u32>,
    pub min_width: Option<u32>,
    pub min_height: Option<u32>,
    pub preserve_ratio: Option<bool>,
}

impl CropOverrides {
    fn from_args(args: &Args) -> Self {
        Self {
            bound: args.bound,
            min_width: args.min_width,
            min_height: args.min_height,
            preserve_ratio: args.no_preserve_ratio.then_some(false),
        }
    }

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply(&self, mut crop: CropOption) -> CropOption {
        if let Some(bound) = self.bound {
            crop.bound = bound;
        }
        if let Some(min_width) = self.min_width {
            crop.min_width = min_width;
        }
        if let Some(min_height) = self.min_height {
            crop.min_height = min_height;
        }
        if let Some(preserve_ratio) = self.preserve_ratio {
            crop.preserve_ratio = preserve_ratio;
        }
        crop
    }
}

impl CropMode {
    /// Concrete crop option for a map of the given size.
    pub fn for_map(&self, map_width: u32, map_height: u32) -> Option<CropOption> {
        match self {
            CropMode::None => None,
            CropMode::Standard(overrides) => {
                Some(overrides.apply(CropOption::standard_for(map_width, map_height)))
            }
            CropMode::Fixed(crop) => Some(*crop),
        }
    }
}

/// Fully resolved settings for one render.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub coords: Vec<Coord>,
    pub map_path: Option<PathBuf>,
    pub pin_part_paths: Vec<PathBuf>,
    pub projection: ProjectionKind,
    pub crop: CropMode,
    pub output: PathBuf,
}

impl RenderConfig {
    pub fn resolve(args: &Args) -> Result<Self> {
        let mut coords = match &args.coords {
            Some(path) => load_coords(path)?,
            None => Vec::new(),
        };
        coords.extend(args.pins.iter().copied());

        if coords.is_empty() {
            bail!("no coordinates given; use --pin LAT,LON or --coords FILE");
        }

        let overrides = CropOverrides::from_args(args);
        let crop = match (&args.crop_file, args.crop) {
            (Some(path), _) => CropMode::Fixed(overrides.apply(load_crop(path)?)),
            (None, CropPreset::None) if overrides.is_empty() => CropMode::None,
            (None, _) => CropMode::Standard(overrides),
        };

        Ok(Self {
            coords,
            map_path: args.map.clone(),
            pin_part_paths: args.pin_parts.clone(),
            projection: args.projection,
            crop,
            output: args.output.clone(),
        })
    }
}

/// Coordinates either as a bare list or under a `coords` key.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CoordsFile {
    List(Vec<Coord>),
    Keyed { coords: Vec<Coord> },
}

impl CoordsFile {
    fn into_coords(self) -> Vec<Coord> {
        match self {
            CoordsFile::List(coords) | CoordsFile::Keyed { coords } => coords,
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn parse_file<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    if is_yaml(path) {
        serde_yaml::from_str(&content).with_context(|| format!("parsing YAML {}", path.display()))
    } else {
        serde_json::from_str(&content).with_context(|| format!("parsing JSON {}", path.display()))
    }
}

/// Load a coordinate list from a JSON or YAML file.
pub fn load_coords(path: &Path) -> Result<Vec<Coord>> {
    let file: CoordsFile = parse_file(path)?;
    Ok(file.into_coords())
}

/// Load a crop option from a JSON or YAML file.
pub fn load_crop(path: &Path) -> Result<CropOption> {
    let crop: CropOption = parse_file(path)?;
    crop.validate()
        .with_context(|| format!("invalid crop in {}", path.display()))?;
    Ok(crop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["pinmap", "--pin", "37.7775,-122.416389"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    fn write_temp(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_negative_coordinates_parse() {
        let args = Args::parse_from(["pinmap", "--pin", "-31.952222,115.858889"]);
        assert_eq!(args.pins, vec![Coord::new(-31.952222, 115.858889)]);
    }

    #[test]
    fn test_default_is_uncropped_mercator() {
        let config = RenderConfig::resolve(&args(&[])).unwrap();
        assert_eq!(config.crop, CropMode::None);
        assert_eq!(config.projection, ProjectionKind::Mercator);
        assert_eq!(config.coords.len(), 1);
    }

    #[test]
    fn test_standard_crop_for_map() {
        let config = RenderConfig::resolve(&args(&["--crop", "standard"])).unwrap();
        assert_eq!(config.crop.for_map(1920, 1629), Some(CropOption::STANDARD));
    }

    #[test]
    fn test_unknown_crop_preset_is_rejected() {
        assert!(Args::try_parse_from(["pinmap", "--pin", "1,2", "--crop", "tight"]).is_err());
        assert!(Args::try_parse_from([
            "pinmap", "--pin", "1,2", "--crop", "standard", "--crop-file", "crop.json"
        ])
        .is_err());
    }

    #[test]
    fn test_overrides_imply_standard_crop() {
        let config =
            RenderConfig::resolve(&args(&["--bound", "20", "--no-preserve-ratio"])).unwrap();
        let crop = config.crop.for_map(1920, 1629).unwrap();
        assert_eq!(crop.bound, 20);
        assert_eq!(crop.min_width, 640);
        assert!(!crop.preserve_ratio);
    }

    #[test]
    fn test_no_coordinates_is_error() {
        let args = Args::parse_from(["pinmap"]);
        assert!(RenderConfig::resolve(&args).is_err());
    }

    #[test]
    fn test_load_coords_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let json = write_temp(
            &dir,
            "places.json",
            r#"[{"lat": 55.755833, "lon": 37.617222}, {"latitude": 42.1, "longitude": 19.1}]"#,
        );
        assert_eq!(load_coords(&json).unwrap().len(), 2);

        let yaml = write_temp(
            &dir,
            "places.yaml",
            "coords:\n  - lat: 41.9097306\n    lon: 12.2558141\n",
        );
        assert_eq!(load_coords(&yaml).unwrap(), vec![Coord::new(41.9097306, 12.2558141)]);
    }

    #[test]
    fn test_coords_file_and_pins_combine() {
        let dir = tempfile::tempdir().unwrap();
        let json = write_temp(&dir, "one.json", r#"[{"lat": 1.0, "lon": 2.0}]"#);
        let config =
            RenderConfig::resolve(&args(&["--coords", json.to_str().unwrap()])).unwrap();
        assert_eq!(config.coords, vec![Coord::new(1.0, 2.0), Coord::new(37.7775, -122.416389)]);
    }

    #[test]
    fn test_crop_file_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write_temp(
            &dir,
            "crop.json",
            r#"{"bound": 0, "min_width": 100, "min_height": 200, "preserve_ratio": true}"#,
        );
        assert!(RenderConfig::resolve(&args(&["--crop-file", bad.to_str().unwrap()])).is_err());

        let good = write_temp(&dir, "crop.yml", "bound: 5\nmin_width: 300\nmin_height: 200\n");
        let config = RenderConfig::resolve(&args(&["--crop-file", good.to_str().unwrap()])).unwrap();
        assert_eq!(
            config.crop.for_map(10, 10),
            Some(CropOption {
                bound: 5,
                min_width: 300,
                min_height: 200,
                preserve_ratio: false,
            })
        );
    }
}
