//! Crop configuration for pin maps.

use serde::{Deserialize, Serialize};

use crate::error::{PinmapError, PinmapResult};

/// Options for cropping a rendered map around its pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropOption {
    /// Minimum distance in pixels from any pin to the crop boundary.
    #[serde(default)]
    pub bound: u32,

    /// Minimum width of the cropped image.
    pub min_width: u32,

    /// Minimum height of the cropped image.
    pub min_height: u32,

    /// Keep the height at least `width * min_height / min_width`.
    ///
    /// Requires `min_height < min_width`.
    #[serde(default)]
    pub preserve_ratio: bool,
}

impl CropOption {
    /// Crop tuned for the built-in 1920x1629 world map.
    pub const STANDARD: CropOption = CropOption {
        bound: 100,
        min_width: 640,
        min_height: 543,
        preserve_ratio: true,
    };

    /// Standard crop for an arbitrary map: a third of each dimension.
    pub fn standard_for(map_width: u32, map_height: u32) -> Self {
        Self {
            bound: 100,
            min_width: (map_width / 3).max(1),
            min_height: (map_height / 3).max(1),
            preserve_ratio: true,
        }
    }

    /// Reject options that would produce degenerate or distorted crops.
    pub fn validate(&self) -> PinmapResult<()> {
        if self.min_width == 0 {
            return Err(PinmapError::InvalidCrop {
                field: "min_width",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.min_height == 0 {
            return Err(PinmapError::InvalidCrop {
                field: "min_height",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.preserve_ratio && self.min_height >= self.min_width {
            return Err(PinmapError::InvalidCrop {
                field: "min_height",
                message: format!(
                    "must be less than min_width ({}) when preserve_ratio is set, got {}",
                    self.min_width, self.min_height
                ),
            });
        }
        Ok(())
    }

    /// Height ratio applied when `preserve_ratio` is set.
    pub fn ratio(&self) -> f64 {
        self.min_height as f64 / self.min_width as f64
    }

    /// Load a crop option from a JSON string.
    pub fn from_json(json_str: &str) -> PinmapResult<Self> {
        let crop: CropOption = serde_json::from_str(json_str)?;
        crop.validate()?;
        Ok(crop)
    }
}
