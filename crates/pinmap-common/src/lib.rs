//! Common types shared across the pinmap crates and services.

pub mod coord;
pub mod crop;
pub mod error;
pub mod rect;

pub use coord::{Coord, PixelPoint};
pub use crop::CropOption;
pub use error::{PinmapError, PinmapResult};
pub use rect::PixelRect;
