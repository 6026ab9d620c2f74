//! Pin map rendering.
//!
//! Projects coordinates onto a world map, paints pin layers over it in a
//! stable order, and optionally crops the result around the pins:
//! - Paint order (`order`)
//! - Alpha compositing of anchored pin parts (`composite`)
//! - Pin bounds and crop resolution (`bounds`, `crop`)
//! - Built-in map and pin (`assets`)
//! - PNG output (`png`)

pub mod assets;
pub mod bounds;
pub mod composite;
pub mod crop;
pub mod order;
pub mod pins;
pub mod png;

pub use assets::AssetBundle;
pub use pins::{map_pins, pins, pins_with, place_pins, plan_pins, PinLayout};
