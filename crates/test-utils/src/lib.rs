//! Shared test utilities for the pinmap workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Named real-world coordinates
//! - Synthetic map and pin rasters
//! - Approximate-equality assertion macros
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, solid_image};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Asserts that a pixel point is within `tolerance` pixels of `(x, y)` on both axes.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_pixel_near;
///
/// assert_pixel_near!(point, (960, 815), 1);
/// ```
#[macro_export]
macro_rules! assert_pixel_near {
    ($point:expr, ($x:expr, $y:expr), $tolerance:expr) => {{
        let p = $point;
        let dx = (p.x as i64 - $x as i64).abs();
        let dy = (p.y as i64 - $y as i64).abs();
        if dx > $tolerance as i64 || dy > $tolerance as i64 {
            panic!(
                "assertion failed: pixel {:?} not within {} of ({}, {})",
                p, $tolerance, $x, $y
            );
        }
    }};
}
