//! Tests for the Mercator projection against known map positions.

use pinmap_common::Coord;
use projection::{Mercator, Projection};
use test_utils::{assert_approx_eq, assert_pixel_near, maps, places};

// ============================================================================
// Boundary tests
// ============================================================================

#[test]
fn test_west_edge_on_equator() {
    for &(w, h) in &[maps::BUILTIN, maps::SMALL, maps::SQUARE] {
        let p = Mercator.convert(Coord::new(0.0, -180.0), w, h);
        assert_eq!(p.x, 0, "map {}x{}", w, h);
        assert_pixel_near!(p, (0, h / 2), 1);
    }
}

#[test]
fn test_east_edge_is_map_width() {
    for &(w, h) in &[maps::BUILTIN, maps::SMALL, maps::SQUARE] {
        for lat in [-60.0, 0.0, 45.0] {
            let p = Mercator.convert(Coord::new(lat, 180.0), w, h);
            assert_eq!(p.x, w as i32, "map {}x{} lat {}", w, h, lat);
        }
    }
}

#[test]
fn test_max_latitude_is_top_edge() {
    for &(w, h) in &[maps::BUILTIN, maps::SMALL, maps::SQUARE] {
        let lat = Mercator::max_latitude(w, h);
        let (_, y) = Mercator::project(Coord::new(lat, 0.0), w, h);
        assert_approx_eq!(y, 0.0, 1e-6);
        let (_, y) = Mercator::project(Coord::new(-lat, 0.0), w, h);
        assert_approx_eq!(y, h as f64, 1e-6);
    }
}

#[test]
fn test_monotonic_in_longitude() {
    let (w, h) = maps::BUILTIN;
    for lat in [-70.0, -10.0, 0.0, 33.3, 80.0] {
        let mut prev = i32::MIN;
        let mut lon = -180.0;
        while lon <= 180.0 {
            let p = Mercator.convert(Coord::new(lat, lon), w, h);
            assert!(p.x >= prev, "x decreased at lat {} lon {}", lat, lon);
            prev = p.x;
            lon += 0.7;
        }
    }
}

#[test]
fn test_north_is_up() {
    let (w, h) = maps::BUILTIN;
    let moscow = Mercator.convert(places::MOSCOW, w, h);
    let rome = Mercator.convert(places::ROME, w, h);
    let perth = Mercator.convert(places::PERTH, w, h);
    assert!(moscow.y < rome.y);
    assert!(rome.y < perth.y);
}

#[test]
fn test_hemispheres_are_symmetric() {
    let (w, h) = maps::SQUARE;
    let north = Mercator.convert(Coord::new(40.0, 0.0), w, h);
    let south = Mercator.convert(Coord::new(-40.0, 0.0), w, h);
    let center = h as i32 / 2;
    assert!(((center - north.y) - (south.y - center)).abs() <= 1);
}

// ============================================================================
// Known positions
// ============================================================================

#[test]
fn test_san_francisco_builtin_map() {
    let (w, h) = maps::BUILTIN;
    let (fx, fy) = Mercator::project(places::SAN_FRANCISCO, w, h);
    let p = Mercator.convert(places::SAN_FRANCISCO, w, h);
    assert_eq!(p.x, fx.round() as i32);
    assert_eq!(p.y, fy.round() as i32);
    // lon -122.42 is about 16% across the map
    assert_pixel_near!(p, (307, 597), 1);
}

#[test]
fn test_non_finite_input_does_not_panic() {
    let (w, h) = maps::SMALL;
    let _ = Mercator.convert(Coord::new(f64::NAN, 0.0), w, h);
    let _ = Mercator.convert(Coord::new(0.0, f64::INFINITY), w, h);
}
