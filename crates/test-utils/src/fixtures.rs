//! Common test fixtures for pinmap tests.

use pinmap_common::Coord;

/// Named real-world locations.
pub mod places {
    use pinmap_common::Coord;

    pub const BAR: Coord = Coord::new(42.1, 19.1);
    pub const MOSCOW: Coord = Coord::new(55.755833, 37.617222);
    pub const ROME: Coord = Coord::new(41.9097306, 12.2558141);
    pub const PERTH: Coord = Coord::new(-31.952222, 115.858889);
    pub const PODGORICA: Coord = Coord::new(42.441286, 19.262892);
    pub const AZORES: Coord = Coord::new(38.615925, -27.226598);
    pub const MILAN: Coord = Coord::new(45.4628329, 9.1076924);
    pub const FLORENCE: Coord = Coord::new(43.7800607, 11.170928);
    pub const SAN_FRANCISCO: Coord = Coord::new(37.7775, -122.416389);
}

/// The nine places, in a fixed order with San Francisco last.
pub fn nine_places() -> Vec<Coord> {
    vec![
        places::BAR,
        places::MOSCOW,
        places::ROME,
        places::PERTH,
        places::PODGORICA,
        places::AZORES,
        places::MILAN,
        places::FLORENCE,
        places::SAN_FRANCISCO,
    ]
}

/// Common map raster sizes.
pub mod maps {
    /// Size of the built-in world map.
    pub const BUILTIN: (u32, u32) = (1920, 1629);

    /// A small map that keeps compositing tests fast.
    pub const SMALL: (u32, u32) = (360, 300);

    /// Square map, handy for hand-computed projections.
    pub const SQUARE: (u32, u32) = (720, 720);
}
