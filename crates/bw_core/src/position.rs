//! Integer map coordinates.
//!
//! The engine exposes three granularities:
//! - [`Position`]: pixels
//! - [`WalkPosition`]: 8×8 pixel walk cells
//! - [`TilePosition`]: 32×32 pixel build tiles
//!
//! All rule logic runs on integers. Distances that need a square root use
//! [`integer_sqrt`] so results are identical on every platform.

use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Pixels per build tile edge.
pub const TILE_SIZE: i32 = 32;

/// Pixels per walk cell edge.
pub const WALK_SIZE: i32 = 8;

macro_rules! coordinate_type {
    ($name:ident, $scale:expr, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            Default,
            Serialize,
            Deserialize,
        )]
        pub struct $name {
            /// Horizontal coordinate.
            pub x: i32,
            /// Vertical coordinate.
            pub y: i32,
        }

        impl $name {
            /// Create a new coordinate.
            #[must_use]
            pub const fn new(x: i32, y: i32) -> Self {
                Self { x, y }
            }

            /// Origin.
            pub const ORIGIN: Self = Self { x: 0, y: 0 };

            /// Check the coordinate lies on a map of `width` × `height` tiles.
            #[must_use]
            pub const fn is_within(self, width_tiles: u16, height_tiles: u16) -> bool {
                let scale = TILE_SIZE / $scale;
                self.x >= 0
                    && self.y >= 0
                    && self.x < width_tiles as i32 * scale
                    && self.y < height_tiles as i32 * scale
            }

            /// Squared Euclidean distance.
            #[must_use]
            pub fn distance_squared(self, other: Self) -> i64 {
                let dx = i64::from(self.x - other.x);
                let dy = i64::from(self.y - other.y);
                dx * dx + dy * dy
            }

            /// Euclidean distance, truncated to an integer.
            #[must_use]
            pub fn distance(self, other: Self) -> i32 {
                integer_sqrt(self.distance_squared(other) as u64) as i32
            }
        }

        impl Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self::Output {
                Self::new(self.x + rhs.x, self.y + rhs.y)
            }
        }

        impl Sub for $name {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self::Output {
                Self::new(self.x - rhs.x, self.y - rhs.y)
            }
        }

        impl Mul<i32> for $name {
            type Output = Self;

            fn mul(self, rhs: i32) -> Self::Output {
                Self::new(self.x * rhs, self.y * rhs)
            }
        }

        impl Div<i32> for $name {
            type Output = Self;

            fn div(self, rhs: i32) -> Self::Output {
                Self::new(self.x / rhs, self.y / rhs)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "({}, {})", self.x, self.y)
            }
        }
    };
}

coordinate_type!(Position, 1, "Pixel coordinate on the map.");
coordinate_type!(WalkPosition, WALK_SIZE, "Walk-cell coordinate (8 pixels).");
coordinate_type!(TilePosition, TILE_SIZE, "Build-tile coordinate (32 pixels).");

impl Position {
    /// The tile containing this pixel.
    #[must_use]
    pub const fn to_tile_position(self) -> TilePosition {
        TilePosition::new(self.x.div_euclid(TILE_SIZE), self.y.div_euclid(TILE_SIZE))
    }

    /// The walk cell containing this pixel.
    #[must_use]
    pub const fn to_walk_position(self) -> WalkPosition {
        WalkPosition::new(self.x.div_euclid(WALK_SIZE), self.y.div_euclid(WALK_SIZE))
    }

    /// The engine's fast octagonal distance approximation.
    ///
    /// Never off by more than a few percent from the Euclidean distance and
    /// uses only shifts and adds.
    #[must_use]
    pub fn approx_distance(self, other: Self) -> i32 {
        let mut min = (self.x - other.x).abs();
        let mut max = (self.y - other.y).abs();
        if max < min {
            std::mem::swap(&mut min, &mut max);
        }
        if min < (max >> 2) {
            return max;
        }
        let min_calc = (3 * min) >> 3;
        (min_calc >> 5) + min_calc + max - (max >> 4) - (max >> 6)
    }
}

impl WalkPosition {
    /// Top-left pixel of this walk cell.
    #[must_use]
    pub const fn to_position(self) -> Position {
        Position::new(self.x * WALK_SIZE, self.y * WALK_SIZE)
    }

    /// The tile containing this walk cell.
    #[must_use]
    pub const fn to_tile_position(self) -> TilePosition {
        self.to_position().to_tile_position()
    }
}

impl TilePosition {
    /// Top-left pixel of this tile.
    #[must_use]
    pub const fn to_position(self) -> Position {
        Position::new(self.x * TILE_SIZE, self.y * TILE_SIZE)
    }

    /// Center pixel of this tile.
    #[must_use]
    pub const fn center(self) -> Position {
        Position::new(
            self.x * TILE_SIZE + TILE_SIZE / 2,
            self.y * TILE_SIZE + TILE_SIZE / 2,
        )
    }
}

/// Integer square root (floor), computed by binary search.
#[must_use]
pub fn integer_sqrt(value: u64) -> u64 {
    if value < 2 {
        return value;
    }

    let mut low: u64 = 1;
    let mut high: u64 = value.min(u64::from(u32::MAX));

    while low <= high {
        let mid = low + (high - low) / 2;
        match mid.checked_mul(mid) {
            Some(sq) if sq <= value => low = mid + 1,
            _ => high = mid - 1,
        }
    }

    high
}
