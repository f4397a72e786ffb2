//! Axial hex coordinates with optional east-west wrapping
//!
//! Coordinates use the axial (x, z) system; the third cube coordinate is
//! derived as y = -x - z, so x + y + z = 0 always holds. Coordinates are
//! plain values: positions outside the live grid are representable and
//! simply resolve to "no cell" when converted to an index.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::HexDirection;

/// Axial hex coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexCoordinates {
    x: i32,
    z: i32,
}

impl HexCoordinates {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Derived cube coordinate; x + y + z = 0
    #[inline]
    pub fn y(&self) -> i32 {
        -self.x - self.z
    }

    #[inline]
    pub fn z(&self) -> i32 {
        self.z
    }

    /// Convert rectangular offset coordinates (column, row) to axial
    pub fn from_offset(x: i32, z: i32) -> Self {
        Self { x: x - z / 2, z }
    }

    /// Offset column of this coordinate
    #[inline]
    pub fn offset_x(&self) -> i32 {
        self.x + self.z / 2
    }

    /// Offset row of this coordinate
    #[inline]
    pub fn offset_z(&self) -> i32 {
        self.z
    }

    /// The adjacent coordinate across the given edge
    pub fn step(&self, direction: HexDirection) -> Self {
        match direction {
            HexDirection::NE => Self::new(self.x, self.z + 1),
            HexDirection::E => Self::new(self.x + 1, self.z),
            HexDirection::SE => Self::new(self.x + 1, self.z - 1),
            HexDirection::SW => Self::new(self.x, self.z - 1),
            HexDirection::W => Self::new(self.x - 1, self.z),
            HexDirection::NW => Self::new(self.x - 1, self.z + 1),
        }
    }

    /// Step, then normalize x into the wrapped band when the map wraps
    /// east-west. With `wrap_size` 0 this is a plain [`step`](Self::step).
    pub fn wrapped_step(&self, direction: HexDirection, wrap_size: i32) -> Self {
        self.step(direction).wrapped(wrap_size)
    }

    /// Normalize so the offset column lands in `0..wrap_size`.
    ///
    /// No-op when wrapping is disabled (`wrap_size` 0) or the coordinate is
    /// already in band.
    pub fn wrapped(&self, wrap_size: i32) -> Self {
        if wrap_size <= 0 {
            return *self;
        }
        let offset_x = self.offset_x();
        if offset_x < 0 {
            Self::new(self.x + wrap_size, self.z)
        } else if offset_x >= wrap_size {
            Self::new(self.x - wrap_size, self.z)
        } else {
            *self
        }
    }

    fn raw_distance_to(&self, other: Self) -> i32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y() - other.y()).abs();
        let dz = (self.z - other.z).abs();
        (dx + dy + dz) / 2
    }

    /// Hex-step distance, taking the shorter way around on wrapping maps.
    ///
    /// `wrap_size` is the map's cell count along X, or 0 when the map does
    /// not wrap.
    pub fn distance_to(&self, other: Self, wrap_size: i32) -> i32 {
        let mut distance = self.raw_distance_to(other);
        if wrap_size > 0 {
            let east = Self::new(other.x + wrap_size, other.z);
            let west = Self::new(other.x - wrap_size, other.z);
            distance = distance
                .min(self.raw_distance_to(east))
                .min(self.raw_distance_to(west));
        }
        distance
    }
}

impl fmt::Display for HexCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y(), self.z)
    }
}
