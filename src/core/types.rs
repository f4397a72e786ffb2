//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Dense index of a cell inside the grid's parallel arrays.
///
/// The index is the sole stable identity of a cell; every per-cell array
/// (values, flags, positions, search records, visibility counters) is keyed
/// by it. Indices are only valid for the map that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellIndex(pub u32);

impl CellIndex {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Unique identifier for units placed on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

/// The six hex edge directions, clockwise from north-east
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum HexDirection {
    NE = 0,
    E = 1,
    SE = 2,
    SW = 3,
    W = 4,
    NW = 5,
}

impl HexDirection {
    pub const ALL: [HexDirection; 6] = [
        HexDirection::NE,
        HexDirection::E,
        HexDirection::SE,
        HexDirection::SW,
        HexDirection::W,
        HexDirection::NW,
    ];

    /// The direction pointing back across the same edge
    pub fn opposite(self) -> Self {
        Self::ALL[(self as usize + 3) % 6]
    }

    /// Next direction clockwise
    pub fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % 6]
    }

    /// Previous direction (counter-clockwise)
    pub fn previous(self) -> Self {
        Self::ALL[(self as usize + 5) % 6]
    }

    /// Recover a direction from its stored discriminant
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }
}

/// Edge classification by elevation difference between its two cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexEdgeType {
    Flat,
    Slope,
    Cliff,
}

impl HexEdgeType {
    /// Classify the edge between two elevations
    pub fn between(elevation1: i32, elevation2: i32) -> Self {
        match (elevation1 - elevation2).abs() {
            0 => Self::Flat,
            1 => Self::Slope,
            _ => Self::Cliff,
        }
    }
}
