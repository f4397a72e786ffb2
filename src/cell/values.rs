//! Packed per-cell attribute word
//!
//! Seven bounded integer attributes share one u32, accessed through
//! mask/shift getter/wither pairs. Writers mask out-of-range input rather
//! than rejecting it: a value wider than its field is silently truncated,
//! so callers must pre-validate ranges.

use serde::{Deserialize, Serialize};

use crate::core::config::ELEVATION_BIAS;

// Field layout, low bits first:
//   elevation  8 bits @ 0   (stored biased by ELEVATION_BIAS)
//   water      5 bits @ 8
//   urban      2 bits @ 13
//   farm       2 bits @ 15
//   plant      2 bits @ 17
//   special    8 bits @ 19
//   terrain    5 bits @ 27
const ELEVATION_MASK: u32 = 255;
const WATER_MASK: u32 = 31;
const LEVEL_MASK: u32 = 3;
const SPECIAL_MASK: u32 = 255;
const TERRAIN_MASK: u32 = 31;

const WATER_SHIFT: u32 = 8;
const URBAN_SHIFT: u32 = 13;
const FARM_SHIFT: u32 = 15;
const PLANT_SHIFT: u32 = 17;
const SPECIAL_SHIFT: u32 = 19;
const TERRAIN_SHIFT: u32 = 27;

/// All bounded attributes of one cell, packed into a single word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellValues(u32);

impl CellValues {
    pub fn new() -> Self {
        // Zero logical elevation is the biased stored value, not raw zero
        Self(ELEVATION_BIAS as u32)
    }

    /// The raw packed word, for serialization
    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    #[inline]
    fn get(self, mask: u32, shift: u32) -> i32 {
        ((self.0 >> shift) & mask) as i32
    }

    #[inline]
    fn with(self, value: i32, mask: u32, shift: u32) -> Self {
        Self((self.0 & !(mask << shift)) | ((value as u32 & mask) << shift))
    }

    /// Surface height in elevation steps; negative below the zero plane
    pub fn elevation(self) -> i32 {
        self.get(ELEVATION_MASK, 0) - ELEVATION_BIAS
    }

    pub fn with_elevation(self, value: i32) -> Self {
        self.with(value + ELEVATION_BIAS, ELEVATION_MASK, 0)
    }

    /// Height of the water surface, in the same steps as elevation
    pub fn water_level(self) -> i32 {
        self.get(WATER_MASK, WATER_SHIFT)
    }

    pub fn with_water_level(self, value: i32) -> Self {
        self.with(value, WATER_MASK, WATER_SHIFT)
    }

    pub fn urban_level(self) -> i32 {
        self.get(LEVEL_MASK, URBAN_SHIFT)
    }

    pub fn with_urban_level(self, value: i32) -> Self {
        self.with(value, LEVEL_MASK, URBAN_SHIFT)
    }

    pub fn farm_level(self) -> i32 {
        self.get(LEVEL_MASK, FARM_SHIFT)
    }

    pub fn with_farm_level(self, value: i32) -> Self {
        self.with(value, LEVEL_MASK, FARM_SHIFT)
    }

    pub fn plant_level(self) -> i32 {
        self.get(LEVEL_MASK, PLANT_SHIFT)
    }

    pub fn with_plant_level(self, value: i32) -> Self {
        self.with(value, LEVEL_MASK, PLANT_SHIFT)
    }

    /// Index of the special feature occupying the cell; 0 means none
    pub fn special_index(self) -> i32 {
        self.get(SPECIAL_MASK, SPECIAL_SHIFT)
    }

    pub fn with_special_index(self, value: i32) -> Self {
        self.with(value, SPECIAL_MASK, SPECIAL_SHIFT)
    }

    pub fn is_special(self) -> bool {
        self.special_index() > 0
    }

    pub fn terrain_type_index(self) -> i32 {
        self.get(TERRAIN_MASK, TERRAIN_SHIFT)
    }

    pub fn with_terrain_type_index(self, value: i32) -> Self {
        self.with(value, TERRAIN_MASK, TERRAIN_SHIFT)
    }

    /// The elevation that matters for line of sight: whichever of the
    /// surface or the water on top of it is higher.
    pub fn view_elevation(self) -> i32 {
        self.elevation().max(self.water_level())
    }

    pub fn is_underwater(self) -> bool {
        self.water_level() > self.elevation()
    }
}

impl Default for CellValues {
    fn default() -> Self {
        Self::new()
    }
}
