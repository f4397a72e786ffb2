//! Packed per-cell boolean and enumerated state
//!
//! Roads, rivers, walls and exploration state share one u32. River
//! direction fields are only meaningful while the matching presence bit is
//! set; the accessors encode that by returning `Option<HexDirection>`.

use serde::{Deserialize, Serialize};

use crate::core::types::HexDirection;

// Bit layout, low bits first:
//   roads              6 bits @ 0  (one per edge direction)
//   incoming river     presence @ 6, direction 3 bits @ 7
//   outgoing river     presence @ 10, direction 3 bits @ 11
//   walled             @ 14
//   explored           @ 15
//   explorable         @ 16
const ROADS_MASK: u32 = 0b11_1111;
const RIVER_IN: u32 = 1 << 6;
const RIVER_IN_DIR_SHIFT: u32 = 7;
const RIVER_OUT: u32 = 1 << 10;
const RIVER_OUT_DIR_SHIFT: u32 = 11;
const RIVER_DIR_MASK: u32 = 0b111;
const WALLED: u32 = 1 << 14;
const EXPLORED: u32 = 1 << 15;
const EXPLORABLE: u32 = 1 << 16;

/// Road, river, wall and exploration flags of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellFlags(u32);

impl CellFlags {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    // --- roads ---

    pub fn has_road(self, direction: HexDirection) -> bool {
        self.0 & (1 << direction as u32) != 0
    }

    pub fn has_any_road(self) -> bool {
        self.0 & ROADS_MASK != 0
    }

    /// The six road bits as a compact byte, for serialization
    pub fn road_bits(self) -> u8 {
        (self.0 & ROADS_MASK) as u8
    }

    pub fn with_road_bits(self, bits: u8) -> Self {
        Self((self.0 & !ROADS_MASK) | (bits as u32 & ROADS_MASK))
    }

    pub fn with_road(self, direction: HexDirection) -> Self {
        Self(self.0 | (1 << direction as u32))
    }

    pub fn without_road(self, direction: HexDirection) -> Self {
        Self(self.0 & !(1 << direction as u32))
    }

    pub fn without_roads(self) -> Self {
        Self(self.0 & !ROADS_MASK)
    }

    // --- rivers ---

    pub fn has_incoming_river(self) -> bool {
        self.0 & RIVER_IN != 0
    }

    /// Direction the incoming river enters from, if one exists
    pub fn incoming_river(self) -> Option<HexDirection> {
        if self.has_incoming_river() {
            HexDirection::from_u8(((self.0 >> RIVER_IN_DIR_SHIFT) & RIVER_DIR_MASK) as u8)
        } else {
            None
        }
    }

    pub fn with_incoming_river(self, direction: HexDirection) -> Self {
        let cleared = self.0 & !(RIVER_DIR_MASK << RIVER_IN_DIR_SHIFT);
        Self(cleared | RIVER_IN | ((direction as u32) << RIVER_IN_DIR_SHIFT))
    }

    pub fn without_incoming_river(self) -> Self {
        Self(self.0 & !(RIVER_IN | (RIVER_DIR_MASK << RIVER_IN_DIR_SHIFT)))
    }

    pub fn has_outgoing_river(self) -> bool {
        self.0 & RIVER_OUT != 0
    }

    /// Direction the outgoing river leaves through, if one exists
    pub fn outgoing_river(self) -> Option<HexDirection> {
        if self.has_outgoing_river() {
            HexDirection::from_u8(((self.0 >> RIVER_OUT_DIR_SHIFT) & RIVER_DIR_MASK) as u8)
        } else {
            None
        }
    }

    pub fn with_outgoing_river(self, direction: HexDirection) -> Self {
        let cleared = self.0 & !(RIVER_DIR_MASK << RIVER_OUT_DIR_SHIFT);
        Self(cleared | RIVER_OUT | ((direction as u32) << RIVER_OUT_DIR_SHIFT))
    }

    pub fn without_outgoing_river(self) -> Self {
        Self(self.0 & !(RIVER_OUT | (RIVER_DIR_MASK << RIVER_OUT_DIR_SHIFT)))
    }

    pub fn has_river(self) -> bool {
        self.0 & (RIVER_IN | RIVER_OUT) != 0
    }

    /// A river source or mouth: water enters or leaves, but not both
    pub fn has_river_begin_or_end(self) -> bool {
        self.has_incoming_river() != self.has_outgoing_river()
    }

    pub fn has_river_through_edge(self, direction: HexDirection) -> bool {
        self.incoming_river() == Some(direction) || self.outgoing_river() == Some(direction)
    }

    // --- walls and exploration ---

    pub fn walled(self) -> bool {
        self.0 & WALLED != 0
    }

    pub fn with_walled(self, walled: bool) -> Self {
        if walled {
            Self(self.0 | WALLED)
        } else {
            Self(self.0 & !WALLED)
        }
    }

    pub fn explored(self) -> bool {
        self.0 & EXPLORED != 0
    }

    pub fn with_explored(self, explored: bool) -> Self {
        if explored {
            Self(self.0 | EXPLORED)
        } else {
            Self(self.0 & !EXPLORED)
        }
    }

    /// Whether the cell can ever become explored; map edges on
    /// non-wrapping maps are not.
    pub fn explorable(self) -> bool {
        self.0 & EXPLORABLE != 0
    }

    pub fn with_explorable(self, explorable: bool) -> Self {
        if explorable {
            Self(self.0 | EXPLORABLE)
        } else {
            Self(self.0 & !EXPLORABLE)
        }
    }
}
