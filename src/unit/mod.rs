//! Units standing on the map and their travel rules
//!
//! The search engine knows nothing about units; it consults a
//! [`TravelPolicy`] for speed, vision and per-edge costs. [`MapUnit`] is
//! the standard implementation: road travel is cheap, cliffs and sealed
//! wall lines are impassable, and features slow movement down.

use serde::{Deserialize, Serialize};

use crate::cell::CellData;
use crate::core::config::{DEFAULT_UNIT_SPEED, DEFAULT_VISION_RANGE};
use crate::core::types::{CellIndex, HexDirection, HexEdgeType, UnitId};

/// Movement and vision rules consumed by the search engine.
///
/// `move_cost` returns `None` for an impassable edge; any `Some` cost must
/// be at least 1 so the hex-distance path heuristic never overestimates.
pub trait TravelPolicy {
    /// Movement budget per turn, used for turn quantization
    fn speed(&self) -> i32;

    /// Base vision range in cells, before elevation bonuses
    fn vision_range(&self) -> i32;

    /// Whether the traveler may stand on (or pass through) the cell
    fn is_valid_destination(&self, cell: CellData) -> bool;

    /// Cost of crossing one edge, or `None` when it cannot be crossed
    fn move_cost(&self, from: CellData, to: CellData, direction: HexDirection) -> Option<i32>;
}

/// A unit occupying exactly one cell
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MapUnit {
    pub id: UnitId,
    pub location: CellIndex,
    /// Facing in degrees, persisted for the renderer
    pub orientation: f32,
    pub speed: i32,
    pub vision_range: i32,
}

impl MapUnit {
    pub fn new(id: UnitId, location: CellIndex) -> Self {
        Self {
            id,
            location,
            orientation: 0.0,
            speed: DEFAULT_UNIT_SPEED,
            vision_range: DEFAULT_VISION_RANGE,
        }
    }

    pub fn with_orientation(mut self, orientation: f32) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_vision_range(mut self, vision_range: i32) -> Self {
        self.vision_range = vision_range;
        self
    }
}

impl TravelPolicy for MapUnit {
    fn speed(&self) -> i32 {
        self.speed
    }

    fn vision_range(&self) -> i32 {
        self.vision_range
    }

    fn is_valid_destination(&self, cell: CellData) -> bool {
        cell.flags.explored() && !cell.is_underwater() && !cell.occupied
    }

    fn move_cost(&self, from: CellData, to: CellData, direction: HexDirection) -> Option<i32> {
        let edge = HexEdgeType::between(from.elevation(), to.elevation());
        if edge == HexEdgeType::Cliff {
            return None;
        }
        if from.has_road(direction) {
            Some(1)
        } else if from.walled() != to.walled() {
            // Crossing a wall line is only possible on a road
            None
        } else {
            let base = if edge == HexEdgeType::Flat { 5 } else { 10 };
            Some(base + to.values.urban_level() + to.values.farm_level() + to.values.plant_level())
        }
    }
}
