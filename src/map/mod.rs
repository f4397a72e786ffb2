//! High-level map: grid, search engine and the unit roster
//!
//! [`HexMap`] wires the pieces together: units occupy cells, their vision
//! feeds the grid's visibility counters through the search engine, and
//! pathfinding runs under each unit's own travel rules.

use ahash::AHashMap;

use crate::core::error::{HexMapError, Result};
use crate::core::types::{CellIndex, UnitId};
use crate::grid::HexGrid;
use crate::search::{Path, SearchEngine};
use crate::unit::MapUnit;

/// A complete hex map with units
#[derive(Debug)]
pub struct HexMap {
    grid: HexGrid,
    engine: SearchEngine,
    units: Vec<MapUnit>,
    unit_slots: AHashMap<UnitId, usize>,
    next_unit_id: u32,
}

impl HexMap {
    pub fn new(x: i32, z: i32, wrapping: bool, seed: u64) -> Result<Self> {
        Ok(Self {
            grid: HexGrid::new(x, z, wrapping, seed)?,
            engine: SearchEngine::new(),
            units: Vec::new(),
            unit_slots: AHashMap::new(),
            next_unit_id: 0,
        })
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut HexGrid {
        &mut self.grid
    }

    pub fn units(&self) -> &[MapUnit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&MapUnit> {
        self.unit_slots.get(&id).map(|&slot| &self.units[slot])
    }

    /// Replace the map, dropping all units.
    ///
    /// Leaves the current map untouched when the dimensions are invalid.
    pub fn create_map(&mut self, x: i32, z: i32, wrapping: bool) -> Result<()> {
        self.grid.create_map(x, z, wrapping)?;
        self.units.clear();
        self.unit_slots.clear();
        Ok(())
    }

    /// Place a new unit, revealing what it sees.
    ///
    /// Fails when the cell is underwater or already occupied.
    pub fn add_unit(&mut self, location: CellIndex, orientation: f32) -> Result<UnitId> {
        if self.grid.unit_at(location).is_some() || self.grid.values(location).is_underwater() {
            return Err(HexMapError::InvalidUnitLocation);
        }
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        let unit = MapUnit::new(id, location).with_orientation(orientation);

        self.grid.set_unit_at(location, Some(id));
        self.unit_slots.insert(id, self.units.len());
        self.units.push(unit);
        self.apply_vision(location, unit.vision_range, 1);
        Ok(id)
    }

    pub fn remove_unit(&mut self, id: UnitId) -> Result<()> {
        let slot = *self
            .unit_slots
            .get(&id)
            .ok_or(HexMapError::UnitNotFound(id))?;
        let unit = self.units[slot];
        self.apply_vision(unit.location, unit.vision_range, -1);
        self.grid.set_unit_at(unit.location, None);

        self.unit_slots.remove(&id);
        self.units.swap_remove(slot);
        if slot < self.units.len() {
            self.unit_slots.insert(self.units[slot].id, slot);
        }
        Ok(())
    }

    /// Teleport a unit to a new cell, shifting its vision with it
    pub fn move_unit(&mut self, id: UnitId, to: CellIndex) -> Result<()> {
        let slot = *self
            .unit_slots
            .get(&id)
            .ok_or(HexMapError::UnitNotFound(id))?;
        let unit = self.units[slot];
        if unit.location == to {
            return Ok(());
        }
        if self.grid.unit_at(to).is_some() || self.grid.values(to).is_underwater() {
            return Err(HexMapError::InvalidUnitLocation);
        }

        self.apply_vision(unit.location, unit.vision_range, -1);
        self.grid.set_unit_at(unit.location, None);
        self.grid.set_unit_at(to, Some(id));
        self.units[slot].location = to;
        self.apply_vision(to, unit.vision_range, 1);
        Ok(())
    }

    /// Shortest path for a unit to a destination cell
    pub fn find_path(&mut self, id: UnitId, to: CellIndex) -> Result<Option<Path>> {
        let slot = *self
            .unit_slots
            .get(&id)
            .ok_or(HexMapError::UnitNotFound(id))?;
        let unit = self.units[slot];
        Ok(self.engine.find_path(&mut self.grid, unit.location, to, &unit))
    }

    /// Cells visible from an arbitrary viewpoint
    pub fn visible_cells(&mut self, from: CellIndex, range: i32) -> Vec<CellIndex> {
        self.engine.visible_cells(&mut self.grid, from, range)
    }

    /// Recompute all visibility from scratch, e.g. after edits that
    /// change sight lines in bulk.
    pub fn reset_visibility(&mut self) {
        self.grid.reset_visibility();
        let vision: Vec<(CellIndex, i32)> = self
            .units
            .iter()
            .map(|u| (u.location, u.vision_range))
            .collect();
        for (location, range) in vision {
            self.apply_vision(location, range, 1);
        }
    }

    fn apply_vision(&mut self, from: CellIndex, range: i32, delta: i32) {
        let cells = self.engine.visible_cells(&mut self.grid, from, range);
        for cell in cells {
            if delta > 0 {
                self.grid.increase_visibility(cell);
            } else {
                self.grid.decrease_visibility(cell);
            }
        }
    }
}
