//! Attribute mutation with coupled invariants
//!
//! Rivers must flow downhill (or onto an equal water surface), roads and
//! rivers exclude each other on an edge, and elevation changes cascade
//! into both. Every mutator keeps the flag words of both edge endpoints
//! consistent and queues the refresh events the change implies.

use super::{HexGrid, RefreshEvent};
use crate::core::types::{CellIndex, HexDirection, HexEdgeType};

impl HexGrid {
    /// Raise or lower a cell's surface.
    ///
    /// Cascades: the position is recomputed, rivers that can no longer
    /// flow are removed, and roads whose endpoints now differ by more
    /// than one level are torn up.
    pub fn set_elevation(&mut self, index: CellIndex, elevation: i32) {
        let i = index.as_usize();
        if self.values[i].elevation() == elevation {
            return;
        }
        let old_view = self.values[i].view_elevation();
        self.values[i] = self.values[i].with_elevation(elevation);
        self.refresh_position(index);
        if self.values[i].view_elevation() != old_view {
            self.push_event(RefreshEvent::ViewElevation(index));
        }

        self.validate_rivers(index);
        for direction in HexDirection::ALL {
            if self.flags[i].has_road(direction) && self.elevation_difference(index, direction) > 1
            {
                self.remove_road_through(index, direction);
            }
        }
        self.refresh(index);
    }

    /// Change the water surface level, revalidating rivers
    pub fn set_water_level(&mut self, index: CellIndex, level: i32) {
        let i = index.as_usize();
        if self.values[i].water_level() == level {
            return;
        }
        let old_view = self.values[i].view_elevation();
        self.values[i] = self.values[i].with_water_level(level);
        if self.values[i].view_elevation() != old_view {
            self.push_event(RefreshEvent::ViewElevation(index));
        }
        self.validate_rivers(index);
        self.refresh(index);
    }

    pub fn set_urban_level(&mut self, index: CellIndex, level: i32) {
        let i = index.as_usize();
        if self.values[i].urban_level() != level {
            self.values[i] = self.values[i].with_urban_level(level);
            self.refresh_self_only(index);
        }
    }

    pub fn set_farm_level(&mut self, index: CellIndex, level: i32) {
        let i = index.as_usize();
        if self.values[i].farm_level() != level {
            self.values[i] = self.values[i].with_farm_level(level);
            self.refresh_self_only(index);
        }
    }

    pub fn set_plant_level(&mut self, index: CellIndex, level: i32) {
        let i = index.as_usize();
        if self.values[i].plant_level() != level {
            self.values[i] = self.values[i].with_plant_level(level);
            self.refresh_self_only(index);
        }
    }

    /// Terrain is pure shader data; no chunk geometry changes
    pub fn set_terrain_type_index(&mut self, index: CellIndex, terrain: i32) {
        let i = index.as_usize();
        if self.values[i].terrain_type_index() != terrain {
            self.values[i] = self.values[i].with_terrain_type_index(terrain);
            self.push_event(RefreshEvent::Terrain(index));
        }
    }

    /// Place or clear a special feature. Refused while a river runs
    /// through the cell; placing one tears up the cell's roads.
    pub fn set_special_index(&mut self, index: CellIndex, special: i32) {
        let i = index.as_usize();
        if self.values[i].special_index() != special && !self.flags[i].has_river() {
            self.values[i] = self.values[i].with_special_index(special);
            self.remove_roads(index);
            self.refresh_self_only(index);
        }
    }

    pub fn set_walled(&mut self, index: CellIndex, walled: bool) {
        let i = index.as_usize();
        if self.flags[i].walled() != walled {
            self.flags[i] = self.flags[i].with_walled(walled);
            self.refresh(index);
        }
    }

    // --- rivers ---

    /// A river may flow from `from` to `to` when it runs downhill or
    /// level, or ends on `from`'s own water surface.
    fn is_valid_river_destination(&self, from: CellIndex, to: CellIndex) -> bool {
        let from_values = self.values[from.as_usize()];
        let to_values = self.values[to.as_usize()];
        from_values.elevation() >= to_values.elevation()
            || from_values.water_level() == to_values.elevation()
    }

    /// Drop whichever river ends became invalid after an elevation or
    /// water change.
    fn validate_rivers(&mut self, index: CellIndex) {
        let flags = self.flags[index.as_usize()];
        if let Some(direction) = flags.outgoing_river() {
            let valid = self
                .neighbor(index, direction)
                .is_some_and(|n| self.is_valid_river_destination(index, n));
            if !valid {
                self.remove_outgoing_river(index);
            }
        }
        let flags = self.flags[index.as_usize()];
        if let Some(direction) = flags.incoming_river() {
            let valid = self
                .neighbor(index, direction)
                .is_some_and(|n| self.is_valid_river_destination(n, index));
            if !valid {
                self.remove_incoming_river(index);
            }
        }
    }

    /// Start a river flowing out of `index` through `direction`.
    ///
    /// Ignored when the destination is invalid. Replaces any previous
    /// outgoing river, clears special features on both endpoints and
    /// removes the road on that edge.
    pub fn set_outgoing_river(&mut self, index: CellIndex, direction: HexDirection) {
        let i = index.as_usize();
        if self.flags[i].outgoing_river() == Some(direction) {
            return;
        }
        let Some(neighbor) = self.neighbor(index, direction) else {
            return;
        };
        if !self.is_valid_river_destination(index, neighbor) {
            return;
        }

        self.remove_outgoing_river(index);
        if self.flags[i].incoming_river() == Some(direction) {
            self.remove_incoming_river(index);
        }
        self.flags[i] = self.flags[i].with_outgoing_river(direction);
        self.values[i] = self.values[i].with_special_index(0);

        let n = neighbor.as_usize();
        self.remove_incoming_river(neighbor);
        self.flags[n] = self.flags[n].with_incoming_river(direction.opposite());
        self.values[n] = self.values[n].with_special_index(0);

        // A river claims the edge; the road goes
        self.remove_road_through(index, direction);
        self.refresh_self_only(index);
        self.refresh_self_only(neighbor);
    }

    pub fn remove_outgoing_river(&mut self, index: CellIndex) {
        let i = index.as_usize();
        let Some(direction) = self.flags[i].outgoing_river() else {
            return;
        };
        self.flags[i] = self.flags[i].without_outgoing_river();
        self.refresh_self_only(index);

        if let Some(neighbor) = self.neighbor(index, direction) {
            let n = neighbor.as_usize();
            self.flags[n] = self.flags[n].without_incoming_river();
            self.refresh_self_only(neighbor);
        }
    }

    pub fn remove_incoming_river(&mut self, index: CellIndex) {
        let i = index.as_usize();
        let Some(direction) = self.flags[i].incoming_river() else {
            return;
        };
        self.flags[i] = self.flags[i].without_incoming_river();
        self.refresh_self_only(index);

        if let Some(neighbor) = self.neighbor(index, direction) {
            let n = neighbor.as_usize();
            self.flags[n] = self.flags[n].without_outgoing_river();
            self.refresh_self_only(neighbor);
        }
    }

    pub fn remove_river(&mut self, index: CellIndex) {
        self.remove_outgoing_river(index);
        self.remove_incoming_river(index);
    }

    // --- roads ---

    fn elevation_difference(&self, index: CellIndex, direction: HexDirection) -> i32 {
        let Some(neighbor) = self.neighbor(index, direction) else {
            return 0;
        };
        (self.values[index.as_usize()].elevation() - self.values[neighbor.as_usize()].elevation())
            .abs()
    }

    /// Lay a road across an edge, mirrored on both endpoints.
    ///
    /// Refused when a river runs through the edge, either endpoint holds
    /// a special feature, or the edge is steeper than a slope.
    pub fn add_road(&mut self, index: CellIndex, direction: HexDirection) {
        let i = index.as_usize();
        let Some(neighbor) = self.neighbor(index, direction) else {
            return;
        };
        if self.flags[i].has_road(direction)
            || self.flags[i].has_river_through_edge(direction)
            || self.values[i].is_special()
            || self.values[neighbor.as_usize()].is_special()
            || self.elevation_difference(index, direction) > 1
        {
            return;
        }
        self.flags[i] = self.flags[i].with_road(direction);
        let n = neighbor.as_usize();
        self.flags[n] = self.flags[n].with_road(direction.opposite());
        self.refresh_self_only(index);
        self.refresh_self_only(neighbor);
    }

    /// Tear up every road touching the cell
    pub fn remove_roads(&mut self, index: CellIndex) {
        for direction in HexDirection::ALL {
            if self.flags[index.as_usize()].has_road(direction) {
                self.remove_road_through(index, direction);
            }
        }
    }

    fn remove_road_through(&mut self, index: CellIndex, direction: HexDirection) {
        let i = index.as_usize();
        self.flags[i] = self.flags[i].without_road(direction);
        self.refresh_self_only(index);
        if let Some(neighbor) = self.neighbor(index, direction) {
            let n = neighbor.as_usize();
            self.flags[n] = self.flags[n].without_road(direction.opposite());
            self.refresh_self_only(neighbor);
        }
    }
}
