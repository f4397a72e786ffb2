//! Graph search over the hex grid
//!
//! One engine serves both unit pathfinding (A* with a hex-distance
//! heuristic and turn-quantized movement costs) and fog-of-war visibility
//! (Dijkstra bounded by elevation-adjusted range). Both share the bucket
//! frontier and the per-cell search records stored on the grid.
//!
//! Instead of clearing the record array between searches, the engine
//! advances a phase counter by 2 per invocation: a record stamped with the
//! current phase is on the frontier, one stamped a step above is
//! finalized, and anything older belongs to a previous search. This makes
//! the logical reset O(1) at the cost of one permanent record per cell.

pub mod frontier;
pub mod record;

pub use frontier::CellFrontier;
pub use record::{SearchRecord, NO_CELL};

use crate::core::types::{CellIndex, HexDirection};
use crate::grid::HexGrid;
use crate::unit::TravelPolicy;

/// A completed point-to-point search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    /// Cells from origin to destination, both inclusive
    pub cells: Vec<CellIndex>,
    /// Turn-quantized movement cost of the full path
    pub cost: i32,
}

/// Shared search state: the frontier and the phase counter.
///
/// Searches are synchronous and non-reentrant; exactly one may be in
/// flight because path and visibility queries share this state.
#[derive(Debug, Default)]
pub struct SearchEngine {
    frontier: CellFrontier,
    phase: u32,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn begin_search(&mut self, grid: &mut HexGrid, origin: CellIndex) {
        // +2 keeps "enqueued" (== phase) distinguishable from
        // "finalized" (== phase + 1) without a flag per record
        self.phase += 2;
        self.frontier.clear();

        let record = &mut grid.search[origin.as_usize()];
        record.phase = self.phase;
        record.distance = 0;
        record.heuristic = 0;
        self.frontier.enqueue(origin, &mut grid.search);
    }

    /// Shortest path between two cells under the given policy.
    ///
    /// Distances are turn-quantized: entering a new turn rounds the
    /// accumulated cost up to a full turn boundary, so a path ending a
    /// turn early is preferred over one wasting leftover movement.
    /// Returns `None` when the destination is unreachable; both indices
    /// must come from this grid.
    pub fn find_path(
        &mut self,
        grid: &mut HexGrid,
        from: CellIndex,
        to: CellIndex,
        policy: &impl TravelPolicy,
    ) -> Option<Path> {
        let speed = policy.speed();
        let wrap_size = grid.wrap_size();
        let to_coordinates = grid.coordinates(to);
        self.begin_search(grid, from);

        while let Some(current) = self.frontier.try_dequeue(&mut grid.search) {
            grid.search[current.as_usize()].phase += 1;
            if current == to {
                return Some(self.collect_path(grid, from, to));
            }

            let current_distance = grid.search[current.as_usize()].distance;
            // C#-style truncating division: distance 0 is still turn 0
            let current_turn = (current_distance - 1) / speed;
            let current_data = grid.cell_data(current);

            for direction in HexDirection::ALL {
                let Some(neighbor) = grid.neighbor(current, direction) else {
                    continue;
                };
                let neighbor_phase = grid.search[neighbor.as_usize()].phase;
                if neighbor_phase > self.phase {
                    continue; // finalized this search
                }
                let neighbor_data = grid.cell_data(neighbor);
                if !policy.is_valid_destination(neighbor_data) {
                    continue;
                }
                let Some(move_cost) = policy.move_cost(current_data, neighbor_data, direction)
                else {
                    continue;
                };

                let mut distance = current_distance + move_cost;
                let turn = (distance - 1) / speed;
                if turn > current_turn {
                    // Leftover movement from the previous turn is wasted
                    distance = turn * speed + move_cost;
                }

                if neighbor_phase < self.phase {
                    let heuristic =
                        grid.coordinates(neighbor).distance_to(to_coordinates, wrap_size);
                    let record = &mut grid.search[neighbor.as_usize()];
                    record.phase = self.phase;
                    record.distance = distance;
                    record.path_from = current;
                    record.heuristic = heuristic;
                    self.frontier.enqueue(neighbor, &mut grid.search);
                } else if distance < grid.search[neighbor.as_usize()].distance {
                    let old_priority = grid.search[neighbor.as_usize()].priority();
                    let record = &mut grid.search[neighbor.as_usize()];
                    record.distance = distance;
                    record.path_from = current;
                    self.frontier
                        .change_priority(neighbor, old_priority, &mut grid.search);
                }
            }
        }

        tracing::debug!(from = from.0, to = to.0, "Path search exhausted without reaching target");
        None
    }

    fn collect_path(&self, grid: &HexGrid, from: CellIndex, to: CellIndex) -> Path {
        let mut cells = vec![to];
        let mut current = to;
        while current != from {
            current = grid.search[current.as_usize()].path_from;
            cells.push(current);
        }
        cells.reverse();
        Path {
            cells,
            cost: grid.search[to.as_usize()].distance,
        }
    }

    /// Every cell visible from `from` with the given base vision range.
    ///
    /// The effective range grows with the viewer's view elevation; a cell
    /// is admitted while `distance + its view elevation` stays within
    /// range and the travel distance does not exceed the straight-line
    /// hex distance (which would let sight bend around high ground).
    /// Always runs the frontier to exhaustion.
    pub fn visible_cells(&mut self, grid: &mut HexGrid, from: CellIndex, range: i32) -> Vec<CellIndex> {
        let mut visible = Vec::new();
        let range = range + grid.values(from).view_elevation();
        let wrap_size = grid.wrap_size();
        let from_coordinates = grid.coordinates(from);
        self.begin_search(grid, from);

        while let Some(current) = self.frontier.try_dequeue(&mut grid.search) {
            grid.search[current.as_usize()].phase += 1;
            visible.push(current);
            let current_distance = grid.search[current.as_usize()].distance;

            for direction in HexDirection::ALL {
                let Some(neighbor) = grid.neighbor(current, direction) else {
                    continue;
                };
                let neighbor_phase = grid.search[neighbor.as_usize()].phase;
                if neighbor_phase > self.phase || !grid.flags(neighbor).explorable() {
                    continue;
                }

                let distance = current_distance + 1;
                if distance + grid.values(neighbor).view_elevation() > range
                    || distance
                        > from_coordinates.distance_to(grid.coordinates(neighbor), wrap_size)
                {
                    continue;
                }

                if neighbor_phase < self.phase {
                    let record = &mut grid.search[neighbor.as_usize()];
                    record.phase = self.phase;
                    record.distance = distance;
                    record.path_from = current;
                    record.heuristic = 0;
                    self.frontier.enqueue(neighbor, &mut grid.search);
                } else if distance < grid.search[neighbor.as_usize()].distance {
                    let old_priority = grid.search[neighbor.as_usize()].priority();
                    let record = &mut grid.search[neighbor.as_usize()];
                    record.distance = distance;
                    record.path_from = current;
                    self.frontier
                        .change_priority(neighbor, old_priority, &mut grid.search);
                }
            }
        }

        visible
    }
}
