//! Per-cell search state, reset lazily by phase comparison

use crate::core::types::CellIndex;

/// Sentinel for an empty intrusive chain link
pub const NO_CELL: u32 = u32::MAX;

/// Search scratch state for one cell.
///
/// One record exists per cell for the grid's lifetime and is never bulk
/// cleared: a record belongs to the current search only when its `phase`
/// stamp matches the engine's phase counter. Stale records are simply
/// overwritten when the cell is first reached again.
#[derive(Debug, Clone, Copy)]
pub struct SearchRecord {
    /// Cost from the search origin, turn-quantized for pathfinding
    pub distance: i32,
    /// Predecessor on the best known path; meaningful only within the
    /// stamping search
    pub path_from: CellIndex,
    /// Admissible estimate to the target; zero in visibility searches
    pub heuristic: i32,
    /// Which search invocation last touched this record: equal to the
    /// engine phase while on the frontier, one above once finalized
    pub phase: u32,
    /// Intrusive link for the frontier's bucket chains
    pub next: u32,
}

impl SearchRecord {
    /// Frontier ordering key
    #[inline]
    pub fn priority(&self) -> i32 {
        self.distance + self.heuristic
    }
}

impl Default for SearchRecord {
    fn default() -> Self {
        Self {
            distance: 0,
            path_from: CellIndex(0),
            heuristic: 0,
            phase: 0,
            next: NO_CELL,
        }
    }
}
