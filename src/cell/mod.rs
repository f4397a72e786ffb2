//! Per-cell attribute and flag words

pub mod flags;
pub mod values;

pub use flags::CellFlags;
pub use values::CellValues;

use crate::core::types::HexDirection;

/// Read-only snapshot of one cell, handed to external policies.
///
/// The grid never hands out references into its arrays; collaborators that
/// need to inspect a cell (movement cost, destination checks) get this
/// copied view instead.
#[derive(Debug, Clone, Copy)]
pub struct CellData {
    pub values: CellValues,
    pub flags: CellFlags,
    /// Whether a unit currently stands on the cell
    pub occupied: bool,
}

impl CellData {
    pub fn elevation(&self) -> i32 {
        self.values.elevation()
    }

    pub fn view_elevation(&self) -> i32 {
        self.values.view_elevation()
    }

    pub fn is_underwater(&self) -> bool {
        self.values.is_underwater()
    }

    pub fn walled(&self) -> bool {
        self.flags.walled()
    }

    pub fn has_road(&self, direction: HexDirection) -> bool {
        self.flags.has_road(direction)
    }

    pub fn explorable(&self) -> bool {
        self.flags.explorable()
    }
}
