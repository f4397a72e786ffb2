pub mod config;
pub mod error;
pub mod types;

pub use error::{HexMapError, Result};
pub use types::{CellIndex, HexDirection, HexEdgeType, UnitId};
