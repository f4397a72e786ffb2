//! Hexmarch - hex map cell data, grid index and search core

pub mod cell;
pub mod coords;
pub mod core;
pub mod grid;
pub mod map;
pub mod save;
pub mod search;
pub mod unit;

pub use crate::core::{HexMapError, Result};
pub use crate::grid::HexGrid;
pub use crate::map::HexMap;
