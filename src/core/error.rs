use thiserror::Error;

use crate::core::types::UnitId;

#[derive(Error, Debug)]
pub enum HexMapError {
    #[error("invalid map size {x}x{z}: dimensions must be positive multiples of {chunk_x}x{chunk_z}")]
    InvalidMapSize {
        x: i32,
        z: i32,
        chunk_x: i32,
        chunk_z: i32,
    },

    #[error("unsupported map format version {0}")]
    UnsupportedVersion(i32),

    #[error("malformed map data: {0}")]
    MalformedData(String),

    #[error("unit not found: {0:?}")]
    UnitNotFound(UnitId),

    #[error("cell is occupied or not a valid unit location")]
    InvalidUnitLocation,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HexMapError>;
