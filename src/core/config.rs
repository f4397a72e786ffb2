//! Map tuning constants with documented rationale
//!
//! All magic numbers of the cell/grid layer are collected here with
//! explanations of their purpose and how they interact with each other.

/// Cells per render chunk along X.
///
/// Map dimensions must be positive multiples of the chunk size so the
/// external chunk renderer can batch cells without partial chunks.
pub const CHUNK_SIZE_X: i32 = 5;

/// Cells per render chunk along Z. See [`CHUNK_SIZE_X`].
pub const CHUNK_SIZE_Z: i32 = 5;

/// Distance from a cell center to any of its corners, in world units.
///
/// Every other metric derives from this one; changing it rescales the
/// whole map geometry.
pub const OUTER_RADIUS: f32 = 10.0;

/// Distance from a cell center to the middle of an edge: outer * sqrt(3)/2.
pub const INNER_RADIUS: f32 = OUTER_RADIUS * 0.866_025_4;

/// Center-to-center distance of horizontal neighbors.
pub const INNER_DIAMETER: f32 = INNER_RADIUS * 2.0;

/// World-space height of one elevation level.
///
/// Kept small relative to [`OUTER_RADIUS`] so slopes read as terraces
/// rather than walls.
pub const ELEVATION_STEP: f32 = 3.0;

/// Maximum vertical displacement applied to a cell's surface by noise.
///
/// Must stay below half of [`ELEVATION_STEP`] or perturbed cells of
/// adjacent elevation levels could visually swap order.
pub const ELEVATION_PERTURB_STRENGTH: f32 = 1.5;

/// Entries in the seeded noise table sampled for position perturbation.
///
/// Power of two so table lookups reduce to a mask instead of a modulo.
pub const NOISE_TABLE_SIZE: usize = 256;

/// Bias added to elevation before packing so negative logical elevations
/// are representable in an unsigned 8-bit field (and in a save byte).
pub const ELEVATION_BIAS: i32 = 127;

/// Movement budget a standard unit spends per turn.
///
/// Chosen so road travel (cost 1) covers many cells per turn while rough
/// featured terrain (cost 10+) covers only two.
pub const DEFAULT_UNIT_SPEED: i32 = 24;

/// How far a standard unit can see, in cells, before elevation bonuses.
pub const DEFAULT_VISION_RANGE: i32 = 3;

/// Version written into new save headers.
pub const SAVE_VERSION: i32 = 5;

/// Oldest save header version the loader accepts.
///
/// Versions below this predate the dimension header and cannot be read
/// without out-of-band size information.
pub const MIN_SAVE_VERSION: i32 = 2;

/// First version that persists the explored flag.
pub const SAVE_VERSION_EXPLORED: i32 = 3;

/// First version that writes elevation biased by [`ELEVATION_BIAS`]
/// instead of as a signed byte.
pub const SAVE_VERSION_BIASED_ELEVATION: i32 = 4;

/// First version that persists the east-west wrap flag.
pub const SAVE_VERSION_WRAPPING: i32 = 5;
