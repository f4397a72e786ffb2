//! Dense hex grid: the single source of truth for cells
//!
//! The grid owns parallel arrays keyed by [`CellIndex`]: packed values,
//! flags, world positions, search records, visibility counters and unit
//! occupancy. Cells have no identity beyond their index; collaborators
//! always look state up through the grid rather than holding references.

mod edit;

use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::cell::{CellData, CellFlags, CellValues};
use crate::coords::HexCoordinates;
use crate::core::config::{
    CHUNK_SIZE_X, CHUNK_SIZE_Z, ELEVATION_PERTURB_STRENGTH, ELEVATION_STEP, INNER_DIAMETER,
    NOISE_TABLE_SIZE, OUTER_RADIUS,
};
use crate::core::error::{HexMapError, Result};
use crate::core::types::{CellIndex, UnitId};
use crate::search::SearchRecord;

/// Notification for an external collaborator, queued by mutations and
/// drained by the caller after an edit batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshEvent {
    /// A render chunk needs re-triangulation
    Chunk(u32),
    /// The cell's terrain entry in the shader data is stale
    Terrain(CellIndex),
    /// The cell's visibility entry in the shader data is stale
    Visibility(CellIndex),
    /// The cell's view elevation changed; sight lines may shift
    ViewElevation(CellIndex),
}

/// The hex map's cell storage and coordinate index
#[derive(Debug, Clone)]
pub struct HexGrid {
    cell_count_x: i32,
    cell_count_z: i32,
    wrapping: bool,
    seed: u64,
    coordinates: Vec<HexCoordinates>,
    values: Vec<CellValues>,
    flags: Vec<CellFlags>,
    positions: Vec<Vec3>,
    pub(crate) search: Vec<SearchRecord>,
    visibility: Vec<i32>,
    unit_at: Vec<Option<UnitId>>,
    noise: Vec<f32>,
    events: Vec<RefreshEvent>,
}

impl HexGrid {
    /// Allocate a grid of `x` by `z` cells.
    ///
    /// Dimensions must be positive multiples of the chunk size; anything
    /// else is rejected without allocating.
    pub fn new(x: i32, z: i32, wrapping: bool, seed: u64) -> Result<Self> {
        if x <= 0 || x % CHUNK_SIZE_X != 0 || z <= 0 || z % CHUNK_SIZE_Z != 0 {
            return Err(HexMapError::InvalidMapSize {
                x,
                z,
                chunk_x: CHUNK_SIZE_X,
                chunk_z: CHUNK_SIZE_Z,
            });
        }

        let cell_count = (x * z) as usize;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let noise: Vec<f32> = (0..NOISE_TABLE_SIZE).map(|_| rng.gen()).collect();

        let mut grid = Self {
            cell_count_x: x,
            cell_count_z: z,
            wrapping,
            seed,
            coordinates: Vec::with_capacity(cell_count),
            values: vec![CellValues::new(); cell_count],
            flags: vec![CellFlags::new(); cell_count],
            positions: vec![Vec3::ZERO; cell_count],
            search: vec![SearchRecord::default(); cell_count],
            visibility: vec![0; cell_count],
            unit_at: vec![None; cell_count],
            noise,
            events: Vec::new(),
        };

        for offset_z in 0..z {
            for offset_x in 0..x {
                grid.coordinates
                    .push(HexCoordinates::from_offset(offset_x, offset_z));
            }
        }
        for i in 0..cell_count {
            let index = CellIndex(i as u32);
            grid.flags[i] = grid.flags[i].with_explorable(grid.seed_explorable(index));
            grid.positions[i] = grid.compute_position(index);
        }

        tracing::info!("Created {}x{} hex grid (wrapping: {})", x, z, wrapping);
        Ok(grid)
    }

    /// Replace this grid with a freshly allocated one.
    ///
    /// On invalid dimensions the existing grid is left untouched.
    pub fn create_map(&mut self, x: i32, z: i32, wrapping: bool) -> Result<()> {
        *self = Self::new(x, z, wrapping, self.seed)?;
        Ok(())
    }

    // A cell on the rim of a non-wrapping map can never be fully
    // triangulated, so it is kept out of exploration entirely. Wrapping
    // maps only have a rim at the north and south rows.
    fn seed_explorable(&self, index: CellIndex) -> bool {
        let coords = self.coordinates[index.as_usize()];
        let (x, z) = (coords.offset_x(), coords.offset_z());
        let interior_z = z > 0 && z < self.cell_count_z - 1;
        if self.wrapping {
            interior_z
        } else {
            interior_z && x > 0 && x < self.cell_count_x - 1
        }
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn cell_count_x(&self) -> i32 {
        self.cell_count_x
    }

    #[inline]
    pub fn cell_count_z(&self) -> i32 {
        self.cell_count_z
    }

    #[inline]
    pub fn wrapping(&self) -> bool {
        self.wrapping
    }

    /// Cells along X when the map wraps east-west, 0 otherwise
    #[inline]
    pub fn wrap_size(&self) -> i32 {
        if self.wrapping {
            self.cell_count_x
        } else {
            0
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Map a coordinate to its cell index, or `None` off the grid.
    ///
    /// On wrapping maps the X axis wraps; Z never does. Hot path during
    /// search boundary handling, so it stays branch-light.
    pub fn try_get_index(&self, coordinates: HexCoordinates) -> Option<CellIndex> {
        let z = coordinates.offset_z();
        if z < 0 || z >= self.cell_count_z {
            return None;
        }
        let mut x = coordinates.offset_x();
        if self.wrapping {
            x = x.rem_euclid(self.cell_count_x);
        } else if x < 0 || x >= self.cell_count_x {
            return None;
        }
        Some(CellIndex((x + z * self.cell_count_x) as u32))
    }

    /// Index of the adjacent cell across the given edge, if it exists
    pub fn neighbor(
        &self,
        index: CellIndex,
        direction: crate::core::types::HexDirection,
    ) -> Option<CellIndex> {
        let stepped = self.coordinates[index.as_usize()].wrapped_step(direction, self.wrap_size());
        self.try_get_index(stepped)
    }

    #[inline]
    pub fn coordinates(&self, index: CellIndex) -> HexCoordinates {
        self.coordinates[index.as_usize()]
    }

    #[inline]
    pub fn values(&self, index: CellIndex) -> CellValues {
        self.values[index.as_usize()]
    }

    #[inline]
    pub fn flags(&self, index: CellIndex) -> CellFlags {
        self.flags[index.as_usize()]
    }

    #[inline]
    pub fn position(&self, index: CellIndex) -> Vec3 {
        self.positions[index.as_usize()]
    }

    /// Copied snapshot of one cell for external policies
    pub fn cell_data(&self, index: CellIndex) -> CellData {
        let i = index.as_usize();
        CellData {
            values: self.values[i],
            flags: self.flags[i],
            occupied: self.unit_at[i].is_some(),
        }
    }

    pub fn unit_at(&self, index: CellIndex) -> Option<UnitId> {
        self.unit_at[index.as_usize()]
    }

    pub(crate) fn set_unit_at(&mut self, index: CellIndex, unit: Option<UnitId>) {
        self.unit_at[index.as_usize()] = unit;
    }

    // --- visibility counters ---

    pub fn visibility(&self, index: CellIndex) -> i32 {
        self.visibility[index.as_usize()]
    }

    pub fn is_visible(&self, index: CellIndex) -> bool {
        let i = index.as_usize();
        self.visibility[i] > 0 && self.flags[i].explorable()
    }

    /// One more observer sees this cell. The first observer marks an
    /// explorable cell explored for good.
    pub fn increase_visibility(&mut self, index: CellIndex) {
        let i = index.as_usize();
        self.visibility[i] += 1;
        if self.visibility[i] == 1 {
            if self.flags[i].explorable() {
                self.flags[i] = self.flags[i].with_explored(true);
            }
            self.events.push(RefreshEvent::Visibility(index));
        }
    }

    pub fn decrease_visibility(&mut self, index: CellIndex) {
        let i = index.as_usize();
        self.visibility[i] -= 1;
        if self.visibility[i] == 0 {
            self.events.push(RefreshEvent::Visibility(index));
        }
    }

    /// Zero every visibility counter; callers re-apply unit vision after
    pub fn reset_visibility(&mut self) {
        for i in 0..self.visibility.len() {
            if self.visibility[i] > 0 {
                self.visibility[i] = 0;
                self.events.push(RefreshEvent::Visibility(CellIndex(i as u32)));
            }
        }
    }

    // --- refresh events ---

    /// Drain the queued collaborator notifications
    pub fn take_refresh_events(&mut self) -> Vec<RefreshEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: RefreshEvent) {
        self.events.push(event);
    }

    fn chunk_count_x(&self) -> i32 {
        self.cell_count_x / CHUNK_SIZE_X
    }

    /// Render chunk the cell belongs to
    pub fn chunk_of(&self, index: CellIndex) -> u32 {
        let coords = self.coordinates[index.as_usize()];
        let cx = coords.offset_x() / CHUNK_SIZE_X;
        let cz = coords.offset_z() / CHUNK_SIZE_Z;
        (cx + cz * self.chunk_count_x()) as u32
    }

    /// Mark the cell's chunk dirty, plus any adjacent chunk that shares
    /// the cell's border.
    pub(crate) fn refresh(&mut self, index: CellIndex) {
        let own = self.chunk_of(index);
        self.events.push(RefreshEvent::Chunk(own));
        let mut emitted = [own, own, own];
        let mut count = 0;
        for direction in crate::core::types::HexDirection::ALL {
            if let Some(neighbor) = self.neighbor(index, direction) {
                let chunk = self.chunk_of(neighbor);
                if chunk != own && !emitted[..count].contains(&chunk) {
                    emitted[count] = chunk;
                    count += 1;
                    self.events.push(RefreshEvent::Chunk(chunk));
                }
            }
        }
    }

    /// Mark only the cell's own chunk dirty
    pub(crate) fn refresh_self_only(&mut self, index: CellIndex) {
        let chunk = self.chunk_of(index);
        self.events.push(RefreshEvent::Chunk(chunk));
    }

    // --- positions ---

    /// World position derived from offset coordinates, elevation and a
    /// deterministic vertical perturbation.
    pub(crate) fn compute_position(&self, index: CellIndex) -> Vec3 {
        let coords = self.coordinates[index.as_usize()];
        let (ox, oz) = (coords.offset_x(), coords.offset_z());
        // Odd rows shift half a cell east
        let x = (ox as f32 + (oz & 1) as f32 * 0.5) * INNER_DIAMETER;
        let z = oz as f32 * OUTER_RADIUS * 1.5;
        let mut y = self.values[index.as_usize()].elevation() as f32 * ELEVATION_STEP;
        y += (self.sample_noise(ox, oz) * 2.0 - 1.0) * ELEVATION_PERTURB_STRENGTH;
        Vec3::new(x, y, z)
    }

    fn sample_noise(&self, x: i32, z: i32) -> f32 {
        let mut h = self.seed;
        h = h.wrapping_mul(31).wrapping_add(x as u64);
        h = h.wrapping_mul(31).wrapping_add(z as u64);
        h ^= h >> 16;
        self.noise[(h as usize) & (NOISE_TABLE_SIZE - 1)]
    }

    pub(crate) fn refresh_position(&mut self, index: CellIndex) {
        self.positions[index.as_usize()] = self.compute_position(index);
    }

    // --- raw cell state, for the save loader ---

    /// Install persisted cell state, preserving the explorability seeded
    /// at creation and recomputing the derived position.
    pub(crate) fn load_cell(&mut self, index: CellIndex, values: CellValues, flags: CellFlags) {
        let i = index.as_usize();
        let explorable = self.flags[i].explorable();
        let mut flags = flags.with_explorable(explorable);
        if !explorable {
            flags = flags.with_explored(false);
        }
        self.values[i] = values;
        self.flags[i] = flags;
        self.refresh_position(index);
    }
}
