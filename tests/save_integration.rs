//! Integration tests for the versioned binary map format
//!
//! Current-version round trips plus handcrafted payloads for every older
//! supported header version, verifying that absent fields get their
//! documented defaults (pre-wrap maps load non-wrapping, pre-exploration
//! maps load unexplored).

use hexmarch::coords::HexCoordinates;
use hexmarch::core::config::{MIN_SAVE_VERSION, SAVE_VERSION};
use hexmarch::core::error::HexMapError;
use hexmarch::core::types::{CellIndex, HexDirection};
use hexmarch::map::HexMap;
use hexmarch::save;

fn at(map: &HexMap, x: i32, z: i32) -> CellIndex {
    map.grid()
        .try_get_index(HexCoordinates::from_offset(x, z))
        .unwrap()
}

/// A map with a bit of everything: terrain, water, a river, a road,
/// walls, features and one unit
fn build_fixture() -> HexMap {
    let mut map = HexMap::new(10, 10, false, 42).unwrap();
    let grid = map.grid_mut();

    let hill = grid
        .try_get_index(HexCoordinates::from_offset(3, 4))
        .unwrap();
    grid.set_elevation(hill, 3);
    grid.set_terrain_type_index(hill, 2);

    let valley = grid
        .try_get_index(HexCoordinates::from_offset(4, 4))
        .unwrap();
    grid.set_elevation(valley, -2);
    grid.set_water_level(valley, 1);

    grid.set_outgoing_river(hill, HexDirection::E);

    let town = grid
        .try_get_index(HexCoordinates::from_offset(6, 6))
        .unwrap();
    grid.set_urban_level(town, 2);
    grid.set_farm_level(town, 1);
    grid.set_walled(town, true);
    grid.add_road(town, HexDirection::W);

    let shrine = grid
        .try_get_index(HexCoordinates::from_offset(7, 2))
        .unwrap();
    grid.set_special_index(shrine, 3);

    let home = grid
        .try_get_index(HexCoordinates::from_offset(5, 5))
        .unwrap();
    map.add_unit(home, 42.5).unwrap();
    map
}

// ============================================================================
// Current version round trip
// ============================================================================

#[test]
fn test_round_trip_preserves_every_cell_word() {
    let original = build_fixture();
    let mut buffer = Vec::new();
    save::save(&original, &mut buffer).unwrap();

    let loaded = save::load(&mut buffer.as_slice(), 42).unwrap();
    assert_eq!(loaded.grid().cell_count_x(), 10);
    assert_eq!(loaded.grid().cell_count_z(), 10);
    assert!(!loaded.grid().wrapping());

    for i in 0..original.grid().cell_count() {
        let index = CellIndex(i as u32);
        assert_eq!(
            original.grid().values(index).bits(),
            loaded.grid().values(index).bits(),
            "values mismatch at cell {i}"
        );
        assert_eq!(
            original.grid().flags(index).bits(),
            loaded.grid().flags(index).bits(),
            "flags mismatch at cell {i}"
        );
    }

    assert_eq!(loaded.units().len(), 1);
    let unit = &loaded.units()[0];
    assert_eq!(unit.location, at(&original, 5, 5));
    assert_eq!(unit.orientation, 42.5);
}

#[test]
fn test_round_trip_preserves_wrap_flag() {
    let map = HexMap::new(20, 10, true, 7).unwrap();
    let mut buffer = Vec::new();
    save::save(&map, &mut buffer).unwrap();

    let loaded = save::load(&mut buffer.as_slice(), 7).unwrap();
    assert!(loaded.grid().wrapping());
    assert_eq!(loaded.grid().wrap_size(), 20);
}

#[test]
fn test_round_trip_positions_match_with_same_seed() {
    let original = build_fixture();
    let mut buffer = Vec::new();
    save::save(&original, &mut buffer).unwrap();

    let loaded = save::load(&mut buffer.as_slice(), 42).unwrap();
    for i in 0..original.grid().cell_count() {
        let index = CellIndex(i as u32);
        assert_eq!(original.grid().position(index), loaded.grid().position(index));
    }
}

// ============================================================================
// Older versions with defaulted fields
// ============================================================================

/// One flat unexplored cell in the pre-explored (11-byte) layout
fn push_v2_cell(buffer: &mut Vec<u8>, elevation: i8) {
    buffer.push(0); // terrain
    buffer.push(elevation as u8); // signed, unbiased
    buffer.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 0, 0]);
}

fn v2_header(version: i32, x: i32, z: i32) -> Vec<u8> {
    let mut buffer = Vec::new();
    buffer.extend_from_slice(&version.to_le_bytes());
    buffer.extend_from_slice(&x.to_le_bytes());
    buffer.extend_from_slice(&z.to_le_bytes());
    buffer
}

#[test]
fn test_v2_load_defaults_explored_and_wrapping() {
    let mut buffer = v2_header(2, 5, 5);
    for _ in 0..25 {
        push_v2_cell(&mut buffer, -3);
    }
    buffer.extend_from_slice(&0i32.to_le_bytes()); // no units

    let map = save::load(&mut buffer.as_slice(), 0).unwrap();
    assert!(!map.grid().wrapping());
    for i in 0..map.grid().cell_count() {
        let index = CellIndex(i as u32);
        // Signed-byte elevation decoded directly
        assert_eq!(map.grid().values(index).elevation(), -3);
        assert!(!map.grid().flags(index).explored());
    }
}

#[test]
fn test_v3_load_reads_explored_keeps_signed_elevation() {
    let mut buffer = v2_header(3, 5, 5);
    for _ in 0..25 {
        push_v2_cell(&mut buffer, 5);
        buffer.push(1); // explored
    }
    buffer.extend_from_slice(&0i32.to_le_bytes());

    let map = save::load(&mut buffer.as_slice(), 0).unwrap();
    let interior = at(&map, 2, 2);
    let rim = at(&map, 0, 0);
    assert_eq!(map.grid().values(interior).elevation(), 5);
    assert!(map.grid().flags(interior).explored());
    // Rim cells are unexplorable on non-wrapping maps; a stale explored
    // bit in the file must not stick
    assert!(!map.grid().flags(rim).explored());
}

#[test]
fn test_v4_load_decodes_biased_elevation_without_wrap_flag() {
    let mut buffer = v2_header(4, 5, 5);
    for _ in 0..25 {
        buffer.push(1); // terrain
        buffer.push(127 - 6); // elevation -6, biased
        buffer.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 0, 0]);
        buffer.push(0); // explored
    }
    buffer.extend_from_slice(&1i32.to_le_bytes());
    // Unit at offset (2, 2) => axial (1, 2)
    buffer.extend_from_slice(&1i32.to_le_bytes());
    buffer.extend_from_slice(&2i32.to_le_bytes());
    buffer.extend_from_slice(&90.0f32.to_le_bytes());

    let map = save::load(&mut buffer.as_slice(), 0).unwrap();
    assert!(!map.grid().wrapping());
    assert_eq!(map.grid().values(at(&map, 2, 2)).elevation(), -6);
    assert_eq!(map.units().len(), 1);
    assert_eq!(map.units()[0].location, at(&map, 2, 2));
    assert_eq!(map.units()[0].orientation, 90.0);
}

// ============================================================================
// Rejection paths
// ============================================================================

#[test]
fn test_unsupported_versions_rejected() {
    for version in [MIN_SAVE_VERSION - 1, SAVE_VERSION + 1, -1] {
        let buffer = v2_header(version, 5, 5);
        let result = save::load(&mut buffer.as_slice(), 0);
        assert!(matches!(result, Err(HexMapError::UnsupportedVersion(v)) if v == version));
    }
}

#[test]
fn test_invalid_dimensions_rejected() {
    let mut buffer = v2_header(2, 7, 5);
    push_v2_cell(&mut buffer, 0);
    assert!(matches!(
        save::load(&mut buffer.as_slice(), 0),
        Err(HexMapError::InvalidMapSize { .. })
    ));
}

#[test]
fn test_truncated_file_is_an_io_error() {
    let original = build_fixture();
    let mut buffer = Vec::new();
    save::save(&original, &mut buffer).unwrap();
    buffer.truncate(buffer.len() / 2);

    assert!(matches!(
        save::load(&mut buffer.as_slice(), 42),
        Err(HexMapError::IoError(_))
    ));
}

#[test]
fn test_unit_off_the_map_is_malformed() {
    let mut buffer = v2_header(2, 5, 5);
    for _ in 0..25 {
        push_v2_cell(&mut buffer, 0);
    }
    buffer.extend_from_slice(&1i32.to_le_bytes());
    buffer.extend_from_slice(&400i32.to_le_bytes());
    buffer.extend_from_slice(&400i32.to_le_bytes());
    buffer.extend_from_slice(&0.0f32.to_le_bytes());

    assert!(matches!(
        save::load(&mut buffer.as_slice(), 0),
        Err(HexMapError::MalformedData(_))
    ));
}
