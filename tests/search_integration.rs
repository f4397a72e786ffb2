//! Integration tests for pathfinding and visibility
//!
//! These tests drive the search engine through the public map surface:
//! - Shortest paths under the standard unit travel rules
//! - Terrain shaping (roads, cliffs, water) changing route choice
//! - Fog-of-war visibility following units around
//! - Repeated searches sharing one engine without cross-talk

use hexmarch::cell::CellData;
use hexmarch::coords::HexCoordinates;
use hexmarch::core::types::{CellIndex, HexDirection};
use hexmarch::grid::HexGrid;
use hexmarch::map::HexMap;
use hexmarch::search::SearchEngine;
use hexmarch::unit::TravelPolicy;

/// Uniform unit-cost rules with no terrain restrictions
struct OpenGround;

impl TravelPolicy for OpenGround {
    fn speed(&self) -> i32 {
        24
    }
    fn vision_range(&self) -> i32 {
        3
    }
    fn is_valid_destination(&self, _cell: CellData) -> bool {
        true
    }
    fn move_cost(&self, _from: CellData, _to: CellData, _d: HexDirection) -> Option<i32> {
        Some(1)
    }
}

/// Standard terrain costs (flat 5, slope 10, roads 1) but ignoring the
/// exploration requirement, as a map editor's route preview would
struct SurveyorRules;

impl TravelPolicy for SurveyorRules {
    fn speed(&self) -> i32 {
        24
    }
    fn vision_range(&self) -> i32 {
        3
    }
    fn is_valid_destination(&self, cell: CellData) -> bool {
        !cell.is_underwater() && !cell.occupied
    }
    fn move_cost(&self, from: CellData, to: CellData, direction: HexDirection) -> Option<i32> {
        use hexmarch::core::types::HexEdgeType;
        let edge = HexEdgeType::between(from.elevation(), to.elevation());
        if edge == HexEdgeType::Cliff {
            return None;
        }
        if from.has_road(direction) {
            Some(1)
        } else if from.walled() != to.walled() {
            None
        } else {
            let base = if edge == HexEdgeType::Flat { 5 } else { 10 };
            Some(base + to.values.urban_level() + to.values.farm_level() + to.values.plant_level())
        }
    }
}

fn at(grid: &HexGrid, x: i32, z: i32) -> CellIndex {
    grid.try_get_index(HexCoordinates::from_offset(x, z))
        .unwrap()
}

// ============================================================================
// Pathfinding
// ============================================================================

#[test]
fn test_corner_to_corner_path_equals_hex_distance() {
    let mut grid = HexGrid::new(5, 5, false, 0).unwrap();
    let mut engine = SearchEngine::new();
    let from = at(&grid, 0, 0);
    let to = at(&grid, 4, 4);
    let hex_distance = grid.coordinates(from).distance_to(grid.coordinates(to), 0);

    let path = engine.find_path(&mut grid, from, to, &OpenGround).unwrap();
    assert_eq!(path.cost, hex_distance);
    assert_eq!(path.cells.len() as i32, hex_distance + 1);
}

#[test]
fn test_road_detour_beats_rough_direct_route() {
    let mut grid = HexGrid::new(10, 10, false, 0).unwrap();
    let mut engine = SearchEngine::new();
    let from = at(&grid, 1, 5);
    let to = at(&grid, 6, 5);

    // Direct flat route costs 5 per step
    let direct = engine
        .find_path(&mut grid, from, to, &SurveyorRules)
        .unwrap();
    assert_eq!(direct.cost, 25);

    // Lay a road along the row; the same route now costs 1 per step
    for x in 1..6 {
        grid.add_road(at(&grid, x, 5), HexDirection::E);
    }
    let on_road = engine
        .find_path(&mut grid, from, to, &SurveyorRules)
        .unwrap();
    assert_eq!(on_road.cost, 5);
}

#[test]
fn test_cliff_wall_forces_detour() {
    let mut grid = HexGrid::new(10, 10, false, 0).unwrap();
    let mut engine = SearchEngine::new();
    let from = at(&grid, 2, 5);
    let to = at(&grid, 6, 5);

    let flat = engine
        .find_path(&mut grid, from, to, &SurveyorRules)
        .unwrap();

    // A cliff column between them, with a gap in the north
    for z in 0..8 {
        grid.set_elevation(at(&grid, 4, z), 3);
    }
    let detoured = engine
        .find_path(&mut grid, from, to, &SurveyorRules)
        .unwrap();
    assert!(detoured.cost > flat.cost);
    assert!(detoured.cells.len() > flat.cells.len());
}

#[test]
fn test_island_is_unreachable() {
    let mut grid = HexGrid::new(10, 10, false, 0).unwrap();
    let mut engine = SearchEngine::new();
    let island = at(&grid, 5, 5);

    // Drown every neighbor of the target
    for direction in HexDirection::ALL {
        let shore = grid.neighbor(island, direction).unwrap();
        grid.set_water_level(shore, 3);
    }

    let start = at(&grid, 1, 1);
    let result = engine.find_path(&mut grid, start, island, &SurveyorRules);
    assert!(result.is_none());
}

#[test]
fn test_wrapping_map_paths_across_the_seam() {
    let mut grid = HexGrid::new(20, 10, true, 0).unwrap();
    let mut engine = SearchEngine::new();
    let west = at(&grid, 1, 5);
    let east = at(&grid, 18, 5);

    let path = engine.find_path(&mut grid, west, east, &OpenGround).unwrap();
    // 3 steps across the seam, not 17 across the map
    assert_eq!(path.cost, 3);
}

#[test]
fn test_searches_do_not_leak_between_invocations() {
    let mut grid = HexGrid::new(10, 10, false, 0).unwrap();
    let mut engine = SearchEngine::new();

    let from = at(&grid, 0, 0);
    let to = at(&grid, 9, 9);
    let mid_from = at(&grid, 3, 7);
    let mid_to = at(&grid, 8, 1);
    let center = at(&grid, 5, 5);
    let baseline = engine.find_path(&mut grid, from, to, &OpenGround).unwrap();
    for _ in 0..50 {
        engine
            .find_path(&mut grid, mid_from, mid_to, &OpenGround)
            .unwrap();
        engine.visible_cells(&mut grid, center, 4);
    }
    let repeat = engine.find_path(&mut grid, from, to, &OpenGround).unwrap();
    assert_eq!(baseline.cost, repeat.cost);
}

// ============================================================================
// Visibility
// ============================================================================

#[test]
fn test_visibility_boundary_is_exact() {
    let mut grid = HexGrid::new(15, 15, false, 0).unwrap();
    let mut engine = SearchEngine::new();
    let center = at(&grid, 7, 7);

    let visible = engine.visible_cells(&mut grid, center, 3);
    // Exactly range away with no extra elevation: visible
    assert!(visible.contains(&at(&grid, 4, 7)));
    // One cell beyond range: not visible
    assert!(!visible.contains(&at(&grid, 3, 7)));
}

#[test]
fn test_visibility_respects_wrap() {
    let mut grid = HexGrid::new(20, 10, true, 0).unwrap();
    let mut engine = SearchEngine::new();
    let west = at(&grid, 0, 5);

    let visible = engine.visible_cells(&mut grid, west, 2);
    assert!(visible.contains(&at(&grid, 18, 5)));
}

#[test]
fn test_high_water_rim_seals_the_view() {
    let mut grid = HexGrid::new(15, 15, false, 0).unwrap();
    let mut engine = SearchEngine::new();
    let center = at(&grid, 7, 7);

    // Water counts as view elevation; a rim of deep water higher than the
    // range budget hides itself and everything behind it
    for direction in HexDirection::ALL {
        let rim = grid.neighbor(center, direction).unwrap();
        grid.set_water_level(rim, 4);
    }
    let visible = engine.visible_cells(&mut grid, center, 3);
    assert_eq!(visible, vec![center]);
}

// ============================================================================
// Units driving both modes
// ============================================================================

#[test]
fn test_unit_path_follows_explored_road() {
    let mut map = HexMap::new(15, 15, false, 0).unwrap();
    let home = at(map.grid(), 7, 7);

    // A road east, laid before the unit arrives
    for x in 7..10 {
        let cell = at(map.grid(), x, 7);
        map.grid_mut().add_road(cell, HexDirection::E);
    }
    let id = map.add_unit(home, 0.0).unwrap();

    let target = at(map.grid(), 10, 7);
    let path = map.find_path(id, target).unwrap().unwrap();
    // Three road edges at cost 1 each
    assert_eq!(path.cost, 3);
    assert_eq!(path.cells.len(), 4);
}

#[test]
fn test_two_units_block_each_other() {
    let mut map = HexMap::new(15, 15, false, 0).unwrap();
    let a = map.add_unit(at(map.grid(), 7, 7), 0.0).unwrap();
    let blocker_home = at(map.grid(), 9, 7);
    map.add_unit(blocker_home, 0.0).unwrap();

    // The occupied cell cannot be the destination
    assert!(map.find_path(a, blocker_home).unwrap().is_none());
}
