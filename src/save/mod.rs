//! Versioned binary persistence for maps and units
//!
//! The format is little-endian and deliberately byte-oriented: every cell
//! attribute fits a byte (elevation is biased into one), so a saved map is
//! `12 + 13n` bytes plus its units. The loader accepts every header
//! version back to [`MIN_SAVE_VERSION`], defaulting fields the older
//! format lacks: pre-wrap maps load as non-wrapping, pre-exploration maps
//! load fully unexplored.

use std::io::{Read, Write};

use crate::cell::{CellFlags, CellValues};
use crate::coords::HexCoordinates;
use crate::core::config::{
    ELEVATION_BIAS, MIN_SAVE_VERSION, SAVE_VERSION, SAVE_VERSION_BIASED_ELEVATION,
    SAVE_VERSION_EXPLORED, SAVE_VERSION_WRAPPING,
};
use crate::core::error::{HexMapError, Result};
use crate::core::types::{CellIndex, HexDirection};
use crate::map::HexMap;

const RIVER_PRESENT: u8 = 0x80;
const ROAD_BITS: u8 = 0x3F;

fn write_i32(writer: &mut impl Write, value: i32) -> Result<()> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

fn write_f32(writer: &mut impl Write, value: f32) -> Result<()> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

fn write_u8(writer: &mut impl Write, value: u8) -> Result<()> {
    writer.write_all(&[value])?;
    Ok(())
}

fn read_i32(reader: &mut impl Read) -> Result<i32> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(i32::from_le_bytes(bytes))
}

fn read_f32(reader: &mut impl Read) -> Result<f32> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(f32::from_le_bytes(bytes))
}

fn read_u8(reader: &mut impl Read) -> Result<u8> {
    let mut byte = [0u8; 1];
    reader.read_exact(&mut byte)?;
    Ok(byte[0])
}

fn river_byte(direction: Option<HexDirection>) -> u8 {
    match direction {
        Some(d) => RIVER_PRESENT | d as u8,
        None => 0,
    }
}

fn parse_river_byte(byte: u8) -> Result<Option<HexDirection>> {
    if byte == 0 {
        return Ok(None);
    }
    if byte & RIVER_PRESENT == 0 {
        return Err(HexMapError::MalformedData(format!(
            "river byte {byte:#04x} lacks presence bit"
        )));
    }
    HexDirection::from_u8(byte & !RIVER_PRESENT)
        .map(Some)
        .ok_or_else(|| HexMapError::MalformedData(format!("invalid river direction in {byte:#04x}")))
}

/// Write the map in the current format version
pub fn save(map: &HexMap, writer: &mut impl Write) -> Result<()> {
    let grid = map.grid();
    write_i32(writer, SAVE_VERSION)?;
    write_i32(writer, grid.cell_count_x())?;
    write_i32(writer, grid.cell_count_z())?;
    write_u8(writer, grid.wrapping() as u8)?;

    for i in 0..grid.cell_count() {
        let index = CellIndex(i as u32);
        let values = grid.values(index);
        let flags = grid.flags(index);
        write_u8(writer, values.terrain_type_index() as u8)?;
        write_u8(writer, (values.elevation() + ELEVATION_BIAS) as u8)?;
        write_u8(writer, values.water_level() as u8)?;
        write_u8(writer, values.urban_level() as u8)?;
        write_u8(writer, values.farm_level() as u8)?;
        write_u8(writer, values.plant_level() as u8)?;
        write_u8(writer, values.special_index() as u8)?;
        write_u8(writer, flags.walled() as u8)?;
        write_u8(writer, river_byte(flags.incoming_river()))?;
        write_u8(writer, river_byte(flags.outgoing_river()))?;
        write_u8(writer, flags.road_bits())?;
        write_u8(writer, flags.explored() as u8)?;
    }

    write_i32(writer, map.units().len() as i32)?;
    for unit in map.units() {
        let coordinates = grid.coordinates(unit.location);
        write_i32(writer, coordinates.x())?;
        write_i32(writer, coordinates.z())?;
        write_f32(writer, unit.orientation)?;
    }
    Ok(())
}

/// Read a map saved by any supported format version.
///
/// `seed` drives the regenerated noise table; cell positions are derived
/// state and are not part of the format.
pub fn load(reader: &mut impl Read, seed: u64) -> Result<HexMap> {
    let version = read_i32(reader)?;
    if !(MIN_SAVE_VERSION..=SAVE_VERSION).contains(&version) {
        return Err(HexMapError::UnsupportedVersion(version));
    }

    let x = read_i32(reader)?;
    let z = read_i32(reader)?;
    let wrapping = if version >= SAVE_VERSION_WRAPPING {
        read_u8(reader)? != 0
    } else {
        false
    };

    let mut map = HexMap::new(x, z, wrapping, seed)?;
    for i in 0..map.grid().cell_count() {
        let index = CellIndex(i as u32);
        let terrain = read_u8(reader)? as i32;
        let elevation_byte = read_u8(reader)?;
        let elevation = if version >= SAVE_VERSION_BIASED_ELEVATION {
            elevation_byte as i32 - ELEVATION_BIAS
        } else {
            elevation_byte as i8 as i32
        };
        let water = read_u8(reader)? as i32;
        let urban = read_u8(reader)? as i32;
        let farm = read_u8(reader)? as i32;
        let plant = read_u8(reader)? as i32;
        let special = read_u8(reader)? as i32;
        let walled = read_u8(reader)? != 0;
        let incoming = parse_river_byte(read_u8(reader)?)?;
        let outgoing = parse_river_byte(read_u8(reader)?)?;
        let roads = read_u8(reader)? & ROAD_BITS;
        let explored = if version >= SAVE_VERSION_EXPLORED {
            read_u8(reader)? != 0
        } else {
            false
        };

        let values = CellValues::new()
            .with_terrain_type_index(terrain)
            .with_elevation(elevation)
            .with_water_level(water)
            .with_urban_level(urban)
            .with_farm_level(farm)
            .with_plant_level(plant)
            .with_special_index(special);
        let mut flags = CellFlags::new()
            .with_road_bits(roads)
            .with_walled(walled)
            .with_explored(explored);
        if let Some(direction) = incoming {
            flags = flags.with_incoming_river(direction);
        }
        if let Some(direction) = outgoing {
            flags = flags.with_outgoing_river(direction);
        }
        map.grid_mut().load_cell(index, values, flags);
    }

    let unit_count = read_i32(reader)?;
    if unit_count < 0 {
        return Err(HexMapError::MalformedData(format!(
            "negative unit count {unit_count}"
        )));
    }
    for _ in 0..unit_count {
        let cx = read_i32(reader)?;
        let cz = read_i32(reader)?;
        let orientation = read_f32(reader)?;
        let location = map
            .grid()
            .try_get_index(HexCoordinates::new(cx, cz))
            .ok_or_else(|| {
                HexMapError::MalformedData(format!("unit at ({cx}, {cz}) is off the map"))
            })?;
        map.add_unit(location, orientation)?;
    }

    tracing::info!(
        "Loaded {}x{} map, format version {} ({} units)",
        x,
        z,
        version,
        unit_count
    );
    Ok(map)
}
