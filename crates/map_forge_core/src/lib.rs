//! Core data structures for map_forge
//!
//! This crate provides the fundamental types for representing a level:
//! - `Grid` - A flat, bounds-checked tile buffer
//! - `EntityStore` - Spawns, patrol paths, pickups and triggers
//! - `Level` - A grid plus its entities
//! - `LevelFile` - The structured on-disk shape, plus the legacy text grid codec

mod entity;
mod format;
mod grid;
mod level;

pub use entity::{
    EntityError, EntityItem, EntityList, EntityStore, Food, Point, PointRef, Snail, Spider,
    Tripwire,
};
pub use format::{
    level_from_json, level_to_json, parse_legacy_grid, write_legacy_grid, FormatError, LevelFile,
    FORMAT_VERSION,
};
pub use grid::{Grid, GridError, TileId, FLOOR_TILE, OUT_OF_BOUNDS, WALL_TILE};
pub use level::{Level, LevelMetadata, DEFAULT_TILE_SIZE};
