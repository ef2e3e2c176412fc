//! Level containing the tile grid and entities

use crate::{EntityStore, Grid, Point};
use serde::{Deserialize, Serialize};

/// Default edge length of one tile in pixels
pub const DEFAULT_TILE_SIZE: u32 = 32;

/// Free-form information carried alongside a level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelMetadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// A level: one tile grid plus its entities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub name: String,
    pub grid: Grid,
    pub entities: EntityStore,
    /// Pixel size of one tile, used to map pixel entities onto the grid
    pub tile_size: u32,
    pub metadata: LevelMetadata,
}

impl Level {
    /// Create a new walled level with the player on the first floor tile
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self::with_tile_size(name, width, height, DEFAULT_TILE_SIZE)
    }

    pub fn with_tile_size(
        name: impl Into<String>,
        width: u32,
        height: u32,
        tile_size: u32,
    ) -> Self {
        let tile_size = tile_size.max(1);
        let center = (tile_size + tile_size / 2) as i32;
        Self {
            name: name.into(),
            grid: Grid::new(width, height),
            entities: EntityStore::new(Point::new(center, center)),
            tile_size,
            metadata: LevelMetadata::default(),
        }
    }

    /// Wrap an existing grid with an empty entity store
    pub fn from_grid(name: impl Into<String>, grid: Grid) -> Self {
        let tile_size = DEFAULT_TILE_SIZE;
        let center = (tile_size + tile_size / 2) as i32;
        Self {
            name: name.into(),
            grid,
            entities: EntityStore::new(Point::new(center, center)),
            tile_size,
            metadata: LevelMetadata::default(),
        }
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Convert a pixel position to tile coordinates for this level
    pub fn pixel_to_tile(&self, pixel: Point) -> Point {
        pixel.to_tile(self.tile_size)
    }
}
