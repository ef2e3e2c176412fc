//! Tile grid - a flat, row-major buffer of tile IDs

use thiserror::Error;

/// Integer identifying one cell's terrain. Meaning is owned by callers.
pub type TileId = i32;

/// Returned by [`Grid::get`] for coordinates outside the grid
pub const OUT_OF_BOUNDS: TileId = -1;
/// Walkable ground, also the value the eraser paints
pub const FLOOR_TILE: TileId = 0;
/// Solid wall, seeded around the border of a new grid
pub const WALL_TILE: TileId = 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has no rows")]
    Empty,
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("tile buffer has {found} cells, expected {expected} for {width}x{height}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        found: usize,
    },
    #[error("cell {index} holds negative tile id {tile}")]
    NegativeTile { index: usize, tile: TileId },
}

/// A 2D tile grid
///
/// `tiles.len()` is always `width * height`, addressed as `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<TileId>,
}

/// Number of cells in a `width` x `height` grid
#[inline]
fn cell_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Loaded buffers must hold real tile ids; negatives collide with [`OUT_OF_BOUNDS`]
fn check_non_negative(tiles: &[TileId]) -> Result<(), GridError> {
    match tiles.iter().position(|&t| t < 0) {
        Some(index) => Err(GridError::NegativeTile {
            index,
            tile: tiles[index],
        }),
        None => Ok(()),
    }
}

impl Grid {
    /// Create a grid of floor tiles surrounded by a one-cell wall border
    pub fn new(width: u32, height: u32) -> Self {
        let mut grid = Self::filled(width, height, FLOOR_TILE);
        let (w, h) = (grid.width as i32, grid.height as i32);
        for x in 0..w {
            grid.set(x, 0, WALL_TILE);
            grid.set(x, h - 1, WALL_TILE);
        }
        for y in 0..h {
            grid.set(0, y, WALL_TILE);
            grid.set(w - 1, y, WALL_TILE);
        }
        grid
    }

    /// Create a grid with every cell set to `tile`
    pub fn filled(width: u32, height: u32, tile: TileId) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            tiles: vec![tile; cell_count(width, height)],
        }
    }

    /// Build a grid from an existing row-major buffer
    pub fn from_tiles(width: u32, height: u32, tiles: Vec<TileId>) -> Result<Self, GridError> {
        let expected = cell_count(width, height);
        if width == 0 || height == 0 || tiles.len() != expected {
            return Err(GridError::BufferSize {
                width,
                height,
                expected,
                found: tiles.len(),
            });
        }
        check_non_negative(&tiles)?;
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells (`width * height`)
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Raw row-major tile buffer
    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Tile at (x, y), or [`OUT_OF_BOUNDS`]
    pub fn get(&self, x: i32, y: i32) -> TileId {
        self.index(x, y)
            .map(|idx| self.tiles[idx])
            .unwrap_or(OUT_OF_BOUNDS)
    }

    /// Set the tile at (x, y). Out-of-bounds writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, tile: TileId) {
        if let Some(idx) = self.index(x, y) {
            self.tiles[idx] = tile;
        }
    }

    /// Resize the grid, keeping the overlapping top-left rectangle.
    /// Newly exposed cells are zero.
    pub fn resize(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        let mut tiles = vec![0; cell_count(width, height)];

        let copy_w = self.width.min(width) as usize;
        let copy_h = self.height.min(height) as usize;
        for y in 0..copy_h {
            let src = y * self.width as usize;
            let dst = y * width as usize;
            tiles[dst..dst + copy_w].copy_from_slice(&self.tiles[src..src + copy_w]);
        }

        self.width = width;
        self.height = height;
        self.tiles = tiles;
    }

    /// Export as rows (`rows[y][x]`)
    pub fn to_array_2d(&self) -> Vec<Vec<TileId>> {
        self.tiles
            .chunks(self.width as usize)
            .map(|row| row.to_vec())
            .collect()
    }

    /// Import from rows. All rows must share the first row's length.
    pub fn from_array_2d(rows: &[Vec<TileId>]) -> Result<Self, GridError> {
        let first = rows.first().ok_or(GridError::Empty)?;
        let width = first.len();
        if width == 0 {
            return Err(GridError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::RaggedRow {
                    row: row_idx,
                    expected: width,
                    found: row.len(),
                });
            }
            tiles.extend_from_slice(row);
        }
        check_non_negative(&tiles)?;

        Ok(Self {
            width: width as u32,
            height: rows.len() as u32,
            tiles,
        })
    }
}
