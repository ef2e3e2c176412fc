//! On-disk shapes for levels
//!
//! Two formats are supported:
//! - `LevelFile`: structured JSON with dimensions, a flat row-major tile array,
//!   metadata and entity lists
//! - Legacy text grid: one line per row, whitespace-separated integers
//!
//! Both loaders validate everything before building a [`Level`] or [`Grid`], so
//! a malformed input never yields a partially populated result.

use crate::{EntityStore, Grid, GridError, Level, LevelMetadata, TileId, DEFAULT_TILE_SIZE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current structured format version
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
    #[error("line {line}, column {column}: '{token}' is not a tile id")]
    InvalidToken {
        line: usize,
        column: usize,
        token: String,
    },
    #[error("unsupported level format version {0}")]
    UnsupportedVersion(u32),
}

/// Structured level file (`*.level.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelFile {
    pub version: u32,
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,
    /// Row-major tile IDs, `width * height` entries
    pub tiles: Vec<TileId>,
    #[serde(default)]
    pub metadata: LevelMetadata,
    #[serde(default)]
    pub entities: EntityStore,
}

fn default_tile_size() -> u32 {
    DEFAULT_TILE_SIZE
}

impl LevelFile {
    pub fn from_level(level: &Level) -> Self {
        Self {
            version: FORMAT_VERSION,
            name: level.name.clone(),
            width: level.width(),
            height: level.height(),
            tile_size: level.tile_size,
            tiles: level.grid.tiles().to_vec(),
            metadata: level.metadata.clone(),
            entities: level.entities.clone(),
        }
    }

    pub fn into_level(self) -> Result<Level, FormatError> {
        if self.version == 0 || self.version > FORMAT_VERSION {
            return Err(FormatError::UnsupportedVersion(self.version));
        }
        let grid = Grid::from_tiles(self.width, self.height, self.tiles)?;
        Ok(Level {
            name: self.name,
            grid,
            entities: self.entities,
            tile_size: self.tile_size.max(1),
            metadata: self.metadata,
        })
    }
}

/// Serialize a level to pretty JSON
pub fn level_to_json(level: &Level) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(&LevelFile::from_level(level))?)
}

/// Parse a level from JSON, validating the tile buffer
pub fn level_from_json(content: &str) -> Result<Level, FormatError> {
    let file: LevelFile = serde_json::from_str(content)?;
    file.into_level()
}

/// Parse a legacy plain-text grid
///
/// Row count becomes the height and the column count of the first row the
/// width. Blank lines are skipped. Negative ids are rejected.
pub fn parse_legacy_grid(content: &str) -> Result<Grid, FormatError> {
    let mut rows: Vec<Vec<TileId>> = Vec::new();

    for (line_idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .enumerate()
            .map(|(col_idx, token)| {
                token.parse::<TileId>().map_err(|_| FormatError::InvalidToken {
                    line: line_idx + 1,
                    column: col_idx + 1,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }

    Ok(Grid::from_array_2d(&rows)?)
}

/// Write a grid in the legacy plain-text format
pub fn write_legacy_grid(grid: &Grid) -> String {
    let mut out = String::with_capacity(grid.len() * 3);
    for row in grid.to_array_2d() {
        let line: Vec<String> = row.iter().map(|t| t.to_string()).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Food, Point, Snail};

    #[test]
    fn test_parse_legacy_grid() {
        let grid = parse_legacy_grid("1 1 1\n1 0 1\n\n").unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(1, 1), 0);
        assert_eq!(write_legacy_grid(&grid), "1 1 1\n1 0 1\n");
    }

    #[test]
    fn test_legacy_ragged_rows_fail() {
        let err = parse_legacy_grid("1 1 1\n1 0\n").unwrap_err();
        assert!(matches!(
            err,
            FormatError::Grid(GridError::RaggedRow { row: 1, .. })
        ));
    }

    #[test]
    fn test_legacy_bad_token_fails() {
        let err = parse_legacy_grid("1 1\n1 x\n").unwrap_err();
        match err {
            FormatError::InvalidToken {
                line,
                column,
                token,
            } => {
                assert_eq!((line, column), (2, 2));
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(parse_legacy_grid("").is_err());
    }

    #[test]
    fn test_legacy_negative_tile_fails() {
        let err = parse_legacy_grid("0 -3\n0 0\n").unwrap_err();
        assert!(matches!(
            err,
            FormatError::Grid(GridError::NegativeTile { index: 1, tile: -3 })
        ));
    }

    #[test]
    fn test_level_json_rejects_negative_tile() {
        let json = r#"{"version":1,"name":"x","width":2,"height":1,"tiles":[0,-1]}"#;
        assert!(matches!(
            level_from_json(json),
            Err(FormatError::Grid(GridError::NegativeTile { .. }))
        ));
    }

    #[test]
    fn test_level_json_round_trip() {
        let mut level = Level::new("Cave", 6, 4);
        level.grid.set(2, 2, 5);
        level.entities.snails.push(Snail::new(Point::new(70, 70)));
        level.entities.food.push(Food::new(Point::new(3, 2)));
        level.metadata.author = "someone".to_string();

        let json = level_to_json(&level).unwrap();
        let loaded = level_from_json(&json).unwrap();
        assert_eq!(loaded, level);
    }

    #[test]
    fn test_level_json_rejects_wrong_tile_count() {
        let json = r#"{"version":1,"name":"x","width":2,"height":2,"tiles":[0,0,0],
            "entities":{"player":{"x":0,"y":0}}}"#;
        assert!(matches!(
            level_from_json(json),
            Err(FormatError::Grid(GridError::BufferSize { .. }))
        ));
    }

    #[test]
    fn test_level_json_rejects_future_version() {
        let json = r#"{"version":99,"name":"x","width":1,"height":1,"tiles":[0]}"#;
        assert!(matches!(
            level_from_json(json),
            Err(FormatError::UnsupportedVersion(99))
        ));
    }
}
