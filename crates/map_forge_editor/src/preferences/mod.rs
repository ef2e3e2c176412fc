//! Persisted user preferences

mod file;

pub use file::*;

use map_forge_core::{DEFAULT_TILE_SIZE, WALL_TILE};
use serde::{Deserialize, Serialize};

/// Number of recent files remembered
pub const MAX_RECENT_FILES: usize = 10;

/// A recently opened level file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentFile {
    pub name: String,
    pub path: String,
}

/// Editor preferences, stored as JSON in the platform config directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    pub default_brush_size: u32,
    pub default_tile: i32,
    /// Size of newly created levels, in tiles
    pub default_width: u32,
    pub default_height: u32,
    pub tile_size: u32,
    pub auto_open_last_project: bool,
    /// Most recent first
    pub recent_files: Vec<RecentFile>,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            default_brush_size: 1,
            default_tile: WALL_TILE,
            default_width: 32,
            default_height: 24,
            tile_size: DEFAULT_TILE_SIZE,
            auto_open_last_project: false,
            recent_files: Vec::new(),
        }
    }
}

impl EditorPreferences {
    /// Remember a file as the most recently used one
    pub fn add_recent(&mut self, name: impl Into<String>, path: impl Into<String>) {
        let path = path.into();
        self.recent_files.retain(|r| r.path != path);
        self.recent_files.insert(
            0,
            RecentFile {
                name: name.into(),
                path,
            },
        );
        self.recent_files.truncate(MAX_RECENT_FILES);
    }

    pub fn last_project(&self) -> Option<&RecentFile> {
        self.recent_files.first()
    }
}
