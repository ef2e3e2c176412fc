//! Project file save/load operations

use super::Project;
use map_forge_core::{
    level_from_json, level_to_json, parse_legacy_grid, write_legacy_grid, FormatError, Level,
};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Format error: {0}")]
    Format(#[from] FormatError),
    #[error("No file path set")]
    NoPath,
}

impl Project {
    /// Load a structured level file
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let content = std::fs::read_to_string(path)?;
        let level = level_from_json(&content)?;
        info!(
            "Loaded level '{}' ({}x{}) from {:?}",
            level.name,
            level.width(),
            level.height(),
            path
        );

        Ok(Self {
            level,
            path: Some(path.to_path_buf()),
            dirty: false,
        })
    }

    /// Save the level to a structured file
    pub fn save(&mut self, path: &Path) -> Result<(), ProjectError> {
        let content = level_to_json(&self.level)?;
        std::fs::write(path, content)?;
        info!("Saved level '{}' to {:?}", self.level.name, path);

        self.path = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    /// Save to current path if set
    pub fn save_current(&mut self) -> Result<(), ProjectError> {
        if let Some(path) = self.path.clone() {
            self.save(&path)
        } else {
            Err(ProjectError::NoPath)
        }
    }

    /// Import a legacy text grid as a new, unsaved level
    pub fn import_legacy(path: &Path) -> Result<Self, ProjectError> {
        let content = std::fs::read_to_string(path)?;
        let grid = parse_legacy_grid(&content)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Imported".to_string());
        info!(
            "Imported legacy grid {}x{} from {:?}",
            grid.width(),
            grid.height(),
            path
        );

        let mut project = Self::new(Level::from_grid(name, grid));
        project.mark_dirty();
        Ok(project)
    }

    /// Write the grid in the legacy text format
    pub fn export_legacy(&self, path: &Path) -> Result<(), ProjectError> {
        std::fs::write(path, write_legacy_grid(&self.level.grid))?;
        info!("Exported legacy grid to {:?}", path);
        Ok(())
    }
}
