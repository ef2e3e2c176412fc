//! Project management for the map editor
//!
//! This module handles level file save/load and dirty tracking.

mod file;

pub use file::*;

use map_forge_core::Level;
use std::path::PathBuf;

/// An open level document
#[derive(Debug, Clone)]
pub struct Project {
    pub level: Level,
    /// Where the level was loaded from or last saved to
    pub path: Option<PathBuf>,
    /// Unsaved changes exist
    pub dirty: bool,
}

impl Project {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            path: None,
            dirty: false,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Display name, with a marker when there are unsaved changes
    pub fn title(&self) -> String {
        if self.dirty {
            format!("{}*", self.level.name)
        } else {
            self.level.name.clone()
        }
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new(Level::new("Untitled", 32, 24))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_marks_unsaved_changes() {
        let mut project = Project::new(Level::new("Burrow", 4, 4));
        assert_eq!(project.title(), "Burrow");
        project.mark_dirty();
        assert_eq!(project.title(), "Burrow*");
    }
}
