//! Editor session state and the single-owner editing facade

use map_forge_core::{Level, TileId, WALL_TILE};
use tracing::{debug, info};

use crate::commands::CommandHistory;
use crate::preferences::EditorPreferences;
use crate::tools::{self, PathBuilder, ToolInput, ToolMode, MAX_BRUSH_SIZE};

/// Tool and selection state passed into every tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSession {
    pub tool: ToolMode,
    /// Brush diameter in tiles (1..=10)
    pub brush_size: u32,
    /// Tile painted by brush, rectangle, fill and line
    pub selected_tile: TileId,
    /// In-progress spider path
    pub path: PathBuilder,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self {
            tool: ToolMode::Brush,
            brush_size: 1,
            selected_tile: WALL_TILE,
            path: PathBuilder::Idle,
        }
    }
}

impl EditorSession {
    /// Seed a session from saved preferences
    pub fn from_preferences(preferences: &EditorPreferences) -> Self {
        let mut session = Self::default();
        session.set_brush_size(preferences.default_brush_size);
        if preferences.default_tile >= 0 {
            session.selected_tile = preferences.default_tile;
        }
        session
    }

    pub fn set_brush_size(&mut self, size: u32) {
        self.brush_size = size.clamp(1, MAX_BRUSH_SIZE);
    }

    /// Switch tools. Leaving the spider tool drops any pending path.
    pub fn set_tool(&mut self, tool: ToolMode) {
        if tool != ToolMode::Spider {
            self.path.cancel();
        }
        self.tool = tool;
    }
}

/// A level together with its history and session
///
/// Every mutation goes through `&mut self`, so a tool call and the history
/// push that records it can never interleave with another edit.
#[derive(Debug)]
pub struct Editor {
    pub level: Level,
    pub history: CommandHistory,
    pub session: EditorSession,
}

impl Editor {
    pub fn new(level: Level) -> Self {
        Self::with_session(level, EditorSession::default())
    }

    pub fn with_session(level: Level, session: EditorSession) -> Self {
        Self {
            level,
            history: CommandHistory::new(),
            session,
        }
    }

    /// Run the active tool and record the result. Returns true if anything changed.
    pub fn apply(&mut self, input: ToolInput) -> bool {
        let action = tools::apply_tool(&mut self.session, &mut self.level, input);
        let changed = action.is_some();
        self.history.execute(action);
        changed
    }

    /// Group the following tool calls (a drag stroke) into one history entry
    pub fn begin_stroke(&mut self) {
        self.history.begin_compound(self.session.tool.label());
    }

    pub fn end_stroke(&mut self) {
        self.history.end_compound();
    }

    /// Commit the pending spider path. Returns true if a spider was added.
    pub fn finish_path(&mut self) -> bool {
        let action = self.session.path.finish(&mut self.level.entities);
        let added = action.is_some();
        if !added {
            debug!("Spider path discarded: fewer than 2 waypoints");
        }
        self.history.execute(action);
        added
    }

    pub fn cancel_path(&mut self) {
        self.session.path.cancel();
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.level)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.level)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Resize the grid. History is cleared because recorded coordinates may no
    /// longer exist.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.history.clear();
        self.session.path.cancel();
        self.level.grid.resize(width, height);
        info!(
            "Resized level '{}' to {}x{}",
            self.level.name,
            self.level.width(),
            self.level.height()
        );
    }

    /// Swap in another level, discarding history
    pub fn replace_level(&mut self, level: Level) -> Level {
        self.history.clear();
        self.session.path.cancel();
        std::mem::replace(&mut self.level, level)
    }
}
