//! map_forge_editor - tile and entity editing engine with undo/redo
//!
//! This crate provides the editing core of a level editor:
//! - Tile tools (brush, rectangle, flood fill, line, eyedropper)
//! - Entity tools (spawns, snails, spider patrol paths, food, tripwires)
//! - A bounded undo/redo history with compound grouping
//! - Level file save/load and legacy text import/export
//! - Persisted editor preferences
//!
//! # Usage
//!
//! ```rust
//! use map_forge_editor::{Editor, ToolInput, ToolMode};
//! use map_forge_editor::map_forge_core::{Level, Point};
//!
//! let mut editor = Editor::new(Level::new("Cave", 16, 12));
//! editor.session.set_tool(ToolMode::Fill);
//! editor.session.selected_tile = 3;
//! editor.apply(ToolInput::click(Point::new(100, 100)));
//! assert!(editor.can_undo());
//! editor.undo();
//! ```

pub mod commands;
pub mod preferences;
pub mod project;
pub mod session;
pub mod tools;

// Re-export the data model
pub use map_forge_core;

pub use commands::{Action, CommandHistory, TileChange, MAX_HISTORY_DEPTH};
pub use session::{Editor, EditorSession};
pub use tools::{apply_tool, PathBuilder, ToolInput, ToolMode};
