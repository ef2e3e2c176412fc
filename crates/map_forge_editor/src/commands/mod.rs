//! Undo/redo command system

mod action;
mod history;

pub use action::{Action, TileChange};
pub use history::{CommandHistory, MAX_HISTORY_DEPTH};
