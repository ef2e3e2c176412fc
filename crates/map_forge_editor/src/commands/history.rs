//! Bounded undo/redo stacks with compound recording

use std::collections::VecDeque;

use map_forge_core::Level;
use tracing::debug;

use super::Action;

/// Maximum number of entries kept on each stack
pub const MAX_HISTORY_DEPTH: usize = 100;

/// An open compound collecting children before it is committed
#[derive(Debug)]
struct Recording {
    label: String,
    children: Vec<Action>,
}

/// Undo/redo history
///
/// Pushing a new action clears the redo stack. Undo and redo move the popped
/// action to the opposite stack. While a compound is being recorded, pushed
/// actions accumulate in it instead of touching either stack.
#[derive(Debug, Default)]
pub struct CommandHistory {
    undo_stack: VecDeque<Action>,
    redo_stack: VecDeque<Action>,
    recording: Option<Recording>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result of a tool call. `None` is ignored.
    pub fn execute(&mut self, action: Option<Action>) {
        if let Some(action) = action {
            self.push(action);
        }
    }

    /// Record an already-applied action
    pub fn push(&mut self, action: Action) {
        if let Some(recording) = self.recording.as_mut() {
            recording.children.push(action);
            return;
        }

        debug!("History push: {}", action.describe());
        self.redo_stack.clear();
        Self::push_bounded(&mut self.undo_stack, action);
    }

    fn push_bounded(stack: &mut VecDeque<Action>, action: Action) {
        stack.push_back(action);
        while stack.len() > MAX_HISTORY_DEPTH {
            stack.pop_front();
        }
    }

    /// Undo the most recent entry. Returns false if there was nothing to undo.
    ///
    /// An open compound is committed first so it can be undone as a unit.
    pub fn undo(&mut self, level: &mut Level) -> bool {
        self.end_compound();
        let Some(action) = self.undo_stack.pop_back() else {
            return false;
        };
        debug!("Undo: {}", action.describe());
        action.undo(level);
        Self::push_bounded(&mut self.redo_stack, action);
        true
    }

    /// Redo the most recently undone entry. Returns false if there was nothing to redo.
    pub fn redo(&mut self, level: &mut Level) -> bool {
        self.end_compound();
        let Some(action) = self.redo_stack.pop_back() else {
            return false;
        };
        debug!("Redo: {}", action.describe());
        action.redo(level);
        Self::push_bounded(&mut self.undo_stack, action);
        true
    }

    /// Start grouping pushed actions into one entry.
    /// A compound that is already open is committed first.
    pub fn begin_compound(&mut self, label: impl Into<String>) {
        self.end_compound();
        self.recording = Some(Recording {
            label: label.into(),
            children: Vec::new(),
        });
    }

    /// Commit the open compound. Empty compounds are dropped.
    pub fn end_compound(&mut self) {
        let Some(recording) = self.recording.take() else {
            return;
        };
        if recording.children.is_empty() {
            return;
        }
        self.push(Action::Compound {
            children: recording.children,
            label: recording.label,
        });
    }

    pub fn is_recording(&self) -> bool {
        self.recording.is_some()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.back().map(Action::describe)
    }

    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.back().map(Action::describe)
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Oldest entry still reachable by undo
    pub fn oldest_undo(&self) -> Option<&Action> {
        self.undo_stack.front()
    }

    /// Drop all entries and any open compound
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.recording = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::TileChange;
    use map_forge_core::Grid;

    fn level() -> Level {
        Level::from_grid("test", Grid::filled(4, 4, 0))
    }

    /// Apply a single-cell edit and return its action
    fn paint(level: &mut Level, x: i32, y: i32, tile: i32) -> Action {
        let before = level.grid.get(x, y);
        level.grid.set(x, y, tile);
        Action::TileEdit(TileChange::new(x, y, before, tile))
    }

    #[test]
    fn test_undo_redo_transfer() {
        let mut level = level();
        let mut history = CommandHistory::new();
        assert!(!history.undo(&mut level));
        assert!(!history.redo(&mut level));

        let action = paint(&mut level, 1, 1, 3);
        history.execute(Some(action));
        assert!(history.can_undo());
        assert!(!history.can_redo());

        assert!(history.undo(&mut level));
        assert_eq!(level.grid.get(1, 1), 0);
        assert!(history.can_redo());
        assert!(!history.can_undo());

        assert!(history.redo(&mut level));
        assert_eq!(level.grid.get(1, 1), 3);
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn test_execute_none_is_noop() {
        let mut history = CommandHistory::new();
        history.execute(None);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_push_clears_redo() {
        let mut level = level();
        let mut history = CommandHistory::new();
        let first = paint(&mut level, 0, 0, 1);
        history.push(first);
        history.undo(&mut level);
        assert!(history.can_redo());

        let second = paint(&mut level, 2, 2, 5);
        history.push(second);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_depth_is_bounded() {
        let mut level = level();
        let mut history = CommandHistory::new();
        for i in 0..=MAX_HISTORY_DEPTH as i32 {
            let action = paint(&mut level, 0, 0, i + 1);
            history.push(action);
        }
        assert_eq!(history.undo_len(), MAX_HISTORY_DEPTH);
        assert!(history.can_undo());
        assert_eq!(
            history.oldest_undo(),
            Some(&Action::TileEdit(TileChange::new(0, 0, 1, 2)))
        );
    }

    #[test]
    fn test_compound_groups_children() {
        let mut level = level();
        let mut history = CommandHistory::new();

        history.begin_compound("Stroke");
        assert!(history.is_recording());
        let a = paint(&mut level, 0, 0, 1);
        history.push(a);
        let b = paint(&mut level, 1, 0, 1);
        history.push(b);
        assert!(!history.can_undo());
        history.end_compound();

        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.undo_description().as_deref(), Some("Stroke"));
        history.undo(&mut level);
        assert_eq!(level.grid.get(0, 0), 0);
        assert_eq!(level.grid.get(1, 0), 0);
    }

    #[test]
    fn test_empty_compound_commits_nothing() {
        let mut history = CommandHistory::new();
        history.begin_compound("Nothing");
        history.end_compound();
        assert!(!history.can_undo());
        assert!(!history.is_recording());
    }

    #[test]
    fn test_begin_compound_commits_open_one() {
        let mut level = level();
        let mut history = CommandHistory::new();

        history.begin_compound("First");
        let a = paint(&mut level, 0, 0, 1);
        history.push(a);
        history.begin_compound("Second");
        let b = paint(&mut level, 1, 1, 1);
        history.push(b);
        history.end_compound();

        assert_eq!(history.undo_len(), 2);
        assert_eq!(history.undo_description().as_deref(), Some("Second"));
    }

    #[test]
    fn test_undo_commits_open_compound() {
        let mut level = level();
        let mut history = CommandHistory::new();

        history.begin_compound("Stroke");
        let a = paint(&mut level, 3, 3, 9);
        history.push(a);
        assert!(history.undo(&mut level));
        assert!(!history.is_recording());
        assert_eq!(level.grid.get(3, 3), 0);
        assert_eq!(history.redo_description().as_deref(), Some("Stroke"));
    }
}
