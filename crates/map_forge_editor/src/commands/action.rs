//! Undoable edit records
//!
//! Every [`Action`] describes a mutation that has already been applied to the
//! level. `undo` reverses it and `redo` re-applies the recorded new state;
//! nothing is recomputed on replay.

use map_forge_core::{EntityItem, EntityList, EntityStore, Level, Point, PointRef, TileId};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One recorded cell change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileChange {
    pub x: i32,
    pub y: i32,
    pub before: TileId,
    pub after: TileId,
}

impl TileChange {
    pub fn new(x: i32, y: i32, before: TileId, after: TileId) -> Self {
        Self {
            x,
            y,
            before,
            after,
        }
    }
}

/// A single undoable edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// One cell changed
    TileEdit(TileChange),
    /// Many cells changed at once (disjoint coordinates, so replay order is free)
    TileBatch {
        changes: Vec<TileChange>,
        label: String,
    },
    /// Several actions undone/redone as one unit
    Compound { children: Vec<Action>, label: String },
    /// `item` was inserted into `list` at `index`
    EntityAdd {
        list: EntityList,
        item: EntityItem,
        index: usize,
        label: String,
    },
    /// `item` was removed from `list`, where it sat at `index`
    EntityRemove {
        list: EntityList,
        item: EntityItem,
        index: usize,
        label: String,
    },
    /// The point behind `target` moved from `before` to `after`
    EntityMove {
        target: PointRef,
        before: Point,
        after: Point,
        label: String,
    },
}

impl Action {
    /// Reverse the recorded mutation
    pub fn undo(&self, level: &mut Level) {
        match self {
            Action::TileEdit(change) => level.grid.set(change.x, change.y, change.before),
            Action::TileBatch { changes, .. } => {
                for change in changes {
                    level.grid.set(change.x, change.y, change.before);
                }
            }
            Action::Compound { children, .. } => {
                for child in children.iter().rev() {
                    child.undo(level);
                }
            }
            Action::EntityAdd {
                list, item, index, ..
            } => remove_item(&mut level.entities, *list, item, *index),
            Action::EntityRemove {
                list, item, index, ..
            } => insert_item(&mut level.entities, *list, item, *index),
            Action::EntityMove { target, before, .. } => {
                move_point(&mut level.entities, *target, *before)
            }
        }
    }

    /// Re-apply the recorded mutation
    pub fn redo(&self, level: &mut Level) {
        match self {
            Action::TileEdit(change) => level.grid.set(change.x, change.y, change.after),
            Action::TileBatch { changes, .. } => {
                for change in changes {
                    level.grid.set(change.x, change.y, change.after);
                }
            }
            Action::Compound { children, .. } => {
                for child in children {
                    child.redo(level);
                }
            }
            Action::EntityAdd {
                list, item, index, ..
            } => insert_item(&mut level.entities, *list, item, *index),
            Action::EntityRemove {
                list, item, index, ..
            } => remove_item(&mut level.entities, *list, item, *index),
            Action::EntityMove { target, after, .. } => {
                move_point(&mut level.entities, *target, *after)
            }
        }
    }

    /// Label for menus and the status bar
    pub fn describe(&self) -> String {
        match self {
            Action::TileEdit(change) => format!("Paint Tile ({}, {})", change.x, change.y),
            Action::TileBatch { label, .. }
            | Action::Compound { label, .. }
            | Action::EntityAdd { label, .. }
            | Action::EntityRemove { label, .. }
            | Action::EntityMove { label, .. } => label.clone(),
        }
    }

    /// Number of tile changes recorded, including those in compound children
    pub fn tile_change_count(&self) -> usize {
        match self {
            Action::TileEdit(_) => 1,
            Action::TileBatch { changes, .. } => changes.len(),
            Action::Compound { children, .. } => {
                children.iter().map(Action::tile_change_count).sum()
            }
            _ => 0,
        }
    }
}

fn insert_item(store: &mut EntityStore, list: EntityList, item: &EntityItem, index: usize) {
    if let Err(e) = store.insert(list, index, item.clone()) {
        warn!("Could not restore {} into {}: {}", item.kind(), list, e);
    }
}

fn remove_item(store: &mut EntityStore, list: EntityList, item: &EntityItem, index: usize) {
    let Some(position) = locate(store, list, item, index) else {
        warn!("{} to remove from {} is no longer present", item.kind(), list);
        return;
    };
    if let Err(e) = store.remove(list, position) {
        warn!("Could not remove {} from {}: {}", item.kind(), list, e);
    }
}

fn move_point(store: &mut EntityStore, target: PointRef, to: Point) {
    if let Err(e) = store.set_point(target, to) {
        warn!("Could not move {:?}: {}", target, e);
    }
}

/// Find where `item` currently sits in `list`
///
/// Records with an id are found by id. Toy and waypoint values have no id, so
/// the recorded index is trusted when it still holds an equal value.
fn locate(store: &EntityStore, list: EntityList, item: &EntityItem, hint: usize) -> Option<usize> {
    match item {
        EntityItem::Snail(e) => store.position_of(list, e.id),
        EntityItem::Spider(e) => store.position_of(list, e.id),
        EntityItem::Food(e) => store.position_of(list, e.id),
        EntityItem::Tripwire(e) => store.position_of(list, e.id),
        EntityItem::Toy(_) => store.toy.map(|_| 0),
        EntityItem::Waypoint(point) => {
            let EntityList::Waypoints(spider) = list else {
                return None;
            };
            let waypoints = &store.spider(spider)?.waypoints;
            if waypoints.get(hint) == Some(point) {
                Some(hint)
            } else {
                waypoints.iter().position(|p| p == point)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use map_forge_core::{Grid, Snail, Spider};

    fn flat_level(width: u32, height: u32) -> Level {
        Level::from_grid("test", Grid::filled(width, height, 0))
    }

    #[test]
    fn test_tile_edit_undo_redo() {
        let mut level = flat_level(3, 3);
        level.grid.set(1, 1, 4);
        let action = Action::TileEdit(TileChange::new(1, 1, 0, 4));

        action.undo(&mut level);
        assert_eq!(level.grid.get(1, 1), 0);
        action.redo(&mut level);
        assert_eq!(level.grid.get(1, 1), 4);
    }

    #[test]
    fn test_compound_replays_in_order() {
        let mut level = flat_level(3, 3);
        let snail = Snail::new(Point::new(10, 10));
        let id = snail.id;

        // Add followed by a move of the same entity: undo must reverse the move first
        level.entities.snails.push(snail.clone());
        level.entities.snails[0].position = Point::new(50, 10);
        let action = Action::Compound {
            label: "Place Snail".to_string(),
            children: vec![
                Action::EntityAdd {
                    list: EntityList::Snails,
                    item: EntityItem::Snail(snail),
                    index: 0,
                    label: "Add Snail".to_string(),
                },
                Action::EntityMove {
                    target: PointRef::Snail(id),
                    before: Point::new(10, 10),
                    after: Point::new(50, 10),
                    label: "Move Snail".to_string(),
                },
            ],
        };

        action.undo(&mut level);
        assert!(level.entities.snails.is_empty());

        action.redo(&mut level);
        assert_eq!(level.entities.snails.len(), 1);
        assert_eq!(level.entities.snails[0].position, Point::new(50, 10));
    }

    #[test]
    fn test_entity_remove_restores_index() {
        let mut level = flat_level(3, 3);
        let snails: Vec<Snail> = (0..3).map(|i| Snail::new(Point::new(i, i))).collect();
        level.entities.snails = snails.clone();

        let removed = level.entities.remove(EntityList::Snails, 1).unwrap();
        let action = Action::EntityRemove {
            list: EntityList::Snails,
            item: removed,
            index: 1,
            label: "Delete Snail".to_string(),
        };

        action.undo(&mut level);
        assert_eq!(level.entities.snails, snails);
        action.redo(&mut level);
        assert_eq!(level.entities.snails, vec![snails[0].clone(), snails[2].clone()]);
    }

    #[test]
    fn test_entity_remove_clamps_index() {
        let mut level = flat_level(3, 3);
        let snail = Snail::new(Point::new(1, 1));
        let action = Action::EntityRemove {
            list: EntityList::Snails,
            item: EntityItem::Snail(snail.clone()),
            index: 7,
            label: "Delete Snail".to_string(),
        };

        action.undo(&mut level);
        assert_eq!(level.entities.snails, vec![snail]);
    }

    #[test]
    fn test_waypoint_remove_round_trip() {
        let mut level = flat_level(6, 6);
        let spider = Spider::new(vec![Point::new(1, 1), Point::new(2, 1), Point::new(3, 1)]);
        let id = spider.id;
        level.entities.spiders.push(spider);

        let item = level.entities.remove(EntityList::Waypoints(id), 1).unwrap();
        let action = Action::EntityRemove {
            list: EntityList::Waypoints(id),
            item,
            index: 1,
            label: "Delete Waypoint".to_string(),
        };
        action.undo(&mut level);
        assert_eq!(level.entities.spiders[0].waypoints[1], Point::new(2, 1));
        action.redo(&mut level);
        assert_eq!(
            level.entities.spiders[0].waypoints,
            vec![Point::new(1, 1), Point::new(3, 1)]
        );
    }

    #[test]
    fn test_stale_handle_is_skipped() {
        let mut level = flat_level(3, 3);
        let action = Action::EntityMove {
            target: PointRef::Tripwire(uuid::Uuid::new_v4()),
            before: Point::new(0, 0),
            after: Point::new(5, 5),
            label: "Move Tripwire".to_string(),
        };
        let before = level.clone();
        action.redo(&mut level);
        assert_eq!(level, before);
    }

    #[test]
    fn test_describe() {
        let batch = Action::TileBatch {
            changes: vec![TileChange::new(0, 0, 0, 1)],
            label: "Rectangle".to_string(),
        };
        assert_eq!(batch.describe(), "Rectangle");
        assert_eq!(
            Action::TileEdit(TileChange::new(2, 3, 0, 1)).describe(),
            "Paint Tile (2, 3)"
        );
    }
}
