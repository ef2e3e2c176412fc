//! Editor tools - tile painting, entity placement, selection
//!
//! [`apply_tool`] routes one pointer gesture to the engine for the active
//! [`ToolMode`]. The engines mutate the level directly and hand back the
//! [`Action`] describing the change.

pub mod entity;
pub mod path;
pub mod tile;

pub use path::{PathBuilder, MIN_PATH_WAYPOINTS};
pub use tile::{bresenham_line, MAX_BRUSH_SIZE};

use map_forge_core::{Level, Point, PointRef, FLOOR_TILE};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::commands::Action;
use crate::session::EditorSession;

/// Active tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolMode {
    #[default]
    Brush,
    Eraser,
    Rectangle,
    Fill,
    Line,
    Eyedropper,
    /// Drag entities
    Select,
    /// Remove the entity under the cursor
    Delete,
    PlayerSpawn,
    ToySpawn,
    Snail,
    /// Author a spider patrol path click by click
    Spider,
    Food,
    Tripwire,
}

impl ToolMode {
    pub fn label(&self) -> &'static str {
        match self {
            ToolMode::Brush => "Brush",
            ToolMode::Eraser => "Eraser",
            ToolMode::Rectangle => "Rect",
            ToolMode::Fill => "Fill",
            ToolMode::Line => "Line",
            ToolMode::Eyedropper => "Pick",
            ToolMode::Select => "Select",
            ToolMode::Delete => "Delete",
            ToolMode::PlayerSpawn => "Player",
            ToolMode::ToySpawn => "Toy",
            ToolMode::Snail => "Snail",
            ToolMode::Spider => "Spider",
            ToolMode::Food => "Food",
            ToolMode::Tripwire => "Tripwire",
        }
    }
}

/// One pointer gesture in pixel coordinates
///
/// A click has `from == to`. A drag carries the press position in `from` and
/// the current or release position in `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolInput {
    pub from: Point,
    pub to: Point,
}

impl ToolInput {
    pub fn click(at: Point) -> Self {
        Self { from: at, to: at }
    }

    pub fn drag(from: Point, to: Point) -> Self {
        Self { from, to }
    }
}

/// Run the session's active tool against the level
///
/// Returns `None` when nothing changed; such results must not be recorded.
pub fn apply_tool(
    session: &mut EditorSession,
    level: &mut Level,
    input: ToolInput,
) -> Option<Action> {
    let from = level.pixel_to_tile(input.from);
    let to = level.pixel_to_tile(input.to);
    let tile_size = level.tile_size;

    if session.tool != ToolMode::Spider && session.path.is_building() {
        debug!("Tool switched away from Spider, dropping pending path");
        session.path.cancel();
    }

    match session.tool {
        ToolMode::Brush => tile::brush(
            &mut level.grid,
            to.x,
            to.y,
            session.selected_tile,
            session.brush_size,
        ),
        ToolMode::Eraser => {
            tile::brush(&mut level.grid, to.x, to.y, FLOOR_TILE, session.brush_size)
        }
        ToolMode::Rectangle => tile::rectangle(
            &mut level.grid,
            from.x,
            from.y,
            to.x,
            to.y,
            session.selected_tile,
        ),
        ToolMode::Fill => tile::flood_fill(&mut level.grid, to.x, to.y, session.selected_tile),
        ToolMode::Line => tile::line(
            &mut level.grid,
            from.x,
            from.y,
            to.x,
            to.y,
            session.selected_tile,
        ),
        ToolMode::Eyedropper => {
            if let Some(tile) = tile::eyedropper(&level.grid, to.x, to.y) {
                session.selected_tile = tile;
            }
            None
        }
        ToolMode::Select => {
            let target = entity::hit_test(&level.entities, input.from, tile_size)?;
            let destination = match target {
                PointRef::Food(_) | PointRef::Waypoint { .. } => to,
                _ => input.to,
            };
            entity::move_entity(&mut level.entities, target, destination)
        }
        ToolMode::Delete => entity::delete_at(&mut level.entities, input.to, tile_size),
        ToolMode::PlayerSpawn => entity::place_player(&mut level.entities, input.to),
        ToolMode::ToySpawn => entity::place_toy(&mut level.entities, input.to),
        ToolMode::Snail => entity::add_snail(&mut level.entities, input.to),
        ToolMode::Food => entity::add_food(&mut level.entities, to),
        ToolMode::Tripwire => entity::add_tripwire(&mut level.entities, input.to),
        ToolMode::Spider => {
            session.path.click(to);
            None
        }
    }
}
