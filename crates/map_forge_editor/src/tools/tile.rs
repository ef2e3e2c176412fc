//! Tile editing algorithms
//!
//! Each operation mutates the grid in place and returns the [`Action`] that
//! reverses it, or `None` when no cell actually changed.

use std::collections::{HashSet, VecDeque};

use map_forge_core::{Grid, TileId};

use crate::commands::{Action, TileChange};

/// Largest brush diameter the tools accept
pub const MAX_BRUSH_SIZE: u32 = 10;

/// Set one cell and record it if the value changed
fn set_tracked(grid: &mut Grid, x: i32, y: i32, tile: TileId, changes: &mut Vec<TileChange>) {
    if !grid.in_bounds(x, y) {
        return;
    }
    let before = grid.get(x, y);
    if before == tile {
        return;
    }
    grid.set(x, y, tile);
    changes.push(TileChange::new(x, y, before, tile));
}

fn batch(changes: Vec<TileChange>, label: &str) -> Option<Action> {
    if changes.is_empty() {
        return None;
    }
    Some(Action::TileBatch {
        changes,
        label: label.to_string(),
    })
}

/// Paint with a round brush of diameter `size`
///
/// Size 1 paints exactly one cell. Larger sizes stamp every cell within
/// `size / 2` of the center.
pub fn brush(grid: &mut Grid, x: i32, y: i32, tile: TileId, size: u32) -> Option<Action> {
    let size = size.clamp(1, MAX_BRUSH_SIZE);
    if size == 1 {
        if !grid.in_bounds(x, y) {
            return None;
        }
        let before = grid.get(x, y);
        if before == tile {
            return None;
        }
        grid.set(x, y, tile);
        return Some(Action::TileEdit(TileChange::new(x, y, before, tile)));
    }

    let radius = (size / 2) as i32;
    let mut changes = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                set_tracked(grid, x + dx, y + dy, tile, &mut changes);
            }
        }
    }
    batch(changes, "Brush")
}

/// Fill the inclusive rectangle spanned by two corners, clipped to the grid
pub fn rectangle(
    grid: &mut Grid,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    tile: TileId,
) -> Option<Action> {
    let max_x_bound = grid.width() as i32 - 1;
    let max_y_bound = grid.height() as i32 - 1;

    let min_x = x1.min(x2).max(0);
    let max_x = x1.max(x2).min(max_x_bound);
    let min_y = y1.min(y2).max(0);
    let max_y = y1.max(y2).min(max_y_bound);

    let mut changes = Vec::new();
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            set_tracked(grid, x, y, tile, &mut changes);
        }
    }
    batch(changes, "Rectangle")
}

/// Outcome of a flood fill, with the number of cells dequeued
#[derive(Debug)]
pub(crate) struct FloodResult {
    pub changes: Vec<TileChange>,
    pub visited: usize,
}

#[inline]
fn pack(x: i32, y: i32) -> u64 {
    ((y as u32 as u64) << 32) | x as u32 as u64
}

/// Breadth-first, 4-connected fill from the seed, capped at `width * height` steps
pub(crate) fn flood(grid: &mut Grid, x: i32, y: i32, tile: TileId) -> FloodResult {
    let mut result = FloodResult {
        changes: Vec::new(),
        visited: 0,
    };

    if !grid.in_bounds(x, y) {
        return result;
    }
    let target = grid.get(x, y);
    if target == tile {
        return result;
    }

    let max_steps = grid.len();
    let mut queue = VecDeque::from([(x, y)]);
    let mut seen = HashSet::from([pack(x, y)]);

    while let Some((cx, cy)) = queue.pop_front() {
        if result.visited >= max_steps {
            break;
        }
        result.visited += 1;

        if grid.get(cx, cy) != target {
            continue;
        }
        grid.set(cx, cy, tile);
        result.changes.push(TileChange::new(cx, cy, target, tile));

        for (nx, ny) in [(cx - 1, cy), (cx + 1, cy), (cx, cy - 1), (cx, cy + 1)] {
            if grid.in_bounds(nx, ny) && seen.insert(pack(nx, ny)) {
                queue.push_back((nx, ny));
            }
        }
    }

    result
}

/// Replace the contiguous region containing (x, y) with `tile`
pub fn flood_fill(grid: &mut Grid, x: i32, y: i32, tile: TileId) -> Option<Action> {
    batch(flood(grid, x, y, tile).changes, "Flood Fill")
}

/// Cells from (x0, y0) to (x1, y1), both ends included, in drawing order
///
/// Integer error-accumulator rasterization; works in every octant and yields
/// `max(|dx|, |dy|) + 1` cells.
pub fn bresenham_line(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let step_x = (x1 - x0).signum();
    let step_y = (y1 - y0).signum();

    let mut cells = Vec::with_capacity(dx.max(dy) as usize + 1);
    let (mut x, mut y) = (x0, y0);
    let mut err = dx - dy;

    while (x, y) != (x1, y1) {
        cells.push((x, y));
        let doubled = 2 * err;
        if doubled > -dy {
            err -= dy;
            x += step_x;
        }
        if doubled < dx {
            err += dx;
            y += step_y;
        }
    }
    cells.push((x1, y1));

    cells
}

/// Draw a line between two cells, both inclusive. Off-grid points are skipped.
pub fn line(grid: &mut Grid, x1: i32, y1: i32, x2: i32, y2: i32, tile: TileId) -> Option<Action> {
    let mut changes = Vec::new();
    for (x, y) in bresenham_line(x1, y1, x2, y2) {
        set_tracked(grid, x, y, tile, &mut changes);
    }
    batch(changes, "Line")
}

/// Read the tile under (x, y) for use as the next brush tile
pub fn eyedropper(grid: &Grid, x: i32, y: i32) -> Option<TileId> {
    let tile = grid.get(x, y);
    (tile >= 0).then_some(tile)
}
