//! Property tests for the editing engine and history.
//!
//! These tests use `proptest` to generate random edit sequences and verify
//! that replaying history reproduces the exact recorded state.

use map_forge_editor::map_forge_core::{Grid, Level, Point};
use map_forge_editor::tools::{bresenham_line, entity, tile};
use map_forge_editor::{Action, CommandHistory};
use proptest::prelude::*;

const W: u32 = 12;
const H: u32 = 9;

#[derive(Debug, Clone)]
enum EditOp {
    Brush(i32, i32, i32, u32),
    Rect(i32, i32, i32, i32, i32),
    Fill(i32, i32, i32),
    Line(i32, i32, i32, i32, i32),
    AddSnail(i32, i32),
    AddFood(i32, i32),
    DeleteAt(i32, i32),
}

fn coord(max: u32) -> impl Strategy<Value = i32> {
    -2..(max as i32 + 2)
}

fn edit_op_strategy() -> impl Strategy<Value = EditOp> {
    prop_oneof![
        (coord(W), coord(H), 0..4i32, 1..6u32).prop_map(|(x, y, t, s)| EditOp::Brush(x, y, t, s)),
        (coord(W), coord(H), coord(W), coord(H), 0..4i32)
            .prop_map(|(a, b, c, d, t)| EditOp::Rect(a, b, c, d, t)),
        (coord(W), coord(H), 0..4i32).prop_map(|(x, y, t)| EditOp::Fill(x, y, t)),
        (coord(W), coord(H), coord(W), coord(H), 0..4i32)
            .prop_map(|(a, b, c, d, t)| EditOp::Line(a, b, c, d, t)),
        (0..(W as i32 * 32), 0..(H as i32 * 32)).prop_map(|(x, y)| EditOp::AddSnail(x, y)),
        (0..W as i32, 0..H as i32).prop_map(|(x, y)| EditOp::AddFood(x, y)),
        (0..(W as i32 * 32), 0..(H as i32 * 32)).prop_map(|(x, y)| EditOp::DeleteAt(x, y)),
    ]
}

fn apply(level: &mut Level, op: &EditOp) -> Option<Action> {
    match *op {
        EditOp::Brush(x, y, t, s) => tile::brush(&mut level.grid, x, y, t, s),
        EditOp::Rect(a, b, c, d, t) => tile::rectangle(&mut level.grid, a, b, c, d, t),
        EditOp::Fill(x, y, t) => tile::flood_fill(&mut level.grid, x, y, t),
        EditOp::Line(a, b, c, d, t) => tile::line(&mut level.grid, a, b, c, d, t),
        EditOp::AddSnail(x, y) => entity::add_snail(&mut level.entities, Point::new(x, y)),
        EditOp::AddFood(x, y) => entity::add_food(&mut level.entities, Point::new(x, y)),
        EditOp::DeleteAt(x, y) => {
            let tile_size = level.tile_size;
            entity::delete_at(&mut level.entities, Point::new(x, y), tile_size)
        }
    }
}

fn base_level() -> Level {
    let mut level = Level::from_grid("prop", Grid::new(W, H));
    level.entities.player = Point::new(-500, -500);
    level
}

proptest! {
    #[test]
    fn undo_then_redo_restores_post_execute_state(ops in prop::collection::vec(edit_op_strategy(), 1..30)) {
        let mut level = base_level();
        let mut history = CommandHistory::new();
        let mut snapshots = vec![level.clone()];

        for op in &ops {
            if let Some(action) = apply(&mut level, op) {
                history.push(action);
                snapshots.push(level.clone());
            }
        }
        let final_state = level.clone();

        // Walk all the way back, checking every intermediate state
        for expected in snapshots.iter().rev().skip(1) {
            prop_assert!(history.undo(&mut level));
            prop_assert_eq!(&level, expected);
        }
        prop_assert!(!history.undo(&mut level));

        while history.redo(&mut level) {}
        prop_assert_eq!(level, final_state);
    }

    #[test]
    fn undo_redo_single_action_is_identity(op in edit_op_strategy()) {
        let mut level = base_level();
        if let Some(action) = apply(&mut level, &op) {
            let after = level.clone();
            action.undo(&mut level);
            action.redo(&mut level);
            prop_assert_eq!(level, after);
        }
    }

    #[test]
    fn flood_fill_changes_at_most_every_cell(
        seed in prop::collection::vec(0..3i32, (W * H) as usize),
        x in coord(W),
        y in coord(H),
        tile_id in 0..3i32
    ) {
        let mut grid = Grid::from_tiles(W, H, seed).unwrap();
        if let Some(action) = tile::flood_fill(&mut grid, x, y, tile_id) {
            prop_assert!(action.tile_change_count() <= (W * H) as usize);
            prop_assert!(action.tile_change_count() > 0);
        }
    }

    #[test]
    fn brush_size_one_matches_set(x in coord(W), y in coord(H), tile_id in 0..5i32) {
        let mut brushed = Grid::filled(W, H, 2);
        let mut direct = brushed.clone();
        tile::brush(&mut brushed, x, y, tile_id, 1);
        direct.set(x, y, tile_id);
        prop_assert_eq!(brushed, direct);
    }

    #[test]
    fn line_includes_both_endpoints(
        x1 in -20..20i32, y1 in -20..20i32, x2 in -20..20i32, y2 in -20..20i32
    ) {
        let points = bresenham_line(x1, y1, x2, y2);
        prop_assert_eq!(points.first().copied(), Some((x1, y1)));
        prop_assert_eq!(points.last().copied(), Some((x2, y2)));

        let mut grid = Grid::filled(W, H, 0);
        tile::line(&mut grid, x1, y1, x2, y2, 1);
        for (x, y) in [(x1, y1), (x2, y2)] {
            if grid.in_bounds(x, y) {
                prop_assert_eq!(grid.get(x, y), 1);
            }
        }
    }
}
