//! Multi-click patrol path builder for spiders
//!
//! Clicks accumulate waypoints without touching history. `finish` turns the
//! pending path into one `EntityAdd` when it is long enough; `cancel` drops it.

use map_forge_core::{EntityStore, Point};

use super::entity::add_spider;
use crate::commands::Action;

/// Fewest waypoints a committed patrol path may have
pub const MIN_PATH_WAYPOINTS: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PathBuilder {
    #[default]
    Idle,
    /// A path is being authored; waypoints are tile coordinates
    Building(Vec<Point>),
}

impl PathBuilder {
    /// Start a path or append a waypoint. Repeating the last waypoint is ignored.
    pub fn click(&mut self, tile: Point) {
        match self {
            PathBuilder::Idle => *self = PathBuilder::Building(vec![tile]),
            PathBuilder::Building(waypoints) => {
                if waypoints.last() != Some(&tile) {
                    waypoints.push(tile);
                }
            }
        }
    }

    /// Commit the pending path as a new spider
    ///
    /// Paths shorter than [`MIN_PATH_WAYPOINTS`] are discarded. The builder is
    /// idle afterwards in every case.
    pub fn finish(&mut self, store: &mut EntityStore) -> Option<Action> {
        let PathBuilder::Building(waypoints) = std::mem::take(self) else {
            return None;
        };
        if waypoints.len() < MIN_PATH_WAYPOINTS {
            return None;
        }
        add_spider(store, waypoints)
    }

    /// Drop the pending path
    pub fn cancel(&mut self) {
        *self = PathBuilder::Idle;
    }

    pub fn is_building(&self) -> bool {
        matches!(self, PathBuilder::Building(_))
    }

    /// Waypoints placed so far, for preview rendering
    pub fn pending(&self) -> &[Point] {
        match self {
            PathBuilder::Idle => &[],
            PathBuilder::Building(waypoints) => waypoints,
        }
    }
}
