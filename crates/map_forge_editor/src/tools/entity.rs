//! Entity editing: hit-testing, placement, removal and moves
//!
//! Pixel positions are used for spawns, snails and tripwires; food and spider
//! waypoints snap to tiles.

use map_forge_core::{
    EntityItem, EntityList, EntityStore, Food, Point, PointRef, Snail, Spider, Tripwire,
};

use crate::commands::Action;

/// Find the entity under a pixel position
///
/// Precedence: player, toy, snails, spider waypoints, food, tripwires.
/// Pixel entities match within one tile of the click; tile entities match on
/// the exact cell.
pub fn hit_test(store: &EntityStore, pixel: Point, tile_size: u32) -> Option<PointRef> {
    let radius_sq = (tile_size as i64) * (tile_size as i64);
    let near = |p: Point| p.distance_sq(pixel) <= radius_sq;
    let tile = pixel.to_tile(tile_size);

    if near(store.player) {
        return Some(PointRef::Player);
    }
    if store.toy.is_some_and(near) {
        return Some(PointRef::Toy);
    }
    if let Some(snail) = store.snails.iter().find(|s| near(s.position)) {
        return Some(PointRef::Snail(snail.id));
    }
    for spider in &store.spiders {
        if let Some(index) = spider.waypoints.iter().position(|w| *w == tile) {
            return Some(PointRef::Waypoint {
                spider: spider.id,
                index,
            });
        }
    }
    if let Some(food) = store.food.iter().find(|f| f.tile == tile) {
        return Some(PointRef::Food(food.id));
    }
    store
        .tripwires
        .iter()
        .find(|t| near(t.position))
        .map(|t| PointRef::Tripwire(t.id))
}

/// Append `item` to `list` and record it
fn append(
    store: &mut EntityStore,
    list: EntityList,
    item: EntityItem,
    label: &str,
) -> Option<Action> {
    let index = store.len(list).ok()?;
    let index = store.insert(list, index, item.clone()).ok()?;
    Some(Action::EntityAdd {
        list,
        item,
        index,
        label: label.to_string(),
    })
}

pub fn add_snail(store: &mut EntityStore, pixel: Point) -> Option<Action> {
    append(
        store,
        EntityList::Snails,
        EntityItem::Snail(Snail::new(pixel)),
        "Add Snail",
    )
}

/// Place food on a tile. A tile holds at most one food.
pub fn add_food(store: &mut EntityStore, tile: Point) -> Option<Action> {
    if store.food.iter().any(|f| f.tile == tile) {
        return None;
    }
    append(
        store,
        EntityList::Food,
        EntityItem::Food(Food::new(tile)),
        "Add Food",
    )
}

pub fn add_tripwire(store: &mut EntityStore, pixel: Point) -> Option<Action> {
    append(
        store,
        EntityList::Tripwires,
        EntityItem::Tripwire(Tripwire::new(pixel)),
        "Add Tripwire",
    )
}

/// Add a spider patrolling `waypoints` (tile coordinates)
pub fn add_spider(store: &mut EntityStore, waypoints: Vec<Point>) -> Option<Action> {
    append(
        store,
        EntityList::Spiders,
        EntityItem::Spider(Spider::new(waypoints)),
        "Add Spider",
    )
}

/// Move the player spawn
pub fn place_player(store: &mut EntityStore, pixel: Point) -> Option<Action> {
    move_entity(store, PointRef::Player, pixel)
}

/// Place the toy spawn, or move it if it already exists
pub fn place_toy(store: &mut EntityStore, pixel: Point) -> Option<Action> {
    if store.toy.is_some() {
        return move_entity(store, PointRef::Toy, pixel);
    }
    append(store, EntityList::Toy, EntityItem::Toy(pixel), "Place Toy Spawn")
}

fn move_label(target: PointRef) -> &'static str {
    match target {
        PointRef::Player => "Move Player Spawn",
        PointRef::Toy => "Move Toy Spawn",
        PointRef::Snail(_) => "Move Snail",
        PointRef::Food(_) => "Move Food",
        PointRef::Tripwire(_) => "Move Tripwire",
        PointRef::Waypoint { .. } => "Move Waypoint",
    }
}

/// Move the point behind `target` to `to`
///
/// `to` is in the target's own units (tiles for food and waypoints).
/// Returns `None` for stale handles and zero-length moves.
pub fn move_entity(store: &mut EntityStore, target: PointRef, to: Point) -> Option<Action> {
    let before = store.point(target).ok()?;
    if before == to {
        return None;
    }
    store.set_point(target, to).ok()?;
    Some(Action::EntityMove {
        target,
        before,
        after: to,
        label: move_label(target).to_string(),
    })
}

/// Remove the record at `index` in `list` and record it
fn remove(
    store: &mut EntityStore,
    list: EntityList,
    index: usize,
    label: &str,
) -> Option<Action> {
    let item = store.remove(list, index).ok()?;
    Some(Action::EntityRemove {
        list,
        item,
        index,
        label: label.to_string(),
    })
}

/// Spiders keep at least this many waypoints when one is deleted
pub const MIN_SPIDER_WAYPOINTS: usize = 2;

/// Delete whatever `target` refers to
///
/// The player spawn cannot be deleted. Deleting a waypoint of a spider with
/// more than two waypoints removes only that waypoint; otherwise the whole
/// spider goes.
pub fn delete_entity(store: &mut EntityStore, target: PointRef) -> Option<Action> {
    match target {
        PointRef::Player => None,
        PointRef::Toy => remove(store, EntityList::Toy, 0, "Delete Toy Spawn"),
        PointRef::Snail(id) => {
            let index = store.position_of(EntityList::Snails, id)?;
            remove(store, EntityList::Snails, index, "Delete Snail")
        }
        PointRef::Food(id) => {
            let index = store.position_of(EntityList::Food, id)?;
            remove(store, EntityList::Food, index, "Delete Food")
        }
        PointRef::Tripwire(id) => {
            let index = store.position_of(EntityList::Tripwires, id)?;
            remove(store, EntityList::Tripwires, index, "Delete Tripwire")
        }
        PointRef::Waypoint { spider, index } => {
            let waypoints = store.spider(spider)?.waypoints.len();
            if waypoints > MIN_SPIDER_WAYPOINTS {
                remove(store, EntityList::Waypoints(spider), index, "Delete Waypoint")
            } else {
                let position = store.position_of(EntityList::Spiders, spider)?;
                remove(store, EntityList::Spiders, position, "Delete Spider")
            }
        }
    }
}

/// Delete the entity under a pixel position
pub fn delete_at(store: &mut EntityStore, pixel: Point, tile_size: u32) -> Option<Action> {
    let target = hit_test(store, pixel, tile_size)?;
    delete_entity(store, target)
}
