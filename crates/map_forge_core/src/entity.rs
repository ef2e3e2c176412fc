//! Entity store - spawns, patrol paths, pickups and triggers
//!
//! The store owns every record by value. Code outside the store refers to
//! records through [`EntityList`] slots and [`PointRef`] handles, keyed by
//! stable `Uuid`s, so a recorded edit can always be re-resolved against the
//! current state.
//!
//! Coordinate units depend on the kind: spawns, snails and tripwires are in
//! pixels, food and spider waypoints are in tiles.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// An integer 2D point (pixel or tile units depending on the owner)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert a pixel point to the tile containing it
    pub fn to_tile(self, tile_size: u32) -> Point {
        let size = tile_size.max(1) as i32;
        Point::new(self.x.div_euclid(size), self.y.div_euclid(size))
    }

    /// Squared euclidean distance to `other`
    pub fn distance_sq(self, other: Point) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A snail spawn (pixel position)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snail {
    pub id: Uuid,
    pub position: Point,
}

impl Snail {
    pub fn new(position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
        }
    }
}

/// A spider with its patrol path (tile waypoints, in patrol order)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spider {
    pub id: Uuid,
    pub waypoints: Vec<Point>,
}

impl Spider {
    pub fn new(waypoints: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            waypoints,
        }
    }
}

/// A food pickup (tile position)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub id: Uuid,
    pub tile: Point,
}

impl Food {
    pub fn new(tile: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            tile,
        }
    }
}

/// A tripwire trigger (pixel position)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tripwire {
    pub id: Uuid,
    pub position: Point,
}

impl Tripwire {
    pub fn new(position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
        }
    }
}

/// Names one ordered list inside the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityList {
    /// The optional toy spawn, treated as a list of at most one
    Toy,
    Snails,
    Spiders,
    Food,
    Tripwires,
    /// The waypoint list of one spider
    Waypoints(Uuid),
}

impl fmt::Display for EntityList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityList::Toy => write!(f, "toy"),
            EntityList::Snails => write!(f, "snails"),
            EntityList::Spiders => write!(f, "spiders"),
            EntityList::Food => write!(f, "food"),
            EntityList::Tripwires => write!(f, "tripwires"),
            EntityList::Waypoints(id) => write!(f, "waypoints of spider {}", id),
        }
    }
}

/// A value that lives in an [`EntityList`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityItem {
    Toy(Point),
    Snail(Snail),
    Spider(Spider),
    Food(Food),
    Tripwire(Tripwire),
    Waypoint(Point),
}

impl EntityItem {
    /// Human-readable kind name
    pub fn kind(&self) -> &'static str {
        match self {
            EntityItem::Toy(_) => "Toy",
            EntityItem::Snail(_) => "Snail",
            EntityItem::Spider(_) => "Spider",
            EntityItem::Food(_) => "Food",
            EntityItem::Tripwire(_) => "Tripwire",
            EntityItem::Waypoint(_) => "Waypoint",
        }
    }
}

/// Handle to one movable point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointRef {
    Player,
    Toy,
    Snail(Uuid),
    Food(Uuid),
    Tripwire(Uuid),
    Waypoint { spider: Uuid, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    #[error("{item} cannot be stored in {list}")]
    KindMismatch { list: EntityList, item: &'static str },
    #[error("no spider with id {0}")]
    UnknownSpider(Uuid),
    #[error("no entity for {0:?}")]
    UnknownPoint(PointRef),
    #[error("index {index} out of range for {list} (len {len})")]
    IndexOutOfRange {
        list: EntityList,
        index: usize,
        len: usize,
    },
    #[error("a toy spawn is already placed")]
    ToyOccupied,
}

/// All non-tile entities of a level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStore {
    pub player: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toy: Option<Point>,
    #[serde(default)]
    pub snails: Vec<Snail>,
    #[serde(default)]
    pub spiders: Vec<Spider>,
    #[serde(default)]
    pub food: Vec<Food>,
    #[serde(default)]
    pub tripwires: Vec<Tripwire>,
}

impl EntityStore {
    /// Create an empty store with the player spawned at `player` (pixels)
    pub fn new(player: Point) -> Self {
        Self {
            player,
            ..Default::default()
        }
    }

    pub fn spider(&self, id: Uuid) -> Option<&Spider> {
        self.spiders.iter().find(|s| s.id == id)
    }

    fn spider_mut(&mut self, id: Uuid) -> Result<&mut Spider, EntityError> {
        self.spiders
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(EntityError::UnknownSpider(id))
    }

    /// Current length of a list
    pub fn len(&self, list: EntityList) -> Result<usize, EntityError> {
        Ok(match list {
            EntityList::Toy => usize::from(self.toy.is_some()),
            EntityList::Snails => self.snails.len(),
            EntityList::Spiders => self.spiders.len(),
            EntityList::Food => self.food.len(),
            EntityList::Tripwires => self.tripwires.len(),
            EntityList::Waypoints(id) => self
                .spider(id)
                .map(|s| s.waypoints.len())
                .ok_or(EntityError::UnknownSpider(id))?,
        })
    }

    /// Total number of placed entities (player excluded)
    pub fn count(&self) -> usize {
        usize::from(self.toy.is_some())
            + self.snails.len()
            + self.spiders.len()
            + self.food.len()
            + self.tripwires.len()
    }

    /// Insert `item` into `list` at `index`, clamped to the list length.
    /// Returns the index actually used.
    pub fn insert(
        &mut self,
        list: EntityList,
        index: usize,
        item: EntityItem,
    ) -> Result<usize, EntityError> {
        fn put<T>(vec: &mut Vec<T>, index: usize, value: T) -> usize {
            let index = index.min(vec.len());
            vec.insert(index, value);
            index
        }

        match (list, item) {
            (EntityList::Toy, EntityItem::Toy(point)) => {
                if self.toy.is_some() {
                    return Err(EntityError::ToyOccupied);
                }
                self.toy = Some(point);
                Ok(0)
            }
            (EntityList::Snails, EntityItem::Snail(snail)) => {
                Ok(put(&mut self.snails, index, snail))
            }
            (EntityList::Spiders, EntityItem::Spider(spider)) => {
                Ok(put(&mut self.spiders, index, spider))
            }
            (EntityList::Food, EntityItem::Food(food)) => Ok(put(&mut self.food, index, food)),
            (EntityList::Tripwires, EntityItem::Tripwire(wire)) => {
                Ok(put(&mut self.tripwires, index, wire))
            }
            (EntityList::Waypoints(id), EntityItem::Waypoint(point)) => {
                let spider = self.spider_mut(id)?;
                Ok(put(&mut spider.waypoints, index, point))
            }
            (list, item) => Err(EntityError::KindMismatch {
                list,
                item: item.kind(),
            }),
        }
    }

    /// Remove and return the item at `index` in `list`
    pub fn remove(&mut self, list: EntityList, index: usize) -> Result<EntityItem, EntityError> {
        fn take<T>(vec: &mut Vec<T>, list: EntityList, index: usize) -> Result<T, EntityError> {
            if index < vec.len() {
                Ok(vec.remove(index))
            } else {
                Err(EntityError::IndexOutOfRange {
                    list,
                    index,
                    len: vec.len(),
                })
            }
        }

        match list {
            EntityList::Toy => match (index, self.toy.take()) {
                (0, Some(point)) => Ok(EntityItem::Toy(point)),
                (_, previous) => {
                    self.toy = previous;
                    Err(EntityError::IndexOutOfRange {
                        list,
                        index,
                        len: usize::from(previous.is_some()),
                    })
                }
            },
            EntityList::Snails => take(&mut self.snails, list, index).map(EntityItem::Snail),
            EntityList::Spiders => take(&mut self.spiders, list, index).map(EntityItem::Spider),
            EntityList::Food => take(&mut self.food, list, index).map(EntityItem::Food),
            EntityList::Tripwires => {
                take(&mut self.tripwires, list, index).map(EntityItem::Tripwire)
            }
            EntityList::Waypoints(id) => {
                let spider = self.spider_mut(id)?;
                take(&mut spider.waypoints, list, index).map(EntityItem::Waypoint)
            }
        }
    }

    /// Position of the record with `id` in its list
    pub fn position_of(&self, list: EntityList, id: Uuid) -> Option<usize> {
        match list {
            EntityList::Snails => self.snails.iter().position(|e| e.id == id),
            EntityList::Spiders => self.spiders.iter().position(|e| e.id == id),
            EntityList::Food => self.food.iter().position(|e| e.id == id),
            EntityList::Tripwires => self.tripwires.iter().position(|e| e.id == id),
            EntityList::Toy | EntityList::Waypoints(_) => None,
        }
    }

    /// Resolve a point handle
    pub fn point(&self, target: PointRef) -> Result<Point, EntityError> {
        let missing = || EntityError::UnknownPoint(target);
        match target {
            PointRef::Player => Ok(self.player),
            PointRef::Toy => self.toy.ok_or_else(missing),
            PointRef::Snail(id) => self
                .snails
                .iter()
                .find(|e| e.id == id)
                .map(|e| e.position)
                .ok_or_else(missing),
            PointRef::Food(id) => self
                .food
                .iter()
                .find(|e| e.id == id)
                .map(|e| e.tile)
                .ok_or_else(missing),
            PointRef::Tripwire(id) => self
                .tripwires
                .iter()
                .find(|e| e.id == id)
                .map(|e| e.position)
                .ok_or_else(missing),
            PointRef::Waypoint { spider, index } => self
                .spider(spider)
                .and_then(|s| s.waypoints.get(index))
                .copied()
                .ok_or_else(missing),
        }
    }

    /// Overwrite the point behind a handle
    pub fn set_point(&mut self, target: PointRef, value: Point) -> Result<(), EntityError> {
        let slot: Option<&mut Point> = match target {
            PointRef::Player => Some(&mut self.player),
            PointRef::Toy => self.toy.as_mut(),
            PointRef::Snail(id) => self
                .snails
                .iter_mut()
                .find(|e| e.id == id)
                .map(|e| &mut e.position),
            PointRef::Food(id) => self
                .food
                .iter_mut()
                .find(|e| e.id == id)
                .map(|e| &mut e.tile),
            PointRef::Tripwire(id) => self
                .tripwires
                .iter_mut()
                .find(|e| e.id == id)
                .map(|e| &mut e.position),
            PointRef::Waypoint { spider, index } => self
                .spiders
                .iter_mut()
                .find(|s| s.id == spider)
                .and_then(|s| s.waypoints.get_mut(index)),
        };

        let slot = slot.ok_or(EntityError::UnknownPoint(target))?;
        *slot = value;
        Ok(())
    }
}
