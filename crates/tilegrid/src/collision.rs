//! Static collision data.
//!
//! A [`CollisionMap`] describes the parts of the world that never move:
//! which tiles are loaded, which can be stood on, and which stop a line of
//! sight. Actors and hazards are not part of the map; pathing callers pass
//! them in as a predicate.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{SceneBounds, Tile};

/// Read-only view of static collision data.
pub trait CollisionMap {
    /// Whether the tile is part of the loaded scene.
    ///
    /// Queries touching unloaded tiles are indeterminate.
    fn is_loaded(&self, tile: Tile) -> bool;

    /// Whether an actor may stand on the tile.
    fn is_walkable(&self, tile: Tile) -> bool;

    /// Whether the tile stops a line of sight passing over it.
    ///
    /// Defaults to "anything not walkable blocks sight".
    fn blocks_sight(&self, tile: Tile) -> bool {
        !self.is_walkable(tile)
    }
}

/// Collision map backed by sets of blocked tiles inside rectangular bounds.
///
/// Tiles outside `bounds` are unloaded. Tiles in `blocked` cannot be walked
/// on and block sight. Tiles in `sight_blockers` block sight only (low walls
/// you can't see over are rare; pillars are the usual case for `blocked`).
///
/// # Example
///
/// ```
/// use tilegrid::{CollisionMap, GridCollisionMap, SceneBounds, Tile};
///
/// let mut map = GridCollisionMap::new(SceneBounds::from_size(16, 16));
/// map.block(Tile::new(3, 3, 0));
///
/// assert!(!map.is_walkable(Tile::new(3, 3, 0)));
/// assert!(map.is_walkable(Tile::new(4, 3, 0)));
/// assert!(!map.is_loaded(Tile::new(20, 3, 0)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridCollisionMap {
    bounds: SceneBounds,
    blocked: BTreeSet<Tile>,
    sight_blockers: BTreeSet<Tile>,
}

impl GridCollisionMap {
    /// Create an open map (nothing blocked) with the given bounds.
    #[must_use]
    pub fn new(bounds: SceneBounds) -> Self {
        Self {
            bounds,
            blocked: BTreeSet::new(),
            sight_blockers: BTreeSet::new(),
        }
    }

    /// Builder form of [`GridCollisionMap::block`] for several tiles.
    #[must_use]
    pub fn with_blocked(mut self, tiles: impl IntoIterator<Item = Tile>) -> Self {
        self.blocked.extend(tiles);
        self
    }

    /// Mark a tile as unwalkable (and sight-blocking).
    pub fn block(&mut self, tile: Tile) {
        self.blocked.insert(tile);
    }

    /// Mark a tile as sight-blocking while leaving it walkable.
    pub fn block_sight(&mut self, tile: Tile) {
        self.sight_blockers.insert(tile);
    }

    /// Scene bounds.
    #[must_use]
    pub fn bounds(&self) -> SceneBounds {
        self.bounds
    }
}

impl CollisionMap for GridCollisionMap {
    fn is_loaded(&self, tile: Tile) -> bool {
        self.bounds.contains(tile)
    }

    fn is_walkable(&self, tile: Tile) -> bool {
        self.is_loaded(tile) && !self.blocked.contains(&tile)
    }

    fn blocks_sight(&self, tile: Tile) -> bool {
        self.blocked.contains(&tile) || self.sight_blockers.contains(&tile)
    }
}
