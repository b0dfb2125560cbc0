//! # Tilegrid
//!
//! Tile-grid spatial substrate for actor movement and perception.
//!
//! The world is a set of stacked planes of square tiles. Actors occupy
//! axis-aligned rectangles of tiles ([`WorldArea`]) anchored at their
//! south-west corner. This crate answers the handful of spatial questions a
//! combat observer needs:
//!
//! - **Distance**: Chebyshev distance between two areas
//! - **Adjacency**: whether two areas touch along a cardinal edge
//! - **Pursuit**: the next area an actor reaches when chasing a target
//! - **Line of sight**: whether a straight tile line between two areas is clear
//!
//! Static obstacles come from a [`CollisionMap`]; transient ones (other actors,
//! hazards) are supplied by the caller as a tile predicate.
//!
//! ## Quick Start
//!
//! ```
//! use tilegrid::{next_travelling_area, GridCollisionMap, SceneBounds, WorldArea};
//!
//! let map = GridCollisionMap::new(SceneBounds::from_size(64, 64));
//! let chaser = WorldArea::new(10, 10, 1, 1, 0);
//! let target = WorldArea::new(14, 10, 1, 1, 0);
//!
//! let next = next_travelling_area(&map, &chaser, &target, true, |_| true).unwrap();
//! assert_eq!(next.tile().x(), 11);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod area;
pub mod collision;
pub mod pathing;
pub mod sight;

use std::cmp::Ordering;
use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

pub use area::WorldArea;
pub use collision::{CollisionMap, GridCollisionMap};
pub use pathing::next_travelling_area;
pub use sight::has_line_of_sight;

/// A single tile on a plane.
///
/// Tiles are ordered by `(plane, y, x)` so sets of tiles iterate in a stable
/// order regardless of hashing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Horizontal and vertical grid coordinates.
    pub pos: IVec2,
    /// Height level.
    pub plane: i32,
}

impl Tile {
    /// Create a tile from coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32, plane: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            plane,
        }
    }

    /// X coordinate.
    #[must_use]
    pub const fn x(self) -> i32 {
        self.pos.x
    }

    /// Y coordinate.
    #[must_use]
    pub const fn y(self) -> i32 {
        self.pos.y
    }

    /// Tile shifted by `(dx, dy)` on the same plane.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            pos: self.pos + IVec2::new(dx, dy),
            plane: self.plane,
        }
    }

    /// Chebyshev distance to another tile, `None` across planes.
    #[must_use]
    pub fn distance_to(self, other: Self) -> Option<u32> {
        if self.plane != other.plane {
            return None;
        }
        let d = (self.pos - other.pos).abs();
        Some(d.x.max(d.y).unsigned_abs())
    }
}

impl Ord for Tile {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.plane, self.pos.y, self.pos.x).cmp(&(other.plane, other.pos.y, other.pos.x))
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile({}, {}, {})", self.pos.x, self.pos.y, self.plane)
    }
}

/// Rectangle of loaded tiles (the "scene").
///
/// Bounds apply to every plane. `min` is inclusive, `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneBounds {
    /// Minimum corner (inclusive)
    pub min: IVec2,
    /// Maximum corner (exclusive)
    pub max: IVec2,
}

impl SceneBounds {
    /// Create bounds from corners.
    #[must_use]
    pub const fn new(min: IVec2, max: IVec2) -> Self {
        Self { min, max }
    }

    /// Create bounds of the given size anchored at the origin.
    #[must_use]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self {
            min: IVec2::ZERO,
            max: IVec2::new(width, height),
        }
    }

    /// Check if a tile lies inside the bounds.
    #[must_use]
    pub fn contains(&self, tile: Tile) -> bool {
        tile.pos.x >= self.min.x
            && tile.pos.x < self.max.x
            && tile.pos.y >= self.min.y
            && tile.pos.y < self.max.y
    }
}

impl Default for SceneBounds {
    fn default() -> Self {
        Self::from_size(104, 104)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_ordering_is_row_major() {
        let a = Tile::new(5, 1, 0);
        let b = Tile::new(0, 2, 0);
        let c = Tile::new(0, 0, 1);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_tile_distance() {
        let a = Tile::new(0, 0, 0);
        assert_eq!(a.distance_to(Tile::new(3, -2, 0)), Some(3));
        assert_eq!(a.distance_to(Tile::new(0, 0, 1)), None);
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = SceneBounds::from_size(10, 10);
        assert!(bounds.contains(Tile::new(0, 0, 0)));
        assert!(bounds.contains(Tile::new(9, 9, 3)));
        assert!(!bounds.contains(Tile::new(10, 0, 0)));
        assert!(!bounds.contains(Tile::new(-1, 4, 0)));
    }

    #[test]
    fn test_tile_serializes() {
        let tile = Tile::new(3, 4, 1);
        let json = serde_json::to_string(&tile).unwrap();
        let back: Tile = serde_json::from_str(&json).unwrap();
        assert_eq!(tile, back);
    }
}
