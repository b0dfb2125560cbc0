//! Rectangular tile areas occupied by actors.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::Tile;

/// Axis-aligned rectangle of tiles anchored at its south-west corner.
///
/// An actor of size `n` occupies an `n x n` area. All distance and adjacency
/// queries compare the closest pair of tiles between two areas, so a large
/// actor is "in melee distance" of anything touching any of its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldArea {
    /// South-west corner.
    pub origin: IVec2,
    /// Width in tiles (>= 1).
    pub width: i32,
    /// Height in tiles (>= 1).
    pub height: i32,
    /// Height level.
    pub plane: i32,
}

impl WorldArea {
    /// Create an area from its south-west corner and size.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32, plane: i32) -> Self {
        Self {
            origin: IVec2::new(x, y),
            width,
            height,
            plane,
        }
    }

    /// Square area of `size` tiles anchored at `tile`.
    #[must_use]
    pub const fn at(tile: Tile, size: i32) -> Self {
        Self::new(tile.pos.x, tile.pos.y, size, size, tile.plane)
    }

    /// The south-west tile of this area.
    #[must_use]
    pub const fn tile(&self) -> Tile {
        Tile::new(self.origin.x, self.origin.y, self.plane)
    }

    /// Same area moved by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            origin: self.origin + IVec2::new(dx, dy),
            ..*self
        }
    }

    /// Check if a tile lies within this area.
    #[must_use]
    pub fn contains(&self, tile: Tile) -> bool {
        tile.plane == self.plane
            && tile.pos.x >= self.origin.x
            && tile.pos.x < self.origin.x + self.width
            && tile.pos.y >= self.origin.y
            && tile.pos.y < self.origin.y + self.height
    }

    /// All tiles covered by this area, row by row from the south-west corner.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        (0..self.height).flat_map(move |dy| {
            (0..self.width).map(move |dx| {
                Tile::new(self.origin.x + dx, self.origin.y + dy, self.plane)
            })
        })
    }

    /// The tile of this area closest to `other`, per axis.
    #[must_use]
    pub fn comparison_point(&self, other: &Self) -> IVec2 {
        let x = clamp_axis(other.origin.x, self.origin.x, self.width);
        let y = clamp_axis(other.origin.y, self.origin.y, self.height);
        IVec2::new(x, y)
    }

    /// Per-axis tile gap between the closest tiles of two areas.
    #[must_use]
    pub fn axis_distances(&self, other: &Self) -> IVec2 {
        (self.comparison_point(other) - other.comparison_point(self)).abs()
    }

    /// Chebyshev distance between the closest tiles, `None` across planes.
    ///
    /// Overlapping areas are at distance 0.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> Option<u32> {
        if self.plane != other.plane {
            return None;
        }
        let d = self.axis_distances(other);
        Some(d.x.max(d.y).unsigned_abs())
    }

    /// Whether two areas share at least one tile.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        if self.plane != other.plane {
            return false;
        }
        let d = self.axis_distances(other);
        d.x + d.y == 0
    }

    /// Whether two areas touch along a cardinal edge (diagonals excluded).
    #[must_use]
    pub fn is_in_melee_distance(&self, other: &Self) -> bool {
        if self.plane != other.plane {
            return false;
        }
        let d = self.axis_distances(other);
        d.x + d.y == 1
    }
}

/// Clamp `target` onto the span `[start, start + len - 1]`.
fn clamp_axis(target: i32, start: i32, len: i32) -> i32 {
    let end = start + len - 1;
    if target <= start {
        start
    } else if target >= end {
        end
    } else {
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_distance_between_unit_areas() {
        let a = WorldArea::new(0, 0, 1, 1, 0);
        let b = WorldArea::new(4, 2, 1, 1, 0);
        assert_eq!(a.distance_to(&b), Some(4));
    }

    #[test]
    fn test_distance_uses_closest_edge() {
        let big = WorldArea::new(0, 0, 5, 5, 0);
        let small = WorldArea::new(7, 2, 1, 1, 0);
        assert_eq!(big.distance_to(&small), Some(3));
        assert_eq!(small.distance_to(&big), Some(3));
    }

    #[test]
    fn test_distance_across_planes() {
        let a = WorldArea::new(0, 0, 1, 1, 0);
        let b = WorldArea::new(0, 0, 1, 1, 1);
        assert_eq!(a.distance_to(&b), None);
        assert!(!a.intersects(&b));
        assert!(!a.is_in_melee_distance(&b));
    }

    #[test]
    fn test_melee_distance_excludes_diagonal() {
        let a = WorldArea::new(5, 5, 1, 1, 0);
        assert!(a.is_in_melee_distance(&WorldArea::new(6, 5, 1, 1, 0)));
        assert!(a.is_in_melee_distance(&WorldArea::new(5, 4, 1, 1, 0)));
        assert!(!a.is_in_melee_distance(&WorldArea::new(6, 6, 1, 1, 0)));
        assert!(!a.is_in_melee_distance(&WorldArea::new(5, 5, 1, 1, 0)));
    }

    #[test]
    fn test_melee_distance_large_actor() {
        let boss = WorldArea::new(10, 10, 3, 3, 0);
        assert!(boss.is_in_melee_distance(&WorldArea::new(11, 13, 1, 1, 0)));
        assert!(!boss.is_in_melee_distance(&WorldArea::new(13, 13, 1, 1, 0)));
    }

    #[test]
    fn test_intersects_and_contains() {
        let a = WorldArea::new(0, 0, 2, 2, 0);
        assert!(a.intersects(&WorldArea::new(1, 1, 1, 1, 0)));
        assert!(!a.intersects(&WorldArea::new(2, 0, 1, 1, 0)));
        assert!(a.contains(Tile::new(1, 1, 0)));
        assert!(!a.contains(Tile::new(2, 1, 0)));
        assert_eq!(a.tiles().count(), 4);
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(
            ax in -50i32..50, ay in -50i32..50, asz in 1i32..5,
            bx in -50i32..50, by in -50i32..50, bsz in 1i32..5,
        ) {
            let a = WorldArea::new(ax, ay, asz, asz, 0);
            let b = WorldArea::new(bx, by, bsz, bsz, 0);
            prop_assert_eq!(a.distance_to(&b), b.distance_to(&a));
            prop_assert_eq!(a.intersects(&b), a.distance_to(&b) == Some(0));
        }
    }
}
