//! Transient ground-hazard markers.
//!
//! Some bosses throw area attacks that land on a tile a few ticks after the
//! projectile appears. While one is in flight toward the target's tile, the
//! boss standing still is explained by the hazard rather than by a melee
//! swing. Markers live for exactly one tick: the pipeline clears them as its
//! last step.

use std::collections::BTreeSet;

use tilegrid::{Tile, WorldArea};

/// A hazard landing tile and the tick it was recorded.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OccupancyMarker {
    /// Landing tile
    pub tile: Tile,
    /// Tick the marker was recorded
    pub tick: u64,
}

/// Set of hazard markers for the current tick.
///
/// # Example
///
/// ```
/// use rotawatch_core::occupancy::OccupancyTracker;
/// use tilegrid::{Tile, WorldArea};
///
/// let mut occupancy = OccupancyTracker::new();
/// occupancy.mark(Tile::new(4, 4, 0), 12);
/// occupancy.mark(Tile::new(4, 4, 0), 12);
/// assert_eq!(occupancy.len(), 1);
///
/// assert!(occupancy.occupies(&WorldArea::new(4, 4, 1, 1, 0)));
/// occupancy.clear();
/// assert!(occupancy.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancyTracker {
    markers: BTreeSet<OccupancyMarker>,
}

impl OccupancyTracker {
    /// Empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a hazard landing on `tile`. Repeat marks are no-ops.
    pub fn mark(&mut self, tile: Tile, tick: u64) {
        self.markers.insert(OccupancyMarker { tile, tick });
    }

    /// Whether any marker lies inside `area`.
    #[must_use]
    pub fn occupies(&self, area: &WorldArea) -> bool {
        self.markers.iter().any(|m| area.contains(m.tile))
    }

    /// Drop every marker.
    pub fn clear(&mut self) {
        self.markers.clear();
    }

    /// Number of markers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether there are no markers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Markers in tile order.
    pub fn iter(&self) -> impl Iterator<Item = &OccupancyMarker> {
        self.markers.iter()
    }
}
