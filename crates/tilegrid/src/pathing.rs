//! One-step pursuit movement.
//!
//! Hostile actors chase their target greedily, one tile per tick: first
//! diagonally toward it, then along x, then along y. They never cut corners
//! and stop once they are cardinally adjacent to the target. This module
//! reproduces that single step so an observer can compare where an actor
//! *should* have moved with where it actually went.

use crate::{CollisionMap, Tile, WorldArea};

/// Predict the area `from` occupies after one pursuit step toward `target`.
///
/// # Arguments
///
/// * `map` - Static collision data for the scene
/// * `from` - Area the actor occupies now
/// * `target` - Area of the actor being chased
/// * `stop_at_melee_distance` - Stay put once cardinally adjacent to `target`
/// * `extra` - Veto for tiles the actor would newly enter (occupied by
///   another actor, a hazard, ...)
///
/// # Returns
///
/// - `None` when the step is indeterminate: different planes, unloaded
///   tiles, or (with `stop_at_melee_distance`) the two areas overlap, where
///   movement is unpredictable;
/// - `Some(*from)` when the actor stays put (already adjacent, or stuck);
/// - `Some(next)` otherwise.
///
/// # Example
///
/// ```
/// use tilegrid::{next_travelling_area, GridCollisionMap, SceneBounds, Tile, WorldArea};
///
/// let map = GridCollisionMap::new(SceneBounds::from_size(32, 32));
/// let npc = WorldArea::new(5, 5, 1, 1, 0);
/// let player = WorldArea::new(9, 9, 1, 1, 0);
///
/// let next = next_travelling_area(&map, &npc, &player, true, |_| true).unwrap();
/// assert_eq!(next.tile(), Tile::new(6, 6, 0));
/// ```
pub fn next_travelling_area<M, F>(
    map: &M,
    from: &WorldArea,
    target: &WorldArea,
    stop_at_melee_distance: bool,
    extra: F,
) -> Option<WorldArea>
where
    M: CollisionMap + ?Sized,
    F: Fn(Tile) -> bool,
{
    if from.plane != target.plane {
        return None;
    }

    if from.intersects(target) {
        return if stop_at_melee_distance {
            None
        } else {
            Some(*from)
        };
    }

    let dx = target.origin.x - from.origin.x;
    let dy = target.origin.y - from.origin.y;
    let axis = from.axis_distances(target);

    if stop_at_melee_distance && axis.x + axis.y == 1 {
        return Some(*from);
    }

    if !map.is_loaded(from.tile()) || !map.is_loaded(target.tile()) {
        return None;
    }

    let sx = dx.signum();
    let sy = dy.signum();

    if stop_at_melee_distance && axis.x == 1 && axis.y == 1 {
        // Diagonal to the target: only an x step can reach melee distance.
        if can_travel(map, from, sx, 0, &extra) {
            return Some(from.translated(sx, 0));
        }
    } else if can_travel(map, from, sx, sy, &extra) {
        return Some(from.translated(sx, sy));
    } else if dx != 0 && can_travel(map, from, sx, 0, &extra) {
        return Some(from.translated(sx, 0));
    } else if dy != 0 && dx.abs().max(dy.abs()) > 1 && can_travel(map, from, 0, sy, &extra) {
        // No y-only fallback when the target is a single tile away.
        return Some(from.translated(0, sy));
    }

    Some(*from)
}

/// Whether `area` can move by `(dx, dy)` (each in -1..=1).
///
/// Diagonal moves also require both cardinal components to be clear.
fn can_travel<M, F>(map: &M, area: &WorldArea, dx: i32, dy: i32, extra: &F) -> bool
where
    M: CollisionMap + ?Sized,
    F: Fn(Tile) -> bool,
{
    if dx == 0 && dy == 0 {
        return false;
    }
    if dx != 0
        && dy != 0
        && !(step_clear(map, area, dx, 0, extra) && step_clear(map, area, 0, dy, extra))
    {
        return false;
    }
    step_clear(map, area, dx, dy, extra)
}

fn step_clear<M, F>(map: &M, area: &WorldArea, dx: i32, dy: i32, extra: &F) -> bool
where
    M: CollisionMap + ?Sized,
    F: Fn(Tile) -> bool,
{
    let next = area.translated(dx, dy);
    let clear = next
        .tiles()
        .filter(|tile| !area.contains(*tile))
        .all(|tile| map.is_walkable(tile) && extra(tile));
    clear
}
