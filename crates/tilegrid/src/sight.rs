//! Tile line of sight.

use glam::IVec2;

use crate::{CollisionMap, Tile, WorldArea};

/// Whether `from` can see `to` across the collision map.
///
/// The line runs between the closest tiles of the two areas. Only the
/// tiles strictly between the endpoints are tested; the endpoints are where
/// the actors stand. Different planes or unloaded endpoints never have sight.
///
/// # Example
///
/// ```
/// use tilegrid::{has_line_of_sight, GridCollisionMap, SceneBounds, Tile, WorldArea};
///
/// let mut map = GridCollisionMap::new(SceneBounds::from_size(16, 16));
/// let a = WorldArea::new(2, 2, 1, 1, 0);
/// let b = WorldArea::new(6, 2, 1, 1, 0);
/// assert!(has_line_of_sight(&map, &a, &b));
///
/// map.block(Tile::new(4, 2, 0));
/// assert!(!has_line_of_sight(&map, &a, &b));
/// ```
pub fn has_line_of_sight<M>(map: &M, from: &WorldArea, to: &WorldArea) -> bool
where
    M: CollisionMap + ?Sized,
{
    if from.plane != to.plane {
        return false;
    }

    let start = from.comparison_point(to);
    let end = to.comparison_point(from);
    let plane = from.plane;

    if !map.is_loaded(Tile::new(start.x, start.y, plane))
        || !map.is_loaded(Tile::new(end.x, end.y, plane))
    {
        return false;
    }

    line_tiles(start, end)
        .into_iter()
        .all(|p| !map.blocks_sight(Tile::new(p.x, p.y, plane)))
}

/// Tiles strictly between `start` and `end` on a Bresenham line.
fn line_tiles(start: IVec2, end: IVec2) -> Vec<IVec2> {
    let delta = (end - start).abs();
    let step = IVec2::new((end.x - start.x).signum(), (end.y - start.y).signum());
    let mut err = delta.x - delta.y;
    let mut current = start;
    let mut tiles = Vec::new();

    while current != end {
        let e2 = 2 * err;
        if e2 > -delta.y {
            err -= delta.y;
            current.x += step.x;
        }
        if e2 < delta.x {
            err += delta.x;
            current.y += step.y;
        }
        if current != end {
            tiles.push(current);
        }
    }

    tiles
}
