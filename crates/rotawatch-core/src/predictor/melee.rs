//! Melee intent: telling a melee swing apart from movement.
//!
//! A boss that can melee has to stand next to its target to do so. Given
//! where the boss stood last tick and where its target stood, the pursuit
//! step it would take is fully determined by the tile rules, so comparing
//! that prediction with where the boss actually went says whether it is
//! closing in, standing still to swing, or walking somewhere else.

use tilegrid::{has_line_of_sight, next_travelling_area, CollisionMap, Tile, WorldArea};
use tracing::debug;

use crate::entity::BossState;
use crate::occupancy::OccupancyTracker;
use crate::predictor::rotation::check_style_switch;
use crate::registry::EncounterRegistry;
use crate::style::{AttackStyle, StyleSet};

/// What the boss's movement says about melee.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MeleeIntent {
    /// Moved exactly along its pursuit path: closing to melee
    Pursuing,
    /// Went somewhere other than the pursuit step: not meleeing
    MovedAway,
    /// Already adjacent, attack due, nothing else seen: swinging in place
    AttackingInPlace,
}

impl MeleeIntent {
    /// Candidate set after applying this intent to `candidates`.
    #[must_use]
    pub fn narrow(self, candidates: StyleSet) -> StyleSet {
        match self {
            Self::Pursuing | Self::AttackingInPlace => candidates & StyleSet::MELEE,
            Self::MovedAway => candidates - StyleSet::MELEE,
        }
    }
}

/// Whether the melee-intent pass should run for `boss` this tick.
///
/// Requires an engaged boss with a target, no rotation reset this tick, no
/// movement lock, and melee among at least two candidates.
#[must_use]
pub fn is_eligible(boss: &BossState) -> bool {
    boss.combat_initiated
        && boss.interacting.is_some()
        && !boss.style_changed_this_tick
        && boss.melee_movement_lock_ticks == 0
        && boss.candidate_styles.contains_style(AttackStyle::Melee)
        && boss.candidate_styles.len() >= 2
}

/// Infer melee intent for `boss` from its movement.
///
/// # Arguments
///
/// * `boss` - Boss under inspection, already observed this tick
/// * `registry` - Every tracked boss and player, for target lookup and
///   pursuit blocking
/// * `occupancy` - Hazard markers recorded since the last tick
/// * `map` - Static collision data
/// * `tick` - Current tick
///
/// # Returns
///
/// The inferred intent, or `None` when the prediction is indeterminate
/// (target out of memory, different planes, overlapping areas, unloaded
/// tiles), when the target is out of range or cannot see the boss, or when
/// standing still is explained by something other than a melee swing.
pub fn infer_intent<M>(
    boss: &BossState,
    registry: &EncounterRegistry,
    occupancy: &OccupancyTracker,
    map: &M,
    tick: u64,
) -> Option<MeleeIntent>
where
    M: CollisionMap + ?Sized,
{
    let target_area = registry.target_of(boss)?.last_area?;

    let predicted = next_travelling_area(map, &boss.last_area, &target_area, true, |tile| {
        is_unoccupied(boss, registry, tile)
    })?;

    let distance = boss.area.distance_to(&target_area)?;
    if distance > boss.archetype().max_attack_range
        || !has_line_of_sight(map, &target_area, &boss.last_area)
    {
        return None;
    }

    let observed = boss.area.tile();
    if predicted.tile() != boss.last_area.tile() {
        if predicted.tile() == observed {
            Some(MeleeIntent::Pursuing)
        } else {
            Some(MeleeIntent::MovedAway)
        }
    } else if observed != predicted.tile() {
        // Expected to hold position but moved anyway.
        Some(MeleeIntent::MovedAway)
    } else if tick >= boss.next_attack_tick
        && boss.recent_projectile.is_none()
        && !boss.attacked_this_tick
        && !occupancy.occupies(&target_area)
    {
        Some(MeleeIntent::AttackingInPlace)
    } else {
        None
    }
}

/// Narrow `boss`'s candidates by `intent`.
///
/// A narrowing that would leave nothing triggers a full rotation reset.
pub fn apply_intent(boss: &mut BossState, intent: MeleeIntent, protected: Option<AttackStyle>) {
    let before = boss.candidate_styles;
    boss.candidate_styles = intent.narrow(before);
    debug!(
        boss = %boss.id(),
        ?intent,
        ?before,
        after = ?boss.candidate_styles,
        "melee intent"
    );
    if boss.candidate_styles.is_empty() {
        check_style_switch(boss, protected);
    }
}

/// Whether a 1x1 step onto `tile` is free of other bosses and friendlies.
///
/// Bosses with a smaller id have already been updated this tick, so their
/// current area is used; the rest still stand where they were last tick.
fn is_unoccupied(boss: &BossState, registry: &EncounterRegistry, tile: Tile) -> bool {
    let step = WorldArea::at(tile, 1);

    let blocked_by_boss = registry.bosses().any(|other| {
        if other.id() == boss.id() {
            return false;
        }
        let area = if other.id() < boss.id() {
            other.area
        } else {
            other.last_area
        };
        step.intersects(&area)
    });

    let blocked_by_player = registry
        .players()
        .filter_map(|mp| mp.last_area)
        .any(|area| step.intersects(&area));

    !blocked_by_boss && !blocked_by_player
}
