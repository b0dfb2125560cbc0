//! Rotation state machine: candidate styles and the switch countdown.
//!
//! A boss attacks with one style until it has landed a fixed number of
//! attacks the target defended correctly, then switches to a style the
//! target is not protecting against. The countdown is only advanced on a
//! confirmed-correct defense; when the defense looked wrong the judgement is
//! deferred to the [`PendingOutcomeQueue`](crate::pending::PendingOutcomeQueue).

use tracing::debug;

use crate::entity::{BossState, PlayerMemory};
use crate::pending::PendingAttack;
use crate::style::AttackStyle;

/// Update a boss after it was seen attacking with `style`.
///
/// # Arguments
///
/// * `boss` - The attacking boss
/// * `style` - Classified attack style
/// * `target` - Memory of the friendly the boss is interacting with; `None`
///   when there is no target or it has fallen out of memory, both of which
///   count as a correct defense
/// * `tick` - Tick the attack was seen
///
/// # Returns
///
/// The attack to schedule when the outcome has to wait for the damage
/// splat, `None` when it was counted immediately.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use rotawatch_core::archetype::Archetype;
/// use rotawatch_core::entity::{BossState, EntityId};
/// use rotawatch_core::predictor::apply_attack;
/// use rotawatch_core::style::{AttackStyle, StyleSet};
/// use rotawatch_core::world_view::NpcObservation;
/// use tilegrid::WorldArea;
///
/// let obs = NpcObservation {
///     id: EntityId::new(1),
///     npc_id: 8615,
///     area: WorldArea::new(0, 0, 5, 5, 0),
///     animation: None,
///     interacting: None,
///     protection: None,
/// };
/// let mut boss = BossState::new(EntityId::new(1), 0, Arc::new(Archetype::alchemical_hydra()), &obs);
///
/// // No target in memory: assumed correct, counted immediately.
/// assert!(apply_attack(&mut boss, AttackStyle::Ranged, None, 10).is_none());
/// assert_eq!(boss.candidate_styles, StyleSet::RANGED);
/// assert_eq!(boss.attacks_remaining, 2);
/// assert_eq!(boss.next_attack_tick, 16);
/// ```
pub fn apply_attack(
    boss: &mut BossState,
    style: AttackStyle,
    target: Option<&PlayerMemory>,
    tick: u64,
) -> Option<PendingAttack> {
    let protected = target.and_then(PlayerMemory::protected_style);
    let correct = target.is_none() || protected == Some(style);

    let mut pending = None;
    if correct {
        boss.attacks_remaining = boss.attacks_remaining.saturating_sub(1);
    } else if let Some(mp) = target {
        let travel = mp
            .last_area
            .and_then(|area| boss.area.distance_to(&area))
            .map_or(0, |distance| boss.archetype().travel_ticks(style, distance));
        let attack = PendingAttack {
            attacker: boss.id(),
            attacker_seq: boss.seq(),
            style,
            target: mp.id(),
            resolution_tick: tick.saturating_add(travel),
        };
        debug!(
            boss = %boss.id(),
            %style,
            target = %mp.id(),
            resolution_tick = attack.resolution_tick,
            "defense mismatch, outcome deferred"
        );
        pending = Some(attack);
    }

    let narrowed = boss.candidate_styles & style.flag();
    if narrowed.is_empty() {
        // Switched early: whoever fought it last left the countdown mid-way.
        debug!(boss = %boss.id(), %style, "unexpected style, restarting countdown");
        boss.candidate_styles = boss.archetype().regular_styles & style.flag();
        boss.attacks_remaining = boss
            .archetype()
            .attacks_per_switch
            .saturating_sub(u32::from(correct));
    } else {
        boss.candidate_styles = narrowed;
    }

    check_style_switch(boss, protected);

    boss.combat_initiated = true;
    boss.next_attack_tick = tick.saturating_add(boss.archetype().attack_period);
    pending
}

/// Record a defense confirmed correct after the fact.
pub fn record_confirmed_defense(boss: &mut BossState) {
    boss.attacks_remaining = boss.attacks_remaining.saturating_sub(1);
    check_style_switch(boss, None);
}

/// Reset the rotation if the countdown ran out or no style is left.
///
/// The reset excludes `protected`: the boss switches away from whatever the
/// target is protecting against.
pub fn check_style_switch(boss: &mut BossState, protected: Option<AttackStyle>) {
    if boss.attacks_remaining == 0 || boss.candidate_styles.is_empty() {
        boss.reset_rotation(protected);
        debug!(
            boss = %boss.id(),
            candidates = ?boss.candidate_styles,
            "rotation reset"
        );
    }
}
