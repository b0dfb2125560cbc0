//! Per-boss rotation state.

use std::sync::Arc;

use tilegrid::WorldArea;

use super::EntityId;
use crate::archetype::Archetype;
use crate::style::{AttackStyle, ProtectionIcon, StyleSet};
use crate::world_view::NpcObservation;

/// Rotation state for one tracked boss.
///
/// Fields come in pairs: the live value copied from this tick's snapshot
/// (`area`, `animation`, ...) and the `last_*` shadow holding the value from
/// the end of the previous tick. The tick pipeline compares the two to
/// detect changes, then [`BossState::end_tick`] rolls live into shadow.
#[derive(Debug, Clone)]
pub struct BossState {
    id: EntityId,
    seq: u64,
    archetype: Arc<Archetype>,

    /// Current area
    pub area: WorldArea,
    /// Current animation
    pub animation: Option<u32>,
    /// Current interaction target
    pub interacting: Option<EntityId>,
    /// Current protection icon
    pub protection: Option<ProtectionIcon>,

    /// Styles still possible for the next attack
    pub candidate_styles: StyleSet,
    /// Confirmed-correct defenses left before a forced switch
    pub attacks_remaining: u32,
    /// Whether the boss is engaged with its target
    pub combat_initiated: bool,
    /// Earliest tick the next attack can happen
    pub next_attack_tick: u64,
    /// Ticks the melee-intent pass stays disabled
    pub melee_movement_lock_ticks: u32,
    /// Style projectile seen leaving the boss this tick
    pub recent_projectile: Option<u32>,

    /// A rotation reset happened this tick
    pub style_changed_this_tick: bool,
    /// A rotation reset happened last tick
    pub style_changed_last_tick: bool,
    /// The boss was hit this tick
    pub took_damage_this_tick: bool,
    /// An attack was classified this tick
    pub attacked_this_tick: bool,

    /// Animation at the end of the previous tick
    pub last_animation: Option<u32>,
    /// Area at the end of the previous tick
    pub last_area: WorldArea,
    /// Interaction target at the end of the previous tick
    pub last_interacting: Option<EntityId>,
    /// Protection icon at the end of the previous tick
    pub last_protection: Option<ProtectionIcon>,
}

impl BossState {
    /// Start tracking a boss from its first observation.
    ///
    /// The shadow fields start equal to the live ones, so nothing counts as
    /// changed on the first processed tick.
    #[must_use]
    pub fn new(id: EntityId, seq: u64, archetype: Arc<Archetype>, obs: &NpcObservation) -> Self {
        Self {
            id,
            seq,
            candidate_styles: archetype.regular_styles,
            attacks_remaining: archetype.attacks_per_switch,
            archetype,
            area: obs.area,
            animation: obs.animation,
            interacting: obs.interacting,
            protection: obs.protection,
            combat_initiated: false,
            next_attack_tick: 0,
            melee_movement_lock_ticks: 0,
            recent_projectile: None,
            style_changed_this_tick: false,
            style_changed_last_tick: false,
            took_damage_this_tick: false,
            attacked_this_tick: false,
            last_animation: obs.animation,
            last_area: obs.area,
            last_interacting: obs.interacting,
            last_protection: obs.protection,
        }
    }

    /// The boss's identity.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Creation sequence number within the registry.
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }

    /// Rules this boss follows.
    #[must_use]
    pub fn archetype(&self) -> &Archetype {
        &self.archetype
    }

    /// Copy live fields from this tick's observation.
    pub fn observe(&mut self, obs: &NpcObservation) {
        self.area = obs.area;
        self.animation = obs.animation;
        self.interacting = obs.interacting;
        self.protection = obs.protection;
    }

    /// Whether the animation differs from last tick.
    #[must_use]
    pub fn animation_changed(&self) -> bool {
        self.animation != self.last_animation
    }

    /// Whether the protection icon differs from last tick.
    #[must_use]
    pub fn protection_changed(&self) -> bool {
        self.protection != self.last_protection
    }

    /// Full rotation reset: every regular style except `protected`.
    ///
    /// A boss with a single regular style keeps it even when the target
    /// protects against it, so the candidate set is never empty.
    pub fn reset_rotation(&mut self, protected: Option<AttackStyle>) {
        let regular = self.archetype.regular_styles;
        let styles = match protected {
            Some(style) => regular - style.flag(),
            None => regular,
        };
        self.candidate_styles = if styles.is_empty() { regular } else { styles };
        self.attacks_remaining = self.archetype.attacks_per_switch;
        self.style_changed_this_tick = true;
    }

    /// Roll live fields into the shadow and clear per-tick flags.
    pub fn end_tick(&mut self) {
        self.last_animation = self.animation;
        self.last_area = self.area;
        self.last_interacting = self.interacting;
        self.last_protection = self.protection;
        self.took_damage_this_tick = false;
        self.attacked_this_tick = false;
        self.style_changed_last_tick = self.style_changed_this_tick;
        self.style_changed_this_tick = false;
        self.recent_projectile = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(animation: Option<u32>) -> NpcObservation {
        NpcObservation {
            id: EntityId::new(1),
            npc_id: 7144,
            area: WorldArea::new(10, 10, 2, 2, 0),
            animation,
            interacting: None,
            protection: Some(ProtectionIcon::Melee),
        }
    }

    #[test]
    fn test_new_boss_starts_at_full_rotation() {
        let archetype = Arc::new(Archetype::demonic_gorilla());
        let boss = BossState::new(EntityId::new(1), 0, archetype, &observation(None));
        assert_eq!(boss.candidate_styles, StyleSet::all());
        assert_eq!(boss.attacks_remaining, 3);
        assert!(!boss.combat_initiated);
        assert!(!boss.animation_changed());
        assert!(!boss.protection_changed());
    }

    #[test]
    fn test_reset_excludes_protected_style() {
        let archetype = Arc::new(Archetype::demonic_gorilla());
        let mut boss = BossState::new(EntityId::new(1), 0, archetype, &observation(None));
        boss.candidate_styles = StyleSet::MAGIC;
        boss.attacks_remaining = 0;

        boss.reset_rotation(Some(AttackStyle::Magic));
        assert_eq!(boss.candidate_styles, StyleSet::MELEE | StyleSet::RANGED);
        assert_eq!(boss.attacks_remaining, 3);
        assert!(boss.style_changed_this_tick);
    }

    #[test]
    fn test_reset_keeps_sole_regular_style() {
        let mut archetype = Archetype::alchemical_hydra();
        archetype.regular_styles = StyleSet::MAGIC;
        archetype.attacks_per_switch = 1;
        let mut boss = BossState::new(EntityId::new(1), 0, Arc::new(archetype), &observation(None));
        boss.attacks_remaining = 0;

        boss.reset_rotation(Some(AttackStyle::Magic));
        assert_eq!(boss.candidate_styles, StyleSet::MAGIC);
        assert_eq!(boss.attacks_remaining, 1);
    }

    #[test]
    fn test_end_tick_rolls_shadow_fields() {
        let archetype = Arc::new(Archetype::demonic_gorilla());
        let mut boss = BossState::new(EntityId::new(1), 0, archetype, &observation(None));
        boss.observe(&observation(Some(7225)));
        boss.style_changed_this_tick = true;
        boss.recent_projectile = Some(1304);
        assert!(boss.animation_changed());

        boss.end_tick();
        assert!(!boss.animation_changed());
        assert!(boss.style_changed_last_tick);
        assert!(!boss.style_changed_this_tick);
        assert_eq!(boss.recent_projectile, None);
    }
}
