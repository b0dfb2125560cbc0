//! Encounter registry: owner of every boss and player record.
//!
//! The registry stores records in `BTreeMap`s keyed by [`EntityId`], so
//! iteration order is the id order on every platform. Players are only
//! remembered while at least one boss is tracked: the first boss to appear
//! backfills memory for every friendly already in view, and the last boss to
//! disappear drops it all.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use rotawatch_core::archetype::Archetype;
//! use rotawatch_core::entity::EntityId;
//! use rotawatch_core::registry::EncounterRegistry;
//! use rotawatch_core::world_view::{FriendlyObservation, NpcObservation, WorldSnapshot};
//! use tilegrid::WorldArea;
//!
//! let world = WorldSnapshot::new(0, 0).with_friendly(FriendlyObservation {
//!     id: EntityId::new(7),
//!     area: WorldArea::new(3, 3, 1, 1, 0),
//!     protection: None,
//! });
//! let boss = NpcObservation {
//!     id: EntityId::new(1),
//!     npc_id: 8615,
//!     area: WorldArea::new(10, 10, 5, 5, 0),
//!     animation: None,
//!     interacting: None,
//!     protection: None,
//! };
//!
//! let mut registry = EncounterRegistry::new();
//! registry.insert_boss(Arc::new(Archetype::alchemical_hydra()), &boss, &world);
//!
//! // The friendly was backfilled when the first boss appeared.
//! assert!(registry.player(EntityId::new(7)).is_some());
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::archetype::Archetype;
use crate::entity::{BossState, EntityId, PlayerMemory};
use crate::world_view::{FriendlyObservation, NpcObservation, WorldSnapshot};

/// Owner of all per-boss and per-player state.
#[derive(Debug, Clone, Default)]
pub struct EncounterRegistry {
    bosses: BTreeMap<EntityId, BossState>,
    players: BTreeMap<EntityId, PlayerMemory>,
    next_seq: u64,
}

impl EncounterRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Bosses
    // =========================================================================

    /// Start tracking a boss, replacing any record with the same id.
    ///
    /// If no boss was tracked before, memory is created for every friendly
    /// in `world`. Returns whether this was the first boss.
    pub fn insert_boss(
        &mut self,
        archetype: Arc<Archetype>,
        obs: &NpcObservation,
        world: &WorldSnapshot,
    ) -> bool {
        let first = self.bosses.is_empty();
        if first {
            self.backfill_players(world);
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.bosses
            .insert(obs.id, BossState::new(obs.id, seq, archetype, obs));
        first
    }

    /// Stop tracking a boss.
    ///
    /// Removing the last boss also drops all player memory.
    pub fn remove_boss(&mut self, id: EntityId) -> Option<BossState> {
        let removed = self.bosses.remove(&id);
        if removed.is_some() && self.bosses.is_empty() {
            self.players.clear();
        }
        removed
    }

    /// Look up a boss.
    #[must_use]
    pub fn boss(&self, id: EntityId) -> Option<&BossState> {
        self.bosses.get(&id)
    }

    /// Look up a boss mutably.
    pub fn boss_mut(&mut self, id: EntityId) -> Option<&mut BossState> {
        self.bosses.get_mut(&id)
    }

    /// A boss together with the memory of the friendly it is targeting.
    pub fn boss_with_target(
        &mut self,
        id: EntityId,
    ) -> Option<(&mut BossState, Option<&PlayerMemory>)> {
        let players = &self.players;
        let boss = self.bosses.get_mut(&id)?;
        let target = boss.interacting.and_then(|t| players.get(&t));
        Some((boss, target))
    }

    /// Tracked bosses in id order.
    pub fn bosses(&self) -> impl Iterator<Item = &BossState> {
        self.bosses.values()
    }

    /// Tracked bosses in id order, mutably.
    pub fn bosses_mut(&mut self) -> impl Iterator<Item = &mut BossState> {
        self.bosses.values_mut()
    }

    /// Tracked boss ids in processing order.
    #[must_use]
    pub fn boss_ids(&self) -> Vec<EntityId> {
        self.bosses.keys().copied().collect()
    }

    /// Number of tracked bosses.
    #[must_use]
    pub fn boss_count(&self) -> usize {
        self.bosses.len()
    }

    /// Whether any boss is tracked (and therefore players are remembered).
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        !self.bosses.is_empty()
    }

    // =========================================================================
    // Players
    // =========================================================================

    /// Remember a friendly. Ignored while no boss is tracked.
    ///
    /// Returns whether the friendly is now remembered.
    pub fn insert_player(&mut self, obs: &FriendlyObservation) -> bool {
        if !self.is_tracking() {
            return false;
        }
        self.players
            .insert(obs.id, PlayerMemory::from_observation(obs));
        true
    }

    /// Forget a friendly.
    pub fn remove_player(&mut self, id: EntityId) -> Option<PlayerMemory> {
        self.players.remove(&id)
    }

    /// Look up a friendly's memory.
    #[must_use]
    pub fn player(&self, id: EntityId) -> Option<&PlayerMemory> {
        self.players.get(&id)
    }

    /// Look up a friendly's memory mutably.
    pub fn player_mut(&mut self, id: EntityId) -> Option<&mut PlayerMemory> {
        self.players.get_mut(&id)
    }

    /// Remembered friendlies in id order.
    pub fn players(&self) -> impl Iterator<Item = &PlayerMemory> {
        self.players.values()
    }

    /// Remembered friendlies in id order, mutably.
    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut PlayerMemory> {
        self.players.values_mut()
    }

    /// Memory of the friendly `boss` is targeting.
    #[must_use]
    pub fn target_of(&self, boss: &BossState) -> Option<&PlayerMemory> {
        boss.interacting.and_then(|t| self.players.get(&t))
    }

    fn backfill_players(&mut self, world: &WorldSnapshot) {
        self.players = world
            .friendlies
            .values()
            .map(|obs| (obs.id, PlayerMemory::from_observation(obs)))
            .collect();
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Forget everything.
    pub fn clear(&mut self) {
        self.bosses.clear();
        self.players.clear();
    }
}
