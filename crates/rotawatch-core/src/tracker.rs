//! The tick pipeline.
//!
//! [`RotationTracker`] is the single mutation entry point. Lifecycle and
//! combat events are applied as they arrive; [`RotationTracker::tick`] then
//! runs the fixed per-tick order:
//!
//! 1. **BOSSES**: classify and update every boss, in ascending id order
//! 2. **PENDING**: judge every deferred attack that is now due
//! 3. **PLAYERS**: remember where each friendly stood, forget its damage
//! 4. **OCCUPANCY**: drop this tick's hazard markers
//!
//! # Determinism
//!
//! Every table is a `BTreeMap` and no step consults a clock or a random
//! source, so the same sequence of events and snapshots always produces
//! the same predictions.
//!
//! # Example
//!
//! ```
//! use rotawatch_core::config::TrackerConfig;
//! use rotawatch_core::entity::EntityId;
//! use rotawatch_core::style::StyleSet;
//! use rotawatch_core::tracker::RotationTracker;
//! use rotawatch_core::world_view::{NpcObservation, WorldSnapshot};
//! use tilegrid::{GridCollisionMap, SceneBounds, WorldArea};
//!
//! let mut tracker = RotationTracker::new(TrackerConfig::default()).unwrap();
//! let map = GridCollisionMap::new(SceneBounds::default());
//!
//! let hydra = NpcObservation {
//!     id: EntityId::new(1),
//!     npc_id: 8615,
//!     area: WorldArea::new(20, 20, 5, 5, 0),
//!     animation: None,
//!     interacting: None,
//!     protection: None,
//! };
//! let world = WorldSnapshot::new(1, 30).with_npc(hydra.clone());
//! tracker.on_npc_spawned(&hydra, &world);
//! tracker.tick(&world, &map);
//!
//! // The hydra casts a magic attack with nobody in memory to defend.
//! let mut casting = hydra;
//! casting.animation = Some(8236);
//! tracker.tick(&WorldSnapshot::new(2, 60).with_npc(casting), &map);
//!
//! let prediction = tracker.prediction(EntityId::new(1)).unwrap();
//! assert_eq!(prediction.candidate_styles, StyleSet::MAGIC);
//! assert_eq!(prediction.attacks_remaining, 2);
//! ```

use std::sync::Arc;

use tilegrid::CollisionMap;
use tracing::{debug, info, trace};

use crate::archetype::Archetype;
use crate::config::TrackerConfig;
use crate::entity::{ActorRef, EntityId};
use crate::error::Result;
use crate::occupancy::OccupancyTracker;
use crate::output::BossPrediction;
use crate::pending::{Judgement, PendingOutcomeQueue};
use crate::predictor::{
    apply_attack, apply_intent, classify, infer_intent, is_eligible, record_confirmed_defense,
};
use crate::registry::EncounterRegistry;
use crate::world_view::{
    ConnectionState, DamageEvent, FriendlyObservation, NpcObservation,
    ProjectileEvent, WorldSnapshot,
};

// =============================================================================
// RotationTracker
// =============================================================================

/// Owner of all predictive state and the per-tick pipeline.
///
/// Every mutating method takes `&mut self`; there is exactly one writer.
#[derive(Debug, Clone)]
pub struct RotationTracker {
    archetypes: Vec<Arc<Archetype>>,
    registry: EncounterRegistry,
    pending: PendingOutcomeQueue,
    occupancy: OccupancyTracker,
    tick: u64,
}

impl RotationTracker {
    /// Create a tracker for the archetypes in `config`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`](crate::error::ConfigError) from
    /// [`TrackerConfig::validate`] if the configuration is unusable.
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            archetypes: config.archetypes.into_iter().map(Arc::new).collect(),
            registry: EncounterRegistry::new(),
            pending: PendingOutcomeQueue::new(),
            occupancy: OccupancyTracker::new(),
            tick: 0,
        })
    }

    /// Create a tracker and start tracking every boss already in `world`.
    ///
    /// # Errors
    ///
    /// As [`RotationTracker::new`].
    pub fn from_snapshot(config: TrackerConfig, world: &WorldSnapshot) -> Result<Self> {
        let mut tracker = Self::new(config)?;
        tracker.rebuild(world);
        Ok(tracker)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Tick of the last processed snapshot.
    #[must_use]
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Boss and player records.
    #[must_use]
    pub fn registry(&self) -> &EncounterRegistry {
        &self.registry
    }

    /// Deferred attacks.
    #[must_use]
    pub fn pending(&self) -> &PendingOutcomeQueue {
        &self.pending
    }

    /// Hazard markers recorded since the last tick.
    #[must_use]
    pub fn occupancy(&self) -> &OccupancyTracker {
        &self.occupancy
    }

    /// Prediction for one boss.
    #[must_use]
    pub fn prediction(&self, id: EntityId) -> Option<BossPrediction> {
        self.registry.boss(id).map(BossPrediction::from)
    }

    /// Predictions for every tracked boss, in id order.
    #[must_use]
    pub fn predictions(&self) -> Vec<BossPrediction> {
        self.registry.bosses().map(BossPrediction::from).collect()
    }

    fn archetype_for(&self, npc_id: u32) -> Option<Arc<Archetype>> {
        self.archetypes
            .iter()
            .find(|a| a.tracks_npc(npc_id))
            .map(Arc::clone)
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// An NPC came into view. Untracked NPC types are ignored.
    pub fn on_npc_spawned(&mut self, obs: &NpcObservation, world: &WorldSnapshot) {
        let Some(archetype) = self.archetype_for(obs.npc_id) else {
            return;
        };
        let name = archetype.name.clone();
        let first = self.registry.insert_boss(archetype, obs, world);
        info!(boss = %obs.id, archetype = %name, first, "tracking boss");
    }

    /// An NPC left view.
    ///
    /// When the last boss goes, all player memory, pending attacks and
    /// hazard markers go with it.
    pub fn on_npc_despawned(&mut self, id: EntityId) {
        if self.registry.remove_boss(id).is_none() {
            return;
        }
        info!(boss = %id, "boss despawned");
        if !self.registry.is_tracking() {
            self.pending.clear();
            self.occupancy.clear();
            info!("no bosses left, encounter state dropped");
        }
    }

    /// A friendly came into view. Ignored while no boss is tracked.
    pub fn on_friendly_spawned(&mut self, obs: &FriendlyObservation) {
        if self.registry.insert_player(obs) {
            trace!(player = %obs.id, "remembering friendly");
        }
    }

    /// A friendly left view.
    pub fn on_friendly_despawned(&mut self, id: EntityId) {
        if self.registry.is_tracking() {
            self.registry.remove_player(id);
        }
    }

    /// A damage splat appeared. Ignored while no boss is tracked.
    pub fn on_damage(&mut self, event: DamageEvent) {
        if !self.registry.is_tracking() {
            return;
        }
        match event.actor {
            ActorRef::Player(id) => {
                if let Some(mp) = self.registry.player_mut(id) {
                    mp.recent_damage.push(event.kind);
                }
            }
            ActorRef::Npc(id) => {
                if let Some(boss) = self.registry.boss_mut(id) {
                    boss.took_damage_this_tick = true;
                }
            }
        }
    }

    /// A projectile was reported.
    ///
    /// Only the first report of a projectile the tracked archetypes care
    /// about is used, so repeated deliveries have no further effect.
    pub fn on_projectile(&mut self, event: &ProjectileEvent) {
        if !event.is_first_observation() {
            return;
        }
        let id = event.projectile_id;

        if self.archetypes.iter().any(|a| a.is_hazard_projectile(id)) {
            self.occupancy.mark(event.landing, self.tick);
            trace!(projectile = id, landing = ?event.landing, "hazard marked");
        } else if self.archetypes.iter().any(|a| a.is_style_projectile(id)) {
            for boss in self.registry.bosses_mut() {
                if boss.area.contains(event.source) {
                    boss.recent_projectile = Some(id);
                }
            }
        }
    }

    /// The client connection changed state.
    ///
    /// Logging in, losing the connection and hopping worlds all invalidate
    /// every record; the tables are rebuilt from `world`.
    pub fn on_connection_state(&mut self, state: ConnectionState, world: &WorldSnapshot) {
        if state.is_discontinuity() {
            info!(?state, "connection discontinuity, rebuilding");
            self.rebuild(world);
        }
    }

    /// Drop all state and track whatever is in `world`.
    ///
    /// Player memory is only rebuilt if at least one boss is found.
    pub fn rebuild(&mut self, world: &WorldSnapshot) {
        self.registry.clear();
        self.pending.clear();
        self.occupancy.clear();
        for obs in world.npcs.values() {
            if let Some(archetype) = self.archetype_for(obs.npc_id) {
                self.registry.insert_boss(archetype, obs, world);
            }
        }
        info!(
            bosses = self.registry.boss_count(),
            players = self.registry.players().count(),
            "registry rebuilt"
        );
    }

    // =========================================================================
    // Tick pipeline
    // =========================================================================

    /// Process one tick.
    pub fn tick<M>(&mut self, world: &WorldSnapshot, map: &M)
    where
        M: CollisionMap + ?Sized,
    {
        self.tick = world.tick;
        trace!(tick = self.tick, "tick start");

        self.observe(world);
        self.update_bosses(map);
        self.resolve_pending();
        self.refresh_players(world);
        self.occupancy.clear();

        trace!(tick = self.tick, "tick end");
    }

    /// Copy this tick's live fields into the records.
    fn observe(&mut self, world: &WorldSnapshot) {
        for boss in self.registry.bosses_mut() {
            if let Some(obs) = world.npc(boss.id()) {
                boss.observe(obs);
            }
        }
        for mp in self.registry.players_mut() {
            if let Some(obs) = world.friendly(mp.id()) {
                mp.protection = obs.protection;
            }
        }
    }

    fn update_bosses<M>(&mut self, map: &M)
    where
        M: CollisionMap + ?Sized,
    {
        let tick = self.tick;
        for id in self.registry.boss_ids() {
            // Engagement, classification and the movement lock.
            let Some((boss, target)) = self.registry.boss_with_target(id) else {
                continue;
            };
            let protected = target.and_then(|mp| mp.protected_style());
            let target_area = target.and_then(|mp| mp.last_area);

            if boss.last_interacting.is_some() && boss.interacting.is_none() {
                boss.combat_initiated = false;
            } else if let Some(area) = target_area {
                if !boss.combat_initiated
                    && tick < boss.next_attack_tick
                    && boss.area.is_in_melee_distance(&area)
                {
                    boss.combat_initiated = true;
                    boss.next_attack_tick = tick.saturating_add(1);
                }
            }

            let style = classify(
                boss.archetype(),
                boss.animation,
                boss.last_animation,
                boss.recent_projectile,
            );
            if let Some(style) = style {
                debug!(boss = %id, %style, tick, "attack classified");
                boss.attacked_this_tick = true;
                if let Some(attack) = apply_attack(boss, style, target, tick) {
                    self.pending.schedule(attack);
                }
            }

            let run_melee = if boss.melee_movement_lock_ticks > 0 {
                boss.melee_movement_lock_ticks -= 1;
                false
            } else {
                is_eligible(boss)
            };

            // Movement reads every other boss and player.
            let intent = if run_melee {
                self.registry
                    .boss(id)
                    .and_then(|boss| infer_intent(boss, &self.registry, &self.occupancy, map, tick))
            } else {
                None
            };

            // Apply the intent and roll the per-tick shadow.
            let Some(boss) = self.registry.boss_mut(id) else {
                continue;
            };
            if let Some(intent) = intent {
                apply_intent(boss, intent, protected);
            }

            if boss.took_damage_this_tick {
                boss.combat_initiated = true;
            }

            if boss.protection_changed() {
                boss.melee_movement_lock_ticks =
                    if boss.style_changed_this_tick || boss.style_changed_last_tick {
                        2
                    } else {
                        1
                    };
            }

            boss.end_tick();
        }
    }

    fn resolve_pending(&mut self) {
        for attack in self.pending.drain_due(self.tick) {
            let judgement = Judgement::from_target(self.registry.player(attack.target));
            let Some(boss) = self
                .registry
                .boss_mut(attack.attacker)
                .filter(|boss| boss.seq() == attack.attacker_seq)
            else {
                debug!(attacker = %attack.attacker, "pending attacker gone, dropped");
                continue;
            };
            debug!(
                boss = %attack.attacker,
                style = %attack.style,
                target = %attack.target,
                ?judgement,
                "pending attack resolved"
            );
            if judgement == Judgement::Correct {
                record_confirmed_defense(boss);
            }
        }
    }

    fn refresh_players(&mut self, world: &WorldSnapshot) {
        for mp in self.registry.players_mut() {
            if let Some(obs) = world.friendly(mp.id()) {
                mp.refresh(obs.area);
            } else {
                mp.recent_damage.clear();
            }
        }
    }
}
