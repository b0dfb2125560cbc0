//! Test helper functions for driving a tracker through an encounter.
//!
//! [`Encounter`] keeps the "live" observations of every NPC and friendly,
//! builds a [`WorldSnapshot`] from them each tick, and forwards lifecycle
//! and combat events to the tracker the way a game client would.

use std::collections::BTreeMap;

use tilegrid::{GridCollisionMap, SceneBounds, Tile, WorldArea};

use crate::archetype::Archetype;
use crate::config::TrackerConfig;
use crate::entity::{ActorRef, EntityId};
use crate::output::BossPrediction;
use crate::style::ProtectionIcon;
use crate::tracker::RotationTracker;
use crate::world_view::{
    DamageEvent, DamageKind, FriendlyObservation, NpcObservation, ProjectileEvent, WorldSnapshot,
};

/// Game cycles per server tick.
pub const CYCLES_PER_TICK: u64 = 30;

/// Default friendly used as every boss's target.
pub const PLAYER: EntityId = EntityId::new(100);

// =============================================================================
// Observation Factories
// =============================================================================

/// A demonic gorilla (2x2) at `(x, y)` targeting [`PLAYER`].
pub fn gorilla_at(id: u64, x: i32, y: i32) -> NpcObservation {
    NpcObservation {
        id: EntityId::new(id),
        npc_id: 7144,
        area: WorldArea::new(x, y, 2, 2, 0),
        animation: None,
        interacting: Some(PLAYER),
        protection: Some(ProtectionIcon::Melee),
    }
}

/// An Alchemical Hydra (5x5) at `(x, y)` targeting [`PLAYER`].
pub fn hydra_at(id: u64, x: i32, y: i32) -> NpcObservation {
    NpcObservation {
        id: EntityId::new(id),
        npc_id: 8615,
        area: WorldArea::new(x, y, 5, 5, 0),
        animation: None,
        interacting: Some(PLAYER),
        protection: None,
    }
}

/// A friendly at `(x, y)`.
pub fn friendly_at(id: EntityId, x: i32, y: i32, icon: Option<ProtectionIcon>) -> FriendlyObservation {
    FriendlyObservation {
        id,
        area: WorldArea::new(x, y, 1, 1, 0),
        protection: icon,
    }
}

/// Config tracking only demonic gorillas, with a custom switch cadence.
pub fn gorilla_config(cadence: u32) -> TrackerConfig {
    let mut gorilla = Archetype::demonic_gorilla();
    gorilla.attacks_per_switch = cadence;
    TrackerConfig::with_archetype(gorilla)
}

/// Route tracker logs to the test harness. Later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::INFO)
        .try_init();
}

// =============================================================================
// Encounter Driver
// =============================================================================

/// A tracker plus the world it is watching.
pub struct Encounter {
    /// Tracker under test
    pub tracker: RotationTracker,
    /// Collision map handed to every tick
    pub map: GridCollisionMap,
    /// Tick of the last processed snapshot
    pub tick: u64,
    /// Live NPC observations
    pub npcs: BTreeMap<EntityId, NpcObservation>,
    /// Live friendly observations
    pub friendlies: BTreeMap<EntityId, FriendlyObservation>,
}

impl Encounter {
    /// Empty 64x64 open scene.
    pub fn new(config: TrackerConfig) -> Self {
        init_tracing();
        Self {
            tracker: RotationTracker::new(config).expect("valid test config"),
            map: GridCollisionMap::new(SceneBounds::from_size(64, 64)),
            tick: 0,
            npcs: BTreeMap::new(),
            friendlies: BTreeMap::new(),
        }
    }

    /// What the client would report right now.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            game_cycle: self.tick * CYCLES_PER_TICK,
            npcs: self.npcs.clone(),
            friendlies: self.friendlies.clone(),
        }
    }

    /// An NPC comes into view.
    pub fn spawn_npc(&mut self, obs: NpcObservation) {
        self.npcs.insert(obs.id, obs.clone());
        let world = self.snapshot();
        self.tracker.on_npc_spawned(&obs, &world);
    }

    /// An NPC leaves view.
    pub fn despawn_npc(&mut self, id: EntityId) {
        self.npcs.remove(&id);
        self.tracker.on_npc_despawned(id);
    }

    /// A friendly comes into view.
    pub fn spawn_friendly(&mut self, obs: FriendlyObservation) {
        self.friendlies.insert(obs.id, obs.clone());
        self.tracker.on_friendly_spawned(&obs);
    }

    /// A friendly leaves view.
    pub fn despawn_friendly(&mut self, id: EntityId) {
        self.friendlies.remove(&id);
        self.tracker.on_friendly_despawned(id);
    }

    /// Mutable access to a live NPC observation.
    pub fn npc_mut(&mut self, id: u64) -> &mut NpcObservation {
        self.npcs
            .get_mut(&EntityId::new(id))
            .expect("npc in scene")
    }

    /// Mutable access to a live friendly observation.
    pub fn friendly_mut(&mut self, id: EntityId) -> &mut FriendlyObservation {
        self.friendlies.get_mut(&id).expect("friendly in scene")
    }

    /// Set an NPC's animation for the next tick.
    pub fn animate(&mut self, id: u64, animation: Option<u32>) {
        self.npc_mut(id).animation = animation;
    }

    /// Deliver a damage splat.
    pub fn damage(&mut self, actor: ActorRef, kind: DamageKind) {
        self.tracker.on_damage(DamageEvent { actor, kind });
    }

    /// Deliver the first report of a projectile launched now.
    pub fn projectile(&mut self, projectile_id: u32, source: Tile, landing: Tile) {
        let cycle = self.tick * CYCLES_PER_TICK;
        self.tracker.on_projectile(&ProjectileEvent {
            projectile_id,
            source,
            landing,
            start_cycle: cycle + 20,
            observed_cycle: cycle + 1,
        });
    }

    /// Advance one tick and run the pipeline.
    pub fn step(&mut self) {
        self.tick += 1;
        let world = self.snapshot();
        self.tracker.tick(&world, &self.map);
    }

    /// Advance `n` ticks.
    pub fn step_n(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Current prediction for a boss.
    pub fn prediction(&self, id: u64) -> BossPrediction {
        self.tracker
            .prediction(EntityId::new(id))
            .expect("boss is tracked")
    }
}
