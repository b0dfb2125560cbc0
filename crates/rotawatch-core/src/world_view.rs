//! Read-only observations delivered by the game client.
//!
//! A [`WorldSnapshot`] is everything the tracker may look at during one
//! tick: where each NPC and friendly stands, what it is animating, who it is
//! interacting with and which protection icon it shows. Events that arrive
//! between ticks ([`DamageEvent`], [`ProjectileEvent`], [`ConnectionState`]
//! changes) are fed to the tracker separately.
//!
//! # Example
//!
//! ```
//! use rotawatch_core::entity::EntityId;
//! use rotawatch_core::world_view::{FriendlyObservation, WorldSnapshot};
//! use tilegrid::WorldArea;
//!
//! let snapshot = WorldSnapshot::new(10, 300).with_friendly(FriendlyObservation {
//!     id: EntityId::new(1),
//!     area: WorldArea::new(5, 5, 1, 1, 0),
//!     protection: None,
//! });
//!
//! assert!(snapshot.friendly(EntityId::new(1)).is_some());
//! assert!(snapshot.npc(EntityId::new(1)).is_none());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tilegrid::{Tile, WorldArea};

use crate::entity::{ActorRef, EntityId};
use crate::style::ProtectionIcon;

// =============================================================================
// Observations
// =============================================================================

/// One NPC as seen this tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcObservation {
    /// Entity handle
    pub id: EntityId,
    /// NPC type id (changes across boss phases)
    pub npc_id: u32,
    /// Occupied area
    pub area: WorldArea,
    /// Current animation, `None` when idle
    pub animation: Option<u32>,
    /// Friendly the NPC is interacting with
    pub interacting: Option<EntityId>,
    /// Overhead protection icon
    pub protection: Option<ProtectionIcon>,
}

/// One friendly entity as seen this tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendlyObservation {
    /// Entity handle
    pub id: EntityId,
    /// Occupied area
    pub area: WorldArea,
    /// Overhead protection icon
    pub protection: Option<ProtectionIcon>,
}

/// Everything observable on one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Server tick counter
    pub tick: u64,
    /// Client game cycle (sub-tick clock used by projectiles)
    pub game_cycle: u64,
    /// Visible NPCs keyed by handle
    pub npcs: BTreeMap<EntityId, NpcObservation>,
    /// Visible friendlies keyed by handle
    pub friendlies: BTreeMap<EntityId, FriendlyObservation>,
}

impl WorldSnapshot {
    /// Empty snapshot for `tick`.
    #[must_use]
    pub fn new(tick: u64, game_cycle: u64) -> Self {
        Self {
            tick,
            game_cycle,
            npcs: BTreeMap::new(),
            friendlies: BTreeMap::new(),
        }
    }

    /// Builder: add an NPC.
    #[must_use]
    pub fn with_npc(mut self, npc: NpcObservation) -> Self {
        self.npcs.insert(npc.id, npc);
        self
    }

    /// Builder: add a friendly.
    #[must_use]
    pub fn with_friendly(mut self, friendly: FriendlyObservation) -> Self {
        self.friendlies.insert(friendly.id, friendly);
        self
    }

    /// Look up an NPC.
    #[must_use]
    pub fn npc(&self, id: EntityId) -> Option<&NpcObservation> {
        self.npcs.get(&id)
    }

    /// Look up a friendly.
    #[must_use]
    pub fn friendly(&self, id: EntityId) -> Option<&FriendlyObservation> {
        self.friendlies.get(&id)
    }
}

// =============================================================================
// Events
// =============================================================================

/// Kind of a damage splat.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageKind {
    /// Damage was dealt
    Normal,
    /// The hit was blocked (a zero)
    Blocked,
}

/// A damage splat applied to an actor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageEvent {
    /// Who was hit
    pub actor: ActorRef,
    /// Splat kind
    pub kind: DamageKind,
}

/// A projectile position update.
///
/// The client reports every projectile repeatedly while it exists; only the
/// report made before the projectile starts moving is a first sighting.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectileEvent {
    /// Projectile type id
    pub projectile_id: u32,
    /// Tile the projectile was launched from
    pub source: Tile,
    /// Tile the projectile will land on
    pub landing: Tile,
    /// Game cycle the projectile starts moving
    pub start_cycle: u64,
    /// Game cycle this report was made
    pub observed_cycle: u64,
}

impl ProjectileEvent {
    /// Whether this is the first report for the projectile instance.
    #[must_use]
    pub const fn is_first_observation(&self) -> bool {
        self.observed_cycle < self.start_cycle
    }
}

/// Client connection state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionState {
    /// In game
    LoggedIn,
    /// Login in progress
    LoggingIn,
    /// Connection dropped
    ConnectionLost,
    /// Transferring to another world
    Hopping,
    /// At the login screen
    LoginScreen,
}

impl ConnectionState {
    /// Whether entering this state invalidates every tracked record.
    #[must_use]
    pub const fn is_discontinuity(self) -> bool {
        matches!(
            self,
            Self::LoggingIn | Self::ConnectionLost | Self::Hopping
        )
    }
}
