//! Entity records owned by the encounter registry.
//!
//! This module provides the identity types and per-entity state:
//! - [`EntityId`]: Stable handle for an observed entity
//! - [`ActorRef`]: An identity tagged with the table it belongs to
//! - [`BossState`]: Rotation state for one tracked boss
//! - [`PlayerMemory`]: Last-known state of one tracked friendly
//!
//! Records never hold references to each other. Cross-record links (a
//! boss's target, a pending attack's attacker) are identities that are
//! resolved through the registry, so despawning an entity can never leave a
//! dangling reference behind.
//!
//! # Example
//!
//! ```
//! use rotawatch_core::entity::{ActorRef, EntityId};
//!
//! let boss = ActorRef::Npc(EntityId::new(42));
//! assert_eq!(boss.id().as_u64(), 42);
//! assert!(boss.is_npc());
//! ```

pub mod boss;
pub mod player;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use boss::BossState;
pub use player::PlayerMemory;

/// Unique identifier for an observed entity.
///
/// `EntityId` is a newtype wrapper around `u64`, typically the game client's
/// entity index. NPC and player indices live in separate spaces, so an id
/// is only meaningful together with the table it is looked up in.
///
/// # Ordering
///
/// Entity IDs are ordered by their numeric value. Bosses are updated in
/// ascending id order within a tick, and that order decides which bosses
/// have already moved when another boss's pursuit step is simulated.
///
/// # Example
///
/// ```
/// use rotawatch_core::entity::EntityId;
///
/// let id1 = EntityId::new(1);
/// let id2 = EntityId::new(2);
///
/// assert!(id1 < id2);
/// assert_eq!(id1.as_u64(), 1);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new `EntityId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// An entity identity qualified by kind.
///
/// Damage events can land on either NPCs or friendlies; the variant picks
/// the table the id refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActorRef {
    /// A non-player character (possibly a tracked boss)
    Npc(EntityId),
    /// A friendly player
    Player(EntityId),
}

impl ActorRef {
    /// The bare identity.
    #[must_use]
    pub const fn id(self) -> EntityId {
        match self {
            Self::Npc(id) | Self::Player(id) => id,
        }
    }

    /// Whether this refers to an NPC.
    #[must_use]
    pub const fn is_npc(self) -> bool {
        matches!(self, Self::Npc(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_round_trip_through_u64() {
        let id = EntityId::from(7);
        assert_eq!(u64::from(id), 7);
        assert_eq!(format!("{id}"), "7");
        assert_eq!(format!("{id:?}"), "EntityId(7)");
    }

    #[test]
    fn test_actor_ref_kinds() {
        let npc = ActorRef::Npc(EntityId::new(3));
        let player = ActorRef::Player(EntityId::new(3));
        assert_ne!(npc, player);
        assert_eq!(npc.id(), player.id());
        assert!(npc.is_npc());
        assert!(!player.is_npc());
    }
}
