//! Per-friendly memory.

use tilegrid::WorldArea;

use super::EntityId;
use crate::style::{AttackStyle, ProtectionIcon};
use crate::world_view::{DamageKind, FriendlyObservation};

/// What the tracker remembers about one friendly entity.
///
/// `last_area` lags the live position by one tick: it is written during the
/// player-refresh step at the end of each tick, so during boss processing it
/// holds where the player stood when the boss decided what to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerMemory {
    id: EntityId,
    /// Area at the end of the previous tick (`None` until the first refresh)
    pub last_area: Option<WorldArea>,
    /// Damage received since the last refresh
    pub recent_damage: Vec<DamageKind>,
    /// Current protection icon
    pub protection: Option<ProtectionIcon>,
}

impl PlayerMemory {
    /// Fresh memory for a friendly that has just come into view.
    #[must_use]
    pub fn new(id: EntityId, protection: Option<ProtectionIcon>) -> Self {
        Self {
            id,
            last_area: None,
            recent_damage: Vec::new(),
            protection,
        }
    }

    /// Memory created from an observation.
    #[must_use]
    pub fn from_observation(obs: &FriendlyObservation) -> Self {
        Self::new(obs.id, obs.protection)
    }

    /// The friendly's identity.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// The style this player's icon protects against, if any.
    #[must_use]
    pub fn protected_style(&self) -> Option<AttackStyle> {
        self.protection.and_then(ProtectionIcon::protected_style)
    }

    /// Whether any damage this window was blocked.
    #[must_use]
    pub fn blocked_any(&self) -> bool {
        self.recent_damage.contains(&DamageKind::Blocked)
    }

    /// End-of-tick refresh: remember `area` and forget this tick's damage.
    pub fn refresh(&mut self, area: WorldArea) {
        self.last_area = Some(area);
        self.recent_damage.clear();
    }
}
