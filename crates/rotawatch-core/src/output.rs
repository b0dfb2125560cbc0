//! Read-only predictions for the display layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::{BossState, EntityId};
use crate::style::{AttackStyle, StyleSet};

/// What the tracker currently believes about one boss.
///
/// # Example
///
/// ```
/// use rotawatch_core::entity::EntityId;
/// use rotawatch_core::output::BossPrediction;
/// use rotawatch_core::style::{AttackStyle, StyleSet};
///
/// let prediction = BossPrediction {
///     id: EntityId::new(3),
///     candidate_styles: StyleSet::RANGED,
///     attacks_remaining: 2,
///     combat_initiated: true,
/// };
/// assert_eq!(prediction.certain_style(), Some(AttackStyle::Ranged));
/// assert_eq!(prediction.to_string(), "3: RANGED (2 left)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossPrediction {
    /// Boss handle
    pub id: EntityId,
    /// Styles still possible for the next attack
    pub candidate_styles: StyleSet,
    /// Confirmed-correct defenses left before a forced switch
    pub attacks_remaining: u32,
    /// Whether the boss is engaged
    pub combat_initiated: bool,
}

impl BossPrediction {
    /// The next style, if only one remains.
    #[must_use]
    pub fn certain_style(&self) -> Option<AttackStyle> {
        self.candidate_styles.single()
    }
}

impl From<&BossState> for BossPrediction {
    fn from(boss: &BossState) -> Self {
        Self {
            id: boss.id(),
            candidate_styles: boss.candidate_styles,
            attacks_remaining: boss.attacks_remaining,
            combat_initiated: boss.combat_initiated,
        }
    }
}

impl fmt::Display for BossPrediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self
            .candidate_styles
            .iter_names()
            .map(|(name, _)| name)
            .collect();
        write!(
            f,
            "{}: {} ({} left)",
            self.id,
            names.join(" | "),
            self.attacks_remaining
        )
    }
}
