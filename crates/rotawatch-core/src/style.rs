//! Attack styles, style sets and protection icons.
//!
//! A boss attacks with one of a small number of [`AttackStyle`]s. The
//! predictor's belief about the next attack is a [`StyleSet`]: a bit set of
//! the styles still considered possible. Friendly entities defend with a
//! [`ProtectionIcon`], which maps onto at most one protected style.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// A discrete attack style.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AttackStyle {
    /// Close-range physical attack
    Melee,
    /// Projectile attack
    Ranged,
    /// Spell attack
    Magic,
}

impl AttackStyle {
    /// Every style, in bit order.
    pub const ALL: [Self; 3] = [Self::Melee, Self::Ranged, Self::Magic];

    /// The single-member set holding this style.
    #[must_use]
    pub const fn flag(self) -> StyleSet {
        match self {
            Self::Melee => StyleSet::MELEE,
            Self::Ranged => StyleSet::RANGED,
            Self::Magic => StyleSet::MAGIC,
        }
    }
}

impl fmt::Display for AttackStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Melee => write!(f, "Melee"),
            Self::Ranged => write!(f, "Ranged"),
            Self::Magic => write!(f, "Magic"),
        }
    }
}

bitflags! {
    /// Set of attack styles.
    ///
    /// Used both for an archetype's regular styles and for a boss's
    /// candidate styles.
    ///
    /// # Example
    ///
    /// ```
    /// use rotawatch_core::style::{AttackStyle, StyleSet};
    ///
    /// let candidates = StyleSet::all() - StyleSet::MELEE;
    /// assert!(candidates.contains_style(AttackStyle::Magic));
    /// assert!(!candidates.contains_style(AttackStyle::Melee));
    /// assert_eq!(candidates.len(), 2);
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct StyleSet: u8 {
        /// Melee is possible
        const MELEE = 1 << 0;
        /// Ranged is possible
        const RANGED = 1 << 1;
        /// Magic is possible
        const MAGIC = 1 << 2;
    }
}

impl StyleSet {
    /// Whether `style` is a member.
    #[must_use]
    pub const fn contains_style(self, style: AttackStyle) -> bool {
        self.contains(style.flag())
    }

    /// Number of member styles.
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits().count_ones() as usize
    }

    /// Member styles in bit order.
    pub fn styles(self) -> impl Iterator<Item = AttackStyle> {
        AttackStyle::ALL
            .into_iter()
            .filter(move |style| self.contains_style(*style))
    }

    /// The style, if this set holds exactly one.
    #[must_use]
    pub fn single(self) -> Option<AttackStyle> {
        if self.len() == 1 {
            self.styles().next()
        } else {
            None
        }
    }
}

impl From<AttackStyle> for StyleSet {
    fn from(style: AttackStyle) -> Self {
        style.flag()
    }
}

/// Overhead protection icon worn by an entity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtectionIcon {
    /// Protect from melee
    Melee,
    /// Protect from missiles
    Ranged,
    /// Protect from magic
    Magic,
    /// Retribution
    Retribution,
    /// Smite
    Smite,
    /// Redemption
    Redemption,
}

impl ProtectionIcon {
    /// The attack style this icon is counted as protecting against.
    ///
    /// Only the ranged and magic icons count; every other icon (melee
    /// included) yields `None`.
    #[must_use]
    pub const fn protected_style(self) -> Option<AttackStyle> {
        match self {
            Self::Ranged => Some(AttackStyle::Ranged),
            Self::Magic => Some(AttackStyle::Magic),
            _ => None,
        }
    }
}
