//! Per-archetype encounter rules.
//!
//! Several bosses share the same rotation shape (fixed cadence, style
//! switch, projectile travel) and differ only in numbers and identifiers.
//! An [`Archetype`] carries those numbers so one predictor serves them all.

use serde::{Deserialize, Serialize};

use crate::style::{AttackStyle, StyleSet};

/// Animation and projectile identifiers that reveal one attack style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Animation ids played when the style is used
    #[serde(default)]
    pub animations: Vec<u32>,
    /// Projectile ids launched when the style is used
    #[serde(default)]
    pub projectiles: Vec<u32>,
}

impl Signature {
    /// Signature matching the given ids.
    #[must_use]
    pub fn new(animations: &[u32], projectiles: &[u32]) -> Self {
        Self {
            animations: animations.to_vec(),
            projectiles: projectiles.to_vec(),
        }
    }

    /// Whether either the animation or the projectile belongs to this style.
    #[must_use]
    pub fn matches(&self, animation: Option<u32>, projectile: Option<u32>) -> bool {
        animation.is_some_and(|a| self.animations.contains(&a))
            || projectile.is_some_and(|p| self.projectiles.contains(&p))
    }
}

/// How a fractional travel time is turned into whole ticks.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TravelRounding {
    /// Truncate toward zero
    Floor,
    /// Round up to the next whole tick
    #[default]
    Ceil,
}

/// Projectile travel parameters for one style.
///
/// Travel takes `(distance + delay) / speed` ticks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TravelTime {
    /// Extra distance-equivalent added before dividing
    pub delay: u32,
    /// Tiles covered per tick (> 0)
    pub speed: u32,
}

impl TravelTime {
    /// Ticks for a projectile to cover `distance` tiles.
    ///
    /// # Example
    ///
    /// ```
    /// use rotawatch_core::archetype::{TravelRounding, TravelTime};
    ///
    /// let magic = TravelTime { delay: 12, speed: 8 };
    /// assert_eq!(magic.ticks(5, TravelRounding::Floor), 2);
    /// assert_eq!(magic.ticks(5, TravelRounding::Ceil), 3);
    /// assert_eq!(magic.ticks(4, TravelRounding::Ceil), 2);
    /// ```
    #[must_use]
    pub fn ticks(&self, distance: u32, rounding: TravelRounding) -> u64 {
        let total = u64::from(distance) + u64::from(self.delay);
        let speed = u64::from(self.speed.max(1));
        match rounding {
            TravelRounding::Floor => total / speed,
            TravelRounding::Ceil => total.div_ceil(speed),
        }
    }
}

/// Rules for one boss archetype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archetype {
    /// Human-readable name, used in logs
    pub name: String,
    /// NPC type ids (every phase form) that belong to this archetype
    pub npc_ids: Vec<u32>,
    /// Styles the boss rotates between
    pub regular_styles: StyleSet,
    /// Confirmed-correct defenses before a forced style switch
    pub attacks_per_switch: u32,
    /// Ticks between consecutive attacks
    pub attack_period: u64,
    /// Furthest distance (tiles) from which the boss can attack
    pub max_attack_range: u32,
    /// Magic signature
    #[serde(default)]
    pub magic: Signature,
    /// Ranged signature
    #[serde(default)]
    pub ranged: Signature,
    /// Melee signature (animation only in practice)
    #[serde(default)]
    pub melee: Signature,
    /// Projectile ids that mark a transient ground hazard where they land
    #[serde(default)]
    pub hazard_projectiles: Vec<u32>,
    /// Magic projectile travel, if magic attacks are delayed
    #[serde(default)]
    pub magic_travel: Option<TravelTime>,
    /// Ranged projectile travel, if ranged attacks are delayed
    #[serde(default)]
    pub ranged_travel: Option<TravelTime>,
    /// Rounding for travel times
    #[serde(default)]
    pub rounding: TravelRounding,
}

impl Archetype {
    /// The Alchemical Hydra: ranged and magic, three attacks per switch.
    #[must_use]
    pub fn alchemical_hydra() -> Self {
        Self {
            name: "Alchemical Hydra".to_string(),
            // Green, blue, red and black forms plus the three transitions
            npc_ids: vec![8615, 8616, 8617, 8618, 8619, 8620, 8621],
            regular_styles: StyleSet::RANGED | StyleSet::MAGIC,
            attacks_per_switch: 3,
            attack_period: 6,
            max_attack_range: 10,
            magic: Signature::new(&[8236, 8243, 8250, 8255], &[1662]),
            ranged: Signature::new(&[8235, 8242, 8249, 8256], &[1663]),
            melee: Signature::default(),
            hazard_projectiles: Vec::new(),
            magic_travel: Some(TravelTime {
                delay: 12,
                speed: 8,
            }),
            ranged_travel: Some(TravelTime { delay: 9, speed: 6 }),
            rounding: TravelRounding::default(),
        }
    }

    /// Demonic gorillas: all three styles, boulders as ground hazards.
    #[must_use]
    pub fn demonic_gorilla() -> Self {
        Self {
            name: "Demonic gorilla".to_string(),
            npc_ids: vec![7144, 7145, 7146, 7147, 7148, 7149],
            regular_styles: StyleSet::all(),
            attacks_per_switch: 3,
            attack_period: 5,
            max_attack_range: 10,
            magic: Signature::new(&[7225], &[1304]),
            ranged: Signature::new(&[7227], &[1302]),
            melee: Signature::new(&[7226], &[]),
            hazard_projectiles: vec![856],
            magic_travel: Some(TravelTime {
                delay: 12,
                speed: 8,
            }),
            ranged_travel: Some(TravelTime { delay: 9, speed: 6 }),
            rounding: TravelRounding::default(),
        }
    }

    /// Whether an NPC type id belongs to this archetype.
    #[must_use]
    pub fn tracks_npc(&self, npc_id: u32) -> bool {
        self.npc_ids.contains(&npc_id)
    }

    /// Travel parameters for a style; `None` means the outcome is immediate.
    #[must_use]
    pub fn travel(&self, style: AttackStyle) -> Option<TravelTime> {
        match style {
            AttackStyle::Magic => self.magic_travel,
            AttackStyle::Ranged => self.ranged_travel,
            AttackStyle::Melee => None,
        }
    }

    /// Ticks until an attack of `style` lands `distance` tiles away.
    #[must_use]
    pub fn travel_ticks(&self, style: AttackStyle, distance: u32) -> u64 {
        self.travel(style)
            .map_or(0, |travel| travel.ticks(distance, self.rounding))
    }

    /// Whether `projectile_id` reveals an attack style of this archetype.
    #[must_use]
    pub fn is_style_projectile(&self, projectile_id: u32) -> bool {
        self.magic.projectiles.contains(&projectile_id)
            || self.ranged.projectiles.contains(&projectile_id)
            || self.melee.projectiles.contains(&projectile_id)
    }

    /// Whether `projectile_id` marks a ground hazard for this archetype.
    #[must_use]
    pub fn is_hazard_projectile(&self, projectile_id: u32) -> bool {
        self.hazard_projectiles.contains(&projectile_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_matches_either_channel() {
        let sig = Signature::new(&[10], &[20]);
        assert!(sig.matches(Some(10), None));
        assert!(sig.matches(None, Some(20)));
        assert!(sig.matches(Some(1), Some(20)));
        assert!(!sig.matches(Some(20), Some(10)));
        assert!(!sig.matches(None, None));
    }

    #[test]
    fn travel_ticks_rounding() {
        let ranged = TravelTime { delay: 9, speed: 6 };
        assert_eq!(ranged.ticks(3, TravelRounding::Floor), 2);
        assert_eq!(ranged.ticks(3, TravelRounding::Ceil), 2);
        assert_eq!(ranged.ticks(4, TravelRounding::Floor), 2);
        assert_eq!(ranged.ticks(4, TravelRounding::Ceil), 3);
    }

    #[test]
    fn melee_has_no_travel() {
        let hydra = Archetype::alchemical_hydra();
        assert_eq!(hydra.travel(AttackStyle::Melee), None);
        assert_eq!(hydra.travel_ticks(AttackStyle::Melee, 7), 0);
    }

    #[test]
    fn presets_track_their_npcs() {
        let hydra = Archetype::alchemical_hydra();
        let gorilla = Archetype::demonic_gorilla();
        assert!(hydra.tracks_npc(8619));
        assert!(!hydra.tracks_npc(7144));
        assert!(gorilla.tracks_npc(7144));
        assert!(gorilla.is_hazard_projectile(856));
        assert!(gorilla.is_style_projectile(1304));
        assert!(!hydra.is_style_projectile(1304));
    }

    #[test]
    fn archetype_deserializes_with_defaults() {
        let json = r#"{
            "name": "Training dummy",
            "npc_ids": [1],
            "regular_styles": "MAGIC | RANGED",
            "attacks_per_switch": 4,
            "attack_period": 4,
            "max_attack_range": 8
        }"#;
        let archetype: Archetype = serde_json::from_str(json).unwrap();
        assert_eq!(archetype.regular_styles, StyleSet::MAGIC | StyleSet::RANGED);
        assert!(archetype.magic.animations.is_empty());
        assert_eq!(archetype.rounding, TravelRounding::Ceil);
        assert_eq!(archetype.magic_travel, None);
    }
}
