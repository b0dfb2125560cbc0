//! Attack classification from animation and projectile signals.

use crate::archetype::Archetype;
use crate::style::AttackStyle;

/// Classify the attack a boss made this tick, if any.
///
/// Fires only when the animation differs from last tick's; a held animation
/// is the same attack still playing. Magic wins over ranged, and ranged over
/// melee, because several forms share animations and the projectile settles
/// the question. Melee has no projectile and is recognised by animation
/// alone.
///
/// # Example
///
/// ```
/// use rotawatch_core::archetype::Archetype;
/// use rotawatch_core::predictor::classify;
/// use rotawatch_core::style::AttackStyle;
///
/// let gorilla = Archetype::demonic_gorilla();
/// assert_eq!(classify(&gorilla, Some(7226), None, None), Some(AttackStyle::Melee));
/// // Same animation as last tick: nothing new.
/// assert_eq!(classify(&gorilla, Some(7226), Some(7226), None), None);
/// ```
#[must_use]
pub fn classify(
    archetype: &Archetype,
    animation: Option<u32>,
    last_animation: Option<u32>,
    recent_projectile: Option<u32>,
) -> Option<AttackStyle> {
    if animation == last_animation {
        return None;
    }

    if archetype.magic.matches(animation, recent_projectile) {
        Some(AttackStyle::Magic)
    } else if archetype.ranged.matches(animation, recent_projectile) {
        Some(AttackStyle::Ranged)
    } else if archetype.melee.matches(animation, None) {
        Some(AttackStyle::Melee)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hydra_animations() {
        let hydra = Archetype::alchemical_hydra();
        assert_eq!(
            classify(&hydra, Some(8236), None, None),
            Some(AttackStyle::Magic)
        );
        assert_eq!(
            classify(&hydra, Some(8249), Some(8236), None),
            Some(AttackStyle::Ranged)
        );
        assert_eq!(classify(&hydra, Some(1), None, None), None);
    }

    #[test]
    fn test_projectile_reveals_style() {
        let gorilla = Archetype::demonic_gorilla();
        // An unrelated animation change with a magic projectile leaving the boss.
        assert_eq!(
            classify(&gorilla, Some(1), None, Some(1304)),
            Some(AttackStyle::Magic)
        );
        assert_eq!(
            classify(&gorilla, None, Some(1), Some(1302)),
            Some(AttackStyle::Ranged)
        );
    }

    #[test]
    fn test_magic_takes_precedence() {
        let gorilla = Archetype::demonic_gorilla();
        // Ranged animation but a magic projectile: magic wins.
        assert_eq!(
            classify(&gorilla, Some(7227), None, Some(1304)),
            Some(AttackStyle::Magic)
        );
        // Melee animation with a ranged projectile: ranged wins.
        assert_eq!(
            classify(&gorilla, Some(7226), None, Some(1302)),
            Some(AttackStyle::Ranged)
        );
    }

    #[test]
    fn test_unchanged_animation_never_fires() {
        let gorilla = Archetype::demonic_gorilla();
        assert_eq!(classify(&gorilla, Some(7225), Some(7225), Some(1304)), None);
        assert_eq!(classify(&gorilla, None, None, Some(1304)), None);
    }

    #[test]
    fn test_melee_ignores_projectiles() {
        let mut gorilla = Archetype::demonic_gorilla();
        gorilla.melee.projectiles.push(42);
        assert_eq!(classify(&gorilla, Some(1), None, Some(42)), None);
    }
}
