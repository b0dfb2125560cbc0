//! State hashing for determinism checks.
//!
//! Two trackers fed the same inputs must end in the same state. Comparing a
//! digest after every tick pins down the first tick where runs diverge.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::tracker::RotationTracker;

/// Digest of every piece of predictive state in `tracker`.
///
/// Covers the tick counter, each boss's rotation state and shadow fields,
/// each player's memory, and the pending queue. Archetype rules are not
/// hashed; they are configuration.
///
/// # Example
///
/// ```
/// use rotawatch_core::config::TrackerConfig;
/// use rotawatch_core::hash::hash_tracker;
/// use rotawatch_core::tracker::RotationTracker;
///
/// let a = RotationTracker::new(TrackerConfig::default()).unwrap();
/// let b = RotationTracker::new(TrackerConfig::default()).unwrap();
/// assert_eq!(hash_tracker(&a), hash_tracker(&b));
/// ```
#[must_use]
pub fn hash_tracker(tracker: &RotationTracker) -> u64 {
    let mut hasher = DefaultHasher::new();
    tracker.current_tick().hash(&mut hasher);

    let registry = tracker.registry();
    registry.boss_count().hash(&mut hasher);
    for boss in registry.bosses() {
        boss.id().hash(&mut hasher);
        boss.seq().hash(&mut hasher);
        boss.candidate_styles.bits().hash(&mut hasher);
        boss.attacks_remaining.hash(&mut hasher);
        boss.combat_initiated.hash(&mut hasher);
        boss.next_attack_tick.hash(&mut hasher);
        boss.melee_movement_lock_ticks.hash(&mut hasher);
        boss.style_changed_last_tick.hash(&mut hasher);
        boss.last_area.hash(&mut hasher);
        boss.last_animation.hash(&mut hasher);
        boss.last_interacting.hash(&mut hasher);
        boss.last_protection.hash(&mut hasher);
    }

    for mp in registry.players() {
        mp.id().hash(&mut hasher);
        mp.last_area.hash(&mut hasher);
        mp.protection.hash(&mut hasher);
        mp.recent_damage.hash(&mut hasher);
    }

    let pending = tracker.pending();
    pending.len().hash(&mut hasher);
    for attack in pending.iter() {
        attack.hash(&mut hasher);
    }

    hasher.finish()
}
