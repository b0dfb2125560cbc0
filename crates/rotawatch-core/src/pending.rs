//! Deferred defense judgements.
//!
//! When a boss attacks a target whose protection icon does not match the
//! style, the attack may still have been a zero. Whether it was is only
//! known once the projectile lands and the damage splat appears, so the
//! judgement is scheduled for the landing tick.
//!
//! The queue is keyed by resolution tick. Entries due on the same tick are
//! kept in insertion order, so resolution order never depends on hashing.

use std::collections::BTreeMap;

use crate::entity::{EntityId, PlayerMemory};
use crate::style::AttackStyle;

/// An attack awaiting its damage splat.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PendingAttack {
    /// Boss that attacked
    pub attacker: EntityId,
    /// Registry sequence number of the attacking record
    ///
    /// A boss that despawns and respawns under the same id gets a new
    /// record; this tells the two apart.
    pub attacker_seq: u64,
    /// Classified style
    pub style: AttackStyle,
    /// Friendly that was targeted
    pub target: EntityId,
    /// Tick the outcome becomes visible
    pub resolution_tick: u64,
}

/// Outcome of judging a pending attack.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Judgement {
    /// The defense held (or could not be disproven)
    Correct,
    /// The target took real damage
    Incorrect,
}

impl Judgement {
    /// Judge a landed attack from the target's damage this window.
    ///
    /// A target out of memory, a window without any splat, or any blocked
    /// splat all count as a correct defense.
    #[must_use]
    pub fn from_target(target: Option<&PlayerMemory>) -> Self {
        match target {
            Some(mp) if !mp.recent_damage.is_empty() && !mp.blocked_any() => Self::Incorrect,
            _ => Self::Correct,
        }
    }
}

/// Scheduled-event queue of pending attacks.
///
/// # Example
///
/// ```
/// use rotawatch_core::entity::EntityId;
/// use rotawatch_core::pending::{PendingAttack, PendingOutcomeQueue};
/// use rotawatch_core::style::AttackStyle;
///
/// let mut queue = PendingOutcomeQueue::new();
/// queue.schedule(PendingAttack {
///     attacker: EntityId::new(1),
///     attacker_seq: 0,
///     style: AttackStyle::Magic,
///     target: EntityId::new(2),
///     resolution_tick: 13,
/// });
///
/// assert!(queue.drain_due(12).is_empty());
/// assert_eq!(queue.drain_due(13).len(), 1);
/// assert!(queue.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingOutcomeQueue {
    by_tick: BTreeMap<u64, Vec<PendingAttack>>,
}

impl PendingOutcomeQueue {
    /// Empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attack to be judged at its resolution tick.
    pub fn schedule(&mut self, attack: PendingAttack) {
        self.by_tick
            .entry(attack.resolution_tick)
            .or_default()
            .push(attack);
    }

    /// Remove and return every attack due at or before `tick`.
    ///
    /// Attacks come out in resolution-tick order, then insertion order.
    /// Each attack is returned exactly once.
    pub fn drain_due(&mut self, tick: u64) -> Vec<PendingAttack> {
        let later = match tick.checked_add(1) {
            Some(next) => self.by_tick.split_off(&next),
            None => BTreeMap::new(),
        };
        let due = std::mem::replace(&mut self.by_tick, later);
        due.into_values().flatten().collect()
    }

    /// Drop every pending attack.
    pub fn clear(&mut self) {
        self.by_tick.clear();
    }

    /// Number of pending attacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_tick.values().map(Vec::len).sum()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_tick.is_empty()
    }

    /// Pending attacks in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = &PendingAttack> {
        self.by_tick.values().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attack(attacker: u64, tick: u64) -> PendingAttack {
        PendingAttack {
            attacker: EntityId::new(attacker),
            attacker_seq: 0,
            style: AttackStyle::Ranged,
            target: EntityId::new(100),
            resolution_tick: tick,
        }
    }

    #[test]
    fn test_judgement_rules() {
        use crate::world_view::DamageKind;

        assert_eq!(Judgement::from_target(None), Judgement::Correct);

        let mut mp = PlayerMemory::new(EntityId::new(100), None);
        assert_eq!(Judgement::from_target(Some(&mp)), Judgement::Correct);

        mp.recent_damage.push(DamageKind::Normal);
        assert_eq!(Judgement::from_target(Some(&mp)), Judgement::Incorrect);

        mp.recent_damage.push(DamageKind::Blocked);
        assert_eq!(Judgement::from_target(Some(&mp)), Judgement::Correct);
    }

    #[test]
    fn test_drain_includes_overdue() {
        let mut queue = PendingOutcomeQueue::new();
        queue.schedule(attack(1, 3));
        queue.schedule(attack(2, 5));
        queue.schedule(attack(3, 9));

        let due = queue.drain_due(6);
        assert_eq!(due.len(), 2);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_same_tick_keeps_insertion_order() {
        let mut queue = PendingOutcomeQueue::new();
        queue.schedule(attack(9, 4));
        queue.schedule(attack(1, 4));
        queue.schedule(attack(5, 2));

        let order: Vec<u64> = queue
            .drain_due(4)
            .iter()
            .map(|a| a.attacker.as_u64())
            .collect();
        assert_eq!(order, vec![5, 9, 1]);
    }

    #[test]
    fn test_drain_at_max_tick_takes_everything() {
        let mut queue = PendingOutcomeQueue::new();
        queue.schedule(attack(1, u64::MAX));
        queue.schedule(attack(2, 0));
        assert_eq!(queue.drain_due(u64::MAX).len(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_drained_attacks_do_not_return() {
        let mut queue = PendingOutcomeQueue::new();
        queue.schedule(attack(1, 2));
        assert_eq!(queue.drain_due(2).len(), 1);
        assert!(queue.drain_due(3).is_empty());
    }
}
