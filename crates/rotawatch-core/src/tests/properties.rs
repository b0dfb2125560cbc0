//! Property tests for rotation invariants.
//!
//! Arbitrary input sequences are fed to a single gorilla; after every tick
//! the candidate set must be non-empty, the countdown must stay within the
//! cadence, and the candidate set may only shrink, restart on one observed
//! style, or reset to the regular styles minus at most one.

use proptest::prelude::*;

use crate::entity::{ActorRef, EntityId};
use crate::style::{ProtectionIcon, StyleSet};
use crate::world_view::DamageKind;

use super::helpers::{friendly_at, gorilla_at, gorilla_config, Encounter, PLAYER};

#[derive(Debug, Clone)]
enum Op {
    Animate(Option<u32>),
    MoveBoss(i32, i32),
    MovePlayer(i32, i32),
    Icon(Option<ProtectionIcon>),
    BossIcon(Option<ProtectionIcon>),
    Hit(bool),
    HitBoss,
    Wait,
}

fn icon() -> impl Strategy<Value = Option<ProtectionIcon>> {
    prop_oneof![
        Just(None),
        Just(Some(ProtectionIcon::Magic)),
        Just(Some(ProtectionIcon::Ranged)),
        Just(Some(ProtectionIcon::Melee)),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => prop_oneof![
            Just(None),
            Just(Some(7225u32)),
            Just(Some(7226u32)),
            Just(Some(7227u32)),
        ]
        .prop_map(Op::Animate),
        2 => (-1i32..=1, -1i32..=1).prop_map(|(dx, dy)| Op::MoveBoss(dx, dy)),
        1 => (-1i32..=1, -1i32..=1).prop_map(|(dx, dy)| Op::MovePlayer(dx, dy)),
        1 => icon().prop_map(Op::Icon),
        1 => icon().prop_map(Op::BossIcon),
        1 => any::<bool>().prop_map(Op::Hit),
        1 => Just(Op::HitBoss),
        2 => Just(Op::Wait),
    ]
}

fn apply(enc: &mut Encounter, op: &Op) {
    match op {
        Op::Animate(animation) => enc.animate(1, *animation),
        Op::MoveBoss(dx, dy) => {
            let boss = enc.npc_mut(1);
            boss.area = boss.area.translated(*dx, *dy);
        }
        Op::MovePlayer(dx, dy) => {
            let player = enc.friendly_mut(PLAYER);
            player.area = player.area.translated(*dx, *dy);
        }
        Op::Icon(icon) => enc.friendly_mut(PLAYER).protection = *icon,
        Op::BossIcon(icon) => enc.npc_mut(1).protection = *icon,
        Op::Hit(blocked) => {
            let kind = if *blocked {
                DamageKind::Blocked
            } else {
                DamageKind::Normal
            };
            enc.damage(ActorRef::Player(PLAYER), kind);
        }
        Op::HitBoss => enc.damage(ActorRef::Npc(EntityId::new(1)), DamageKind::Normal),
        Op::Wait => {}
    }
}

/// Whether `next` is a legal successor of `prev` for a boss rotating over
/// `regular`.
fn legal_transition(prev: StyleSet, next: StyleSet, regular: StyleSet) -> bool {
    let shrunk = prev.contains(next);
    let restarted = next.len() == 1 && regular.contains(next);
    let reset = regular.contains(next) && (regular - next).len() <= 1;
    shrunk || restarted || reset
}

proptest! {
    #[test]
    fn prop_rotation_invariants(ops in proptest::collection::vec(op(), 1..120)) {
        const CADENCE: u32 = 3;
        let mut enc = Encounter::new(gorilla_config(CADENCE));
        enc.spawn_friendly(friendly_at(PLAYER, 13, 10, None));
        enc.spawn_npc(gorilla_at(1, 10, 10));

        let regular = StyleSet::all();
        let mut prev = enc.prediction(1).candidate_styles;

        for op in &ops {
            apply(&mut enc, op);
            enc.step();

            let prediction = enc.prediction(1);
            prop_assert!(!prediction.candidate_styles.is_empty());
            prop_assert!(prediction.attacks_remaining >= 1);
            prop_assert!(prediction.attacks_remaining <= CADENCE);
            prop_assert!(
                legal_transition(prev, prediction.candidate_styles, regular),
                "{:?} -> {:?}", prev, prediction.candidate_styles
            );
            prev = prediction.candidate_styles;
        }
    }

    #[test]
    fn prop_pending_never_outlives_due_tick(ops in proptest::collection::vec(op(), 1..80)) {
        let mut enc = Encounter::new(gorilla_config(3));
        enc.spawn_friendly(friendly_at(PLAYER, 16, 10, Some(ProtectionIcon::Ranged)));
        enc.spawn_npc(gorilla_at(1, 10, 10));

        for op in &ops {
            apply(&mut enc, op);
            enc.step();
            let tick = enc.tick;
            prop_assert!(enc.tracker.pending().iter().all(|a| a.resolution_tick > tick));
        }
    }
}
