//! Per-boss prediction steps.
//!
//! Each tick a boss goes through three steps, all of them pure functions of
//! the boss record and read-only context:
//!
//! 1. [`classify`]: did the boss start an attack, and with which style?
//! 2. [`apply_attack`]: fold the attack into the rotation state, deferring
//!    the defense judgement when the target's icon did not match.
//! 3. [`infer_intent`]: when melee is still in doubt, read the boss's
//!    movement for evidence of a melee swing.
//!
//! The [`RotationTracker`](crate::tracker::RotationTracker) sequences these
//! steps and owns the state they operate on.

pub mod classifier;
pub mod melee;
pub mod rotation;

pub use classifier::classify;
pub use melee::{apply_intent, infer_intent, is_eligible, MeleeIntent};
pub use rotation::{apply_attack, check_style_switch, record_confirmed_defense};
