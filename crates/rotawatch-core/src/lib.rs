//! # Rotawatch Core
//!
//! Boss attack-rotation predictor for Rotawatch.
//!
//! Bosses that rotate between attack styles follow hidden rules: a fixed
//! number of correctly-defended attacks before a forced switch, and a switch
//! away from whatever the target is protecting against. This crate infers
//! that state tick by tick from what a game client can observe (animations,
//! projectiles, damage splats and movement) so a display layer can warn the
//! player which protection to use before the next attack lands.
//!
//! ## Architecture
//!
//! - **Registry**: owns boss and player records ([`registry`], [`entity`])
//! - **Predictor**: classification, rotation and melee-intent steps
//!   ([`predictor`])
//! - **Queues**: deferred defense judgements ([`pending`]) and transient
//!   hazard markers ([`occupancy`])
//! - **Tracker**: the tick pipeline that sequences them all ([`tracker`])
//!
//! Geometry (areas, pursuit steps, line of sight) lives in the `tilegrid`
//! crate.
//!
//! ## Usage
//!
//! ```
//! use rotawatch_core::config::TrackerConfig;
//! use rotawatch_core::tracker::RotationTracker;
//! use rotawatch_core::world_view::WorldSnapshot;
//! use tilegrid::{GridCollisionMap, SceneBounds};
//!
//! let mut tracker = RotationTracker::new(TrackerConfig::default())?;
//! let map = GridCollisionMap::new(SceneBounds::default());
//!
//! tracker.tick(&WorldSnapshot::new(1, 30), &map);
//! assert!(tracker.predictions().is_empty());
//! # Ok::<(), rotawatch_core::error::ConfigError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod archetype;
pub mod config;
pub mod entity;
pub mod error;
pub mod hash;
pub mod occupancy;
pub mod output;
pub mod pending;
pub mod predictor;
pub mod registry;
pub mod style;
pub mod tracker;
pub mod world_view;

pub use config::TrackerConfig;
pub use error::ConfigError;
pub use output::BossPrediction;
pub use style::{AttackStyle, ProtectionIcon, StyleSet};
pub use tracker::RotationTracker;

#[cfg(test)]
mod tests;
