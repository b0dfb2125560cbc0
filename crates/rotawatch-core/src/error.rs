//! Configuration errors.
//!
//! The tick pipeline itself never fails: every missing-data case falls back
//! to "assume the defense was correct" or "leave the prediction alone". The
//! only fallible surface is loading and validating a [`TrackerConfig`].
//!
//! [`TrackerConfig`]: crate::config::TrackerConfig

use thiserror::Error;

/// Why a tracker configuration was rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No archetypes at all
    #[error("configuration contains no archetypes")]
    Empty,

    /// An archetype has no regular styles
    #[error("archetype `{archetype}` has no regular attack styles")]
    NoStyles {
        /// Archetype name
        archetype: String,
    },

    /// An archetype's switch cadence is zero
    #[error("archetype `{archetype}` has zero attacks per switch")]
    ZeroCadence {
        /// Archetype name
        archetype: String,
    },

    /// A projectile travel speed is zero
    #[error("archetype `{archetype}` has zero {style} projectile speed")]
    ZeroSpeed {
        /// Archetype name
        archetype: String,
        /// Style whose travel is broken
        style: &'static str,
    },

    /// Two archetypes claim the same NPC id
    #[error("npc id {npc_id} is claimed by both `{first}` and `{second}`")]
    DuplicateNpcId {
        /// The contested NPC id
        npc_id: u32,
        /// Archetype that claimed it first
        first: String,
        /// Archetype that claimed it again
        second: String,
    },

    /// The JSON could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for configuration results.
pub type Result<T> = std::result::Result<T, ConfigError>;
