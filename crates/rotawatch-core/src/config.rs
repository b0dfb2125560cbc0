//! Tracker configuration.
//!
//! A [`TrackerConfig`] is the list of boss archetypes to watch. The default
//! carries the built-in presets; custom rule sets can be loaded from JSON.
//!
//! # Example
//!
//! ```
//! use rotawatch_core::config::TrackerConfig;
//!
//! let config = TrackerConfig::default();
//! assert!(config.validate().is_ok());
//! assert!(config.archetype_for(8615).is_some());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::archetype::Archetype;
use crate::error::{ConfigError, Result};

/// Archetypes the tracker recognises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Archetype rules; NPC ids must not overlap between entries
    pub archetypes: Vec<Archetype>,
}

impl TrackerConfig {
    /// Configuration with the given archetypes.
    #[must_use]
    pub fn new(archetypes: Vec<Archetype>) -> Self {
        Self { archetypes }
    }

    /// Configuration tracking a single archetype.
    #[must_use]
    pub fn with_archetype(archetype: Archetype) -> Self {
        Self::new(vec![archetype])
    }

    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the text is not a valid
    /// configuration, or any error from [`TrackerConfig::validate`].
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the rules are usable.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: no archetypes, an archetype with no
    /// styles, zero cadence or zero projectile speed, or an NPC id claimed
    /// by two archetypes.
    pub fn validate(&self) -> Result<()> {
        if self.archetypes.is_empty() {
            return Err(ConfigError::Empty);
        }

        let mut owners: BTreeMap<u32, &str> = BTreeMap::new();
        for archetype in &self.archetypes {
            let name = || archetype.name.clone();

            if archetype.regular_styles.is_empty() {
                return Err(ConfigError::NoStyles { archetype: name() });
            }
            if archetype.attacks_per_switch == 0 {
                return Err(ConfigError::ZeroCadence { archetype: name() });
            }
            for (style, travel) in [
                ("magic", archetype.magic_travel),
                ("ranged", archetype.ranged_travel),
            ] {
                if travel.is_some_and(|t| t.speed == 0) {
                    return Err(ConfigError::ZeroSpeed {
                        archetype: name(),
                        style,
                    });
                }
            }
            for &npc_id in &archetype.npc_ids {
                if let Some(first) = owners.insert(npc_id, &archetype.name) {
                    return Err(ConfigError::DuplicateNpcId {
                        npc_id,
                        first: first.to_string(),
                        second: name(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The archetype an NPC type id belongs to.
    #[must_use]
    pub fn archetype_for(&self, npc_id: u32) -> Option<&Archetype> {
        self.archetypes.iter().find(|a| a.tracks_npc(npc_id))
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new(vec![
            Archetype::alchemical_hydra(),
            Archetype::demonic_gorilla(),
        ])
    }
}
