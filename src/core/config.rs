//! Combat configuration with documented constants
//!
//! Loaded from TOML (`data/combat.toml`) or built from defaults. Every
//! field is optional in the file; missing fields fall back to `Default`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::combat::constants::{BOTTOM_DEPLOYMENT_SLOTS, STARBASE_DEPLOYMENT_SLOTS};
use crate::core::error::{Result, TacticsError};

/// Tunable values for a combat session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Maximum rounds the fast (headless) resolver runs before giving up.
    ///
    /// A round is one full pass over the roster. Hitting the cap ends the
    /// resolution with no winner.
    pub max_rounds: u32,

    /// Flat accuracy bonus for ships whose fleet was holding a defensive
    /// posture when combat began. Fixed for the whole combat.
    pub defend_bonus_accuracy: i32,

    /// How many ships of a mobile fleet take part in combat.
    ///
    /// Ships past this count stay out of the fight. Cannot exceed the
    /// bottom/top deployment table size.
    pub max_fleet_ships: usize,

    /// How many ships of a starbase fleet take part in combat.
    pub max_starbase_ships: usize,

    /// Floor for the d100 hit chance after all modifiers
    pub min_hit_chance: i32,

    /// Ceiling for the d100 hit chance after all modifiers
    pub max_hit_chance: i32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            max_rounds: 50,
            defend_bonus_accuracy: 5,
            max_fleet_ships: BOTTOM_DEPLOYMENT_SLOTS,
            max_starbase_ships: STARBASE_DEPLOYMENT_SLOTS,
            min_hit_chance: 5,
            max_hit_chance: 95,
        }
    }
}

impl CombatConfig {
    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_rounds == 0 {
            return Err(TacticsError::InvalidConfig(
                "max_rounds must be at least 1".into(),
            ));
        }

        if self.max_fleet_ships > BOTTOM_DEPLOYMENT_SLOTS {
            return Err(TacticsError::InvalidConfig(format!(
                "max_fleet_ships ({}) exceeds deployment table size ({})",
                self.max_fleet_ships, BOTTOM_DEPLOYMENT_SLOTS
            )));
        }

        if self.max_starbase_ships > STARBASE_DEPLOYMENT_SLOTS {
            return Err(TacticsError::InvalidConfig(format!(
                "max_starbase_ships ({}) exceeds starbase table size ({})",
                self.max_starbase_ships, STARBASE_DEPLOYMENT_SLOTS
            )));
        }

        if self.min_hit_chance > self.max_hit_chance {
            return Err(TacticsError::InvalidConfig(format!(
                "min_hit_chance ({}) should be <= max_hit_chance ({})",
                self.min_hit_chance, self.max_hit_chance
            )));
        }

        Ok(())
    }
}

/// Parse and validate a combat config from TOML text
pub fn parse_combat_config(contents: &str) -> Result<CombatConfig> {
    let config: CombatConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

/// Load combat config from a TOML file
pub fn load_combat_config(path: &Path) -> Result<CombatConfig> {
    let contents = fs::read_to_string(path)?;
    parse_combat_config(&contents)
}
