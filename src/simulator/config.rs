//! Simulation configuration.

use crate::core::constants::*;
use crate::error::ConfigError;
use crate::world::DEFAULT_SAFE_TOWN;
use serde::{Deserialize, Serialize};

/// Inclusive range of game minutes an offline action takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteRange {
    pub min: u32,
    pub max: u32,
}

impl MinuteRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min == 0 {
            return Err(ConfigError::ZeroValue { field });
        }
        if self.min > self.max {
            return Err(ConfigError::DurationRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Configuration for an offline simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Where characters respawn and finish healing
    pub safe_town: String,

    pub rest_minutes: MinuteRange,
    pub combat_minutes: MinuteRange,
    pub explore_minutes: MinuteRange,
    pub flee_minutes: MinuteRange,
    pub return_minutes: MinuteRange,

    /// Runaway guard: the run stops once this many activities are logged
    pub max_activities: usize,

    /// Fraction of max HP restored by resting outside a town
    pub field_rest_heal_fraction: f64,

    /// Fraction of max HP recovered after fleeing
    pub flee_recovery_fraction: f64,

    pub death_gold_loss_fraction: f64,
    pub death_xp_loss_fraction: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            safe_town: DEFAULT_SAFE_TOWN.to_string(),
            rest_minutes: MinuteRange::new(30, 60),
            combat_minutes: MinuteRange::new(5, 15),
            explore_minutes: MinuteRange::new(20, 40),
            flee_minutes: MinuteRange::new(5, 10),
            return_minutes: MinuteRange::new(30, 60),
            max_activities: MAX_SIMULATION_ACTIVITIES,
            field_rest_heal_fraction: FIELD_REST_HEAL_FRACTION,
            flee_recovery_fraction: FLEE_RECOVERY_FRACTION,
            death_gold_loss_fraction: DEATH_GOLD_LOSS_FRACTION,
            death_xp_loss_fraction: DEATH_XP_LOSS_FRACTION,
        }
    }
}

impl SimConfig {
    /// Harsher deaths and slower field recovery
    pub fn hardcore() -> Self {
        Self {
            field_rest_heal_fraction: 0.3,
            flee_recovery_fraction: 0.0,
            death_gold_loss_fraction: 0.25,
            death_xp_loss_fraction: 0.25,
            ..Default::default()
        }
    }

    /// Gentle deaths and quick recovery
    pub fn relaxed() -> Self {
        Self {
            field_rest_heal_fraction: 0.75,
            flee_recovery_fraction: 0.2,
            death_gold_loss_fraction: 0.05,
            death_xp_loss_fraction: 0.0,
            ..Default::default()
        }
    }

    /// Parses and validates a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.safe_town.trim().is_empty() {
            return Err(ConfigError::EmptySafeTown);
        }
        self.rest_minutes.validate("rest_minutes")?;
        self.combat_minutes.validate("combat_minutes")?;
        self.explore_minutes.validate("explore_minutes")?;
        self.flee_minutes.validate("flee_minutes")?;
        self.return_minutes.validate("return_minutes")?;
        if self.max_activities == 0 {
            return Err(ConfigError::ZeroValue {
                field: "max_activities",
            });
        }
        for (field, value) in [
            ("field_rest_heal_fraction", self.field_rest_heal_fraction),
            ("flee_recovery_fraction", self.flee_recovery_fraction),
            ("death_gold_loss_fraction", self.death_gold_loss_fraction),
            ("death_xp_loss_fraction", self.death_xp_loss_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::FractionOutOfRange { field, value });
            }
        }
        Ok(())
    }
}
