//! Validation errors raised when building characters and simulation config.

use thiserror::Error;

/// Errors raised when a character snapshot violates its invariants.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("personality trait {name} must be between 0.0 and 1.0 (got {value})")]
    TraitOutOfRange { name: &'static str, value: f64 },
    #[error("stat {stat} must not be negative (got {value})")]
    NegativeStat { stat: &'static str, value: i32 },
    #[error("level must be between 1 and {max} (got {value})")]
    LevelOutOfRange { value: u32, max: u32 },
    #[error("current hp {current} must be between 0 and max hp {max}")]
    HpOutOfRange { current: i32, max: i32 },
    #[error("character name must not be empty")]
    EmptyName,
}

/// Errors raised when simulation configuration invariants are violated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} minimum {min} exceeds maximum {max}")]
    DurationRange {
        field: &'static str,
        min: u32,
        max: u32,
    },
    #[error("{field} must be positive")]
    ZeroValue { field: &'static str },
    #[error("{field} must be between 0.0 and 1.0 (got {value})")]
    FractionOutOfRange { field: &'static str, value: f64 },
    #[error("safe town must not be empty")]
    EmptySafeTown,
    #[error("safe town {0} is not a town in this world")]
    UnknownSafeTown(String),
    #[error("invalid config json: {0}")]
    Json(String),
}
