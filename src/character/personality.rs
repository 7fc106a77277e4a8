//! Personality traits that drive the decision engine.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Six traits in `[0, 1]`. Fixed once the character is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PersonalityFields")]
pub struct Personality {
    courage: f64,
    greed: f64,
    curiosity: f64,
    aggression: f64,
    social: f64,
    impulsive: f64,
}

#[derive(Deserialize)]
struct PersonalityFields {
    courage: f64,
    greed: f64,
    curiosity: f64,
    aggression: f64,
    social: f64,
    impulsive: f64,
}

impl TryFrom<PersonalityFields> for Personality {
    type Error = ValidationError;

    fn try_from(f: PersonalityFields) -> Result<Self, Self::Error> {
        Personality::new(
            f.courage,
            f.greed,
            f.curiosity,
            f.aggression,
            f.social,
            f.impulsive,
        )
    }
}

fn check(name: &'static str, value: f64) -> Result<f64, ValidationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::TraitOutOfRange { name, value })
    }
}

impl Personality {
    pub fn new(
        courage: f64,
        greed: f64,
        curiosity: f64,
        aggression: f64,
        social: f64,
        impulsive: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            courage: check("courage", courage)?,
            greed: check("greed", greed)?,
            curiosity: check("curiosity", curiosity)?,
            aggression: check("aggression", aggression)?,
            social: check("social", social)?,
            impulsive: check("impulsive", impulsive)?,
        })
    }

    /// Every trait at 0.5.
    pub fn balanced() -> Self {
        Self {
            courage: 0.5,
            greed: 0.5,
            curiosity: 0.5,
            aggression: 0.5,
            social: 0.5,
            impulsive: 0.5,
        }
    }

    /// Every trait at 0.0. Never explores, fights or shops on a whim.
    pub fn passive() -> Self {
        Self {
            courage: 0.0,
            greed: 0.0,
            curiosity: 0.0,
            aggression: 0.0,
            social: 0.0,
            impulsive: 0.0,
        }
    }

    pub fn courage(&self) -> f64 {
        self.courage
    }

    pub fn greed(&self) -> f64 {
        self.greed
    }

    pub fn curiosity(&self) -> f64 {
        self.curiosity
    }

    pub fn aggression(&self) -> f64 {
        self.aggression
    }

    pub fn social(&self) -> f64 {
        self.social
    }

    pub fn impulsive(&self) -> f64 {
        self.impulsive
    }
}

impl Default for Personality {
    fn default() -> Self {
        Self::balanced()
    }
}
