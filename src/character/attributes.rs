use crate::core::constants::NUM_STATS;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatType {
    Strength,
    Intelligence,
    Agility,
    Luck,
    Charisma,
    Vitality,
}

impl StatType {
    pub fn all() -> [StatType; NUM_STATS] {
        [
            StatType::Strength,
            StatType::Intelligence,
            StatType::Agility,
            StatType::Luck,
            StatType::Charisma,
            StatType::Vitality,
        ]
    }

    pub fn abbrev(&self) -> &'static str {
        match self {
            StatType::Strength => "STR",
            StatType::Intelligence => "INT",
            StatType::Agility => "AGI",
            StatType::Luck => "LUK",
            StatType::Charisma => "CHA",
            StatType::Vitality => "VIT",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatType::Strength => "strength",
            StatType::Intelligence => "intelligence",
            StatType::Agility => "agility",
            StatType::Luck => "luck",
            StatType::Charisma => "charisma",
            StatType::Vitality => "vitality",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            StatType::Strength => 0,
            StatType::Intelligence => 1,
            StatType::Agility => 2,
            StatType::Luck => 3,
            StatType::Charisma => 4,
            StatType::Vitality => 5,
        }
    }
}

/// The six character stats. Never negative.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "[i32; 6]", into = "[i32; 6]")]
pub struct Stats {
    values: [i32; NUM_STATS],
}

impl Stats {
    pub fn new(
        strength: i32,
        intelligence: i32,
        agility: i32,
        luck: i32,
        charisma: i32,
        vitality: i32,
    ) -> Result<Self, ValidationError> {
        Self::try_from([strength, intelligence, agility, luck, charisma, vitality])
    }

    /// Every stat set to `value`.
    pub fn uniform(value: u16) -> Self {
        Self {
            values: [i32::from(value); NUM_STATS],
        }
    }

    pub fn get(&self, stat: StatType) -> i32 {
        self.values[stat.index()]
    }

    pub fn strength(&self) -> i32 {
        self.get(StatType::Strength)
    }

    pub fn intelligence(&self) -> i32 {
        self.get(StatType::Intelligence)
    }

    pub fn agility(&self) -> i32 {
        self.get(StatType::Agility)
    }

    pub fn luck(&self) -> i32 {
        self.get(StatType::Luck)
    }

    pub fn charisma(&self) -> i32 {
        self.get(StatType::Charisma)
    }

    pub fn vitality(&self) -> i32 {
        self.get(StatType::Vitality)
    }

    /// Adds `points` to a stat. Negative results saturate at zero.
    pub fn add(&mut self, stat: StatType, points: i32) {
        let value = &mut self.values[stat.index()];
        *value = value.saturating_add(points).max(0);
    }
}

impl TryFrom<[i32; NUM_STATS]> for Stats {
    type Error = ValidationError;

    fn try_from(values: [i32; NUM_STATS]) -> Result<Self, Self::Error> {
        for stat in StatType::all() {
            let value = values[stat.index()];
            if value < 0 {
                return Err(ValidationError::NegativeStat {
                    stat: stat.name(),
                    value,
                });
            }
        }
        Ok(Self { values })
    }
}

impl From<Stats> for [i32; NUM_STATS] {
    fn from(stats: Stats) -> Self {
        stats.values
    }
}
