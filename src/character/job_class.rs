//! Job classes: starting stats and level-up stat distribution.

use super::attributes::{StatType, Stats};
use crate::core::constants::{JOB_WEIGHT_TOTAL, LEVEL_UP_STAT_POINTS, NUM_STATS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum JobClass {
    Warrior,
    Mage,
    Rogue,
    Ranger,
    Cleric,
    Bard,
}

impl JobClass {
    pub fn all() -> [JobClass; 6] {
        [
            JobClass::Warrior,
            JobClass::Mage,
            JobClass::Rogue,
            JobClass::Ranger,
            JobClass::Cleric,
            JobClass::Bard,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            JobClass::Warrior => "Warrior",
            JobClass::Mage => "Mage",
            JobClass::Rogue => "Rogue",
            JobClass::Ranger => "Ranger",
            JobClass::Cleric => "Cleric",
            JobClass::Bard => "Bard",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<JobClass> {
        Self::all()
            .into_iter()
            .find(|class| class.name().eq_ignore_ascii_case(name))
    }

    pub fn primary_stat(&self) -> StatType {
        match self {
            JobClass::Warrior => StatType::Strength,
            JobClass::Mage => StatType::Intelligence,
            JobClass::Rogue => StatType::Agility,
            JobClass::Ranger => StatType::Agility,
            JobClass::Cleric => StatType::Intelligence,
            JobClass::Bard => StatType::Charisma,
        }
    }

    pub fn secondary_stat(&self) -> StatType {
        match self {
            JobClass::Warrior => StatType::Vitality,
            JobClass::Mage => StatType::Luck,
            JobClass::Rogue => StatType::Luck,
            JobClass::Ranger => StatType::Strength,
            JobClass::Cleric => StatType::Vitality,
            JobClass::Bard => StatType::Luck,
        }
    }

    /// Per-level distribution weights in STR, INT, AGI, LUK, CHA, VIT order.
    /// Each profile sums to 100.
    pub fn stat_weights(&self) -> [i32; NUM_STATS] {
        match self {
            JobClass::Warrior => [40, 0, 20, 0, 0, 40],
            JobClass::Mage => [0, 60, 10, 10, 0, 20],
            JobClass::Rogue => [20, 0, 40, 20, 0, 20],
            JobClass::Ranger => [20, 0, 40, 10, 10, 20],
            JobClass::Cleric => [0, 40, 0, 0, 20, 40],
            JobClass::Bard => [0, 20, 20, 20, 40, 0],
        }
    }

    /// Stat points gained per level up. Floor division per stat; the remainder
    /// is dropped rather than redistributed.
    pub fn level_up_gains(&self) -> [i32; NUM_STATS] {
        self.stat_weights()
            .map(|weight| LEVEL_UP_STAT_POINTS * weight / JOB_WEIGHT_TOTAL)
    }

    pub fn starting_stats(&self) -> Stats {
        let mut stats = Stats::uniform(5);
        stats.add(self.primary_stat(), 5);
        stats.add(self.secondary_stat(), 3);
        stats
    }
}
