//! Experience curve and level-up application.

use super::constants::*;
use crate::character::{Character, StatType};
use serde::{Deserialize, Serialize};

/// Experience required to advance from `level` to `level + 1`.
pub fn xp_for_level(level: u32) -> u64 {
    (XP_CURVE_BASE * (level as f64).powf(XP_CURVE_EXPONENT)).floor() as u64
}

/// How current HP is carried across a level up.
///
/// Live play heals fully on every level. Offline simulation keeps the HP
/// fraction the character had before leveling, so a wounded character stays
/// proportionally wounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelUpMode {
    FullHeal,
    PreserveHpRatio,
}

/// One level gained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelUp {
    pub new_level: u32,
    /// Points added per stat, STR through VIT.
    pub stat_gains: [i32; NUM_STATS],
    pub max_hp: i32,
}

impl LevelUp {
    pub fn describe(&self, name: &str) -> String {
        let gains: Vec<String> = StatType::all()
            .iter()
            .filter(|stat| self.stat_gains[stat.index()] > 0)
            .map(|stat| format!("+{} {}", self.stat_gains[stat.index()], stat.abbrev()))
            .collect();
        if gains.is_empty() {
            format!("{} reached level {}", name, self.new_level)
        } else {
            format!(
                "{} reached level {} ({})",
                name,
                self.new_level,
                gains.join(", ")
            )
        }
    }
}

/// Applies every level up the character's experience pays for.
///
/// Leveling stops at [`MAX_LEVEL`]; any experience held at the cap is
/// discarded.
pub fn apply_level_ups(character: &mut Character, mode: LevelUpMode) -> Vec<LevelUp> {
    let mut gained = Vec::new();

    while character.level < MAX_LEVEL && character.experience >= xp_for_level(character.level) {
        character.experience -= xp_for_level(character.level);
        character.level += 1;

        let was_full = character.is_full_health();
        let ratio = character.health_fraction();

        let stat_gains = character.job_class.level_up_gains();
        for stat in StatType::all() {
            character.stats.add(stat, stat_gains[stat.index()]);
        }
        character.recalculate_max_hp();

        match mode {
            LevelUpMode::FullHeal => character.full_heal(),
            LevelUpMode::PreserveHpRatio if was_full => character.full_heal(),
            LevelUpMode::PreserveHpRatio => {
                let carried = (character.max_hp as f64 * ratio).round() as i32;
                character.current_hp = carried.clamp(0, character.max_hp);
            }
        }

        gained.push(LevelUp {
            new_level: character.level,
            stat_gains,
            max_hp: character.max_hp,
        });
    }

    if character.level >= MAX_LEVEL {
        character.experience = 0;
    }

    gained
}
