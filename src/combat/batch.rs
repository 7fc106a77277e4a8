//! One-shot combat resolution for batch and offline play.
//!
//! Neither resolver simulates rounds. Both compare a scalar power for each
//! side and settle the fight with a single draw.

use super::types::{CombatStats, Enemy};
use crate::character::Character;
use crate::core::constants::*;
use crate::core::dice;
use crate::core::random::RandomSource;
use serde::{Deserialize, Serialize};

/// Combat strength heuristic: the mean of four stats plus a level term.
pub fn power(stats: &CombatStats, level: u32) -> f64 {
    let total = [stats.strength, stats.intelligence, stats.agility, stats.vitality]
        .iter()
        .map(|&stat| f64::from(stat))
        .sum::<f64>();
    total / 4.0 + f64::from(level) * POWER_LEVEL_WEIGHT
}

pub fn character_power(character: &Character) -> f64 {
    power(&character.combat_stats(), character.level)
}

pub fn enemy_power(enemy: &Enemy) -> f64 {
    power(&enemy.stats, enemy.level)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchOutcome {
    Win,
    Flee,
    Death,
}

/// Result of the score-banded resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchCombatResult {
    pub outcome: BatchOutcome,
    pub roll: u32,
    /// `roll + (character power - enemy power)`. For natural 1 and 21 the
    /// score is still reported but did not decide the outcome.
    pub combat_score: f64,
    pub critical: bool,
    pub xp_gained: u64,
    pub gold_gained: u64,
    pub gold_lost: u64,
    pub description: String,
}

impl BatchCombatResult {
    /// Applies rewards and losses to `character`. A death leaves the
    /// character at 0 HP for the caller's death handling.
    pub fn apply(&self, character: &mut Character) {
        character.experience += self.xp_gained;
        character.gold = character.gold.saturating_add(self.gold_gained);
        character.lose_gold(self.gold_lost);
        if self.outcome == BatchOutcome::Death {
            character.current_hp = 0;
        }
    }
}

/// Maps a non-natural score onto its band. Both edges are inclusive on the
/// upper side: exactly the win threshold wins, exactly the flee floor flees.
pub fn outcome_for_score(score: f64) -> BatchOutcome {
    if score >= BATCH_WIN_THRESHOLD {
        BatchOutcome::Win
    } else if score >= BATCH_FLEE_FLOOR {
        BatchOutcome::Flee
    } else {
        BatchOutcome::Death
    }
}

/// Score-banded resolution: one d21 plus the power difference.
pub fn resolve_batch_combat(
    character: &Character,
    enemy: &Enemy,
    rng: &mut impl RandomSource,
) -> BatchCombatResult {
    let roll = dice::roll(rng);
    let combat_score = roll as f64 + (character_power(character) - enemy_power(enemy));

    let (outcome, critical) = match roll {
        NATURAL_CRITICAL_SUCCESS => (BatchOutcome::Win, true),
        NATURAL_CRITICAL_FAILURE => (BatchOutcome::Death, false),
        _ => (outcome_for_score(combat_score), false),
    };

    let multiplier = if critical {
        CRITICAL_VICTORY_REWARD_MULTIPLIER
    } else {
        1
    };

    let (xp_gained, gold_gained, gold_lost) = match outcome {
        BatchOutcome::Win => (
            enemy.xp_reward * multiplier,
            enemy.gold_reward * multiplier,
            0,
        ),
        BatchOutcome::Flee => (0, 0, 0),
        BatchOutcome::Death => (0, 0, character.gold / DEATH_GOLD_LOSS_DIVISOR),
    };

    let description = match outcome {
        BatchOutcome::Win if critical => format!("Crushed {} with a perfect strike", enemy.name),
        BatchOutcome::Win => format!("Defeated {}", enemy.name),
        BatchOutcome::Flee => format!("Escaped from {}", enemy.name),
        BatchOutcome::Death => format!("Fell to {} and lost {} gold", enemy.name, gold_lost),
    };

    BatchCombatResult {
        outcome,
        roll,
        combat_score,
        critical,
        xp_gained,
        gold_gained,
        gold_lost,
        description,
    }
}

/// Result of the win-probability resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilisticCombatResult {
    pub victory: bool,
    pub win_probability: f64,
    /// HP actually lost. Never lethal on a victory.
    pub hp_lost: i32,
    pub xp_gained: u64,
    pub gold_gained: u64,
    pub items: Vec<String>,
    pub description: String,
}

impl ProbabilisticCombatResult {
    pub fn apply(&self, character: &mut Character) {
        character.take_damage(self.hp_lost);
        character.experience += self.xp_gained;
        character.gold = character.gold.saturating_add(self.gold_gained);
    }
}

/// Chance that the character wins a probabilistic fight.
pub fn win_probability(character_power: f64, enemy_power: f64) -> f64 {
    let total = character_power + enemy_power;
    if total <= 0.0 {
        return 0.5;
    }
    (character_power / total).clamp(0.0, 1.0)
}

pub fn item_drop_chance(luck: i32) -> f64 {
    (ITEM_DROP_BASE_CHANCE + luck.max(0) as f64 * ITEM_DROP_CHANCE_PER_LUCK)
        .min(ITEM_DROP_MAX_CHANCE)
}

const LOOT_BASES: [&str; 12] = [
    "Sword", "Axe", "Mace", "Dagger", "Staff", "Bow", "Shield", "Helm", "Gloves", "Boots",
    "Amulet", "Ring",
];

fn loot_quality(enemy_level: u32) -> &'static str {
    match enemy_level {
        0..=5 => "Worn",
        6..=15 => "Sturdy",
        16..=25 => "Fine",
        26..=40 => "Masterwork",
        _ => "Legendary",
    }
}

/// Names a dropped item. Quality follows the enemy's level.
pub fn roll_loot_name(enemy_level: u32, rng: &mut impl RandomSource) -> String {
    let base = rng
        .pick_index(LOOT_BASES.len())
        .map(|i| LOOT_BASES[i])
        .unwrap_or(LOOT_BASES[0]);
    format!("{} {}", loot_quality(enemy_level), base)
}

fn hp_loss(max_hp: i32, base_fraction: f64, ratio: f64, rng: &mut impl RandomSource) -> i32 {
    let jitter = rng.range_f64(0.0, HP_LOSS_JITTER_FRACTION);
    (max_hp as f64 * (base_fraction * ratio + jitter)).round() as i32
}

/// Win-probability resolution used by the offline simulator.
pub fn resolve_probabilistic_combat(
    character: &Character,
    enemy: &Enemy,
    rng: &mut impl RandomSource,
) -> ProbabilisticCombatResult {
    let cp = character_power(character);
    let ep = enemy_power(enemy);
    let win_probability = win_probability(cp, ep);
    let victory = rng.next_f64() < win_probability;
    let ratio = ep / cp.max(f64::EPSILON);

    if victory {
        let raw = hp_loss(character.max_hp, VICTORY_HP_LOSS_FRACTION, ratio, rng);
        let hp_lost = raw.clamp(0, (character.current_hp - 1).max(0));

        let mut items = Vec::new();
        if rng.chance(item_drop_chance(character.stats.luck())) {
            items.push(roll_loot_name(enemy.level, rng));
        }

        let description = match items.first() {
            Some(item) => format!("Defeated {} and found {}", enemy.name, item),
            None => format!("Defeated {}", enemy.name),
        };

        ProbabilisticCombatResult {
            victory,
            win_probability,
            hp_lost,
            xp_gained: enemy.xp_reward,
            gold_gained: enemy.gold_reward,
            items,
            description,
        }
    } else {
        let raw = hp_loss(character.max_hp, DEFEAT_HP_LOSS_FRACTION, ratio, rng);
        let hp_lost = raw.clamp(0, character.current_hp.max(0));

        ProbabilisticCombatResult {
            victory,
            win_probability,
            hp_lost,
            xp_gained: enemy.xp_reward / DEFEAT_XP_DIVISOR,
            gold_gained: 0,
            items: Vec::new(),
            description: format!("Was beaten back by {}", enemy.name),
        }
    }
}
