//! Turn-based combat for live play.
//!
//! Each attack is an agility skill check, then a dodge check by the defender,
//! then damage. Encounters alternate character then enemy until one side
//! drops or the round cap trips.

use super::types::{CombatStats, Enemy};
use crate::character::Character;
use crate::core::constants::*;
use crate::core::dice::{skill_check, SkillCheck};
use crate::core::random::RandomSource;
use serde::{Deserialize, Serialize};

/// Result of one attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackResult {
    pub hit: bool,
    pub dodged: bool,
    pub critical: bool,
    /// Damage dealt after reduction. Zero on a miss or dodge, at least 1 otherwise.
    pub damage: i32,
    pub attack_roll: SkillCheck,
    pub dodge_roll: Option<SkillCheck>,
    pub description: String,
}

/// Difficulty for landing a hit on a defender.
pub fn attack_difficulty(defender_level: u32, defender_agility: i32) -> i32 {
    ATTACK_DIFFICULTY_BASE + defender_level as i32 / 2 + defender_agility / 3
}

/// Difficulty for dodging an attacker's confirmed hit.
pub fn dodge_difficulty(attacker_level: u32, attacker_agility: i32) -> i32 {
    DODGE_DIFFICULTY_BASE + attacker_level as i32 + attacker_agility / 2
}

/// Base damage before crits, jitter and reduction. Uses the stronger of
/// physical and magical damage.
pub fn base_damage(stats: &CombatStats, level: u32) -> i32 {
    let level_bonus = (level / 2) as i32;
    let physical = stats.strength.saturating_mul(DAMAGE_PER_STAT_POINT);
    let magical = stats.intelligence.saturating_mul(DAMAGE_PER_STAT_POINT);
    physical.max(magical).saturating_add(level_bonus)
}

pub fn damage_reduction(defender: &CombatStats) -> i32 {
    defender.vitality / 2
}

/// Final damage of a confirmed hit. Never below 1.
pub fn final_damage(raw: i32, reduction: i32) -> i32 {
    (raw - reduction).max(MIN_HIT_DAMAGE)
}

/// Resolves one attack from `attacker` against `defender`.
pub fn execute_attack(
    attacker: &CombatStats,
    defender: &CombatStats,
    attacker_level: u32,
    defender_level: u32,
    rng: &mut impl RandomSource,
) -> AttackResult {
    let attack_roll = skill_check(
        attacker.agility,
        attack_difficulty(defender_level, defender.agility),
        attacker.luck,
        rng,
    );

    if !attack_roll.succeeded {
        let description = if attack_roll.is_critical_failure {
            "fumbles the attack".to_string()
        } else {
            format!("misses (rolled {})", attack_roll.roll)
        };
        return AttackResult {
            hit: false,
            dodged: false,
            critical: false,
            damage: 0,
            attack_roll,
            dodge_roll: None,
            description,
        };
    }

    let dodge_roll = skill_check(
        defender.agility,
        dodge_difficulty(attacker_level, attacker.agility),
        defender.luck,
        rng,
    );

    if dodge_roll.succeeded {
        return AttackResult {
            hit: true,
            dodged: true,
            critical: false,
            damage: 0,
            attack_roll,
            dodge_roll: Some(dodge_roll),
            description: "is dodged".to_string(),
        };
    }

    let critical = attack_roll.is_critical_success;
    let mut raw = base_damage(attacker, attacker_level);
    if critical {
        raw = raw.saturating_mul(CRITICAL_DAMAGE_MULTIPLIER);
    }
    let jitter = rng.range_f64(DAMAGE_JITTER_MIN, DAMAGE_JITTER_MAX);
    let raw = (raw as f64 * jitter).round() as i32;
    let damage = final_damage(raw, damage_reduction(defender));

    let description = if critical {
        format!("lands a critical hit for {} damage", damage)
    } else {
        format!("hits for {} damage", damage)
    };

    AttackResult {
        hit: true,
        dodged: false,
        critical,
        damage,
        attack_roll,
        dodge_roll: Some(dodge_roll),
        description,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterOutcome {
    Victory,
    Defeat,
    /// Neither side fell before the round cap.
    Stalemate,
}

/// One round of an encounter. `enemy_attack` is absent when the enemy fell
/// to the character's attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatRound {
    pub round: u32,
    pub character_attack: AttackResult,
    pub enemy_attack: Option<AttackResult>,
    pub character_hp: i32,
    pub enemy_hp: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterResult {
    pub outcome: EncounterOutcome,
    pub rounds: Vec<CombatRound>,
    pub rounds_fought: u32,
    pub character_hp: i32,
    pub enemy_hp: i32,
    pub xp_gained: u64,
    pub gold_gained: u64,
    /// Set when the round cap ended the fight.
    pub round_cap_reached: bool,
    pub description: String,
}

impl EncounterResult {
    pub fn is_victory(&self) -> bool {
        self.outcome == EncounterOutcome::Victory
    }
}

/// XP multiplier for the level gap between enemy and character.
pub fn level_difference_multiplier(enemy_level: u32, character_level: u32) -> f64 {
    let diff = enemy_level as i64 - character_level as i64;
    match diff {
        d if d >= 5 => 1.5,
        d if d >= 2 => 1.25,
        d if d >= -1 => 1.0,
        d if d >= -4 => 0.75,
        _ => 0.5,
    }
}

/// XP for defeating an enemy of `enemy_level` at `character_level`.
pub fn encounter_xp(enemy_level: u32, character_level: u32) -> u64 {
    let base = enemy_level as u64 * XP_PER_ENEMY_LEVEL;
    (base as f64 * level_difference_multiplier(enemy_level, character_level)) as u64
}

/// Gold for defeating an enemy of `enemy_level`, with jitter.
pub fn encounter_gold(enemy_level: u32, rng: &mut impl RandomSource) -> u64 {
    let base = enemy_level as u64 * GOLD_PER_ENEMY_LEVEL;
    let jitter = rng.range_f64(GOLD_JITTER_MIN, GOLD_JITTER_MAX);
    (base as f64 * jitter).round() as u64
}

/// Fights `enemy` to the end. Pure: neither input is mutated.
pub fn execute_encounter(
    character: &Character,
    enemy: &Enemy,
    rng: &mut impl RandomSource,
) -> EncounterResult {
    let hero = character.combat_stats();
    let mut character_hp = character.current_hp;
    let mut enemy_hp = enemy.current_hp;
    let mut rounds = Vec::new();
    let mut round = 0;

    while character_hp > 0 && enemy_hp > 0 && round < MAX_ENCOUNTER_ROUNDS {
        round += 1;

        let character_attack =
            execute_attack(&hero, &enemy.stats, character.level, enemy.level, rng);
        enemy_hp = (enemy_hp - character_attack.damage).max(0);

        let enemy_attack = if enemy_hp > 0 {
            let attack = execute_attack(&enemy.stats, &hero, enemy.level, character.level, rng);
            character_hp = (character_hp - attack.damage).max(0);
            Some(attack)
        } else {
            None
        };

        rounds.push(CombatRound {
            round,
            character_attack,
            enemy_attack,
            character_hp,
            enemy_hp,
        });
    }

    let outcome = if enemy_hp <= 0 && character_hp > 0 {
        EncounterOutcome::Victory
    } else if character_hp <= 0 {
        EncounterOutcome::Defeat
    } else {
        EncounterOutcome::Stalemate
    };
    let round_cap_reached = outcome == EncounterOutcome::Stalemate;
    if round_cap_reached {
        log::warn!(
            "encounter between {} and {} hit the {} round cap",
            character.name,
            enemy.name,
            MAX_ENCOUNTER_ROUNDS
        );
    }

    let (xp_gained, gold_gained) = match outcome {
        EncounterOutcome::Victory => (
            encounter_xp(enemy.level, character.level),
            encounter_gold(enemy.level, rng),
        ),
        _ => (0, 0),
    };

    let description = match outcome {
        EncounterOutcome::Victory => format!(
            "{} defeated {} (Lv.{}) in {} rounds",
            character.name, enemy.name, enemy.level, round
        ),
        EncounterOutcome::Defeat => format!(
            "{} was defeated by {} (Lv.{})",
            character.name, enemy.name, enemy.level
        ),
        EncounterOutcome::Stalemate => format!(
            "{} and {} fought to a standstill",
            character.name, enemy.name
        ),
    };

    EncounterResult {
        outcome,
        rounds,
        rounds_fought: round,
        character_hp,
        enemy_hp,
        xp_gained,
        gold_gained,
        round_cap_reached,
        description,
    }
}
