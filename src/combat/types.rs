use crate::character::Stats;
use crate::core::constants::*;
use crate::core::random::RandomSource;
use serde::{Deserialize, Serialize};

/// The stat block combat reads. Characters and enemies both reduce to this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub strength: i32,
    pub intelligence: i32,
    pub agility: i32,
    pub luck: i32,
    pub vitality: i32,
}

impl CombatStats {
    pub fn from_stats(stats: &Stats) -> Self {
        Self {
            strength: stats.strength(),
            intelligence: stats.intelligence(),
            agility: stats.agility(),
            luck: stats.luck(),
            vitality: stats.vitality(),
        }
    }

    /// Every stat set to `value`.
    pub fn uniform(value: i32) -> Self {
        Self {
            strength: value,
            intelligence: value,
            agility: value,
            luck: value,
            vitality: value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub level: u32,
    pub max_hp: i32,
    pub current_hp: i32,
    pub stats: CombatStats,
    pub xp_reward: u64,
    pub gold_reward: u64,
}

impl Enemy {
    pub fn new(name: impl Into<String>, level: u32, max_hp: i32, stats: CombatStats) -> Self {
        let level = level.max(1);
        Self {
            name: name.into(),
            level,
            max_hp,
            current_hp: max_hp,
            stats,
            xp_reward: level as u64 * XP_PER_ENEMY_LEVEL,
            gold_reward: level as u64 * GOLD_PER_ENEMY_LEVEL,
        }
    }

    /// Whether this enemy is far enough above `character_level` to count as a
    /// boss-tier encounter.
    pub fn is_boss_tier_for(&self, character_level: u32) -> bool {
        self.level >= character_level + BOSS_TIER_LEVEL_GAP
    }
}

/// A row of the level-indexed enemy table. Stats are the level-1 values.
#[derive(Debug, Clone, Copy)]
pub struct EnemyTemplate {
    pub name: &'static str,
    pub min_level: u32,
    pub max_level: u32,
    pub hp_per_level: i32,
    pub stats: CombatStats,
}

const fn template(
    name: &'static str,
    min_level: u32,
    max_level: u32,
    hp_per_level: i32,
    stats: [i32; 5],
) -> EnemyTemplate {
    EnemyTemplate {
        name,
        min_level,
        max_level,
        hp_per_level,
        stats: CombatStats {
            strength: stats[0],
            intelligence: stats[1],
            agility: stats[2],
            luck: stats[3],
            vitality: stats[4],
        },
    }
}

// STR, INT, AGI, LUK, VIT at level 1
pub static ENEMY_TABLE: [EnemyTemplate; 15] = [
    template("Slime", 1, 4, 8, [3, 1, 2, 3, 4]),
    template("Giant Rat", 1, 5, 7, [4, 1, 6, 4, 2]),
    template("Goblin Scout", 2, 7, 9, [5, 3, 6, 5, 3]),
    template("Grey Wolf", 4, 10, 10, [7, 2, 8, 4, 4]),
    template("Bandit", 5, 12, 11, [7, 4, 6, 6, 5]),
    template("Skeleton", 7, 15, 11, [8, 2, 4, 2, 7]),
    template("Cave Troll", 10, 20, 15, [11, 2, 3, 3, 10]),
    template("Harpy", 12, 22, 11, [8, 5, 11, 6, 5]),
    template("Dark Acolyte", 15, 26, 10, [4, 12, 6, 7, 6]),
    template("Ogre Brute", 18, 30, 16, [13, 2, 4, 4, 12]),
    template("Wraith", 22, 35, 12, [6, 13, 10, 8, 7]),
    template("Stone Golem", 26, 40, 18, [14, 3, 3, 3, 15]),
    template("Wyvern", 30, 45, 15, [13, 8, 11, 7, 11]),
    template("Lich", 36, 50, 13, [6, 16, 8, 10, 9]),
    template("Ancient Dragon", 42, 50, 20, [16, 14, 10, 10, 16]),
];

/// Templates whose level band contains `level`, falling back to the closest
/// band when none does.
pub fn templates_for_level(level: u32) -> Vec<&'static EnemyTemplate> {
    let matching: Vec<_> = ENEMY_TABLE
        .iter()
        .filter(|t| (t.min_level..=t.max_level).contains(&level))
        .collect();
    if !matching.is_empty() {
        return matching;
    }
    ENEMY_TABLE
        .iter()
        .min_by_key(|t| t.min_level.abs_diff(level).min(t.max_level.abs_diff(level)))
        .into_iter()
        .collect()
}

/// Builds an enemy of `level` from a template.
pub fn enemy_from_template(template: &EnemyTemplate, level: u32) -> Enemy {
    let level = level.max(1);
    let growth = (level as i32 - 1) * ENEMY_STAT_GROWTH_PER_LEVEL;
    let stats = CombatStats {
        strength: template.stats.strength + growth,
        intelligence: template.stats.intelligence + growth,
        agility: template.stats.agility + growth,
        luck: template.stats.luck + growth,
        vitality: template.stats.vitality + growth,
    };
    let max_hp = ENEMY_BASE_HP + template.hp_per_level * level as i32;
    Enemy::new(template.name, level, max_hp, stats)
}

/// Generates a random enemy of exactly `level`.
pub fn generate_enemy(level: u32, rng: &mut impl RandomSource) -> Enemy {
    let candidates = templates_for_level(level);
    let template = rng
        .pick_index(candidates.len())
        .map(|i| candidates[i])
        .unwrap_or(&ENEMY_TABLE[0]);
    enemy_from_template(template, level)
}

/// Generates an enemy with a level drawn uniformly from `min_level..=max_level`.
pub fn generate_enemy_in_range(
    min_level: u32,
    max_level: u32,
    rng: &mut impl RandomSource,
) -> Enemy {
    let level = rng.range_inclusive(min_level.max(1), max_level.max(min_level).max(1));
    generate_enemy(level, rng)
}
