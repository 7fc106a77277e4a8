// Dice
pub const DIE_SIDES: u32 = 21;
pub const NATURAL_CRITICAL_SUCCESS: u32 = 21;
pub const NATURAL_CRITICAL_FAILURE: u32 = 1;
pub const LUCK_REROLL_THRESHOLD: i32 = 10;
pub const LUCK_REROLL_CHANCE_PER_POINT: f64 = 0.03;
pub const LUCK_REROLL_CHANCE_CAP: f64 = 0.5;
pub const LUCK_CRIT_EXPANSION_THRESHOLD: i32 = 15;
pub const LUCK_CRIT_EXPANSION_STEP: i32 = 5;
pub const EXPANDED_CRIT_BASE_THRESHOLD: u32 = 18;
pub const EXPANDED_CRIT_FLOOR: u32 = 15;

// Interactive combat
pub const ATTACK_DIFFICULTY_BASE: i32 = 10;
pub const DODGE_DIFFICULTY_BASE: i32 = 20;
pub const DAMAGE_PER_STAT_POINT: i32 = 2;
pub const CRITICAL_DAMAGE_MULTIPLIER: i32 = 2;
pub const DAMAGE_JITTER_MIN: f64 = 0.8;
pub const DAMAGE_JITTER_MAX: f64 = 1.2;
pub const MIN_HIT_DAMAGE: i32 = 1;
pub const MAX_ENCOUNTER_ROUNDS: u32 = 50;
pub const XP_PER_ENEMY_LEVEL: u64 = 10;
pub const GOLD_PER_ENEMY_LEVEL: u64 = 5;
pub const GOLD_JITTER_MIN: f64 = 0.8;
pub const GOLD_JITTER_MAX: f64 = 1.2;

// Batch combat
pub const POWER_LEVEL_WEIGHT: f64 = 2.0;
pub const BATCH_WIN_THRESHOLD: f64 = 15.0;
pub const BATCH_FLEE_FLOOR: f64 = 8.0;
pub const CRITICAL_VICTORY_REWARD_MULTIPLIER: u64 = 2;
pub const DEATH_GOLD_LOSS_DIVISOR: u64 = 2;
pub const VICTORY_HP_LOSS_FRACTION: f64 = 0.10;
pub const DEFEAT_HP_LOSS_FRACTION: f64 = 0.40;
pub const HP_LOSS_JITTER_FRACTION: f64 = 0.05;
pub const DEFEAT_XP_DIVISOR: u64 = 10;
pub const ITEM_DROP_BASE_CHANCE: f64 = 0.05;
pub const ITEM_DROP_CHANCE_PER_LUCK: f64 = 0.005;
pub const ITEM_DROP_MAX_CHANCE: f64 = 0.5;

// Enemies
pub const ENEMY_BASE_HP: i32 = 20;
pub const ENEMY_STAT_GROWTH_PER_LEVEL: i32 = 1;
pub const BOSS_TIER_LEVEL_GAP: u32 = 3;

// Decision engine
pub const SURVIVAL_HP_FRACTION: f64 = 0.30;
pub const OFFLINE_EMERGENCY_HP_FRACTION: f64 = 0.15;
pub const CRITICAL_NEEDS_HP_FRACTION: f64 = 0.60;
pub const OFFLINE_REST_HP_FRACTION: f64 = 0.70;
pub const LOW_GOLD_THRESHOLD: u64 = 50;
pub const EXPLORE_CHANCE_PER_CURIOSITY: f64 = 0.5;
pub const COMBAT_CHANCE_PER_AGGRESSION: f64 = 0.5;
pub const SHOP_CHANCE_PER_GREED: f64 = 0.3;
pub const SHOP_GOLD_FLOOR: u64 = 100;
pub const QUEST_CHANCE_PER_COURAGE: f64 = 0.4;
pub const OFFLINE_EXPLORE_CHANCE_PER_CURIOSITY: f64 = 0.4;
pub const OFFLINE_COMBAT_CHANCE_PER_AGGRESSION: f64 = 0.5;
pub const OFFLINE_COURAGE_COMBAT_ADJUSTMENT: f64 = 0.2;

// XP and leveling
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_EXPONENT: f64 = 1.5;
pub const MAX_LEVEL: u32 = 50;
pub const LEVEL_UP_STAT_POINTS: i32 = 5;
pub const JOB_WEIGHT_TOTAL: i32 = 100;

// Character
pub const BASE_MAX_HP: i32 = 50;
pub const HP_PER_VITALITY: i32 = 10;
pub const HP_PER_LEVEL: i32 = 5;
pub const STARTING_GOLD: u64 = 100;
pub const NUM_STATS: usize = 6;

// Live play
pub const REST_HEAL_FRACTION: f64 = 0.25;
pub const SHOP_SPEND_FRACTION: f64 = 0.2;
pub const QUEST_COMPLETION_CHANCE: f64 = 0.25;
pub const QUEST_XP_REWARD_PER_LEVEL: u64 = 25;
pub const QUEST_GOLD_REWARD_PER_LEVEL: u64 = 15;

// Offline simulation
pub const GAME_HOURS_PER_REAL_HOUR: f64 = 6.0;
pub const MAX_OFFLINE_GAME_HOURS: f64 = 1008.0;
pub const MAX_SIMULATION_ACTIVITIES: usize = 1000;
pub const FIELD_REST_HEAL_FRACTION: f64 = 0.5;
pub const FLEE_RECOVERY_FRACTION: f64 = 0.1;
pub const DEATH_GOLD_LOSS_FRACTION: f64 = 0.1;
pub const DEATH_XP_LOSS_FRACTION: f64 = 0.1;
pub const EXPLORE_GOLD_FIND_CHANCE: f64 = 0.3;
pub const EXPLORE_GOLD_PER_LEVEL: u32 = 3;
