//! Combat resolution: turn-based encounters for live play and one-shot
//! power comparisons for batch and offline play.

pub mod batch;
pub mod logic;
pub mod types;

pub use batch::{
    power, resolve_batch_combat, resolve_probabilistic_combat, BatchCombatResult, BatchOutcome,
    ProbabilisticCombatResult,
};
pub use logic::{
    execute_attack, execute_encounter, AttackResult, CombatRound, EncounterOutcome,
    EncounterResult,
};
pub use types::{generate_enemy, generate_enemy_in_range, CombatStats, Enemy};
