//! Core mechanics: dice, randomness, leveling and the live-play tick.

pub mod constants;
pub mod dice;
pub mod progression;
pub mod random;
pub mod tick;

pub use dice::{roll, skill_check, SkillCheck};
pub use progression::{apply_level_ups, xp_for_level, LevelUp, LevelUpMode};
pub use random::{RandomSource, ScriptedRandom};
pub use tick::{live_tick, TickResult};
