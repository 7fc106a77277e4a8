//! Autoquest - autonomous RPG engine library
//!
//! Characters act on their own: a decision engine picks what to do, a d21
//! dice system settles combat, and an offline simulator fast-forwards time
//! spent away into a log of activities.

pub mod activity;
pub mod character;
pub mod combat;
pub mod core;
pub mod decision;
pub mod error;
pub mod simulator;
pub mod world;

pub use activity::{Activity, ActivityType, Rewards};
pub use character::{Character, JobClass, Personality, StatType, Stats};
pub use crate::core::progression::{apply_level_ups, xp_for_level, LevelUpMode};
pub use crate::core::random::{RandomSource, ScriptedRandom};
pub use crate::core::tick::{live_tick, TickResult};
pub use decision::{decide, decide_offline, Decision, DecisionContext, OfflineDecision};
pub use error::{ConfigError, ValidationError};
pub use simulator::{simulate, OfflineSimulator, SimConfig, SimulationResult, SimulationSummary};
pub use world::{StaticWorld, WorldData};
