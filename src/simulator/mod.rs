//! Offline time-compression simulator.
//!
//! Fast-forwards a copy of a character through a budget of game hours:
//! - decides with the offline policy
//! - fights with the win-probability resolver
//! - levels up without healing
//!
//! and returns the new snapshot, the ordered activity log and a summary.

mod config;
mod executor;
mod report;
mod runner;

pub use config::{MinuteRange, SimConfig};
pub use executor::duration_for;
pub use report::SimulationSummary;
pub use runner::{offline_game_hours, simulate, OfflineSimulator, SimulationResult};
