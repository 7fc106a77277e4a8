//! Character snapshot, stats, personality and job classes.

pub mod attributes;
pub mod job_class;
pub mod personality;
pub mod snapshot;

pub use attributes::{StatType, Stats};
pub use job_class::JobClass;
pub use personality::Personality;
pub use snapshot::{max_hp_for, Character, DeathPenalty};
