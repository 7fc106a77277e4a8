//! The autonomous decision engine.
//!
//! Live play uses [`decide`], a first-match priority cascade. Offline
//! simulation uses [`decide_offline`], which draws independent weighted rolls
//! and evaluates them in a fixed order. The two are deliberately separate.

mod interactive;
mod offline;

pub(crate) use interactive::pick_destination;
pub use interactive::{decide, Decision, DecisionContext};
pub use offline::{decide_offline, OfflineContext, OfflineDecision};
