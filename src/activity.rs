//! The activity log record produced by every executed decision.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Combat,
    Exploration,
    Rest,
    LevelUp,
    Death,
    Social,
    Flee,
    ReturnToTown,
    Quest,
    Shopping,
    Idle,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    pub xp: u64,
    pub gold: u64,
    #[serde(default)]
    pub items: Vec<String>,
}

impl Rewards {
    pub fn is_empty(&self) -> bool {
        self.xp == 0 && self.gold == 0 && self.items.is_empty()
    }
}

/// An immutable log entry. Build with [`Activity::new`] and the `with_*`
/// helpers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub character_id: String,
    pub timestamp: DateTime<Utc>,
    pub activity_type: ActivityType,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewards: Option<Rewards>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
    pub is_major_event: bool,
}

impl Activity {
    pub fn new(
        character_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        activity_type: ActivityType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            character_id: character_id.into(),
            timestamp,
            activity_type,
            description: description.into(),
            rewards: None,
            metadata: BTreeMap::new(),
            is_major_event: false,
        }
    }

    /// Attaches rewards. Empty rewards are dropped.
    pub fn with_rewards(mut self, rewards: Rewards) -> Self {
        self.rewards = (!rewards.is_empty()).then_some(rewards);
        self
    }

    pub fn with_meta(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    pub fn major(mut self) -> Self {
        self.is_major_event = true;
        self
    }

    pub fn major_if(mut self, major: bool) -> Self {
        self.is_major_event |= major;
        self
    }
}
