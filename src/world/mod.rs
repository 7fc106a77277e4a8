//! World data: the locations a character can travel between.
//!
//! The decision engine and simulator only see the world through the
//! [`WorldData`] trait. [`StaticWorld`] is the built-in map.

mod data;

pub use data::{StaticWorld, DEFAULT_SAFE_TOWN};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Town,
    Wilderness,
    Dungeon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub kind: LocationKind,
    /// Enemy level band. Towns span every level.
    pub min_level: u32,
    pub max_level: u32,
    /// Inn price for a full heal, if the location has an inn.
    pub inn_cost: Option<u64>,
    pub has_shop: bool,
    /// Quest posted on the location's notice board.
    pub quest: Option<String>,
    pub neighbors: Vec<String>,
}

impl Location {
    pub fn is_town(&self) -> bool {
        self.kind == LocationKind::Town
    }

    /// Resting in the open is not possible inside dungeons.
    pub fn allows_rest(&self) -> bool {
        self.kind != LocationKind::Dungeon
    }

    pub fn contains_level(&self, level: u32) -> bool {
        (self.min_level..=self.max_level).contains(&level)
    }

    /// Distance from `level` to this location's level band. Zero inside it.
    pub fn level_distance(&self, level: u32) -> u32 {
        if self.contains_level(level) {
            0
        } else {
            self.min_level
                .abs_diff(level)
                .min(self.max_level.abs_diff(level))
        }
    }
}

/// Read-only access to world data.
pub trait WorldData {
    fn location(&self, name: &str) -> Option<&Location>;

    fn locations(&self) -> &[Location];

    /// Where characters respawn and where offline runs end up healing.
    fn safe_town(&self) -> &str;

    fn neighbors(&self, name: &str) -> Vec<&str> {
        self.location(name)
            .map(|loc| loc.neighbors.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Best non-town location for a character of `level`: one whose band
    /// contains the level, otherwise the closest band. Falls back to the
    /// safe town when the world has no hunting grounds at all.
    fn hunting_location_for(&self, level: u32) -> &str {
        self.locations()
            .iter()
            .filter(|loc| !loc.is_town())
            .min_by_key(|loc| (loc.level_distance(level), loc.min_level))
            .map(|loc| loc.name.as_str())
            .unwrap_or_else(|| self.safe_town())
    }

    /// Inclusive enemy level range for a fight at `location`: within two
    /// levels of the character, clamped into the location's band.
    fn enemy_level_range(&self, location: &str, character_level: u32) -> (u32, u32) {
        let low = character_level.saturating_sub(2).max(1);
        let high = character_level + 2;
        match self.location(location) {
            Some(loc) if !loc.is_town() => {
                let clamped_low = low.clamp(loc.min_level, loc.max_level);
                let clamped_high = high.clamp(loc.min_level, loc.max_level);
                (clamped_low, clamped_high.max(clamped_low))
            }
            _ => (low, character_level.max(1)),
        }
    }
}
