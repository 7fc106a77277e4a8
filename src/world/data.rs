//! The built-in world map.

use super::{Location, LocationKind, WorldData};
use crate::core::constants::MAX_LEVEL;

pub const DEFAULT_SAFE_TOWN: &str = "Oakvale";

/// An in-memory world. `StaticWorld::default()` is the standard map.
#[derive(Debug, Clone)]
pub struct StaticWorld {
    locations: Vec<Location>,
    safe_town: String,
}

fn town(name: &str, inn_cost: u64, quest: Option<&str>, neighbors: &[&str]) -> Location {
    Location {
        name: name.to_string(),
        kind: LocationKind::Town,
        min_level: 1,
        max_level: MAX_LEVEL,
        inn_cost: Some(inn_cost),
        has_shop: true,
        quest: quest.map(str::to_string),
        neighbors: neighbors.iter().map(|n| n.to_string()).collect(),
    }
}

fn wild(
    name: &str,
    kind: LocationKind,
    min_level: u32,
    max_level: u32,
    neighbors: &[&str],
) -> Location {
    Location {
        name: name.to_string(),
        kind,
        min_level,
        max_level,
        inn_cost: None,
        has_shop: false,
        quest: None,
        neighbors: neighbors.iter().map(|n| n.to_string()).collect(),
    }
}

impl StaticWorld {
    /// Builds a world from explicit locations. `safe_town` should name one of
    /// them; the simulator checks this before running.
    pub fn new(locations: Vec<Location>, safe_town: impl Into<String>) -> Self {
        Self {
            locations,
            safe_town: safe_town.into(),
        }
    }
}

impl Default for StaticWorld {
    fn default() -> Self {
        use LocationKind::*;

        let locations = vec![
            town(
                DEFAULT_SAFE_TOWN,
                10,
                Some("Clear the Rat Cellar"),
                &["Misty Meadows", "Whispering Woods"],
            ),
            wild("Misty Meadows", Wilderness, 1, 5, &["Oakvale", "Whispering Woods"]),
            wild(
                "Whispering Woods",
                Wilderness,
                4,
                10,
                &["Oakvale", "Misty Meadows", "Riverbend", "Goblin Warrens"],
            ),
            wild("Goblin Warrens", Dungeon, 7, 15, &["Whispering Woods"]),
            town(
                "Riverbend",
                25,
                Some("Escort the Ferryman"),
                &["Whispering Woods", "Stormcrag Hills", "Sunken Crypt"],
            ),
            wild("Stormcrag Hills", Wilderness, 12, 22, &["Riverbend", "Ember Wastes"]),
            wild("Sunken Crypt", Dungeon, 18, 28, &["Riverbend"]),
            wild(
                "Ember Wastes",
                Wilderness,
                25,
                38,
                &["Stormcrag Hills", "Frostpeak Hold", "Dragonspire"],
            ),
            town(
                "Frostpeak Hold",
                60,
                Some("Break the Siege"),
                &["Ember Wastes", "Dragonspire"],
            ),
            wild("Dragonspire", Dungeon, 38, MAX_LEVEL, &["Ember Wastes", "Frostpeak Hold"]),
        ];

        Self::new(locations, DEFAULT_SAFE_TOWN)
    }
}

impl WorldData for StaticWorld {
    fn location(&self, name: &str) -> Option<&Location> {
        self.locations.iter().find(|loc| loc.name == name)
    }

    fn locations(&self) -> &[Location] {
        &self.locations
    }

    fn safe_town(&self) -> &str {
        &self.safe_town
    }
}
