use super::attributes::Stats;
use super::job_class::JobClass;
use super::personality::Personality;
use crate::combat::types::CombatStats;
use crate::core::constants::*;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Complete state of one character: the unit of simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub job_class: JobClass,
    pub stats: Stats,
    pub level: u32,
    pub experience: u64,
    pub current_hp: i32,
    pub max_hp: i32,
    pub gold: u64,
    pub location: String,
    #[serde(default)]
    pub discovered_locations: BTreeSet<String>,
    pub personality: Personality,
    #[serde(default)]
    pub active_quest: Option<String>,
}

/// Max HP for a given vitality and level. Saturates at `i32::MAX`.
pub fn max_hp_for(vitality: i32, level: u32) -> i32 {
    let level = i32::try_from(level).unwrap_or(i32::MAX);
    BASE_MAX_HP
        .saturating_add(vitality.saturating_mul(HP_PER_VITALITY))
        .saturating_add(level.saturating_mul(HP_PER_LEVEL))
}

impl Character {
    /// Creates a level 1 character at full health in `location`.
    pub fn new(
        name: impl Into<String>,
        job_class: JobClass,
        personality: Personality,
        location: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        use uuid::Uuid;

        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let location = location.into();
        let stats = job_class.starting_stats();
        let max_hp = max_hp_for(stats.vitality(), 1);

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            job_class,
            stats,
            level: 1,
            experience: 0,
            current_hp: max_hp,
            max_hp,
            gold: STARTING_GOLD,
            discovered_locations: BTreeSet::from([location.clone()]),
            location,
            personality,
            active_quest: None,
        })
    }

    /// Checks the snapshot invariants. Callers handing in snapshots from
    /// storage should call this before simulating.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.level == 0 || self.level > MAX_LEVEL {
            return Err(ValidationError::LevelOutOfRange {
                value: self.level,
                max: MAX_LEVEL,
            });
        }
        if self.current_hp < 0 || self.current_hp > self.max_hp {
            return Err(ValidationError::HpOutOfRange {
                current: self.current_hp,
                max: self.max_hp,
            });
        }
        Ok(())
    }

    pub fn health_fraction(&self) -> f64 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        self.current_hp as f64 / self.max_hp as f64
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn is_full_health(&self) -> bool {
        self.current_hp >= self.max_hp
    }

    /// Recomputes max HP from vitality and level, clamping current HP.
    pub fn recalculate_max_hp(&mut self) {
        self.max_hp = max_hp_for(self.stats.vitality(), self.level);
        self.current_hp = self.current_hp.min(self.max_hp);
    }

    pub fn full_heal(&mut self) {
        self.current_hp = self.max_hp;
    }

    /// Restores up to `amount` HP without exceeding max. Returns HP restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current_hp;
        self.current_hp = self.current_hp.saturating_add(amount.max(0)).min(self.max_hp);
        self.current_hp - before
    }

    /// Removes HP, never dropping below zero. Returns HP actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.current_hp;
        self.current_hp = (self.current_hp - amount.max(0)).max(0);
        before - self.current_hp
    }

    /// Spends gold if affordable. Returns false and changes nothing otherwise.
    pub fn spend_gold(&mut self, amount: u64) -> bool {
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }

    /// Loses up to `amount` gold, flooring at zero. Returns gold actually lost.
    pub fn lose_gold(&mut self, amount: u64) -> u64 {
        let lost = amount.min(self.gold);
        self.gold -= lost;
        lost
    }

    /// Moves to `location`. Returns true if it was not discovered before.
    pub fn travel_to(&mut self, location: &str) -> bool {
        self.location = location.to_string();
        self.discovered_locations.insert(location.to_string())
    }

    pub fn combat_stats(&self) -> CombatStats {
        CombatStats::from_stats(&self.stats)
    }

    /// Applies the death penalty, then respawns in `safe_town` at full
    /// health. Fractions are of current gold and current experience.
    pub fn die_and_respawn(
        &mut self,
        safe_town: &str,
        gold_loss_fraction: f64,
        xp_loss_fraction: f64,
    ) -> DeathPenalty {
        let gold_lost = self.lose_gold((self.gold as f64 * gold_loss_fraction).floor() as u64);
        let xp_lost = (self.experience as f64 * xp_loss_fraction).floor() as u64;
        let xp_lost = xp_lost.min(self.experience);
        self.experience -= xp_lost;
        self.travel_to(safe_town);
        self.full_heal();
        DeathPenalty { gold_lost, xp_lost }
    }
}

/// What a death cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathPenalty {
    pub gold_lost: u64,
    pub xp_lost: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero() -> Character {
        Character::new("Tester", JobClass::Warrior, Personality::balanced(), "Oakvale").unwrap()
    }

    #[test]
    fn test_new_character_invariants() {
        let c = hero();
        assert_eq!(c.level, 1);
        assert_eq!(c.experience, 0);
        // 50 + 8 * 10 + 1 * 5
        assert_eq!(c.max_hp, 135);
        assert_eq!(c.current_hp, c.max_hp);
        assert_eq!(c.gold, STARTING_GOLD);
        assert!(c.discovered_locations.contains("Oakvale"));
        assert!(c.validate().is_ok());
        assert!(!c.id.is_empty());
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = Character::new("  ", JobClass::Mage, Personality::balanced(), "Oakvale");
        assert_eq!(err.unwrap_err(), ValidationError::EmptyName);
    }

    #[test]
    fn test_validate_catches_bad_hp() {
        let mut c = hero();
        c.current_hp = c.max_hp + 1;
        assert!(matches!(
            c.validate(),
            Err(ValidationError::HpOutOfRange { .. })
        ));
        c.current_hp = -1;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_catches_bad_level() {
        let mut c = hero();
        c.level = 0;
        assert!(c.validate().is_err());
        c.level = MAX_LEVEL + 1;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_damage_and_heal_clamp() {
        let mut c = hero();
        assert_eq!(c.take_damage(1000), 135);
        assert_eq!(c.current_hp, 0);
        assert!(!c.is_alive());
        assert_eq!(c.heal(50), 50);
        assert_eq!(c.heal(1000), 85);
        assert!(c.is_full_health());
    }

    #[test]
    fn test_gold_never_negative() {
        let mut c = hero();
        c.gold = 30;
        assert!(!c.spend_gold(31));
        assert_eq!(c.gold, 30);
        assert!(c.spend_gold(30));
        assert_eq!(c.gold, 0);
        c.gold = 10;
        assert_eq!(c.lose_gold(25), 10);
        assert_eq!(c.gold, 0);
    }

    #[test]
    fn test_travel_tracks_discovery() {
        let mut c = hero();
        assert!(c.travel_to("Whispering Woods"));
        assert!(!c.travel_to("Oakvale"));
        assert_eq!(c.location, "Oakvale");
    }

    #[test]
    fn test_die_and_respawn() {
        let mut c = hero();
        c.travel_to("Whispering Woods");
        c.gold = 205;
        c.experience = 99;
        c.current_hp = 0;
        let penalty = c.die_and_respawn("Oakvale", 0.1, 0.1);
        assert_eq!(penalty, DeathPenalty { gold_lost: 20, xp_lost: 9 });
        assert_eq!(c.gold, 185);
        assert_eq!(c.experience, 90);
        assert_eq!(c.location, "Oakvale");
        assert!(c.is_full_health());
    }

    #[test]
    fn test_huge_vitality_saturates() {
        assert_eq!(max_hp_for(i32::MAX, 1), i32::MAX);
        assert_eq!(max_hp_for(300_000_000, MAX_LEVEL), i32::MAX);

        let mut c = hero();
        c.stats = Stats::new(5, 5, 5, 5, 5, i32::MAX).unwrap();
        c.recalculate_max_hp();
        assert_eq!(c.max_hp, i32::MAX);
        c.current_hp = i32::MAX - 10;
        assert_eq!(c.heal(1000), 10);
    }

    #[test]
    fn test_recalculate_max_hp() {
        let mut c = hero();
        c.level = 3;
        c.recalculate_max_hp();
        assert_eq!(c.max_hp, 50 + 80 + 15);
    }

    #[test]
    fn test_serde_round_trip_validates_traits() {
        let c = hero();
        let json = serde_json::to_string(&c).unwrap();
        let back: Character = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);

        let tampered = json.replace("\"courage\":0.5", "\"courage\":1.5");
        assert!(serde_json::from_str::<Character>(&tampered).is_err());
    }
}
