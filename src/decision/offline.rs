use crate::character::Character;
use crate::core::constants::*;
use crate::core::random::RandomSource;
use crate::world::WorldData;
use serde::{Deserialize, Serialize};

/// One action chosen by the offline simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfflineDecision {
    Rest,
    Explore,
    Combat,
    Flee,
    ReturnToTown,
}

impl OfflineDecision {
    pub fn label(&self) -> &'static str {
        match self {
            OfflineDecision::Rest => "rest",
            OfflineDecision::Explore => "explore",
            OfflineDecision::Combat => "combat",
            OfflineDecision::Flee => "flee",
            OfflineDecision::ReturnToTown => "return_to_town",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfflineContext {
    pub in_town: bool,
    /// False inside dungeons. Unknown locations allow rest.
    pub can_rest: bool,
    pub has_neighbors: bool,
}

impl OfflineContext {
    pub fn from_world(world: &impl WorldData, character: &Character) -> Self {
        let here = world.location(&character.location);
        Self {
            in_town: here.is_some_and(|loc| loc.is_town()),
            can_rest: here.map_or(true, |loc| loc.allows_rest()),
            has_neighbors: !world.neighbors(&character.location).is_empty(),
        }
    }
}

/// Combat chance for the weighted tier: aggression, nudged up or down by
/// courage around 0.5, clamped to a probability.
pub fn offline_combat_chance(character: &Character) -> f64 {
    let p = &character.personality;
    (p.aggression() * OFFLINE_COMBAT_CHANCE_PER_AGGRESSION
        + (p.courage() - 0.5) * OFFLINE_COURAGE_COMBAT_ADJUSTMENT)
        .clamp(0.0, 1.0)
}

fn rest_or_flee(context: &OfflineContext) -> OfflineDecision {
    if context.can_rest {
        OfflineDecision::Rest
    } else {
        OfflineDecision::Flee
    }
}

/// Picks the next offline action.
///
/// Survival and critical needs short-circuit. Past those, both the explore
/// roll and the combat roll are drawn every time and then checked in order.
pub fn decide_offline(
    character: &Character,
    context: &OfflineContext,
    rng: &mut impl RandomSource,
) -> OfflineDecision {
    let hp = character.health_fraction();

    if hp < OFFLINE_EMERGENCY_HP_FRACTION {
        return if context.in_town {
            OfflineDecision::Rest
        } else {
            OfflineDecision::ReturnToTown
        };
    }
    if hp < SURVIVAL_HP_FRACTION {
        return if context.in_town {
            OfflineDecision::Rest
        } else {
            OfflineDecision::Flee
        };
    }

    if hp < CRITICAL_NEEDS_HP_FRACTION {
        return rest_or_flee(context);
    }
    if character.gold < LOW_GOLD_THRESHOLD {
        return OfflineDecision::Combat;
    }

    let explore_roll = rng.next_f64();
    let combat_roll = rng.next_f64();
    let explore_chance = character.personality.curiosity() * OFFLINE_EXPLORE_CHANCE_PER_CURIOSITY;

    if context.has_neighbors && explore_roll < explore_chance {
        OfflineDecision::Explore
    } else if combat_roll < offline_combat_chance(character) {
        OfflineDecision::Combat
    } else if hp < OFFLINE_REST_HP_FRACTION {
        rest_or_flee(context)
    } else {
        OfflineDecision::Explore
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{JobClass, Personality};
    use crate::core::random::ScriptedRandom;

    fn character(hp: i32, gold: u64) -> Character {
        let mut c =
            Character::new("Aria", JobClass::Ranger, Personality::balanced(), "Misty Meadows")
                .unwrap();
        c.max_hp = 100;
        c.current_hp = hp;
        c.gold = gold;
        c
    }

    const FIELD: OfflineContext = OfflineContext {
        in_town: false,
        can_rest: true,
        has_neighbors: true,
    };
    const TOWN: OfflineContext = OfflineContext {
        in_town: true,
        can_rest: true,
        has_neighbors: true,
    };
    const DUNGEON: OfflineContext = OfflineContext {
        in_town: false,
        can_rest: false,
        has_neighbors: true,
    };

    #[test]
    fn test_emergency_returns_to_town() {
        let mut rng = ScriptedRandom::new();
        assert_eq!(
            decide_offline(&character(10, 500), &FIELD, &mut rng),
            OfflineDecision::ReturnToTown
        );
        assert_eq!(
            decide_offline(&character(10, 500), &TOWN, &mut rng),
            OfflineDecision::Rest
        );
    }

    #[test]
    fn test_survival_flees() {
        let mut rng = ScriptedRandom::new();
        assert_eq!(
            decide_offline(&character(20, 500), &FIELD, &mut rng),
            OfflineDecision::Flee
        );
        assert_eq!(
            decide_offline(&character(20, 500), &TOWN, &mut rng),
            OfflineDecision::Rest
        );
    }

    #[test]
    fn test_critical_needs() {
        let mut rng = ScriptedRandom::new();
        assert_eq!(
            decide_offline(&character(45, 500), &FIELD, &mut rng),
            OfflineDecision::Rest
        );
        assert_eq!(
            decide_offline(&character(90, 10), &FIELD, &mut rng),
            OfflineDecision::Combat
        );
    }

    #[test]
    fn test_weighted_tier_draws_both_rolls() {
        // explore passes (0.1 < 0.2); combat roll is still consumed
        let mut rng = ScriptedRandom::new().with_floats([0.1, 0.0]);
        assert_eq!(
            decide_offline(&character(90, 500), &FIELD, &mut rng),
            OfflineDecision::Explore
        );
        assert_eq!(rng.remaining_floats(), 0);
    }

    #[test]
    fn test_weighted_tier_combat_then_rest_then_explore() {
        let mut rng = ScriptedRandom::new().with_floats([0.9, 0.1]);
        assert_eq!(
            decide_offline(&character(90, 500), &FIELD, &mut rng),
            OfflineDecision::Combat
        );

        let mut rng = ScriptedRandom::new().with_floats([0.9, 0.9]);
        assert_eq!(
            decide_offline(&character(65, 500), &FIELD, &mut rng),
            OfflineDecision::Rest
        );

        let mut rng = ScriptedRandom::new().with_floats([0.9, 0.9]);
        assert_eq!(
            decide_offline(&character(90, 500), &FIELD, &mut rng),
            OfflineDecision::Explore
        );
    }

    #[test]
    fn test_no_neighbors_skips_explore_roll_outcome() {
        let isolated = OfflineContext {
            in_town: false,
            can_rest: true,
            has_neighbors: false,
        };
        let mut rng = ScriptedRandom::new().with_floats([0.0, 0.9]);
        assert_eq!(
            decide_offline(&character(65, 500), &isolated, &mut rng),
            OfflineDecision::Rest
        );
    }

    #[test]
    fn test_dungeon_flees_instead_of_resting() {
        let mut rng = ScriptedRandom::new().with_floats([0.9, 0.9]);
        assert_eq!(
            decide_offline(&character(45, 500), &DUNGEON, &mut rng),
            OfflineDecision::Flee
        );
        assert_eq!(
            decide_offline(&character(65, 500), &DUNGEON, &mut rng),
            OfflineDecision::Flee
        );
        assert_eq!(rng.remaining_floats(), 0);
    }

    #[test]
    fn test_context_reads_rest_rule_from_world() {
        let world = crate::world::StaticWorld::default();
        let mut c = character(90, 500);
        assert!(OfflineContext::from_world(&world, &c).can_rest);
        c.location = "Sunken Crypt".into();
        let ctx = OfflineContext::from_world(&world, &c);
        assert!(!ctx.can_rest && !ctx.in_town && ctx.has_neighbors);
    }

    #[test]
    fn test_courage_adjusts_combat_chance() {
        let mut c = character(90, 500);
        assert!((offline_combat_chance(&c) - 0.25).abs() < 1e-9);
        c.personality = Personality::new(1.0, 0.5, 0.5, 1.0, 0.5, 0.5).unwrap();
        assert!((offline_combat_chance(&c) - 0.6).abs() < 1e-9);
        c.personality = Personality::new(0.0, 0.5, 0.5, 0.0, 0.5, 0.5).unwrap();
        assert_eq!(offline_combat_chance(&c), 0.0);
    }
}
