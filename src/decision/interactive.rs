use crate::character::Character;
use crate::core::constants::*;
use crate::core::random::RandomSource;
use crate::world::WorldData;
use serde::{Deserialize, Serialize};

/// One action chosen for live play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Decision {
    Rest { reason: String },
    HealAtInn { location: String, cost: u64 },
    Explore { destination: String, reason: String },
    Combat { location: String, reason: String },
    Flee { destination: String, reason: String },
    AcceptQuest { quest: String },
    ContinueQuest { quest: String },
    Shop { location: String },
    Idle { reason: String },
}

impl Decision {
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Rest { .. } => "rest",
            Decision::HealAtInn { .. } => "heal_at_inn",
            Decision::Explore { .. } => "explore",
            Decision::Combat { .. } => "combat",
            Decision::Flee { .. } => "flee",
            Decision::AcceptQuest { .. } => "accept_quest",
            Decision::ContinueQuest { .. } => "continue_quest",
            Decision::Shop { .. } => "shop",
            Decision::Idle { .. } => "idle",
        }
    }
}

/// What the character can see and do from where it stands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionContext {
    /// Inn price at the current location, if there is an inn.
    pub inn_cost: Option<u64>,
    pub can_rest: bool,
    pub in_town: bool,
    pub has_shop: bool,
    pub nearby_locations: Vec<String>,
    pub hunting_location: String,
    pub safe_town: String,
    pub offered_quest: Option<String>,
}

impl DecisionContext {
    /// Reads the context for `character`'s current location. Unknown
    /// locations behave like open wilderness with no exits.
    pub fn from_world(world: &impl WorldData, character: &Character) -> Self {
        let here = world.location(&character.location);
        Self {
            inn_cost: here.and_then(|loc| loc.inn_cost),
            can_rest: here.map_or(true, |loc| loc.allows_rest()),
            in_town: here.is_some_and(|loc| loc.is_town()),
            has_shop: here.is_some_and(|loc| loc.has_shop),
            nearby_locations: world
                .neighbors(&character.location)
                .into_iter()
                .map(str::to_string)
                .collect(),
            hunting_location: world.hunting_location_for(character.level).to_string(),
            safe_town: world.safe_town().to_string(),
            offered_quest: here.and_then(|loc| loc.quest.clone()),
        }
    }

    fn affordable_inn(&self, gold: u64) -> Option<u64> {
        self.inn_cost.filter(|cost| gold >= *cost)
    }
}

/// Picks the next live-play action. The first matching tier wins.
pub fn decide(
    character: &Character,
    context: &DecisionContext,
    rng: &mut impl RandomSource,
) -> Decision {
    let hp = character.health_fraction();

    if hp < SURVIVAL_HP_FRACTION {
        if let Some(cost) = context.affordable_inn(character.gold) {
            return Decision::HealAtInn {
                location: character.location.clone(),
                cost,
            };
        }
        if context.can_rest {
            return Decision::Rest {
                reason: "badly wounded".to_string(),
            };
        }
        return Decision::Flee {
            destination: context.safe_town.clone(),
            reason: "badly wounded with nowhere to rest".to_string(),
        };
    }

    if hp < CRITICAL_NEEDS_HP_FRACTION {
        if context.can_rest {
            return Decision::Rest {
                reason: "recovering".to_string(),
            };
        }
        if let Some(cost) = context.affordable_inn(character.gold) {
            return Decision::HealAtInn {
                location: character.location.clone(),
                cost,
            };
        }
        return Decision::Flee {
            destination: context.safe_town.clone(),
            reason: "wounded with nowhere to recover".to_string(),
        };
    }

    if character.gold < LOW_GOLD_THRESHOLD {
        if character.location == context.hunting_location {
            return Decision::Combat {
                location: character.location.clone(),
                reason: "low on gold".to_string(),
            };
        }
        return Decision::Explore {
            destination: context.hunting_location.clone(),
            reason: "heading out to earn gold".to_string(),
        };
    }

    if let Some(quest) = &character.active_quest {
        return Decision::ContinueQuest {
            quest: quest.clone(),
        };
    }

    let personality = &character.personality;

    if !context.nearby_locations.is_empty()
        && rng.chance(personality.curiosity() * EXPLORE_CHANCE_PER_CURIOSITY)
    {
        return Decision::Explore {
            destination: pick_destination(character, &context.nearby_locations, rng),
            reason: "curious".to_string(),
        };
    }

    if rng.chance(personality.aggression() * COMBAT_CHANCE_PER_AGGRESSION) {
        let location = if context.in_town {
            context.hunting_location.clone()
        } else {
            character.location.clone()
        };
        return Decision::Combat {
            location,
            reason: "looking for a fight".to_string(),
        };
    }

    if context.has_shop
        && character.gold >= SHOP_GOLD_FLOOR
        && rng.chance(personality.greed() * SHOP_CHANCE_PER_GREED)
    {
        return Decision::Shop {
            location: character.location.clone(),
        };
    }

    if let Some(quest) = &context.offered_quest {
        if rng.chance(personality.courage() * QUEST_CHANCE_PER_COURAGE) {
            return Decision::AcceptQuest {
                quest: quest.clone(),
            };
        }
    }

    Decision::Idle {
        reason: "nothing pressing".to_string(),
    }
}

/// Prefers neighbors the character has not seen yet.
pub(crate) fn pick_destination(
    character: &Character,
    nearby: &[String],
    rng: &mut impl RandomSource,
) -> String {
    let undiscovered: Vec<&String> = nearby
        .iter()
        .filter(|name| !character.discovered_locations.contains(*name))
        .collect();
    let pool: Vec<&String> = if undiscovered.is_empty() {
        nearby.iter().collect()
    } else {
        undiscovered
    };
    rng.pick_index(pool.len())
        .map(|i| pool[i].clone())
        .unwrap_or_else(|| character.location.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{JobClass, Personality};
    use crate::core::random::ScriptedRandom;
    use crate::world::StaticWorld;

    fn character(hp: i32, max_hp: i32, gold: u64) -> Character {
        let mut c =
            Character::new("Aria", JobClass::Warrior, Personality::balanced(), "Oakvale").unwrap();
        c.max_hp = max_hp;
        c.current_hp = hp;
        c.gold = gold;
        c
    }

    fn town_context(inn_cost: u64) -> DecisionContext {
        DecisionContext {
            inn_cost: Some(inn_cost),
            can_rest: true,
            in_town: true,
            has_shop: true,
            nearby_locations: vec!["Misty Meadows".into()],
            hunting_location: "Misty Meadows".into(),
            safe_town: "Oakvale".into(),
            offered_quest: Some("Clear the Rat Cellar".into()),
        }
    }

    #[test]
    fn test_survival_heals_at_affordable_inn() {
        let c = character(20, 100, 100);
        let mut rng = ScriptedRandom::new();
        assert_eq!(
            decide(&c, &town_context(10), &mut rng),
            Decision::HealAtInn {
                location: "Oakvale".into(),
                cost: 10
            }
        );
    }

    #[test]
    fn test_survival_rests_when_inn_unaffordable() {
        let c = character(25, 100, 5);
        let mut rng = ScriptedRandom::new();
        assert!(matches!(
            decide(&c, &town_context(10), &mut rng),
            Decision::Rest { .. }
        ));
    }

    #[test]
    fn test_survival_flees_when_rest_forbidden() {
        let c = character(10, 100, 0);
        let context = DecisionContext {
            inn_cost: None,
            can_rest: false,
            in_town: false,
            ..town_context(10)
        };
        let mut rng = ScriptedRandom::new();
        assert_eq!(
            decide(&c, &context, &mut rng),
            Decision::Flee {
                destination: "Oakvale".into(),
                reason: "badly wounded with nowhere to rest".into()
            }
        );
    }

    #[test]
    fn test_critical_needs_prefers_rest_over_inn() {
        let c = character(50, 100, 500);
        let mut rng = ScriptedRandom::new();
        assert!(matches!(
            decide(&c, &town_context(10), &mut rng),
            Decision::Rest { .. }
        ));
    }

    #[test]
    fn test_critical_needs_uses_inn_when_rest_forbidden() {
        let c = character(50, 100, 500);
        let context = DecisionContext {
            can_rest: false,
            ..town_context(10)
        };
        let mut rng = ScriptedRandom::new();
        assert!(matches!(
            decide(&c, &context, &mut rng),
            Decision::HealAtInn { cost: 10, .. }
        ));
    }

    #[test]
    fn test_critical_needs_flees_when_no_recovery_available() {
        let mut c = character(45, 100, 500);
        c.personality = Personality::new(0.5, 0.5, 0.5, 1.0, 0.5, 0.5).unwrap();
        let context = DecisionContext {
            inn_cost: None,
            can_rest: false,
            in_town: false,
            has_shop: false,
            offered_quest: None,
            ..town_context(10)
        };
        // would pick combat if the idle tier were reached
        let mut rng = ScriptedRandom::new().with_floats([0.9, 0.0]);
        assert_eq!(
            decide(&c, &context, &mut rng),
            Decision::Flee {
                destination: "Oakvale".into(),
                reason: "wounded with nowhere to recover".into()
            }
        );
        assert_eq!(rng.remaining_floats(), 2);
    }

    #[test]
    fn test_low_gold_heads_to_hunting_ground() {
        let mut c = character(100, 100, 10);
        let mut rng = ScriptedRandom::new();
        assert_eq!(
            decide(&c, &town_context(10), &mut rng),
            Decision::Explore {
                destination: "Misty Meadows".into(),
                reason: "heading out to earn gold".into()
            }
        );

        c.location = "Misty Meadows".into();
        assert!(matches!(
            decide(&c, &town_context(10), &mut rng),
            Decision::Combat { .. }
        ));
    }

    #[test]
    fn test_active_quest_continues() {
        let mut c = character(100, 100, 200);
        c.active_quest = Some("Escort the Ferryman".into());
        let mut rng = ScriptedRandom::new();
        assert_eq!(
            decide(&c, &town_context(10), &mut rng),
            Decision::ContinueQuest {
                quest: "Escort the Ferryman".into()
            }
        );
    }

    #[test]
    fn test_curiosity_drives_exploration() {
        let c = character(100, 100, 200);
        let mut rng = ScriptedRandom::new().with_floats([0.1]).with_ints([0]);
        assert!(matches!(
            decide(&c, &town_context(10), &mut rng),
            Decision::Explore { ref destination, .. } if destination == "Misty Meadows"
        ));
    }

    #[test]
    fn test_no_neighbors_suppresses_exploration() {
        let mut c = character(100, 100, 200);
        c.personality = Personality::new(0.0, 0.0, 1.0, 0.0, 0.0, 0.0).unwrap();
        let context = DecisionContext {
            nearby_locations: vec![],
            offered_quest: None,
            ..town_context(10)
        };
        // every roll would pass if it were taken
        let mut rng = ScriptedRandom::new().with_floats([0.0, 0.0, 0.0]);
        assert!(matches!(
            decide(&c, &context, &mut rng),
            Decision::Idle { .. }
        ));
    }

    #[test]
    fn test_aggression_in_town_fights_at_hunting_ground() {
        let c = character(100, 100, 200);
        // explore fails, combat passes
        let mut rng = ScriptedRandom::new().with_floats([0.9, 0.1]);
        assert_eq!(
            decide(&c, &town_context(10), &mut rng),
            Decision::Combat {
                location: "Misty Meadows".into(),
                reason: "looking for a fight".into()
            }
        );
    }

    #[test]
    fn test_greed_shops_above_gold_floor() {
        let c = character(100, 100, 200);
        let mut rng = ScriptedRandom::new().with_floats([0.9, 0.9, 0.1]);
        assert!(matches!(
            decide(&c, &town_context(10), &mut rng),
            Decision::Shop { .. }
        ));
    }

    #[test]
    fn test_courage_accepts_offered_quest() {
        let c = character(100, 100, 200);
        let mut rng = ScriptedRandom::new().with_floats([0.9, 0.9, 0.9, 0.1]);
        assert_eq!(
            decide(&c, &town_context(10), &mut rng),
            Decision::AcceptQuest {
                quest: "Clear the Rat Cellar".into()
            }
        );
    }

    #[test]
    fn test_passive_character_idles() {
        let mut c = character(100, 100, 200);
        c.personality = Personality::passive();
        let mut rng = ScriptedRandom::new().with_floats([0.0, 0.0, 0.0, 0.0]);
        assert!(matches!(
            decide(&c, &town_context(10), &mut rng),
            Decision::Idle { .. }
        ));
    }

    #[test]
    fn test_context_from_world() {
        let world = StaticWorld::default();
        let c = character(100, 100, 200);
        let context = DecisionContext::from_world(&world, &c);
        assert_eq!(context.inn_cost, Some(10));
        assert!(context.in_town && context.can_rest && context.has_shop);
        assert_eq!(context.hunting_location, "Misty Meadows");
        assert_eq!(context.nearby_locations.len(), 2);
    }

    #[test]
    fn test_pick_destination_prefers_undiscovered() {
        let c = character(100, 100, 200);
        let nearby = vec!["Oakvale".to_string(), "Whispering Woods".to_string()];
        let mut rng = ScriptedRandom::new().with_ints([0]);
        assert_eq!(pick_destination(&c, &nearby, &mut rng), "Whispering Woods");
    }
}
