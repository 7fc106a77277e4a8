//! The live-play tick: one `decide` + execute cycle.
//!
//! An external scheduler calls [`live_tick`] periodically while the player is
//! watching. Each call picks a [`Decision`], applies it to the character, runs
//! full-heal level ups, and returns the activities it produced so the caller
//! can append them to the log.

use crate::activity::{Activity, ActivityType, Rewards};
use crate::character::Character;
use crate::combat::batch::roll_loot_name;
use crate::combat::logic::execute_encounter;
use crate::combat::types::generate_enemy_in_range;
use crate::core::constants::*;
use crate::core::progression::{apply_level_ups, LevelUp, LevelUpMode};
use crate::core::random::RandomSource;
use crate::decision::{decide, Decision, DecisionContext};
use crate::world::WorldData;
use chrono::{DateTime, Utc};

/// Everything one live tick did.
#[derive(Debug, Clone)]
pub struct TickResult {
    pub decision: Decision,
    pub activities: Vec<Activity>,
    pub level_ups: Vec<LevelUp>,
    pub died: bool,
}

/// Runs one live-play cycle against `character`.
pub fn live_tick(
    character: &mut Character,
    world: &impl WorldData,
    now: DateTime<Utc>,
    rng: &mut impl RandomSource,
) -> TickResult {
    let context = DecisionContext::from_world(world, character);
    let decision = decide(character, &context, rng);
    log::debug!("{} decided {}", character.name, decision.label());

    let mut activities = Vec::new();
    let mut died = false;

    let character_id = character.id.clone();
    let entry = |kind: ActivityType, description: String| {
        Activity::new(character_id.clone(), now, kind, description)
    };

    match &decision {
        Decision::Rest { reason } => {
            let amount = (character.max_hp as f64 * REST_HEAL_FRACTION).ceil() as i32;
            let restored = character.heal(amount);
            activities.push(
                entry(
                    ActivityType::Rest,
                    format!("{} rests ({}) and recovers {} HP", character.name, reason, restored),
                )
                .with_meta("hp_restored", restored),
            );
        }
        Decision::HealAtInn { location, cost } => {
            if character.spend_gold(*cost) {
                let restored = character.max_hp - character.current_hp;
                character.full_heal();
                activities.push(
                    entry(
                        ActivityType::Rest,
                        format!(
                            "{} pays {} gold for a room at the {} inn",
                            character.name, cost, location
                        ),
                    )
                    .with_meta("hp_restored", restored)
                    .with_meta("gold_spent", *cost),
                );
            } else {
                let amount = (character.max_hp as f64 * REST_HEAL_FRACTION).ceil() as i32;
                let restored = character.heal(amount);
                activities.push(
                    entry(
                        ActivityType::Rest,
                        format!("{} cannot afford the inn and rests outside", character.name),
                    )
                    .with_meta("hp_restored", restored),
                );
            }
        }
        Decision::Explore { destination, .. } => {
            let discovered = character.travel_to(destination);
            let description = if discovered {
                format!("{} discovers {}", character.name, destination)
            } else {
                format!("{} travels to {}", character.name, destination)
            };
            activities.push(
                entry(ActivityType::Exploration, description)
                    .with_meta("location", destination.as_str())
                    .major_if(discovered),
            );
        }
        Decision::Combat { location, .. } => {
            if character.location != *location {
                character.travel_to(location);
            }
            let (low, high) = world.enemy_level_range(location, character.level);
            let enemy = generate_enemy_in_range(low, high, rng);
            let result = execute_encounter(character, &enemy, rng);

            character.current_hp = result.character_hp.clamp(0, character.max_hp);
            character.experience += result.xp_gained;
            character.gold = character.gold.saturating_add(result.gold_gained);

            let boss = enemy.is_boss_tier_for(character.level);
            activities.push(
                entry(ActivityType::Combat, result.description.clone())
                    .with_rewards(Rewards {
                        xp: result.xp_gained,
                        gold: result.gold_gained,
                        items: Vec::new(),
                    })
                    .with_meta("enemy", enemy.name.as_str())
                    .with_meta("enemy_level", enemy.level)
                    .with_meta("rounds", result.rounds_fought)
                    .with_meta("round_cap_reached", result.round_cap_reached)
                    .major_if(boss && result.is_victory()),
            );

            if !character.is_alive() {
                died = true;
                let town = world.safe_town().to_string();
                let penalty = character.die_and_respawn(
                    &town,
                    DEATH_GOLD_LOSS_FRACTION,
                    DEATH_XP_LOSS_FRACTION,
                );
                log::info!(
                    "{} died to {} and respawned in {}",
                    character.name,
                    enemy.name,
                    town
                );
                activities.push(
                    entry(
                        ActivityType::Death,
                        format!(
                            "{} fell to {} and woke in {}, {} gold poorer",
                            character.name, enemy.name, town, penalty.gold_lost
                        ),
                    )
                    .with_meta("gold_lost", penalty.gold_lost)
                    .with_meta("xp_lost", penalty.xp_lost)
                    .major(),
                );
            }
        }
        Decision::Flee { destination, .. } => {
            character.travel_to(destination);
            activities.push(entry(
                ActivityType::Flee,
                format!("{} flees to {}", character.name, destination),
            ));
        }
        Decision::AcceptQuest { quest } => {
            character.active_quest = Some(quest.clone());
            activities.push(
                entry(
                    ActivityType::Quest,
                    format!("{} accepts the quest \"{}\"", character.name, quest),
                )
                .with_meta("quest", quest.as_str()),
            );
        }
        Decision::ContinueQuest { quest } => {
            if rng.chance(QUEST_COMPLETION_CHANCE) {
                let level = character.level as u64;
                let rewards = Rewards {
                    xp: level * QUEST_XP_REWARD_PER_LEVEL,
                    gold: level * QUEST_GOLD_REWARD_PER_LEVEL,
                    items: Vec::new(),
                };
                character.experience += rewards.xp;
                character.gold = character.gold.saturating_add(rewards.gold);
                character.active_quest = None;
                activities.push(
                    entry(
                        ActivityType::Quest,
                        format!("{} completes \"{}\"", character.name, quest),
                    )
                    .with_rewards(rewards)
                    .with_meta("quest", quest.as_str())
                    .major(),
                );
            } else {
                activities.push(
                    entry(
                        ActivityType::Quest,
                        format!("{} works on \"{}\"", character.name, quest),
                    )
                    .with_meta("quest", quest.as_str()),
                );
            }
        }
        Decision::Shop { location } => {
            let budget = (character.gold as f64 * SHOP_SPEND_FRACTION).floor() as u64;
            let item = roll_loot_name(character.level, rng);
            character.spend_gold(budget);
            activities.push(
                entry(
                    ActivityType::Shopping,
                    format!(
                        "{} buys a {} in {} for {} gold",
                        character.name, item, location, budget
                    ),
                )
                .with_meta("gold_spent", budget)
                .with_meta("item", item),
            );
        }
        Decision::Idle { reason } => {
            let in_town = world
                .location(&character.location)
                .is_some_and(|loc| loc.is_town());
            let activity = if in_town && character.personality.social() >= 0.5 {
                entry(
                    ActivityType::Social,
                    format!("{} trades stories with the locals", character.name),
                )
            } else {
                entry(
                    ActivityType::Idle,
                    format!("{} idles ({})", character.name, reason),
                )
            };
            activities.push(activity);
        }
    }

    let level_ups = apply_level_ups(character, LevelUpMode::FullHeal);
    for up in &level_ups {
        activities.push(
            entry(ActivityType::LevelUp, up.describe(&character.name))
                .with_meta("level", up.new_level)
                .major(),
        );
    }

    TickResult {
        decision,
        activities,
        level_ups,
        died,
    }
}
