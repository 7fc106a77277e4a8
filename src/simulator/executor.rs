//! Executes one offline decision against the working character.

use super::config::{MinuteRange, SimConfig};
use super::report::SimulationSummary;
use crate::activity::{Activity, ActivityType, Rewards};
use crate::character::Character;
use crate::combat::batch::resolve_probabilistic_combat;
use crate::combat::types::generate_enemy_in_range;
use crate::core::constants::*;
use crate::core::random::RandomSource;
use crate::decision::OfflineDecision;
use crate::world::WorldData;
use chrono::{DateTime, Utc};

/// Game minutes `decision` takes, drawn from its configured range.
pub fn duration_for(
    decision: OfflineDecision,
    config: &SimConfig,
    rng: &mut impl RandomSource,
) -> u32 {
    let range: MinuteRange = match decision {
        OfflineDecision::Rest => config.rest_minutes,
        OfflineDecision::Combat => config.combat_minutes,
        OfflineDecision::Explore => config.explore_minutes,
        OfflineDecision::Flee => config.flee_minutes,
        OfflineDecision::ReturnToTown => config.return_minutes,
    };
    rng.range_inclusive(range.min, range.max)
}

/// Shared inputs for executing offline decisions.
pub struct ExecutionContext<'a, W: WorldData> {
    pub world: &'a W,
    pub config: &'a SimConfig,
    pub timestamp: DateTime<Utc>,
}

impl<W: WorldData> ExecutionContext<'_, W> {
    fn activity(
        &self,
        character: &Character,
        kind: ActivityType,
        description: String,
    ) -> Activity {
        Activity::new(character.id.clone(), self.timestamp, kind, description)
    }

    fn in_town(&self, character: &Character) -> bool {
        self.world
            .location(&character.location)
            .is_some_and(|loc| loc.is_town())
    }

    fn can_rest(&self, character: &Character) -> bool {
        self.world
            .location(&character.location)
            .map_or(true, |loc| loc.allows_rest())
    }
}

/// Applies `decision` to `character`, records it in `summary` and returns the
/// single activity it produced.
pub fn execute(
    decision: OfflineDecision,
    character: &mut Character,
    ctx: &ExecutionContext<'_, impl WorldData>,
    summary: &mut SimulationSummary,
    rng: &mut impl RandomSource,
) -> Activity {
    match decision {
        OfflineDecision::Rest => rest(character, ctx),
        OfflineDecision::Explore => explore(character, ctx, summary, rng),
        OfflineDecision::Combat => combat(character, ctx, summary, rng),
        OfflineDecision::Flee => flee(character, ctx, rng),
        OfflineDecision::ReturnToTown => return_to_town(character, ctx),
    }
}

fn rest(character: &mut Character, ctx: &ExecutionContext<'_, impl WorldData>) -> Activity {
    if !ctx.can_rest(character) {
        return ctx
            .activity(
                character,
                ActivityType::Rest,
                format!(
                    "{} found no safe place to rest in {}",
                    character.name, character.location
                ),
            )
            .with_meta("hp_restored", 0);
    }

    let restored = if ctx.in_town(character) {
        let missing = character.max_hp - character.current_hp;
        character.full_heal();
        missing
    } else {
        let fraction = ctx.config.field_rest_heal_fraction;
        let amount = (character.max_hp as f64 * fraction).ceil() as i32;
        character.heal(amount)
    };

    ctx.activity(
        character,
        ActivityType::Rest,
        format!(
            "{} rested in {} and recovered {} HP",
            character.name, character.location, restored
        ),
    )
    .with_meta("hp_restored", restored)
}

fn explore(
    character: &mut Character,
    ctx: &ExecutionContext<'_, impl WorldData>,
    summary: &mut SimulationSummary,
    rng: &mut impl RandomSource,
) -> Activity {
    let neighbors: Vec<String> = ctx
        .world
        .neighbors(&character.location)
        .into_iter()
        .map(str::to_string)
        .collect();
    let destination = crate::decision::pick_destination(character, &neighbors, rng);

    let discovered = character.travel_to(&destination);
    let mut description = if discovered {
        format!("{} discovered {}", character.name, destination)
    } else {
        format!("{} explored {}", character.name, destination)
    };

    let mut gold = 0;
    if rng.chance(EXPLORE_GOLD_FIND_CHANCE) {
        gold = rng.range_inclusive(1, character.level * EXPLORE_GOLD_PER_LEVEL) as u64;
        character.gold = character.gold.saturating_add(gold);
        summary.total_gold_gained += gold;
        description.push_str(&format!(" and found {} gold", gold));
    }

    if discovered {
        summary.locations_discovered.push(destination.clone());
        summary.major_events.push(description.clone());
    }

    ctx.activity(character, ActivityType::Exploration, description)
        .with_rewards(Rewards {
            xp: 0,
            gold,
            items: Vec::new(),
        })
        .with_meta("location", destination)
        .major_if(discovered)
}

fn combat(
    character: &mut Character,
    ctx: &ExecutionContext<'_, impl WorldData>,
    summary: &mut SimulationSummary,
    rng: &mut impl RandomSource,
) -> Activity {
    if ctx.in_town(character) {
        let hunting = ctx.world.hunting_location_for(character.level).to_string();
        if character.travel_to(&hunting) {
            summary.locations_discovered.push(hunting.clone());
            summary
                .major_events
                .push(format!("{} discovered {}", character.name, hunting));
        }
    }

    let (low, high) = ctx.world.enemy_level_range(&character.location, character.level);
    let enemy = generate_enemy_in_range(low, high, rng);
    let result = resolve_probabilistic_combat(character, &enemy, rng);
    result.apply(character);

    summary.total_xp_gained += result.xp_gained;
    summary.total_gold_gained += result.gold_gained;
    summary.items_found.extend(result.items.iter().cloned());
    if result.victory {
        summary.combats_won += 1;
    } else {
        summary.combats_lost += 1;
    }

    let boss = enemy.is_boss_tier_for(character.level);
    let major = result.victory && boss;
    let description = format!("{} (Lv.{})", result.description, enemy.level);
    if major {
        summary.major_events.push(format!(
            "{} defeated boss-tier {} (Lv.{})",
            character.name, enemy.name, enemy.level
        ));
    }

    ctx.activity(character, ActivityType::Combat, description)
        .with_rewards(Rewards {
            xp: result.xp_gained,
            gold: result.gold_gained,
            items: result.items.clone(),
        })
        .with_meta("enemy", enemy.name.as_str())
        .with_meta("enemy_level", enemy.level)
        .with_meta("victory", result.victory)
        .with_meta("win_probability", result.win_probability)
        .with_meta("hp_lost", result.hp_lost)
        .major_if(major)
}

fn flee(
    character: &mut Character,
    ctx: &ExecutionContext<'_, impl WorldData>,
    rng: &mut impl RandomSource,
) -> Activity {
    let neighbors = ctx.world.neighbors(&character.location);
    let towns: Vec<&str> = neighbors
        .iter()
        .copied()
        .filter(|name| ctx.world.location(name).is_some_and(|loc| loc.is_town()))
        .collect();
    let pool = if towns.is_empty() { &neighbors } else { &towns };
    let destination = rng
        .pick_index(pool.len())
        .map(|i| pool[i].to_string())
        .unwrap_or_else(|| character.location.clone());

    character.travel_to(&destination);
    let amount = (character.max_hp as f64 * ctx.config.flee_recovery_fraction).floor() as i32;
    let recovered = character.heal(amount);

    ctx.activity(
        character,
        ActivityType::Flee,
        format!("{} fled to {}", character.name, destination),
    )
    .with_meta("hp_restored", recovered)
}

fn return_to_town(
    character: &mut Character,
    ctx: &ExecutionContext<'_, impl WorldData>,
) -> Activity {
    let town = ctx.config.safe_town.clone();
    character.travel_to(&town);
    ctx.activity(
        character,
        ActivityType::ReturnToTown,
        format!("{} limped back to {}", character.name, town),
    )
}
