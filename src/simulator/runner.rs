//! The offline time-compression loop.
//!
//! Each iteration decides, executes exactly one activity, applies level ups
//! (keeping the HP fraction), handles death, then advances game time. The
//! loop ends when the game-minute budget is spent or the activity cap trips.

use super::config::SimConfig;
use super::executor::{duration_for, execute, ExecutionContext};
use super::report::SimulationSummary;
use crate::activity::{Activity, ActivityType};
use crate::character::Character;
use crate::core::constants::{GAME_HOURS_PER_REAL_HOUR, MAX_OFFLINE_GAME_HOURS};
use crate::core::progression::{apply_level_ups, LevelUpMode};
use crate::core::random::RandomSource;
use crate::decision::{decide_offline, OfflineContext};
use crate::error::ConfigError;
use crate::world::{StaticWorld, WorldData};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Final state of an offline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub character: Character,
    pub activities: Vec<Activity>,
    pub summary: SimulationSummary,
}

/// Converts real time away into a game-hour budget: six game hours per real
/// hour, capped at a week of game time. Negative spans yield zero.
pub fn offline_game_hours(real_elapsed: Duration) -> f64 {
    let real_hours = real_elapsed.num_seconds().max(0) as f64 / 3600.0;
    (real_hours * GAME_HOURS_PER_REAL_HOUR).min(MAX_OFFLINE_GAME_HOURS)
}

/// Real wall-clock offset for `game_minutes` of compressed time.
fn real_offset(game_minutes: u64) -> Duration {
    let seconds = game_minutes as f64 * 60.0 / GAME_HOURS_PER_REAL_HOUR;
    Duration::seconds(seconds.round() as i64)
}

/// Runs offline simulations against a world.
pub struct OfflineSimulator<'a, W: WorldData> {
    world: &'a W,
    config: SimConfig,
}

impl<'a, W: WorldData> OfflineSimulator<'a, W> {
    /// Validates `config` against `world`.
    pub fn new(world: &'a W, config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let town_ok = world
            .location(&config.safe_town)
            .is_some_and(|loc| loc.is_town());
        if !town_ok {
            return Err(ConfigError::UnknownSafeTown(config.safe_town.clone()));
        }
        Ok(Self { world, config })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Simulates `game_hours` of offline play starting at `started_at`.
    /// `character` is copied; the caller's snapshot is never touched.
    pub fn run(
        &self,
        character: &Character,
        game_hours: f64,
        started_at: DateTime<Utc>,
        rng: &mut impl RandomSource,
    ) -> SimulationResult {
        let mut character = character.clone();
        let mut activities: Vec<Activity> = Vec::new();
        let mut summary = SimulationSummary::default();

        let budget_minutes = (game_hours.max(0.0) * 60.0).round() as u64;
        let mut elapsed: u64 = 0;

        log::debug!(
            "simulating {} for {} game minutes",
            character.name,
            budget_minutes
        );

        while elapsed < budget_minutes {
            if activities.len() >= self.config.max_activities {
                summary.activity_cap_reached = true;
                log::warn!(
                    "offline simulation for {} hit the {} activity cap at {}/{} game minutes",
                    character.name,
                    self.config.max_activities,
                    elapsed,
                    budget_minutes
                );
                break;
            }

            let context = OfflineContext::from_world(self.world, &character);
            let decision = decide_offline(&character, &context, rng);
            let duration = duration_for(decision, &self.config, rng);
            let ctx = ExecutionContext {
                world: self.world,
                config: &self.config,
                timestamp: started_at + real_offset(elapsed),
            };
            log::debug!(
                "[{:>5}m] {} at {} ({}/{} HP, {} gold): {}",
                elapsed,
                character.name,
                character.location,
                character.current_hp,
                character.max_hp,
                character.gold,
                decision.label()
            );

            let activity = execute(decision, &mut character, &ctx, &mut summary, rng);
            activities.push(activity);

            for up in apply_level_ups(&mut character, LevelUpMode::PreserveHpRatio) {
                let description = up.describe(&character.name);
                summary.levels_gained += 1;
                summary.major_events.push(description.clone());
                activities.push(
                    Activity::new(
                        character.id.clone(),
                        ctx.timestamp,
                        ActivityType::LevelUp,
                        description,
                    )
                    .with_meta("level", up.new_level)
                    .with_meta("max_hp", up.max_hp)
                    .major(),
                );
            }

            if !character.is_alive() {
                let penalty = character.die_and_respawn(
                    &self.config.safe_town,
                    self.config.death_gold_loss_fraction,
                    self.config.death_xp_loss_fraction,
                );
                summary.deaths += 1;
                summary.gold_lost += penalty.gold_lost;
                let description = format!(
                    "{} died and respawned in {}, losing {} gold and {} XP",
                    character.name, self.config.safe_town, penalty.gold_lost, penalty.xp_lost
                );
                log::info!("{}", description);
                summary.major_events.push(description.clone());
                activities.push(
                    Activity::new(
                        character.id.clone(),
                        ctx.timestamp,
                        ActivityType::Death,
                        description,
                    )
                    .with_meta("gold_lost", penalty.gold_lost)
                    .with_meta("xp_lost", penalty.xp_lost)
                    .major(),
                );
            }

            elapsed += duration as u64;
        }

        if character.location == self.config.safe_town {
            character.full_heal();
        }

        summary.game_minutes_elapsed = elapsed;
        summary.activities_recorded = activities.len();

        log::info!(
            "offline simulation for {} done: {} activities, {}W/{}L, {} levels, {} deaths",
            character.name,
            summary.activities_recorded,
            summary.combats_won,
            summary.combats_lost,
            summary.levels_gained,
            summary.deaths
        );

        SimulationResult {
            character,
            activities,
            summary,
        }
    }
}

/// Simulates `game_hours` against the built-in world with default settings,
/// timestamped from now.
pub fn simulate(
    character: &Character,
    game_hours: f64,
    rng: &mut impl RandomSource,
) -> SimulationResult {
    let world = StaticWorld::default();
    let config = SimConfig::default();
    let simulator = OfflineSimulator {
        world: &world,
        config,
    };
    simulator.run(character, game_hours, Utc::now(), rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{JobClass, Personality};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn hero() -> Character {
        Character::new("Aria", JobClass::Warrior, Personality::balanced(), "Oakvale").unwrap()
    }

    #[test]
    fn test_offline_game_hours() {
        assert_eq!(offline_game_hours(Duration::hours(2)), 12.0);
        assert_eq!(offline_game_hours(Duration::minutes(30)), 3.0);
        assert_eq!(offline_game_hours(Duration::days(30)), MAX_OFFLINE_GAME_HOURS);
        assert_eq!(offline_game_hours(Duration::hours(-5)), 0.0);
    }

    #[test]
    fn test_zero_budget_does_nothing() {
        let c = hero();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = simulate(&c, 0.0, &mut rng);
        assert!(result.activities.is_empty());
        assert_eq!(result.character, c);
    }

    #[test]
    fn test_caller_snapshot_untouched() {
        let c = hero();
        let before = c.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let result = simulate(&c, 24.0, &mut rng);
        assert_eq!(c, before);
        assert!(!result.activities.is_empty());
        assert_eq!(result.summary.activities_recorded, result.activities.len());
        assert!(result.summary.game_minutes_elapsed >= 24 * 60);
    }

    #[test]
    fn test_timestamps_are_ordered_and_compressed() {
        let world = StaticWorld::default();
        let sim = OfflineSimulator::new(&world, SimConfig::default()).unwrap();
        let start = Utc::now();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let result = sim.run(&hero(), 12.0, start, &mut rng);

        for pair in result.activities.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
        // 12 game hours is 2 real hours
        let last = result.activities.last().unwrap().timestamp;
        assert!(last - start <= Duration::hours(2));
    }

    #[test]
    fn test_activity_cap_stops_run() {
        let world = StaticWorld::default();
        let config = SimConfig {
            max_activities: 5,
            ..Default::default()
        };
        let sim = OfflineSimulator::new(&world, config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let result = sim.run(&hero(), MAX_OFFLINE_GAME_HOURS, Utc::now(), &mut rng);
        assert!(result.summary.activity_cap_reached);
        assert!(result.summary.game_minutes_elapsed < (MAX_OFFLINE_GAME_HOURS * 60.0) as u64);
    }

    #[test]
    fn test_unknown_safe_town_rejected() {
        let world = StaticWorld::default();
        let config = SimConfig {
            safe_town: "Misty Meadows".into(),
            ..Default::default()
        };
        assert!(matches!(
            OfflineSimulator::new(&world, config),
            Err(ConfigError::UnknownSafeTown(_))
        ));
    }

    #[test]
    fn test_wounded_in_dungeon_leaves_without_resting() {
        let world = StaticWorld::default();
        let sim = OfflineSimulator::new(&world, SimConfig::default()).unwrap();
        let mut c = hero();
        c.travel_to("Goblin Warrens");
        c.current_hp = c.max_hp * 45 / 100;
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let result = sim.run(&c, 0.1, Utc::now(), &mut rng);

        let first = &result.activities[0];
        assert_eq!(first.activity_type, ActivityType::Flee);
        assert_eq!(result.character.location, "Whispering Woods");
        let rested_in_dungeon = result
            .activities
            .iter()
            .any(|a| a.activity_type == ActivityType::Rest && a.description.contains("Goblin"));
        assert!(!rested_in_dungeon);
    }

    #[test]
    fn test_week_long_run_keeps_invariants() {
        for seed in 0..5 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let result = simulate(&hero(), MAX_OFFLINE_GAME_HOURS, &mut rng);
            let c = &result.character;
            assert!(c.current_hp >= 0 && c.current_hp <= c.max_hp);
            assert!(c.validate().is_ok());
            assert!(result.activities.len() <= 1000 + 10);
            if c.location == "Oakvale" {
                assert!(c.is_full_health());
            }
        }
    }
}
