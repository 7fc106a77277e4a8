//! Offline simulation CLI.
//!
//! Fast-forwards a fresh character through a stretch of offline time and
//! prints what happened while the player was away.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # 24 game hours, Warrior
//!   cargo run --bin simulate -- --away 8          # 8 real hours away
//!   cargo run --bin simulate -- --class mage -s 42
//!   RUST_LOG=debug cargo run --bin simulate       # Decision trace

use autoquest::simulator::{offline_game_hours, OfflineSimulator, SimConfig};
use autoquest::{Character, JobClass, Personality, StaticWorld, WorldData};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::process;

struct Options {
    config: SimConfig,
    game_hours: f64,
    job_class: JobClass,
    name: String,
    json: bool,
    verbose: bool,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args);

    let default_level = if options.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let world = StaticWorld::default();
    let simulator = match OfflineSimulator::new(&world, options.config.clone()) {
        Ok(simulator) => simulator,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            process::exit(2);
        }
    };

    let character = match Character::new(
        options.name.clone(),
        options.job_class,
        Personality::balanced(),
        world.safe_town(),
    ) {
        Ok(character) => character,
        Err(e) => {
            eprintln!("Invalid character: {}", e);
            process::exit(2);
        }
    };

    let mut rng = match options.config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if !options.json {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              AUTOQUEST OFFLINE SIMULATOR                      ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Character:      {} the {}", character.name, character.job_class.name());
        println!("  Game Hours:     {:.1}", options.game_hours);
        let config = simulator.config();
        println!("  Safe Town:      {}", config.safe_town);
        println!("  Activity Cap:   {}", config.max_activities);
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
    }

    let result = simulator.run(&character, options.game_hours, chrono::Utc::now(), &mut rng);

    if options.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize result: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    println!("{}", result.summary.to_text());
    let c = &result.character;
    println!(
        "{} is now level {} with {}/{} HP and {} gold in {}.",
        c.name, c.level, c.current_hp, c.max_hp, c.gold, c.location
    );
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options {
        config: SimConfig::default(),
        game_hours: 24.0,
        job_class: JobClass::Warrior,
        name: "Wanderer".to_string(),
        json: false,
        verbose: false,
    };
    let mut seed = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-g" | "--hours" => {
                if i + 1 < args.len() {
                    options.game_hours = args[i + 1].parse().unwrap_or(24.0);
                    i += 1;
                }
            }
            "-a" | "--away" => {
                if i + 1 < args.len() {
                    let real_hours: f64 = args[i + 1].parse().unwrap_or(0.0);
                    let seconds = (real_hours * 3600.0) as i64;
                    options.game_hours = offline_game_hours(chrono::Duration::seconds(seconds));
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-c" | "--class" => {
                if i + 1 < args.len() {
                    match JobClass::from_name(&args[i + 1]) {
                        Some(class) => options.job_class = class,
                        None => {
                            eprintln!("Unknown class: {}", args[i + 1]);
                            process::exit(2);
                        }
                    }
                    i += 1;
                }
            }
            "-n" | "--name" => {
                if i + 1 < args.len() {
                    options.name = args[i + 1].clone();
                    i += 1;
                }
            }
            "--config" => {
                if i + 1 < args.len() {
                    options.config = load_config(&args[i + 1]);
                    i += 1;
                }
            }
            "--hardcore" => {
                options.config = SimConfig::hardcore();
            }
            "--relaxed" => {
                options.config = SimConfig::relaxed();
            }
            "--json" => {
                options.json = true;
            }
            "-v" | "--verbose" => {
                options.verbose = true;
            }
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    // --seed wins over a seed from a config file
    if seed.is_some() {
        options.config.seed = seed;
    }

    options
}

fn load_config(path: &str) -> SimConfig {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Failed to read config {}: {}", path, e);
            process::exit(2);
        }
    };
    match SimConfig::from_json(&text) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid config {}: {}", path, e);
            process::exit(2);
        }
    }
}

fn print_help() {
    println!("Autoquest Offline Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -g, --hours <H>     Game hours to simulate (default: 24)");
    println!("    -a, --away <H>      Real hours away, compressed 1:6 (max 1008 game hours)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -c, --class <C>     Job class: warrior, mage, rogue, ranger, cleric, bard");
    println!("    -n, --name <N>      Character name (default: Wanderer)");
    println!("    --config <FILE>     Load simulation settings from JSON");
    println!("    --hardcore          Harsher death penalties");
    println!("    --relaxed           Gentler death penalties");
    println!("    --json              Print the full result as JSON");
    println!("    -v, --verbose       Log every decision (same as RUST_LOG=debug)");
    println!("    -h, --help          Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                        # Default run");
    println!("    cargo run --bin simulate -- --away 8 --seed 42  # Reproducible night away");
    println!("    cargo run --bin simulate -- --class bard --json # Machine-readable output");
}
