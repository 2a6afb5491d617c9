//! Evoplay CLI - Run a genetic action-sequence search from JSON configuration.

use std::cell::Cell;
use std::fs;
use std::path::PathBuf;

use evoplay::{
    env::GridGame,
    schema::SearchConfig,
    search::SearchEngine,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json>", args[0]);
        eprintln!();
        eprintln!("Evolve an action sequence for the configured game.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to search configuration file");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);

    // Load configuration
    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config: SearchConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    config.validate().unwrap_or_else(|e| {
        eprintln!("Invalid config: {}", e);
        std::process::exit(1);
    });

    // Construct the environment fail-fast from its identifiers.
    let mut env =
        GridGame::from_names(&config.game, &config.initial_state, config.scenario.as_deref())
            .unwrap_or_else(|e| {
                eprintln!("Error constructing environment: {}", e);
                std::process::exit(1);
            });
    if let Some(dir) = &config.replay_dir {
        env = env.with_replay_dir(dir);
    }

    println!("Evoplay Search");
    println!("==============");
    println!("Game: {} (start: {})", config.game, config.initial_state);
    if let Some(scenario) = &config.scenario {
        println!("Scenario: {}", scenario);
    }
    println!("Episode cap: {} steps", config.max_episode_steps);
    println!("Budget: {} steps", config.max_total_steps);
    println!("Pool capacity: {}", config.pool_capacity);
    println!();

    let budget = config.max_total_steps;
    let mut engine = SearchEngine::new(config, env).unwrap_or_else(|e| {
        eprintln!("Invalid config: {}", e);
        std::process::exit(1);
    });

    // Print a status line each time another 10% of the budget is spent.
    println!("Searching...");
    let last_decile = Cell::new(0u64);
    let result = engine
        .run_with_callback(|progress| {
            let decile = progress.total_steps * 10 / budget.max(1);
            if decile > last_decile.get() {
                last_decile.set(decile);
                println!(
                    "  {:>3}%: generation {}, best reward {:.3}, pool {}",
                    decile * 10,
                    progress.generation,
                    progress.best_reward,
                    progress.pool_size
                );
            }
        })
        .unwrap_or_else(|e| {
            eprintln!("Search aborted: {}", e);
            std::process::exit(1);
        });

    println!();
    println!("Finished:");
    println!("  Generations: {}", result.stats.generations);
    println!("  Steps: {}", result.stats.total_steps);
    println!("  Best reward: {:.3}", result.stats.best_reward);
    println!("  Best sequence length: {}", result.best.actions().len());
    println!(
        "  Time: {:.2}s ({:.1} rollouts/s)",
        result.stats.elapsed_seconds, result.stats.evaluations_per_second
    );
}

fn print_example_config() {
    let config = SearchConfig::default();

    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
}
