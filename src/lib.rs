//! Evoplay - Steady-state genetic search over action sequences.
//!
//! This crate optimizes a script of discrete actions for a
//! sequential-decision environment. A bounded pool of candidate scripts is
//! kept sorted by accumulated reward; each generation breeds one child via
//! head-biased selection, uniform crossover, and point mutation, rolls it
//! out through the environment, and ranks the result back into the pool.
//!
//! # Architecture
//!
//! The crate is split into three modules:
//!
//! - `schema`: Configuration types for a search run
//! - `env`: The environment contract and a built-in grid game
//! - `search`: Pool, breeding operators, rollout evaluation, and the engine
//!
//! # Example
//!
//! ```rust,no_run
//! use evoplay::{
//!     env::GridGame,
//!     schema::SearchConfig,
//!     search::SearchEngine,
//! };
//!
//! let config = SearchConfig {
//!     max_episode_steps: 64,
//!     max_total_steps: 10_000,
//!     ..SearchConfig::default()
//! };
//!
//! let env = GridGame::from_names(&config.game, &config.initial_state, config.scenario.as_deref())
//!     .expect("known game");
//!
//! let mut engine = SearchEngine::new(config, env).expect("valid config");
//! let result = engine.run().expect("environment healthy");
//!
//! println!("best reward {:.2} after {} generations",
//!     result.best.reward(), result.stats.generations);
//! ```

pub mod env;
pub mod schema;
pub mod search;

// Re-export commonly used types
pub use env::{EnvError, Environment, GridGame, StepOutcome};
pub use schema::SearchConfig;
pub use search::{Candidate, Pool, SearchEngine, SearchResult};
