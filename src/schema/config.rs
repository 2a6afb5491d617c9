//! Configuration types for genetic search runs.

use serde::{Deserialize, Serialize};

/// Top-level configuration for a search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Identifier of the game/board to load.
    #[serde(default = "default_game")]
    pub game: String,
    /// Named starting state within the game.
    #[serde(default = "default_initial_state")]
    pub initial_state: String,
    /// Optional reward-shaping scenario.
    #[serde(default)]
    pub scenario: Option<String>,
    /// Per-rollout cap on action-sequence length.
    #[serde(default = "default_max_episode_steps")]
    pub max_episode_steps: usize,
    /// Search budget in cumulative environment steps.
    #[serde(default = "default_max_total_steps")]
    pub max_total_steps: u64,
    /// Maximum number of candidates kept in the pool.
    #[serde(default = "default_pool_capacity")]
    pub pool_capacity: usize,
    /// Mutation odds: each gene is replaced with probability 1/odds.
    #[serde(default = "default_mutation_odds")]
    pub mutation_odds: u32,
    /// Record a replay artifact whenever the best reward improves.
    #[serde(default = "default_record_improvements")]
    pub record_improvements: bool,
    /// Output directory for replay artifacts.
    #[serde(default)]
    pub replay_dir: Option<String>,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            game: default_game(),
            initial_state: default_initial_state(),
            scenario: None,
            max_episode_steps: default_max_episode_steps(),
            max_total_steps: default_max_total_steps(),
            pool_capacity: default_pool_capacity(),
            mutation_odds: default_mutation_odds(),
            record_improvements: default_record_improvements(),
            replay_dir: None,
            random_seed: None,
        }
    }
}

fn default_game() -> String {
    "courier".to_string()
}
fn default_initial_state() -> String {
    "southwest".to_string()
}
fn default_max_episode_steps() -> usize {
    4500
}
fn default_max_total_steps() -> u64 {
    100_000_000
}
fn default_pool_capacity() -> usize {
    100
}
fn default_mutation_odds() -> u32 {
    66
}
fn default_record_improvements() -> bool {
    true
}

impl SearchConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Crossover and mutation each shrink a sequence by one, so anything
        // shorter than 2 collapses immediately.
        if self.max_episode_steps < 2 {
            return Err(ConfigError::EpisodeTooShort);
        }
        if self.max_total_steps == 0 {
            return Err(ConfigError::EmptyBudget);
        }
        if self.pool_capacity < 2 {
            return Err(ConfigError::PoolTooSmall);
        }
        if self.mutation_odds == 0 {
            return Err(ConfigError::InvalidMutationOdds);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Episode step cap must be at least 2")]
    EpisodeTooShort,
    #[error("Total step budget must be non-zero")]
    EmptyBudget,
    #[error("Pool capacity must be at least 2")]
    PoolTooSmall,
    #[error("Mutation odds must be non-zero")]
    InvalidMutationOdds,
}
