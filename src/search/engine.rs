//! The generational search loop and its bookkeeping.

use std::time::Instant;

use log::{debug, info};

use crate::env::{EnvError, Environment};
use crate::schema::{ConfigError, SearchConfig};

use super::operators::SearchRng;
use super::pool::{Candidate, Pool};
use super::rollout::rollout;

/// Search engine that owns the environment, the pool, and the run state.
pub struct SearchEngine<E: Environment> {
    config: SearchConfig,
    env: E,
    rng: SearchRng,
    pool: Pool<E::Action>,
    total_steps: u64,
    generation: u64,
    best: Option<Candidate<E::Action>>,
}

impl<E: Environment> SearchEngine<E> {
    /// Create an engine and seed its pool.
    ///
    /// Breeding needs two parents, so the pool opens with two random
    /// sequences at placeholder reward 0.0. They are never rolled out at
    /// construction; real evaluations displace them as the search runs.
    pub fn new(config: SearchConfig, mut env: E) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.random_seed {
            Some(seed) => SearchRng::new(seed),
            None => SearchRng::random(),
        };

        let mut pool = Pool::new(config.pool_capacity);
        for _ in 0..2 {
            let actions: Vec<E::Action> = (0..config.max_episode_steps)
                .map(|_| env.sample_action())
                .collect();
            pool.insert(Candidate::new(actions, 0.0));
        }

        Ok(Self {
            config,
            env,
            rng,
            pool,
            total_steps: 0,
            generation: 0,
            best: None,
        })
    }

    /// The candidate pool, best first.
    pub fn pool(&self) -> &Pool<E::Action> {
        &self.pool
    }

    /// Generations completed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cumulative environment steps charged against the budget.
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    fn best_reward(&self) -> f64 {
        self.best
            .as_ref()
            .map(|b| b.reward())
            .unwrap_or(f64::NEG_INFINITY)
    }

    /// Breed one child from the current pool.
    fn breed(&mut self) -> Vec<E::Action> {
        let first = self.rng.select_index(self.pool.len());
        let second = self.rng.select_index(self.pool.len());
        debug!("selected parents at ranks {first} and {second}");

        let crossed = self
            .rng
            .crossover(self.pool.sequence(first), self.pool.sequence(second));

        let env = &mut self.env;
        self.rng
            .mutate(&crossed, self.config.mutation_odds, || env.sample_action())
    }

    /// Run one generation: breed, evaluate, rank, track the best.
    fn step_generation(&mut self) -> Result<(), EnvError> {
        let child = self.breed();
        let outcome = rollout(&mut self.env, &child)?;
        let reward = outcome.total_reward;
        let cost = child.len() as u64;

        let improved = reward > self.best_reward();
        let winner = improved.then(|| child.clone());

        self.pool.insert(Candidate::new(child, reward));
        self.total_steps += cost;

        if let Some(actions) = winner {
            info!(
                "generation {}: new best reward {:.3} -> {:.3}",
                self.generation,
                self.best_reward(),
                reward
            );
            self.best = Some(Candidate::new(actions, reward));
            if self.config.record_improvements {
                self.record_best()?;
            }
        }

        self.generation += 1;
        Ok(())
    }

    /// Replay the best sequence through the environment while recording.
    ///
    /// This is the only place the environment's recording capability is
    /// touched; environments without it fall back to the trait's no-ops.
    fn record_best(&mut self) -> Result<(), EnvError> {
        let Some(best) = &self.best else {
            return Ok(());
        };

        let name = format!("best_{}", self.generation);
        self.env.record_start(&name)?;
        let replay = rollout(&mut self.env, best.actions());
        self.env.record_stop()?;
        replay?;
        Ok(())
    }

    /// Snapshot of the run state for progress reporting.
    pub fn progress(&self) -> SearchProgress {
        SearchProgress {
            generation: self.generation,
            total_steps: self.total_steps,
            max_total_steps: self.config.max_total_steps,
            best_reward: self.best_reward(),
            pool_size: self.pool.len(),
        }
    }

    /// Run until the step budget is exhausted, reporting each generation.
    pub fn run_with_callback<F>(&mut self, callback: F) -> Result<SearchResult<E::Action>, EnvError>
    where
        F: Fn(&SearchProgress),
    {
        let start = Instant::now();

        loop {
            self.step_generation()?;
            callback(&self.progress());

            if self.total_steps > self.config.max_total_steps {
                info!(
                    "step budget exhausted after {} generations ({} steps)",
                    self.generation, self.total_steps
                );
                break;
            }
        }

        let elapsed = start.elapsed().as_secs_f64();
        let best = self
            .best
            .clone()
            .expect("at least one generation was evaluated");

        Ok(SearchResult {
            stats: SearchStats {
                generations: self.generation,
                total_steps: self.total_steps,
                best_reward: best.reward(),
                elapsed_seconds: elapsed,
                evaluations_per_second: self.generation as f64 / elapsed,
            },
            best,
        })
    }

    /// Run the search (blocking).
    pub fn run(&mut self) -> Result<SearchResult<E::Action>, EnvError> {
        self.run_with_callback(|_| {})
    }
}

/// Progress snapshot passed to the run callback once per generation.
#[derive(Debug, Clone)]
pub struct SearchProgress {
    /// Generations completed.
    pub generation: u64,
    /// Environment steps charged so far.
    pub total_steps: u64,
    /// The configured budget.
    pub max_total_steps: u64,
    /// Best reward seen so far.
    pub best_reward: f64,
    /// Current pool occupancy.
    pub pool_size: usize,
}

/// Final result of a search run.
#[derive(Debug, Clone)]
pub struct SearchResult<A> {
    /// Best candidate found.
    pub best: Candidate<A>,
    /// Statistics from the run.
    pub stats: SearchStats,
}

/// Statistics from a search run.
#[derive(Debug, Clone)]
pub struct SearchStats {
    /// Total generations run.
    pub generations: u64,
    /// Environment steps charged against the budget.
    pub total_steps: u64,
    /// Best reward achieved.
    pub best_reward: f64,
    /// Time taken (in seconds).
    pub elapsed_seconds: f64,
    /// Rollouts per second.
    pub evaluations_per_second: f64,
}
