//! Environment module - The collaborator contract a search runs against.
//!
//! The engine only ever talks to an [`Environment`]: reset it, step it one
//! action at a time, and ask it for uniformly sampled actions. Recording is
//! an optional capability with no-op defaults, so environments that cannot
//! persist replays still work with the full search loop.

mod grid;
mod replay;

pub use grid::{GridGame, Move};
pub use replay::{ReplayFile, ReplayHeader, ReplayRecorder, ReplayStats, ReplayStep};

/// Result of applying one action.
#[derive(Debug, Clone, Copy)]
pub struct StepOutcome {
    /// Immediate reward for this step.
    pub reward: f64,
    /// Whether the episode has ended.
    pub done: bool,
}

/// A stateful environment the search drives one episode at a time.
///
/// The engine owns the environment exclusively: each evaluation calls
/// `reset` and then `step`s linearly until the sequence is exhausted or the
/// episode terminates.
pub trait Environment {
    /// One discrete control input.
    type Action: Clone;

    /// Restore the initial state. Must be called before any step sequence.
    fn reset(&mut self) -> Result<(), EnvError>;

    /// Apply one action, returning its reward and a termination flag.
    fn step(&mut self, action: &Self::Action) -> Result<StepOutcome, EnvError>;

    /// Draw one action uniformly from the legal action space.
    fn sample_action(&mut self) -> Self::Action;

    /// Begin persisting a replay under `name`. Optional capability.
    fn record_start(&mut self, _name: &str) -> Result<(), EnvError> {
        Ok(())
    }

    /// Finish and persist the replay started by `record_start`.
    fn record_stop(&mut self) -> Result<(), EnvError> {
        Ok(())
    }
}

/// Environment construction and stepping errors.
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("Unknown game `{0}`")]
    UnknownGame(String),
    #[error("Unknown starting state `{state}` for game `{game}`")]
    UnknownState { game: String, state: String },
    #[error("Unknown scenario `{0}`")]
    UnknownScenario(String),
    #[error("Step taken after the episode finished")]
    EpisodeFinished,
    #[error("Replay recording failed: {0}")]
    Recording(#[from] std::io::Error),
}
