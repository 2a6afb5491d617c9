//! Built-in grid game used by the binary and the test suite.
//!
//! A courier walks a small board toward a goal square. Boards, starting
//! squares, and reward shapings are all selected by name, so the binary can
//! fail fast on a bad identifier before any search work happens.

use std::path::PathBuf;

use rand::prelude::*;

use super::replay::{ReplayHeader, ReplayRecorder, ReplayStep};
use super::{EnvError, Environment, StepOutcome};

/// One discrete move on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// The full action space.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Stable name used in replay artifacts.
    pub fn name(self) -> &'static str {
        match self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        }
    }
}

/// Static board layout.
#[derive(Debug, Clone)]
struct Board {
    width: usize,
    height: usize,
    goal: (usize, usize),
    obstacles: Vec<(usize, usize)>,
}

impl Board {
    fn is_open(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && !self.obstacles.contains(&(x, y))
    }
}

/// Reward shaping applied on top of a board.
#[derive(Debug, Clone, Copy)]
struct Shaping {
    step_reward: f64,
    goal_reward: f64,
}

/// A deterministic grid environment with named boards, starts, and shapings.
#[derive(Debug)]
pub struct GridGame {
    game: String,
    initial_state: String,
    scenario: Option<String>,
    board: Board,
    shaping: Shaping,
    start: (usize, usize),
    pos: (usize, usize),
    finished: bool,
    rng: StdRng,
    replay_dir: Option<PathBuf>,
    recorder: Option<ReplayRecorder>,
}

impl GridGame {
    /// Construct a game from its identifiers, failing fast on unknown names.
    pub fn from_names(
        game: &str,
        initial_state: &str,
        scenario: Option<&str>,
    ) -> Result<Self, EnvError> {
        let board = board(game)?;
        let start = start_square(game, &board, initial_state)?;
        let shaping = shaping(scenario)?;

        Ok(Self {
            game: game.to_string(),
            initial_state: initial_state.to_string(),
            scenario: scenario.map(str::to_string),
            board,
            shaping,
            start,
            pos: start,
            finished: false,
            rng: StdRng::from_entropy(),
            replay_dir: None,
            recorder: None,
        })
    }

    /// Write replay artifacts under `dir` instead of the working directory.
    pub fn with_replay_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.replay_dir = Some(dir.into());
        self
    }

    /// Seed the action sampler for reproducible runs.
    pub fn with_sample_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Current courier position.
    pub fn position(&self) -> (usize, usize) {
        self.pos
    }

    fn at_goal(&self) -> bool {
        self.pos == self.board.goal
    }
}

impl Environment for GridGame {
    type Action = Move;

    fn reset(&mut self) -> Result<(), EnvError> {
        self.pos = self.start;
        self.finished = false;
        Ok(())
    }

    fn step(&mut self, action: &Move) -> Result<StepOutcome, EnvError> {
        if self.finished {
            return Err(EnvError::EpisodeFinished);
        }

        let (x, y) = self.pos;
        let (nx, ny) = match action {
            Move::Up => (x, y.saturating_add(1)),
            Move::Down => (x, y.saturating_sub(1)),
            Move::Left => (x.saturating_sub(1), y),
            Move::Right => (x.saturating_add(1), y),
        };

        // Blocked moves leave the courier in place.
        if self.board.is_open(nx, ny) {
            self.pos = (nx, ny);
        }

        let done = self.at_goal();
        let reward = if done {
            self.shaping.goal_reward
        } else {
            self.shaping.step_reward
        };
        self.finished = done;

        if let Some(recorder) = &mut self.recorder {
            recorder.push(ReplayStep {
                action: action.name().to_string(),
                reward,
                done,
            });
        }

        Ok(StepOutcome { reward, done })
    }

    fn sample_action(&mut self) -> Move {
        *Move::ALL.choose(&mut self.rng).unwrap_or(&Move::Up)
    }

    fn record_start(&mut self, name: &str) -> Result<(), EnvError> {
        let file = format!("{name}.json");
        let path = match &self.replay_dir {
            Some(dir) => dir.join(file),
            None => PathBuf::from(file),
        };
        self.recorder = Some(ReplayRecorder::new(
            path,
            ReplayHeader {
                game: self.game.clone(),
                initial_state: self.initial_state.clone(),
                scenario: self.scenario.clone(),
            },
        ));
        Ok(())
    }

    fn record_stop(&mut self) -> Result<(), EnvError> {
        if let Some(recorder) = self.recorder.take() {
            let stats = recorder.finalize()?;
            log::debug!("replay saved: {stats}");
        }
        Ok(())
    }
}

/// Look up a board layout by name.
fn board(game: &str) -> Result<Board, EnvError> {
    match game {
        "courier" => Ok(Board {
            width: 9,
            height: 9,
            goal: (8, 8),
            // Vertical wall at x=4 with a gap at y=6.
            obstacles: (0..9)
                .filter(|&y| y != 6)
                .map(|y| (4, y))
                .collect(),
        }),
        "corridor" => Ok(Board {
            width: 32,
            height: 1,
            goal: (31, 0),
            obstacles: Vec::new(),
        }),
        other => Err(EnvError::UnknownGame(other.to_string())),
    }
}

/// Look up a named starting square on a board.
fn start_square(game: &str, board: &Board, state: &str) -> Result<(usize, usize), EnvError> {
    let square = match (game, state) {
        ("courier", "southwest") => Some((0, 0)),
        ("courier", "northwest") => Some((0, 8)),
        ("courier", "center") => Some((2, 4)),
        ("corridor", "west") => Some((0, 0)),
        ("corridor", "midway") => Some((15, 0)),
        _ => None,
    };

    match square {
        Some((x, y)) if board.is_open(x, y) => Ok((x, y)),
        _ => Err(EnvError::UnknownState {
            game: game.to_string(),
            state: state.to_string(),
        }),
    }
}

/// Look up a reward shaping by scenario name.
fn shaping(scenario: Option<&str>) -> Result<Shaping, EnvError> {
    match scenario {
        None => Ok(Shaping {
            step_reward: -0.1,
            goal_reward: 10.0,
        }),
        Some("sparse") => Ok(Shaping {
            step_reward: 0.0,
            goal_reward: 10.0,
        }),
        Some("hurry") => Ok(Shaping {
            step_reward: -1.0,
            goal_reward: 100.0,
        }),
        Some(other) => Err(EnvError::UnknownScenario(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_unknown_identifiers_fail_fast() {
        assert!(matches!(
            GridGame::from_names("pinball", "southwest", None),
            Err(EnvError::UnknownGame(_))
        ));
        assert!(matches!(
            GridGame::from_names("courier", "attic", None),
            Err(EnvError::UnknownState { .. })
        ));
        assert!(matches!(
            GridGame::from_names("courier", "southwest", Some("bonus")),
            Err(EnvError::UnknownScenario(_))
        ));
    }

    #[test]
    fn test_corridor_walk_to_goal() {
        let mut game = GridGame::from_names("corridor", "west", None).unwrap();
        game.reset().unwrap();

        let mut total = 0.0;
        let mut done = false;
        for _ in 0..31 {
            let outcome = game.step(&Move::Right).unwrap();
            total += outcome.reward;
            done = outcome.done;
        }

        assert!(done);
        assert_eq!(game.position(), (31, 0));
        // 30 step penalties plus the goal reward.
        assert!((total - (10.0 - 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_step_after_finish_is_an_error() {
        let mut game = GridGame::from_names("corridor", "midway", None).unwrap();
        game.reset().unwrap();

        for _ in 0..16 {
            game.step(&Move::Right).unwrap();
        }
        assert!(matches!(
            game.step(&Move::Right),
            Err(EnvError::EpisodeFinished)
        ));
    }

    #[test]
    fn test_blocked_moves_stay_in_place() {
        let mut game = GridGame::from_names("courier", "southwest", None).unwrap();
        game.reset().unwrap();

        // Down and Left from the corner are blocked by the board edge.
        game.step(&Move::Down).unwrap();
        game.step(&Move::Left).unwrap();
        assert_eq!(game.position(), (0, 0));

        // The wall at x=4 blocks Right from (3, 0).
        for _ in 0..3 {
            game.step(&Move::Right).unwrap();
        }
        assert_eq!(game.position(), (3, 0));
        game.step(&Move::Right).unwrap();
        assert_eq!(game.position(), (3, 0));
    }

    #[test]
    fn test_reset_restores_start() {
        let mut game = GridGame::from_names("courier", "center", None).unwrap();
        game.reset().unwrap();
        game.step(&Move::Up).unwrap();
        assert_ne!(game.position(), (2, 4));

        game.reset().unwrap();
        assert_eq!(game.position(), (2, 4));
    }

    #[test]
    fn test_sampling_covers_action_space() {
        let mut game = GridGame::from_names("courier", "southwest", None)
            .unwrap()
            .with_sample_seed(7);

        let mut seen = [false; 4];
        for _ in 0..200 {
            match game.sample_action() {
                Move::Up => seen[0] = true,
                Move::Down => seen[1] = true,
                Move::Left => seen[2] = true,
                Move::Right => seen[3] = true,
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_recording_writes_artifact() {
        let dir = tempdir().unwrap();
        let mut game = GridGame::from_names("corridor", "west", Some("sparse"))
            .unwrap()
            .with_replay_dir(dir.path());

        game.record_start("best_3").unwrap();
        game.reset().unwrap();
        for _ in 0..5 {
            game.step(&Move::Right).unwrap();
        }
        game.record_stop().unwrap();

        let path = dir.path().join("best_3.json");
        assert!(path.exists());
        let content = std::fs::read_to_string(path).unwrap();
        let parsed: super::super::ReplayFile = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.steps.len(), 5);
        assert_eq!(parsed.header.scenario.as_deref(), Some("sparse"));
    }
}
