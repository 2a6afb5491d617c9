//! Replay recorder for persisting best-so-far rollouts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Identifies the run a replay was captured from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayHeader {
    /// Game the episode ran on.
    pub game: String,
    /// Named starting state.
    pub initial_state: String,
    /// Reward-shaping scenario, if any.
    #[serde(default)]
    pub scenario: Option<String>,
}

/// One recorded step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayStep {
    /// Action taken, by name.
    pub action: String,
    /// Immediate reward.
    pub reward: f64,
    /// Whether this step ended the episode.
    pub done: bool,
}

/// On-disk replay format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayFile {
    pub header: ReplayHeader,
    pub total_reward: f64,
    pub steps: Vec<ReplayStep>,
}

/// Collects steps of a single episode and writes them as JSON on finalize.
///
/// Usage:
/// ```ignore
/// let mut recorder = ReplayRecorder::new("best_42.json", header);
/// for step in episode {
///     recorder.push(step);
/// }
/// let stats = recorder.finalize()?;
/// ```
#[derive(Debug)]
pub struct ReplayRecorder {
    path: PathBuf,
    header: ReplayHeader,
    steps: Vec<ReplayStep>,
}

impl ReplayRecorder {
    /// Create a recorder that will write to `path`.
    pub fn new<P: AsRef<Path>>(path: P, header: ReplayHeader) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            header,
            steps: Vec::new(),
        }
    }

    /// Append one step to the replay.
    pub fn push(&mut self, step: ReplayStep) {
        self.steps.push(step);
    }

    /// Number of steps recorded so far.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Write the replay artifact and consume the recorder.
    pub fn finalize(self) -> io::Result<ReplayStats> {
        let total_reward = self.steps.iter().map(|s| s.reward).sum();
        let file = ReplayFile {
            header: self.header,
            total_reward,
            steps: self.steps,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, json)?;

        Ok(ReplayStats {
            steps: file.steps.len(),
            total_reward,
            path: self.path,
        })
    }
}

/// Statistics from a finished recording.
#[derive(Debug, Clone)]
pub struct ReplayStats {
    /// Steps written.
    pub steps: usize,
    /// Sum of step rewards.
    pub total_reward: f64,
    /// File the replay was written to.
    pub path: PathBuf,
}

impl std::fmt::Display for ReplayStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} steps, total reward {:.3}, written to {}",
            self.steps,
            self.total_reward,
            self.path.display()
        )
    }
}
