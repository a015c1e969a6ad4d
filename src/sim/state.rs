//! Simulation run state
//!
//! A run owns its grid, history and RNG outright; nothing is shared between
//! runs, so independent runs can live on different threads.

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::rng::{CellRng, seed_grid};
use super::stability::{History, Stability};
use crate::error::ConfigurationError;
use crate::settings::{GameConfig, SimulationParams};

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    /// Every cell died
    Dead,
    /// The grid repeated an earlier generation
    Loop,
    /// Time budget (or the step ceiling) ran out
    Timeout,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::Dead => "dead",
            EndReason::Loop => "loop",
            EndReason::Timeout => "timeout",
        }
    }
}

impl From<Stability> for EndReason {
    fn from(stability: Stability) -> Self {
        match stability {
            Stability::Dead => EndReason::Dead,
            Stability::Loop => EndReason::Loop,
        }
    }
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a run. `Finished` is entered once and never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Initialized,
    Running,
    Finished(EndReason),
}

/// Result handed back to the caller once a run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub steps: u64,
    pub dustbunnies_awarded: u64,
    pub end_reason: EndReason,
    /// Test runs report what they would have earned; the caller must not credit it
    #[serde(default)]
    pub test_mode: bool,
}

/// A single Game of Life run
#[derive(Debug)]
pub struct SimulationRun {
    pub(crate) config: GameConfig,
    pub(crate) seed: Option<u64>,
    pub(crate) grid: Grid,
    pub(crate) history: History,
    pub(crate) steps: u64,
    /// Clock reading when the first tick ran
    pub(crate) start_time: f64,
    pub(crate) last_speed_up: f64,
    pub(crate) speed_multiplier: f64,
    pub(crate) phase: RunPhase,
    pub(crate) test_mode: bool,
}

impl SimulationRun {
    /// Validate the configuration and seed a fresh grid
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let (width, height) = config.grid_dimensions();
        let mut rng = CellRng::new(seed, config.seed_strategy);
        let grid = seed_grid(width, height, &mut rng)?;
        Ok(Self::with_grid(config, seed, grid))
    }

    /// Like [`SimulationRun::new`], carrying the test flag into the summary
    pub fn from_params(params: &SimulationParams) -> Result<Self, ConfigurationError> {
        let mut run = Self::new(params.config.clone(), params.seed)?;
        run.test_mode = params.test_mode;
        Ok(run)
    }

    /// Start from a prepared grid. Its dimensions take precedence over the
    /// configured canvas size.
    pub fn from_grid(config: GameConfig, grid: Grid) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self::with_grid(config, None, grid))
    }

    fn with_grid(config: GameConfig, seed: Option<u64>, grid: Grid) -> Self {
        let mut history = History::new();
        history.push(&grid);
        Self {
            config,
            seed,
            grid,
            history,
            steps: 0,
            start_time: 0.0,
            last_speed_up: 0.0,
            speed_multiplier: 1.0,
            phase: RunPhase::Initialized,
            test_mode: false,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn test_mode(&self) -> bool {
        self.test_mode
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, RunPhase::Finished(_))
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        match self.phase {
            RunPhase::Finished(reason) => Some(reason),
            _ => None,
        }
    }

    /// Reward so far: the per-second rate is credited once per generation.
    ///
    /// Computed as `steps * rate` rather than summed step by step, so the
    /// floored award is exact. For fractional rates this can be one more than
    /// a running sum would give (10 steps at 0.1 is 1.0 here, 0.999... summed).
    pub fn dustbunnies(&self) -> f64 {
        self.steps as f64 * self.config.dustbunnies_per_second
    }

    /// Summary of a finished run, `None` while it is still going
    pub fn summary(&self) -> Option<RunSummary> {
        self.end_reason().map(|end_reason| RunSummary {
            steps: self.steps,
            dustbunnies_awarded: self.dustbunnies().floor() as u64,
            end_reason,
            test_mode: self.test_mode,
        })
    }

    pub(crate) fn finish(&mut self, reason: EndReason) {
        debug_assert!(!self.is_finished(), "end reason is set exactly once");
        self.phase = RunPhase::Finished(reason);
    }
}
