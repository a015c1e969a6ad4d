//! Pre-computed playback
//!
//! Runs a whole game up front on the simulated clock and records one frame
//! per generation, so a page can animate it without doing any simulation.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::settings::{GameConfig, SimulationParams};
use crate::sim::{EndReason, Grid, RunPhase, RunSummary, SimulatedClock, SimulationRun, tick};

/// Display time given to the last frame (ms)
pub const LAST_FRAME_DISPLAY_MS: f64 = 1000.0;

/// One displayable state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub grid: Grid,
    pub steps: u64,
    pub dustbunnies_awarded: u64,
    pub speed_multiplier: f64,
    /// Seconds since the run started
    pub elapsed_time: f64,
    /// How long to show this frame before the next one (ms)
    pub display_time: f64,
    pub births: usize,
    pub deaths: usize,
    /// Set on the generation that ended the run
    pub ending: bool,
    /// Set only on the trailing frame that holds the final grid
    pub game_over: bool,
    pub end_reason: Option<EndReason>,
}

/// A complete recorded run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    pub seed: Option<u64>,
    pub config: GameConfig,
    #[serde(rename = "grid_states")]
    pub frames: Vec<Frame>,
    pub total_states: usize,
    pub summary: RunSummary,
}

impl Timeline {
    /// Run to completion and record every generation.
    ///
    /// The result holds `steps + 2` frames: the initial grid, one per
    /// generation, and a game-over frame `ending_display_time` seconds later.
    pub fn record(params: &SimulationParams) -> Result<Self, ConfigurationError> {
        let run = SimulationRun::from_params(params)?;
        Self::record_run(run)
    }

    /// Record a run built but not yet ticked, e.g. one made with
    /// [`SimulationRun::from_grid`]
    pub fn record_run(mut run: SimulationRun) -> Result<Self, ConfigurationError> {
        if run.phase() != RunPhase::Initialized {
            return Err(ConfigurationError::RunAlreadyStarted { steps: run.steps() });
        }
        let mut clock = SimulatedClock::new();
        let mut frames = vec![Frame {
            grid: run.grid().clone(),
            steps: run.steps(),
            dustbunnies_awarded: 0,
            speed_multiplier: run.speed_multiplier(),
            elapsed_time: 0.0,
            display_time: 0.0,
            births: 0,
            deaths: 0,
            ending: false,
            game_over: false,
            end_reason: None,
        }];

        while let Some(report) = tick(&mut run, &mut clock) {
            frames.push(Frame {
                grid: run.grid().clone(),
                steps: run.steps(),
                dustbunnies_awarded: run.dustbunnies().floor() as u64,
                speed_multiplier: run.speed_multiplier(),
                elapsed_time: report.elapsed,
                display_time: 0.0,
                births: report.births.iter().filter(|&&b| b).count(),
                deaths: report.deaths.iter().filter(|&&d| d).count(),
                ending: report.end_reason.is_some(),
                game_over: false,
                end_reason: report.end_reason,
            });
        }

        // The loop only stops once the run has an end reason
        let summary = run.summary().unwrap_or(RunSummary {
            steps: run.steps(),
            dustbunnies_awarded: run.dustbunnies().floor() as u64,
            end_reason: EndReason::Timeout,
            test_mode: run.test_mode(),
        });

        let last = &frames[frames.len() - 1];
        let final_frame = Frame {
            elapsed_time: last.elapsed_time + run.config().ending_display_time,
            births: 0,
            deaths: 0,
            ending: false,
            game_over: true,
            end_reason: Some(summary.end_reason),
            ..last.clone()
        };
        frames.push(final_frame);

        for i in 0..frames.len() - 1 {
            frames[i].display_time = (frames[i + 1].elapsed_time - frames[i].elapsed_time) * 1000.0;
        }
        if let Some(last) = frames.last_mut() {
            last.display_time = LAST_FRAME_DISPLAY_MS;
        }

        log::info!(
            "Recorded {} frames, {} steps, end reason {}",
            frames.len(),
            summary.steps,
            summary.end_reason
        );

        Ok(Self {
            seed: run.seed(),
            config: run.config().clone(),
            total_states: frames.len(),
            frames,
            summary,
        })
    }
}
