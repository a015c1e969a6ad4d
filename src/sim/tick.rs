//! Simulation driver
//!
//! Advances a run one generation per tick until it dies, loops, or runs out
//! of time.

use super::clock::{Clock, SimulatedClock};
use super::stability::check_stability;
use super::state::{EndReason, RunPhase, RunSummary, SimulationRun};
use super::step::step;
use crate::consts::SPEED_UP_FACTOR;
use crate::error::ConfigurationError;
use crate::settings::SimulationParams;

/// What a single tick produced
#[derive(Debug, Clone)]
pub struct TickReport {
    /// Cells born this generation (row-major)
    pub births: Vec<bool>,
    /// Cells that died this generation (row-major)
    pub deaths: Vec<bool>,
    /// Seconds since the run started, after this generation's display time
    pub elapsed: f64,
    /// Set on the generation that ended the run
    pub end_reason: Option<EndReason>,
}

/// Advance the run by one generation.
///
/// Returns `None` when no generation was computed: the run had already
/// finished, or its time budget was zero to begin with.
pub fn tick<C: Clock>(run: &mut SimulationRun, clock: &mut C) -> Option<TickReport> {
    let now = clock.now();

    match run.phase {
        RunPhase::Finished(_) => return None,
        RunPhase::Initialized => {
            run.start_time = now;
            run.last_speed_up = now;
            run.phase = RunPhase::Running;
            if run.config.max_duration <= 0.0 {
                log::info!("Run has no time budget, ending immediately");
                run.finish(EndReason::Timeout);
                return None;
            }
        }
        RunPhase::Running => {}
    }

    // Speed up if needed
    if now - run.last_speed_up >= run.config.speed_up_interval {
        run.speed_multiplier *= SPEED_UP_FACTOR;
        run.last_speed_up = now;
        log::debug!(
            "Speed up at step {}: multiplier now {:.3}",
            run.steps,
            run.speed_multiplier
        );
    }

    let generation = step(&run.grid);
    run.grid = generation.grid;
    run.steps += 1;
    run.history.push(&run.grid);

    // Stability wins over timeout when both happen on the same generation
    let elapsed = now - run.start_time;
    let end_reason = if let Some(stability) = check_stability(&run.grid, &run.history) {
        Some(EndReason::from(stability))
    } else if elapsed >= run.config.max_duration {
        Some(EndReason::Timeout)
    } else if run.steps >= run.config.max_steps {
        log::warn!(
            "Run hit the {} step ceiling after {:.2}s, treating as timeout",
            run.config.max_steps,
            elapsed
        );
        Some(EndReason::Timeout)
    } else {
        None
    };

    if let Some(reason) = end_reason {
        log::info!(
            "Simulation ending after {} steps ({:.2}s). Reason: {}",
            run.steps,
            elapsed,
            reason
        );
        run.finish(reason);
    }

    clock.advance(1.0 / run.speed_multiplier);

    Some(TickReport {
        births: generation.births,
        deaths: generation.deaths,
        elapsed: clock.now() - run.start_time,
        end_reason,
    })
}

/// Tick until the run finishes
pub fn run_to_end<C: Clock>(run: &mut SimulationRun, clock: &mut C) -> RunSummary {
    loop {
        if let Some(summary) = run.summary() {
            return summary;
        }
        tick(run, clock);
    }
}

/// Build a run from parameters and drive it to completion on a simulated clock
pub fn simulate(params: &SimulationParams) -> Result<RunSummary, ConfigurationError> {
    let mut run = SimulationRun::from_params(params)?;
    let (width, height) = params.config.grid_dimensions();
    log::info!(
        "Starting simulation: {}x{} grid, seed {:?}{}",
        width,
        height,
        params.seed,
        if params.test_mode { " (test mode)" } else { "" }
    );
    Ok(run_to_end(&mut run, &mut SimulatedClock::new()))
}
