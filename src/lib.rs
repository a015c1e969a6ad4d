//! gol-engine - Game of Life engine for the stream overlay
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, generation step, loop detection, driver)
//! - `timeline`: Pre-computed playback frames
//! - `settings`: Run configuration and chat-command parsing
//! - `platform`: Browser/native platform abstraction
//! - `error`: Configuration and grid errors

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod timeline;

pub use error::{ConfigurationError, GridError};
pub use settings::{GameConfig, SimulationParams};
pub use sim::{EndReason, Grid, RunSummary, SimulationRun, simulate};
pub use timeline::{Frame, Timeline};

/// Engine constants
pub mod consts {
    /// Chance that a seeded cell starts alive
    pub const ALIVE_PROBABILITY: f64 = 0.25;

    /// Recent generations kept for loop detection
    pub const HISTORY_CAPACITY: usize = 20;
    /// A repeat must be at least this many generations back to count as a loop
    pub const MIN_STEPS_FOR_LOOP: usize = 2;

    /// Speed multiplier growth per speed-up interval
    pub const SPEED_UP_FACTOR: f64 = 1.5;

    /// Default hard ceiling on generations per run
    pub const DEFAULT_MAX_STEPS: u64 = 1_000_000;
}
