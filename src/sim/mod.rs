//! Deterministic simulation module
//!
//! All automaton logic lives here. This module must be pure and deterministic:
//! - Time only through a `Clock`
//! - Seeded RNG only (unless the caller asks for an unseeded run)
//! - Row-major iteration order
//! - No rendering dependencies (wall time is reached only through `WallClock`)

pub mod clock;
pub mod grid;
pub mod rng;
pub mod stability;
pub mod state;
pub mod step;
pub mod tick;

pub use clock::{Clock, SimulatedClock, WallClock};
pub use grid::{Cell, Grid};
pub use rng::{CellRng, SeedStrategy, SineSeries, seed_grid};
pub use stability::{History, Stability, check_stability};
pub use state::{EndReason, RunPhase, RunSummary, SimulationRun};
pub use step::{Generation, step};
pub use tick::{TickReport, run_to_end, simulate, tick};
