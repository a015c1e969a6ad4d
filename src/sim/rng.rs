//! Seeded randomness and initial grid population

use rand::rngs::ThreadRng;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid};
use crate::consts::ALIVE_PROBABILITY;
use crate::error::GridError;

/// How a seed is turned into a stream of uniform samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedStrategy {
    /// PCG32 seeded from the run seed
    #[default]
    Pcg32,
    /// `s = sin(s) * 10000; s - floor(s)`, matching the playback page's own generator
    Sine,
}

impl SeedStrategy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pcg" | "pcg32" => Some(SeedStrategy::Pcg32),
            "sine" | "sin" => Some(SeedStrategy::Sine),
            _ => None,
        }
    }
}

/// Iterated sine transform. Cheap, deterministic, and poorly distributed for
/// some seeds (seed 0 yields a constant 0.0).
#[derive(Debug, Clone)]
pub struct SineSeries {
    state: f64,
}

impl SineSeries {
    pub fn new(seed: u64) -> Self {
        Self { state: seed as f64 }
    }

    pub fn next_unit(&mut self) -> f64 {
        self.state = self.state.sin() * 10000.0;
        self.state - self.state.floor()
    }
}

/// Uniform [0, 1) source owned by a single run
#[derive(Debug)]
pub enum CellRng {
    Pcg(Pcg32),
    Sine(SineSeries),
    /// Unseeded runs draw from the thread-local generator
    Entropy(ThreadRng),
}

impl CellRng {
    pub fn new(seed: Option<u64>, strategy: SeedStrategy) -> Self {
        match (seed, strategy) {
            (Some(seed), SeedStrategy::Pcg32) => CellRng::Pcg(Pcg32::seed_from_u64(seed)),
            (Some(seed), SeedStrategy::Sine) => CellRng::Sine(SineSeries::new(seed)),
            (None, _) => CellRng::Entropy(rand::rng()),
        }
    }

    pub fn next_unit(&mut self) -> f64 {
        match self {
            CellRng::Pcg(rng) => rng.random::<f64>(),
            CellRng::Sine(series) => series.next_unit(),
            CellRng::Entropy(rng) => rng.random::<f64>(),
        }
    }
}

/// Populate a grid row by row, each cell alive with probability 0.25
pub fn seed_grid(width: usize, height: usize, rng: &mut CellRng) -> Result<Grid, GridError> {
    let cells = (0..width * height)
        .map(|_| Cell::from(rng.next_unit() < ALIVE_PROBABILITY))
        .collect();
    Grid::from_cells(width, height, cells)
}
