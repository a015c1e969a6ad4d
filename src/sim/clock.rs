//! Time sources for the simulation driver
//!
//! The driver only ever asks "what time is it" and says "one generation took
//! this long". A simulated clock turns the second call into time passing,
//! which keeps runs reproducible; a wall clock ignores it.

/// Seconds-based time source
pub trait Clock {
    /// Current time in seconds
    fn now(&self) -> f64;

    /// Called once per generation with its nominal display duration
    fn advance(&mut self, seconds: f64);
}

/// Virtual timeline: each generation lasts `1 / speed_multiplier` seconds
#[derive(Debug, Clone, Default)]
pub struct SimulatedClock {
    now: f64,
}

impl SimulatedClock {
    pub fn new() -> Self {
        Self { now: 0.0 }
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> f64 {
        self.now
    }

    fn advance(&mut self, seconds: f64) {
        self.now += seconds;
    }
}

/// Real elapsed time from the platform time source
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl Clock for WallClock {
    fn now(&self) -> f64 {
        crate::platform::now_seconds()
    }

    fn advance(&mut self, _seconds: f64) {}
}
