//! Error types for configuration and grid construction.

use thiserror::Error;

/// A configuration that cannot produce a valid run.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Canvas width is zero.
    #[error("width must be greater than zero")]
    ZeroWidth,

    /// Canvas height is zero.
    #[error("height must be greater than zero")]
    ZeroHeight,

    /// Pixel size is zero.
    #[error("pixel size must be greater than zero")]
    ZeroPixelSize,

    /// Pixel size is larger than the canvas along one axis.
    #[error("pixel size {pixel_size} leaves an empty grid for a {width}x{height} canvas")]
    EmptyGrid {
        width: u32,
        height: u32,
        pixel_size: u32,
    },

    /// Speed-up interval is zero, negative or not finite.
    #[error("speed-up interval must be a positive number of seconds, got {0}")]
    InvalidSpeedUpInterval(f64),

    /// Time budget is NaN or infinite. Zero and negative budgets are allowed.
    #[error("max duration must be a finite number of seconds, got {0}")]
    InvalidDuration(f64),

    /// Poll interval is zero, negative or not finite.
    #[error("update interval must be a positive number of seconds, got {0}")]
    InvalidUpdateInterval(f64),

    /// Final frame hold time is negative or not finite.
    #[error("ending display time must be a non-negative number of seconds, got {0}")]
    InvalidEndingDisplayTime(f64),

    /// Reward rate is negative or not finite.
    #[error("dustbunnies per second must be non-negative, got {0}")]
    InvalidRewardRate(f64),

    /// Iteration ceiling of zero.
    #[error("max steps must be greater than zero")]
    ZeroMaxSteps,

    /// Grid could not be built from the configured dimensions.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// A run handed to the timeline recorder had already been ticked.
    #[error("run already started ({steps} steps taken), only fresh runs can be recorded")]
    RunAlreadyStarted { steps: u64 },

    /// Malformed JSON parameters.
    #[error("invalid parameters: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors building a grid from external data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// No rows, or a first row with no cells.
    #[error("grid must have at least one row and one column")]
    Empty,

    /// A row whose length differs from the first row.
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },

    /// Buffer length does not match the requested dimensions.
    #[error("buffer of {len} cells does not fit a {width}x{height} grid")]
    SizeMismatch { width: usize, height: usize, len: usize },
}
