//! Run configuration
//!
//! Defaults match the stream overlay's tuning. A configuration can be built
//! from JSON or from the arguments of a `!gameoflife` chat command.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::sim::SeedStrategy;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Side of one cell in pixels
    pub pixel_size: u32,

    // === Timing ===
    /// Run length before a timeout (seconds)
    pub max_duration: f64,
    /// Speed multiplier grows by 1.5x this often (seconds)
    pub speed_up_interval: f64,
    /// Hint for how often a live page should poll (seconds)
    pub update_interval: f64,
    /// How long the final frame is held during playback (seconds)
    pub ending_display_time: f64,

    // === Reward ===
    /// Dustbunnies credited per generation
    pub dustbunnies_per_second: f64,

    // === Engine ===
    /// Hard ceiling on generations per run
    pub max_steps: u64,
    /// Generator used when a seed is given
    pub seed_strategy: SeedStrategy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            pixel_size: 10,

            max_duration: 120.0,
            speed_up_interval: 10.0,
            update_interval: 0.5,
            ending_display_time: 5.0,

            dustbunnies_per_second: 10.0,

            max_steps: crate::consts::DEFAULT_MAX_STEPS,
            seed_strategy: SeedStrategy::Pcg32,
        }
    }
}

impl GameConfig {
    /// Parse from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Grid size in cells: canvas size divided by pixel size, rounded down
    pub fn grid_dimensions(&self) -> (usize, usize) {
        if self.pixel_size == 0 {
            return (0, 0);
        }
        (
            (self.width / self.pixel_size) as usize,
            (self.height / self.pixel_size) as usize,
        )
    }

    /// Reject configurations that would produce a degenerate run.
    ///
    /// A zero or negative `max_duration` is accepted and ends the run at once
    /// with a timeout; only NaN and infinite budgets are rejected.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.width == 0 {
            return Err(ConfigurationError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(ConfigurationError::ZeroHeight);
        }
        if self.pixel_size == 0 {
            return Err(ConfigurationError::ZeroPixelSize);
        }
        let (w, h) = self.grid_dimensions();
        if w == 0 || h == 0 {
            return Err(ConfigurationError::EmptyGrid {
                width: self.width,
                height: self.height,
                pixel_size: self.pixel_size,
            });
        }
        if !(self.speed_up_interval.is_finite() && self.speed_up_interval > 0.0) {
            return Err(ConfigurationError::InvalidSpeedUpInterval(
                self.speed_up_interval,
            ));
        }
        if !self.max_duration.is_finite() {
            return Err(ConfigurationError::InvalidDuration(self.max_duration));
        }
        if !(self.update_interval.is_finite() && self.update_interval > 0.0) {
            return Err(ConfigurationError::InvalidUpdateInterval(
                self.update_interval,
            ));
        }
        if !(self.ending_display_time.is_finite() && self.ending_display_time >= 0.0) {
            return Err(ConfigurationError::InvalidEndingDisplayTime(
                self.ending_display_time,
            ));
        }
        if !(self.dustbunnies_per_second.is_finite() && self.dustbunnies_per_second >= 0.0) {
            return Err(ConfigurationError::InvalidRewardRate(
                self.dustbunnies_per_second,
            ));
        }
        if self.max_steps == 0 {
            return Err(ConfigurationError::ZeroMaxSteps);
        }
        Ok(())
    }
}

/// Everything needed to start a run.
///
/// Serializes flat. Deserializes from either the flat shape or the server's
/// `{"config": {...}, "seed": .., "test_mode": ..}` shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "ParamsShape")]
pub struct SimulationParams {
    #[serde(flatten)]
    pub config: GameConfig,
    /// Absent for an unseeded run
    pub seed: Option<u64>,
    /// The run is reported as a test; its award must not be credited
    pub test_mode: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ParamsShape {
    Nested {
        config: GameConfig,
        #[serde(default)]
        seed: Option<u64>,
        #[serde(default)]
        test_mode: bool,
    },
    Flat {
        #[serde(flatten)]
        config: GameConfig,
        #[serde(default)]
        seed: Option<u64>,
        #[serde(default)]
        test_mode: bool,
    },
}

impl From<ParamsShape> for SimulationParams {
    fn from(shape: ParamsShape) -> Self {
        match shape {
            ParamsShape::Nested {
                config,
                seed,
                test_mode,
            }
            | ParamsShape::Flat {
                config,
                seed,
                test_mode,
            } => Self {
                config,
                seed,
                test_mode,
            },
        }
    }
}

impl SimulationParams {
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let params: Self = serde_json::from_str(json)?;
        params.config.validate()?;
        Ok(params)
    }

    /// Parse a chat command such as `!gameoflife seed=42 pixel=20 test`.
    ///
    /// The first token is the command word. Unknown tokens and unparsable
    /// values are ignored, leaving the default in place. A seed that is not
    /// an unsigned integer is hashed into `0..1_000_000`.
    pub fn from_command(content: &str) -> Self {
        let mut params = Self::default();
        let config = &mut params.config;

        for part in content.split_whitespace().skip(1) {
            let lower = part.to_lowercase();
            if lower == "test" || lower == "testmode" {
                params.test_mode = true;
                continue;
            }
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };
            match key.to_lowercase().as_str() {
                "seed" => {
                    params.seed = Some(value.parse().unwrap_or_else(|_| hash_seed(value)));
                }
                "pixel" => set_parsed(&mut config.pixel_size, value),
                "width" => set_parsed(&mut config.width, value),
                "height" => set_parsed(&mut config.height, value),
                "duration" => set_parsed(&mut config.max_duration, value),
                "speedup" => set_parsed(&mut config.speed_up_interval, value),
                "dustbunnies" => set_parsed(&mut config.dustbunnies_per_second, value),
                "update" => set_parsed(&mut config.update_interval, value),
                "endtime" => set_parsed(&mut config.ending_display_time, value),
                "steps" => set_parsed(&mut config.max_steps, value),
                "rng" => {
                    if let Some(strategy) = SeedStrategy::from_str(value) {
                        config.seed_strategy = strategy;
                    }
                }
                other => log::debug!("Ignoring unknown argument '{}'", other),
            }
        }

        params
    }
}

fn set_parsed<T: std::str::FromStr>(slot: &mut T, value: &str) {
    if let Ok(parsed) = value.parse() {
        *slot = parsed;
    }
}

/// FNV-1a over the text, folded into six digits
pub fn hash_seed(text: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in text.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash % 1_000_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_dimensions() {
        let config = GameConfig::default();
        assert_eq!(config.grid_dimensions(), (192, 108));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_grid_dimensions_round_down() {
        let config = GameConfig {
            width: 105,
            height: 99,
            pixel_size: 10,
            ..Default::default()
        };
        assert_eq!(config.grid_dimensions(), (10, 9));
    }

    #[test]
    fn test_validate_rejects_degenerate() {
        let zero_pixel = GameConfig {
            pixel_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero_pixel.validate(),
            Err(ConfigurationError::ZeroPixelSize)
        ));

        let too_big = GameConfig {
            width: 50,
            height: 50,
            pixel_size: 64,
            ..Default::default()
        };
        assert!(matches!(
            too_big.validate(),
            Err(ConfigurationError::EmptyGrid { .. })
        ));

        let zero_width = GameConfig {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero_width.validate(),
            Err(ConfigurationError::ZeroWidth)
        ));

        let bad_interval = GameConfig {
            speed_up_interval: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            bad_interval.validate(),
            Err(ConfigurationError::InvalidSpeedUpInterval(_))
        ));

        let bad_reward = GameConfig {
            dustbunnies_per_second: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            bad_reward.validate(),
            Err(ConfigurationError::InvalidRewardRate(_))
        ));
    }

    #[test]
    fn test_non_positive_duration_is_valid() {
        let config = GameConfig {
            max_duration: -5.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_command_parsing() {
        let params = SimulationParams::from_command(
            "!gameoflife seed=42 pixel=20 duration=60 speedup=5 dustbunnies=3 update=0.25 endtime=2 test",
        );
        assert_eq!(params.seed, Some(42));
        assert!(params.test_mode);
        assert_eq!(params.config.pixel_size, 20);
        assert_eq!(params.config.max_duration, 60.0);
        assert_eq!(params.config.speed_up_interval, 5.0);
        assert_eq!(params.config.dustbunnies_per_second, 3.0);
        assert_eq!(params.config.update_interval, 0.25);
        assert_eq!(params.config.ending_display_time, 2.0);
    }

    #[test]
    fn test_command_ignores_garbage() {
        let params = SimulationParams::from_command("!gol pixel=big bogus=1 nonsense");
        assert_eq!(params.config, GameConfig::default());
        assert_eq!(params.seed, None);
        assert!(!params.test_mode);
    }

    #[test]
    fn test_text_seed_is_hashed() {
        let a = SimulationParams::from_command("!gl seed=kappa");
        let b = SimulationParams::from_command("!gl seed=kappa");
        let seed = a.seed.unwrap();
        assert_eq!(a.seed, b.seed);
        assert!(seed < 1_000_000);
        assert_ne!(hash_seed("kappa"), hash_seed("keepo"));
    }

    #[test]
    fn test_params_from_flat_json() {
        let params = SimulationParams::from_json(
            r#"{"width": 100, "height": 100, "pixel_size": 10, "seed": 42, "max_duration": 5}"#,
        )
        .unwrap();
        assert_eq!(params.seed, Some(42));
        assert_eq!(params.config.grid_dimensions(), (10, 10));
        assert_eq!(params.config.speed_up_interval, 10.0);
        assert_eq!(params.config.seed_strategy, SeedStrategy::Pcg32);
    }

    #[test]
    fn test_params_from_nested_json() {
        let params = SimulationParams::from_json(
            r#"{"config": {"width": 100, "height": 100, "pixel_size": 10, "max_duration": 5},
                "seed": 42, "test_mode": true}"#,
        )
        .unwrap();
        assert_eq!(params.seed, Some(42));
        assert!(params.test_mode);
        assert_eq!(params.config.grid_dimensions(), (10, 10));
        assert_eq!(params.config.max_duration, 5.0);
        assert_eq!(params.config.speed_up_interval, 10.0);
    }

    #[test]
    fn test_params_serialize_flat() {
        let params = SimulationParams {
            seed: Some(9),
            ..Default::default()
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["width"], 1920);
        assert_eq!(json["seed"], 9);
        let back: SimulationParams = serde_json::from_value(json).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn test_validate_rejects_non_finite_times() {
        let params = SimulationParams::from_command("!gol duration=NaN");
        assert!(matches!(
            params.config.validate(),
            Err(ConfigurationError::InvalidDuration(_))
        ));

        let forever = GameConfig {
            max_duration: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            forever.validate(),
            Err(ConfigurationError::InvalidDuration(_))
        ));

        let params = SimulationParams::from_command("!gol endtime=nan");
        assert!(matches!(
            params.config.validate(),
            Err(ConfigurationError::InvalidEndingDisplayTime(_))
        ));

        let params = SimulationParams::from_command("!gol update=0");
        assert!(matches!(
            params.config.validate(),
            Err(ConfigurationError::InvalidUpdateInterval(_))
        ));
    }

    #[test]
    fn test_json_rejects_invalid() {
        assert!(matches!(
            GameConfig::from_json(r#"{"pixel_size": 0}"#),
            Err(ConfigurationError::ZeroPixelSize)
        ));
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigurationError::Json(_))
        ));
    }
}
