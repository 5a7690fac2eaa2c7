use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::engine::{EngineSettings, MIN_GRID_HEIGHT, MIN_GRID_WIDTH};
use crate::error::ConfigError;
use crate::grid::GridSize;
use crate::TermInt;

/// Arrow keys or WASD to steer, Space to restart, Esc to pause, q or Ctrl+C to quit.
#[derive(Debug, Clone, Parser)]
#[command(name = "snake", version, about = "Snake in the terminal")]
pub struct Config {
    /// Grid width in tiles.
    #[arg(long, default_value_t = 16)]
    pub width: TermInt,

    /// Grid height in tiles.
    #[arg(long, default_value_t = 16)]
    pub height: TermInt,

    /// Initial tick interval in milliseconds.
    #[arg(long, default_value_t = 250)]
    pub tick_ms: u64,

    /// Factor the tick interval is multiplied by after every tick.
    #[arg(long, default_value_t = 0.999)]
    pub decay: f64,

    /// Shortest tick interval in milliseconds.
    #[arg(long, default_value_t = 10)]
    pub min_tick_ms: u64,

    /// Seed for fruit placement.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (filtered by RUST_LOG, default "info").
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 16,
            height: 16,
            tick_ms: 250,
            decay: 0.999,
            min_tick_ms: 10,
            seed: None,
            log_file: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_GRID_WIDTH || self.height < MIN_GRID_HEIGHT {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
                min_width: MIN_GRID_WIDTH,
                min_height: MIN_GRID_HEIGHT,
            });
        }

        if self.tick_ms == 0 || self.min_tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }

        if self.min_tick_ms > self.tick_ms {
            return Err(ConfigError::FloorAboveInitial { min_ms: self.min_tick_ms, initial_ms: self.tick_ms });
        }

        if !(self.decay > 0.0 && self.decay <= 1.0) {
            return Err(ConfigError::Decay(self.decay));
        }

        Ok(())
    }

    pub fn grid(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            initial_tick: Duration::from_millis(self.tick_ms),
            decay: self.decay,
            min_tick: Duration::from_millis(self.min_tick_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli_defaults() {
        let parsed = Config::try_parse_from(["snake"]).unwrap();
        let default = Config::default();
        assert_eq!(parsed.grid(), default.grid());
        assert_eq!(parsed.engine_settings(), default.engine_settings());
        assert_eq!(default.engine_settings(), EngineSettings::default());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn parses_flags() {
        let cfg = Config::try_parse_from(["snake", "--width", "32", "--height", "24", "--seed", "9", "--decay", "0.99"]).unwrap();
        assert_eq!(cfg.grid(), GridSize::new(32, 24));
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.engine_settings().decay, 0.99);
    }

    #[test]
    fn rejects_bad_values() {
        let small = Config { width: 7, ..Config::default() };
        assert!(matches!(small.validate(), Err(ConfigError::GridTooSmall { .. })));

        let zero = Config { min_tick_ms: 0, ..Config::default() };
        assert!(matches!(zero.validate(), Err(ConfigError::ZeroTick)));

        let floor = Config { min_tick_ms: 300, ..Config::default() };
        assert!(matches!(floor.validate(), Err(ConfigError::FloorAboveInitial { .. })));

        for decay in [0.0, 1.5, f64::NAN] {
            let cfg = Config { decay, ..Config::default() };
            assert!(matches!(cfg.validate(), Err(ConfigError::Decay(_))));
        }
    }

    #[test]
    fn valid_config_makes_valid_engine_settings() {
        let cfg = Config { tick_ms: 100, min_tick_ms: 100, decay: 1.0, ..Config::default() };
        assert!(cfg.validate().is_ok());
        assert!(cfg.engine_settings().is_valid());
    }
}
