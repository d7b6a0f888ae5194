use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

// Defaults
pub const GRID_WIDTH: usize = 40;
pub const GRID_HEIGHT: usize = 30;
pub const CELL_SIZE: u32 = 20; // pixels per cell edge
pub const BUTTON_BAR_HEIGHT: u32 = 70;
pub const TICK_INTERVAL: Duration = Duration::from_millis(500);
pub const LIVE_PROBABILITY: f64 = 0.2;
pub const SAVE_PATH: &str = "save_state.json";

/// Everything the simulation and window need to know up front.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub grid_width: usize,
    pub grid_height: usize,
    pub cell_size: u32,
    pub button_bar_height: u32,
    pub tick_interval: Duration,
    pub live_probability: f64,
    pub save_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            cell_size: CELL_SIZE,
            button_bar_height: BUTTON_BAR_HEIGHT,
            tick_interval: TICK_INTERVAL,
            live_probability: LIVE_PROBABILITY,
            save_path: PathBuf::from(SAVE_PATH),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    EmptyGrid,
    ZeroCellSize,
    /// The button bar cannot hold the fixed-height buttons.
    ButtonBarTooShort { height: u32, required: u32 },
    ProbabilityOutOfRange(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid dimensions must be non-zero"),
            Self::ZeroCellSize => write!(f, "cell size must be at least one pixel"),
            Self::ButtonBarTooShort { height, required } => {
                write!(f, "button bar is {height}px, needs at least {required}px")
            }
            Self::ProbabilityOutOfRange(p) => {
                write!(f, "live probability {p} is outside [0, 1]")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        let required = crate::layout::BUTTON_MARGIN + crate::layout::BUTTON_HEIGHT;
        if self.button_bar_height < required {
            return Err(ConfigError::ButtonBarTooShort {
                height: self.button_bar_height,
                required,
            });
        }
        if !(0.0..=1.0).contains(&self.live_probability) {
            return Err(ConfigError::ProbabilityOutOfRange(self.live_probability));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!((config.grid_width, config.grid_height), (40, 30));
        assert_eq!(config.save_path, PathBuf::from("save_state.json"));
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = Config::default();
        config.grid_height = 0;
        assert_eq!(config.validate(), Err(ConfigError::EmptyGrid));

        let mut config = Config::default();
        config.cell_size = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroCellSize));

        let mut config = Config::default();
        config.button_bar_height = 30;
        assert!(matches!(config.validate(), Err(ConfigError::ButtonBarTooShort { .. })));

        let mut config = Config::default();
        config.live_probability = 1.5;
        assert_eq!(config.validate(), Err(ConfigError::ProbabilityOutOfRange(1.5)));
    }
}
