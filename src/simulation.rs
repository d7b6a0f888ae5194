use std::path::PathBuf;
use std::time::Duration;

use rand::Rng;

use crate::clock::SimulationClock;
use crate::config::Config;
use crate::grid::{Grid, GridError};
use crate::persistence::{self, PersistError};
use crate::rules;

/// Severity of a status line shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub level: StatusLevel,
    pub text: String,
}

/// The simulation context owned by the control loop.
///
/// Holds the single live grid. The four mutation paths are toggle, step,
/// load, and startup; each goes through a method here or through the
/// controller, never through the renderer.
pub struct Simulation {
    pub grid: Grid,
    pub clock: SimulationClock,
    pub save_path: PathBuf,
    pub generation: u64,
    pub status: Option<Status>,
}

impl Simulation {
    pub fn new(grid: Grid, config: &Config) -> Self {
        Self {
            grid,
            clock: SimulationClock::new(config.tick_interval),
            save_path: config.save_path.clone(),
            generation: 0,
            status: None,
        }
    }

    /// Restore the saved grid if there is a usable one, otherwise start from
    /// a random grid.
    pub fn startup<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> Result<Self, GridError> {
        let (w, h) = (config.grid_width, config.grid_height);
        let grid = match persistence::load_expecting(&config.save_path, w, h) {
            Ok(grid) => {
                log::info!("Restored {}x{} grid from {}", w, h, config.save_path.display());
                grid
            }
            Err(e) if e.is_not_found() => {
                log::info!("No save file at {}, starting from a random grid", config.save_path.display());
                Grid::random(w, h, config.live_probability, rng)?
            }
            Err(e) => {
                log::warn!("Ignoring unusable save file {}: {}", config.save_path.display(), e);
                Grid::random(w, h, config.live_probability, rng)?
            }
        };
        Ok(Self::new(grid, config))
    }

    /// Advance one generation if the clock allows it. Returns whether the grid changed.
    pub fn advance(&mut self, now: Duration) -> bool {
        if !self.clock.tick(now) {
            return false;
        }
        self.grid = rules::step(&self.grid);
        self.generation += 1;
        log::debug!("Generation {} ({} live)", self.generation, self.grid.live_count());
        true
    }

    pub fn save(&mut self) -> Result<(), PersistError> {
        let result = persistence::save(&self.grid, &self.save_path);
        match &result {
            Ok(()) => {
                log::info!("Saved grid to {}", self.save_path.display());
                self.report(StatusLevel::Info, "Saved".to_string());
            }
            Err(e) => {
                log::warn!("Save to {} failed: {}", self.save_path.display(), e);
                self.report(StatusLevel::Error, format!("Save failed: {e}"));
            }
        }
        result
    }

    /// Replace the grid with the saved one. On any failure the current grid is kept.
    pub fn load(&mut self) -> Result<(), PersistError> {
        let loaded =
            persistence::load_expecting(&self.save_path, self.grid.width(), self.grid.height());
        match loaded {
            Ok(grid) => {
                self.grid = grid;
                log::info!("Loaded grid from {}", self.save_path.display());
                self.report(StatusLevel::Info, "Loaded".to_string());
                Ok(())
            }
            Err(e) => {
                log::warn!("Load from {} failed: {}", self.save_path.display(), e);
                self.report(StatusLevel::Error, format!("Load failed: {e}"));
                Err(e)
            }
        }
    }

    fn report(&mut self, level: StatusLevel, text: String) {
        self.status = Some(Status { level, text });
    }
}
