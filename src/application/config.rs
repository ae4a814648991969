use crate::domain::{DEFAULT_TILE_SIZE, Grid, Schedule};
use std::time::Duration;

/// What the generation pair is filled with before painting begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SeedPlan {
    /// Every cell alive with `fill_probability`
    #[default]
    Random,
    /// All cells dead
    Empty,
    /// Random fill with a cleared corner holding a column of glider guns
    GliderGuns,
}

/// Invalid configuration values, caught before anything is allocated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("a {width}x{height} grid is too large to allocate")]
    TooLarge { width: usize, height: usize },

    #[error("tile size must be positive")]
    ZeroTileSize,

    #[error("fill probability must lie in [0, 1], got {0}")]
    FillProbability(f64),

    #[error("thread count must be positive")]
    ZeroThreads,

    #[error("display scale must be positive")]
    ZeroScale,
}

/// Fixed values supplied at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub width: usize,
    pub height: usize,
    pub tile_size: usize,
    /// Probability that a seeded cell starts alive
    pub fill_probability: f64,
    /// Fixed RNG seed; `None` seeds from the OS
    pub rng_seed: Option<u64>,
    /// Dedicated worker count; `None` uses the global rayon pool
    pub threads: Option<usize>,
    pub schedule: Schedule,
    pub seed_plan: SeedPlan,
    /// Screen pixels per cell
    pub scale: u32,
    /// Pause between generations while running
    pub step_delay: Duration,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            tile_size: DEFAULT_TILE_SIZE,
            fill_probability: 0.2,
            rng_seed: None,
            threads: None,
            schedule: Schedule::default(),
            seed_plan: SeedPlan::default(),
            scale: 4,
            step_delay: Duration::ZERO,
        }
    }
}

impl SimConfig {
    /// Config for a grid of the given size, other values at their defaults
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if Grid::cell_count(self.width, self.height).is_err() {
            return Err(ConfigError::TooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        if !(0.0..=1.0).contains(&self.fill_probability) {
            return Err(ConfigError::FillProbability(self.fill_probability));
        }
        if self.threads == Some(0) {
            return Err(ConfigError::ZeroThreads);
        }
        if self.scale == 0 {
            return Err(ConfigError::ZeroScale);
        }
        Ok(())
    }
}
