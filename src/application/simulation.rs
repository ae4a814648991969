use super::config::{ConfigError, SeedPlan, SimConfig};
use crate::domain::{Cell, Grid, GridError, Pattern, Stepper, seed};
use rand::{SeedableRng, rngs::StdRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Generations between two population reports in the log
const HEARTBEAT_INTERVAL: u64 = 300;

/// Driver state. `Painting` is initial and is left exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Painting,
    Running,
}

/// Events delivered by the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Paint the cell at `(x, y)` alive
    Toggle { x: i64, y: i64 },
    /// Leave painting and begin stepping
    Start,
}

/// What a paint request did to the current buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintOutcome {
    /// A dead cell became alive
    Painted,
    /// The cell was already alive
    AlreadyAlive,
    /// Outside the grid, or painting has ended
    Ignored,
}

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build the tile worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("the simulation is still painting")]
    NotRunning,
}

/// Simulation orchestrates the generation pair.
///
/// `buffers[current]` always holds the latest complete generation; a step
/// reads it, writes the other buffer, and only then flips `current`.
pub struct Simulation {
    buffers: [Grid; 2],
    current: usize,
    phase: Phase,
    stepper: Stepper,
    generation: u64,
    last_step_time_ms: f32,
}

impl Simulation {
    /// Build the generation pair from the configured seed plan
    pub fn new(config: &SimConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let (width, height) = (config.width, config.height);
        let mut grid = match config.seed_plan {
            SeedPlan::Empty => Grid::try_new(width, height)?,
            SeedPlan::Random | SeedPlan::GliderGuns => {
                let mut rng = match config.rng_seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_os_rng(),
                };
                let cells =
                    seed::random_cells(width, height, config.fill_probability, &mut rng)?;
                Grid::from_cells(width, height, cells)?
            }
        };
        if config.seed_plan == SeedPlan::GliderGuns {
            seed::glider_gun_battery(&mut grid);
        }
        Self::with_grid(config, grid)
    }

    /// Build the generation pair from exactly `width * height` external cells
    pub fn from_seed(config: &SimConfig, cells: &[Cell]) -> Result<Self, SimulationError> {
        config.validate()?;
        let grid = Grid::from_cells(config.width, config.height, cells.to_vec())?;
        Self::with_grid(config, grid)
    }

    fn with_grid(config: &SimConfig, grid: Grid) -> Result<Self, SimulationError> {
        let mut stepper = Stepper::new(config.tile_size, config.schedule);
        if let Some(threads) = config.threads {
            stepper = stepper.with_threads(threads)?;
        }

        log::info!(
            "{}x{} grid, {}-cell tiles, {} schedule on {} threads, {} alive",
            config.width,
            config.height,
            config.tile_size,
            stepper.schedule().name(),
            stepper.threads(),
            grid.population()
        );

        // Both buffers start identical so the first step reads the painted seed
        Ok(Self {
            buffers: [grid.clone(), grid],
            current: 0,
            phase: Phase::Painting,
            stepper,
            generation: 0,
            last_step_time_ms: 0.0,
        })
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running)
    }

    /// Completed generations since start
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Which buffer holds the latest generation (0 or 1)
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// The latest complete generation; the only buffer a display may read
    pub fn current(&self) -> &Grid {
        &self.buffers[self.current]
    }

    /// Either buffer of the pair
    pub fn buffer(&self, index: usize) -> Option<&Grid> {
        self.buffers.get(index)
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.current().dimensions()
    }

    pub fn population(&self) -> usize {
        self.current().population()
    }

    pub fn stepper(&self) -> &Stepper {
        &self.stepper
    }

    /// Wall time of the last step
    pub const fn last_step_time_ms(&self) -> f32 {
        self.last_step_time_ms
    }

    /// Set the cell at `(x, y)` of the current buffer alive.
    /// Out-of-range coordinates and paints after start are ignored.
    pub fn paint(&mut self, x: i64, y: i64) -> PaintOutcome {
        if self.is_running() {
            log::debug!("ignoring paint at ({x}, {y}): simulation is running");
            return PaintOutcome::Ignored;
        }
        let (Ok(ux), Ok(uy)) = (usize::try_from(x), usize::try_from(y)) else {
            log::debug!("ignoring paint at ({x}, {y}): negative coordinate");
            return PaintOutcome::Ignored;
        };

        match self.buffers[self.current].set(ux, uy, Cell::Alive) {
            Ok(Cell::Dead) => {
                log::info!("painted cell ({x}, {y})");
                PaintOutcome::Painted
            }
            Ok(Cell::Alive) => PaintOutcome::AlreadyAlive,
            Err(err) => {
                log::debug!("ignoring paint: {err}");
                PaintOutcome::Ignored
            }
        }
    }

    /// Paint every alive cell of `pattern` with its top-left corner at `(x, y)`.
    /// Returns the number of cells that changed.
    pub fn stamp(&mut self, pattern: &Pattern, x: i64, y: i64) -> usize {
        pattern
            .cells_at(x, y)
            .filter(|&(cx, cy)| self.paint(cx, cy) == PaintOutcome::Painted)
            .count()
    }

    /// Replace the current buffer with exactly `width * height` cells
    pub fn reload(&mut self, cells: &[Cell]) -> Result<(), SimulationError> {
        self.buffers[self.current].load(cells)?;
        Ok(())
    }

    /// Leave painting. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.phase = Phase::Running;
        log::info!("start simulating with {} alive", self.population());
        true
    }

    /// Apply one input event. Returns whether it changed anything.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Toggle { x, y } => self.paint(x, y) == PaintOutcome::Painted,
            InputEvent::Start => self.start(),
        }
    }

    /// Advance one generation: read `buffers[current]`, write the other
    /// buffer, then flip `current`. On error nothing is flipped.
    pub fn step(&mut self) -> Result<(), SimulationError> {
        if !self.is_running() {
            return Err(SimulationError::NotRunning);
        }

        let started = Instant::now();
        let [first, second] = &mut self.buffers;
        let (source, target) = if self.current == 0 {
            (&*first, second)
        } else {
            (&*second, first)
        };
        self.stepper.step(source, target)?;

        // Barrier passed: every cell of the target is written
        self.current = 1 - self.current;
        self.generation += 1;
        self.last_step_time_ms = started.elapsed().as_secs_f32() * 1000.0;

        log::trace!("generation {} in {:.2}ms", self.generation, self.last_step_time_ms);
        if self.generation % HEARTBEAT_INTERVAL == 0 {
            log::info!("generation {}: {} alive", self.generation, self.population());
        }
        Ok(())
    }

    /// Advance a fixed number of generations
    pub fn run_for(&mut self, generations: u64) -> Result<(), SimulationError> {
        (0..generations).try_for_each(|_| self.step())
    }

    /// Step until `stop` is raised. The flag is checked between steps only,
    /// so a stop never interrupts a generation. Returns the steps taken.
    pub fn run_until(&mut self, stop: &AtomicBool) -> Result<u64, SimulationError> {
        let mut steps = 0;
        while !stop.load(Ordering::Acquire) {
            self.step()?;
            steps += 1;
        }
        log::info!("stopped after {steps} steps at generation {}", self.generation);
        Ok(steps)
    }
}
