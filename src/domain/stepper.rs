//! Tiled generation stepper.
//!
//! One step reads only the source grid and writes only the target grid.
//! The target is split into disjoint per-tile row slices, so tiles can be
//! computed in any order (or concurrently) without locks, and the step
//! returns only after every tile has been written.

use super::neighborhood::next_state_unchecked;
use super::tile::{Tile, Tiling};
use super::{Cell, Grid, GridError, Schedule};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

/// Default tile edge length in cells
pub const DEFAULT_TILE_SIZE: usize = 30;

/// Mutable rows of the target that belong to a single tile
struct TileRows<'a> {
    tile: Tile,
    rows: Vec<&'a mut [Cell]>,
}

impl TileRows<'_> {
    fn compute(self, source: &Grid) {
        let Tile { x, y, .. } = self.tile;
        for (dy, row) in self.rows.into_iter().enumerate() {
            for (dx, cell) in row.iter_mut().enumerate() {
                *cell = next_state_unchecked(source, x + dx, y + dy);
            }
        }
    }
}

/// Produces the next generation of a grid, one tile at a time.
pub struct Stepper {
    tile_size: usize,
    schedule: Schedule,
    pool: Option<ThreadPool>,
}

impl Stepper {
    /// Create a stepper using the global rayon pool for tiled schedules
    pub fn new(tile_size: usize, schedule: Schedule) -> Self {
        Self {
            tile_size: tile_size.max(1),
            schedule,
            pool: None,
        }
    }

    /// Run tiled steps on a dedicated pool with a fixed worker count
    pub fn with_threads(mut self, threads: usize) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|idx| format!("life-tile-{idx}"))
            .build()?;
        self.pool = Some(pool);
        Ok(self)
    }

    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    pub const fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Worker count available to tiled steps
    pub fn threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Compute one generation of `source` into `target`.
    /// `target` is fully overwritten; `source` is never written.
    pub fn step(&self, source: &Grid, target: &mut Grid) -> Result<(), GridError> {
        if source.dimensions() != target.dimensions() {
            return Err(GridError::DimensionMismatch {
                from: source.dimensions(),
                to: target.dimensions(),
            });
        }
        if source.is_empty() {
            return Ok(());
        }

        match (self.schedule, &self.pool) {
            (Schedule::Serial, _) => self.step_serial(source, target),
            (Schedule::Tiled, Some(pool)) => pool.install(|| self.step_tiled(source, target)),
            (Schedule::Tiled, None) => self.step_tiled(source, target),
        }
        Ok(())
    }

    fn tiling(&self, grid: &Grid) -> Tiling {
        let (width, height) = grid.dimensions();
        Tiling::new(width, height, self.tile_size)
    }

    fn step_serial(&self, source: &Grid, target: &mut Grid) {
        let tiling = self.tiling(source);
        let cells = target.cells_mut();
        let width = source.dimensions().0;
        for tile in tiling.tiles() {
            for (x, y) in tile.positions() {
                cells[x + width * y] = next_state_unchecked(source, x, y);
            }
        }
    }

    fn step_tiled(&self, source: &Grid, target: &mut Grid) {
        let tiling = self.tiling(source);
        let columns = tiling.columns();
        let width = source.dimensions().0;

        let mut work: Vec<TileRows<'_>> = tiling
            .tiles()
            .map(|tile| TileRows {
                tile,
                rows: Vec::with_capacity(tile.height),
            })
            .collect();

        // Hand each row segment of the target to the tile that owns it
        for (y, row) in target.cells_mut().chunks_mut(width).enumerate() {
            let first = (y / tiling.tile_size()) * columns;
            let mut rest = row;
            for col in 0..columns {
                let (segment, tail) =
                    std::mem::take(&mut rest).split_at_mut(tiling.column_width(col));
                work[first + col].rows.push(segment);
                rest = tail;
            }
        }

        work.into_par_iter().for_each(|tile| tile.compute(source));
    }
}

impl Default for Stepper {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_SIZE, Schedule::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{patterns::presets, seed::random_cells};
    use rand::{SeedableRng, rngs::StdRng};

    fn random_grid(width: usize, height: usize, seed: u64) -> Grid {
        let mut rng = StdRng::seed_from_u64(seed);
        let cells = random_cells(width, height, 0.3, &mut rng).unwrap();
        Grid::from_cells(width, height, cells).unwrap()
    }

    fn step_once(stepper: &Stepper, source: &Grid) -> Grid {
        let (width, height) = source.dimensions();
        let mut target = Grid::new(width, height);
        stepper.step(source, &mut target).unwrap();
        target
    }

    #[test]
    #[rustfmt::skip]
    fn test_block_still_life() {
        // 4x4 universe with a 2x2 block at (1, 1)
        let mut grid = Grid::new(4, 4);
        grid.load_bits(&[
            0, 0, 0, 0,
            0, 1, 1, 0,
            0, 1, 1, 0,
            0, 0, 0, 0,
        ])
        .unwrap();

        for schedule in Schedule::all() {
            let next = step_once(&Stepper::new(2, schedule), &grid);
            assert_eq!(next, grid, "{}", schedule.name());
        }
    }

    #[test]
    fn test_blinker_oscillates() {
        let stepper = Stepper::default();
        let mut grid = Grid::new(10, 10);
        presets::blinker().place_on(&mut grid, 4, 4);
        // Horizontal at row 5
        assert_eq!(grid.is_alive(4, 5), Ok(true));

        let next = step_once(&stepper, &grid);
        assert_eq!(next.is_alive(5, 4), Ok(true));
        assert_eq!(next.is_alive(5, 5), Ok(true));
        assert_eq!(next.is_alive(5, 6), Ok(true));
        assert_eq!(next.population(), 3);

        assert_eq!(step_once(&stepper, &next), grid);
    }

    #[test]
    fn test_source_is_not_modified() {
        let source = random_grid(40, 40, 7);
        let snapshot = source.clone();
        let _ = step_once(&Stepper::new(7, Schedule::Tiled), &source);
        assert_eq!(source, snapshot);
    }

    #[test]
    fn test_target_is_fully_overwritten() {
        let source = Grid::new(33, 17);
        let mut target = Grid::from_cells(33, 17, vec![Cell::Alive; 33 * 17]).unwrap();
        Stepper::new(8, Schedule::Tiled).step(&source, &mut target).unwrap();
        assert_eq!(target.population(), 0);
    }

    #[test]
    fn test_schedules_and_tile_sizes_agree() {
        let source = random_grid(97, 61, 42);
        let reference = step_once(&Stepper::new(1, Schedule::Serial), &source);

        for tile_size in [1, 3, 30, 64, 500] {
            for schedule in Schedule::all() {
                let next = step_once(&Stepper::new(tile_size, schedule), &source);
                assert_eq!(
                    next.cells(),
                    reference.cells(),
                    "tile {tile_size} {}",
                    schedule.name()
                );
            }
        }
    }

    #[test]
    fn test_thread_count_does_not_change_result() {
        let source = random_grid(120, 90, 3);
        let reference = step_once(&Stepper::new(30, Schedule::Serial), &source);

        for threads in [1, 2, 4] {
            let stepper = Stepper::new(30, Schedule::Tiled).with_threads(threads).unwrap();
            assert_eq!(stepper.threads(), threads);
            for _ in 0..3 {
                assert_eq!(step_once(&stepper, &source), reference, "{threads} threads");
            }
        }
    }

    #[test]
    fn test_glider_crosses_tile_boundaries() {
        let stepper = Stepper::new(5, Schedule::Tiled);
        let mut grid = Grid::new(20, 20);
        presets::glider().place_on(&mut grid, 3, 3);

        let mut expected = Grid::new(20, 20);
        presets::glider().place_on(&mut expected, 4, 4);

        for _ in 0..4 {
            grid = step_once(&stepper, &grid);
        }
        assert_eq!(grid, expected);
    }

    #[test]
    fn test_dimension_mismatch() {
        let source = Grid::new(10, 10);
        let mut target = Grid::new(10, 11);
        assert_eq!(
            Stepper::default().step(&source, &mut target),
            Err(GridError::DimensionMismatch { from: (10, 10), to: (10, 11) })
        );
    }

    #[test]
    fn test_empty_grid_is_noop() {
        let source = Grid::new(0, 0);
        let mut target = Grid::new(0, 0);
        assert!(Stepper::default().step(&source, &mut target).is_ok());
    }
}
