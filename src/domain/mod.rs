mod cell;
mod error;
mod grid;
mod schedule;
pub mod neighborhood;
pub mod patterns;
pub mod seed;
pub mod stepper;
pub mod tile;

pub use cell::Cell;
pub use error::GridError;
pub use grid::Grid;
pub use neighborhood::{live_neighbors, next_state};
pub use patterns::{Pattern, presets};
pub use schedule::Schedule;
pub use stepper::{DEFAULT_TILE_SIZE, Stepper};
pub use tile::{Tile, Tiling};
