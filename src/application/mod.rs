mod config;
mod simulation;

pub use config::{ConfigError, SeedPlan, SimConfig};
pub use simulation::{InputEvent, PaintOutcome, Phase, Simulation, SimulationError};
