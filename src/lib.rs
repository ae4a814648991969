// Domain layer - generation pair, neighbor rule and tiled stepper
pub mod domain;

// Application layer - driver state machine and configuration
pub mod application;

// Infrastructure layer - rendering and input collaborators
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{Cell, Grid, GridError, Pattern, Schedule, Stepper, presets};
pub use application::{
    InputEvent, PaintOutcome, Phase, SeedPlan, SimConfig, Simulation, SimulationError,
};
