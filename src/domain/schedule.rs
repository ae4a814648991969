//! How the stepper dispatches tiles.
//!
//! Every schedule produces byte-identical generations; they only differ
//! in how the per-tile work is spread across threads.

/// Available dispatch strategies for one generation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Schedule {
    /// Tiles visited one after another on the calling thread
    Serial,
    /// Tiles forked onto the rayon pool, joined before the step returns
    #[default]
    Tiled,
}

impl Schedule {
    /// Get all available schedules
    pub fn all() -> Vec<Schedule> {
        vec![Schedule::Serial, Schedule::Tiled]
    }

    /// Short display name
    pub fn name(&self) -> &'static str {
        match self {
            Schedule::Serial => "Serial",
            Schedule::Tiled => "Tiled+Par",
        }
    }
}
