//! Error conditions raised by grid access and stepping.

/// Errors raised by [`Grid`](super::Grid) access and the stepper.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("cannot step a {}x{} grid into a {}x{} grid", from.0, from.1, to.0, to.1)]
    DimensionMismatch {
        from: (usize, usize),
        to: (usize, usize),
    },

    #[error("seed holds {actual} cells but the grid needs {expected}")]
    SeedLengthMismatch { expected: usize, actual: usize },

    #[error("a {width}x{height} grid holds more cells than can be addressed")]
    TooLarge { width: usize, height: usize },
}
