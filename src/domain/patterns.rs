//! Named patterns that can be stamped onto a grid while painting.
//!
//! Patterns are written in the plaintext `.cells` notation: `O` is alive,
//! `.` is dead, one line per row, lines starting with `!` are comments.

use super::{Cell, Grid};

/// Represents a pattern that can be placed on the grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: String,
    pub width: usize,
    pub height: usize,
    /// Offsets of alive cells relative to the top-left corner
    pub cells: Vec<(usize, usize)>,
}

impl Pattern {
    /// Parse a pattern from plaintext rows.
    /// Any character other than `.`, space or tab in a row counts as alive.
    pub fn from_plaintext(name: impl Into<String>, text: &str) -> Self {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.starts_with('!'))
            .collect();

        let cells: Vec<(usize, usize)> = rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.chars()
                    .enumerate()
                    .filter(|&(_, ch)| !matches!(ch, '.' | ' ' | '\t'))
                    .map(move |(x, _)| (x, y))
            })
            .collect();

        Self {
            name: name.into(),
            width: rows.iter().map(|row| row.chars().count()).max().unwrap_or(0),
            height: rows.len(),
            cells,
        }
    }

    /// Place pattern on grid with its top-left corner at `(x, y)`.
    /// Cells falling outside the grid are skipped; returns how many were set.
    pub fn place_on(&self, grid: &mut Grid, x: usize, y: usize) -> usize {
        self.cells
            .iter()
            .filter(|&&(dx, dy)| grid.set(x + dx, y + dy, Cell::Alive).is_ok())
            .count()
    }

    /// Alive cell positions offset to a possibly negative origin
    pub fn cells_at(&self, x: i64, y: i64) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.cells
            .iter()
            .map(move |&(dx, dy)| (x + dx as i64, y + dy as i64))
    }
}

/// Classic Life patterns
pub mod presets {
    use super::Pattern;

    const GLIDER: &str = "\
.O.
..O
OOO";

    const BLINKER: &str = "\
...
OOO";

    const TOAD: &str = "\
.OOO
OOO.";

    const BEACON: &str = "\
OO..
O...
...O
..OO";

    const PULSAR: &str = "\
..OOO...OOO..
.............
O....O.O....O
O....O.O....O
O....O.O....O
..OOO...OOO..
.............
..OOO...OOO..
O....O.O....O
O....O.O....O
O....O.O....O
.............
..OOO...OOO..";

    const LWSS: &str = "\
.O..O
O....
O...O
OOOO.";

    const R_PENTOMINO: &str = "\
.OO
OO.
.O.";

    const ACORN: &str = "\
.O.....
...O...
OO..OOO";

    const BLOCK: &str = "\
OO
OO";

    const GOSPER_GLIDER_GUN: &str = "\
! Emits a glider every 30 generations
........................O...........
......................O.O...........
............OO......OO............OO
...........O...O....OO............OO
OO........O.....O...OO..............
OO........O...O.OO....O.O...........
..........O.....O.......O...........
...........O...O....................
............OO......................";

    pub fn glider() -> Pattern {
        Pattern::from_plaintext("Glider", GLIDER)
    }

    /// Period 2 oscillator, horizontal on its second row
    pub fn blinker() -> Pattern {
        Pattern::from_plaintext("Blinker", BLINKER)
    }

    pub fn toad() -> Pattern {
        Pattern::from_plaintext("Toad", TOAD)
    }

    pub fn beacon() -> Pattern {
        Pattern::from_plaintext("Beacon", BEACON)
    }

    /// Period 3 oscillator
    pub fn pulsar() -> Pattern {
        Pattern::from_plaintext("Pulsar", PULSAR)
    }

    pub fn lwss() -> Pattern {
        Pattern::from_plaintext("LWSS", LWSS)
    }

    pub fn r_pentomino() -> Pattern {
        Pattern::from_plaintext("R-pentomino", R_PENTOMINO)
    }

    pub fn acorn() -> Pattern {
        Pattern::from_plaintext("Acorn", ACORN)
    }

    pub fn block() -> Pattern {
        Pattern::from_plaintext("Block", BLOCK)
    }

    pub fn glider_gun() -> Pattern {
        Pattern::from_plaintext("Gosper Glider Gun", GOSPER_GLIDER_GUN)
    }

    /// Get all available patterns
    pub fn all_patterns() -> Vec<Pattern> {
        vec![
            glider(),
            blinker(),
            toad(),
            beacon(),
            pulsar(),
            lwss(),
            r_pentomino(),
            acorn(),
            block(),
            glider_gun(),
        ]
    }

    /// Look up a preset by name, ignoring case
    pub fn by_name(name: &str) -> Option<Pattern> {
        all_patterns()
            .into_iter()
            .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
    }
}
