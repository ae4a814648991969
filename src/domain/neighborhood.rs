//! Neighbor sampling and the B3/S23 transition for a single cell.
//!
//! The universe is finite: positions outside `[0, width) × [0, height)`
//! count as dead. Nothing wraps to the opposite edge.

use super::{Cell, Grid, GridError};

/// Count alive cells among the 8 neighbors of `(x, y)`
pub fn live_neighbors(grid: &Grid, x: usize, y: usize) -> Result<u8, GridError> {
    grid.get(x, y)?;
    Ok(live_neighbors_unchecked(grid, x, y))
}

/// Next value of the cell at `(x, y)`, read from `grid`
pub fn next_state(grid: &Grid, x: usize, y: usize) -> Result<Cell, GridError> {
    grid.get(x, y)?;
    Ok(next_state_unchecked(grid, x, y))
}

/// Neighbor count for a position already known to be inside the grid.
/// The sampling window is clipped to the grid instead of wrapped.
#[inline]
pub(crate) fn live_neighbors_unchecked(grid: &Grid, x: usize, y: usize) -> u8 {
    let (width, height) = grid.dimensions();
    let (x0, x1) = (x.saturating_sub(1), (x + 1).min(width - 1));
    let (y0, y1) = (y.saturating_sub(1), (y + 1).min(height - 1));

    (y0..=y1)
        .flat_map(|ny| (x0..=x1).map(move |nx| (nx, ny)))
        .filter(|&pos| pos != (x, y))
        .filter(|&(nx, ny)| grid.cell_at(nx, ny).is_alive())
        .count() as u8
}

#[inline]
pub(crate) fn next_state_unchecked(grid: &Grid, x: usize, y: usize) -> Cell {
    grid.cell_at(x, y).evolve(live_neighbors_unchecked(grid, x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from_rows(rows: &[&str]) -> Grid {
        let height = rows.len();
        let width = rows[0].len();
        let cells = rows
            .iter()
            .flat_map(|row| row.bytes().map(|b| Cell::from(b == b'#')))
            .collect();
        Grid::from_cells(width, height, cells).unwrap()
    }

    #[test]
    fn test_counts_all_eight_neighbors() {
        let grid = grid_from_rows(&["###", "###", "###"]);
        assert_eq!(live_neighbors(&grid, 1, 1), Ok(8));
    }

    #[test]
    fn test_corner_uses_only_in_bounds_neighbors() {
        // Opposite corners and edges are alive; a wrapping universe would count them.
        let grid = grid_from_rows(&[
            ".#..#",
            "##..#",
            ".....",
            ".....",
            "#####",
        ]);
        assert_eq!(live_neighbors(&grid, 0, 0), Ok(3));
        assert_eq!(next_state(&grid, 0, 0), Ok(Cell::Alive));
    }

    #[test]
    fn test_every_corner_and_edge_is_clamped() {
        let grid = grid_from_rows(&["#####", "#####", "#####", "#####", "#####"]);
        for &(x, y) in &[(0, 0), (4, 0), (0, 4), (4, 4)] {
            assert_eq!(live_neighbors(&grid, x, y), Ok(3), "corner ({x}, {y})");
        }
        for &(x, y) in &[(2, 0), (0, 2), (4, 2), (2, 4)] {
            assert_eq!(live_neighbors(&grid, x, y), Ok(5), "edge ({x}, {y})");
        }
        assert_eq!(live_neighbors(&grid, 2, 2), Ok(8));
    }

    #[test]
    fn test_single_row_and_column_grids() {
        let row = grid_from_rows(&["###"]);
        assert_eq!(live_neighbors(&row, 1, 0), Ok(2));
        assert_eq!(live_neighbors(&row, 0, 0), Ok(1));

        let single = grid_from_rows(&["#"]);
        assert_eq!(live_neighbors(&single, 0, 0), Ok(0));
        assert_eq!(next_state(&single, 0, 0), Ok(Cell::Dead));
    }

    #[test]
    fn test_transition_thresholds() {
        // Center cell alive, neighbors added one by one
        let layouts = [
            (["...", ".#.", "..."], Cell::Dead),
            (["#..", ".#.", "..."], Cell::Dead),
            (["##.", ".#.", "..."], Cell::Alive),
            (["###", ".#.", "..."], Cell::Alive),
            (["###", "##.", "..."], Cell::Dead),
        ];
        for (rows, expected) in layouts {
            let grid = grid_from_rows(&rows);
            assert_eq!(next_state(&grid, 1, 1), Ok(expected), "{rows:?}");
        }

        let birth = grid_from_rows(&["###", "...", "..."]);
        assert_eq!(next_state(&birth, 1, 1), Ok(Cell::Alive));
        let crowded = grid_from_rows(&["###", "#..", "..."]);
        assert_eq!(next_state(&crowded, 1, 1), Ok(Cell::Dead));
    }

    #[test]
    fn test_out_of_bounds_coordinate() {
        let grid = Grid::new(3, 3);
        assert!(matches!(live_neighbors(&grid, 3, 0), Err(GridError::OutOfBounds { .. })));
        assert!(next_state(&grid, 0, 3).is_err());
    }
}
