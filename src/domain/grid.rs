use super::{Cell, GridError};

/// Grid holds the cell data for one generation.
/// Fixed-size, dense, row-major: cell `(x, y)` lives at index `x + width * y`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

/// Largest cell count a single buffer may hold; a `Vec` cannot exceed `isize::MAX` bytes
const MAX_CELLS: usize = isize::MAX as usize / std::mem::size_of::<Cell>();

impl Grid {
    /// Number of cells in a `width` x `height` grid, if one can be allocated
    pub fn cell_count(width: usize, height: usize) -> Result<usize, GridError> {
        width
            .checked_mul(height)
            .filter(|&count| count <= MAX_CELLS)
            .ok_or(GridError::TooLarge { width, height })
    }

    /// Create a new grid with all cells initially dead
    ///
    /// # Panics
    ///
    /// Panics if `width * height` cells cannot be addressed; use
    /// [`Grid::try_new`] for dimensions that come from outside the program.
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Ok(grid) => grid,
            Err(err) => panic!("{err}"),
        }
    }

    /// Create a new dead grid, rejecting dimensions whose cell count overflows
    pub fn try_new(width: usize, height: usize) -> Result<Self, GridError> {
        let count = Self::cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Dead; count],
        })
    }

    /// Create a grid from exactly `width * height` cells
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, GridError> {
        let expected = Self::cell_count(width, height)?;
        if cells.len() != expected {
            return Err(GridError::SeedLengthMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { width, height, cells })
    }

    /// Get grid dimensions
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Convert 2D coordinates to the linear index
    #[inline]
    pub(crate) const fn index(&self, x: usize, y: usize) -> usize {
        x + self.width * y
    }

    const fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn check(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if self.contains(x, y) {
            Ok(self.index(x, y))
        } else {
            Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Get cell at position
    pub fn get(&self, x: usize, y: usize) -> Result<Cell, GridError> {
        self.check(x, y).map(|idx| self.cells[idx])
    }

    /// Whether the cell at position is alive
    pub fn is_alive(&self, x: usize, y: usize) -> Result<bool, GridError> {
        self.get(x, y).map(Cell::is_alive)
    }

    /// Set cell at position, returning the previous value
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> Result<Cell, GridError> {
        let idx = self.check(x, y)?;
        Ok(std::mem::replace(&mut self.cells[idx], cell))
    }

    /// Cell at an index the caller already knows is in range
    #[inline]
    pub(crate) fn cell_at(&self, x: usize, y: usize) -> Cell {
        self.cells[self.index(x, y)]
    }

    /// Overwrite the whole buffer from exactly `width * height` cells
    pub fn load(&mut self, cells: &[Cell]) -> Result<(), GridError> {
        if cells.len() != self.cells.len() {
            return Err(GridError::SeedLengthMismatch {
                expected: self.cells.len(),
                actual: cells.len(),
            });
        }
        self.cells.copy_from_slice(cells);
        Ok(())
    }

    /// Overwrite the whole buffer from binary values (non-zero is alive)
    pub fn load_bits(&mut self, bits: &[u8]) -> Result<(), GridError> {
        let cells: Vec<Cell> = bits.iter().copied().map(Cell::from_bit).collect();
        self.load(&cells)
    }

    /// Row-major view of every cell, for display collaborators
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Kill every cell inside the rectangle, clipped to the grid
    pub fn clear_region(&mut self, x: usize, y: usize, width: usize, height: usize) {
        let x_end = (x + width).min(self.width);
        let y_end = (y + height).min(self.height);
        for row in y.min(y_end)..y_end {
            let start = self.index(x.min(x_end), row);
            let end = self.index(x_end, row);
            self.cells[start..end].fill(Cell::Dead);
        }
    }

    /// Number of alive cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Iterate over all cells with their positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, &cell)| (idx % self.width, idx / self.width, cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_dead() {
        let grid = Grid::new(7, 5);
        assert_eq!(grid.dimensions(), (7, 5));
        assert_eq!(grid.len(), 35);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_linear_index_layout() {
        let mut grid = Grid::new(4, 3);
        grid.set(3, 1, Cell::Alive).unwrap();
        assert_eq!(grid.cells()[3 + 4 * 1], Cell::Alive);
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn test_set_returns_previous() {
        let mut grid = Grid::new(3, 3);
        assert_eq!(grid.set(1, 1, Cell::Alive), Ok(Cell::Dead));
        assert_eq!(grid.set(1, 1, Cell::Alive), Ok(Cell::Alive));
        assert_eq!(grid.is_alive(1, 1), Ok(true));
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut grid = Grid::new(10, 8);
        let err = GridError::OutOfBounds { x: 10, y: 0, width: 10, height: 8 };
        assert_eq!(grid.get(10, 0), Err(err.clone()));
        assert_eq!(grid.set(10, 0, Cell::Alive), Err(err));
        assert!(grid.get(0, 8).is_err());
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_load_replaces_everything() {
        let mut grid = Grid::new(2, 2);
        grid.load_bits(&[1, 0, 0, 1]).unwrap();
        assert_eq!(grid.get(0, 0), Ok(Cell::Alive));
        assert_eq!(grid.get(1, 0), Ok(Cell::Dead));
        assert_eq!(grid.get(1, 1), Ok(Cell::Alive));
    }

    #[test]
    fn test_load_rejects_wrong_length() {
        let mut grid = Grid::new(2, 2);
        grid.set(0, 0, Cell::Alive).unwrap();
        assert_eq!(
            grid.load(&[Cell::Alive; 3]),
            Err(GridError::SeedLengthMismatch { expected: 4, actual: 3 })
        );
        // Untouched on failure
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn test_from_cells_validates_length() {
        assert!(Grid::from_cells(3, 3, vec![Cell::Dead; 9]).is_ok());
        assert!(matches!(
            Grid::from_cells(3, 3, vec![Cell::Dead; 8]),
            Err(GridError::SeedLengthMismatch { expected: 9, actual: 8 })
        ));
    }

    #[test]
    fn test_overflowing_dimensions_are_rejected() {
        let err = GridError::TooLarge { width: usize::MAX, height: 2 };
        assert_eq!(Grid::cell_count(usize::MAX, 2), Err(err.clone()));
        assert_eq!(Grid::try_new(usize::MAX, 2), Err(err.clone()));
        // A wrapped product must not let an empty buffer through
        assert_eq!(Grid::from_cells(usize::MAX, 2, Vec::new()), Err(err));
        assert_eq!(Grid::cell_count(7, 5), Ok(35));
    }

    #[test]
    fn test_clear_region_is_clipped() {
        let mut grid = Grid::from_cells(4, 4, vec![Cell::Alive; 16]).unwrap();
        grid.clear_region(2, 2, 10, 10);
        assert_eq!(grid.population(), 12);
        assert_eq!(grid.get(3, 3), Ok(Cell::Dead));
        assert_eq!(grid.get(1, 3), Ok(Cell::Alive));

        grid.clear_region(9, 9, 2, 2);
        assert_eq!(grid.population(), 12);
    }

    #[test]
    fn test_iter_cells_positions() {
        let mut grid = Grid::new(3, 2);
        grid.set(2, 1, Cell::Alive).unwrap();
        let alive: Vec<_> = grid
            .iter_cells()
            .filter(|(_, _, cell)| cell.is_alive())
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(alive, vec![(2, 1)]);
    }
}
