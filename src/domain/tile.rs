//! Tiling of the grid into rectangular units of parallel work.

/// A rectangular region of the grid. Owns no cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Tile {
    /// Number of cells covered by the tile
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    /// Every grid coordinate inside the tile, row by row
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| (x, y)))
    }
}

/// Partition of a `width × height` grid into tiles of `tile_size` cells per side.
/// The last column and row of tiles are clipped to the grid boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tiling {
    width: usize,
    height: usize,
    tile_size: usize,
}

impl Tiling {
    /// A tile size of zero is treated as one
    pub fn new(width: usize, height: usize, tile_size: usize) -> Self {
        Self {
            width,
            height,
            tile_size: tile_size.max(1),
        }
    }

    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Number of tile columns (ceil(width / tile_size))
    pub const fn columns(&self) -> usize {
        self.width.div_ceil(self.tile_size)
    }

    /// Number of tile rows (ceil(height / tile_size))
    pub const fn rows(&self) -> usize {
        self.height.div_ceil(self.tile_size)
    }

    pub const fn len(&self) -> usize {
        self.columns() * self.rows()
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of the tiles in column `col`
    pub fn column_width(&self, col: usize) -> usize {
        self.tile_size.min(self.width - col * self.tile_size)
    }

    /// Height of the tiles in row `row`
    pub fn row_height(&self, row: usize) -> usize {
        self.tile_size.min(self.height - row * self.tile_size)
    }

    /// Tile at (column, row) of the tiling
    pub fn tile(&self, col: usize, row: usize) -> Tile {
        Tile {
            x: col * self.tile_size,
            y: row * self.tile_size,
            width: self.column_width(col),
            height: self.row_height(row),
        }
    }

    /// All tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        (0..self.rows())
            .flat_map(move |row| (0..self.columns()).map(move |col| self.tile(col, row)))
    }
}
