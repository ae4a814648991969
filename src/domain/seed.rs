//! Initial fills for the generation pair.

use super::{Cell, Grid, GridError, patterns::presets};
use rand::Rng;

/// Side of the square region cleared before the glider guns are stamped
const GUN_CLEARING: usize = 450;
/// Number of guns in the battery
const GUN_COUNT: usize = 10;
/// Vertical distance between two guns
const GUN_SPACING: usize = 30;
/// Top-left corner of the first gun
const GUN_ORIGIN: (usize, usize) = (16, 14);

/// `width * height` cells, each independently alive with `probability`
pub fn random_cells<R: Rng>(
    width: usize,
    height: usize,
    probability: f64,
    rng: &mut R,
) -> Result<Vec<Cell>, GridError> {
    let count = Grid::cell_count(width, height)?;
    let probability = probability.clamp(0.0, 1.0);
    Ok((0..count)
        .map(|_| Cell::from(rng.random_bool(probability)))
        .collect())
}

/// Clear the top-left corner and stamp a column of Gosper glider guns.
/// Guns or parts of guns that fall outside the grid are skipped.
/// Returns the number of cells set alive.
pub fn glider_gun_battery(grid: &mut Grid) -> usize {
    grid.clear_region(0, 0, GUN_CLEARING, GUN_CLEARING);

    let gun = presets::glider_gun();
    let (x, y0) = GUN_ORIGIN;
    (0..GUN_COUNT)
        .map(|i| gun.place_on(grid, x, y0 + i * GUN_SPACING))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_random_cells_length() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_cells(13, 7, 0.2, &mut rng).unwrap().len(), 91);
    }

    #[test]
    fn test_random_cells_density() {
        let mut rng = StdRng::seed_from_u64(99);
        let cells = random_cells(200, 200, 0.2, &mut rng).unwrap();
        let alive = cells.iter().filter(|c| c.is_alive()).count() as f64;
        let ratio = alive / cells.len() as f64;
        assert!((0.18..0.22).contains(&ratio), "ratio {ratio}");
    }

    #[test]
    fn test_random_cells_extremes() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(random_cells(10, 10, 0.0, &mut rng).unwrap().iter().all(|c| !c.is_alive()));
        assert!(random_cells(10, 10, 1.0, &mut rng).unwrap().iter().all(|c| c.is_alive()));
    }

    #[test]
    fn test_same_seed_same_cells() {
        let a = random_cells(50, 50, 0.2, &mut StdRng::seed_from_u64(11)).unwrap();
        let b = random_cells(50, 50, 0.2, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_gun_battery_on_full_grid() {
        let mut grid = Grid::from_cells(500, 500, vec![Cell::Alive; 500 * 500]).unwrap();
        let placed = glider_gun_battery(&mut grid);
        assert_eq!(placed, 360);
        // Cleared corner holds only the guns
        let in_corner = grid
            .iter_cells()
            .filter(|&(x, y, cell)| x < 450 && y < 450 && cell.is_alive())
            .count();
        assert_eq!(in_corner, 360);
        // First gun's left block
        assert_eq!(grid.is_alive(16, 18), Ok(true));
        assert_eq!(grid.is_alive(17, 19), Ok(true));
        // Outside the corner is untouched
        assert_eq!(grid.is_alive(499, 499), Ok(true));
    }

    #[test]
    fn test_gun_battery_on_small_grid() {
        let mut grid = Grid::new(60, 60);
        let placed = glider_gun_battery(&mut grid);
        assert_eq!(placed, grid.population());
        // The first two guns fit, the rest start below the grid
        assert_eq!(placed, 72);
    }
}
