//! One Conway generation (B3/S23) on a torus

use super::grid::{Cell, Grid};

/// Result of advancing a grid by one generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub grid: Grid,
    /// Cells that went dead -> alive (row-major, informational only)
    pub births: Vec<bool>,
    /// Cells that went alive -> dead (row-major, informational only)
    pub deaths: Vec<bool>,
}

impl Generation {
    pub fn birth_count(&self) -> usize {
        self.births.iter().filter(|&&b| b).count()
    }

    pub fn death_count(&self) -> usize {
        self.deaths.iter().filter(|&&d| d).count()
    }
}

/// Compute the next generation. The input grid is left untouched.
pub fn step(grid: &Grid) -> Generation {
    let (width, height) = (grid.width(), grid.height());
    let size = width * height;
    let mut cells = Vec::with_capacity(size);
    let mut births = vec![false; size];
    let mut deaths = vec![false; size];

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let alive = grid.cells()[idx].is_alive();
            let next = matches!(
                (alive, grid.live_neighbors(x, y)),
                (true, 2) | (true, 3) | (false, 3)
            );
            births[idx] = !alive && next;
            deaths[idx] = alive && !next;
            cells.push(Cell::from(next));
        }
    }

    Generation {
        grid: Grid::from_cells_unchecked(width, height, cells),
        births,
        deaths,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_still_life() {
        let grid = Grid::from_pattern(
            "......
             ......
             ..##..
             ..##..
             ......
             ......",
        )
        .unwrap();
        let next = step(&grid);
        assert_eq!(next.grid, grid);
        assert_eq!(next.birth_count(), 0);
        assert_eq!(next.death_count(), 0);
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = Grid::from_pattern(
            ".....
             .....
             .###.
             .....
             .....",
        )
        .unwrap();
        let vertical = Grid::from_pattern(
            ".....
             ..#..
             ..#..
             ..#..
             .....",
        )
        .unwrap();
        let g1 = step(&horizontal);
        assert_eq!(g1.grid, vertical);
        assert_eq!(g1.birth_count(), 2);
        assert_eq!(g1.death_count(), 2);
        assert_eq!(step(&g1.grid).grid, horizontal);
    }

    #[test]
    fn test_input_unmodified() {
        let grid = Grid::from_pattern(
            ".....
             .###.
             .....",
        )
        .unwrap();
        let before = grid.clone();
        let _ = step(&grid);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_empty_stays_empty() {
        let grid = Grid::new(8, 8).unwrap();
        let next = step(&grid);
        assert!(next.grid.is_extinct());
        assert_eq!(next.birth_count() + next.death_count(), 0);
    }

    #[test]
    fn test_glider_crosses_edge() {
        // South-east glider hugging the bottom-right corner of an 8x8 torus
        let mut grid = Grid::new(8, 8).unwrap();
        for (x, y) in [(6, 5), (7, 6), (5, 7), (6, 7), (7, 7)] {
            grid.set(x, y, Cell::Alive);
        }
        let start = grid.clone();

        // After 4 generations a glider is the same shape shifted by (+1, +1)
        for _ in 0..4 {
            grid = step(&grid).grid;
        }
        let mut expected = Grid::new(8, 8).unwrap();
        for (x, y) in [(7, 6), (0, 7), (6, 0), (7, 0), (0, 0)] {
            expected.set(x, y, Cell::Alive);
        }
        assert_eq!(grid, expected);
        assert_eq!(grid.population(), 5);

        // A full lap of the torus returns to the start
        for _ in 0..28 {
            grid = step(&grid).grid;
        }
        assert_eq!(grid, start);
    }

    #[test]
    fn test_single_column_torus() {
        // 1-wide grid: every neighbour offset wraps onto the same column
        let grid = Grid::from_pattern(
            "#
             #
             #",
        )
        .unwrap();
        // Each cell sees itself/others multiple times: 8 live neighbours -> dies
        let next = step(&grid);
        assert!(next.grid.is_extinct());
        assert_eq!(next.death_count(), 3);
    }
}
