//! Conway's B3/S23 rule: neighbor counting and the next-state table

use crate::grid::{Cell, Grid};

/// The eight orthogonal + diagonal neighbor offsets as (row, col).
#[rustfmt::skip]
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Count living neighbors of (row, col). Positions past the edge do not
/// exist, so corner cells have at most 3 neighbors and edge cells 5.
pub fn count_live_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    let (r, c) = (row as isize, col as isize);

    NEIGHBOR_OFFSETS
        .iter()
        .filter(|(dr, dc)| grid.try_get(r + dr, c + dc) == Some(Cell::Alive))
        .count() as u8
}

pub fn next_state(current: Cell, live_neighbors: u8) -> Cell {
    match (current, live_neighbors) {
        (Cell::Alive, 2) | (Cell::Alive, 3) => Cell::Alive, // Survival
        (Cell::Dead, 3) => Cell::Alive,                     // Birth
        _ => Cell::Dead,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(rows: usize, cols: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(rows, cols).unwrap();
        for &(r, c) in alive {
            grid.set(r, c, Cell::Alive);
        }
        grid
    }

    #[test]
    fn test_empty_grid_has_no_neighbors() {
        let grid = Grid::new(4, 5).unwrap();
        for (r, c, _) in grid.iter() {
            assert_eq!(count_live_neighbors(&grid, r, c), 0, "at ({r}, {c})");
        }
    }

    #[test]
    fn test_single_cell_touches_only_adjacent() {
        let grid = grid_with(5, 5, &[(2, 2)]);
        for (r, c, _) in grid.iter() {
            let adjacent = (r, c) != (2, 2) && r.abs_diff(2) <= 1 && c.abs_diff(2) <= 1;
            let expected = if adjacent { 1 } else { 0 };
            assert_eq!(count_live_neighbors(&grid, r, c), expected, "at ({r}, {c})");
        }
    }

    #[test]
    fn test_cell_does_not_count_itself() {
        let grid = grid_with(3, 3, &[(1, 1)]);
        assert_eq!(count_live_neighbors(&grid, 1, 1), 0);
    }

    #[test]
    fn test_corner_cell_has_no_wraparound() {
        let grid = grid_with(4, 4, &[(0, 0)]);
        let touched: Vec<_> = grid
            .iter()
            .filter(|&(r, c, _)| count_live_neighbors(&grid, r, c) > 0)
            .map(|(r, c, _)| (r, c))
            .collect();
        assert_eq!(touched, vec![(0, 1), (1, 0), (1, 1)]);
        // Opposite corners would see it on a torus.
        assert_eq!(count_live_neighbors(&grid, 3, 3), 0);
        assert_eq!(count_live_neighbors(&grid, 0, 3), 0);
        assert_eq!(count_live_neighbors(&grid, 3, 0), 0);
    }

    #[test]
    fn test_last_row_and_column_edges() {
        let grid = grid_with(3, 3, &[(2, 2), (0, 2), (2, 0)]);
        assert_eq!(count_live_neighbors(&grid, 0, 0), 0);
        assert_eq!(count_live_neighbors(&grid, 1, 1), 3);
        assert_eq!(count_live_neighbors(&grid, 1, 2), 2);
    }

    #[test]
    fn test_fully_surrounded() {
        let all: Vec<_> = (0..3).flat_map(|r| (0..3).map(move |c| (r, c))).collect();
        let grid = grid_with(3, 3, &all);
        assert_eq!(count_live_neighbors(&grid, 1, 1), 8);
        assert_eq!(count_live_neighbors(&grid, 0, 0), 3);
        assert_eq!(count_live_neighbors(&grid, 0, 1), 5);
    }

    #[test]
    fn test_next_state_table() {
        assert_eq!(next_state(Cell::Alive, 1), Cell::Dead);
        assert_eq!(next_state(Cell::Alive, 2), Cell::Alive);
        assert_eq!(next_state(Cell::Alive, 3), Cell::Alive);
        assert_eq!(next_state(Cell::Alive, 4), Cell::Dead);
        assert_eq!(next_state(Cell::Dead, 3), Cell::Alive);
        assert_eq!(next_state(Cell::Dead, 2), Cell::Dead);
    }

    #[test]
    fn test_next_state_extremes() {
        assert_eq!(next_state(Cell::Alive, 0), Cell::Dead);
        assert_eq!(next_state(Cell::Alive, 8), Cell::Dead);
        assert_eq!(next_state(Cell::Dead, 0), Cell::Dead);
        assert_eq!(next_state(Cell::Dead, 4), Cell::Dead);
    }
}
