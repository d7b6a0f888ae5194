//! Rules module for Conway's Game of Life simulation
//!
//! Game of Life standard rules:
//! 1. Any live cell with fewer than two live neighbors dies (underpopulation)
//! 2. Any live cell with two or three live neighbors lives (survival)
//! 3. Any live cell with more than three live neighbors dies (overpopulation)
//! 4. Any dead cell with exactly three live neighbors becomes alive (reproduction)

use crate::grid::{CellState, Grid};

/// Minimum neighbors for a live cell to survive
pub const SURVIVAL_MIN: u8 = 2;
/// Maximum neighbors for a live cell to survive
pub const SURVIVAL_MAX: u8 = 3;
/// Number of neighbors for a dead cell to become alive
pub const BIRTH_COUNT: u8 = 3;

/// The state a cell takes in the next generation.
pub fn next_state(current: CellState, neighbors: u8) -> CellState {
    match current {
        CellState::Alive if (SURVIVAL_MIN..=SURVIVAL_MAX).contains(&neighbors) => CellState::Alive,
        CellState::Alive => CellState::Dead,
        CellState::Dead if neighbors == BIRTH_COUNT => CellState::Alive,
        CellState::Dead => CellState::Dead,
    }
}

/// Apply Game of Life rules to the grid for one generation.
///
/// Reads only from `current` and writes only to a fresh grid, so every
/// neighbour count sees the pre-step generation.
pub fn step(current: &Grid) -> Grid {
    let mut next = current.clone();

    for (x, y, cell) in current.iter_cells() {
        let neighbors = current.count_live_neighbors(x, y);
        let state = next_state(cell, neighbors);
        if state != cell {
            // Coordinates come from `current`, which has the same shape as `next`.
            let _ = next.set(x, y, state);
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_cells(grid: &Grid) -> Vec<(usize, usize)> {
        let mut cells: Vec<_> = grid
            .iter_cells()
            .filter(|(_, _, c)| c.is_alive())
            .map(|(x, y, _)| (x, y))
            .collect();
        cells.sort();
        cells
    }

    /// Naive in-place scan: later cells see already-updated neighbours.
    fn sequential_in_place(grid: &Grid) -> Grid {
        let mut g = grid.clone();
        for y in 0..g.height() {
            for x in 0..g.width() {
                let n = g.count_live_neighbors(x, y);
                let s = next_state(g.get(x, y).unwrap(), n);
                g.set(x, y, s).unwrap();
            }
        }
        g
    }

    #[test]
    fn next_state_table() {
        for n in 0..=8 {
            let alive = next_state(CellState::Alive, n);
            assert_eq!(alive.is_alive(), n == 2 || n == 3, "alive with {n}");
            let dead = next_state(CellState::Dead, n);
            assert_eq!(dead.is_alive(), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn blinker_rotates_and_has_period_two() {
        let start = Grid::from_live_cells(4, 4, &[(1, 1), (1, 2), (1, 3)]).unwrap();

        let one = step(&start);
        assert_eq!(live_cells(&one), vec![(0, 2), (1, 2), (2, 2)]);

        let two = step(&one);
        assert_eq!(two, start);
    }

    #[test]
    fn block_is_still_life() {
        let block = Grid::from_live_cells(6, 6, &[(2, 2), (3, 2), (2, 3), (3, 3)]).unwrap();
        for (x, y, c) in block.iter_cells() {
            if c.is_alive() {
                assert_eq!(block.count_live_neighbors(x, y), 3);
            }
        }
        assert_eq!(step(&block), block);
    }

    #[test]
    fn lonely_cell_dies() {
        let grid = Grid::from_live_cells(5, 5, &[(2, 2)]).unwrap();
        assert_eq!(step(&grid).live_count(), 0);
    }

    #[test]
    fn glider_crosses_the_wrap() {
        // A glider moves one cell diagonally every four generations; after
        // 4 * 6 steps on a 6x6 torus it is back where it started.
        let glider = Grid::from_live_cells(6, 6, &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]).unwrap();
        let mut g = glider.clone();
        for _ in 0..24 {
            g = step(&g);
        }
        assert_eq!(g, glider);
    }

    #[test]
    fn step_is_simultaneous_not_sequential() {
        // (1, 2) and (3, 2) are both births that depend on (2, 1) still being
        // alive; an in-place scan kills (2, 1) before reaching them.
        let start = Grid::from_live_cells(5, 5, &[(2, 1), (2, 2), (2, 3)]).unwrap();

        let simultaneous = step(&start);
        assert_eq!(live_cells(&simultaneous), vec![(1, 2), (2, 2), (3, 2)]);

        let sequential = sequential_in_place(&start);
        assert_ne!(sequential, simultaneous);
    }

    #[test]
    fn step_does_not_touch_input() {
        let start = Grid::from_live_cells(5, 5, &[(2, 1), (2, 2), (2, 3)]).unwrap();
        let copy = start.clone();
        let _ = step(&start);
        assert_eq!(start, copy);
    }
}
