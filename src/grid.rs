//! Grid module for the toroidal Game of Life board
//!
//! The grid is the single mutable source of truth for the simulation. Cells are
//! stored row-major (`y * width + x`) and every neighbour lookup wraps at the
//! edges, so the left column touches the right column and the top row touches
//! the bottom row.

use rand::Rng;
use std::fmt;

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    /// The opposite state.
    pub fn flipped(self) -> Self {
        match self {
            CellState::Alive => CellState::Dead,
            CellState::Dead => CellState::Alive,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

/// Errors arising from grid construction or cell access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A coordinate lies outside the grid.
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    /// Attempted to build a grid with a zero dimension.
    EmptyGrid,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { x, y, width, height } => {
                write!(f, "cell ({x}, {y}) out of range for a {width}x{height} grid")
            }
            Self::EmptyGrid => write!(f, "grid must have at least one cell"),
        }
    }
}

impl std::error::Error for GridError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// An all-dead grid.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid);
        }
        Ok(Self {
            width,
            height,
            cells: vec![CellState::Dead; width * height],
        })
    }

    /// A grid where every cell is independently alive with probability `live_probability`.
    pub fn random<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        live_probability: f64,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(width, height)?;
        let p = live_probability.clamp(0.0, 1.0);
        for cell in grid.cells.iter_mut() {
            *cell = CellState::from(rng.random_bool(p));
        }
        Ok(grid)
    }

    /// A grid with exactly the listed cells alive. Coordinates wrap.
    pub fn from_live_cells(
        width: usize,
        height: usize,
        live: &[(usize, usize)],
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(width, height)?;
        for &(x, y) in live {
            let idx = grid.index(x % width, y % height);
            grid.cells[idx] = CellState::Alive;
        }
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn check(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.index(x, y))
    }

    pub fn get(&self, x: usize, y: usize) -> Result<CellState, GridError> {
        let idx = self.check(x, y)?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> Result<(), GridError> {
        let idx = self.check(x, y)?;
        self.cells[idx] = state;
        Ok(())
    }

    /// Flips the cell and returns its new state.
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<CellState, GridError> {
        let idx = self.check(x, y)?;
        let next = self.cells[idx].flipped();
        self.cells[idx] = next;
        Ok(next)
    }

    /// Unchecked lookup; the caller guarantees `x < width` and `y < height`.
    pub(crate) fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)].is_alive()
    }

    /// Given a grid position, count the live neighbours using wrapping boundaries.
    ///
    /// Coordinates are reduced modulo the dimensions first, so callers may pass
    /// any value; the result is always in `0..=8`.
    pub fn count_live_neighbors(&self, x: usize, y: usize) -> u8 {
        let (w, h) = (self.width, self.height);
        let (x, y) = (x % w, y % h);
        let mut count = 0;

        for dy in 0..3 {
            for dx in 0..3 {
                // Skip the cell itself
                if dx == 1 && dy == 1 {
                    continue;
                }

                let nx = (x + w + dx - 1) % w;
                let ny = (y + h + dy - 1) % h;

                if self.is_alive(nx, ny) {
                    count += 1;
                }
            }
        }

        count
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Every cell as `(x, y, state)`, row by row.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &state)| (idx % self.width, idx / self.width, state))
    }

    /// Row-major 0/1 words for upload to the GPU storage buffer.
    pub fn to_gpu_cells(&self) -> Vec<u32> {
        self.cells.iter().map(|c| u32::from(c.is_alive())).collect()
    }
}
