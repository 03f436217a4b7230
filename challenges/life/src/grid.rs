//! Fixed-size Game of Life grid with hard (non-wrapping) edges

use std::fmt;

use thiserror::Error;

/// Glyph used when drawing a live cell.
pub const ALIVE_GLYPH: char = '#';
/// Glyph used when drawing a dead cell.
pub const DEAD_GLYPH: char = '.';

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    Alive,
    #[default]
    Dead,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    pub fn glyph(self) -> char {
        match self {
            Cell::Alive => ALIVE_GLYPH,
            Cell::Dead => DEAD_GLYPH,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    ZeroDimension { rows: usize, cols: usize },
    #[error("could not allocate a {rows}x{cols} grid")]
    Allocation { rows: usize, cols: usize },
}

/// A rows x cols block of cells stored row-major in one buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell dead.
    ///
    /// Fails instead of aborting when the buffer size overflows or the
    /// allocator refuses the request.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::ZeroDimension { rows, cols });
        }
        let len = rows
            .checked_mul(cols)
            .ok_or(GridError::Allocation { rows, cols })?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| GridError::Allocation { rows, cols })?;
        cells.resize(len, Cell::Dead);

        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Get cell index in flat array
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) is outside a {}x{} grid",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    /// Get the state of the cell at (row, col). Panics when out of range.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    /// Like `get`, but off-grid coordinates yield `None`.
    pub fn try_get(&self, row: isize, col: isize) -> Option<Cell> {
        let row = usize::try_from(row).ok().filter(|&r| r < self.rows)?;
        let col = usize::try_from(col).ok().filter(|&c| c < self.cols)?;
        Some(self.cells[row * self.cols + col])
    }

    /// Set the state of the cell at (row, col). Panics when out of range.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let idx = self.index(row, col);
        self.cells[idx] = cell;
    }

    /// Clear all cells (set to dead)
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Dead);
    }

    /// Overwrite every cell with the matching cell of `other`.
    ///
    /// Both grids must have the same dimensions.
    pub fn copy_from(&mut self, other: &Grid) {
        assert_eq!(
            self.dimensions(),
            other.dimensions(),
            "copy_from: dimension mismatch"
        );
        self.cells.copy_from_slice(&other.cells);
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Iterate over rows, each a slice of `cols` cells.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.cols)
    }

    /// Iterate over `(row, col, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i / cols, i % cols, cell))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
