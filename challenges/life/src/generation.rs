use std::mem;

use crate::grid::{Grid, GridError};
use crate::rules::{count_live_neighbors, next_state};

/// Write the next generation of `current` into `scratch`.
///
/// Only `current` is read, so no cell sees a neighbor that was already
/// updated this generation.
pub fn step(current: &Grid, scratch: &mut Grid) {
    assert_eq!(
        current.dimensions(),
        scratch.dimensions(),
        "step: dimension mismatch"
    );

    for (row, col, cell) in current.iter() {
        let neighbors = count_live_neighbors(current, row, col);
        scratch.set(row, col, next_state(cell, neighbors));
    }
}

/// The current grid plus a scratch buffer of the same size.
///
/// `advance` steps into the scratch buffer and then swaps the two, so the
/// result is promoted every generation without copying.
pub struct Generations {
    current: Grid,
    scratch: Grid,
    generation: u64,
}

impl Generations {
    /// Takes ownership of a populated starting grid and allocates its twin.
    pub fn new(seed: Grid) -> Result<Self, GridError> {
        let scratch = Grid::new(seed.rows(), seed.cols())?;
        Ok(Self::from_buffers(seed, scratch))
    }

    /// Pair a populated grid with an already allocated scratch buffer.
    pub fn from_buffers(current: Grid, scratch: Grid) -> Self {
        assert_eq!(
            current.dimensions(),
            scratch.dimensions(),
            "from_buffers: dimension mismatch"
        );
        Self {
            current,
            scratch,
            generation: 0,
        }
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn advance(&mut self) {
        step(&self.current, &mut self.scratch);
        mem::swap(&mut self.current, &mut self.scratch);
        self.generation += 1;
    }

    #[cfg(test)]
    pub(crate) fn advance_n(&mut self, n: u64) {
        for _ in 0..n {
            self.advance();
        }
    }
}
