//! Predefined patterns for Conway's Game of Life

use std::fmt;
use std::str::FromStr;

use crate::grid::{Cell, Grid};

/// A named shape, stored as live (row, col) offsets from its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    cells: &'static [(usize, usize)],
}

/// Travels diagonally
pub const GLIDER: Pattern = Pattern {
    name: "glider",
    //  *
    //   *
    // ***
    cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
};

/// Period: 2
pub const BLINKER: Pattern = Pattern {
    name: "blinker",
    cells: &[(0, 0), (0, 1), (0, 2)],
};

/// Period: 2
pub const TOAD: Pattern = Pattern {
    name: "toad",
    //  ***
    // ***
    cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
};

/// Period: 2
pub const BEACON: Pattern = Pattern {
    name: "beacon",
    // **
    // *
    //    *
    //   **
    cells: &[(0, 0), (0, 1), (1, 0), (2, 3), (3, 2), (3, 3)],
};

/// Period: 3, one of the most common oscillators
#[rustfmt::skip]
pub const PULSAR: Pattern = Pattern {
    name: "pulsar",
    cells: &[
        (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
        (2, 0), (2, 5), (2, 7), (2, 12),
        (3, 0), (3, 5), (3, 7), (3, 12),
        (4, 0), (4, 5), (4, 7), (4, 12),
        (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
        (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
        (8, 0), (8, 5), (8, 7), (8, 12),
        (9, 0), (9, 5), (9, 7), (9, 12),
        (10, 0), (10, 5), (10, 7), (10, 12),
        (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
    ],
};

/// Lightweight spaceship, travels horizontally
#[rustfmt::skip]
pub const LWSS: Pattern = Pattern {
    name: "lwss",
    //  *  *
    //      *
    //  *   *
    //   ****
    cells: &[
        (0, 1), (0, 4),
        (1, 5),
        (2, 1), (2, 5),
        (3, 2), (3, 3), (3, 4), (3, 5),
    ],
};

/// Period: 15
#[rustfmt::skip]
pub const PENTADECATHLON: Pattern = Pattern {
    name: "pentadecathlon",
    cells: &[
        (0, 1),
        (1, 1),
        (2, 0), (2, 2),
        (3, 1),
        (4, 1),
        (5, 1),
        (6, 1),
        (7, 0), (7, 2),
        (8, 1),
        (9, 1),
    ],
};

pub const ALL: &[Pattern] = &[GLIDER, BLINKER, TOAD, BEACON, PULSAR, LWSS, PENTADECATHLON];

impl Pattern {
    pub fn cells(&self) -> &'static [(usize, usize)] {
        self.cells
    }

    /// (rows, cols) of the pattern's bounding box.
    pub fn extent(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(h, w), &(r, c)| (h.max(r + 1), w.max(c + 1)))
    }

    /// Draw the pattern with its top-left corner at (row, col). Cells that
    /// land past the grid edge are dropped.
    pub fn place(&self, grid: &mut Grid, row: usize, col: usize) {
        for &(dr, dc) in self.cells {
            let (r, c) = (row + dr, col + dc);
            if r < grid.rows() && c < grid.cols() {
                grid.set(r, c, Cell::Alive);
            }
        }
    }

    /// Draw the pattern in the middle of the grid.
    pub fn place_centered(&self, grid: &mut Grid) {
        let (h, w) = self.extent();
        let row = grid.rows().saturating_sub(h) / 2;
        let col = grid.cols().saturating_sub(w) / 2;
        self.place(grid, row, col);
    }

    pub fn names() -> String {
        ALL.iter().map(|p| p.name).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl FromStr for Pattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ALL.iter()
            .find(|p| p.name == wanted)
            .copied()
            .ok_or_else(|| {
                let names = Pattern::names();
                format!("unknown pattern '{}', expected one of: {names}", s.trim())
            })
    }
}
