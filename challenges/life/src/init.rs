use std::io::{BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::InputError;
use crate::grid::{Cell, Grid};
use crate::input::{Prompter, single_char};
use crate::patterns::Pattern;

/// Manual entry character for a live cell.
pub const ALIVE_INPUT: char = '1';
/// Manual entry character for a dead cell.
pub const DEAD_INPUT: char = '0';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitMode {
    /// Coin flip per cell. `None` seeds from the clock.
    Random { seed: Option<u64> },
    /// Ask the user for every cell.
    Manual,
    Pattern(Pattern),
}

/// Fill `grid` according to `mode`, prompting through `prompter` when needed.
pub fn initialize<R: BufRead, W: Write>(
    grid: &mut Grid,
    mode: InitMode,
    prompter: &mut Prompter<R, W>,
) -> Result<(), InputError> {
    match mode {
        InitMode::Random { seed } => {
            let seed = seed.unwrap_or_else(clock_seed);
            info!("seeding random grid with {seed}");
            randomize(grid, &mut StdRng::seed_from_u64(seed));
        }
        InitMode::Manual => fill_manual(grid, prompter)?,
        InitMode::Pattern(pattern) => {
            info!("placing {pattern}");
            grid.clear();
            pattern.place_centered(grid);
        }
    }
    Ok(())
}

/// Nanoseconds since the epoch, folded into 64 bits.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Set every cell alive or dead with equal probability.
pub fn randomize(grid: &mut Grid, rng: &mut impl Rng) {
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            grid.set(row, col, Cell::from(rng.gen_bool(0.5)));
        }
    }
}

pub fn parse_cell(line: &str) -> Result<Cell, String> {
    match single_char(line) {
        Some(ALIVE_INPUT) => Ok(Cell::Alive),
        Some(DEAD_INPUT) => Ok(Cell::Dead),
        _ => Err(format!(
            "please enter {ALIVE_INPUT} (alive) or {DEAD_INPUT} (dead)"
        )),
    }
}

/// Ask for each cell in row-major order. A bad entry is reported and the
/// same cell is asked again; nothing is ever defaulted.
pub fn fill_manual<R: BufRead, W: Write>(
    grid: &mut Grid,
    prompter: &mut Prompter<R, W>,
) -> Result<(), InputError> {
    let (rows, cols) = grid.dimensions();
    debug!("manual entry for {rows}x{cols} cells");

    for row in 0..rows {
        for col in 0..cols {
            let prompt = format!("cell ({row}, {col}) [{ALIVE_INPUT}/{DEAD_INPUT}]: ");
            let cell = prompter.ask(&prompt, parse_cell)?;
            grid.set(row, col, cell);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::BLINKER;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("1"), Ok(Cell::Alive));
        assert_eq!(parse_cell(" 0\r"), Ok(Cell::Dead));
        assert!(parse_cell("").is_err());
        assert!(parse_cell("01").is_err());
        assert!(parse_cell("x").is_err());
    }

    #[test]
    fn test_manual_fill() {
        let mut grid = Grid::new(2, 2).unwrap();
        let mut p = prompter("1\n0\n0\n1\n");
        fill_manual(&mut grid, &mut p).unwrap();
        assert_eq!(grid.to_string(), "#.\n.#\n");
    }

    #[test]
    fn test_manual_reprompts_same_cell() {
        let mut grid = Grid::new(1, 2).unwrap();
        let mut p = prompter("x\n\n11\n1\n0\n");
        fill_manual(&mut grid, &mut p).unwrap();
        assert_eq!(grid.get(0, 0), Cell::Alive);
        assert_eq!(grid.get(0, 1), Cell::Dead);

        let out = String::from_utf8(p.into_writer()).unwrap();
        assert_eq!(out.matches("cell (0, 0)").count(), 4);
        assert_eq!(out.matches("cell (0, 1)").count(), 1);
        assert_eq!(out.matches("please enter 1 (alive) or 0 (dead)").count(), 3);
    }

    #[test]
    fn test_manual_reprompts_after_invalid_utf8() {
        let mut grid = Grid::new(1, 1).unwrap();
        let mut p = Prompter::new(Cursor::new(vec![0xff, b'\n', b'1', b'\n']), Vec::new());
        fill_manual(&mut grid, &mut p).unwrap();
        assert_eq!(grid.get(0, 0), Cell::Alive);

        let out = String::from_utf8(p.into_writer()).unwrap();
        assert_eq!(out.matches("cell (0, 0)").count(), 2);
        assert_eq!(out.matches("please enter 1 (alive) or 0 (dead)").count(), 1);
    }

    #[test]
    fn test_manual_never_defaults() {
        // Input runs out on a bad entry: an error, not a dead cell.
        let mut grid = Grid::new(1, 2).unwrap();
        let mut p = prompter("1\n?\n");
        assert!(matches!(
            fill_manual(&mut grid, &mut p),
            Err(InputError::Closed(_))
        ));
    }

    #[test]
    fn test_seeded_random_is_repeatable() {
        let mut a = Grid::new(16, 16).unwrap();
        let mut b = Grid::new(16, 16).unwrap();
        let mut p = prompter("");
        initialize(&mut a, InitMode::Random { seed: Some(7) }, &mut p).unwrap();
        initialize(&mut b, InitMode::Random { seed: Some(7) }, &mut p).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_is_roughly_even() {
        let mut grid = Grid::new(100, 100).unwrap();
        randomize(&mut grid, &mut StdRng::seed_from_u64(42));
        let alive = grid.population();
        assert!((4000..6000).contains(&alive), "{alive} alive out of 10000");
    }

    #[test]
    fn test_pattern_mode_replaces_contents() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(0, 0, Cell::Alive);
        let mut p = prompter("");
        initialize(&mut grid, InitMode::Pattern(BLINKER), &mut p).unwrap();
        assert_eq!(grid.to_string(), "...\n###\n...\n");
    }
}
