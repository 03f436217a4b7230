use std::io::{BufRead, Write};
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use log::warn;

use crate::error::InputError;
use crate::init::InitMode;
use crate::input::Prompter;
use crate::patterns::Pattern;
use crate::simulation::Settings;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Random,
    Manual,
    Pattern,
}

/// Anything left out is asked for on the console.
#[derive(Parser, Debug, Default)]
#[command(name = "life", about = "Conway's Game of Life in the terminal", long_about = None)]
pub struct Cli {
    /// Number of rows
    #[arg(short = 'r', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub rows: Option<u64>,

    /// Number of columns
    #[arg(short = 'c', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub cols: Option<u64>,

    /// Milliseconds to wait between generations
    #[arg(short = 'd', long)]
    pub delay: Option<u64>,

    /// How to fill the starting grid
    #[arg(short = 'm', long, value_enum)]
    pub mode: Option<Mode>,

    /// Seed for random mode, for repeatable runs
    #[arg(long, conflicts_with = "pattern")]
    pub seed: Option<u64>,

    /// Pattern to start from (implies pattern mode)
    #[arg(short = 'p', long)]
    pub pattern: Option<Pattern>,
}

impl Cli {
    /// Reject flag combinations where one flag would be silently ignored.
    pub fn check(&self) -> Result<(), clap::Error> {
        let conflict = match (self.mode, self.pattern, self.seed) {
            (Some(Mode::Random | Mode::Manual), Some(_), _) => {
                Some("--pattern only applies to --mode pattern")
            }
            (Some(Mode::Manual | Mode::Pattern), _, Some(_)) => {
                Some("--seed only applies to --mode random")
            }
            _ => None,
        };
        match conflict {
            Some(message) => Err(Cli::command().error(ErrorKind::ArgumentConflict, message)),
            None => Ok(()),
        }
    }

    /// Fill in missing values by prompting, then build the settings.
    pub fn resolve<R: BufRead, W: Write>(
        self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<Settings, InputError> {
        let rows = match self.rows {
            Some(rows) => to_usize(rows),
            None => prompter.ask_number("Number of rows: ", 1usize)?,
        };
        let cols = match self.cols {
            Some(cols) => to_usize(cols),
            None => prompter.ask_number("Number of columns: ", 1usize)?,
        };
        let delay = match self.delay {
            Some(ms) => ms,
            None => prompter.ask_number("Delay between generations (ms): ", 0u64)?,
        };

        let mode = match (self.mode, self.pattern) {
            (Some(mode), _) => mode,
            (None, Some(_)) => Mode::Pattern,
            (None, None) => match prompter.ask_choice(
                "Start from (r)andom, (m)anual entry or a (p)attern? ",
                &['r', 'm', 'p'],
            )? {
                'm' => Mode::Manual,
                'p' => Mode::Pattern,
                _ => Mode::Random,
            },
        };

        if mode != Mode::Random && self.seed.is_some() {
            warn!("ignoring --seed outside random mode");
        }
        let mode = match mode {
            Mode::Random => InitMode::Random { seed: self.seed },
            Mode::Manual => InitMode::Manual,
            Mode::Pattern => match self.pattern {
                Some(pattern) => InitMode::Pattern(pattern),
                None => {
                    let prompt = format!("Pattern ({}): ", Pattern::names());
                    InitMode::Pattern(prompter.ask(&prompt, |line| line.parse::<Pattern>())?)
                }
            },
        };

        Ok(Settings {
            rows,
            cols,
            delay: Duration::from_millis(delay),
            mode,
        })
    }
}

fn to_usize(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}
