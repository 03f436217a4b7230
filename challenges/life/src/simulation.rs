use std::io::{BufRead, Write};
use std::mem;
use std::time::Duration;

use log::{debug, error, info, trace};

use crate::error::LifeError;
use crate::generation::Generations;
use crate::grid::Grid;
use crate::init::{self, InitMode};
use crate::input::Prompter;
use crate::terminal::Terminal;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    AwaitingConfig,
    Initializing,
    Running,
    Cancelled,
    Terminated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub rows: usize,
    pub cols: usize,
    pub delay: Duration,
    pub mode: InitMode,
}

/// How a finished run ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub generations: u64,
    pub population: usize,
}

enum Stage {
    AwaitingConfig,
    Initializing { settings: Settings, grid: Grid },
    Running { settings: Settings, life: Generations },
    Cancelled { life: Generations },
    Terminated,
}

/// Drives one game from configuration to shutdown.
///
/// The grid buffers live inside the current stage, so they exist only
/// between `configure` and `finish`.
pub struct Simulation {
    stage: Stage,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    pub fn new() -> Self {
        Self {
            stage: Stage::AwaitingConfig,
        }
    }

    pub fn state(&self) -> State {
        match self.stage {
            Stage::AwaitingConfig => State::AwaitingConfig,
            Stage::Initializing { .. } => State::Initializing,
            Stage::Running { .. } => State::Running,
            Stage::Cancelled { .. } => State::Cancelled,
            Stage::Terminated => State::Terminated,
        }
    }

    /// The grid currently held, if any.
    pub fn grid(&self) -> Option<&Grid> {
        match &self.stage {
            Stage::Initializing { grid, .. } => Some(grid),
            Stage::Running { life, .. } | Stage::Cancelled { life } => Some(life.current()),
            Stage::AwaitingConfig | Stage::Terminated => None,
        }
    }

    fn transition(&self, to: State) {
        debug!("{:?} -> {:?}", self.state(), to);
    }

    fn invalid(&self, action: &'static str) -> LifeError {
        LifeError::InvalidState {
            action,
            state: self.state(),
        }
    }

    /// Accept the settings and allocate the starting grid.
    pub fn configure(&mut self, settings: Settings) -> Result<(), LifeError> {
        if !matches!(self.stage, Stage::AwaitingConfig) {
            return Err(self.invalid("configure"));
        }
        info!(
            "{}x{} grid, {}ms delay, {:?}",
            settings.rows,
            settings.cols,
            settings.delay.as_millis(),
            settings.mode
        );
        let grid = Grid::new(settings.rows, settings.cols)
            .inspect_err(|err| error!("grid allocation failed: {err}"))?;

        self.transition(State::Initializing);
        self.stage = Stage::Initializing { settings, grid };
        Ok(())
    }

    /// Populate the starting grid and allocate the scratch buffer.
    pub fn initialize<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), LifeError> {
        let (settings, mut grid) = match mem::replace(&mut self.stage, Stage::Terminated) {
            Stage::Initializing { settings, grid } => (settings, grid),
            other => {
                self.stage = other;
                return Err(self.invalid("initialize"));
            }
        };
        if let Err(err) = init::initialize(&mut grid, settings.mode, prompter) {
            self.stage = Stage::Initializing { settings, grid };
            return Err(err.into());
        }
        let scratch = match Grid::new(settings.rows, settings.cols) {
            Ok(scratch) => scratch,
            Err(err) => {
                error!("scratch grid allocation failed: {err}");
                self.stage = Stage::Initializing { settings, grid };
                return Err(err.into());
            }
        };
        let life = Generations::from_buffers(grid, scratch);

        self.transition(State::Running);
        self.stage = Stage::Running { settings, life };
        Ok(())
    }

    /// Render, step, wait and check for quit until the user cancels.
    pub fn run(&mut self, term: &mut impl Terminal) -> Result<Outcome, LifeError> {
        let Stage::Running { settings, life } = &mut self.stage else {
            return Err(self.invalid("run"));
        };
        let delay = settings.delay;

        loop {
            term.render(life.current(), life.generation())
                .map_err(LifeError::Terminal)?;
            life.advance();
            trace!(
                "generation {} population {}",
                life.generation(),
                life.current().population()
            );
            term.pause(delay);

            let keys = term.poll_keys().map_err(LifeError::Terminal)?;
            if keys.iter().any(|key| key.is_quit()) {
                break;
            }
        }

        let outcome = Outcome {
            generations: life.generation(),
            population: life.current().population(),
        };
        info!("cancelled after {} generations", outcome.generations);

        self.transition(State::Cancelled);
        if let Stage::Running { life, .. } = mem::replace(&mut self.stage, Stage::Terminated) {
            self.stage = Stage::Cancelled { life };
        }
        Ok(outcome)
    }

    /// Release both grid buffers. Safe to call from any state.
    pub fn finish(&mut self) {
        self.transition(State::Terminated);
        self.stage = Stage::Terminated;
    }
}
