use std::io;

use thiserror::Error;

use crate::grid::GridError;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read from the console")]
    Io(#[from] io::Error),
    /// The input stream ended while a value was still required.
    #[error("input closed while waiting for {0}")]
    Closed(String),
}

#[derive(Debug, Error)]
pub enum LifeError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("terminal error")]
    Terminal(#[source] io::Error),
    #[error("cannot {action} while {state:?}")]
    InvalidState {
        action: &'static str,
        state: crate::simulation::State,
    },
}
