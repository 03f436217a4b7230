pub mod config;
pub mod error;
pub mod generation;
pub mod grid;
pub mod init;
pub mod input;
pub mod patterns;
pub mod rules;
pub mod simulation;
pub mod terminal;

pub use error::{InputError, LifeError};
pub use grid::{Cell, Grid, GridError};
