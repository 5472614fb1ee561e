//! Interactive shell and one-shot command front end for the water log.

pub mod output;
pub mod shell;

use thiserror::Error;

use crate::errors::WaterlogError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] WaterlogError),
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

pub use shell::run_cli;
