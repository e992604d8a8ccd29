//! The toy problem domains, one module per puzzle.
//!
//! Each module exposes a `main` entry point taking the puzzle input and the
//! run options, which is what the command line registry calls.

use std::io::{self, Read};

use thiserror::Error;

use crate::literal::LiteralError;

pub mod eight_puzzle;
pub mod marble_solitaire;
pub mod missionaries;
pub mod plagiarism;
pub mod rabbit_leap;

/// Errors raised while reading puzzle input, before any search starts.
#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error(transparent)]
    Literal(#[from] LiteralError),

    #[error("Invalid token {0:?}")]
    InvalidToken(String),

    #[error("Missing {0}")]
    MissingInput(&'static str),

    #[error("Unable to read input")]
    Io(#[from] io::Error),
}

/// Read the whole input, skipping nothing.
pub(crate) fn read_input(mut input: Box<dyn Read + 'static>) -> Result<String, PuzzleError> {
    let mut buffer = String::new();
    input.read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// The non-blank lines of an input, trimmed.
pub(crate) fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}
