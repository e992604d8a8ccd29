use thiserror::Error;

/// Error produced when a search cannot be carried out.
///
/// Exhausting the frontier without reaching a goal is not an error, see
/// [crate::Outcome::NoSolution].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Step limit exhausted after {0} steps")]
    StepLimitExhausted(usize),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Result when a search method might fail.
pub type Result<T> = std::result::Result<T, SearchError>;
