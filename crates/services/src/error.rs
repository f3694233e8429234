//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;
use trivia_core::QuizError;

/// Errors emitted while building a round.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RoundError {
    #[error("no questions available for a round")]
    EmptyBank,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizSession`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("a username must be set before starting a round")]
    NoUsername,
    #[error("no round has been started")]
    NoRound,
    #[error("round still has unanswered questions")]
    RoundInProgress,
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Round(#[from] RoundError),
}
