//! Shared error types for the services crate.

use thiserror::Error;

use games_core::session::SessionError;

/// Errors emitted by `GameLoopService`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    /// A choice answer was sent to a journal run, or an entry to a quiz run.
    #[error("answer kind does not match the running game")]
    AnswerKindMismatch,

    #[error(transparent)]
    Session(#[from] SessionError),
}
