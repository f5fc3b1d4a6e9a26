use thiserror::Error;

use crate::model::{GameConfigError, JournalError, QuestionError};
use crate::session::SessionError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Journal(#[from] JournalError),
    #[error(transparent)]
    GameConfig(#[from] GameConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
