mod game;
mod ids;
mod journal;
mod question;

pub use ids::{ChoiceId, GameSlug, ParseIdError, QuestionId, SessionId};

pub use game::{CompletionPolicy, GameConfigError, GameKind, GameRewards, Pacing};
pub use journal::{JournalError, JournalPrompt};
pub use question::{Choice, Question, QuestionError};
