use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum JournalError {
    #[error("journal prompt text cannot be empty")]
    EmptyPrompt,

    #[error("minimum length must be > 0")]
    InvalidMinLength,
}

/// A free-text prompt for journal games.
///
/// There is no right answer; an entry counts once its trimmed length reaches
/// `min_length` characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "JournalPromptData")]
pub struct JournalPrompt {
    id: QuestionId,
    prompt: String,
    min_length: usize,
    #[serde(default)]
    guidance: Option<String>,
}

#[derive(Deserialize)]
struct JournalPromptData {
    id: QuestionId,
    prompt: String,
    min_length: usize,
    #[serde(default)]
    guidance: Option<String>,
}

impl TryFrom<JournalPromptData> for JournalPrompt {
    type Error = JournalError;

    fn try_from(data: JournalPromptData) -> Result<Self, Self::Error> {
        JournalPrompt::new(data.id, data.prompt, data.min_length, data.guidance)
    }
}

impl JournalPrompt {
    /// Creates a validated journal prompt.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::EmptyPrompt` for blank prompt text and
    /// `JournalError::InvalidMinLength` when `min_length` is zero.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        min_length: usize,
        guidance: Option<String>,
    ) -> Result<Self, JournalError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(JournalError::EmptyPrompt);
        }
        if min_length == 0 {
            return Err(JournalError::InvalidMinLength);
        }
        Ok(Self {
            id,
            prompt,
            min_length,
            guidance,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    #[must_use]
    pub fn guidance(&self) -> Option<&str> {
        self.guidance.as_deref()
    }

    /// Whether an entry clears the minimum-length gate.
    ///
    /// Length is counted in characters of the trimmed input, so leading and
    /// trailing whitespace cannot pad an entry over the bar.
    #[must_use]
    pub fn accepts(&self, entry: &str) -> bool {
        entry.trim().chars().count() >= self.min_length
    }
}
