use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{ChoiceId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("choice text cannot be empty")]
    EmptyChoiceText,

    #[error("question needs between {min} and {max} choices, got {got}")]
    ChoiceCountOutOfRange { min: usize, max: usize, got: usize },

    #[error("question has no choice marked correct")]
    NoCorrectChoice,

    #[error("duplicate choice id {0}")]
    DuplicateChoiceId(ChoiceId),
}

const MIN_CHOICES: usize = 2;
const MAX_CHOICES: usize = 6;

//
// ─── CHOICE ────────────────────────────────────────────────────────────────────
//

/// One candidate answer for a multiple-choice question.
///
/// `is_correct` is authored data, never computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    id: ChoiceId,
    text: String,
    #[serde(default)]
    emoji: Option<String>,
    #[serde(default)]
    is_correct: bool,
}

impl Choice {
    /// Creates a choice.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyChoiceText` when the label is blank.
    pub fn new(
        id: ChoiceId,
        text: impl Into<String>,
        emoji: Option<String>,
        is_correct: bool,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyChoiceText);
        }
        Ok(Self {
            id,
            text,
            emoji,
            is_correct,
        })
    }

    #[must_use]
    pub fn id(&self) -> ChoiceId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn emoji(&self) -> Option<&str> {
        self.emoji.as_deref()
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single prompt with its candidate answers.
///
/// Story games attach the narrative paragraph the question refers to in
/// `passage`; plain quizzes leave it empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionData")]
pub struct Question {
    id: QuestionId,
    text: String,
    #[serde(default)]
    passage: Option<String>,
    choices: Vec<Choice>,
}

/// Raw shape used to validate deserialized pack data through `Question::new`.
#[derive(Deserialize)]
struct QuestionData {
    id: QuestionId,
    text: String,
    #[serde(default)]
    passage: Option<String>,
    choices: Vec<Choice>,
}

impl TryFrom<QuestionData> for Question {
    type Error = QuestionError;

    fn try_from(data: QuestionData) -> Result<Self, Self::Error> {
        Question::new(data.id, data.text, data.passage, data.choices)
    }
}

impl Question {
    /// Creates a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the text is blank, the choice count is
    /// outside 2..=6, no choice is marked correct, or choice ids repeat.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        passage: Option<String>,
        choices: Vec<Choice>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if choices.len() < MIN_CHOICES || choices.len() > MAX_CHOICES {
            return Err(QuestionError::ChoiceCountOutOfRange {
                min: MIN_CHOICES,
                max: MAX_CHOICES,
                got: choices.len(),
            });
        }
        if !choices.iter().any(Choice::is_correct) {
            return Err(QuestionError::NoCorrectChoice);
        }
        for (index, choice) in choices.iter().enumerate() {
            if choices[..index].iter().any(|other| other.id() == choice.id()) {
                return Err(QuestionError::DuplicateChoiceId(choice.id()));
            }
        }

        Ok(Self {
            id,
            text,
            passage,
            choices,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn passage(&self) -> Option<&str> {
        self.passage.as_deref()
    }

    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Looks up a choice by id.
    #[must_use]
    pub fn choice(&self, id: ChoiceId) -> Option<&Choice> {
        self.choices.iter().find(|choice| choice.id() == id)
    }

    /// Reorders the choices in-place following `order`, keeping unknown
    /// positions stable. Used by the shuffle option in the game loop.
    pub fn reorder_choices(&mut self, order: &[ChoiceId]) {
        self.choices.sort_by_key(|choice| {
            order
                .iter()
                .position(|id| *id == choice.id())
                .unwrap_or(usize::MAX)
        });
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn choice(id: u64, correct: bool) -> Choice {
        Choice::new(ChoiceId::new(id), format!("choice {id}"), None, correct).unwrap()
    }

    #[test]
    fn builds_a_valid_question() {
        let q = Question::new(
            QuestionId::new(1),
            "What sound does a cow make?",
            None,
            vec![choice(1, false), choice(2, true), choice(3, false)],
        )
        .unwrap();

        assert_eq!(q.choices().len(), 3);
        assert!(q.choice(ChoiceId::new(2)).unwrap().is_correct());
    }

    #[test]
    fn rejects_empty_text() {
        let err = Question::new(
            QuestionId::new(1),
            "   ",
            None,
            vec![choice(1, true), choice(2, false)],
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::EmptyText);
    }

    #[test]
    fn rejects_single_choice() {
        let err =
            Question::new(QuestionId::new(1), "Pick one", None, vec![choice(1, true)]).unwrap_err();
        assert!(matches!(err, QuestionError::ChoiceCountOutOfRange { got: 1, .. }));
    }

    #[test]
    fn rejects_missing_correct_flag() {
        let err = Question::new(
            QuestionId::new(1),
            "Pick one",
            None,
            vec![choice(1, false), choice(2, false)],
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::NoCorrectChoice);
    }

    #[test]
    fn rejects_duplicate_choice_ids() {
        let err = Question::new(
            QuestionId::new(1),
            "Pick one",
            None,
            vec![choice(1, true), choice(1, false)],
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::DuplicateChoiceId(ChoiceId::new(1)));
    }

    #[test]
    fn deserializes_from_pack_json() {
        let json = r#"{
            "id": 7,
            "text": "Which planet is the red one?",
            "choices": [
                { "id": 1, "text": "Mars", "emoji": "🔴", "is_correct": true },
                { "id": 2, "text": "Venus" },
                { "id": 3, "text": "Neptune" }
            ]
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.id(), QuestionId::new(7));
        assert_eq!(q.choice(ChoiceId::new(1)).unwrap().emoji(), Some("🔴"));
    }

    #[test]
    fn reorder_follows_given_order() {
        let mut q = Question::new(
            QuestionId::new(1),
            "Pick one",
            None,
            vec![choice(1, true), choice(2, false), choice(3, false)],
        )
        .unwrap();
        q.reorder_choices(&[ChoiceId::new(3), ChoiceId::new(1), ChoiceId::new(2)]);
        let ids: Vec<u64> = q.choices().iter().map(|c| c.id().value()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
