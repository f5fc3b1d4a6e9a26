use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::model::{
    ChoiceId, CompletionPolicy, GameSlug, JournalPrompt, Pacing, Question, QuestionId, SessionId,
};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for this game")]
    Empty,
    #[error("game run already completed")]
    Completed,
    #[error("current question already answered")]
    AlreadyAnswered,
    #[error("current question has not been answered yet")]
    NotAnswered,
    #[error("unknown choice {0} for the current question")]
    UnknownChoice(ChoiceId),
    #[error("entry needs at least {needed} characters, got {got}")]
    EntryTooShort { needed: usize, got: usize },
}

//
// ─── FEEDBACK & PROGRESS ───────────────────────────────────────────────────────
//

/// Outcome of answering one multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceFeedback {
    pub question_id: QuestionId,
    pub choice_id: ChoiceId,
    pub is_correct: bool,
    /// Running score after this answer.
    pub score: u32,
    /// How long the screen holds the answered question before advancing.
    pub delay: Duration,
    pub is_last: bool,
}

/// Outcome of an accepted journal entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalFeedback {
    pub question_id: QuestionId,
    /// Trimmed character count of the accepted entry.
    pub entry_chars: usize,
    pub delay: Duration,
    pub is_last: bool,
}

/// What `advance` moved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Next,
    Finished,
}

/// Final state of a completed run, for the result view and reward grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub session_id: SessionId,
    pub slug: GameSlug,
    pub score: u32,
    pub total: u32,
    pub perfect: bool,
    /// Whether the completion view fires the confetti cue, per this game's
    /// authored policy.
    pub confetti: bool,
}

//
// ─── QUIZ SESSION ──────────────────────────────────────────────────────────────
//

/// Linear run through a fixed question list.
///
/// Holds the ephemeral per-run state: current index, cumulative score, the
/// answered guard that blocks double submission, and the result flag. The
/// run is created on screen entry and discarded on navigation; nothing here
/// persists.
///
/// The answer flow is a two-step: `choose` records the answer and returns
/// the pacing delay, the caller waits it out, then `advance` moves on. The
/// guard stays up for the whole transition so repeat clicks are no-ops.
pub struct QuizSession {
    session_id: SessionId,
    slug: GameSlug,
    questions: Vec<Question>,
    pacing: Pacing,
    completion: CompletionPolicy,
    current: usize,
    score: u32,
    answered: bool,
    show_result: bool,
}

impl QuizSession {
    /// Creates a run over the given questions.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when the question list is empty.
    pub fn new(
        session_id: SessionId,
        slug: GameSlug,
        questions: Vec<Question>,
        pacing: Pacing,
        completion: CompletionPolicy,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }
        Ok(Self {
            session_id,
            slug,
            questions,
            pacing,
            completion,
            current: 0,
            score: 0,
            answered: false,
            show_result: false,
        })
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn slug(&self) -> &GameSlug {
        &self.slug
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Whether the current question has already taken its one answer.
    #[must_use]
    pub fn answered(&self) -> bool {
        self.answered
    }

    #[must_use]
    pub fn is_showing_result(&self) -> bool {
        self.show_result
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.show_result
    }

    /// Total number of questions in this run.
    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.questions.len() as u32
    }

    /// Number of questions fully answered so far.
    #[must_use]
    pub fn answered_count(&self) -> u32 {
        let advanced = self.current as u32;
        if self.answered { advanced + 1 } else { advanced }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.show_result {
            None
        } else {
            self.questions.get(self.current)
        }
    }

    #[must_use]
    pub fn questions_mut(&mut self) -> &mut [Question] {
        &mut self.questions
    }

    /// Records the single allowed answer for the current question.
    ///
    /// Score goes up by exactly 1 when the chosen option carries the
    /// correct flag, otherwise it is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` once the run has finished,
    /// `SessionError::AlreadyAnswered` while the guard is up (state is
    /// untouched, so repeat clicks are idempotent), and
    /// `SessionError::UnknownChoice` for an id not on the current question.
    pub fn choose(&mut self, choice_id: ChoiceId) -> Result<ChoiceFeedback, SessionError> {
        if self.show_result {
            return Err(SessionError::Completed);
        }
        if self.answered {
            return Err(SessionError::AlreadyAnswered);
        }
        let question = self
            .questions
            .get(self.current)
            .ok_or(SessionError::Completed)?;
        let choice = question
            .choice(choice_id)
            .ok_or(SessionError::UnknownChoice(choice_id))?;

        let is_correct = choice.is_correct();
        self.answered = true;
        if is_correct {
            self.score += 1;
        }

        let is_last = self.current + 1 == self.questions.len();
        Ok(ChoiceFeedback {
            question_id: question.id(),
            choice_id,
            is_correct,
            score: self.score,
            delay: self.pacing.delay_after(is_correct, is_last),
            is_last,
        })
    }

    /// Moves past an answered question, flipping to the result view after
    /// the last one. The result view shows exactly once.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after the run finished and
    /// `SessionError::NotAnswered` when no answer has been recorded.
    pub fn advance(&mut self) -> Result<Progress, SessionError> {
        if self.show_result {
            return Err(SessionError::Completed);
        }
        if !self.answered {
            return Err(SessionError::NotAnswered);
        }
        self.answered = false;
        self.current += 1;
        if self.current >= self.questions.len() {
            self.show_result = true;
            Ok(Progress::Finished)
        } else {
            Ok(Progress::Next)
        }
    }

    /// Present only once the run is complete.
    #[must_use]
    pub fn summary(&self) -> Option<GameSummary> {
        if !self.show_result {
            return None;
        }
        let total = self.total_questions();
        Some(GameSummary {
            session_id: self.session_id,
            slug: self.slug.clone(),
            score: self.score,
            total,
            perfect: self.score == total,
            confetti: self.completion.earns_confetti(self.score, total),
        })
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("session_id", &self.session_id)
            .field("slug", &self.slug)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .field("answered", &self.answered)
            .field("show_result", &self.show_result)
            .finish_non_exhaustive()
    }
}

//
// ─── JOURNAL SESSION ───────────────────────────────────────────────────────────
//

/// Linear run through free-text prompts.
///
/// There is no wrong answer: an entry either clears the minimum-length
/// gate and counts, or is rejected with no state change at all. Accepted
/// entries are kept in memory for the run and die with it.
pub struct JournalSession {
    session_id: SessionId,
    slug: GameSlug,
    prompts: Vec<JournalPrompt>,
    pacing: Pacing,
    completion: CompletionPolicy,
    current: usize,
    entries: Vec<String>,
    answered: bool,
    show_result: bool,
}

impl JournalSession {
    /// Creates a run over the given prompts.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when the prompt list is empty.
    pub fn new(
        session_id: SessionId,
        slug: GameSlug,
        prompts: Vec<JournalPrompt>,
        pacing: Pacing,
        completion: CompletionPolicy,
    ) -> Result<Self, SessionError> {
        if prompts.is_empty() {
            return Err(SessionError::Empty);
        }
        Ok(Self {
            session_id,
            slug,
            prompts,
            pacing,
            completion,
            current: 0,
            entries: Vec::new(),
            answered: false,
            show_result: false,
        })
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn slug(&self) -> &GameSlug {
        &self.slug
    }

    #[must_use]
    pub fn current_prompt(&self) -> Option<&JournalPrompt> {
        if self.show_result {
            None
        } else {
            self.prompts.get(self.current)
        }
    }

    #[must_use]
    pub fn answered(&self) -> bool {
        self.answered
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.show_result
    }

    #[must_use]
    pub fn total_prompts(&self) -> u32 {
        self.prompts.len() as u32
    }

    /// Entries accepted so far; doubles as the journal score.
    #[must_use]
    pub fn entries_accepted(&self) -> u32 {
        self.entries.len() as u32
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Submits an entry for the current prompt.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EntryTooShort` (state untouched) while the
    /// trimmed length is below the prompt's minimum, `AlreadyAnswered`
    /// during the transition hold, and `Completed` after the run finished.
    pub fn submit(&mut self, entry: &str) -> Result<JournalFeedback, SessionError> {
        if self.show_result {
            return Err(SessionError::Completed);
        }
        if self.answered {
            return Err(SessionError::AlreadyAnswered);
        }
        let prompt = self
            .prompts
            .get(self.current)
            .ok_or(SessionError::Completed)?;

        let trimmed = entry.trim();
        let got = trimmed.chars().count();
        if !prompt.accepts(entry) {
            return Err(SessionError::EntryTooShort {
                needed: prompt.min_length(),
                got,
            });
        }

        self.answered = true;
        self.entries.push(trimmed.to_string());

        let is_last = self.current + 1 == self.prompts.len();
        Ok(JournalFeedback {
            question_id: prompt.id(),
            entry_chars: got,
            // Journal screens hold every entry for the same flat delay.
            delay: self.pacing.delay_after(true, is_last),
            is_last,
        })
    }

    /// Moves past an accepted entry; same contract as `QuizSession::advance`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after the run finished and
    /// `SessionError::NotAnswered` when nothing was accepted yet.
    pub fn advance(&mut self) -> Result<Progress, SessionError> {
        if self.show_result {
            return Err(SessionError::Completed);
        }
        if !self.answered {
            return Err(SessionError::NotAnswered);
        }
        self.answered = false;
        self.current += 1;
        if self.current >= self.prompts.len() {
            self.show_result = true;
            Ok(Progress::Finished)
        } else {
            Ok(Progress::Next)
        }
    }

    /// Present only once the run is complete.
    #[must_use]
    pub fn summary(&self) -> Option<GameSummary> {
        if !self.show_result {
            return None;
        }
        let total = self.total_prompts();
        let score = self.entries_accepted();
        Some(GameSummary {
            session_id: self.session_id,
            slug: self.slug.clone(),
            score,
            total,
            perfect: score == total,
            confetti: self.completion.earns_confetti(score, total),
        })
    }
}

impl fmt::Debug for JournalSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JournalSession")
            .field("session_id", &self.session_id)
            .field("slug", &self.slug)
            .field("prompts_len", &self.prompts.len())
            .field("current", &self.current)
            .field("entries_len", &self.entries.len())
            .field("answered", &self.answered)
            .field("show_result", &self.show_result)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Choice;

    fn build_question(id: u64) -> Question {
        // Choice 1 is always the correct one.
        let choices = vec![
            Choice::new(ChoiceId::new(1), "right", Some("✅".into()), true).unwrap(),
            Choice::new(ChoiceId::new(2), "wrong", None, false).unwrap(),
            Choice::new(ChoiceId::new(3), "also wrong", None, false).unwrap(),
        ];
        Question::new(QuestionId::new(id), format!("Q{id}"), None, choices).unwrap()
    }

    fn build_quiz(count: u64, completion: CompletionPolicy) -> QuizSession {
        let questions = (1..=count).map(build_question).collect();
        QuizSession::new(
            SessionId::generate(),
            GameSlug::new("test-quiz").unwrap(),
            questions,
            Pacing::default(),
            completion,
        )
        .unwrap()
    }

    fn build_journal(min_length: usize, count: u64) -> JournalSession {
        let prompts = (1..=count)
            .map(|id| {
                JournalPrompt::new(QuestionId::new(id), format!("Prompt {id}"), min_length, None)
                    .unwrap()
            })
            .collect();
        JournalSession::new(
            SessionId::generate(),
            GameSlug::new("test-journal").unwrap(),
            prompts,
            Pacing::journal_default(),
            CompletionPolicy::Perfect,
        )
        .unwrap()
    }

    #[test]
    fn empty_run_returns_error() {
        let err = QuizSession::new(
            SessionId::generate(),
            GameSlug::new("empty").unwrap(),
            Vec::new(),
            Pacing::default(),
            CompletionPolicy::Perfect,
        )
        .unwrap_err();
        assert_eq!(err, SessionError::Empty);
    }

    #[test]
    fn correct_choice_scores_exactly_one() {
        let mut session = build_quiz(2, CompletionPolicy::Perfect);
        let feedback = session.choose(ChoiceId::new(1)).unwrap();
        assert!(feedback.is_correct);
        assert_eq!(feedback.score, 1);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn wrong_choice_leaves_score_unchanged() {
        let mut session = build_quiz(2, CompletionPolicy::Perfect);
        let feedback = session.choose(ChoiceId::new(2)).unwrap();
        assert!(!feedback.is_correct);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn second_click_is_rejected_without_state_change() {
        let mut session = build_quiz(2, CompletionPolicy::Perfect);
        session.choose(ChoiceId::new(2)).unwrap();
        // Hammering the correct button after answering must not score.
        let err = session.choose(ChoiceId::new(1)).unwrap_err();
        assert_eq!(err, SessionError::AlreadyAnswered);
        assert_eq!(session.score(), 0);
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn unknown_choice_is_rejected_and_does_not_burn_the_answer() {
        let mut session = build_quiz(1, CompletionPolicy::Perfect);
        let err = session.choose(ChoiceId::new(99)).unwrap_err();
        assert_eq!(err, SessionError::UnknownChoice(ChoiceId::new(99)));
        assert!(!session.answered());
        assert!(session.choose(ChoiceId::new(1)).is_ok());
    }

    #[test]
    fn advance_requires_an_answer() {
        let mut session = build_quiz(2, CompletionPolicy::Perfect);
        assert_eq!(session.advance().unwrap_err(), SessionError::NotAnswered);
    }

    #[test]
    fn result_view_shows_once_after_last_question() {
        let mut session = build_quiz(2, CompletionPolicy::Perfect);
        assert!(session.summary().is_none());

        session.choose(ChoiceId::new(1)).unwrap();
        assert_eq!(session.advance().unwrap(), Progress::Next);
        assert!(session.summary().is_none());

        session.choose(ChoiceId::new(1)).unwrap();
        assert_eq!(session.advance().unwrap(), Progress::Finished);
        assert!(session.is_complete());
        assert!(session.current_question().is_none());

        // Any further interaction is rejected.
        assert_eq!(
            session.choose(ChoiceId::new(1)).unwrap_err(),
            SessionError::Completed
        );
        assert_eq!(session.advance().unwrap_err(), SessionError::Completed);
    }

    #[test]
    fn perfect_run_earns_confetti_under_perfect_policy() {
        let mut session = build_quiz(5, CompletionPolicy::Perfect);
        for _ in 0..5 {
            session.choose(ChoiceId::new(1)).unwrap();
            session.advance().unwrap();
        }
        let summary = session.summary().unwrap();
        assert_eq!(summary.score, 5);
        assert!(summary.perfect);
        assert!(summary.confetti);
    }

    #[test]
    fn two_of_five_misses_a_three_threshold() {
        let mut session = build_quiz(5, CompletionPolicy::ScoreAtLeast(3));
        for i in 0..5 {
            let pick = if i < 2 { ChoiceId::new(1) } else { ChoiceId::new(2) };
            session.choose(pick).unwrap();
            session.advance().unwrap();
        }
        let summary = session.summary().unwrap();
        assert_eq!(summary.score, 2);
        assert!(!summary.confetti);
    }

    #[test]
    fn three_of_five_meets_a_three_threshold() {
        let mut session = build_quiz(5, CompletionPolicy::ScoreAtLeast(3));
        for i in 0..5 {
            let pick = if i < 3 { ChoiceId::new(1) } else { ChoiceId::new(3) };
            session.choose(pick).unwrap();
            session.advance().unwrap();
        }
        let summary = session.summary().unwrap();
        assert_eq!(summary.score, 3);
        assert!(summary.confetti);
    }

    #[test]
    fn pacing_delay_reaches_the_caller() {
        let mut session = build_quiz(2, CompletionPolicy::Perfect);
        let feedback = session.choose(ChoiceId::new(1)).unwrap();
        assert_eq!(feedback.delay, Duration::from_millis(500));
        session.advance().unwrap();
        let feedback = session.choose(ChoiceId::new(2)).unwrap();
        assert!(feedback.is_last);
        assert_eq!(feedback.delay, Duration::from_millis(1500));
    }

    #[test]
    fn journal_rejects_short_entries_without_state_change() {
        let mut session = build_journal(10, 2);
        let err = session.submit("too short").unwrap_err();
        assert_eq!(err, SessionError::EntryTooShort { needed: 10, got: 9 });
        assert!(!session.answered());
        assert_eq!(session.entries_accepted(), 0);
    }

    #[test]
    fn journal_accepts_at_exact_minimum() {
        let mut session = build_journal(10, 2);
        let feedback = session.submit("exactly 10").unwrap();
        assert_eq!(feedback.entry_chars, 10);
        assert_eq!(session.entries_accepted(), 1);
    }

    #[test]
    fn journal_trims_before_counting() {
        let mut session = build_journal(5, 1);
        assert!(session.submit("  ab  ").is_err());
        assert!(session.submit("  hello  ").is_ok());
        assert_eq!(session.entries(), &["hello".to_string()]);
    }

    #[test]
    fn journal_completes_with_confetti_when_all_prompts_answered() {
        let mut session = build_journal(3, 2);
        session.submit("a fine day").unwrap();
        assert_eq!(session.advance().unwrap(), Progress::Next);
        session.submit("a better day").unwrap();
        assert_eq!(session.advance().unwrap(), Progress::Finished);

        let summary = session.summary().unwrap();
        assert_eq!(summary.score, 2);
        assert_eq!(summary.total, 2);
        assert!(summary.confetti);
    }

    #[test]
    fn journal_double_submit_is_guarded() {
        let mut session = build_journal(3, 1);
        session.submit("first entry").unwrap();
        let err = session.submit("second entry").unwrap_err();
        assert_eq!(err, SessionError::AlreadyAnswered);
        assert_eq!(session.entries_accepted(), 1);
    }
}
