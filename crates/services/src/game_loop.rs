use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use tracing::info;

use catalog::GameCatalog;
use games_core::Clock;
use games_core::model::{
    ChoiceId, GameKind, GameRewards, GameSlug, JournalPrompt, Pacing, Question, SessionId,
};
use games_core::session::{JournalSession, Progress, QuizSession};

use crate::error::GameError;
use crate::rewards::{EarnedRewards, RewardService};

//
// ─── ANSWERS & RESULTS ─────────────────────────────────────────────────────────
//

/// The player's input for the current step, by game kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameAnswer {
    Choice(ChoiceId),
    Entry(String),
}

/// Result of answering a single step in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameAnswerResult {
    /// Journals report `true` for every accepted entry.
    pub is_correct: bool,
    pub score: u32,
    /// Fixed display delay to wait before advancing.
    pub delay: Duration,
    pub is_last: bool,
}

/// Where the run stands after an advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameProgress {
    Next,
    Completed(GameReport),
}

/// Everything the result view and reward grant need from a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    pub session_id: SessionId,
    pub slug: GameSlug,
    pub score: u32,
    pub total: u32,
    pub perfect: bool,
    pub confetti: bool,
    pub earned: EarnedRewards,
    pub next_game: Option<GameSlug>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

//
// ─── RUNNING GAME ──────────────────────────────────────────────────────────────
//

enum RunningSession {
    Quiz(QuizSession),
    Journal(JournalSession),
}

/// One in-flight run, bundling the session state machine with the resolved
/// game metadata the shell renders. Dropped on navigation; nothing persists.
pub struct RunningGame {
    kind: GameKind,
    title: String,
    subtitle: Option<String>,
    rewards: GameRewards,
    next_game: Option<GameSlug>,
    fallback_used: bool,
    started_at: DateTime<Utc>,
    inner: RunningSession,
}

impl RunningGame {
    #[must_use]
    pub fn kind(&self) -> GameKind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    #[must_use]
    pub fn rewards(&self) -> GameRewards {
        self.rewards
    }

    /// Whether the metadata lookup had to substitute the fallback game.
    #[must_use]
    pub fn fallback_used(&self) -> bool {
        self.fallback_used
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        match &self.inner {
            RunningSession::Quiz(session) => session.session_id(),
            RunningSession::Journal(session) => session.session_id(),
        }
    }

    #[must_use]
    pub fn slug(&self) -> &GameSlug {
        match &self.inner {
            RunningSession::Quiz(session) => session.slug(),
            RunningSession::Journal(session) => session.slug(),
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        match &self.inner {
            RunningSession::Quiz(session) => session.score(),
            RunningSession::Journal(session) => session.entries_accepted(),
        }
    }

    #[must_use]
    pub fn total_steps(&self) -> u32 {
        match &self.inner {
            RunningSession::Quiz(session) => session.total_questions(),
            RunningSession::Journal(session) => session.total_prompts(),
        }
    }

    #[must_use]
    pub fn answered_steps(&self) -> u32 {
        match &self.inner {
            RunningSession::Quiz(session) => session.answered_count(),
            RunningSession::Journal(session) => session.entries_accepted(),
        }
    }

    /// Whether the current step has taken its answer (transition hold).
    #[must_use]
    pub fn answered(&self) -> bool {
        match &self.inner {
            RunningSession::Quiz(session) => session.answered(),
            RunningSession::Journal(session) => session.answered(),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        match &self.inner {
            RunningSession::Quiz(session) => session.is_complete(),
            RunningSession::Journal(session) => session.is_complete(),
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match &self.inner {
            RunningSession::Quiz(session) => session.current_question(),
            RunningSession::Journal(_) => None,
        }
    }

    #[must_use]
    pub fn current_prompt(&self) -> Option<&JournalPrompt> {
        match &self.inner {
            RunningSession::Quiz(_) => None,
            RunningSession::Journal(session) => session.current_prompt(),
        }
    }
}

//
// ─── GAME LOOP SERVICE ─────────────────────────────────────────────────────────
//

/// Orchestrates run start, answering and completion reporting.
#[derive(Clone)]
pub struct GameLoopService {
    clock: Clock,
    catalog: Arc<GameCatalog>,
    rewards: RewardService,
    shuffle_choices: bool,
}

impl GameLoopService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<GameCatalog>) -> Self {
        Self {
            clock,
            catalog,
            rewards: RewardService::new(),
            shuffle_choices: false,
        }
    }

    /// Enable or disable shuffling of choice order at run start.
    #[must_use]
    pub fn with_shuffle_choices(mut self, shuffle_choices: bool) -> Self {
        self.shuffle_choices = shuffle_choices;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &GameCatalog {
        &self.catalog
    }

    /// Start a run for the given game id.
    ///
    /// An unknown id is not an error: the catalog substitutes the fallback
    /// game (with a logged warning) and play proceeds.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Session` if the resolved game has no content,
    /// which builtin catalog validation rules out.
    pub fn start_game(&self, slug: &GameSlug) -> Result<RunningGame, GameError> {
        self.start_game_with_rewards(slug, None)
    }

    /// Start a run, optionally overriding the configured coin/XP amounts
    /// (route/navigation state may carry an override).
    ///
    /// # Errors
    ///
    /// Same as `start_game`.
    pub fn start_game_with_rewards(
        &self,
        slug: &GameSlug,
        rewards_override: Option<GameRewards>,
    ) -> Result<RunningGame, GameError> {
        let resolved = self.catalog.resolve(slug);
        let def = resolved.def;
        let session_id = SessionId::generate();
        let rewards = rewards_override.unwrap_or(def.rewards());

        let inner = match def.kind() {
            GameKind::Quiz | GameKind::Story => {
                let mut session = QuizSession::new(
                    session_id,
                    def.slug().clone(),
                    def.questions().to_vec(),
                    def.pacing(),
                    def.completion(),
                )?;
                if self.shuffle_choices {
                    shuffle_question_choices(session.questions_mut());
                }
                RunningSession::Quiz(session)
            }
            GameKind::Journal => RunningSession::Journal(JournalSession::new(
                session_id,
                def.slug().clone(),
                def.prompts().to_vec(),
                journal_pacing(def.pacing()),
                def.completion(),
            )?),
        };

        info!(
            game = %def.slug(),
            session = %session_id,
            kind = ?def.kind(),
            fallback = resolved.fallback_used,
            "game started"
        );

        Ok(RunningGame {
            kind: def.kind(),
            title: def.title().to_string(),
            subtitle: def.subtitle().map(ToString::to_string),
            rewards,
            next_game: def.next_game().cloned(),
            fallback_used: resolved.fallback_used,
            started_at: self.clock.now(),
            inner,
        })
    }

    /// Apply the player's answer to the current step.
    ///
    /// # Errors
    ///
    /// Returns `GameError::AnswerKindMismatch` when the answer shape does
    /// not fit the game kind, and propagates the session guards
    /// (`AlreadyAnswered`, `EntryTooShort`, `Completed`, `UnknownChoice`).
    pub fn answer(
        &self,
        game: &mut RunningGame,
        answer: GameAnswer,
    ) -> Result<GameAnswerResult, GameError> {
        match (&mut game.inner, answer) {
            (RunningSession::Quiz(session), GameAnswer::Choice(choice_id)) => {
                let feedback = session.choose(choice_id)?;
                Ok(GameAnswerResult {
                    is_correct: feedback.is_correct,
                    score: feedback.score,
                    delay: feedback.delay,
                    is_last: feedback.is_last,
                })
            }
            (RunningSession::Journal(session), GameAnswer::Entry(entry)) => {
                let feedback = session.submit(&entry)?;
                Ok(GameAnswerResult {
                    is_correct: true,
                    score: session.entries_accepted(),
                    delay: feedback.delay,
                    is_last: feedback.is_last,
                })
            }
            _ => Err(GameError::AnswerKindMismatch),
        }
    }

    /// Move past an answered step, producing the completion report after
    /// the last one.
    ///
    /// # Errors
    ///
    /// Propagates `SessionError::NotAnswered` / `Completed`.
    pub fn advance(&self, game: &mut RunningGame) -> Result<GameProgress, GameError> {
        let progress = match &mut game.inner {
            RunningSession::Quiz(session) => session.advance()?,
            RunningSession::Journal(session) => session.advance()?,
        };

        match progress {
            Progress::Next => Ok(GameProgress::Next),
            Progress::Finished => {
                let summary = match &game.inner {
                    RunningSession::Quiz(session) => session.summary(),
                    RunningSession::Journal(session) => session.summary(),
                }
                .ok_or(games_core::session::SessionError::NotAnswered)?;

                let earned = self.rewards.earned_for(game.rewards, &summary);
                info!(
                    game = %summary.slug,
                    session = %summary.session_id,
                    score = summary.score,
                    total = summary.total,
                    confetti = summary.confetti,
                    "game completed"
                );

                Ok(GameProgress::Completed(GameReport {
                    session_id: summary.session_id,
                    slug: summary.slug,
                    score: summary.score,
                    total: summary.total,
                    perfect: summary.perfect,
                    confetti: summary.confetti,
                    earned,
                    next_game: game.next_game.clone(),
                    started_at: game.started_at,
                    completed_at: self.clock.now(),
                }))
            }
        }
    }
}

/// Journal packs that keep the stock quiz pacing get the flat journal hold
/// instead; an explicitly authored pacing block wins.
fn journal_pacing(authored: Pacing) -> Pacing {
    if authored == Pacing::default() {
        Pacing::journal_default()
    } else {
        authored
    }
}

fn shuffle_question_choices(questions: &mut [Question]) {
    let mut rng = rand::rng();
    for question in questions {
        let mut order: Vec<ChoiceId> = question.choices().iter().map(|c| c.id()).collect();
        order.shuffle(&mut rng);
        question.reorder_choices(&order);
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use games_core::session::SessionError;
    use games_core::time::fixed_clock;

    fn service() -> GameLoopService {
        let catalog = Arc::new(GameCatalog::builtin().unwrap());
        GameLoopService::new(fixed_clock(), catalog)
    }

    fn slug(raw: &str) -> GameSlug {
        GameSlug::new(raw).unwrap()
    }

    fn correct_choice_id(game: &RunningGame) -> ChoiceId {
        game.current_question()
            .unwrap()
            .choices()
            .iter()
            .find(|c| c.is_correct())
            .unwrap()
            .id()
    }

    fn wrong_choice_id(game: &RunningGame) -> ChoiceId {
        game.current_question()
            .unwrap()
            .choices()
            .iter()
            .find(|c| !c.is_correct())
            .unwrap()
            .id()
    }

    #[test]
    fn perfect_quiz_run_produces_full_report() {
        let service = service();
        let mut game = service.start_game(&slug("ocean-friends")).unwrap();
        let total = game.total_steps();

        let report = loop {
            let choice = correct_choice_id(&game);
            service.answer(&mut game, GameAnswer::Choice(choice)).unwrap();
            match service.advance(&mut game).unwrap() {
                GameProgress::Next => {}
                GameProgress::Completed(report) => break report,
            }
        };

        assert_eq!(report.score, total);
        assert!(report.perfect);
        // ocean-friends uses the perfect policy.
        assert!(report.confetti);
        assert_eq!(report.earned.coins, 30);
        assert_eq!(report.next_game, Some(slug("space-explorer")));
        assert_eq!(report.started_at, report.completed_at);
    }

    #[test]
    fn all_wrong_run_scores_zero_and_still_earns_rewards() {
        let service = service();
        let mut game = service.start_game(&slug("animal-sounds")).unwrap();

        let report = loop {
            let choice = wrong_choice_id(&game);
            service.answer(&mut game, GameAnswer::Choice(choice)).unwrap();
            match service.advance(&mut game).unwrap() {
                GameProgress::Next => {}
                GameProgress::Completed(report) => break report,
            }
        };

        assert_eq!(report.score, 0);
        assert!(!report.confetti);
        assert_eq!(report.earned.coins, 25);
    }

    #[test]
    fn unknown_game_id_starts_the_fallback() {
        let service = service();
        let game = service.start_game(&slug("does-not-exist")).unwrap();
        assert!(game.fallback_used());
        assert_eq!(game.slug().as_str(), GameCatalog::FALLBACK_SLUG);
        assert_eq!(game.rewards(), GameRewards::fallback());
    }

    #[test]
    fn reward_override_replaces_configured_amounts() {
        let service = service();
        let override_rewards = GameRewards { coins: 99, xp: 1 };
        let game = service
            .start_game_with_rewards(&slug("animal-sounds"), Some(override_rewards))
            .unwrap();
        assert_eq!(game.rewards(), override_rewards);
    }

    #[test]
    fn entry_answer_to_a_quiz_is_a_kind_mismatch() {
        let service = service();
        let mut game = service.start_game(&slug("animal-sounds")).unwrap();
        let err = service
            .answer(&mut game, GameAnswer::Entry("hello".into()))
            .unwrap_err();
        assert_eq!(err, GameError::AnswerKindMismatch);
    }

    #[test]
    fn journal_run_enforces_min_length() {
        let service = service();
        let mut game = service.start_game(&slug("gratitude-journal")).unwrap();
        let min = game.current_prompt().unwrap().min_length();

        let err = service
            .answer(&mut game, GameAnswer::Entry("hi".into()))
            .unwrap_err();
        assert!(matches!(
            err,
            GameError::Session(SessionError::EntryTooShort { needed, .. }) if needed == min
        ));

        let long_enough = "a".repeat(min);
        let result = service
            .answer(&mut game, GameAnswer::Entry(long_enough))
            .unwrap();
        assert!(result.is_correct);
        assert_eq!(result.score, 1);
    }

    #[test]
    fn shuffled_choices_keep_their_correct_flags() {
        let catalog = Arc::new(GameCatalog::builtin().unwrap());
        let service =
            GameLoopService::new(fixed_clock(), catalog).with_shuffle_choices(true);
        let mut game = service.start_game(&slug("space-explorer")).unwrap();

        let report = loop {
            let choice = correct_choice_id(&game);
            service.answer(&mut game, GameAnswer::Choice(choice)).unwrap();
            match service.advance(&mut game).unwrap() {
                GameProgress::Next => {}
                GameProgress::Completed(report) => break report,
            }
        };

        assert!(report.perfect);
    }
}
