use std::time::Duration;

use games_core::model::{ChoiceId, GameKind, GameRewards, GameSlug, JournalPrompt, Question};
use services::{GameAnswer, GameError, GameLoopService, GameProgress, GameReport, RunningGame};

use crate::views::ViewError;
use games_core::session::SessionError;

#[derive(Clone, Debug, PartialEq)]
pub enum GameIntent {
    Choose(ChoiceId),
    SubmitEntry(String),
    Advance,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the player's single answer.
    Question,
    /// Answer taken; the screen holds until the pacing delay elapses.
    Transition,
    /// Run finished; the completion view is showing.
    Result,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    /// Answer recorded; hold the screen for `delay`, then send `Advance`.
    Held { delay: Duration, is_correct: bool },
    /// Moved on to the next question or prompt.
    Advanced,
    /// Run finished; the report is available on the vm.
    Completed,
    /// Journal entry below the minimum length; nothing changed.
    RejectedShort { needed: usize, got: usize },
    /// Duplicate click or out-of-phase intent; nothing changed.
    Ignored,
}

pub struct GameVm {
    game: RunningGame,
    phase: GamePhase,
    report: Option<GameReport>,
}

impl GameVm {
    #[must_use]
    pub fn new(game: RunningGame) -> Self {
        Self {
            game,
            phase: GamePhase::Question,
            report: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn kind(&self) -> GameKind {
        self.game.kind()
    }

    #[must_use]
    pub fn title(&self) -> String {
        self.game.title().to_string()
    }

    #[must_use]
    pub fn subtitle(&self) -> Option<String> {
        self.game.subtitle().map(ToString::to_string)
    }

    #[must_use]
    pub fn slug(&self) -> GameSlug {
        self.game.slug().clone()
    }

    #[must_use]
    pub fn rewards(&self) -> GameRewards {
        self.game.rewards()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.game.score()
    }

    #[must_use]
    pub fn answered_steps(&self) -> u32 {
        self.game.answered_steps()
    }

    #[must_use]
    pub fn total_steps(&self) -> u32 {
        self.game.total_steps()
    }

    #[must_use]
    pub fn fallback_used(&self) -> bool {
        self.game.fallback_used()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<Question> {
        self.game.current_question().cloned()
    }

    #[must_use]
    pub fn current_prompt(&self) -> Option<JournalPrompt> {
        self.game.current_prompt().cloned()
    }

    #[must_use]
    pub fn report(&self) -> Option<&GameReport> {
        self.report.as_ref()
    }

    /// Drives the run from a UI intent.
    ///
    /// Guard trips (double clicks, too-short entries, stale intents) come
    /// back as ordinary outcomes so screens can render them; only genuine
    /// service misuse surfaces as a `ViewError`.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Unknown` for failures outside the session guards.
    pub fn apply(
        &mut self,
        game_loop: &GameLoopService,
        intent: GameIntent,
    ) -> Result<GameOutcome, ViewError> {
        match intent {
            GameIntent::Choose(choice_id) => {
                self.answer(game_loop, GameAnswer::Choice(choice_id))
            }
            GameIntent::SubmitEntry(entry) => self.answer(game_loop, GameAnswer::Entry(entry)),
            GameIntent::Advance => self.advance(game_loop),
        }
    }

    fn answer(
        &mut self,
        game_loop: &GameLoopService,
        answer: GameAnswer,
    ) -> Result<GameOutcome, ViewError> {
        if self.phase != GamePhase::Question {
            return Ok(GameOutcome::Ignored);
        }
        match game_loop.answer(&mut self.game, answer) {
            Ok(result) => {
                self.phase = GamePhase::Transition;
                Ok(GameOutcome::Held {
                    delay: result.delay,
                    is_correct: result.is_correct,
                })
            }
            Err(GameError::Session(SessionError::EntryTooShort { needed, got })) => {
                Ok(GameOutcome::RejectedShort { needed, got })
            }
            Err(GameError::Session(
                SessionError::AlreadyAnswered | SessionError::Completed,
            )) => Ok(GameOutcome::Ignored),
            Err(_) => Err(ViewError::Unknown),
        }
    }

    fn advance(&mut self, game_loop: &GameLoopService) -> Result<GameOutcome, ViewError> {
        if self.phase != GamePhase::Transition {
            return Ok(GameOutcome::Ignored);
        }
        match game_loop.advance(&mut self.game) {
            Ok(GameProgress::Next) => {
                self.phase = GamePhase::Question;
                Ok(GameOutcome::Advanced)
            }
            Ok(GameProgress::Completed(report)) => {
                self.phase = GamePhase::Result;
                self.report = Some(report);
                Ok(GameOutcome::Completed)
            }
            Err(GameError::Session(SessionError::Completed | SessionError::NotAnswered)) => {
                Ok(GameOutcome::Ignored)
            }
            Err(_) => Err(ViewError::Unknown),
        }
    }
}

/// # Errors
///
/// Returns `ViewError::EmptyGame` when the resolved game has no content and
/// `ViewError::Unknown` for other failures.
pub fn start_game(game_loop: &GameLoopService, slug: &GameSlug) -> Result<GameVm, ViewError> {
    let game = match game_loop.start_game(slug) {
        Ok(game) => game,
        Err(GameError::Session(SessionError::Empty)) => return Err(ViewError::EmptyGame),
        Err(_) => return Err(ViewError::Unknown),
    };
    Ok(GameVm::new(game))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::GameCatalog;
    use games_core::time::fixed_clock;
    use std::sync::Arc;

    fn game_loop() -> GameLoopService {
        GameLoopService::new(fixed_clock(), Arc::new(GameCatalog::builtin().unwrap()))
    }

    fn slug(raw: &str) -> GameSlug {
        GameSlug::new(raw).unwrap()
    }

    fn correct_choice(vm: &GameVm) -> ChoiceId {
        vm.current_question()
            .unwrap()
            .choices()
            .iter()
            .find(|c| c.is_correct())
            .unwrap()
            .id()
    }

    #[test]
    fn choose_moves_into_transition_and_advance_back() {
        let service = game_loop();
        let mut vm = start_game(&service, &slug("animal-sounds")).unwrap();
        assert_eq!(vm.phase(), GamePhase::Question);

        let choice = correct_choice(&vm);
        let outcome = vm.apply(&service, GameIntent::Choose(choice)).unwrap();
        assert!(matches!(outcome, GameOutcome::Held { is_correct: true, .. }));
        assert_eq!(vm.phase(), GamePhase::Transition);

        let outcome = vm.apply(&service, GameIntent::Advance).unwrap();
        assert_eq!(outcome, GameOutcome::Advanced);
        assert_eq!(vm.phase(), GamePhase::Question);
        assert_eq!(vm.score(), 1);
    }

    #[test]
    fn clicks_during_transition_are_ignored() {
        let service = game_loop();
        let mut vm = start_game(&service, &slug("animal-sounds")).unwrap();
        let choice = correct_choice(&vm);
        vm.apply(&service, GameIntent::Choose(choice)).unwrap();

        let outcome = vm.apply(&service, GameIntent::Choose(choice)).unwrap();
        assert_eq!(outcome, GameOutcome::Ignored);
        assert_eq!(vm.score(), 1);
    }

    #[test]
    fn advance_without_answer_is_ignored() {
        let service = game_loop();
        let mut vm = start_game(&service, &slug("animal-sounds")).unwrap();
        let outcome = vm.apply(&service, GameIntent::Advance).unwrap();
        assert_eq!(outcome, GameOutcome::Ignored);
    }

    #[test]
    fn full_run_reaches_result_phase_with_report() {
        let service = game_loop();
        let mut vm = start_game(&service, &slug("free-play")).unwrap();

        loop {
            let choice = correct_choice(&vm);
            vm.apply(&service, GameIntent::Choose(choice)).unwrap();
            match vm.apply(&service, GameIntent::Advance).unwrap() {
                GameOutcome::Advanced => {}
                GameOutcome::Completed => break,
                other => panic!("unexpected outcome: {other:?}"),
            }
        }

        assert_eq!(vm.phase(), GamePhase::Result);
        let report = vm.report().unwrap();
        assert!(report.perfect);
        assert!(report.confetti);
    }

    #[test]
    fn short_journal_entry_is_rejected_in_place() {
        let service = game_loop();
        let mut vm = start_game(&service, &slug("gratitude-journal")).unwrap();

        let outcome = vm
            .apply(&service, GameIntent::SubmitEntry("hi".into()))
            .unwrap();
        assert!(matches!(outcome, GameOutcome::RejectedShort { .. }));
        assert_eq!(vm.phase(), GamePhase::Question);
        assert_eq!(vm.score(), 0);
    }

    #[test]
    fn unknown_slug_starts_fallback_vm() {
        let service = game_loop();
        let vm = start_game(&service, &slug("mystery-game")).unwrap();
        assert!(vm.fallback_used());
        assert_eq!(vm.slug().as_str(), GameCatalog::FALLBACK_SLUG);
    }
}
