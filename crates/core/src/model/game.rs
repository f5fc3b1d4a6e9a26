use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameConfigError {
    #[error("pacing delays must be between 100 and 10000 ms")]
    InvalidPacingDelay,

    #[error("completion threshold must be > 0")]
    InvalidCompletionThreshold,
}

//
// ─── REWARDS ───────────────────────────────────────────────────────────────────
//

/// Cosmetic reward amounts granted when a game run completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRewards {
    pub coins: u32,
    pub xp: u32,
}

impl GameRewards {
    /// Values substituted when a game id cannot be resolved.
    #[must_use]
    pub fn fallback() -> Self {
        Self { coins: 10, xp: 5 }
    }
}

/// Which runner a game uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    Quiz,
    Story,
    Journal,
}

//
// ─── PACING ────────────────────────────────────────────────────────────────────
//

const MIN_DELAY_MS: u32 = 100;
const MAX_DELAY_MS: u32 = 10_000;

/// Fixed display delays after an answer, in milliseconds.
///
/// The delay is authored per game, never derived from anything beyond
/// whether the answer was correct and whether the question was the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PacingData")]
pub struct Pacing {
    correct_ms: u32,
    incorrect_ms: u32,
    completion_ms: u32,
}

#[derive(Deserialize)]
struct PacingData {
    #[serde(default = "default_answer_ms")]
    correct_ms: u32,
    #[serde(default = "default_answer_ms")]
    incorrect_ms: u32,
    #[serde(default = "default_completion_ms")]
    completion_ms: u32,
}

fn default_answer_ms() -> u32 {
    500
}

fn default_completion_ms() -> u32 {
    1500
}

impl TryFrom<PacingData> for Pacing {
    type Error = GameConfigError;

    fn try_from(data: PacingData) -> Result<Self, Self::Error> {
        Pacing::new(data.correct_ms, data.incorrect_ms, data.completion_ms)
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            correct_ms: default_answer_ms(),
            incorrect_ms: default_answer_ms(),
            completion_ms: default_completion_ms(),
        }
    }
}

impl Pacing {
    /// Creates a pacing block, bounds-checked.
    ///
    /// # Errors
    ///
    /// Returns `GameConfigError::InvalidPacingDelay` when any delay falls
    /// outside 100..=10000 ms.
    pub fn new(correct_ms: u32, incorrect_ms: u32, completion_ms: u32) -> Result<Self, GameConfigError> {
        for ms in [correct_ms, incorrect_ms, completion_ms] {
            if !(MIN_DELAY_MS..=MAX_DELAY_MS).contains(&ms) {
                return Err(GameConfigError::InvalidPacingDelay);
            }
        }
        Ok(Self {
            correct_ms,
            incorrect_ms,
            completion_ms,
        })
    }

    /// Journal screens hold every entry for the flat completion delay.
    #[must_use]
    pub fn journal_default() -> Self {
        Self {
            correct_ms: 1500,
            incorrect_ms: 1500,
            completion_ms: 1500,
        }
    }

    #[must_use]
    pub fn correct_ms(&self) -> u32 {
        self.correct_ms
    }

    #[must_use]
    pub fn incorrect_ms(&self) -> u32 {
        self.incorrect_ms
    }

    #[must_use]
    pub fn completion_ms(&self) -> u32 {
        self.completion_ms
    }

    /// How long to keep the answered question on screen before advancing.
    #[must_use]
    pub fn delay_after(&self, is_correct: bool, is_last: bool) -> Duration {
        let ms = if is_last {
            self.completion_ms
        } else if is_correct {
            self.correct_ms
        } else {
            self.incorrect_ms
        };
        Duration::from_millis(u64::from(ms))
    }
}

//
// ─── COMPLETION POLICY ─────────────────────────────────────────────────────────
//

/// Confetti threshold at the completion view.
///
/// Thresholds vary per game with no governing rule, so the policy is
/// authored data rather than a shared constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionPolicy {
    /// Confetti when the final score reaches the given count.
    ScoreAtLeast(u32),
    /// Confetti only on a flawless run.
    Perfect,
}

impl CompletionPolicy {
    /// Whether a finished run earns the confetti cue.
    #[must_use]
    pub fn earns_confetti(&self, score: u32, total: u32) -> bool {
        match self {
            CompletionPolicy::ScoreAtLeast(threshold) => score >= *threshold,
            CompletionPolicy::Perfect => total > 0 && score == total,
        }
    }

    /// Validates authored thresholds.
    ///
    /// # Errors
    ///
    /// Returns `GameConfigError::InvalidCompletionThreshold` for a zero
    /// `ScoreAtLeast` threshold, which would fire unconditionally.
    pub fn validate(&self) -> Result<(), GameConfigError> {
        match self {
            CompletionPolicy::ScoreAtLeast(0) => Err(GameConfigError::InvalidCompletionThreshold),
            _ => Ok(()),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pacing_defaults_match_observed_screens() {
        let pacing = Pacing::default();
        assert_eq!(pacing.delay_after(true, false), Duration::from_millis(500));
        assert_eq!(pacing.delay_after(false, false), Duration::from_millis(500));
        assert_eq!(pacing.delay_after(true, true), Duration::from_millis(1500));
    }

    #[test]
    fn pacing_rejects_out_of_range_delays() {
        assert_eq!(
            Pacing::new(50, 500, 1500).unwrap_err(),
            GameConfigError::InvalidPacingDelay
        );
        assert_eq!(
            Pacing::new(500, 500, 20_000).unwrap_err(),
            GameConfigError::InvalidPacingDelay
        );
    }

    #[test]
    fn score_threshold_policy() {
        let policy = CompletionPolicy::ScoreAtLeast(3);
        assert!(policy.earns_confetti(3, 5));
        assert!(policy.earns_confetti(5, 5));
        assert!(!policy.earns_confetti(2, 5));
    }

    #[test]
    fn perfect_policy() {
        let policy = CompletionPolicy::Perfect;
        assert!(policy.earns_confetti(5, 5));
        assert!(!policy.earns_confetti(4, 5));
        assert!(!policy.earns_confetti(0, 0));
    }

    #[test]
    fn zero_threshold_is_invalid() {
        assert!(CompletionPolicy::ScoreAtLeast(0).validate().is_err());
        assert!(CompletionPolicy::ScoreAtLeast(3).validate().is_ok());
        assert!(CompletionPolicy::Perfect.validate().is_ok());
    }
}
