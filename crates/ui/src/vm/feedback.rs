//! Imperative feedback cues, modeled as plain state the views render.
//!
//! The shell draws whatever this struct says: a point flash near the score
//! and a confetti layer. Screens trigger cues on answers and completion and
//! reset them when the next question arrives.

/// Transient "+N" cue shown beside the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointFlash {
    pub amount: u32,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedbackState {
    flash: Option<PointFlash>,
    confetti: bool,
}

impl FeedbackState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flash a point gain with the "correct" styling.
    pub fn flash_points(&mut self, amount: u32) {
        self.flash = Some(PointFlash {
            amount,
            is_correct: true,
        });
    }

    /// Fire the confetti layer (completion cue).
    pub fn show_answer_confetti(&mut self) {
        self.confetti = true;
    }

    /// Per-answer cue: a flash styled by correctness.
    pub fn show_correct_answer_feedback(&mut self, amount: u32, is_correct: bool) {
        self.flash = Some(PointFlash { amount, is_correct });
    }

    /// Clears every active cue.
    pub fn reset(&mut self) {
        self.flash = None;
        self.confetti = false;
    }

    #[must_use]
    pub fn flash(&self) -> Option<PointFlash> {
        self.flash
    }

    #[must_use]
    pub fn confetti_active(&self) -> bool {
        self.confetti
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_answer_sets_a_correct_flash() {
        let mut feedback = FeedbackState::new();
        feedback.show_correct_answer_feedback(1, true);
        let flash = feedback.flash().unwrap();
        assert_eq!(flash.amount, 1);
        assert!(flash.is_correct);
        assert!(!feedback.confetti_active());
    }

    #[test]
    fn wrong_answer_flash_is_marked_incorrect() {
        let mut feedback = FeedbackState::new();
        feedback.show_correct_answer_feedback(1, false);
        assert!(!feedback.flash().unwrap().is_correct);
    }

    #[test]
    fn reset_clears_everything() {
        let mut feedback = FeedbackState::new();
        feedback.flash_points(3);
        feedback.show_answer_confetti();
        feedback.reset();
        assert!(feedback.flash().is_none());
        assert!(!feedback.confetti_active());
    }
}
