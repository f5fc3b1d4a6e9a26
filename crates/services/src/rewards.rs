use games_core::model::GameRewards;
use games_core::session::GameSummary;

/// Reward totals actually granted for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EarnedRewards {
    pub coins: u32,
    pub xp: u32,
}

/// Converts finished runs into coin/XP grants.
///
/// Rewards are cosmetic and flat: completing a run earns the game's full
/// configured amounts regardless of score. The score only drives the
/// confetti cue, never the payout.
#[derive(Debug, Clone, Copy, Default)]
pub struct RewardService;

impl RewardService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Rewards for a completed run.
    #[must_use]
    pub fn earned_for(&self, rewards: GameRewards, summary: &GameSummary) -> EarnedRewards {
        // A summary only exists for completed runs, so the full amount applies.
        debug_assert!(summary.total > 0);
        EarnedRewards {
            coins: rewards.coins,
            xp: rewards.xp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_core::model::{GameSlug, SessionId};

    fn summary(score: u32, total: u32) -> GameSummary {
        GameSummary {
            session_id: SessionId::generate(),
            slug: GameSlug::new("test-game").unwrap(),
            score,
            total,
            perfect: score == total,
            confetti: false,
        }
    }

    #[test]
    fn full_reward_on_completion() {
        let service = RewardService::new();
        let rewards = GameRewards { coins: 25, xp: 15 };
        let earned = service.earned_for(rewards, &summary(5, 5));
        assert_eq!(earned, EarnedRewards { coins: 25, xp: 15 });
    }

    #[test]
    fn imperfect_run_still_earns_the_flat_amount() {
        let service = RewardService::new();
        let rewards = GameRewards { coins: 25, xp: 15 };
        let earned = service.earned_for(rewards, &summary(1, 5));
        assert_eq!(earned.coins, 25);
        assert_eq!(earned.xp, 15);
    }
}
