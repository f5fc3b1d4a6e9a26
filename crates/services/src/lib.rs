#![forbid(unsafe_code)]

pub mod error;
pub mod game_loop;
pub mod rewards;

pub use games_core::Clock;

pub use error::GameError;
pub use game_loop::{
    GameAnswer, GameAnswerResult, GameLoopService, GameProgress, GameReport, RunningGame,
};
pub use rewards::{EarnedRewards, RewardService};
