mod feedback;
mod game_vm;

pub use feedback::{FeedbackState, PointFlash};
pub use game_vm::{GameIntent, GameOutcome, GamePhase, GameVm, start_game};
