mod home;
mod journal;
mod play;
mod report;
mod shell;
mod state;

pub use home::HomeView;
pub use journal::JournalView;
pub use play::PlayView;
pub use report::ReportView;
pub use shell::GameShell;
pub use state::{ViewError, ViewState, view_state_from_resource};

use games_core::model::{GameKind, GameSlug};

use crate::routes::Route;

/// Journal games get their own route; everything else plays on the generic
/// game route.
#[must_use]
pub fn route_for_game(kind: GameKind, slug: &GameSlug) -> Route {
    match kind {
        GameKind::Journal => Route::Journal {
            slug: slug.as_str().to_string(),
        },
        GameKind::Quiz | GameKind::Story => Route::Play {
            slug: slug.as_str().to_string(),
        },
    }
}
