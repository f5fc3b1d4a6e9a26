use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use catalog::GameCatalog;
use games_core::model::GameSlug;
use services::GameLoopService;

pub trait UiApp: Send + Sync {
    /// Game to open straight away when the binary was launched with one.
    fn launch_game(&self) -> Option<GameSlug>;

    fn catalog(&self) -> Arc<GameCatalog>;
    fn game_loop(&self) -> Arc<GameLoopService>;
}

#[derive(Clone)]
pub struct AppContext {
    launch_game_configured: Option<GameSlug>,
    launch_game_once: Arc<AtomicBool>,

    catalog: Arc<GameCatalog>,
    game_loop: Arc<GameLoopService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &dyn UiApp) -> Self {
        let launch_game_configured = app.launch_game();
        Self {
            launch_game_once: Arc::new(AtomicBool::new(launch_game_configured.is_some())),
            launch_game_configured,
            catalog: app.catalog(),
            game_loop: app.game_loop(),
        }
    }

    /// One-shot: yields the launch game the first time only, so returning
    /// to the home screen later does not bounce back into the game.
    #[must_use]
    pub fn take_launch_game(&self) -> Option<GameSlug> {
        if self.launch_game_once.swap(false, Ordering::AcqRel) {
            self.launch_game_configured.clone()
        } else {
            None
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<GameCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn game_loop(&self) -> Arc<GameLoopService> {
        Arc::clone(&self.game_loop)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app.as_ref())
}
