use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use tracing_subscriber::EnvFilter;

use catalog::GameCatalog;
use games_core::model::GameSlug;
use services::{Clock, GameLoopService};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidGameSlug { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidGameSlug { raw } => write!(f, "invalid --game value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    launch_game: Option<GameSlug>,
    catalog: Arc<GameCatalog>,
    game_loop: Arc<GameLoopService>,
}

impl UiApp for DesktopApp {
    fn launch_game(&self) -> Option<GameSlug> {
        self.launch_game.clone()
    }

    fn catalog(&self) -> Arc<GameCatalog> {
        Arc::clone(&self.catalog)
    }

    fn game_loop(&self) -> Arc<GameLoopService> {
        Arc::clone(&self.game_loop)
    }
}

struct Args {
    launch_game: Option<GameSlug>,
    shuffle_choices: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--game <slug>] [--no-shuffle]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --game <slug>   open the given game straight away");
    eprintln!("  --no-shuffle    keep answer choices in authored order");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MINIGAMES_GAME  same as --game");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut launch_game = std::env::var("MINIGAMES_GAME")
            .ok()
            .and_then(|value| value.parse::<GameSlug>().ok());
        let mut shuffle_choices = true;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--game" => {
                    let value = require_value(args, "--game")?;
                    let slug = value
                        .parse::<GameSlug>()
                        .map_err(|_| ArgsError::InvalidGameSlug { raw: value })?;
                    launch_game = Some(slug);
                }
                "--no-shuffle" => shuffle_choices = false,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            launch_game,
            shuffle_choices,
        })
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // All content ships embedded in the binary; a pack error here is an
    // authoring bug and should stop the launch.
    let catalog = Arc::new(GameCatalog::builtin()?);
    tracing::info!(games = catalog.len(), "catalog loaded");

    if let Some(slug) = &parsed.launch_game
        && catalog.get(slug).is_none()
    {
        tracing::warn!(game = %slug, "launch game not in catalog, fallback will run");
    }

    let clock = Clock::default_clock();
    let game_loop = Arc::new(
        GameLoopService::new(clock, Arc::clone(&catalog))
            .with_shuffle_choices(parsed.shuffle_choices),
    );

    let app = DesktopApp {
        launch_game: parsed.launch_game,
        catalog,
        game_loop,
    };
    let context = build_app_context(Arc::new(app));

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev
    // setups. Explicitly disable it so the app doesn't behave like a modal
    // window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Mini Games")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
