use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use catalog::GameDef;
use games_core::model::GameKind;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::route_for_game;

/// Catalog grid: one card per game, in pack order.
#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let navigator = use_navigator();

    // `--game <slug>` on the command line jumps straight into that game,
    // once; coming back to this screen afterwards stays here.
    use_effect(move || {
        if let Some(slug) = ctx.take_launch_game() {
            let kind = ctx
                .catalog()
                .get(&slug)
                .map_or(GameKind::Quiz, GameDef::kind);
            navigator.push(route_for_game(kind, &slug));
        }
    });

    rsx! {
        div { class: "page home",
            h2 { class: "home__title", "Pick a game" }
            div { class: "home__grid",
                for def in catalog.games().iter() {
                    GameCard {
                        title: def.title().to_string(),
                        subtitle: def.subtitle().map(ToString::to_string),
                        kind: def.kind(),
                        steps: def.content().len(),
                        coins: def.rewards().coins,
                        xp: def.rewards().xp,
                        route: route_for_game(def.kind(), def.slug()),
                    }
                }
            }
        }
    }
}

#[component]
fn GameCard(
    title: String,
    subtitle: Option<String>,
    kind: GameKind,
    steps: usize,
    coins: u32,
    xp: u32,
    route: Route,
) -> Element {
    let (kind_label, step_label) = match kind {
        GameKind::Quiz => ("Quiz", "questions"),
        GameKind::Story => ("Story", "chapters"),
        GameKind::Journal => ("Journal", "prompts"),
    };

    rsx! {
        Link { class: "game-card", to: route,
            span { class: "game-card__kind", "{kind_label}" }
            h3 { class: "game-card__title", "{title}" }
            if let Some(subtitle) = subtitle {
                p { class: "game-card__subtitle", "{subtitle}" }
            }
            div { class: "game-card__meta",
                span { "{steps} {step_label}" }
                span { class: "badge badge--coins", "🪙 {coins}" }
                span { class: "badge badge--xp", "⭐ {xp} XP" }
            }
        }
    }
}
