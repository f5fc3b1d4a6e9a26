use dioxus::prelude::*;
use dioxus_router::Link;

use services::GameReport;

use crate::context::AppContext;
use crate::views::route_for_game;

/// Completion view: final score, the rewards just earned, and where to go
/// next. Shown exactly once per run, at the end.
#[component]
pub fn ReportView(report: GameReport, on_play_again: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();

    let headline = if report.perfect {
        "Perfect round!"
    } else if report.confetti {
        "Great job!"
    } else {
        "All done!"
    };

    let next = report
        .next_game
        .as_ref()
        .and_then(|slug| catalog.get(slug))
        .map(|def| {
            (
                def.title().to_string(),
                route_for_game(def.kind(), def.slug()),
            )
        });

    rsx! {
        div { class: "report",
            h3 { class: "report__headline", "{headline}" }
            p { class: "report__score", "You scored {report.score} out of {report.total}." }
            div { class: "report__rewards",
                span { class: "badge badge--coins", "🪙 +{report.earned.coins}" }
                span { class: "badge badge--xp", "⭐ +{report.earned.xp} XP" }
            }
            div { class: "report__actions",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_play_again.call(()),
                    "Play again"
                }
                if let Some((title, route)) = next {
                    Link { class: "btn btn-primary", to: route, "Next: {title}" }
                }
            }
        }
    }
}
