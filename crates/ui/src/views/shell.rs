use dioxus::prelude::*;

use crate::vm::FeedbackState;

/// Shared chrome around every game screen: title, progress, reward badges,
/// and the transient feedback overlays. Screens only supply the body.
#[component]
pub fn GameShell(
    title: String,
    subtitle: Option<String>,
    score: u32,
    answered: u32,
    total: u32,
    coins: u32,
    xp: u32,
    feedback: FeedbackState,
    children: Element,
) -> Element {
    let percent = if total == 0 { 0 } else { answered * 100 / total };

    rsx! {
        div { class: "game-shell",
            header { class: "game-shell__header",
                div { class: "game-shell__heading",
                    h2 { class: "game-shell__title", "{title}" }
                    if let Some(subtitle) = subtitle {
                        p { class: "game-shell__subtitle", "{subtitle}" }
                    }
                }
                div { class: "game-shell__rewards",
                    span { class: "badge badge--coins", "🪙 {coins}" }
                    span { class: "badge badge--xp", "⭐ {xp} XP" }
                }
            }
            div { class: "game-shell__progress",
                div { class: "progress-track",
                    div { class: "progress-fill", style: "width: {percent}%" }
                }
                span { class: "progress-label", "{answered} / {total}" }
                span { class: "score-label", "Score: {score}" }
                if let Some(flash) = feedback.flash() {
                    if flash.is_correct {
                        span { class: "point-flash point-flash--correct", "+{flash.amount}" }
                    } else {
                        span { class: "point-flash point-flash--wrong", "✗" }
                    }
                }
            }
            div { class: "game-shell__body", {children} }
            if feedback.confetti_active() {
                ConfettiLayer {}
            }
        }
    }
}

#[component]
fn ConfettiLayer() -> Element {
    // Pure CSS animation; one span per piece.
    rsx! {
        div { class: "confetti", aria_hidden: "true",
            for i in 0..12 {
                span { class: "confetti__piece confetti__piece--{i}" }
            }
        }
    }
}
