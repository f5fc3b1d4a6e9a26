use dioxus::prelude::*;

use games_core::model::JournalPrompt;

use crate::views::play::GameScreen;
use crate::vm::GameIntent;

/// Journal screens reuse the generic runner; only the body differs.
#[component]
pub fn JournalView(slug: String) -> Element {
    rsx! {
        GameScreen { slug }
    }
}

/// Free-text prompt body: textarea, live character count, and the gentle
/// nudge shown when a submission is too short.
#[component]
pub(crate) fn JournalBody(
    prompt: JournalPrompt,
    locked: bool,
    entry: Signal<String>,
    nudge: Option<String>,
    on_intent: EventHandler<GameIntent>,
) -> Element {
    let written = entry.read().trim().chars().count();
    let min_length = prompt.min_length();
    let ready = written >= min_length;

    rsx! {
        div { class: "journal-body",
            p { class: "journal-prompt", "{prompt.prompt()}" }
            if let Some(guidance) = prompt.guidance() {
                p { class: "journal-guidance", "{guidance}" }
            }
            textarea {
                class: "journal-entry",
                placeholder: "Write your thoughts here...",
                disabled: locked,
                value: "{entry}",
                oninput: move |event| {
                    let mut entry = entry;
                    entry.set(event.value());
                },
            }
            div { class: "journal-meta",
                span {
                    class: if ready { "char-count char-count--ready" } else { "char-count" },
                    "{written} / {min_length}"
                }
                if let Some(nudge) = nudge {
                    span { class: "journal-nudge", "{nudge}" }
                }
            }
            button {
                class: "btn btn-primary journal-submit",
                r#type: "button",
                disabled: locked,
                onclick: move |_| {
                    let text = entry.read().clone();
                    on_intent.call(GameIntent::SubmitEntry(text));
                },
                "Save entry"
            }
        }
    }
}
