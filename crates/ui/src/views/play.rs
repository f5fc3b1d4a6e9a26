use std::sync::Arc;

use dioxus::prelude::*;
use tracing::warn;

use catalog::GameCatalog;
use games_core::model::{ChoiceId, GameKind, GameSlug, Question};
use services::GameLoopService;

use crate::context::AppContext;
use crate::views::journal::JournalBody;
use crate::views::report::ReportView;
use crate::views::shell::GameShell;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{FeedbackState, GameIntent, GameOutcome, GamePhase, GameVm, start_game};

/// Quiz and story screens share the generic runner; the route only decides
/// which slug it starts with.
#[component]
pub fn PlayView(slug: String) -> Element {
    rsx! {
        GameScreen { slug }
    }
}

/// The one generic game screen. Kind-specific rendering happens in the
/// body; progression, pacing and feedback are identical across all games.
#[component]
pub(crate) fn GameScreen(slug: String) -> Element {
    let ctx = use_context::<AppContext>();
    let game_loop = ctx.game_loop();

    let slug = slug_or_fallback(&slug);

    let error = use_signal(|| None::<ViewError>);
    let vm = use_signal(|| None::<GameVm>);
    let feedback = use_signal(FeedbackState::new);
    let selected = use_signal(|| None::<ChoiceId>);
    let entry = use_signal(String::new);
    let nudge = use_signal(|| None::<String>);

    let game_loop_for_resource = game_loop.clone();
    let slug_for_resource = slug.clone();
    let resource = use_resource(move || {
        let game_loop = game_loop_for_resource.clone();
        let slug = slug_for_resource.clone();
        let mut error = error;
        let mut vm = vm;
        let mut feedback = feedback;
        let mut selected = selected;
        let mut entry = entry;
        let mut nudge = nudge;

        async move {
            let started = start_game(&game_loop, &slug)?;
            feedback.set(FeedbackState::new());
            selected.set(None);
            entry.set(String::new());
            nudge.set(None);
            vm.set(Some(started));
            error.set(None);
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    let dispatch_intent = {
        let game_loop = game_loop.clone();
        use_callback(move |intent: GameIntent| {
            let mut error = error;
            let mut vm = vm;
            let mut feedback = feedback;
            let mut nudge = nudge;
            let game_loop = Arc::clone(&game_loop);

            let result = {
                let mut guard = vm.write();
                let Some(vm_value) = guard.as_mut() else {
                    error.set(Some(ViewError::Unknown));
                    return;
                };
                vm_value.apply(&game_loop, intent)
            };

            match result {
                Ok(GameOutcome::Held { delay, is_correct }) => {
                    nudge.set(None);
                    feedback.write().show_correct_answer_feedback(1, is_correct);
                    // The fixed display delay, then advance. Navigating away
                    // drops the component and the pending task with it.
                    spawn(advance_after(delay, game_loop, vm, feedback, selected, entry, error));
                }
                Ok(GameOutcome::RejectedShort { needed, got }) => {
                    let missing = needed - got;
                    nudge.set(Some(format!("Keep going! {missing} more characters.")));
                }
                Ok(
                    GameOutcome::Ignored
                    | GameOutcome::Advanced
                    | GameOutcome::Completed,
                ) => {}
                Err(err) => error.set(Some(err)),
            }
        })
    };

    let on_restart = {
        let mut resource = resource;
        use_callback(move |()| {
            resource.restart();
        })
    };

    let vm_guard = vm.read();
    let phase = vm_guard.as_ref().map(GameVm::phase);
    let feedback_state = feedback();

    rsx! {
        div { class: "page game-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_restart.call(()),
                        "Retry"
                    }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(err) = *error.read() {
                        p { class: "game-error", "{err.message()}" }
                    }
                    if let Some(vm_ref) = vm_guard.as_ref() {
                        GameShell {
                            title: vm_ref.title(),
                            subtitle: vm_ref.subtitle(),
                            score: vm_ref.score(),
                            answered: vm_ref.answered_steps(),
                            total: vm_ref.total_steps(),
                            coins: vm_ref.rewards().coins,
                            xp: vm_ref.rewards().xp,
                            feedback: feedback_state,
                            if phase == Some(GamePhase::Result) {
                                if let Some(report) = vm_ref.report() {
                                    ReportView { report: report.clone(), on_play_again: on_restart }
                                }
                            } else {
                                match vm_ref.kind() {
                                    GameKind::Quiz | GameKind::Story => rsx! {
                                        if let Some(question) = vm_ref.current_question() {
                                            QuizBody {
                                                question,
                                                locked: phase == Some(GamePhase::Transition),
                                                selected: selected,
                                                feedback: feedback_state,
                                                on_intent: dispatch_intent,
                                            }
                                        }
                                    },
                                    GameKind::Journal => rsx! {
                                        if let Some(prompt) = vm_ref.current_prompt() {
                                            JournalBody {
                                                prompt,
                                                locked: phase == Some(GamePhase::Transition),
                                                entry: entry,
                                                nudge: nudge.read().clone(),
                                                on_intent: dispatch_intent,
                                            }
                                        }
                                    },
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

/// Route slugs are untrusted input. A malformed one can never hit the
/// catalog, so it gets the same warn-and-fallback treatment here that the
/// catalog gives unknown slugs.
fn slug_or_fallback(raw: &str) -> GameSlug {
    raw.parse::<GameSlug>().unwrap_or_else(|_| {
        warn!(
            game = raw,
            fallback = GameCatalog::FALLBACK_SLUG,
            "malformed game id in route, substituting fallback"
        );
        GameCatalog::fallback_slug()
    })
}

/// Waits out the pacing delay, then advances the run and resets the
/// per-question cues.
async fn advance_after(
    delay: std::time::Duration,
    game_loop: Arc<GameLoopService>,
    mut vm: Signal<Option<GameVm>>,
    mut feedback: Signal<FeedbackState>,
    mut selected: Signal<Option<ChoiceId>>,
    mut entry: Signal<String>,
    mut error: Signal<Option<ViewError>>,
) {
    tokio::time::sleep(delay).await;

    let outcome = {
        let mut guard = vm.write();
        guard
            .as_mut()
            .map(|vm_value| vm_value.apply(&game_loop, GameIntent::Advance))
    };

    match outcome {
        Some(Ok(GameOutcome::Advanced)) => {
            feedback.write().reset();
            selected.set(None);
            entry.set(String::new());
        }
        Some(Ok(GameOutcome::Completed)) => {
            let confetti = {
                let guard = vm.read();
                guard
                    .as_ref()
                    .and_then(GameVm::report)
                    .is_some_and(|report| report.confetti)
            };
            let mut cues = feedback.write();
            cues.reset();
            if confetti {
                cues.show_answer_confetti();
            }
        }
        Some(Ok(_)) | None => {}
        Some(Err(err)) => error.set(Some(err)),
    }
}

#[component]
fn QuizBody(
    question: Question,
    locked: bool,
    selected: Signal<Option<ChoiceId>>,
    feedback: FeedbackState,
    on_intent: EventHandler<GameIntent>,
) -> Element {
    rsx! {
        div { class: "quiz-body",
            if let Some(passage) = question.passage() {
                div { class: "quiz-passage",
                    p { "{passage}" }
                }
            }
            p { class: "quiz-question", "{question.text()}" }
            div { class: "quiz-choices",
                for choice in question.choices().iter().cloned() {
                    ChoiceButton {
                        choice_id: choice.id(),
                        text: choice.text().to_string(),
                        emoji: choice.emoji().map(ToString::to_string),
                        locked,
                        selected,
                        feedback,
                        on_intent,
                    }
                }
            }
        }
    }
}

#[component]
fn ChoiceButton(
    choice_id: ChoiceId,
    text: String,
    emoji: Option<String>,
    locked: bool,
    selected: Signal<Option<ChoiceId>>,
    feedback: FeedbackState,
    on_intent: EventHandler<GameIntent>,
) -> Element {
    let is_selected = selected() == Some(choice_id);
    let class = if locked && is_selected {
        match feedback.flash() {
            Some(flash) if flash.is_correct => "choice choice--selected choice--correct",
            Some(_) => "choice choice--selected choice--wrong",
            None => "choice choice--selected",
        }
    } else {
        "choice"
    };

    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            disabled: locked,
            onclick: move |_| {
                let mut selected = selected;
                selected.set(Some(choice_id));
                on_intent.call(GameIntent::Choose(choice_id));
            },
            if let Some(emoji) = emoji.as_deref() {
                span { class: "choice__emoji", "{emoji}" }
            }
            span { class: "choice__text", "{text}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::slug_or_fallback;
    use catalog::GameCatalog;

    #[test]
    fn well_formed_route_slug_passes_through() {
        assert_eq!(slug_or_fallback("animal-sounds").as_str(), "animal-sounds");
    }

    #[test]
    fn malformed_route_slug_lands_on_the_fallback_game() {
        // Uppercase, spaces and empty are all unrepresentable as slugs.
        assert_eq!(
            slug_or_fallback("Not A Slug!").as_str(),
            GameCatalog::FALLBACK_SLUG
        );
        assert_eq!(slug_or_fallback("").as_str(), GameCatalog::FALLBACK_SLUG);
    }
}
