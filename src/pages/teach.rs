//! Teach page - the weekly course.
//!
//! Shows one week at a time as a stream of messages. The week summary is
//! visible first; each Continue press reveals the next section, and the
//! notes editor comes last.

use dioxus::prelude::*;
use teachtell_core::content::load_course;
use teachtell_core::highlight::message_id;
use teachtell_core::markdown::render_markdown;
use teachtell_core::{
    HighlightOutcome, SectionKind, StepSequencer, TeachProgress, Week, WeekStep,
};

use crate::app::Route;
use crate::components::{
    use_highlight_bridge, BridgeEvent, ExplanationPopover, ExplanationState, MessageView,
    NotesPanel, ProgressChip, WeekMenu,
};
use crate::context::{use_highlights, use_services};

fn summary_text(week: &Week) -> String {
    if !week.summary.is_empty() {
        week.summary.clone()
    } else if !week.preview.is_empty() {
        week.preview.clone()
    } else {
        format!("Welcome to {}.", week.title)
    }
}

#[component]
pub fn Teach() -> Element {
    let navigator = use_navigator();
    let services = use_services();
    let mut highlights = use_highlights();
    let mut progress: Signal<Option<TeachProgress>> = use_signal(|| None);
    let mut steps = use_signal(|| StepSequencer::new(Vec::<WeekStep>::new()));
    let mut load_error: Signal<Option<String>> = use_signal(|| None);
    let mut popover: Signal<Option<ExplanationState>> = use_signal(|| None);
    let mut notice: Signal<Option<String>> = use_signal(|| None);

    // Load the course once signed in
    use_effect(move || {
        let Some(svc) = services.peek().clone() else {
            return;
        };
        if !matches!(svc.auth.stored_session(), Ok(Some(_))) {
            tracing::info!("No session, returning to portal");
            navigator.replace(Route::Portal {});
            return;
        }

        spawn(async move {
            let config = &svc.config;
            let weeks = load_course(&config.content_dir, &config.weeks, &config.course).await;
            let mut tracker = TeachProgress::new(svc.auth.storage().clone());
            if let Err(e) = tracker.initialize(weeks) {
                tracing::error!("Failed to load progress: {}", e);
                load_error.set(Some(e.to_string()));
                return;
            }
            if let Some(week) = tracker.current_week() {
                steps.set(StepSequencer::for_week(week));
            }
            tracing::info!("Course loaded ({} weeks)", tracker.weeks().len());
            progress.set(Some(tracker));
        });
    });

    use_highlight_bridge(move |event| match event {
        BridgeEvent::Select { message_id, text } => {
            let outcome = highlights.write().highlight_selection(&message_id, &text);
            match outcome {
                Ok(HighlightOutcome::Added(phrase)) => {
                    notice.set(Some(format!("Highlighted \"{phrase}\". Click it for an explanation.")))
                }
                Ok(HighlightOutcome::AlreadyHighlighted) => {
                    notice.set(Some("Already highlighted.".to_string()))
                }
                Ok(HighlightOutcome::InsideExisting) => {
                    notice.set(Some("That is part of an existing highlight.".to_string()))
                }
                Ok(HighlightOutcome::Invalid) => {}
                Err(e) => tracing::error!("Failed to save highlight: {}", e),
            }
        }
        BridgeEvent::Explain { word, context, .. } => {
            let Some(svc) = services.peek().clone() else {
                return;
            };
            popover.set(Some(ExplanationState::Loading { word: word.clone() }));
            spawn(async move {
                let state = match svc.explainer.explain(&word, &context).await {
                    Ok(explanation) => ExplanationState::Ready(explanation),
                    Err(e) => {
                        tracing::warn!(%word, "Explanation failed: {}", e);
                        ExplanationState::Failed {
                            word: word.clone(),
                            error: e.to_string(),
                        }
                    }
                };
                // a newer lookup replaced this one
                let still_pending = matches!(
                    &*popover.peek(),
                    Some(ExplanationState::Loading { word: pending }) if *pending == word
                );
                if still_pending {
                    popover.set(Some(state));
                }
            });
        }
    });

    let select_week = move |week_id: String| {
        let mut guard = progress.write();
        let Some(tracker) = guard.as_mut() else {
            return;
        };
        if tracker.current_week_id() == Some(week_id.as_str()) {
            return;
        }
        if let Err(e) = tracker.set_current_week(&week_id) {
            tracing::error!("Failed to save current week: {}", e);
        }
        if let Some(week) = tracker.current_week() {
            steps.set(StepSequencer::for_week(week));
        }
        popover.set(None);
    };

    let logout = move |_| {
        if let Some(svc) = services() {
            if let Err(e) = svc.auth.logout() {
                tracing::error!("Failed to clear session: {}", e);
            }
        }
        navigator.replace(Route::Portal {});
    };

    if let Some(error) = load_error() {
        return rsx! {
            main { class: "teach",
                p { class: "form-error", "Could not load your progress: {error}" }
            }
        };
    }

    let guard = progress.read();
    let Some(tracker) = guard.as_ref() else {
        return rsx! {
            main { class: "teach",
                p { class: "loading", "Loading course…" }
            }
        };
    };

    let weeks = tracker.weeks().to_vec();
    let current_id = tracker.current_week_id().map(str::to_string);
    let overall = tracker.overall_progress();
    let week = tracker.current_week().cloned();
    let notes = current_id
        .as_deref()
        .map(|id| tracker.notes(id).to_string())
        .unwrap_or_default();
    let completed: Vec<bool> = week
        .as_ref()
        .map(|w| {
            w.ordered_sections()
                .iter()
                .map(|s| tracker.is_task_completed(&w.id, &s.id))
                .collect()
        })
        .unwrap_or_default();
    drop(guard);

    let visible = steps.read().visible().to_vec();
    let has_more = steps.read().has_more();

    rsx! {
        main { class: "teach",
            header { class: "teach-header",
                h1 { class: "page-title", "📚 Teach" }
                ProgressChip { progress: overall }
                div { class: "teach-header-actions",
                    button { class: "btn-link", onclick: move |_| { navigator.push(Route::Portal {}); }, "Portal" }
                    button { class: "btn-link", onclick: logout, "Log out" }
                }
            }

            div { class: "teach-layout",
                WeekMenu { weeks, current: current_id, on_select: select_week }

                section { class: "teach-stream",
                    match week {
                        None => rsx! { p { class: "loading", "No weeks available." } },
                        Some(week) if week.error.is_some() => rsx! {
                            h2 { class: "week-title", "{week.title}" }
                            p { class: "form-error", "This week could not be loaded." }
                        },
                        Some(week) => {
                            let sections: Vec<_> = week.ordered_sections().into_iter().cloned().collect();
                            let summary = summary_text(&week);
                            let week_id = week.id.clone();
                            rsx! {
                                h2 { class: "week-title", "{week.title}" }

                                for step in visible {
                                    match step {
                                        WeekStep::Summary => rsx! {
                                            MessageView {
                                                key: "{week_id}-summary",
                                                message_id: message_id(&summary),
                                                sender: "Mentor",
                                                kind: "info",
                                                html: render_markdown(&summary),
                                            }
                                        },
                                        WeekStep::Section(index) => match sections.get(index) {
                                            Some(section) => {
                                                let done = completed.get(index).copied().unwrap_or(false);
                                                let is_task = section.kind == SectionKind::Task;
                                                let task_week = week_id.clone();
                                                let task_id = section.id.clone();
                                                rsx! {
                                                    MessageView {
                                                        key: "{section.id}",
                                                        message_id: message_id(&section.content),
                                                        sender: section.kind.sender().to_string(),
                                                        kind: if is_task { "task".to_string() } else { "section".to_string() },
                                                        badge: is_task.then(|| section.category.label().to_string()),
                                                        html: render_markdown(&format!("### {}\n\n{}", section.heading, section.content)),
                                                        if is_task {
                                                            button {
                                                                class: if done { "task-toggle task-toggle-done" } else { "task-toggle" },
                                                                onclick: move |_| {
                                                                    if let Some(tracker) = progress.write().as_mut() {
                                                                        if let Err(e) = tracker.toggle_task(&task_week, &task_id, !done) {
                                                                            tracing::error!("Failed to save task: {}", e);
                                                                        }
                                                                    }
                                                                },
                                                                if done { "✓ Completed" } else { "Mark as completed" }
                                                            }
                                                        }
                                                    }
                                                }
                                            }
                                            None => rsx! {},
                                        },
                                        WeekStep::Notes => {
                                            let notes_week = week_id.clone();
                                            rsx! {
                                                NotesPanel {
                                                    key: "{week_id}-notes",
                                                    initial: notes.clone(),
                                                    on_save: move |text: String| {
                                                        if let Some(tracker) = progress.write().as_mut() {
                                                            if let Err(e) = tracker.set_notes(&notes_week, &text) {
                                                                tracing::error!("Failed to save notes: {}", e);
                                                            }
                                                        }
                                                    },
                                                }
                                            }
                                        }
                                    }
                                }

                                if has_more {
                                    button {
                                        class: "btn-continue",
                                        onclick: move |_| {
                                            steps.write().advance();
                                        },
                                        "Continue"
                                    }
                                }
                            }
                        }
                    }

                    if let Some(message) = notice() {
                        div { class: "toast", onclick: move |_| notice.set(None), "{message}" }
                    }
                }
            }

            if let Some(state) = popover() {
                ExplanationPopover { state, on_close: move |_| popover.set(None) }
            }
        }
    }
}
