//! Tutorial Overlay
//!
//! Step-by-step tooltips introducing the Tell interface. The step's target
//! element gets the `tutorial-target` class while the step is shown.

use dioxus::prelude::*;
use teachtell_core::game::roster::TUTORIAL_STEPS;

#[component]
pub fn TutorialOverlay(
    /// Index into the tutorial steps
    step: usize,
    on_next: EventHandler<()>,
    on_finish: EventHandler<()>,
) -> Element {
    use_effect(use_reactive!(|step| {
        if let Some(target) = TUTORIAL_STEPS.get(step).map(|s| s.target) {
            let _ = document::eval(&format!(
                "document.querySelectorAll('.tutorial-target').forEach(el => el.classList.remove('tutorial-target'));\
                 const el = document.getElementById('{target}'); if (el) el.classList.add('tutorial-target');"
            ));
        }
    }));

    let Some(current) = TUTORIAL_STEPS.get(step) else {
        return rsx! {};
    };
    let is_last = step + 1 >= TUTORIAL_STEPS.len();
    let total = TUTORIAL_STEPS.len();
    let number = step + 1;

    rsx! {
        div { class: "tutorial-backdrop",
            div { class: "tutorial-tooltip",
                div { class: "tutorial-step-count", "{number} / {total}" }
                h3 { class: "tutorial-title", "{current.title}" }
                p { class: "tutorial-text", "{current.text}" }
                div { class: "tutorial-actions",
                    button { class: "btn-secondary", onclick: move |_| on_finish.call(()), "Skip" }
                    if is_last {
                        button { class: "btn-primary", onclick: move |_| on_finish.call(()), "Got it!" }
                    } else {
                        button { class: "btn-primary", onclick: move |_| on_next.call(()), "Next" }
                    }
                }
            }
        }
    }
}
