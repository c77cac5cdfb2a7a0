use dioxus::prelude::*;
use teachtell_core::markdown::render_markdown;
use teachtell_core::Explanation;

/// What the explanation popover shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ExplanationState {
    Loading { word: String },
    Ready(Explanation),
    Failed { word: String, error: String },
}

#[component]
pub fn ExplanationPopover(state: ExplanationState, on_close: EventHandler<()>) -> Element {
    let (title, body) = match &state {
        ExplanationState::Loading { word } => (word.clone(), None),
        ExplanationState::Ready(explanation) => (
            explanation.word.clone(),
            Some(render_markdown(&explanation.to_markdown())),
        ),
        ExplanationState::Failed { word, error } => (word.clone(), Some(render_markdown(error))),
    };

    rsx! {
        div { class: "explanation-popover",
            div { class: "explanation-header",
                span { class: "explanation-title", "💡 {title}" }
                button {
                    class: "explanation-close",
                    onclick: move |_| on_close.call(()),
                    "×"
                }
            }
            match body {
                Some(html) => rsx! {
                    div { class: "explanation-body", dangerous_inner_html: "{html}" }
                },
                None => rsx! {
                    div { class: "explanation-body explanation-loading", "Loading explanation…" }
                },
            }
        }
    }
}
