use dioxus::prelude::*;
use teachtell_core::markdown::render_markdown;

/// Detail view for an examined clue.
#[component]
pub fn CluePanel(
    title: String,
    content: String,
    /// Full image URL, if the clue has one
    image: Option<String>,
    on_close: EventHandler<()>,
) -> Element {
    let html = render_markdown(&content);

    rsx! {
        div { class: "clue-panel",
            div { class: "clue-panel-header",
                h3 { "{title}" }
                button { class: "clue-panel-close", onclick: move |_| on_close.call(()), "×" }
            }
            if let Some(src) = image {
                img { class: "clue-panel-image", src: "{src}" }
            }
            div { class: "clue-panel-body", dangerous_inner_html: "{html}" }
        }
    }
}
