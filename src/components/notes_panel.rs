//! Notes Component
//!
//! Free-text notes for a week, saved 600 ms after the last keystroke.

use std::time::Duration;

use dioxus::prelude::*;

const AUTOSAVE_DELAY: Duration = Duration::from_millis(600);

#[component]
pub fn NotesPanel(
    /// Notes loaded from progress
    initial: String,
    /// Called with the full text once typing pauses
    on_save: EventHandler<String>,
) -> Element {
    let mut text = use_signal(|| initial.clone());
    let mut status = use_signal(String::new);
    let mut generation = use_signal(|| 0u64);

    let handle_input = move |e: FormEvent| {
        text.set(e.value());
        status.set("Saving…".to_string());

        let current = generation() + 1;
        generation.set(current);

        spawn(async move {
            tokio::time::sleep(AUTOSAVE_DELAY).await;
            // a newer keystroke restarted the timer
            if generation() != current {
                return;
            }
            on_save.call(text());
            status.set("Autosaved".to_string());
        });
    };

    rsx! {
        section { class: "notes-panel",
            div { class: "notes-header",
                h3 { "📝 My Notes" }
                span { class: "notes-status", "{status}" }
            }
            textarea {
                class: "notes-textarea",
                placeholder: "Write down what you learned, new words, or your theories...",
                value: "{text}",
                oninput: handle_input,
                rows: 6,
            }
        }
    }
}
