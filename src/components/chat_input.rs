//! Chat Input Component
//!
//! Input bar at the bottom of the Tell chat, plus the typing indicator shown
//! above it while a reply is pending.

use dioxus::prelude::*;

fn submit(mut content: Signal<String>, mut sending: Signal<bool>, on_send: EventHandler<String>) {
    let text = content();
    if text.trim().is_empty() || sending() {
        return;
    }

    sending.set(true);
    on_send.call(text);
    content.set(String::new());

    spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        sending.set(false);
    });
}

/// Message input bar; Enter sends, Shift+Enter inserts a newline.
#[component]
pub fn ChatInput(
    /// Handler called with the message text
    on_send: EventHandler<String>,
    #[props(default = "Ask a question or share a theory...".to_string())]
    placeholder: String,
    /// Locked until the story introduction is over
    #[props(default = false)]
    disabled: bool,
) -> Element {
    let mut content = use_signal(String::new);
    let sending = use_signal(|| false);

    let handle_keydown = move |e: KeyboardEvent| {
        if e.key() == Key::Enter && !e.modifiers().shift() {
            e.prevent_default();
            submit(content, sending, on_send);
        }
    };

    let is_disabled = disabled || sending();
    let can_send = !content().trim().is_empty() && !is_disabled;

    rsx! {
        div { id: "message-input", class: "chat-input-bar",
            textarea {
                class: "chat-input-textarea",
                placeholder: "{placeholder}",
                value: "{content}",
                oninput: move |e| content.set(e.value()),
                onkeydown: handle_keydown,
                disabled: is_disabled,
                rows: 1,
            }

            button {
                class: if can_send { "chat-send-btn chat-send-btn-active" } else { "chat-send-btn" },
                onclick: move |_| submit(content, sending, on_send),
                disabled: !can_send,
                title: "Send message (Enter)",
                "Send"
            }
        }
    }
}

/// "<name> is typing…" line.
#[component]
pub fn TypingIndicator(name: String) -> Element {
    rsx! {
        div { class: "typing-indicator",
            span { class: "typing-dots", "•••" }
            span { class: "typing-name", "{name} is typing…" }
        }
    }
}
