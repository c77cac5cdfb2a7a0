//! Message Component
//!
//! One chat-style message: sender line, optional avatar, and a rendered
//! markdown body with the reader's highlights applied.

use dioxus::prelude::*;

use crate::context::use_highlights;

/// A rendered message whose body can be highlighted.
///
/// `html` is already-rendered markdown; stored highlights for `message_id`
/// are wrapped in spans before display.
#[component]
pub fn MessageView(
    /// Content hash keying the highlights
    message_id: String,
    sender: String,
    html: String,
    /// Style variant (`user`, `system`, `character`, `task`, ...)
    #[props(default = "bot".to_string())]
    kind: String,
    #[props(default)]
    avatar: Option<String>,
    /// Small label next to the sender
    #[props(default)]
    badge: Option<String>,
    #[props(default)]
    image: Option<String>,
    children: Element,
) -> Element {
    let highlights = use_highlights();
    let body = highlights.read().render_html(&message_id, &html);

    rsx! {
        div { class: "message message-{kind}",
            if let Some(src) = avatar {
                img { class: "message-avatar", src: "{src}", alt: "{sender}" }
            }

            div { class: "message-main",
                div { class: "message-sender",
                    "{sender}"
                    if let Some(label) = badge {
                        span { class: "message-badge", "{label}" }
                    }
                }

                div {
                    class: "message-body",
                    "data-message-root": "{message_id}",
                    dangerous_inner_html: "{body}",
                }

                if let Some(src) = image {
                    img { class: "message-image", src: "{src}" }
                }

                {children}
            }
        }
    }
}
