//! Tell page - the detective chat game.
//!
//! Messages from the backend stream into the chat; clue messages open the
//! clue panel instead. The input stays locked until the story introduction
//! reaches the apartment.

use dioxus::prelude::*;
use teachtell_core::explain::TUTOR_SENDER;
use teachtell_core::game::roster::{self, Character, HELP_ACTION};
use teachtell_core::game::HIDE_MESSAGE_ACTION;
use teachtell_core::markdown::{render_markdown, render_typewriter};
use teachtell_core::{ChatLog, DisplayMessage, HighlightOutcome};

use crate::app::Route;
use crate::components::{
    use_highlight_bridge, BridgeEvent, CharacterDrawer, ChatInput, CluePanel, Drawer, GameMenu,
    MaterialsDrawer, MessageView, TutorialOverlay, TypingIndicator,
};
use crate::context::{use_highlights, use_services};

#[component]
pub fn Tell() -> Element {
    let navigator = use_navigator();
    let services = use_services();
    let mut highlights = use_highlights();
    let mut chat = use_signal(ChatLog::new);
    // name shown in the typing indicator
    let mut typing: Signal<Option<String>> = use_signal(|| None);
    let mut current_character: Signal<Option<&'static Character>> = use_signal(|| None);
    let mut drawer: Signal<Option<Drawer>> = use_signal(|| None);
    let mut tutorial: Signal<Option<usize>> = use_signal(|| None);
    let mut notice: Signal<Option<String>> = use_signal(|| None);

    // Load the game once signed in
    use_effect(move || {
        let Some(svc) = services.peek().clone() else {
            return;
        };
        if !matches!(svc.auth.stored_session(), Ok(Some(_))) {
            tracing::info!("No session, returning to portal");
            navigator.replace(Route::Portal {});
            return;
        }

        typing.set(Some("Narrator".to_string()));
        spawn(async move {
            match svc.game.start().await {
                Ok(messages) => {
                    chat.write().push_all(messages, false);
                }
                Err(e) => chat.write().push_error(&e),
            }
            typing.set(None);
        });
    });

    // Keep the newest message in view
    use_effect(move || {
        let _ = chat.read().messages().len();
        let _ = document::eval(
            "const el = document.getElementById('chat-area'); if (el) el.scrollTop = el.scrollHeight;",
        );
    });

    let run_action = use_callback(move |action: String| {
        if action == HELP_ACTION {
            tutorial.set(Some(0));
            return;
        }
        let Some(svc) = services.peek().clone() else {
            return;
        };

        if let Some(character) = roster::character_by_action(&action) {
            current_character.set(Some(character));
        }
        typing.set(roster::typing_character(current_character()).map(|c| c.name.to_string()));

        spawn(async move {
            match svc.game.action(&action).await {
                Ok(outcome) => {
                    chat.write().push_all(outcome.messages, outcome.replaces_intro);
                    if outcome.show_tutorial {
                        tutorial.set(Some(0));
                    }
                }
                Err(e) => chat.write().push_error(&e),
            }
            typing.set(None);
        });
    });

    let send_message = move |text: String| {
        let Some(svc) = services.peek().clone() else {
            return;
        };
        chat.write().push(DisplayMessage::user(text.trim()));
        typing.set(roster::typing_character(current_character()).map(|c| c.name.to_string()));

        spawn(async move {
            match svc.game.send_message(&text).await {
                Ok(replies) => {
                    chat.write().push_all(replies, false);
                }
                Err(e) => chat.write().push_error(&e),
            }
            typing.set(None);
        });
    };

    use_highlight_bridge(move |event| match event {
        BridgeEvent::Select { message_id, text } => {
            match highlights.write().highlight_selection(&message_id, &text) {
                Ok(HighlightOutcome::Added(phrase)) => {
                    notice.set(Some(format!("Highlighted \"{phrase}\". Click it to ask the tutor.")))
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
            typing.set(Some(TUTOR_SENDER.to_string()));
            spawn(async move {
                match svc.game.explain(&word, &context).await {
                    Ok(messages) => {
                        chat.write().push_all(messages, false);
                    }
                    Err(e) => chat.write().push_error(&e),
                }
                typing.set(None);
            });
        }
    });

    let finish_tutorial = move |_| {
        tutorial.set(None);
        let _ = document::eval(
            "document.querySelectorAll('.tutorial-target').forEach(el => el.classList.remove('tutorial-target'));",
        );
        if let Some(svc) = services.peek().as_ref() {
            if let Err(e) = svc.game.complete_tutorial() {
                tracing::error!("Failed to store tutorial completion: {}", e);
            }
        }
    };

    let logout = move |_| {
        if let Some(svc) = services() {
            if let Err(e) = svc.auth.logout() {
                tracing::error!("Failed to clear session: {}", e);
            }
        }
        navigator.replace(Route::Portal {});
    };

    let Some(svc) = services() else {
        return rsx! {
            main { class: "tell",
                p { class: "form-error", "The local data store could not be opened." }
            }
        };
    };

    let image_base = svc.image_base();
    let chat_title = match current_character() {
        Some(character) if !character.is_public() => format!("{} {}", character.emoji, character.name),
        _ => "💬 Everyone".to_string(),
    };
    let messages = chat.read().messages().to_vec();
    let unlocked = chat.read().is_unlocked();
    let clue = chat.read().clue().cloned();

    rsx! {
        main { class: "tell",
            header { class: "tell-header",
                button {
                    id: "nav-suspects",
                    class: "tell-nav-btn",
                    onclick: move |_| drawer.set(Some(Drawer::Characters)),
                    "👥"
                }
                h1 { class: "tell-title", "{chat_title}" }
                button {
                    id: "nav-materials",
                    class: "tell-nav-btn",
                    onclick: move |_| drawer.set(Some(Drawer::Materials)),
                    "📄"
                }
                button {
                    id: "burger-button",
                    class: "tell-nav-btn",
                    onclick: move |_| {
                        let next = if drawer() == Some(Drawer::Menu) { None } else { Some(Drawer::Menu) };
                        drawer.set(next);
                    },
                    "☰"
                }
                button { class: "btn-link", onclick: logout, "Log out" }
            }

            if drawer() == Some(Drawer::Menu) {
                GameMenu {
                    on_pick: move |action: &'static str| run_action.call(action.to_string()),
                    on_close: move |_| drawer.set(None),
                }
            }

            div { id: "chat-area", class: "chat-area",
                for message in messages {
                    MessageView {
                        key: "{message.id}",
                        message_id: message.id.clone(),
                        sender: message.sender.clone(),
                        kind: message.kind.clone(),
                        avatar: message.avatar.as_deref().and_then(|a| svc.image_url(a)),
                        image: message.image.as_deref().and_then(|i| svc.image_url(i)),
                        html: if message.typewriter { render_typewriter(&message.content) } else { render_markdown(&message.content) },
                        if !message.buttons.is_empty() {
                            div { class: "message-buttons",
                                for button in message.buttons.clone() {
                                    button {
                                        class: "message-button",
                                        onclick: {
                                            let id = message.id.clone();
                                            let action = button.action.clone();
                                            move |_| {
                                                if action == HIDE_MESSAGE_ACTION {
                                                    chat.write().hide(&id);
                                                } else {
                                                    run_action.call(action.clone());
                                                }
                                            }
                                        },
                                        "{button.text}"
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if let Some(name) = typing() {
                TypingIndicator { name }
            }

            if let Some(message) = notice() {
                div { class: "toast", onclick: move |_| notice.set(None), "{message}" }
            }

            ChatInput {
                on_send: send_message,
                disabled: !unlocked,
                placeholder: if unlocked { "Ask a question or share a theory...".to_string() } else { "Follow the story to unlock the chat...".to_string() },
            }

            match drawer() {
                Some(Drawer::Characters) => rsx! {
                    CharacterDrawer {
                        current: current_character().map(|c| c.action),
                        image_base,
                        on_pick: move |character: &'static Character| {
                            drawer.set(None);
                            run_action.call(character.action.to_string());
                        },
                        on_close: move |_| drawer.set(None),
                    }
                },
                Some(Drawer::Materials) => rsx! {
                    MaterialsDrawer {
                        on_pick: move |action: &'static str| {
                            drawer.set(None);
                            run_action.call(action.to_string());
                        },
                        on_close: move |_| drawer.set(None),
                    }
                },
                _ => rsx! {},
            }

            if let Some(clue) = clue {
                CluePanel {
                    title: clue.title,
                    content: clue.content,
                    image: clue.image.as_deref().and_then(|i| svc.image_url(i)),
                    on_close: move |_| chat.write().close_clue(),
                }
            }

            if let Some(step) = tutorial() {
                TutorialOverlay {
                    step,
                    on_next: move |_| tutorial.set(Some(step + 1)),
                    on_finish: finish_tutorial,
                }
            }
        }
    }
}
