//! Portal page - participant code entry and mode selection.
//!
//! Restores a stored session on open; otherwise asks for the participant
//! code. Once signed in the user picks Teach or Tell.

use dioxus::prelude::*;
use teachtell_core::portal::{self, resolve_destination, PortalView, SESSION_RESTORING};
use teachtell_core::Mode;

use crate::app::Route;
use crate::context::{destination_overrides, use_services};

fn default_route(mode: Mode) -> Route {
    match mode {
        Mode::Teach => Route::Teach {},
        Mode::Tell => Route::Tell {},
    }
}

#[component]
pub fn Portal() -> Element {
    let navigator = use_navigator();
    let services = use_services();
    let mut view = use_signal(PortalView::login);
    let mut code = use_signal(String::new);
    let mut busy = use_signal(|| false);

    // Restore a stored session once on open
    use_effect(move || {
        let Some(svc) = services.peek().clone() else {
            return;
        };
        if !matches!(svc.auth.stored_session(), Ok(Some(_))) {
            return;
        }
        view.set(PortalView::Login {
            error: None,
            status: Some(SESSION_RESTORING.to_string()),
        });
        spawn(async move {
            let restored = portal::restore(&svc.auth).await;
            view.set(restored);
        });
    });

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        if busy() {
            return;
        }
        let Some(svc) = services() else {
            return;
        };
        let raw = code();
        busy.set(true);
        spawn(async move {
            let next = portal::login(&svc.auth, &raw).await;
            if matches!(next, PortalView::ModeSelect { .. }) {
                code.set(String::new());
            }
            view.set(next);
            busy.set(false);
        });
    };

    let enter_mode = move |mode: Mode| {
        let is_local = services.peek().as_ref().map_or(true, |s| s.is_local);
        let destination = resolve_destination(mode, is_local, &destination_overrides());
        match destination.parse::<Route>() {
            Ok(route) => {
                navigator.push(route);
            }
            Err(_) => {
                tracing::warn!(%destination, "Unsupported destination, using built-in route");
                navigator.push(default_route(mode));
            }
        }
    };

    let switch_code = move |_| {
        if let Some(svc) = services() {
            view.set(portal::switch_code(&svc.auth));
        }
    };

    if services.read().is_none() {
        return rsx! {
            main { class: "portal",
                h1 { class: "page-title", "Teach & Tell" }
                p { class: "form-error",
                    "The local data store could not be opened. Check the data directory and restart."
                }
            }
        };
    }

    rsx! {
        main { class: "portal",
            header { class: "portal-header",
                h1 { class: "page-title", "Teach & Tell" }
                p { class: "tagline", "Learn the language. Solve the mystery." }
            }

            match view() {
                PortalView::Login { error, status } => rsx! {
                    form { class: "portal-form", onsubmit: handle_submit,
                        label { r#for: "participant-code", "Participant code" }
                        input {
                            id: "participant-code",
                            class: "portal-input",
                            r#type: "text",
                            autocomplete: "off",
                            placeholder: "e.g. ABC123",
                            value: "{code}",
                            disabled: busy(),
                            oninput: move |e| code.set(e.value()),
                        }
                        button {
                            class: "btn-primary",
                            r#type: "submit",
                            disabled: busy(),
                            if busy() { "Signing in…" } else { "Sign in" }
                        }
                        if let Some(error) = error {
                            p { class: "form-error", "{error}" }
                        }
                        if let Some(status) = status {
                            p { class: "form-status", "{status}" }
                        }
                    }
                },
                PortalView::ModeSelect { participant_code, login_status, mode_status } => rsx! {
                    section { class: "mode-select",
                        if let Some(status) = login_status {
                            p { class: "form-success", "{status}" }
                        }
                        p { class: "mode-participant", "Signed in as "
                            strong { "{participant_code}" }
                        }
                        div { class: "mode-cards",
                            button {
                                class: "mode-card",
                                onclick: move |_| enter_mode(Mode::Teach),
                                span { class: "mode-card-icon", "📚" }
                                span { class: "mode-card-title", "Teach" }
                                span { class: "mode-card-text", "Weekly readings and missions at your own pace." }
                            }
                            button {
                                class: "mode-card",
                                onclick: move |_| enter_mode(Mode::Tell),
                                span { class: "mode-card-icon", "🕵️" }
                                span { class: "mode-card-title", "Tell" }
                                span { class: "mode-card-text", "Question the suspects and crack the case." }
                            }
                        }
                        p { class: "form-status", "{mode_status}" }
                        button { class: "btn-link", onclick: switch_code, "Use a different code" }
                    }
                },
            }
        }
    }
}
