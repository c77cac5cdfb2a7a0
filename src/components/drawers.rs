//! Tell side drawers and header menu.

use dioxus::prelude::*;
use teachtell_core::game::roster::{self, Character};

/// Which overlay is open in Tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drawer {
    Characters,
    Materials,
    Menu,
}

/// Suspects panel; picking a character sends its `talk_*` action.
#[component]
pub fn CharacterDrawer(
    /// Character currently chatted with
    current: Option<&'static str>,
    /// Backend image endpoint, without trailing slash
    image_base: String,
    on_pick: EventHandler<&'static Character>,
    on_close: EventHandler<()>,
) -> Element {
    rsx! {
        aside { class: "drawer drawer-left",
            div { class: "drawer-header",
                h3 { "👥 Suspects" }
                button { class: "drawer-close", onclick: move |_| on_close.call(()), "×" }
            }
            for character in roster::CHARACTERS.iter() {
                button {
                    key: "{character.action}",
                    class: if current == Some(character.action) { "drawer-item drawer-item-active" } else { "drawer-item" },
                    onclick: move |_| on_pick.call(character),
                    match character.image {
                        Some(image) => rsx! {
                            img { class: "drawer-portrait", src: "{image_base}/{image}", alt: "{character.name}" }
                        },
                        None => rsx! { span { class: "drawer-emoji", "{character.emoji}" } },
                    }
                    span { class: "drawer-name", "{character.name}" }
                    span { class: "drawer-status", "{character.status}" }
                }
            }
        }
    }
}

/// Case materials panel; each item sends its `examine_clue_*` action.
#[component]
pub fn MaterialsDrawer(on_pick: EventHandler<&'static str>, on_close: EventHandler<()>) -> Element {
    rsx! {
        aside { class: "drawer drawer-right",
            div { class: "drawer-header",
                h3 { "📄 Case Materials" }
                button { class: "drawer-close", onclick: move |_| on_close.call(()), "×" }
            }
            for material in roster::CASE_MATERIALS.iter() {
                button {
                    key: "{material.action}",
                    class: "drawer-item",
                    onclick: move |_| on_pick.call(material.action),
                    span { class: "drawer-emoji", "{material.emoji}" }
                    span { class: "drawer-name", "{material.name}" }
                }
            }
        }
    }
}

#[component]
pub fn GameMenu(on_pick: EventHandler<&'static str>, on_close: EventHandler<()>) -> Element {
    rsx! {
        div { class: "game-menu",
            for item in roster::MENU_ITEMS.iter() {
                button {
                    key: "{item.action}",
                    class: "game-menu-item",
                    onclick: move |_| {
                        on_close.call(());
                        on_pick.call(item.action);
                    },
                    "{item.label}"
                }
            }
        }
    }
}
