//! Week Menu Component
//!
//! Sidebar listing the course weeks, and the overall progress chip.

use dioxus::prelude::*;
use teachtell_core::{Progress, Week};

/// Week picker with per-week section and task counts.
#[component]
pub fn WeekMenu(
    weeks: Vec<Week>,
    /// Currently selected week ID
    current: Option<String>,
    on_select: EventHandler<String>,
) -> Element {
    rsx! {
        nav { class: "week-menu",
            h2 { class: "week-menu-title", "Course" }
            for week in weeks {
                button {
                    key: "{week.id}",
                    class: if current.as_deref() == Some(week.id.as_str()) { "week-item week-item-active" } else { "week-item" },
                    onclick: {
                        let id = week.id.clone();
                        move |_| on_select.call(id.clone())
                    },
                    span { class: "week-item-title", "{week.title}" }
                    if week.error.is_some() {
                        span { class: "week-item-meta week-item-error", "Unavailable" }
                    } else {
                        span { class: "week-item-meta",
                            "{week.sections.len()} sections · {week.tasks.len()} tasks"
                        }
                    }
                }
            }
        }
    }
}

/// "42% complete" chip for the header.
#[component]
pub fn ProgressChip(progress: Progress) -> Element {
    let percent = progress.percent();

    rsx! {
        div {
            class: "progress-chip",
            title: "{progress.completed} of {progress.total} tasks completed",
            div { class: "progress-chip-bar", style: "width: {percent}%;" }
            span { class: "progress-chip-label", "{percent}% complete" }
        }
    }
}
