//! UI Components for Teach & Tell.

mod chat_input;
mod clue_panel;
mod drawers;
mod explanation_popover;
mod highlight_bridge;
mod message_view;
mod notes_panel;
mod tutorial_overlay;
mod week_menu;

pub use chat_input::{ChatInput, TypingIndicator};
pub use clue_panel::CluePanel;
pub use drawers::{CharacterDrawer, Drawer, GameMenu, MaterialsDrawer};
pub use explanation_popover::{ExplanationPopover, ExplanationState};
pub use highlight_bridge::{use_highlight_bridge, BridgeEvent};
pub use message_view::MessageView;
pub use notes_panel::NotesPanel;
pub use tutorial_overlay::TutorialOverlay;
pub use week_menu::{ProgressChip, WeekMenu};
