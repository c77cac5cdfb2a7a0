//! Tell: the chat-driven detective game.
//!
//! The backend runs the story; this module maps its messages onto what the
//! chat UI shows and carries the fixed roster of characters and clues.

mod chat;
mod message;
pub mod roster;
mod session;

pub use chat::{ChatLog, ChatUpdate, ClueDetail, SESSION_EXPIRED_NOTICE};
pub use message::{
    is_input_unlock, DisplayMessage, Displayed, GameMessage, MessageButton, HIDE_MESSAGE_ACTION,
    INPUT_UNLOCK_PREFIX,
};
pub use session::{
    is_language_adjustment, ActionOutcome, GameSession, LANGUAGE_ADJUST_ACTIONS,
    START_INVESTIGATION_ACTION,
};
