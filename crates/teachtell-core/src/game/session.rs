use crate::api::types::{ActionRequest, MessageRequest, MessagesResponse};
use crate::api::{endpoints, ApiResponse};
use crate::auth::SessionManager;
use crate::error::ClientResult;
use crate::explain::Explainer;

use super::message::{DisplayMessage, Displayed, GameMessage};

/// Action that begins the investigation and may trigger the tutorial.
pub const START_INVESTIGATION_ACTION: &str = "start_investigation";

/// Language-level actions that replace the last typewriter intro.
pub const LANGUAGE_ADJUST_ACTIONS: [&str; 2] =
    ["language_adjust_easier", "language_adjust_more_advanced"];

pub fn is_language_adjustment(action: &str) -> bool {
    LANGUAGE_ADJUST_ACTIONS.contains(&action)
}

fn tutorial_flag(participant_code: &str) -> String {
    format!("tutorial_completed_{participant_code}")
}

/// Result of a game action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub messages: Vec<Displayed>,
    /// The action was a language-level change; the last intro is replaced
    pub replaces_intro: bool,
    /// The tutorial should start now
    pub show_tutorial: bool,
}

/// One player's Tell game against the backend.
#[derive(Clone, Debug)]
pub struct GameSession {
    auth: SessionManager,
    explainer: Explainer,
}

impl GameSession {
    pub fn new(auth: SessionManager) -> Self {
        let explainer = Explainer::new(auth.clone());
        Self { auth, explainer }
    }

    pub fn auth(&self) -> &SessionManager {
        &self.auth
    }

    fn display_all(messages: Vec<GameMessage>) -> Vec<Displayed> {
        messages.into_iter().map(GameMessage::into_display).collect()
    }

    fn parse_messages(response: ApiResponse, default_error: &str) -> ClientResult<MessagesResponse> {
        let response = response.error_for_status(default_error)?;
        Ok(response.json().unwrap_or_default())
    }

    /// Load the game (`GET /api/game/start`).
    pub async fn start(&self) -> ClientResult<Vec<Displayed>> {
        let token = self.auth.ensure_token(false).await?;
        let response = self.auth.api().get(endpoints::GAME_START, Some(&token)).await?;
        let body = Self::parse_messages(response, "Unknown error")?;

        match body.messages {
            Some(messages) => {
                tracing::debug!(count = messages.len(), "Game started");
                Ok(Self::display_all(messages))
            }
            None => Ok(vec![Displayed::Chat(DisplayMessage::new(
                "bot",
                "System",
                "Game started!",
            ))]),
        }
    }

    /// Send a button, drawer or menu action.
    pub async fn action(&self, action: &str) -> ClientResult<ActionOutcome> {
        let token = self.auth.ensure_token(false).await?;
        let response = self
            .auth
            .api()
            .post_json(endpoints::GAME_ACTION, &ActionRequest { action }, Some(&token))
            .await?;
        let body = Self::parse_messages(response, "Failed to process action")?;

        let messages = match (body.messages, body.detail) {
            (Some(messages), _) => Self::display_all(messages),
            (None, Some(detail)) => vec![Displayed::Chat(DisplayMessage::error(&detail))],
            (None, None) => Vec::new(),
        };

        let show_tutorial = action == START_INVESTIGATION_ACTION && !self.tutorial_completed()?;
        tracing::debug!(action, count = messages.len(), show_tutorial, "Action handled");

        Ok(ActionOutcome {
            messages,
            replaces_intro: is_language_adjustment(action),
            show_tutorial,
        })
    }

    /// Send a chat message. Blank text sends nothing.
    pub async fn send_message(&self, text: &str) -> ClientResult<Vec<Displayed>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let token = self.auth.ensure_token(false).await?;
        let response = self
            .auth
            .api()
            .post_json(endpoints::GAME_MESSAGE, &MessageRequest { text }, Some(&token))
            .await?;
        let body = Self::parse_messages(response, "Failed to send message")?;

        Ok(match (body.messages, body.message) {
            (Some(messages), _) => Self::display_all(messages),
            (None, Some(message)) => vec![Displayed::Chat(DisplayMessage::new(
                "bot", "Game", &message,
            ))],
            (None, None) => Vec::new(),
        })
    }

    /// Ask the tutor about a highlighted word; the answer joins the chat.
    pub async fn explain(&self, word: &str, original_text: &str) -> ClientResult<Vec<Displayed>> {
        let messages = self.explainer.explain_messages(word.trim(), original_text).await?;
        Ok(Self::display_all(messages))
    }

    pub fn tutorial_completed(&self) -> ClientResult<bool> {
        match self.auth.participant_code()? {
            Some(code) => self.auth.storage().flag(&tutorial_flag(&code)),
            None => Ok(false),
        }
    }

    pub fn complete_tutorial(&self) -> ClientResult<()> {
        if let Some(code) = self.auth.participant_code()? {
            self.auth.storage().set_flag(&tutorial_flag(&code))?;
            tracing::info!(participant_code = %code, "Tutorial completed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_adjustment() {
        assert!(is_language_adjustment("language_adjust_easier"));
        assert!(is_language_adjustment("language_adjust_more_advanced"));
        assert!(!is_language_adjustment("language_menu_difficulty"));
    }

    #[test]
    fn test_tutorial_flag_name() {
        assert_eq!(tutorial_flag("ABC123"), "tutorial_completed_ABC123");
    }
}
