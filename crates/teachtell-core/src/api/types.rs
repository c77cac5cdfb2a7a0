//! Request and response payloads.

use serde::{Deserialize, Serialize};

use crate::game::GameMessage;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub participant_code: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub participant_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionResponse {
    #[serde(default)]
    pub participant_code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionRequest<'a> {
    pub action: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageRequest<'a> {
    pub text: &'a str,
}

/// Body of `POST /api/game/explain`. `action` is always `"word"`.
#[derive(Debug, Clone, Serialize)]
pub struct ExplainRequest<'a> {
    pub action: &'static str,
    pub word: &'a str,
    pub original_text: &'a str,
}

impl<'a> ExplainRequest<'a> {
    pub fn word(word: &'a str, original_text: &'a str) -> Self {
        Self {
            action: "word",
            word,
            original_text,
        }
    }
}

/// Any game endpoint response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub messages: Option<Vec<GameMessage>>,
    /// Single plain message some endpoints return instead of `messages`
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
