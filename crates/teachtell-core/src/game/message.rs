use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::highlight::message_id;

/// Prefix of the message after which the player may type.
pub const INPUT_UNLOCK_PREFIX: &str = "👥 FOUR PEOPLE ARE IN THE APARTMENT";

/// Button action that hides its own message locally.
pub const HIDE_MESSAGE_ACTION: &str = "hide_message";

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A button attached to a game message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageButton {
    pub text: String,
    pub action: String,
}

impl MessageButton {
    pub fn new(text: &str, action: &str) -> Self {
        Self {
            text: text.to_string(),
            action: action.to_string(),
        }
    }

    fn hide() -> Self {
        Self::new("Hide this message", HIDE_MESSAGE_ACTION)
    }
}

/// A message as sent by the game backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameMessage {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub buttons: Vec<MessageButton>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub typewriter_style: bool,
    /// Numeric or string clue number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clue_id: Option<Value>,
}

/// A message ready for the chat stream.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayMessage {
    /// Content hash, used to key highlights
    pub id: String,
    /// `bot`, `user`, `system`, `error`, `character`, ...
    pub kind: String,
    pub sender: String,
    pub content: String,
    pub image: Option<String>,
    pub avatar: Option<String>,
    pub typewriter: bool,
    pub tutor: bool,
    pub buttons: Vec<MessageButton>,
}

impl DisplayMessage {
    pub fn new(kind: &str, sender: &str, content: &str) -> Self {
        Self {
            id: message_id(content),
            kind: kind.to_string(),
            sender: sender.to_string(),
            content: content.to_string(),
            image: None,
            avatar: None,
            typewriter: false,
            tutor: false,
            buttons: Vec::new(),
        }
    }

    /// What the player typed.
    pub fn user(text: &str) -> Self {
        Self::new("user", "You", text)
    }

    pub fn error(text: &str) -> Self {
        Self::new("error", "Error", text)
    }

    /// Whether this message lets the player start typing.
    pub fn unlocks_input(&self) -> bool {
        is_input_unlock(&self.content)
    }
}

/// How a backend message is shown.
#[derive(Debug, Clone, PartialEq)]
pub enum Displayed {
    /// Goes into the chat stream
    Chat(DisplayMessage),
    /// Opens the clue detail panel instead
    Clue {
        clue_id: String,
        content: String,
        image: Option<String>,
    },
}

impl Displayed {
    pub fn title(&self) -> Option<String> {
        match self {
            Displayed::Clue { clue_id, .. } => Some(format!("🔍 Clue {clue_id}")),
            Displayed::Chat(_) => None,
        }
    }
}

/// Whether `content` is the message that unlocks the input area.
pub fn is_input_unlock(content: &str) -> bool {
    content.trim().starts_with(INPUT_UNLOCK_PREFIX)
}

fn clue_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl GameMessage {
    pub fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or("bot")
    }

    pub fn is_tutor(&self) -> bool {
        self.character
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case("tutor"))
            || self
                .character_name
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains("tutor"))
            || self
                .kind
                .as_deref()
                .is_some_and(|k| k.eq_ignore_ascii_case("language_tutor"))
    }

    fn sender(&self) -> String {
        match self.kind() {
            "error" => "Error".to_string(),
            "system" if self.typewriter_style => "***".to_string(),
            "system" => "System".to_string(),
            "character" => self
                .character_name
                .clone()
                .or_else(|| self.character.clone())
                .unwrap_or_else(|| "Character".to_string()),
            _ => "Game".to_string(),
        }
    }

    /// Map to what the UI shows.
    pub fn into_display(self) -> Displayed {
        if self.kind() == "clue" {
            return Displayed::Clue {
                clue_id: self.clue_id.as_ref().map(clue_label).unwrap_or_default(),
                content: self.content,
                image: self.image,
            };
        }

        let tutor = self.is_tutor();
        let mut buttons = self.buttons.clone();
        if tutor && !buttons.iter().any(|b| b.action == HIDE_MESSAGE_ACTION) {
            buttons.push(MessageButton::hide());
        }

        let avatar = if self.kind() == "character" {
            self.character_image.clone()
        } else {
            None
        };

        Displayed::Chat(DisplayMessage {
            id: message_id(&self.content),
            kind: self.kind().to_string(),
            sender: self.sender(),
            content: self.content,
            image: self.image,
            avatar,
            typewriter: self.typewriter_style,
            tutor,
            buttons,
        })
    }
}
