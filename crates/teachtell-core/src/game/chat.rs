//! The chat stream as the player sees it.

use super::message::{DisplayMessage, Displayed};
use crate::error::ClientError;

/// Shown under a request error that needs a fresh sign-in.
pub const SESSION_EXPIRED_NOTICE: &str =
    "Your session has expired. Return to the portal to sign in again.";

/// An examined clue, open in the detail panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ClueDetail {
    pub title: String,
    pub content: String,
    pub image: Option<String>,
}

/// What one batch of incoming messages changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatUpdate {
    /// Messages appended to the stream
    pub added: usize,
    /// The last typewriter intro was dropped first
    pub removed_intro: bool,
    /// This batch unlocked the input area
    pub unlocked: bool,
    /// A clue was opened in the panel
    pub clue_opened: bool,
}

/// Messages in the chat, the open clue and the input lock.
///
/// The input starts locked and stays unlocked once the story reaches the
/// apartment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatLog {
    messages: Vec<DisplayMessage>,
    clue: Option<ClueDetail>,
    unlocked: bool,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[DisplayMessage] {
        &self.messages
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn clue(&self) -> Option<&ClueDetail> {
        self.clue.as_ref()
    }

    pub fn close_clue(&mut self) {
        self.clue = None;
    }

    /// Content of the newest message in the stream.
    pub fn last_content(&self) -> Option<&str> {
        self.messages.last().map(|m| m.content.as_str())
    }

    /// Append one message without any routing.
    pub fn push(&mut self, message: DisplayMessage) {
        self.messages.push(message);
    }

    /// Take a batch of backend messages.
    ///
    /// With `replaces_intro`, the most recent typewriter intro is removed
    /// before anything is appended; if there is none, nothing is removed.
    /// Clues open the panel instead of joining the stream.
    pub fn push_all(&mut self, incoming: Vec<Displayed>, replaces_intro: bool) -> ChatUpdate {
        let mut update = ChatUpdate::default();

        if replaces_intro {
            if let Some(index) = self.messages.iter().rposition(|m| m.typewriter) {
                self.messages.remove(index);
                update.removed_intro = true;
            }
        }

        for displayed in incoming {
            match displayed {
                Displayed::Chat(message) => {
                    if !self.unlocked && message.unlocks_input() {
                        tracing::info!("Chat input unlocked");
                        self.unlocked = true;
                        update.unlocked = true;
                    }
                    self.messages.push(message);
                    update.added += 1;
                }
                clue => {
                    let title = clue.title().unwrap_or_default();
                    if let Displayed::Clue { content, image, .. } = clue {
                        self.clue = Some(ClueDetail {
                            title,
                            content,
                            image,
                        });
                        update.clue_opened = true;
                    }
                }
            }
        }
        update
    }

    /// Show a failed request in the stream.
    pub fn push_error(&mut self, err: &ClientError) {
        tracing::warn!("Game request failed: {}", err);
        self.messages.push(DisplayMessage::error(&err.to_string()));
        if err.needs_login() {
            self.messages.push(DisplayMessage::error(SESSION_EXPIRED_NOTICE));
        }
    }

    /// Drop a message from the stream. Returns whether it was there.
    pub fn hide(&mut self, message_id: &str) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| m.id != message_id);
        self.messages.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intro(text: &str) -> Displayed {
        let mut message = DisplayMessage::new("system", "***", text);
        message.typewriter = true;
        Displayed::Chat(message)
    }

    fn bot(text: &str) -> Displayed {
        Displayed::Chat(DisplayMessage::new("bot", "Game", text))
    }

    fn contents(log: &ChatLog) -> Vec<&str> {
        log.messages().iter().map(|m| m.content.as_str()).collect()
    }

    #[test]
    fn test_language_change_replaces_intro() {
        let mut log = ChatLog::new();
        log.push_all(vec![intro("A long evening begins."), bot("Choose your level.")], false);

        let update = log.push_all(vec![intro("The evening starts.")], true);
        assert!(update.removed_intro);
        assert_eq!(update.added, 1);
        assert_eq!(contents(&log), vec!["Choose your level.", "The evening starts."]);
    }

    #[test]
    fn test_only_the_latest_intro_is_replaced() {
        let mut log = ChatLog::new();
        log.push_all(vec![intro("First."), bot("Between."), intro("Second.")], false);

        log.push_all(vec![intro("Second, simpler.")], true);
        assert_eq!(contents(&log), vec!["First.", "Between.", "Second, simpler."]);
    }

    #[test]
    fn test_replace_without_intro_removes_nothing() {
        let mut log = ChatLog::new();
        log.push_all(vec![bot("Welcome.")], false);

        let update = log.push_all(vec![intro("Story.")], true);
        assert!(!update.removed_intro);
        assert_eq!(contents(&log), vec!["Welcome.", "Story."]);
    }

    #[test]
    fn test_apartment_message_unlocks_input_once() {
        let mut log = ChatLog::new();
        assert!(!log.is_unlocked());

        let update = log.push_all(vec![bot("The party goes on.")], false);
        assert!(!update.unlocked);
        assert!(!log.is_unlocked());

        let update = log.push_all(
            vec![bot("👥 FOUR PEOPLE ARE IN THE APARTMENT. Who will you ask?")],
            false,
        );
        assert!(update.unlocked);
        assert!(log.is_unlocked());

        let update = log.push_all(vec![bot("👥 FOUR PEOPLE ARE IN THE APARTMENT.")], false);
        assert!(!update.unlocked);
        assert!(log.is_unlocked());
    }

    #[test]
    fn test_clue_opens_panel_not_stream() {
        let mut log = ChatLog::new();
        let update = log.push_all(
            vec![
                bot("You look closer."),
                Displayed::Clue {
                    clue_id: "3".into(),
                    content: "A torn ticket.".into(),
                    image: Some("ticket.png".into()),
                },
            ],
            false,
        );

        assert!(update.clue_opened);
        assert_eq!(update.added, 1);
        assert_eq!(contents(&log), vec!["You look closer."]);
        assert_eq!(
            log.clue(),
            Some(&ClueDetail {
                title: "🔍 Clue 3".into(),
                content: "A torn ticket.".into(),
                image: Some("ticket.png".into()),
            })
        );

        log.close_clue();
        assert!(log.clue().is_none());
    }

    #[test]
    fn test_expired_session_error_adds_notice() {
        let mut log = ChatLog::new();
        log.push_error(&ClientError::Api {
            status: 401,
            detail: "Invalid token".into(),
        });
        assert_eq!(log.messages().len(), 2);
        assert_eq!(log.last_content(), Some(SESSION_EXPIRED_NOTICE));

        let mut log = ChatLog::new();
        log.push_error(&ClientError::Content("bad".into()));
        assert_eq!(log.messages().len(), 1);
        assert_eq!(log.messages()[0].kind, "error");
    }

    #[test]
    fn test_hide_message() {
        let mut log = ChatLog::new();
        log.push_all(vec![bot("Tip from the tutor.")], false);
        let id = log.messages()[0].id.clone();
        assert!(log.hide(&id));
        assert!(log.messages().is_empty());
        assert!(!log.hide(&id));
    }
}
