//! Word explanations from the tutor.
//!
//! A highlighted word is sent to `POST /api/game/explain` together with the
//! text of the message it came from. Answers are cached per word and text.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use reqwest::StatusCode;

use crate::api::types::{ExplainRequest, MessagesResponse};
use crate::api::{endpoints, ApiResponse};
use crate::auth::SessionManager;
use crate::error::{ClientError, ClientResult};
use crate::game::GameMessage;
use crate::markdown::collapse_whitespace;

/// Shown when the tutor returns an empty explanation.
pub const NO_EXPLANATION: &str = "Sorry, I could not find an explanation for this word yet.";

/// Sender label of explanation messages.
pub const TUTOR_SENDER: &str = "AI Tutor";

/// Avatar image of explanation messages.
pub const TUTOR_AVATAR: &str = "detective_guide.png";

/// An explanation ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub word: String,
    /// Tutor's markdown, empty when nothing was found
    pub body: String,
    /// Served from the cache without a request
    pub cached: bool,
}

impl Explanation {
    /// `**word**` followed by the explanation or the fallback text.
    pub fn to_markdown(&self) -> String {
        let body = if self.body.is_empty() {
            NO_EXPLANATION
        } else {
            &self.body
        };
        format!("**{}**\n\n{}", self.word, body)
    }
}

fn cache_key(word: &str, original_text: &str) -> String {
    format!("{}::{}", word.to_lowercase(), original_text)
}

/// Strip the tutor's leading `Label:` line from a message.
///
/// If nothing is left the whole message is kept.
pub fn tutor_body(message: Option<&GameMessage>) -> String {
    let Some(raw) = message.map(|m| m.content.trim()).filter(|c| !c.is_empty()) else {
        return String::new();
    };

    let mut lines: Vec<&str> = raw.split('\n').map(str::trim).collect();
    if lines.first().is_some_and(|first| first.contains(':')) {
        lines.remove(0);
    }

    let body = lines.join("\n");
    let body = body.trim();
    if body.is_empty() {
        raw.to_string()
    } else {
        body.to_string()
    }
}

/// Fetches and caches explanations.
#[derive(Clone, Debug)]
pub struct Explainer {
    auth: SessionManager,
    cache: Arc<Mutex<HashMap<String, String>>>,
}

impl Explainer {
    pub fn new(auth: SessionManager) -> Self {
        Self {
            auth,
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    async fn post(&self, request: &ExplainRequest<'_>, token: &str) -> ClientResult<ApiResponse> {
        self.auth
            .api()
            .post_json(endpoints::GAME_EXPLAIN, request, Some(token))
            .await
    }

    /// Ask the backend about `word`, returning its messages.
    ///
    /// A 401 triggers one token refresh and one retry of the same request.
    pub async fn explain_messages(
        &self,
        word: &str,
        original_text: &str,
    ) -> ClientResult<Vec<GameMessage>> {
        let request = ExplainRequest::word(word, original_text);

        let token = self.auth.ensure_token(false).await?;
        let mut response = self.post(&request, &token).await?;

        if response.status == StatusCode::UNAUTHORIZED {
            tracing::debug!(word, "Explanation request unauthorized, refreshing token");
            let token = self.auth.ensure_token(true).await?;
            response = self.post(&request, &token).await?;
        }

        if !response.is_success() {
            let detail = response
                .error_detail()
                .unwrap_or_else(|| "Failed to get explanation".to_string());
            tracing::warn!(status = response.status.as_u16(), %detail, "Explanation failed");
            return Err(ClientError::ExplainFailed {
                status: response.status.as_u16(),
                detail,
            });
        }

        let body: MessagesResponse = response.json().unwrap_or_default();
        Ok(body.messages.unwrap_or_default())
    }

    /// Explain `word` as used in `original_text`.
    pub async fn explain(&self, word: &str, original_text: &str) -> ClientResult<Explanation> {
        let word = word.trim();
        let original_text = collapse_whitespace(original_text);
        let key = cache_key(word, &original_text);

        if let Some(body) = self.cache.lock().get(&key).cloned() {
            return Ok(Explanation {
                word: word.to_string(),
                body,
                cached: true,
            });
        }

        let messages = self.explain_messages(word, &original_text).await?;
        let body = tutor_body(messages.first());
        self.cache.lock().insert(key, body.clone());

        Ok(Explanation {
            word: word.to_string(),
            body,
            cached: false,
        })
    }

    pub fn cached_len(&self) -> usize {
        self.cache.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(content: &str) -> GameMessage {
        GameMessage {
            content: content.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_tutor_body_strips_label() {
        let msg = message("📚 Language Tutor:\nAlibi means proof you were elsewhere.");
        assert_eq!(
            tutor_body(Some(&msg)),
            "Alibi means proof you were elsewhere."
        );
    }

    #[test]
    fn test_tutor_body_keeps_unlabelled() {
        let msg = message("  Alibi means proof.\nSecond line.  ");
        assert_eq!(tutor_body(Some(&msg)), "Alibi means proof.\nSecond line.");
    }

    #[test]
    fn test_tutor_body_label_only() {
        let msg = message("Note: alibi");
        assert_eq!(tutor_body(Some(&msg)), "Note: alibi");
        assert_eq!(tutor_body(None), "");
    }

    #[test]
    fn test_explanation_markdown() {
        let empty = Explanation {
            word: "alibi".into(),
            body: String::new(),
            cached: false,
        };
        assert_eq!(empty.to_markdown(), format!("**alibi**\n\n{NO_EXPLANATION}"));
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(cache_key("Alibi", "some text"), "alibi::some text");
    }
}
