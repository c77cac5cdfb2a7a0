//! Participant-code login and session persistence.
//!
//! A participant code is exchanged for a bearer token at
//! `POST /api/auth/login`; both are kept in [`Storage`] so every mode (Portal,
//! Teach, Tell) shares one session.

use crate::api::types::{LoginRequest, LoginResponse, SessionResponse};
use crate::api::{endpoints, ApiClient};
use crate::error::{ClientError, ClientResult};
use crate::storage::Storage;

const LOGIN_FAILED: &str = "Sign-in failed. Please check your participant code.";

/// Trim and uppercase a participant code.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub participant_code: String,
}

/// Handles login, validation and logout against the backend.
#[derive(Clone, Debug)]
pub struct SessionManager {
    api: ApiClient,
    storage: Storage,
}

impl SessionManager {
    pub fn new(api: ApiClient, storage: Storage) -> Self {
        Self { api, storage }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Stored token, if any.
    pub fn token(&self) -> ClientResult<Option<String>> {
        self.storage.session_token()
    }

    /// Stored participant code, if any.
    pub fn participant_code(&self) -> ClientResult<Option<String>> {
        self.storage.participant_code()
    }

    /// The stored session, when both token and code are present.
    pub fn stored_session(&self) -> ClientResult<Option<Session>> {
        match (self.token()?, self.participant_code()?) {
            (Some(token), Some(participant_code)) => Ok(Some(Session {
                token,
                participant_code,
            })),
            _ => Ok(None),
        }
    }

    /// Exchange a participant code for a session token and persist it.
    pub async fn login(&self, raw_code: &str) -> ClientResult<Session> {
        let participant_code = normalize_code(raw_code);
        if participant_code.is_empty() {
            return Err(ClientError::EmptyParticipantCode);
        }

        let response = self
            .api
            .post_json(
                endpoints::LOGIN,
                &LoginRequest {
                    participant_code: &participant_code,
                },
                None,
            )
            .await?;

        if !response.is_success() {
            let detail = response
                .error_detail()
                .unwrap_or_else(|| LOGIN_FAILED.to_string());
            tracing::warn!(status = response.status.as_u16(), %detail, "Login rejected");
            return Err(ClientError::LoginFailed(detail));
        }

        let body: LoginResponse = response.json().unwrap_or_default();
        let token = body.token.filter(|t| !t.is_empty()).ok_or_else(|| {
            ClientError::MissingToken("The server did not return an auth token.".to_string())
        })?;

        let participant_code = body
            .participant_code
            .map(|c| normalize_code(&c))
            .filter(|c| !c.is_empty())
            .unwrap_or(participant_code);

        self.storage.save_session(&token, &participant_code)?;
        tracing::info!(%participant_code, "Signed in");

        Ok(Session {
            token,
            participant_code,
        })
    }

    /// Check a token with `GET /api/auth/session`.
    ///
    /// Returns `None` when the backend rejects the token. A valid session is
    /// persisted again with the code the backend reports.
    pub async fn validate_session(&self, token: &str) -> ClientResult<Option<Session>> {
        if token.is_empty() {
            return Ok(None);
        }

        let response = self.api.get(endpoints::SESSION, Some(token)).await?;
        if !response.is_success() {
            tracing::debug!(status = response.status.as_u16(), "Stored session rejected");
            return Ok(None);
        }

        let body: SessionResponse = response.json().unwrap_or_default();
        let participant_code = match body.participant_code.filter(|c| !c.trim().is_empty()) {
            Some(code) => normalize_code(&code),
            None => self
                .participant_code()?
                .map(|c| normalize_code(&c))
                .unwrap_or_default(),
        };

        self.storage.save_session(token, &participant_code)?;
        Ok(Some(Session {
            token: token.to_string(),
            participant_code,
        }))
    }

    /// Revalidate the stored token.
    ///
    /// A rejected token clears storage. Transport errors are returned as-is
    /// and leave storage untouched.
    pub async fn restore_session(&self) -> ClientResult<Option<Session>> {
        let Some(token) = self.token()? else {
            return Ok(None);
        };

        match self.validate_session(&token).await? {
            Some(session) => {
                tracing::info!(participant_code = %session.participant_code, "Session restored");
                Ok(Some(session))
            }
            None => {
                tracing::info!("Stored session expired, clearing");
                self.storage.clear_session()?;
                Ok(None)
            }
        }
    }

    /// Log in again with the stored participant code.
    pub async fn refresh_token(&self) -> ClientResult<String> {
        let code = self.participant_code()?.ok_or_else(|| {
            ClientError::MissingToken("Participant code is not available".to_string())
        })?;

        tracing::debug!(participant_code = %code, "Refreshing session token");
        self.login(&code).await.map(|session| session.token)
    }

    /// Stored token, or a freshly issued one when missing or `force_refresh`.
    pub async fn ensure_token(&self, force_refresh: bool) -> ClientResult<String> {
        if !force_refresh {
            if let Some(token) = self.token()? {
                return Ok(token);
            }
        }
        self.refresh_token().await
    }

    /// Forget the stored session.
    pub fn logout(&self) -> ClientResult<()> {
        tracing::info!("Signing out");
        self.storage.clear_session()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("  abc123 "), "ABC123");
        assert_eq!(normalize_code("\t\n"), "");
    }
}
