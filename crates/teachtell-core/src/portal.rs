//! The login gate shared by Teach and Tell.
//!
//! The portal signs the participant in (or restores a stored session) and
//! then offers the two modes.

use std::collections::HashMap;
use std::fmt;

use crate::auth::SessionManager;
use crate::error::ClientError;

pub const LOGIN_SUCCESS: &str = "Success! Choose your mode below.";
pub const SESSION_READY: &str = "Session ready. You can move between Teach and Tell at any time.";
pub const SESSION_RESTORED: &str = "Session restored. Choose a mode to continue.";
pub const SESSION_RESTORING: &str = "Restoring your previous session…";
pub const SESSION_EXPIRED: &str =
    "Your previous session expired. Please enter your participant code again.";
pub const SESSION_CLEARED: &str = "Session cleared. Enter a new participant code.";
pub const SERVER_UNREACHABLE: &str =
    "Could not reach the server. Please check your connection or try again later.";
pub const ENTER_CODE: &str = "Please enter the participant code provided to you.";

/// The two learning modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Teach,
    Tell,
}

impl Mode {
    pub fn key(&self) -> &'static str {
        match self {
            Mode::Teach => "teach",
            Mode::Tell => "tell",
        }
    }

    /// In-app route of the mode.
    pub fn default_route(&self) -> &'static str {
        match self {
            Mode::Teach => "/teach",
            Mode::Tell => "/tell",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Where entering `mode` leads.
///
/// `overrides` may hold `<mode>Local` and `<mode>Production` entries. The
/// entry for the current environment wins; in production the local entry is
/// used as a fallback. Otherwise the built-in route is used.
pub fn resolve_destination(
    mode: Mode,
    is_local: bool,
    overrides: &HashMap<String, String>,
) -> String {
    let lookup = |suffix: &str| {
        overrides
            .get(&format!("{}{}", mode.key(), suffix))
            .filter(|v| !v.trim().is_empty())
            .cloned()
    };

    let preferred = if is_local { "Local" } else { "Production" };
    lookup(preferred)
        .or_else(|| if is_local { None } else { lookup("Local") })
        .unwrap_or_else(|| mode.default_route().to_string())
}

/// What the portal shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortalView {
    /// Code entry, with an optional error and status line
    Login {
        error: Option<String>,
        status: Option<String>,
    },
    /// Signed in; choose Teach or Tell
    ModeSelect {
        participant_code: String,
        login_status: Option<String>,
        mode_status: String,
    },
}

impl PortalView {
    pub fn login() -> Self {
        PortalView::Login {
            error: None,
            status: None,
        }
    }

    fn login_error(error: impl Into<String>) -> Self {
        PortalView::Login {
            error: Some(error.into()),
            status: None,
        }
    }

    fn login_status(status: &str) -> Self {
        PortalView::Login {
            error: None,
            status: Some(status.to_string()),
        }
    }
}

/// Inline text for a failed sign-in.
pub fn login_error_text(err: &ClientError) -> String {
    match err {
        ClientError::EmptyParticipantCode => ENTER_CODE.to_string(),
        ClientError::LoginFailed(detail) => detail.clone(),
        ClientError::Http(_) => SERVER_UNREACHABLE.to_string(),
        other => other.to_string(),
    }
}

/// Sign in with `raw_code`.
pub async fn login(auth: &SessionManager, raw_code: &str) -> PortalView {
    match auth.login(raw_code).await {
        Ok(session) => PortalView::ModeSelect {
            participant_code: session.participant_code,
            login_status: Some(LOGIN_SUCCESS.to_string()),
            mode_status: SESSION_READY.to_string(),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Portal login failed");
            PortalView::login_error(login_error_text(&e))
        }
    }
}

/// Restore the stored session, if any.
///
/// Any failure, including an unreachable server, clears the stored session.
pub async fn restore(auth: &SessionManager) -> PortalView {
    match auth.stored_session() {
        Ok(Some(_)) => {}
        Ok(None) => return PortalView::login(),
        Err(e) => {
            tracing::warn!(error = %e, "Could not read stored session");
            return PortalView::login();
        }
    }

    match auth.restore_session().await {
        Ok(Some(session)) => PortalView::ModeSelect {
            participant_code: session.participant_code,
            login_status: None,
            mode_status: SESSION_RESTORED.to_string(),
        },
        Ok(None) => PortalView::login_status(SESSION_EXPIRED),
        Err(e) => {
            tracing::warn!(error = %e, "Stored session is no longer valid");
            if let Err(e) = auth.logout() {
                tracing::error!(error = %e, "Failed to clear stored session");
            }
            PortalView::login_status(SESSION_EXPIRED)
        }
    }
}

/// Forget the session and return to code entry.
pub fn switch_code(auth: &SessionManager) -> PortalView {
    if let Err(e) = auth.logout() {
        tracing::error!(error = %e, "Failed to clear stored session");
    }
    PortalView::login_status(SESSION_CLEARED)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_destinations() {
        let none = HashMap::new();
        assert_eq!(resolve_destination(Mode::Teach, true, &none), "/teach");
        assert_eq!(resolve_destination(Mode::Tell, false, &none), "/tell");
    }

    #[test]
    fn test_environment_override_wins() {
        let o = overrides(&[("teachLocal", "/local-teach"), ("teachProduction", "/prod-teach")]);
        assert_eq!(resolve_destination(Mode::Teach, true, &o), "/local-teach");
        assert_eq!(resolve_destination(Mode::Teach, false, &o), "/prod-teach");
    }

    #[test]
    fn test_production_falls_back_to_local_override() {
        let o = overrides(&[("tellLocal", "/local-tell")]);
        assert_eq!(resolve_destination(Mode::Tell, false, &o), "/local-tell");

        let o = overrides(&[("tellProduction", "/prod-tell")]);
        assert_eq!(resolve_destination(Mode::Tell, true, &o), "/tell");
    }

    #[test]
    fn test_login_error_text() {
        assert_eq!(login_error_text(&ClientError::EmptyParticipantCode), ENTER_CODE);
        assert_eq!(
            login_error_text(&ClientError::LoginFailed("Unknown code".into())),
            "Unknown code"
        );
    }
}
