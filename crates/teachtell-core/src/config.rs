//! Client configuration.
//!
//! Resolves the backend base URL and carries the course settings used when
//! parsing Teach content.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::content::{CourseSettings, WeekMeta};
use crate::error::{ClientError, ClientResult};

/// Backend address used when running against a local server.
pub const DEFAULT_LOCAL_API: &str = "http://localhost:8000";

/// Environment variable that overrides the backend address.
pub const API_URL_ENV: &str = "TEACHTELL_API_URL";

/// Environment variable naming the production backend address.
pub const PRODUCTION_API_URL_ENV: &str = "TEACHTELL_PRODUCTION_API_URL";

/// Candidate base URLs, resolved by [`resolve_api_base`].
#[derive(Debug, Clone, Default)]
pub struct ApiBaseOptions {
    /// Explicit override; always wins when present
    pub override_url: Option<String>,
    /// Used when running locally
    pub local: Option<String>,
    /// Used when running in production
    pub production: Option<String>,
    /// Last resort when neither of the above applies
    pub fallback: Option<String>,
}

impl ApiBaseOptions {
    /// Options populated from the environment and built-in defaults.
    pub fn from_env() -> Self {
        Self {
            override_url: non_empty_env(API_URL_ENV),
            local: Some(DEFAULT_LOCAL_API.to_string()),
            production: non_empty_env(PRODUCTION_API_URL_ENV),
            fallback: Some(DEFAULT_LOCAL_API.to_string()),
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Strip trailing slashes so paths can be appended directly.
pub fn trim_trailing_slashes(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Pick the backend base URL.
///
/// The override always wins. Otherwise the local URL is used when running
/// locally and the production URL when not; if the preferred one is missing
/// the first available of local, production, fallback is used.
pub fn resolve_api_base(options: &ApiBaseOptions, is_local: bool) -> Option<String> {
    if let Some(url) = non_empty(&options.override_url) {
        return Some(trim_trailing_slashes(url));
    }

    let local = non_empty(&options.local);
    let production = non_empty(&options.production);

    let preferred = if is_local { local } else { production };
    preferred
        .or(local)
        .or(production)
        .or_else(|| non_empty(&options.fallback))
        .map(trim_trailing_slashes)
}

/// Full client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL without trailing slash
    pub api_base_url: String,
    /// Directory holding week markdown files and `data/content.json`
    pub content_dir: PathBuf,
    /// Heading classification and summary settings
    #[serde(default)]
    pub course: CourseSettings,
    /// Weeks making up the course
    #[serde(default = "crate::content::default_weeks")]
    pub weeks: Vec<WeekMeta>,
}

impl ClientConfig {
    /// Build a configuration with default course settings and weeks.
    pub fn new(api_base_url: &str, content_dir: impl AsRef<Path>) -> ClientResult<Self> {
        let api_base_url = trim_trailing_slashes(api_base_url);
        if api_base_url.is_empty() {
            return Err(ClientError::Config(
                "API base URL is not configured".to_string(),
            ));
        }

        Ok(Self {
            api_base_url,
            content_dir: content_dir.as_ref().to_path_buf(),
            course: CourseSettings::default(),
            weeks: crate::content::default_weeks(),
        })
    }

    /// Resolve the base URL from `options`, then build the configuration.
    pub fn resolve(
        options: &ApiBaseOptions,
        is_local: bool,
        content_dir: impl AsRef<Path>,
    ) -> ClientResult<Self> {
        let base = resolve_api_base(options, is_local).ok_or_else(|| {
            ClientError::Config("no API base URL candidates were provided".to_string())
        })?;
        Self::new(&base, content_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ApiBaseOptions {
        ApiBaseOptions {
            override_url: None,
            local: Some("http://localhost:8000/".into()),
            production: Some("https://api.example.org".into()),
            fallback: Some("http://fallback".into()),
        }
    }

    #[test]
    fn test_override_wins() {
        let mut opts = options();
        opts.override_url = Some("https://override.example.org//".into());
        assert_eq!(
            resolve_api_base(&opts, true).as_deref(),
            Some("https://override.example.org")
        );
    }

    #[test]
    fn test_local_and_production() {
        let opts = options();
        assert_eq!(
            resolve_api_base(&opts, true).as_deref(),
            Some("http://localhost:8000")
        );
        assert_eq!(
            resolve_api_base(&opts, false).as_deref(),
            Some("https://api.example.org")
        );
    }

    #[test]
    fn test_missing_production_falls_back_to_local() {
        let mut opts = options();
        opts.production = None;
        assert_eq!(
            resolve_api_base(&opts, false).as_deref(),
            Some("http://localhost:8000")
        );
    }

    #[test]
    fn test_fallback_only() {
        let opts = ApiBaseOptions {
            fallback: Some("http://fallback/".into()),
            ..Default::default()
        };
        assert_eq!(
            resolve_api_base(&opts, true).as_deref(),
            Some("http://fallback")
        );
        assert_eq!(resolve_api_base(&ApiBaseOptions::default(), true), None);
    }

    #[test]
    fn test_empty_base_rejected() {
        let err = ClientConfig::new("  /", ".").unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
