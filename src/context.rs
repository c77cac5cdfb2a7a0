//! Service context for Teach & Tell.
//!
//! Provides the session, game and highlight services to all components via
//! use_context.
//!
//! ## Usage
//!
//! ```ignore
//! // In child components
//! let services = use_services();
//! if let Some(svc) = services() {
//!     let session = svc.auth.stored_session()?;
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use dioxus::prelude::*;
use teachtell_core::api::endpoints;
use teachtell_core::{
    ApiClient, ClientConfig, ClientResult, Explainer, GameSession, HighlightManager,
    SessionManager, Storage,
};

use crate::LaunchSettings;

/// Get the data directory for the application.
/// Uses the global data dir set from command line args.
pub fn get_data_dir() -> PathBuf {
    crate::get_data_dir()
}

/// Get the backend and content settings chosen at launch.
pub fn get_launch_settings() -> LaunchSettings {
    crate::get_launch_settings()
}

/// Everything the pages need to talk to the backend and the local store.
#[derive(Clone, Debug)]
pub struct AppServices {
    pub config: ClientConfig,
    pub auth: SessionManager,
    pub explainer: Explainer,
    pub game: GameSession,
    pub is_local: bool,
}

impl AppServices {
    /// Open the store under `data_dir` and wire up the clients.
    pub fn open(data_dir: &Path, settings: &LaunchSettings) -> ClientResult<Self> {
        let config = ClientConfig::new(&settings.api_base_url, &settings.content_dir)?;
        let storage = Storage::new(data_dir.join("store.redb"))?;
        let auth = SessionManager::new(ApiClient::new(&config.api_base_url)?, storage);

        Ok(Self {
            explainer: Explainer::new(auth.clone()),
            game: GameSession::new(auth.clone()),
            auth,
            config,
            is_local: settings.is_local,
        })
    }

    /// Stored highlights, or none if the store can't be read.
    pub fn load_highlights(&self) -> HighlightManager {
        HighlightManager::load(self.auth.storage().clone()).unwrap_or_else(|e| {
            tracing::error!("Failed to load highlights: {}", e);
            HighlightManager::new()
        })
    }

    /// Portrait or clue image served by the backend.
    pub fn image_url(&self, file: &str) -> Option<String> {
        self.auth.api().image_url(file)
    }

    /// Base URL of the backend image endpoint.
    pub fn image_base(&self) -> String {
        self.auth.api().url_for(endpoints::IMAGES)
    }
}

/// Mode destination overrides from the environment.
///
/// `TEACHTELL_TEACH_LOCAL` becomes `teachLocal`, `TEACHTELL_TELL_PRODUCTION`
/// becomes `tellProduction`, and so on.
pub fn destination_overrides() -> HashMap<String, String> {
    let mut overrides = HashMap::new();
    for (mode, env_mode) in [("teach", "TEACH"), ("tell", "TELL")] {
        for (suffix, env_suffix) in [("Local", "LOCAL"), ("Production", "PRODUCTION")] {
            if let Ok(value) = std::env::var(format!("TEACHTELL_{env_mode}_{env_suffix}")) {
                overrides.insert(format!("{mode}{suffix}"), value);
            }
        }
    }
    overrides
}

/// Hook to access the services from context.
///
/// `None` when the local store could not be opened.
pub fn use_services() -> Signal<Option<AppServices>> {
    use_context::<Signal<Option<AppServices>>>()
}

/// Hook to access the shared highlight store.
pub fn use_highlights() -> Signal<HighlightManager> {
    use_context::<Signal<HighlightManager>>()
}
