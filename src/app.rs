use dioxus::prelude::*;
use teachtell_core::HighlightManager;

use crate::context::{get_data_dir, get_launch_settings, AppServices};
use crate::pages::{Portal, Teach, Tell};
use crate::theme::GLOBAL_STYLES;

/// Application routes.
///
/// - `/` - Portal: participant code and mode selection
/// - `/teach` - Weekly course
/// - `/tell` - Detective chat game
#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[route("/")]
    Portal {},
    #[route("/teach")]
    Teach {},
    #[route("/tell")]
    Tell {},
}

/// Root application component.
///
/// Provides global styles, service context, and routing.
#[component]
pub fn App() -> Element {
    let services: Signal<Option<AppServices>> = use_signal(|| {
        match AppServices::open(&get_data_dir(), &get_launch_settings()) {
            Ok(svc) => {
                tracing::info!("Services ready, backend {}", svc.config.api_base_url);
                Some(svc)
            }
            Err(e) => {
                tracing::error!("Failed to open local store: {}", e);
                None
            }
        }
    });
    let highlights: Signal<HighlightManager> = use_signal(|| {
        services
            .peek()
            .as_ref()
            .map(AppServices::load_highlights)
            .unwrap_or_default()
    });

    use_context_provider(|| services);
    use_context_provider(|| highlights);

    rsx! {
        style { {GLOBAL_STYLES} }
        Router::<Route> {}
    }
}
