//! HTTP access to the Teach & Tell backend.
//!
//! [`ApiClient`] wraps `reqwest` with the conventions the backend expects
//! (bearer tokens, JSON bodies, lenient JSON responses). [`types`] holds the
//! request/response payloads of each endpoint.

mod client;
pub mod types;

pub use client::{normalize_path, ApiClient, ApiResponse};

/// Backend endpoint paths.
pub mod endpoints {
    pub const LOGIN: &str = "/api/auth/login";
    pub const SESSION: &str = "/api/auth/session";
    pub const GAME_START: &str = "/api/game/start";
    pub const GAME_ACTION: &str = "/api/game/action";
    pub const GAME_MESSAGE: &str = "/api/game/message";
    pub const GAME_EXPLAIN: &str = "/api/game/explain";
    pub const IMAGES: &str = "/api/images";
}
