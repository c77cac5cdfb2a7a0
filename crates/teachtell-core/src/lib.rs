//! Teach & Tell Core Library
//!
//! Client-side logic shared by the desktop app and the CLI.
//!
//! ## Overview
//!
//! Teach & Tell is a two-mode language learning application:
//!
//! - **Teach**: a self-paced weekly course of readings and missions
//! - **Tell**: a chat-driven detective mystery played against the backend
//! - **Portal**: the login gate exchanging a participant code for a session
//!
//! Everything that talks to the backend, persists local state, or shapes
//! content for display lives here. The UI crates only render.
//!
//! ## Quick Start
//!
//! ```ignore
//! use teachtell_core::{ApiClient, SessionManager, Storage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let storage = Storage::new("~/.teachtell/store.redb")?;
//!     let api = ApiClient::new("http://localhost:8000")?;
//!     let auth = SessionManager::new(api, storage);
//!
//!     let session = auth.login("abc123").await?;
//!     println!("Signed in as {}", session.participant_code);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod content;
pub mod error;
pub mod explain;
pub mod game;
pub mod highlight;
pub mod markdown;
pub mod portal;
pub mod progress;
pub mod storage;
pub mod unlock;

// Re-exports
pub use api::{ApiClient, ApiResponse};
pub use auth::{normalize_code, Session, SessionManager};
pub use config::ClientConfig;
pub use content::{CourseSettings, Section, SectionCategory, SectionKind, Week, WeekMeta};
pub use error::{ClientError, ClientResult};
pub use explain::{Explanation, Explainer};
pub use game::{
    ChatLog, ClueDetail, Displayed, DisplayMessage, GameMessage, GameSession, MessageButton,
};
pub use highlight::{HighlightManager, HighlightOutcome, Segment};
pub use portal::Mode;
pub use progress::{Progress, ProgressEvent, TeachProgress};
pub use storage::Storage;
pub use unlock::{StepSequencer, WeekStep};
