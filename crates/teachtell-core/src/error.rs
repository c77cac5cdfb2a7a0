//! Error types for Teach & Tell

use thiserror::Error;

/// Main error type for client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Participant code was blank after trimming
    #[error("Enter your participant code.")]
    EmptyParticipantCode,

    /// Backend rejected the login attempt
    #[error("{0}")]
    LoginFailed(String),

    /// No usable session token (and none could be obtained)
    #[error("Session token missing: {0}")]
    MissingToken(String),

    /// Explanation endpoint returned a non-success status
    #[error("Explanation failed ({status}): {detail}")]
    ExplainFailed { status: u16, detail: String },

    /// Any other backend call returned a non-success status
    #[error("Request failed ({status}): {detail}")]
    Api { status: u16, detail: String },

    /// Network or transport failure reaching the backend
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Course content could not be read or parsed
    #[error("Content error: {0}")]
    Content(String),

    /// Error during storage operations (redb)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database creation/opening error
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// Transaction error
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// Table error
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    /// Storage operation error
    #[error("Storage operation error: {0}")]
    StorageOp(#[from] redb::StorageError),

    /// Commit error
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// Error during serialization/deserialization
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Whether the error means the backend could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ClientError::Http(e) if e.is_connect() || e.is_timeout() || e.is_request())
    }

    /// Whether signing in again would fix this error.
    pub fn needs_login(&self) -> bool {
        matches!(
            self,
            ClientError::MissingToken(_)
                | ClientError::Api { status: 401, .. }
                | ClientError::ExplainFailed { status: 401, .. }
        )
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Serialization(e.to_string())
    }
}

/// Result type alias using ClientError
pub type ClientResult<T> = Result<T, ClientError>;
