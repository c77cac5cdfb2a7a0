//! Persistent local storage using redb.
//!
//! Plays the role browser local storage plays for a web client:
//! - Session token and participant code
//! - Teach progress (task completion, notes, current week)
//! - Word highlights keyed by message id
//! - One-shot flags such as tutorial completion

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use redb::{Database, ReadableTable, TableDefinition};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;

// Table definitions
const SESSION_TABLE: TableDefinition<&str, &str> = TableDefinition::new("session");
const PROGRESS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("progress");
const HIGHLIGHTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("highlights");
const FLAGS_TABLE: TableDefinition<&str, i64> = TableDefinition::new("flags");

const TOKEN_KEY: &str = "sessionToken";
const PARTICIPANT_CODE_KEY: &str = "participantCode";

/// Key under which Teach progress is stored.
pub const TEACH_PROGRESS_KEY: &str = "teach_mode_progress_v1";

/// Storage layer using redb for ACID-compliant persistence
#[derive(Clone)]
pub struct Storage {
    db: Arc<RwLock<Database>>,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

impl Storage {
    /// Create a new storage instance at the given path.
    ///
    /// Creates the parent directory and all tables if they don't exist.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SESSION_TABLE)?;
            let _ = write_txn.open_table(PROGRESS_TABLE)?;
            let _ = write_txn.open_table(HIGHLIGHTS_TABLE)?;
            let _ = write_txn.open_table(FLAGS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(RwLock::new(db)),
        })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Session
    // ═══════════════════════════════════════════════════════════════════════

    fn session_value(&self, key: &str) -> Result<Option<String>, ClientError> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(SESSION_TABLE)?;
        let value = table
            .get(key)?
            .map(|v| v.value().to_string())
            .filter(|v| !v.is_empty());
        Ok(value)
    }

    /// Write a session value. Empty values remove the key.
    fn set_session_value(&self, key: &str, value: Option<&str>) -> Result<(), ClientError> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(SESSION_TABLE)?;
            match value.filter(|v| !v.is_empty()) {
                Some(v) => {
                    table.insert(key, v)?;
                }
                None => {
                    table.remove(key)?;
                }
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    /// The stored bearer token, if any.
    pub fn session_token(&self) -> Result<Option<String>, ClientError> {
        self.session_value(TOKEN_KEY)
    }

    /// The stored participant code, if any.
    pub fn participant_code(&self) -> Result<Option<String>, ClientError> {
        self.session_value(PARTICIPANT_CODE_KEY)
    }

    /// Persist a session. Blank values leave the existing entry untouched.
    pub fn save_session(&self, token: &str, participant_code: &str) -> Result<(), ClientError> {
        if !token.is_empty() {
            self.set_session_value(TOKEN_KEY, Some(token))?;
        }
        if !participant_code.is_empty() {
            self.set_session_value(PARTICIPANT_CODE_KEY, Some(participant_code))?;
        }
        Ok(())
    }

    /// Store only the participant code (e.g. entered before any login).
    pub fn set_participant_code(&self, participant_code: &str) -> Result<(), ClientError> {
        self.set_session_value(PARTICIPANT_CODE_KEY, Some(participant_code))
    }

    /// Remove token and participant code.
    pub fn clear_session(&self) -> Result<(), ClientError> {
        self.set_session_value(TOKEN_KEY, None)?;
        self.set_session_value(PARTICIPANT_CODE_KEY, None)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Progress
    // ═══════════════════════════════════════════════════════════════════════

    /// Load a JSON progress document stored under `key`.
    ///
    /// Unreadable documents are treated as absent.
    pub fn load_progress<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ClientError> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(PROGRESS_TABLE)?;

        match table.get(key)? {
            Some(v) => match serde_json::from_slice(v.value()) {
                Ok(parsed) => Ok(Some(parsed)),
                Err(e) => {
                    tracing::warn!(key, error = %e, "Stored progress is unreadable, ignoring");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Save a JSON progress document under `key`.
    pub fn save_progress<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ClientError> {
        let data = serde_json::to_vec(value)?;
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(PROGRESS_TABLE)?;
            table.insert(key, data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Highlights
    // ═══════════════════════════════════════════════════════════════════════

    /// Load every message's highlighted phrases.
    pub fn load_highlights(&self) -> Result<BTreeMap<String, BTreeSet<String>>, ClientError> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(HIGHLIGHTS_TABLE)?;

        let mut highlights = BTreeMap::new();
        for entry in table.iter()? {
            let (key, value) = entry?;
            match serde_json::from_slice::<BTreeSet<String>>(value.value()) {
                Ok(words) => {
                    highlights.insert(key.value().to_string(), words);
                }
                Err(e) => {
                    tracing::warn!(message_id = key.value(), error = %e, "Skipping unreadable highlights");
                }
            }
        }
        Ok(highlights)
    }

    /// Replace the highlights of one message. An empty set removes the entry.
    pub fn save_highlights(
        &self,
        message_id: &str,
        words: &BTreeSet<String>,
    ) -> Result<(), ClientError> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(HIGHLIGHTS_TABLE)?;
            if words.is_empty() {
                table.remove(message_id)?;
            } else {
                let data = serde_json::to_vec(words)?;
                table.insert(message_id, data.as_slice())?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Flags
    // ═══════════════════════════════════════════════════════════════════════

    /// Set a flag, recording when it was set.
    pub fn set_flag(&self, name: &str) -> Result<(), ClientError> {
        let now = chrono::Utc::now().timestamp();
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(FLAGS_TABLE)?;
            table.insert(name, now)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Whether a flag has been set.
    pub fn flag(&self, name: &str) -> Result<bool, ClientError> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(FLAGS_TABLE)?;
        Ok(table.get(name)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn temp_storage() -> (tempfile::TempDir, Storage) {
        let dir = tempdir().unwrap();
        let storage = Storage::new(dir.path().join("store.redb")).unwrap();
        (dir, storage)
    }

    #[test]
    fn test_session_roundtrip() {
        let (_dir, storage) = temp_storage();

        assert_eq!(storage.session_token().unwrap(), None);
        storage.save_session("tok-1", "ABC123").unwrap();
        assert_eq!(storage.session_token().unwrap().as_deref(), Some("tok-1"));
        assert_eq!(storage.participant_code().unwrap().as_deref(), Some("ABC123"));

        storage.clear_session().unwrap();
        assert_eq!(storage.session_token().unwrap(), None);
        assert_eq!(storage.participant_code().unwrap(), None);
    }

    #[test]
    fn test_blank_values_keep_existing() {
        let (_dir, storage) = temp_storage();

        storage.save_session("tok-1", "ABC123").unwrap();
        storage.save_session("", "XYZ").unwrap();
        assert_eq!(storage.session_token().unwrap().as_deref(), Some("tok-1"));
        assert_eq!(storage.participant_code().unwrap().as_deref(), Some("XYZ"));
    }

    #[test]
    fn test_highlights_empty_set_removes() {
        let (_dir, storage) = temp_storage();

        let words: BTreeSet<String> = ["clue".to_string()].into_iter().collect();
        storage.save_highlights("msg_1", &words).unwrap();
        assert_eq!(storage.load_highlights().unwrap().len(), 1);

        storage.save_highlights("msg_1", &BTreeSet::new()).unwrap();
        assert!(storage.load_highlights().unwrap().is_empty());
    }

    #[test]
    fn test_flags() {
        let (_dir, storage) = temp_storage();

        assert!(!storage.flag("tutorial_completed_ABC").unwrap());
        storage.set_flag("tutorial_completed_ABC").unwrap();
        assert!(storage.flag("tutorial_completed_ABC").unwrap());
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("store.redb");

        {
            let storage = Storage::new(&path).unwrap();
            storage.save_session("tok", "CODE").unwrap();
        }

        let storage = Storage::new(&path).unwrap();
        assert_eq!(storage.session_token().unwrap().as_deref(), Some("tok"));
    }
}
