//! Teach progress: task completion, notes and the current week.
//!
//! State is persisted to [`Storage`] as one JSON document after every change,
//! and each persist is announced to subscribers as a [`ProgressEvent`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::content::Week;
use crate::error::ClientResult;
use crate::storage::{Storage, TEACH_PROGRESS_KEY};

/// Default capacity for the progress event channel
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// The persisted progress document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    /// week id → task id → completed
    #[serde(default)]
    pub tasks: BTreeMap<String, BTreeMap<String, bool>>,
    /// week id → notes
    #[serde(default)]
    pub notes: BTreeMap<String, String>,
    #[serde(default)]
    pub current_week_id: Option<String>,
}

/// Completed vs total task counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Rounded completion percentage; 0 when there are no tasks.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// Emitted after progress is persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Updated {
        current_week_id: Option<String>,
        overall: Progress,
    },
}

/// Teach progress tracker.
#[derive(Debug, Clone)]
pub struct TeachProgress {
    storage: Storage,
    weeks: Vec<Week>,
    state: ProgressSnapshot,
    event_tx: broadcast::Sender<ProgressEvent>,
}

impl TeachProgress {
    pub fn new(storage: Storage) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            storage,
            weeks: Vec::new(),
            state: ProgressSnapshot::default(),
            event_tx,
        }
    }

    /// Load stored progress for `weeks` and persist the normalized state.
    ///
    /// The current week is the stored one, or the first week when nothing is
    /// stored. Every week gets an (empty) task map and notes entry.
    pub fn initialize(&mut self, weeks: Vec<Week>) -> ClientResult<()> {
        let stored: ProgressSnapshot = self
            .storage
            .load_progress(TEACH_PROGRESS_KEY)?
            .unwrap_or_default();

        self.weeks = weeks;
        self.state = ProgressSnapshot {
            tasks: stored.tasks,
            notes: stored.notes,
            current_week_id: stored
                .current_week_id
                .filter(|id| !id.is_empty())
                .or_else(|| self.weeks.first().map(|w| w.id.clone())),
        };

        for week in &self.weeks {
            self.state.tasks.entry(week.id.clone()).or_default();
            self.state.notes.entry(week.id.clone()).or_default();
        }

        tracing::debug!(
            weeks = self.weeks.len(),
            current_week = ?self.state.current_week_id,
            "Teach progress initialized"
        );
        self.persist()
    }

    fn persist(&self) -> ClientResult<()> {
        self.storage.save_progress(TEACH_PROGRESS_KEY, &self.state)?;
        let _ = self.event_tx.send(ProgressEvent::Updated {
            current_week_id: self.state.current_week_id.clone(),
            overall: self.overall_progress(),
        });
        Ok(())
    }

    /// Receive an event after every persisted change.
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.event_tx.subscribe()
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    pub fn week(&self, week_id: &str) -> Option<&Week> {
        self.weeks.iter().find(|w| w.id == week_id)
    }

    pub fn current_week_id(&self) -> Option<&str> {
        self.state.current_week_id.as_deref()
    }

    /// The current week, falling back to the first week.
    pub fn current_week(&self) -> Option<&Week> {
        self.current_week_id()
            .and_then(|id| self.week(id))
            .or_else(|| self.weeks.first())
    }

    /// Switch weeks. Unknown ids and the already-current week are ignored.
    pub fn set_current_week(&mut self, week_id: &str) -> ClientResult<()> {
        if self.current_week_id() == Some(week_id) {
            return Ok(());
        }
        if self.week(week_id).is_none() {
            tracing::warn!(week_id, "Unknown week id");
            return Ok(());
        }
        self.state.current_week_id = Some(week_id.to_string());
        self.persist()
    }

    pub fn toggle_task(&mut self, week_id: &str, task_id: &str, completed: bool) -> ClientResult<()> {
        self.state
            .tasks
            .entry(week_id.to_string())
            .or_default()
            .insert(task_id.to_string(), completed);
        self.persist()
    }

    pub fn is_task_completed(&self, week_id: &str, task_id: &str) -> bool {
        self.state
            .tasks
            .get(week_id)
            .and_then(|tasks| tasks.get(task_id))
            .copied()
            .unwrap_or(false)
    }

    pub fn set_notes(&mut self, week_id: &str, text: &str) -> ClientResult<()> {
        self.state.notes.insert(week_id.to_string(), text.to_string());
        self.persist()
    }

    pub fn notes(&self, week_id: &str) -> &str {
        self.state.notes.get(week_id).map(String::as_str).unwrap_or("")
    }

    /// Task counts for one week; unknown weeks count as empty.
    pub fn week_progress(&self, week_id: &str) -> Progress {
        let Some(week) = self.week(week_id) else {
            return Progress::default();
        };
        Progress {
            completed: week
                .tasks
                .iter()
                .filter(|task| self.is_task_completed(week_id, &task.id))
                .count(),
            total: week.tasks.len(),
        }
    }

    /// Task counts summed over every week.
    pub fn overall_progress(&self) -> Progress {
        self.weeks.iter().fold(Progress::default(), |acc, week| {
            let p = self.week_progress(&week.id);
            Progress {
                completed: acc.completed + p.completed,
                total: acc.total + p.total,
            }
        })
    }

    pub fn snapshot(&self) -> &ProgressSnapshot {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{parse_week_markdown, CourseSettings, WeekMeta};
    use tempfile::tempdir;

    fn week(id: &str, order: i64) -> Week {
        let meta = WeekMeta::new(id, id, &format!("{id}.md"), order);
        parse_week_markdown(
            "## Story\nOnce.\n## Grammar Task\nDo it.\n## Writing Task\nWrite it.",
            &meta,
            &CourseSettings::default(),
        )
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(Progress { completed: 0, total: 0 }.percent(), 0);
        assert_eq!(Progress { completed: 1, total: 3 }.percent(), 33);
        assert_eq!(Progress { completed: 2, total: 3 }.percent(), 67);
        assert_eq!(Progress { completed: 4, total: 4 }.percent(), 100);
    }

    #[test]
    fn test_initialize_defaults_to_first_week() {
        let dir = tempdir().unwrap();
        let storage = Storage::new(dir.path().join("store.redb")).unwrap();
        let mut progress = TeachProgress::new(storage);

        progress.initialize(vec![week("week1", 1), week("week2", 2)]).unwrap();
        assert_eq!(progress.current_week_id(), Some("week1"));
        assert_eq!(progress.snapshot().tasks.len(), 2);
        assert_eq!(progress.notes("week2"), "");
    }

    #[test]
    fn test_unknown_week_ignored() {
        let dir = tempdir().unwrap();
        let storage = Storage::new(dir.path().join("store.redb")).unwrap();
        let mut progress = TeachProgress::new(storage);
        progress.initialize(vec![week("week1", 1)]).unwrap();

        let mut events = progress.subscribe();
        progress.set_current_week("week9").unwrap();
        progress.set_current_week("week1").unwrap();
        assert_eq!(progress.current_week_id(), Some("week1"));
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_toggle_updates_progress_and_notifies() {
        let dir = tempdir().unwrap();
        let storage = Storage::new(dir.path().join("store.redb")).unwrap();
        let mut progress = TeachProgress::new(storage);
        progress.initialize(vec![week("week1", 1), week("week2", 2)]).unwrap();

        let mut events = progress.subscribe();
        let task_id = progress.week("week1").unwrap().tasks[0].id.clone();
        progress.toggle_task("week1", &task_id, true).unwrap();

        assert!(progress.is_task_completed("week1", &task_id));
        assert_eq!(
            progress.week_progress("week1"),
            Progress { completed: 1, total: 2 }
        );
        assert_eq!(
            progress.overall_progress(),
            Progress { completed: 1, total: 4 }
        );
        assert_eq!(progress.week_progress("nope"), Progress::default());

        match events.try_recv().unwrap() {
            ProgressEvent::Updated { overall, .. } => assert_eq!(overall.completed, 1),
        }
    }
}
