//! In-memory Todoist stand-in with versioned deltas.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::sync::{
    domain::{SourceDelta, SourceLabel, SourceTask, SourceTaskId, SyncCursor},
    ports::{SourceService, SourceServiceError, SourceServiceResult},
};

/// Task list whose deltas are computed from per-item revision numbers.
///
/// The cursor handed out is the current revision; a delta contains every
/// item modified after the requested revision. A full sync (no cursor, or
/// `*`) lists live items only.
#[derive(Debug, Clone, Default)]
pub struct InMemorySourceService {
    state: Arc<RwLock<InMemorySourceState>>,
}

#[derive(Debug, Default)]
struct InMemorySourceState {
    revision: u64,
    items: BTreeMap<SourceTaskId, (u64, SourceTask)>,
    labels: Vec<SourceLabel>,
}

fn poisoned(err: impl ToString) -> SourceServiceError {
    SourceServiceError::transport(std::io::Error::other(err.to_string()))
}

impl InMemorySourceService {
    /// Creates an empty task list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a task, bumping the revision.
    pub fn upsert(&self, task: SourceTask) {
        if let Ok(mut state) = self.state.write() {
            state.revision += 1;
            let revision = state.revision;
            state.items.insert(task.id.clone(), (revision, task));
        }
    }

    /// Marks a task deleted, bumping the revision.
    pub fn delete(&self, id: &SourceTaskId) {
        if let Ok(mut state) = self.state.write() {
            state.revision += 1;
            let revision = state.revision;
            if let Some(entry) = state.items.get_mut(id) {
                entry.0 = revision;
                entry.1.is_deleted = true;
            }
        }
    }

    /// Replaces the label listing.
    pub fn set_labels(&self, labels: impl IntoIterator<Item = SourceLabel>) {
        if let Ok(mut state) = self.state.write() {
            state.labels = labels.into_iter().collect();
        }
    }
}

#[async_trait]
impl SourceService for InMemorySourceService {
    async fn fetch_delta(&self, cursor: Option<&SyncCursor>) -> SourceServiceResult<SourceDelta> {
        let state = self.state.read().map_err(poisoned)?;
        let since = match cursor.map(SyncCursor::as_str) {
            None | Some(SyncCursor::FULL_SYNC) => None,
            Some(raw) => Some(raw.parse::<u64>().map_err(|err| {
                SourceServiceError::Decode(format!("invalid cursor '{raw}': {err}"))
            })?),
        };
        let items = state
            .items
            .values()
            .filter(|(revision, task)| since.map_or(!task.is_deleted, |since| *revision > since))
            .map(|(_, task)| task.clone())
            .collect();
        Ok(SourceDelta {
            cursor: SyncCursor::new(state.revision.to_string()),
            items,
        })
    }

    async fn fetch_labels(&self) -> SourceServiceResult<Vec<SourceLabel>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.labels.clone())
    }
}
