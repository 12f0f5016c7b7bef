//! Sync history: the only state carried from one run to the next.

use super::{SourceDelta, SourceTask, SourceTaskId, SyncCursor, TargetTask, TargetTaskId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Last synchronized pairing of a Todoist task and its Habitica counterpart.
///
/// A record whose target has no identifier has never been created on
/// Habitica. Once assigned, the identifier does not change.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// Todoist task as last seen.
    #[serde(default, alias = "todoist", skip_serializing_if = "Option::is_none")]
    pub last_known_source_task: Option<SourceTask>,
    /// Habitica task as last written.
    #[serde(default, alias = "habitrpg", skip_serializing_if = "Option::is_none")]
    pub last_known_target_task: Option<TargetTask>,
}

impl HistoryRecord {
    /// Creates a record for a source task not yet written to Habitica.
    #[must_use]
    pub const fn unsynced(source: SourceTask) -> Self {
        Self {
            last_known_source_task: Some(source),
            last_known_target_task: None,
        }
    }

    /// Creates a record pairing a source task with its written target.
    #[must_use]
    pub const fn synced(source: SourceTask, target: TargetTask) -> Self {
        Self {
            last_known_source_task: Some(source),
            last_known_target_task: Some(target),
        }
    }

    /// Returns the Habitica identifier once the task has been created.
    #[must_use]
    pub fn target_id(&self) -> Option<&TargetTaskId> {
        self.last_known_target_task
            .as_ref()
            .and_then(|target| target.id.as_ref())
    }
}

/// A Habitica task to delete because its source was deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion {
    /// Deleted Todoist task.
    pub source_id: SourceTaskId,
    /// Habitica task to remove; `None` when it was never created.
    pub target_id: Option<TargetTaskId>,
}

/// Cursor plus history records keyed by Todoist task id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncHistory {
    /// Todoist sync token from the last successful run.
    #[serde(default, alias = "sync_token", skip_serializing_if = "Option::is_none")]
    pub sync_cursor: Option<SyncCursor>,
    /// Records keyed by source task id.
    #[serde(default)]
    pub tasks: HashMap<SourceTaskId, HistoryRecord>,
}

impl SyncHistory {
    /// Creates an empty history, as used on the very first run.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of tracked tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when no task is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the record for a source task.
    #[must_use]
    pub fn get(&self, id: &SourceTaskId) -> Option<&HistoryRecord> {
        self.tasks.get(id)
    }

    /// Folds a Todoist delta into the history.
    ///
    /// Live items replace the stored source snapshot (keeping the target
    /// snapshot) or start a new unsynced record. Deleted items drop their
    /// record and are returned so the caller can remove the Habitica task;
    /// items deleted before ever being tracked are ignored.
    pub fn merge_delta(&mut self, delta: SourceDelta) -> Vec<PendingDeletion> {
        self.sync_cursor = Some(delta.cursor);
        let mut deletions = Vec::new();
        for item in delta.items {
            if item.is_deleted {
                if let Some(record) = self.tasks.remove(&item.id) {
                    deletions.push(PendingDeletion {
                        target_id: record.target_id().cloned(),
                        source_id: item.id,
                    });
                }
                continue;
            }
            match self.tasks.entry(item.id.clone()) {
                Entry::Occupied(mut slot) => slot.get_mut().last_known_source_task = Some(item),
                Entry::Vacant(slot) => {
                    slot.insert(HistoryRecord::unsynced(item));
                }
            }
        }
        deletions
    }
}
