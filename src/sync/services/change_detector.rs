//! Detection of history records that need a Habitica write.

use crate::sync::domain::{HistoryRecord, LabelId, SourceTask, SyncHistory};

/// Returns the records of `current` whose source task differs from
/// `baseline` in a field that is mirrored to Habitica.
///
/// Records without a source snapshot are skipped. The result is ordered by
/// source id so the write order is stable between runs.
#[must_use]
pub fn detect_changes(current: &SyncHistory, baseline: &SyncHistory) -> Vec<HistoryRecord> {
    let mut changed: Vec<HistoryRecord> = current
        .tasks
        .iter()
        .filter_map(|(id, record)| {
            let source = record.last_known_source_task.as_ref()?;
            let previous = baseline
                .get(id)
                .and_then(|old| old.last_known_source_task.as_ref());
            needs_update(previous, source).then(|| record.clone())
        })
        .collect();
    changed.sort_by(|left, right| source_key(left).cmp(&source_key(right)));
    changed
}

fn source_key(record: &HistoryRecord) -> Option<&str> {
    record
        .last_known_source_task
        .as_ref()
        .map(|source| source.id.as_str())
}

/// Returns `true` when `current` must be written given the previously
/// synced snapshot.
#[must_use]
pub fn needs_update(previous: Option<&SourceTask>, current: &SourceTask) -> bool {
    let Some(synced) = previous else {
        return true;
    };
    synced.content != current.content
        || synced.checked != current.checked
        || synced.due != current.due
        || synced.is_deleted != current.is_deleted
        || labels_differ(&synced.labels, &current.labels)
}

/// Compares label sequences by length, then position by position.
///
/// Reordering identical labels counts as a change.
#[must_use]
pub fn labels_differ(previous: &[LabelId], current: &[LabelId]) -> bool {
    previous.len() != current.len() || previous.iter().zip(current).any(|(old, new)| old != new)
}
