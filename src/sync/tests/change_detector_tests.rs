//! Tests for change detection between history snapshots.

use crate::sync::{
    domain::{DueInfo, HistoryRecord, LabelId, SourceTask, SourceTaskId, SyncHistory},
    services::{detect_changes, labels_differ, needs_update},
};
use rstest::rstest;

fn base() -> SourceTask {
    SourceTask::new("1", "Write report")
        .with_due(DueInfo::on("2024-03-15"))
        .with_labels([LabelId::new("a"), LabelId::new("b")])
}

fn labels(raw: &[&str]) -> Vec<LabelId> {
    raw.iter().copied().map(LabelId::new).collect()
}

fn history_of(tasks: impl IntoIterator<Item = SourceTask>) -> SyncHistory {
    let mut history = SyncHistory::empty();
    for task in tasks {
        history
            .tasks
            .insert(task.id.clone(), HistoryRecord::unsynced(task));
    }
    history
}

#[test]
fn identical_snapshots_need_no_update() {
    assert!(!needs_update(Some(&base()), &base()));
}

#[test]
fn unknown_tasks_need_update() {
    assert!(needs_update(None, &base()));
}

#[rstest]
#[case(base().with_checked(true))]
#[case({ let mut task = base(); task.content = "Write summary".to_owned(); task })]
#[case(base().with_due(DueInfo::on("2024-03-16")))]
#[case(base().with_due(DueInfo::on("2024-03-15T10:00:00")))]
#[case(base().with_due(DueInfo::recurring("2024-03-15", "every day")))]
#[case({ let mut task = base(); task.due = None; task })]
#[case(base().deleted())]
#[case(base().with_labels(labels(&["a"])))]
#[case(base().with_labels(labels(&["b", "a"])))]
fn mirrored_field_changes_need_update(#[case] changed: SourceTask) {
    assert!(needs_update(Some(&base()), &changed));
}

#[rstest]
#[case(base().with_priority(4))]
#[case(base().with_date_added(chrono::Utc::now()))]
fn unmirrored_field_changes_are_ignored(#[case] changed: SourceTask) {
    assert!(!needs_update(Some(&base()), &changed));
}

#[test]
fn label_comparison_is_positional() {
    assert!(!labels_differ(&labels(&["a", "b"]), &labels(&["a", "b"])));
    assert!(labels_differ(&labels(&["a", "b"]), &labels(&["b", "a"])));
    assert!(labels_differ(&labels(&["a"]), &labels(&["a", "b"])));
    assert!(!labels_differ(&[], &[]));
}

#[test]
fn detect_changes_compares_by_value_and_orders_by_id() {
    let baseline = history_of([base(), SourceTask::new("2", "Call mom")]);
    let mut current = history_of([base(), SourceTask::new("2", "Call mom")]);
    current.tasks.insert(
        SourceTaskId::new("0"),
        HistoryRecord::unsynced(SourceTask::new("0", "New")),
    );
    current.tasks.insert(
        SourceTaskId::new("2"),
        HistoryRecord::unsynced(SourceTask::new("2", "Call mom").with_checked(true)),
    );

    let changed: Vec<String> = detect_changes(&current, &baseline)
        .into_iter()
        .filter_map(|record| record.last_known_source_task.map(|task| task.id.to_string()))
        .collect();

    assert_eq!(changed, vec!["0".to_owned(), "2".to_owned()]);
}

#[test]
fn baseline_records_without_source_snapshot_count_as_new() {
    let mut baseline = SyncHistory::empty();
    baseline
        .tasks
        .insert(SourceTaskId::new("1"), HistoryRecord::default());
    let current = history_of([base()]);

    assert_eq!(detect_changes(&current, &baseline).len(), 1);
}

#[test]
fn records_without_source_snapshot_are_skipped() {
    let mut current = SyncHistory::empty();
    current
        .tasks
        .insert(SourceTaskId::new("1"), HistoryRecord::default());

    assert!(detect_changes(&current, &SyncHistory::empty()).is_empty());
}
