//! Tests for domain parsing helpers and wire formats.

use crate::sync::domain::{
    CompletionStamp, DueInfo, RecurrenceSchedule, SourceTask, TargetTask, TargetTaskId,
    TargetTaskPayload, TaskType, WeeklyMask, parse_due_date, priority_weight,
};
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(0, 0.0)]
#[case(1, 0.0)]
#[case(2, 0.1)]
#[case(3, 1.0)]
#[case(4, 1.5)]
#[case(5, 2.0)]
#[case(6, 0.0)]
fn priorities_map_to_weights(#[case] priority: u8, #[case] expected: f64) {
    assert!((priority_weight(priority) - expected).abs() < f64::EPSILON);
}

#[test]
fn utc_due_dates_are_taken_verbatim() {
    let parsed = parse_due_date("2024-03-15T09:30:00Z").expect("utc date should parse");
    assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap());
}

#[test]
fn floating_dates_are_read_in_utc_minus_five() {
    let parsed = parse_due_date("2024-03-15").expect("date should parse");
    assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 15, 5, 0, 0).unwrap());

    let parsed = parse_due_date("2024-03-15T20:00:00").expect("date-time should parse");
    assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 16, 1, 0, 0).unwrap());
}

#[test]
fn garbage_due_dates_are_rejected() {
    assert!(parse_due_date("next tuesday").is_err());
}

#[test]
fn source_tasks_accept_numeric_ids_and_flags() {
    let task: SourceTask = serde_json::from_value(json!({
        "id": 2_995_104_339_u64,
        "content": "Buy milk",
        "due": {"date": "2024-03-15", "string": "every day", "is_recurring": true},
        "labels": [2_156_154_810_u64, "2156154811"],
        "checked": 1,
        "is_deleted": 0,
        "date_added": "2024-03-01T10:00:00Z",
        "priority": 3
    }))
    .expect("todoist item should decode");

    assert_eq!(task.id.as_str(), "2995104339");
    assert_eq!(task.labels.len(), 2);
    assert!(task.checked);
    assert!(!task.is_deleted);
    assert_eq!(task.priority, 3);
    assert_eq!(
        task.due,
        Some(DueInfo::recurring("2024-03-15", "every day"))
    );
}

#[test]
fn source_task_defaults_fill_missing_fields() {
    let task: SourceTask =
        serde_json::from_value(json!({"id": "7", "checked": null})).expect("sparse item");
    assert_eq!(task, SourceTask::new("7", ""));
}

#[test]
fn target_tasks_decode_habitica_responses() {
    let task: TargetTask = serde_json::from_value(json!({
        "_id": "abc",
        "id": "abc",
        "text": "Stretch",
        "type": "daily",
        "date": "",
        "repeat": {"su": true, "m": true, "t": true, "w": true, "th": true, "f": true, "s": true},
        "completed": false,
        "attribute": "con",
        "priority": 1.5
    }))
    .expect("habitica task should decode");

    assert_eq!(task.id, Some(TargetTaskId::new("abc")));
    assert_eq!(task.task_type, TaskType::Daily);
    assert_eq!(task.date, None);
    assert_eq!(task.repeat, Some(WeeklyMask::EVERY_DAY));
    assert_eq!(task.completed, Some(false));
}

fn payload(repeat: RecurrenceSchedule, stamp: Option<CompletionStamp>) -> TargetTaskPayload {
    TargetTaskPayload {
        text: "Read".to_owned(),
        task_type: TaskType::Todo,
        date_created: None,
        date: None,
        repeat,
        completed: false,
        date_completed: stamp,
        attribute: None,
        priority: 1.0,
    }
}

#[test]
fn payload_omits_unstructured_repeat_and_empty_fields() {
    let value = serde_json::to_value(payload(RecurrenceSchedule::Unclassified, None))
        .expect("payload should serialize");
    assert_eq!(
        value,
        json!({"text": "Read", "type": "todo", "completed": false, "priority": 1.0})
    );
}

#[test]
fn payload_serializes_weekly_repeat_and_completion_stamps() {
    let weekly = serde_json::to_value(payload(
        RecurrenceSchedule::Weekly(WeeklyMask::EVERY_DAY),
        Some(CompletionStamp::Cleared),
    ))
    .expect("payload should serialize");
    assert_eq!(weekly["repeat"]["th"], json!(true));
    assert_eq!(weekly["dateCompleted"], json!(""));

    let at = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
    let stamped = serde_json::to_value(payload(
        RecurrenceSchedule::None,
        Some(CompletionStamp::Stamped(at)),
    ))
    .expect("payload should serialize");
    assert_eq!(stamped["dateCompleted"], json!("2024-03-15T12:00:00Z"));
}
