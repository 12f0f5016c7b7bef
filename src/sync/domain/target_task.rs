//! Habitica task snapshots and the payloads sent to create or update them.

use super::lenient::optional_timestamp;
use super::{Attribute, RecurrenceSchedule, TargetTaskId, WeeklyMask};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Habitica task kind produced by the translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// One-off to-do.
    #[default]
    Todo,
    /// Weekly repeating daily.
    Daily,
}

impl TaskType {
    /// Returns the Habitica wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Daily => "daily",
        }
    }
}

/// Direction of a Habitica score call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreDirection {
    /// Marks the task done.
    Up,
    /// Reverts a completion.
    Down,
}

impl ScoreDirection {
    /// Maps the new completion flag to a score direction.
    #[must_use]
    pub const fn from_completed(completed: bool) -> Self {
        if completed { Self::Up } else { Self::Down }
    }

    /// Returns the path segment Habitica expects.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// Change to `dateCompleted` carried by a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionStamp {
    /// The task was completed at this instant.
    Stamped(DateTime<Utc>),
    /// A previous completion was reverted; Habitica expects an empty string.
    Cleared,
}

impl Serialize for CompletionStamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Stamped(at) => at.serialize(serializer),
            Self::Cleared => serializer.serialize_str(""),
        }
    }
}

/// Last known state of a Habitica task.
///
/// `completed` stays `None` until Habitica reports it, which the translator
/// treats differently from an explicit `false`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetTask {
    /// Identifier assigned by Habitica; absent until the task is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TargetTaskId>,
    /// Task text.
    #[serde(default)]
    pub text: String,
    /// Task kind.
    #[serde(rename = "type", default)]
    pub task_type: TaskType,
    /// Due date (to-dos) or last synced instance date (dailies).
    #[serde(
        default,
        deserialize_with = "optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateTime<Utc>>,
    /// Weekly schedule of a daily.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<WeeklyMask>,
    /// Completion flag as last reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    /// When a to-do was completed.
    #[serde(
        default,
        deserialize_with = "optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_completed: Option<DateTime<Utc>>,
    /// Skill attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<Attribute>,
    /// Difficulty weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
}

impl TargetTask {
    /// Builds the snapshot a freshly written payload describes.
    #[must_use]
    pub fn from_payload(id: TargetTaskId, payload: &TargetTaskPayload) -> Self {
        let date_completed = match payload.date_completed {
            Some(CompletionStamp::Stamped(at)) => Some(at),
            Some(CompletionStamp::Cleared) | None => None,
        };
        Self {
            id: Some(id),
            text: payload.text.clone(),
            task_type: payload.task_type,
            date: payload.date,
            repeat: payload.repeat.weekly_mask().copied(),
            completed: Some(payload.completed),
            date_completed,
            attribute: payload.attribute,
            priority: Some(payload.priority),
        }
    }
}

/// Body of a Habitica create or update call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetTaskPayload {
    /// Task text.
    pub text: String,
    /// Task kind.
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// Creation time carried over from Todoist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    /// Parsed due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// Weekly schedule; only a structured schedule is sent.
    #[serde(skip_serializing_if = "RecurrenceSchedule::is_unstructured")]
    pub repeat: RecurrenceSchedule,
    /// Completion flag.
    pub completed: bool,
    /// Completion stamp change, when completion toggled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_completed: Option<CompletionStamp>,
    /// Skill attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<Attribute>,
    /// Difficulty weight.
    pub priority: f64,
}
