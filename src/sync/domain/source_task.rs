//! Todoist task records as delivered by the sync delta.

use super::lenient::{flexible_bool, optional_timestamp};
use super::{LabelId, SourceTaskId, SyncCursor};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Due metadata attached to a Todoist task.
///
/// Equality is structural: any difference in date, time zone, phrase or the
/// recurring flag makes two values unequal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueInfo {
    /// Raw due date or date-time, e.g. `2024-03-01` or `2024-03-01T09:00:00Z`.
    pub date: String,
    /// Natural-language phrase the user typed, e.g. `every weekday`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    /// Whether Todoist treats the task as recurring.
    #[serde(default, deserialize_with = "flexible_bool")]
    pub is_recurring: bool,
    /// Time zone of a floating due time, when Todoist supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl DueInfo {
    /// Creates due metadata for a one-off date.
    #[must_use]
    pub fn on(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            string: None,
            is_recurring: false,
            timezone: None,
        }
    }

    /// Creates recurring due metadata with the phrase that defined it.
    #[must_use]
    pub fn recurring(date: impl Into<String>, phrase: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            string: Some(phrase.into()),
            is_recurring: true,
            timezone: None,
        }
    }
}

const fn default_priority() -> u8 {
    1
}

/// A task owned by Todoist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTask {
    /// Stable Todoist identifier.
    pub id: SourceTaskId,
    /// Task text.
    #[serde(default)]
    pub content: String,
    /// Due metadata, absent for undated tasks.
    #[serde(default)]
    pub due: Option<DueInfo>,
    /// Label identifiers in the order Todoist lists them.
    #[serde(default)]
    pub labels: Vec<LabelId>,
    /// Completion flag.
    #[serde(default, deserialize_with = "flexible_bool")]
    pub checked: bool,
    /// Set when the task was deleted in Todoist.
    #[serde(default, deserialize_with = "flexible_bool")]
    pub is_deleted: bool,
    /// When the task was added in Todoist.
    #[serde(
        default,
        deserialize_with = "optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_added: Option<DateTime<Utc>>,
    /// Todoist priority, 1 (normal) to 4 (urgent).
    #[serde(default = "default_priority")]
    pub priority: u8,
}

impl SourceTask {
    /// Creates an open, undated, unlabelled task with normal priority.
    #[must_use]
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: SourceTaskId::new(id),
            content: content.into(),
            due: None,
            labels: Vec::new(),
            checked: false,
            is_deleted: false,
            date_added: None,
            priority: default_priority(),
        }
    }

    /// Sets due metadata.
    #[must_use]
    pub fn with_due(mut self, due: DueInfo) -> Self {
        self.due = Some(due);
        self
    }

    /// Sets label identifiers, preserving their order.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = LabelId>) -> Self {
        self.labels = labels.into_iter().collect();
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Sets the Todoist priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn with_date_added(mut self, date_added: DateTime<Utc>) -> Self {
        self.date_added = Some(date_added);
        self
    }

    /// Marks the task as deleted.
    #[must_use]
    pub const fn deleted(mut self) -> Self {
        self.is_deleted = true;
        self
    }
}

/// A Todoist label as listed by the labels endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLabel {
    /// Label identifier referenced by [`SourceTask::labels`].
    pub id: LabelId,
    /// Display name.
    pub name: String,
}

impl SourceLabel {
    /// Creates a label.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: LabelId::new(id),
            name: name.into(),
        }
    }
}

/// Items changed since a cursor, plus the cursor to resume from next time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDelta {
    /// Cursor to store once the run succeeds.
    pub cursor: SyncCursor,
    /// Changed items, including deleted ones.
    pub items: Vec<SourceTask>,
}
