//! Translation of a Todoist task into the Habitica write that mirrors it.

use crate::sync::domain::{
    AttributeTable, CompletionStamp, RecurrenceSchedule, ScoreDirection, SourceTask, TargetTask,
    TargetTaskId, TargetTaskPayload, TaskType, parse_due_date, parse_recurrence, priority_weight,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::warn;

/// The Habitica calls needed to mirror one source task.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskWrite {
    /// The task has never been created on Habitica.
    Create {
        /// Creation body.
        payload: TargetTaskPayload,
    },
    /// The task exists; optionally score it, then update its fields.
    Update {
        /// Habitica task to modify.
        target_id: TargetTaskId,
        /// Score call to issue before the field update.
        score: Option<ScoreDirection>,
        /// Field update body.
        payload: TargetTaskPayload,
    },
}

impl TaskWrite {
    /// Returns the create or update body.
    #[must_use]
    pub const fn payload(&self) -> &TargetTaskPayload {
        match self {
            Self::Create { payload } | Self::Update { payload, .. } => payload,
        }
    }
}

/// Builds Habitica writes from source tasks and their last synced targets.
pub struct TaskTranslator<'a, C: Clock> {
    attributes: &'a AttributeTable,
    clock: &'a C,
}

impl<'a, C: Clock> TaskTranslator<'a, C> {
    /// Creates a translator using this run's attribute table.
    #[must_use]
    pub const fn new(attributes: &'a AttributeTable, clock: &'a C) -> Self {
        Self { attributes, clock }
    }

    /// Translates `source` given the target it was last synced to.
    ///
    /// Without a previous target id the result is a create. For an existing
    /// to-do whose completion toggled, a score call precedes the update and
    /// `dateCompleted` is stamped or cleared. For an existing daily whose due
    /// date moved later, the instance was ticked off in Todoist: the daily is
    /// scored up and sent as completed.
    #[must_use]
    pub fn translate(&self, source: &SourceTask, previous: Option<&TargetTask>) -> TaskWrite {
        let mut payload = self.base_payload(source);
        let Some((target_id, prior)) =
            previous.and_then(|target| target.id.clone().map(|id| (id, target)))
        else {
            if payload.task_type == TaskType::Todo && payload.completed {
                payload.date_completed = Some(CompletionStamp::Stamped(self.clock.utc()));
            }
            return TaskWrite::Create { payload };
        };

        let score = match payload.task_type {
            TaskType::Todo => self.todo_completion(&mut payload, prior),
            TaskType::Daily => daily_completion(&mut payload, prior),
        };
        TaskWrite::Update {
            target_id,
            score,
            payload,
        }
    }

    fn base_payload(&self, source: &SourceTask) -> TargetTaskPayload {
        let recurrence = parse_recurrence(source.due.as_ref());
        if recurrence.schedule == RecurrenceSchedule::Unclassified {
            let phrase = source
                .due
                .as_ref()
                .and_then(|due| due.string.as_deref())
                .unwrap_or_default();
            warn!(
                task = %source.id,
                phrase,
                "recurring task has no weekly schedule; syncing as todo"
            );
        }
        let attribute = if source.labels.is_empty() {
            None
        } else {
            self.attributes.classify(&source.labels)
        };

        TargetTaskPayload {
            text: source.content.clone(),
            task_type: recurrence.task_type,
            date_created: source.date_added,
            date: due_date(source),
            repeat: recurrence.schedule,
            completed: source.checked,
            date_completed: None,
            attribute,
            priority: priority_weight(source.priority),
        }
    }

    fn todo_completion(
        &self,
        payload: &mut TargetTaskPayload,
        previous: &TargetTask,
    ) -> Option<ScoreDirection> {
        let toggled = previous
            .completed
            .map_or(payload.completed, |was| was != payload.completed);
        if !toggled {
            return None;
        }
        payload.date_completed = Some(if payload.completed {
            CompletionStamp::Stamped(self.clock.utc())
        } else {
            CompletionStamp::Cleared
        });
        Some(ScoreDirection::from_completed(payload.completed))
    }
}

fn daily_completion(
    payload: &mut TargetTaskPayload,
    previous: &TargetTask,
) -> Option<ScoreDirection> {
    if advanced(payload.date, previous.date) {
        payload.completed = true;
        return Some(ScoreDirection::Up);
    }
    if previous.completed == Some(true) {
        payload.completed = true;
    }
    None
}

fn advanced(current: Option<DateTime<Utc>>, previous: Option<DateTime<Utc>>) -> bool {
    matches!((current, previous), (Some(now_due), Some(last_due)) if now_due > last_due)
}

/// Parses the source due date, logging and dropping values that do not parse.
pub(crate) fn due_date(source: &SourceTask) -> Option<DateTime<Utc>> {
    let due = source.due.as_ref()?;
    parse_due_date(&due.date)
        .inspect_err(|err| warn!(task = %source.id, error = %err, "ignoring due date"))
        .ok()
}
