//! Domain model for task reconciliation.
//!
//! Source tasks, their Habitica counterparts, and the sync history that pairs
//! them live here, together with the pure parsers (recurrence phrases, due
//! dates, priorities, attribute labels) the translator is built from. No type
//! in this module performs I/O.

mod attribute;
mod due_date;
mod error;
mod history;
mod ids;
mod lenient;
mod priority;
mod recurrence;
mod source_task;
mod target_task;

pub use attribute::{Attribute, AttributeTable};
pub use due_date::parse_due_date;
pub use error::DueDateError;
pub use history::{HistoryRecord, PendingDeletion, SyncHistory};
pub use ids::{LabelId, SourceTaskId, SyncCursor, TargetTaskId};
pub use priority::priority_weight;
pub use recurrence::{Recurrence, RecurrenceSchedule, WeeklyMask, parse_recurrence};
pub use source_task::{DueInfo, SourceDelta, SourceLabel, SourceTask};
pub use target_task::{CompletionStamp, ScoreDirection, TargetTask, TargetTaskPayload, TaskType};
