//! Application services for task reconciliation.

mod change_detector;
mod orchestrator;
mod queue;
mod translator;

pub use change_detector::{detect_changes, labels_differ, needs_update};
pub use orchestrator::{SyncContext, SyncError, SyncOrchestrator, SyncReport, SyncResult};
pub use queue::{SerialWriteQueue, WriteJob};
pub use translator::{TaskTranslator, TaskWrite};
