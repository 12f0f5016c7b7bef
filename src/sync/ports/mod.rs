//! Port contracts for task reconciliation.
//!
//! Ports define the infrastructure-agnostic interfaces the sync services use
//! to reach Todoist, Habitica and the history file.

pub mod history;
pub mod source;
pub mod target;

pub use history::{HistoryStore, HistoryStoreError, HistoryStoreResult};
pub use source::{SourceService, SourceServiceError, SourceServiceResult};
pub use target::{TargetService, TargetServiceError, TargetServiceResult};
