//! In-memory adapters used by tests and behaviour scenarios.

mod history;
mod source;
mod target;

pub use history::InMemoryHistoryStore;
pub use source::InMemorySourceService;
pub use target::{InMemoryTargetService, TargetCall};
