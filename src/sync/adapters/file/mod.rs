//! Filesystem adapters.

mod history;

pub(crate) use history::encode;
pub use history::{FileHistoryStore, HISTORY_FILE_NAME};
