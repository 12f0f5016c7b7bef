//! Port for loading and persisting the sync history.

use crate::sync::domain::SyncHistory;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for history store operations.
pub type HistoryStoreResult<T> = Result<T, HistoryStoreError>;

/// Durable storage for [`SyncHistory`].
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Loads the stored history, or an empty one when nothing was stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryStoreError::Malformed`] when stored content cannot be
    /// parsed and [`HistoryStoreError::Io`] when it cannot be read.
    async fn load(&self) -> HistoryStoreResult<SyncHistory>;

    /// Replaces the stored history in full.
    ///
    /// Either the new history is stored completely or the previous one is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryStoreError`] when the history cannot be written.
    async fn save(&self, history: &SyncHistory) -> HistoryStoreResult<()>;
}

/// Errors returned by history store implementations.
#[derive(Debug, Clone, Error)]
pub enum HistoryStoreError {
    /// Reading or writing the underlying storage failed.
    #[error("history storage error: {0}")]
    Io(Arc<std::io::Error>),

    /// Stored history exists but is not valid.
    #[error("history file is malformed: {0}")]
    Malformed(String),
}

impl From<std::io::Error> for HistoryStoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}
