//! In-memory history store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::sync::{
    domain::SyncHistory,
    ports::{HistoryStore, HistoryStoreError, HistoryStoreResult},
};

/// Thread-safe history store holding at most one saved history.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryStore {
    state: Arc<RwLock<InMemoryHistoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryHistoryState {
    saved: Option<SyncHistory>,
    saves: usize,
}

fn poisoned(err: impl ToString) -> HistoryStoreError {
    HistoryStoreError::from(std::io::Error::other(err.to_string()))
}

impl InMemoryHistoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `history`.
    #[must_use]
    pub fn with_history(history: SyncHistory) -> Self {
        let store = Self::new();
        if let Ok(mut state) = store.state.write() {
            state.saved = Some(history);
        }
        store
    }

    /// Returns the stored history, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<SyncHistory> {
        self.state.read().ok().and_then(|state| state.saved.clone())
    }

    /// Number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.state.read().map(|state| state.saves).unwrap_or_default()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn load(&self) -> HistoryStoreResult<SyncHistory> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.saved.clone().unwrap_or_default())
    }

    async fn save(&self, history: &SyncHistory) -> HistoryStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.saved = Some(history.clone());
        state.saves += 1;
        Ok(())
    }
}
