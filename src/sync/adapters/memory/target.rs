//! In-memory Habitica stand-in that records every call.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::sync::{
    domain::{ScoreDirection, TargetTask, TargetTaskId, TargetTaskPayload},
    ports::{TargetService, TargetServiceError, TargetServiceResult},
};

/// A call received by [`InMemoryTargetService`].
#[derive(Debug, Clone, PartialEq)]
pub enum TargetCall {
    /// `create_task`.
    Create(TargetTaskPayload),
    /// `update_task`.
    Update(TargetTaskId, TargetTaskPayload),
    /// `update_task_score`.
    Score(TargetTaskId, ScoreDirection),
    /// `delete_task`.
    Delete(TargetTaskId),
}

/// Thread-safe task store assigning sequential ids and logging calls.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTargetService {
    state: Arc<RwLock<InMemoryTargetState>>,
}

#[derive(Debug, Default)]
struct InMemoryTargetState {
    next_id: u64,
    tasks: HashMap<TargetTaskId, TargetTask>,
    calls: Vec<TargetCall>,
}

fn poisoned(err: impl ToString) -> TargetServiceError {
    TargetServiceError::transport(std::io::Error::other(err.to_string()))
}

const fn not_found() -> TargetServiceError {
    TargetServiceError::Status {
        status: 404,
        body: String::new(),
    }
}

impl InMemoryTargetService {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every call received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<TargetCall> {
        self.state
            .read()
            .map(|state| state.calls.clone())
            .unwrap_or_default()
    }

    /// Forgets recorded calls, keeping stored tasks.
    pub fn clear_calls(&self) {
        if let Ok(mut state) = self.state.write() {
            state.calls.clear();
        }
    }

    /// Returns a stored task.
    #[must_use]
    pub fn task(&self, id: &TargetTaskId) -> Option<TargetTask> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.tasks.get(id).cloned())
    }

    /// Number of stored tasks.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.state
            .read()
            .map(|state| state.tasks.len())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TargetService for InMemoryTargetService {
    async fn create_task(&self, payload: &TargetTaskPayload) -> TargetServiceResult<TargetTask> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.calls.push(TargetCall::Create(payload.clone()));
        state.next_id += 1;
        let id = TargetTaskId::new(format!("task-{}", state.next_id));
        let task = TargetTask::from_payload(id.clone(), payload);
        state.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update_task(
        &self,
        id: &TargetTaskId,
        payload: &TargetTaskPayload,
    ) -> TargetServiceResult<TargetTask> {
        let mut state = self.state.write().map_err(poisoned)?;
        state
            .calls
            .push(TargetCall::Update(id.clone(), payload.clone()));
        let stored = state.tasks.get_mut(id).ok_or_else(not_found)?;
        *stored = TargetTask::from_payload(id.clone(), payload);
        Ok(stored.clone())
    }

    async fn update_task_score(
        &self,
        id: &TargetTaskId,
        direction: ScoreDirection,
    ) -> TargetServiceResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.calls.push(TargetCall::Score(id.clone(), direction));
        let stored = state.tasks.get_mut(id).ok_or_else(not_found)?;
        stored.completed = Some(direction == ScoreDirection::Up);
        Ok(())
    }

    async fn delete_task(&self, id: &TargetTaskId) -> TargetServiceResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.calls.push(TargetCall::Delete(id.clone()));
        state.tasks.remove(id).map(|_| ()).ok_or_else(not_found)
    }
}
