//! Port for the mirrored task service (Habitica).
//!
//! Habitica rejects concurrent mutations on one account, so callers must
//! issue these calls one at a time; see
//! [`SerialWriteQueue`](crate::sync::services::SerialWriteQueue).

use crate::sync::domain::{ScoreDirection, TargetTask, TargetTaskId, TargetTaskPayload};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for target service calls.
pub type TargetServiceResult<T> = Result<T, TargetServiceError>;

/// Mutating access to the target task list.
#[async_trait]
pub trait TargetService: Send + Sync {
    /// Creates a task and returns it as stored, identifier included.
    ///
    /// # Errors
    ///
    /// Returns [`TargetServiceError`] when the call fails or returns no task.
    async fn create_task(&self, payload: &TargetTaskPayload) -> TargetServiceResult<TargetTask>;

    /// Replaces the editable fields of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TargetServiceError`] when the call fails or returns no task.
    async fn update_task(
        &self,
        id: &TargetTaskId,
        payload: &TargetTaskPayload,
    ) -> TargetServiceResult<TargetTask>;

    /// Scores a task up (completion) or down (reverted completion).
    ///
    /// # Errors
    ///
    /// Returns [`TargetServiceError`] when the call fails.
    async fn update_task_score(
        &self,
        id: &TargetTaskId,
        direction: ScoreDirection,
    ) -> TargetServiceResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TargetServiceError`] when the call fails.
    async fn delete_task(&self, id: &TargetTaskId) -> TargetServiceResult<()>;
}

/// Errors returned by target service implementations.
#[derive(Debug, Clone, Error)]
pub enum TargetServiceError {
    /// The request never produced a response.
    #[error("target transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The service answered with a non-success status.
    #[error("target service returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response carried no usable task.
    #[error("unexpected target response: {0}")]
    UnexpectedResponse(String),
}

impl TargetServiceError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
