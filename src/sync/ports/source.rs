//! Port for the authoritative task service (Todoist).

use crate::sync::domain::{SourceDelta, SourceLabel, SyncCursor};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for source service calls.
pub type SourceServiceResult<T> = Result<T, SourceServiceError>;

/// Read-only access to the source task list.
#[async_trait]
pub trait SourceService: Send + Sync {
    /// Fetches every item changed since `cursor`, or a full listing when no
    /// cursor has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`SourceServiceError`] when the request fails or the response
    /// cannot be decoded.
    async fn fetch_delta(&self, cursor: Option<&SyncCursor>) -> SourceServiceResult<SourceDelta>;

    /// Lists the account's labels.
    ///
    /// # Errors
    ///
    /// Returns [`SourceServiceError`] when the request fails or the response
    /// cannot be decoded.
    async fn fetch_labels(&self) -> SourceServiceResult<Vec<SourceLabel>>;
}

/// Errors returned by source service implementations.
#[derive(Debug, Clone, Error)]
pub enum SourceServiceError {
    /// The request never produced a response.
    #[error("source transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The service answered with a non-success status.
    #[error("source service returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("source response could not be decoded: {0}")]
    Decode(String),
}

impl SourceServiceError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
