//! Todoist client: sync API for task deltas, REST API for labels.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::sync::{
    domain::{SourceDelta, SourceLabel, SourceTask, SyncCursor},
    ports::{SourceService, SourceServiceError, SourceServiceResult},
};

/// Default Todoist API root.
pub const DEFAULT_TODOIST_URL: &str = "https://api.todoist.com";

#[derive(Deserialize)]
struct SyncResponse {
    sync_token: SyncCursor,
    #[serde(default)]
    items: Vec<SourceTask>,
}

/// Todoist account client.
#[derive(Debug, Clone)]
pub struct TodoistClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl TodoistClient {
    /// Creates a client against the public API.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, DEFAULT_TODOIST_URL)
    }

    /// Creates a client against a custom API root.
    #[must_use]
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            token: token.into(),
        }
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> SourceServiceResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(SourceServiceError::transport)?;
        if !status.is_success() {
            return Err(SourceServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|err| SourceServiceError::Decode(err.to_string()))
    }
}

#[async_trait]
impl SourceService for TodoistClient {
    async fn fetch_delta(&self, cursor: Option<&SyncCursor>) -> SourceServiceResult<SourceDelta> {
        let sync_token = cursor.map_or(SyncCursor::FULL_SYNC, SyncCursor::as_str);
        debug!(sync_token, "fetching todoist delta");
        let response = self
            .client
            .get(format!("{}/sync/v8/sync", self.base_url))
            .query(&[
                ("token", self.token.as_str()),
                ("sync_token", sync_token),
                ("resource_types", r#"["all"]"#),
            ])
            .send()
            .await
            .map_err(SourceServiceError::transport)?;
        let sync: SyncResponse = Self::decode(response).await?;
        Ok(SourceDelta {
            cursor: sync.sync_token,
            items: sync.items,
        })
    }

    async fn fetch_labels(&self) -> SourceServiceResult<Vec<SourceLabel>> {
        let response = self
            .client
            .get(format!("{}/rest/v1/labels", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(SourceServiceError::transport)?;
        Self::decode(response).await
    }
}
