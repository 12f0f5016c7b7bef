//! Habitica v3 client.
//!
//! Every response is wrapped in a `{ "success": .., "data": .. }` envelope;
//! create and update calls must carry the stored task in `data`.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::Deserialize;
use tracing::debug;

use crate::sync::{
    domain::{ScoreDirection, TargetTask, TargetTaskId, TargetTaskPayload},
    ports::{TargetService, TargetServiceError, TargetServiceResult},
};

/// Default Habitica API root.
pub const DEFAULT_HABITICA_URL: &str = "https://habitica.com/api/v3";

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<TargetTask>,
}

/// Habitica account client.
#[derive(Debug, Clone)]
pub struct HabiticaClient {
    client: reqwest::Client,
    base_url: String,
    user_id: String,
    api_token: String,
}

impl HabiticaClient {
    /// Creates a client against the public API.
    #[must_use]
    pub fn new(user_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self::with_base_url(user_id, api_token, DEFAULT_HABITICA_URL)
    }

    /// Creates a client against a custom API root.
    #[must_use]
    pub fn with_base_url(
        user_id: impl Into<String>,
        api_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            user_id: user_id.into(),
            api_token: api_token.into(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.base_url))
            .header("x-api-user", &self.user_id)
            .header("x-api-key", &self.api_token)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn send(request: RequestBuilder) -> TargetServiceResult<String> {
        let response = request
            .send()
            .await
            .map_err(TargetServiceError::transport)?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(TargetServiceError::transport)?;
        if !status.is_success() {
            return Err(TargetServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn send_for_task(request: RequestBuilder) -> TargetServiceResult<TargetTask> {
        let body = Self::send(request).await?;
        let envelope: Envelope = serde_json::from_str(&body)
            .map_err(|err| TargetServiceError::UnexpectedResponse(err.to_string()))?;
        envelope.data.ok_or_else(|| {
            TargetServiceError::UnexpectedResponse(format!("no task in body: {body}"))
        })
    }
}

#[async_trait]
impl TargetService for HabiticaClient {
    async fn create_task(&self, payload: &TargetTaskPayload) -> TargetServiceResult<TargetTask> {
        debug!(text = %payload.text, "POST /tasks/user");
        Self::send_for_task(self.request(Method::POST, "/tasks/user").json(payload)).await
    }

    async fn update_task(
        &self,
        id: &TargetTaskId,
        payload: &TargetTaskPayload,
    ) -> TargetServiceResult<TargetTask> {
        debug!(%id, "PUT /tasks/{id}");
        Self::send_for_task(self.request(Method::PUT, &format!("/tasks/{id}")).json(payload)).await
    }

    async fn update_task_score(
        &self,
        id: &TargetTaskId,
        direction: ScoreDirection,
    ) -> TargetServiceResult<()> {
        let path = format!("/tasks/{id}/score/{}", direction.as_str());
        debug!("POST {path}");
        Self::send(self.request(Method::POST, &path)).await.map(drop)
    }

    async fn delete_task(&self, id: &TargetTaskId) -> TargetServiceResult<()> {
        debug!(%id, "DELETE /tasks/{id}");
        Self::send(self.request(Method::DELETE, &format!("/tasks/{id}")))
            .await
            .map(drop)
    }
}
