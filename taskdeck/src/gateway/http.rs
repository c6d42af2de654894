//! HTTP gateway to the remote task store
//!
//! The remote is a plain JSON-over-HTTP collection: `GET /tasks` lists,
//! `POST /tasks` creates, and `PUT`/`PATCH`/`DELETE /tasks/{id}` operate on
//! one task. Any 2xx answer counts as success; everything else is mapped to a
//! [`GatewayError`](crate::GatewayError).

use super::RemoteGateway;
use crate::error::{GatewayError, GatewayResult};
use crate::types::{Status, Task, TaskFields, TaskId};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use url::Url;

/// Default remote URL used when neither the environment variable nor the
/// config file provides one
pub const DEFAULT_REMOTE_URL: &str = "http://localhost:3001";

/// Resolve the remote URL from the environment or config file.
///
/// Checks in order:
/// 1. `TASKDECK_REMOTE_URL` environment variable
/// 2. `remote_url` key in `~/.taskdeck/config.yaml`
/// 3. Default: `http://localhost:3001`
pub fn resolve_remote_url() -> String {
    if let Ok(url) = std::env::var("TASKDECK_REMOTE_URL") {
        return url;
    }

    if let Some(home) = dirs::home_dir() {
        let config_path = home.join(".taskdeck").join("config.yaml");
        if config_path.exists() {
            if let Ok(content) = std::fs::read_to_string(&config_path) {
                if let Ok(config) = serde_yaml::from_str::<serde_yaml::Value>(&content) {
                    if let Some(url) = config.get("remote_url").and_then(|v| v.as_str()) {
                        return url.to_string();
                    }
                }
            }
        }
    }

    DEFAULT_REMOTE_URL.to_string()
}

/// Pull a human-readable message out of an error response body.
///
/// Tries the JSON `error` and `message` keys first, then falls back to the
/// raw body, then to the bare status code.
fn extract_error_message(body: &str, status: u16) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = json.get("error").and_then(|v| v.as_str()) {
            return message.to_string();
        }
        if let Some(message) = json.get("message").and_then(|v| v.as_str()) {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {status}")
    } else {
        trimmed.to_string()
    }
}

/// Body of a status-only update
#[derive(Debug, Serialize)]
struct StatusPatch {
    status: Status,
}

/// Gateway that talks to the remote task store over HTTP
#[derive(Debug)]
pub struct HttpGateway {
    client: Client,
    remote_url: String,
}

impl HttpGateway {
    /// Create a gateway for the given remote root URL
    pub fn new(remote_url: &str) -> GatewayResult<Self> {
        let parsed = Url::parse(remote_url).map_err(|e| GatewayError::Url(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(GatewayError::Url(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        Ok(Self {
            client: Client::new(),
            remote_url: remote_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a gateway using [`resolve_remote_url`]
    pub fn from_env() -> GatewayResult<Self> {
        Self::new(&resolve_remote_url())
    }

    /// The remote root URL this gateway talks to
    pub fn remote_url(&self) -> &str {
        &self.remote_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.remote_url)
    }

    fn task_url(&self, id: &TaskId) -> String {
        format!(
            "{}/tasks/{}",
            self.remote_url,
            urlencoding::encode(id.as_str())
        )
    }

    async fn check_response(&self, response: Response) -> GatewayResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body, status_code);

        match status_code {
            404 => Err(GatewayError::NotFound(message)),
            _ => Err(GatewayError::Api {
                status: status_code,
                message,
            }),
        }
    }
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn fetch_all(&self) -> GatewayResult<Vec<Task>> {
        let url = self.tasks_url();
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = self.check_response(response).await?;
        let tasks = response.json().await?;
        Ok(tasks)
    }

    async fn create_one(&self, fields: &TaskFields) -> GatewayResult<Task> {
        let url = self.tasks_url();
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).json(fields).send().await?;
        let response = self.check_response(response).await?;
        let task = response.json().await?;
        Ok(task)
    }

    async fn replace_one(&self, id: &TaskId, fields: &TaskFields) -> GatewayResult<Task> {
        let url = self.task_url(id);
        tracing::debug!("PUT {}", url);

        let response = self.client.put(&url).json(fields).send().await?;
        let response = self.check_response(response).await?;
        let task = response.json().await?;
        Ok(task)
    }

    async fn patch_status(&self, id: &TaskId, status: Status) -> GatewayResult<Task> {
        let url = self.task_url(id);
        tracing::debug!("PATCH {} -> {}", url, status);

        let response = self
            .client
            .patch(&url)
            .json(&StatusPatch { status })
            .send()
            .await?;
        let response = self.check_response(response).await?;
        let task = response.json().await?;
        Ok(task)
    }

    async fn delete_one(&self, id: &TaskId) -> GatewayResult<()> {
        let url = self.task_url(id);
        tracing::debug!("DELETE {}", url);

        let response = self.client.delete(&url).send().await?;
        self.check_response(response).await?;
        Ok(())
    }
}
