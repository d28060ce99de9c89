//! reqwest-backed GitHub transport.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{RequestBuilder, StatusCode};
use tracing::{debug, instrument, warn};

use crate::error::TransportError;
use crate::models::{DispatchPayload, TaskListResult};
use crate::settings::SettingsStore;
use crate::transport::{ApiResponse, DispatchApi, RawContentApi};

/// Path of the status document inside the repository.
pub const WORKFLOW_DOCUMENT_PATH: &str = "clickup/WORKFLOW.md";

/// Directory holding the exported task lists.
const TASK_LIST_DIR: &str = "clickup/data/tasks";

const USER_AGENT_VALUE: &str = concat!("ops-sync/", env!("CARGO_PKG_VERSION"));
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub client for raw file reads and repository dispatches.
///
/// Base URLs and the token are read from the settings on every request.
#[derive(Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    settings: Arc<dyn SettingsStore>,
}

impl GitHubClient {
    /// Create a new GitHub client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(settings: Arc<dyn SettingsStore>) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client, settings })
    }

    /// Attach the bearer token, if one is configured.
    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, TransportError> {
        let token = self.settings.token();
        if token.is_empty() {
            return Ok(request);
        }

        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
        value.set_sensitive(true);
        Ok(request.header(AUTHORIZATION, value))
    }

    /// GET a raw file. The body is only read for 2xx responses.
    async fn get_raw(&self, path: &str) -> Result<(StatusCode, Option<String>), TransportError> {
        let url = join_url(&self.settings.raw_base_url(), path);
        debug!(url = %url, "Fetching raw file");

        let response = self.authorize(self.client.get(&url))?.send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(url = %url, status = %status, "Raw file request failed");
            return Ok((status, None));
        }

        let text = response.text().await?;
        debug!(url = %url, bytes = text.len(), "Fetched raw file");
        Ok((status, Some(text).filter(|t| !t.is_empty())))
    }
}

#[async_trait]
impl RawContentApi for GitHubClient {
    #[instrument(skip(self))]
    async fn workflow_document(&self) -> Result<ApiResponse<String>, TransportError> {
        let (status, body) = self.get_raw(WORKFLOW_DOCUMENT_PATH).await?;
        Ok(ApiResponse::new(status, body))
    }

    #[instrument(skip(self))]
    async fn task_list(
        &self,
        list_id: &str,
    ) -> Result<ApiResponse<TaskListResult>, TransportError> {
        let (status, body) = self
            .get_raw(&format!("{TASK_LIST_DIR}/{list_id}.json"))
            .await?;

        let tasks = match body {
            Some(text) => Some(serde_json::from_str(&text)?),
            None => None,
        };

        Ok(ApiResponse::new(status, tasks))
    }
}

#[async_trait]
impl DispatchApi for GitHubClient {
    #[instrument(skip(self, payload))]
    async fn trigger_dispatch(
        &self,
        owner: &str,
        repo: &str,
        payload: &DispatchPayload,
    ) -> Result<ApiResponse<()>, TransportError> {
        let url = join_url(
            &self.settings.api_base_url(),
            &format!("repos/{owner}/{repo}/dispatches"),
        );

        let request = self
            .client
            .post(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .json(payload);

        let response = self.authorize(request)?.send().await?;
        let status = response.status();

        if status.is_success() {
            debug!(status = %status, event_type = %payload.event_type, "Dispatch accepted");
        } else {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "GitHub rejected dispatch");
        }

        Ok(ApiResponse::new(status, None))
    }
}

/// Join a base URL and a relative path with exactly one slash.
fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://raw.githubusercontent.com/acme/infra/main/", "clickup/WORKFLOW.md"),
            "https://raw.githubusercontent.com/acme/infra/main/clickup/WORKFLOW.md"
        );
        assert_eq!(
            join_url("https://api.github.com", "/repos/acme/infra/dispatches"),
            "https://api.github.com/repos/acme/infra/dispatches"
        );
    }
}
