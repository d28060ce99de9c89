//! Transport seams between the repository facade and GitHub.
//!
//! Implementations report what the server said (status and optional body)
//! and leave success/failure policy to [`crate::WorkflowRepository`].

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::TransportError;
use crate::models::{DispatchPayload, TaskListResult};

/// Status and decoded body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    /// `None` when the server sent no content.
    pub body: Option<T>,
}

impl<T> ApiResponse<T> {
    #[must_use]
    pub const fn new(status: StatusCode, body: Option<T>) -> Self {
        Self { status, body }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Read access to raw files in the workflow repository.
#[async_trait]
pub trait RawContentApi: Send + Sync {
    /// Fetch `clickup/WORKFLOW.md`.
    async fn workflow_document(&self) -> Result<ApiResponse<String>, TransportError>;

    /// Fetch `clickup/data/tasks/{list_id}.json`.
    async fn task_list(
        &self,
        list_id: &str,
    ) -> Result<ApiResponse<TaskListResult>, TransportError>;
}

/// Repository-scoped GitHub API calls.
#[async_trait]
pub trait DispatchApi: Send + Sync {
    /// POST `repos/{owner}/{repo}/dispatches`.
    async fn trigger_dispatch(
        &self,
        owner: &str,
        repo: &str,
        payload: &DispatchPayload,
    ) -> Result<ApiResponse<()>, TransportError>;
}
