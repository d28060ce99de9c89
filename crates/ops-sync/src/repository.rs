//! Entry point used by the client screens.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::error::{DispatchError, FetchError};
use crate::models::{DispatchPayload, Task, WorkflowSnapshot};
use crate::settings::{RepositoryId, SettingsStore};
use crate::snapshot::parse_workflow_snapshot;
use crate::transport::{DispatchApi, RawContentApi};

/// List fetched by [`WorkflowRepository::fetch_tasks`].
///
/// Only one exported list is read for now.
pub const DEFAULT_LIST_ID: &str = "demo_list";

/// Workflow status, tasks and dispatch for the configured repository.
#[derive(Clone)]
pub struct WorkflowRepository {
    raw: Arc<dyn RawContentApi>,
    api: Arc<dyn DispatchApi>,
    settings: Arc<dyn SettingsStore>,
}

impl WorkflowRepository {
    #[must_use]
    pub fn new(
        raw: Arc<dyn RawContentApi>,
        api: Arc<dyn DispatchApi>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        Self { raw, api, settings }
    }

    /// Fetch `WORKFLOW.md` and extract its counters.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails, GitHub answers with a
    /// non-success status, or the document is empty.
    #[instrument(skip(self))]
    pub async fn fetch_workflow_snapshot(&self) -> Result<WorkflowSnapshot, FetchError> {
        let response = self.raw.workflow_document().await?;
        if !response.is_success() {
            return Err(FetchError::Status(response.status));
        }

        let content = response.body.ok_or(FetchError::EmptyBody)?;
        let snapshot = parse_workflow_snapshot(&content);
        debug!(
            open = snapshot.open_tasks,
            closed = snapshot.closed_tasks,
            overdue = snapshot.overdue_tasks,
            "Parsed workflow snapshot"
        );
        Ok(snapshot)
    }

    /// Fetch the tasks of the default list.
    ///
    /// Any failure is logged and yields an empty list so the task screen stays
    /// usable.
    pub async fn fetch_tasks(&self) -> Vec<Task> {
        self.fetch_tasks_in(DEFAULT_LIST_ID).await
    }

    #[instrument(skip(self))]
    async fn fetch_tasks_in(&self, list_id: &str) -> Vec<Task> {
        let response = match self.raw.task_list(list_id).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Failed to fetch task list");
                return vec![];
            }
        };

        if !response.is_success() {
            warn!(status = %response.status, "Task list request failed");
            return vec![];
        }

        match response.body {
            Some(result) => {
                debug!(list = %result.list.name, count = result.tasks.len(), "Fetched tasks");
                result.tasks
            }
            None => vec![],
        }
    }

    /// Ask GitHub to run the sync workflow via `repository_dispatch`.
    ///
    /// # Errors
    ///
    /// Every failure is returned as a [`DispatchError`]: a repository setting
    /// that is not `owner/repo`, a non-success status, or a failed request.
    #[instrument(skip(self))]
    pub async fn trigger_dispatch(&self) -> Result<(), DispatchError> {
        let repository = RepositoryId::parse(&self.settings.repository())?;
        let payload = DispatchPayload::default();

        let response = self
            .api
            .trigger_dispatch(&repository.owner, &repository.repo, &payload)
            .await?;

        if response.is_success() {
            info!(repository = %repository, "Triggered workflow dispatch");
            Ok(())
        } else {
            Err(DispatchError::Status(response.status))
        }
    }
}
