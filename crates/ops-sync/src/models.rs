//! Data types exchanged with the workflow repository.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Event type the sync workflow listens for.
pub const DISPATCH_EVENT_TYPE: &str = "clickup-update";

/// Value of `client_payload.source` identifying this client.
pub const DISPATCH_SOURCE: &str = "android";

/// Task counts extracted from `WORKFLOW.md`.
///
/// Counts never exceed `i32::MAX`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSnapshot {
    pub open_tasks: u32,
    pub closed_tasks: u32,
    pub overdue_tasks: u32,
}

/// A single exported ClickUp task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    /// Due date as exported, e.g. `2024-05-01`.
    #[serde(default)]
    pub due_date: Option<String>,
    pub status: String,
    pub assignees: Vec<String>,
    pub list_name: String,
    pub days_overdue: i32,
}

/// Identifies the list a task export belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMetadata {
    pub id: String,
    pub name: String,
}

/// Body of `clickup/data/tasks/{listId}.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListResult {
    pub list: ListMetadata,
    pub tasks: Vec<Task>,
}

/// Body of a `repository_dispatch` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchPayload {
    pub event_type: String,
    pub client_payload: BTreeMap<String, String>,
}

impl Default for DispatchPayload {
    fn default() -> Self {
        Self {
            event_type: DISPATCH_EVENT_TYPE.to_string(),
            client_payload: BTreeMap::from([("source".to_string(), DISPATCH_SOURCE.to_string())]),
        }
    }
}
