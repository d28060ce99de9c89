//! Sync core for the Stitch ops client.
//!
//! This crate keeps a local view of a ClickUp-backed workflow that lives in a
//! GitHub repository. It can:
//!
//! - Fetch `WORKFLOW.md` from the repository and extract the task counts
//! - Fetch the exported task list JSON for a list
//! - Fire a `repository_dispatch` event so the sync workflow runs again
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use ops_sync::{GitHubClient, Settings, WorkflowRepository};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Arc::new(Settings::from_env());
//! let client = Arc::new(GitHubClient::new(settings.clone())?);
//! let repository = WorkflowRepository::new(client.clone(), client, settings);
//!
//! let snapshot = repository.fetch_workflow_snapshot().await?;
//! println!("{} open tasks", snapshot.open_tasks);
//!
//! if let Err(e) = repository.trigger_dispatch().await {
//!     eprintln!("dispatch failed: {e}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Failure handling
//!
//! Each operation reports failures differently:
//!
//! - [`WorkflowRepository::fetch_workflow_snapshot`] returns [`FetchError`]
//! - [`WorkflowRepository::fetch_tasks`] never fails; problems yield an empty list
//! - [`WorkflowRepository::trigger_dispatch`] returns [`DispatchError`] for every
//!   failure, including a malformed repository setting

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod github;
pub mod models;
pub mod repository;
pub mod settings;
pub mod snapshot;
pub mod transport;

pub use error::{DispatchError, FetchError, TransportError};
pub use github::GitHubClient;
pub use models::{DispatchPayload, ListMetadata, Task, TaskListResult, WorkflowSnapshot};
pub use repository::{WorkflowRepository, DEFAULT_LIST_ID};
pub use settings::{RepositoryId, Settings, SettingsStore};
pub use snapshot::parse_workflow_snapshot;
pub use transport::{ApiResponse, DispatchApi, RawContentApi};
