//! Command-line front end for the workflow sync core.
//!
//! Settings come from the environment (`OPS_GITHUB_REPOSITORY`,
//! `OPS_GITHUB_TOKEN`, `OPS_RAW_BASE_URL`, `OPS_GITHUB_API_URL`) and can be
//! overridden per invocation.

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ops_sync::settings::{default_raw_base_url, ENV_RAW_BASE_URL};
use ops_sync::{GitHubClient, Settings, WorkflowRepository};

#[derive(Parser)]
#[command(name = "ops-sync", version, about = "Sync the ClickUp workflow kept in GitHub")]
struct Cli {
    /// Repository holding the workflow, as owner/repo
    #[arg(long, global = true)]
    repository: Option<String>,

    /// GitHub token
    #[arg(long, global = true)]
    token: Option<String>,

    /// Base URL for raw repository files
    #[arg(long, global = true)]
    raw_base_url: Option<String>,

    /// GitHub API base URL
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the task counts from WORKFLOW.md
    Snapshot,

    /// List the exported tasks
    Tasks,

    /// Trigger the sync workflow on GitHub
    Dispatch,
}

impl Cli {
    /// Environment settings with command-line overrides applied.
    fn settings(&self) -> Settings {
        let raw_base_url_from_env = env::var(ENV_RAW_BASE_URL).is_ok_and(|s| !s.is_empty());
        self.apply_overrides(Settings::from_env(), raw_base_url_from_env)
    }

    /// Overlay the flags on `settings`. The raw base URL is only re-derived
    /// from `--repository` when neither the flag nor the environment set it.
    fn apply_overrides(&self, mut settings: Settings, raw_base_url_from_env: bool) -> Settings {
        if let Some(repository) = &self.repository {
            settings.repository.clone_from(repository);
            if self.raw_base_url.is_none() && !raw_base_url_from_env {
                settings.raw_base_url = default_raw_base_url(repository);
            }
        }
        if let Some(token) = &self.token {
            settings.token.clone_from(token);
        }
        if let Some(raw_base_url) = &self.raw_base_url {
            settings.raw_base_url.clone_from(raw_base_url);
        }
        if self.api_base_url.is_some() {
            settings.api_base_url.clone_from(&self.api_base_url);
        }

        settings
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Arc::new(cli.settings());
    tracing::debug!(settings = ?settings, "Loaded settings");

    let client = Arc::new(
        GitHubClient::new(settings.clone()).context("Failed to create GitHub client")?,
    );
    let repository = WorkflowRepository::new(client.clone(), client, settings);

    match cli.command {
        Commands::Snapshot => {
            let snapshot = repository.fetch_workflow_snapshot().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                println!("Open:    {}", snapshot.open_tasks);
                println!("Closed:  {}", snapshot.closed_tasks);
                println!("Overdue: {}", snapshot.overdue_tasks);
            }
        }

        Commands::Tasks => {
            let tasks = repository.fetch_tasks().await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("No tasks");
            } else {
                for task in &tasks {
                    let due = task.due_date.as_deref().unwrap_or("-");
                    let assignees = if task.assignees.is_empty() {
                        "unassigned".to_string()
                    } else {
                        task.assignees.join(", ")
                    };
                    print!(
                        "{}  {}  [{}]  due {due}  ({assignees})",
                        task.id, task.name, task.status
                    );
                    if task.days_overdue > 0 {
                        print!("  {} days overdue", task.days_overdue);
                    }
                    println!();
                }
            }
        }

        Commands::Dispatch => {
            repository.trigger_dispatch().await?;
            println!("Dispatch triggered");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_settings() -> Settings {
        Settings {
            repository: "old/repo".to_string(),
            token: "ghp_env".to_string(),
            raw_base_url: "https://mirror.test/x".to_string(),
            api_base_url: None,
        }
    }

    #[test]
    fn test_repository_flag_keeps_raw_url_from_env() {
        let cli = Cli::parse_from(["ops-sync", "--repository", "acme/infra", "snapshot"]);
        let settings = cli.apply_overrides(env_settings(), true);

        assert_eq!(settings.repository, "acme/infra");
        assert_eq!(settings.raw_base_url, "https://mirror.test/x");
    }

    #[test]
    fn test_repository_flag_rederives_default_raw_url() {
        let cli = Cli::parse_from(["ops-sync", "--repository", "acme/infra", "snapshot"]);
        let settings = cli.apply_overrides(env_settings(), false);

        assert_eq!(
            settings.raw_base_url,
            "https://raw.githubusercontent.com/acme/infra/main"
        );
    }

    #[test]
    fn test_flags_override_env() {
        let cli = Cli::parse_from([
            "ops-sync",
            "tasks",
            "--repository",
            "acme/infra",
            "--raw-base-url",
            "http://localhost:8080",
            "--api-base-url",
            "http://localhost:9090",
            "--token",
            "ghp_flag",
        ]);
        let settings = cli.apply_overrides(env_settings(), true);

        assert_eq!(settings.raw_base_url, "http://localhost:8080");
        assert_eq!(settings.api_base_url.as_deref(), Some("http://localhost:9090"));
        assert_eq!(settings.token, "ghp_flag");
    }

    #[test]
    fn test_no_flags_keeps_env() {
        let cli = Cli::parse_from(["ops-sync", "dispatch"]);
        let settings = cli.apply_overrides(env_settings(), true);

        assert_eq!(settings.repository, "old/repo");
        assert_eq!(settings.token, "ghp_env");
        assert_eq!(settings.raw_base_url, "https://mirror.test/x");
        assert!(settings.api_base_url.is_none());
    }
}
