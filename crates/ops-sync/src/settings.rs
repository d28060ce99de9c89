//! Settings shared by the sync operations.
//!
//! The settings are owned by the embedding application (on the device they
//! live in encrypted storage). The sync core only ever reads them through
//! [`SettingsStore`].

use std::env;
use std::fmt;

use crate::error::DispatchError;

/// Default GitHub REST API endpoint.
pub const GITHUB_API_URL: &str = "https://api.github.com";

const ENV_REPOSITORY: &str = "OPS_GITHUB_REPOSITORY";
const ENV_TOKEN: &str = "OPS_GITHUB_TOKEN";
const ENV_FALLBACK_TOKEN: &str = "GITHUB_TOKEN";
/// Environment variable holding an explicit raw base URL.
pub const ENV_RAW_BASE_URL: &str = "OPS_RAW_BASE_URL";
const ENV_API_URL: &str = "OPS_GITHUB_API_URL";

/// Read-only view of the client settings.
pub trait SettingsStore: Send + Sync {
    /// Repository in `owner/repo` form.
    fn repository(&self) -> String;

    /// Token sent as a bearer credential. Empty means anonymous.
    fn token(&self) -> String;

    /// Base URL serving raw repository files.
    fn raw_base_url(&self) -> String;

    /// Base URL of the GitHub REST API.
    fn api_base_url(&self) -> String {
        GITHUB_API_URL.to_string()
    }
}

/// Plain settings value.
#[derive(Clone, Default)]
pub struct Settings {
    pub repository: String,
    pub token: String,
    pub raw_base_url: String,
    pub api_base_url: Option<String>,
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// Without `OPS_RAW_BASE_URL` the raw base URL points at the `main`
    /// branch on `raw.githubusercontent.com`.
    #[must_use]
    pub fn from_env() -> Self {
        let repository = env::var(ENV_REPOSITORY).unwrap_or_default();
        let token = env::var(ENV_TOKEN)
            .or_else(|_| env::var(ENV_FALLBACK_TOKEN))
            .unwrap_or_default();
        let raw_base_url = env::var(ENV_RAW_BASE_URL)
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| default_raw_base_url(&repository));
        let api_base_url = env::var(ENV_API_URL).ok().filter(|s| !s.is_empty());

        Self {
            repository,
            token,
            raw_base_url,
            api_base_url,
        }
    }
}

/// `https://raw.githubusercontent.com/{owner}/{repo}/main`, or empty when the
/// repository is not configured.
#[must_use]
pub fn default_raw_base_url(repository: &str) -> String {
    if repository.is_empty() {
        String::new()
    } else {
        format!("https://raw.githubusercontent.com/{repository}/main")
    }
}

impl SettingsStore for Settings {
    fn repository(&self) -> String {
        self.repository.clone()
    }

    fn token(&self) -> String {
        self.token.clone()
    }

    fn raw_base_url(&self) -> String {
        self.raw_base_url.clone()
    }

    fn api_base_url(&self) -> String {
        self.api_base_url
            .clone()
            .unwrap_or_else(|| GITHUB_API_URL.to_string())
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("repository", &self.repository)
            .field("token", &if self.token.is_empty() { "" } else { "***" })
            .field("raw_base_url", &self.raw_base_url)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// A repository split into owner and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryId {
    pub owner: String,
    pub repo: String,
}

impl RepositoryId {
    /// Split `owner/repo`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MalformedSettings`] unless the input is
    /// exactly two non-empty segments separated by `/`.
    pub fn parse(full_name: &str) -> Result<Self, DispatchError> {
        let mut parts = full_name.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(DispatchError::MalformedSettings(full_name.to_string())),
        }
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
