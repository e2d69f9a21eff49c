//! Tool configuration sourced from the environment.
//!
//! Defaults for the release tooling repository (GitHub org, repo, working
//! branch) can be overridden with the `TOOL_ORG`, `TOOL_REPO` and
//! `TOOL_BRANCH` environment variables. The environment is consulted only
//! here, once, at construction time; resolver code receives the resulting
//! struct and never reads the environment itself.

use std::env;

/// GitHub organization the release tooling lives under.
pub const DEFAULT_TOOL_ORG: &str = "kubernetes";

/// Repository name of the release tooling.
pub const DEFAULT_TOOL_REPO: &str = "release";

/// Branch of the release tooling used by automation.
pub const DEFAULT_TOOL_BRANCH: &str = "master";

/// Coordinates of the release tooling repository.
///
/// # Example
///
/// ```
/// use krel::config::ToolConfig;
///
/// let config = ToolConfig::default();
/// assert_eq!(config.org, "kubernetes");
/// assert_eq!(config.repo_url(false), "https://github.com/kubernetes/release");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// GitHub organization name.
    pub org: String,

    /// Repository name.
    pub repo: String,

    /// Working branch name.
    pub branch: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            org: DEFAULT_TOOL_ORG.to_string(),
            repo: DEFAULT_TOOL_REPO.to_string(),
            branch: DEFAULT_TOOL_BRANCH.to_string(),
        }
    }
}

impl ToolConfig {
    /// Build a configuration from the process environment.
    ///
    /// Each field falls back to its static default when the corresponding
    /// variable is unset or empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let pick = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            org: pick("TOOL_ORG", DEFAULT_TOOL_ORG),
            repo: pick("TOOL_REPO", DEFAULT_TOOL_REPO),
            branch: pick("TOOL_BRANCH", DEFAULT_TOOL_BRANCH),
        }
    }

    /// Set the organization (builder pattern).
    pub fn with_org(mut self, org: impl Into<String>) -> Self {
        self.org = org.into();
        self
    }

    /// Set the repository (builder pattern).
    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = repo.into();
        self
    }

    /// Set the branch (builder pattern).
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// URL of the configured tooling repository.
    pub fn repo_url(&self, use_ssh: bool) -> String {
        repo_url(&self.org, &self.repo, use_ssh)
    }
}

/// Build a GitHub repository URL.
///
/// Empty org or repo fall back to the defaults, so callers can pass through
/// optional user input unchanged.
///
/// # Examples
///
/// ```
/// use krel::config::repo_url;
///
/// assert_eq!(repo_url("", "", false), "https://github.com/kubernetes/release");
/// assert_eq!(repo_url("acme", "tools", true), "git@github.com:acme/tools");
/// ```
pub fn repo_url(org: &str, repo: &str, use_ssh: bool) -> String {
    let org = if org.is_empty() { DEFAULT_TOOL_ORG } else { org };
    let repo = if repo.is_empty() { DEFAULT_TOOL_REPO } else { repo };

    if use_ssh {
        format!("git@github.com:{}/{}", org, repo)
    } else {
        format!("https://github.com/{}/{}", org, repo)
    }
}
