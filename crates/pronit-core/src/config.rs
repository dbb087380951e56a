use crate::error::{PronitError, Result};
use crate::paths;
use crate::retry::RetryPolicy;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_raw_url() -> String {
    "https://raw.githubusercontent.com/github/gitignore/main".to_string()
}

fn default_web_url() -> String {
    "https://github.com".to_string()
}

fn default_commit_message_url() -> String {
    "https://whatthecommit.com/index.txt".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_commit_message() -> String {
    "Initial commit".to_string()
}

fn default_fallback_branch() -> String {
    "master".to_string()
}

fn default_editor() -> String {
    "code".to_string()
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Settings read from `<pronit home>/config.yaml`. Every field is optional in
/// the file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    /// Base URL of the hosting REST API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Base URL that ignore-template paths are appended to.
    #[serde(default = "default_raw_url")]
    pub raw_url: String,
    /// Base URL of the hosting web UI; also used for the git remote.
    #[serde(default = "default_web_url")]
    pub web_url: String,
    #[serde(default = "default_commit_message_url")]
    pub commit_message_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Bound on re-prompting for tokens and names. `None` asks forever.
    #[serde(default)]
    pub max_attempts: Option<u32>,
    #[serde(default = "default_commit_message")]
    pub default_commit_message: String,
    /// Branch pushed when `init.defaultBranch` is not configured. The default
    /// assumes git 2.x, whose `git init` creates `master`; git 3 creates
    /// `main` instead.
    #[serde(default = "default_fallback_branch")]
    pub fallback_branch: String,
    #[serde(default = "default_editor")]
    pub editor: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            raw_url: default_raw_url(),
            web_url: default_web_url(),
            commit_message_url: default_commit_message_url(),
            timeout_secs: default_timeout_secs(),
            max_attempts: None,
            default_commit_message: default_commit_message(),
            fallback_branch: default_fallback_branch(),
            editor: default_editor(),
        }
    }
}

impl Config {
    /// Load the config from `pronit_home`, falling back to defaults when the
    /// file doesn't exist.
    pub fn load(pronit_home: &Path) -> Result<Self> {
        let path = paths::config_path(pronit_home);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|source| PronitError::Config {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts)
    }

    /// URL of the repository page for `identity/name`.
    pub fn repository_url(&self, identity: &str, name: &str) -> String {
        format!("{}/{}/{}", self.web_url.trim_end_matches('/'), identity, name)
    }

    /// URL used as the `origin` remote.
    pub fn remote_url(&self, identity: &str, name: &str) -> String {
        format!("{}.git", self.repository_url(identity, name))
    }
}
