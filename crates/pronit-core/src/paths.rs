use crate::error::{PronitError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// File and directory names
// ---------------------------------------------------------------------------

pub const PRONIT_DIR: &str = ".pronit";
pub const TOKEN_FILE: &str = "token";
pub const CONFIG_FILE: &str = "config.yaml";

pub const README_MD: &str = "README.md";
pub const GITIGNORE: &str = ".gitignore";
pub const LICENSE: &str = "LICENSE";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Resolve the per-user pronit directory.
///
/// An explicit directory (from `--home` / `PRONIT_HOME`) wins; otherwise
/// `~/.pronit`.
pub fn pronit_home(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    let home = home::home_dir().ok_or(PronitError::HomeNotFound)?;
    Ok(home.join(PRONIT_DIR))
}

pub fn token_path(pronit_home: &Path) -> PathBuf {
    pronit_home.join(TOKEN_FILE)
}

pub fn config_path(pronit_home: &Path) -> PathBuf {
    pronit_home.join(CONFIG_FILE)
}

pub fn project_dir(cwd: &Path, name: &str) -> PathBuf {
    cwd.join(name)
}

pub fn readme_path(project: &Path) -> PathBuf {
    project.join(README_MD)
}

pub fn gitignore_path(project: &Path) -> PathBuf {
    project.join(GITIGNORE)
}

pub fn license_path(project: &Path) -> PathBuf {
    project.join(LICENSE)
}

// ---------------------------------------------------------------------------
// Project name normalization
// ---------------------------------------------------------------------------

static NAME_RE: OnceLock<Regex> = OnceLock::new();

fn name_re() -> &'static Regex {
    NAME_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9._-]+$").unwrap())
}

/// Remove every whitespace character from a raw project name.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace().collect()
}

/// Check that a normalized name is usable both as a directory and as a
/// repository name on the hosting side.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name.len() > 100
        || name == "."
        || name == ".."
        || !name_re().is_match(name)
    {
        return Err(PronitError::InvalidName(name.to_string()));
    }
    Ok(())
}
