//! Git invocations for the initial commit and push.
//!
//! Each step is its own child process, run inside the project directory and
//! checked before the next one starts. A failed step stops the sequence;
//! nothing done by earlier steps is undone.

use crate::error::{PronitError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcsStep {
    Init,
    AddRemote,
    Stage,
    Commit,
    DefaultBranch,
    Push,
}

impl VcsStep {
    pub fn failure_message(&self) -> &'static str {
        match self {
            VcsStep::Init => "Failed to initialize local repository",
            VcsStep::AddRemote => "Failed to add remote",
            VcsStep::Stage => "Failed to add files",
            VcsStep::Commit => "Failed to commit files",
            VcsStep::DefaultBranch => "Failed to get default branch from config",
            VcsStep::Push => "Failed to push files to remote",
        }
    }
}

impl fmt::Display for VcsStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VcsStep::Init => "init",
            VcsStep::AddRemote => "remote add",
            VcsStep::Stage => "add",
            VcsStep::Commit => "commit",
            VcsStep::DefaultBranch => "config",
            VcsStep::Push => "push",
        };
        f.write_str(s)
    }
}

/// Captured result of one git invocation.
#[derive(Debug, Clone, Default)]
pub struct GitOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    /// Text worth showing when the step failed: stderr, or stdout if git
    /// wrote nothing to stderr.
    pub fn diagnostics(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim().to_string()
        } else {
            stderr.to_string()
        }
    }
}

/// Runs git with the given arguments in `dir`.
pub trait GitRunner {
    fn run(&self, dir: &Path, args: &[&str]) -> std::io::Result<GitOutput>;
}

/// The git executable found on `PATH`.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: PathBuf,
}

impl SystemGit {
    pub fn new() -> Self {
        let program = which::which("git").unwrap_or_else(|_| PathBuf::from("git"));
        Self { program }
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new()
    }
}

impl GitRunner for SystemGit {
    fn run(&self, dir: &Path, args: &[&str]) -> std::io::Result<GitOutput> {
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(dir)
            .output()?;
        Ok(GitOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// The six-step publish sequence for one project directory.
pub struct VcsDriver<'a> {
    runner: &'a dyn GitRunner,
    dir: PathBuf,
}

impl<'a> VcsDriver<'a> {
    pub fn new(runner: &'a dyn GitRunner, dir: &Path) -> Self {
        Self {
            runner,
            dir: dir.to_path_buf(),
        }
    }

    fn step(&self, step: VcsStep, args: &[&str]) -> Result<GitOutput> {
        tracing::debug!(%step, ?args, dir = %self.dir.display(), "running git");
        let output = self
            .runner
            .run(&self.dir, args)
            .map_err(|e| PronitError::Vcs {
                step,
                diagnostics: format!("could not run git: {e}"),
            })?;
        if !output.success {
            return Err(PronitError::Vcs {
                step,
                diagnostics: output.diagnostics(),
            });
        }
        Ok(output)
    }

    pub fn init(&self) -> Result<()> {
        self.step(VcsStep::Init, &["init", "-q"]).map(|_| ())
    }

    pub fn add_remote(&self, url: &str) -> Result<()> {
        self.step(VcsStep::AddRemote, &["remote", "add", "origin", url])
            .map(|_| ())
    }

    pub fn stage_all(&self) -> Result<()> {
        self.step(VcsStep::Stage, &["add", "."]).map(|_| ())
    }

    pub fn commit(&self, message: &str) -> Result<()> {
        self.step(VcsStep::Commit, &["commit", "-m", message, "-q"])
            .map(|_| ())
    }

    /// The configured `init.defaultBranch`, or `fallback` when it is unset or
    /// can't be read.
    pub fn default_branch(&self, fallback: &str) -> String {
        match self.step(
            VcsStep::DefaultBranch,
            &["config", "--get", "init.defaultBranch"],
        ) {
            Ok(output) => {
                let branch = output.stdout.trim();
                if branch.is_empty() {
                    tracing::debug!(%fallback, "init.defaultBranch is empty; using fallback");
                    fallback.to_string()
                } else {
                    branch.to_string()
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, %fallback, "init.defaultBranch not set; using fallback");
                fallback.to_string()
            }
        }
    }

    pub fn push(&self, branch: &str) -> Result<()> {
        self.step(VcsStep::Push, &["push", "-u", "origin", branch, "-q"])
            .map(|_| ())
    }

    /// Init, add the remote, commit everything and push. Returns the branch
    /// that was pushed.
    pub fn publish(&self, remote_url: &str, message: &str, fallback_branch: &str) -> Result<String> {
        self.init()?;
        self.add_remote(remote_url)?;
        self.stage_all()?;
        self.commit(message)?;
        let branch = self.default_branch(fallback_branch);
        self.push(&branch)?;
        tracing::info!(%branch, "pushed to origin");
        Ok(branch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeGit;
    use tempfile::TempDir;

    #[test]
    fn publish_runs_all_steps_in_order() {
        let git = FakeGit::new().with_default_branch("main");
        let dir = TempDir::new().unwrap();
        let branch = VcsDriver::new(&git, dir.path())
            .publish("https://github.com/octocat/demo.git", "Initial commit", "master")
            .unwrap();

        assert_eq!(branch, "main");
        assert_eq!(
            git.calls(),
            vec![
                "init -q",
                "remote add origin https://github.com/octocat/demo.git",
                "add .",
                "commit -m Initial commit -q",
                "config --get init.defaultBranch",
                "push -u origin main -q",
            ]
        );
    }

    #[test]
    fn branch_query_failure_falls_back() {
        let git = FakeGit::new();
        let dir = TempDir::new().unwrap();
        let branch = VcsDriver::new(&git, dir.path())
            .publish("url", "msg", "master")
            .unwrap();
        assert_eq!(branch, "master");
        assert_eq!(git.calls().last().unwrap(), "push -u origin master -q");
    }

    #[test]
    fn branch_output_is_trimmed() {
        let git = FakeGit::new().with_default_branch("trunk\n");
        let dir = TempDir::new().unwrap();
        assert_eq!(VcsDriver::new(&git, dir.path()).default_branch("master"), "trunk");
    }

    #[test]
    fn first_failure_stops_the_sequence() {
        let git = FakeGit::new().failing("commit", "nothing to commit");
        let dir = TempDir::new().unwrap();
        let err = VcsDriver::new(&git, dir.path())
            .publish("url", "msg", "master")
            .unwrap_err();

        match err {
            PronitError::Vcs { step, diagnostics } => {
                assert_eq!(step, VcsStep::Commit);
                assert_eq!(diagnostics, "nothing to commit");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(git.calls().len(), 4);
    }

    #[test]
    fn push_failure_reports_step_message() {
        let git = FakeGit::new().failing("push", "remote: Repository not found.");
        let dir = TempDir::new().unwrap();
        let err = VcsDriver::new(&git, dir.path())
            .publish("url", "msg", "master")
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to push files to remote"));
        assert!(msg.contains("Repository not found"));
    }

    #[test]
    fn diagnostics_fall_back_to_stdout() {
        let out = GitOutput {
            success: false,
            stdout: "nothing added to commit\n".into(),
            stderr: "  ".into(),
        };
        assert_eq!(out.diagnostics(), "nothing added to commit");
    }

    #[test]
    fn system_git_initializes_repository() {
        if which::which("git").is_err() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let git = SystemGit::new();
        let driver = VcsDriver::new(&git, dir.path());
        driver.init().unwrap();
        assert!(dir.path().join(".git").is_dir());
        assert!(!driver.default_branch("master").is_empty());
    }
}
