//! In-memory stand-ins for the hosting API, git and the terminal, shared by
//! unit tests across the crate.

use crate::credential::Credential;
use crate::error::{PronitError, Result};
use crate::hosting::Hosting;
use crate::terminal::{Terminal, Tone};
use crate::vcs::{GitOutput, GitRunner};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::Path;

// ---------------------------------------------------------------------------
// Git
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeGit {
    calls: RefCell<Vec<String>>,
    failures: HashMap<String, String>,
    default_branch: Option<String>,
}

impl FakeGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_branch(mut self, branch: &str) -> Self {
        self.default_branch = Some(branch.to_string());
        self
    }

    /// Make the git subcommand `subcommand` exit non-zero with `stderr`.
    pub fn failing(mut self, subcommand: &str, stderr: &str) -> Self {
        self.failures
            .insert(subcommand.to_string(), stderr.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl GitRunner for FakeGit {
    fn run(&self, _dir: &Path, args: &[&str]) -> std::io::Result<GitOutput> {
        self.calls.borrow_mut().push(args.join(" "));
        let subcommand = args.first().copied().unwrap_or_default();
        if let Some(stderr) = self.failures.get(subcommand) {
            return Ok(GitOutput {
                success: false,
                stdout: String::new(),
                stderr: stderr.clone(),
            });
        }
        if subcommand == "config" {
            return Ok(match &self.default_branch {
                Some(branch) => GitOutput {
                    success: true,
                    stdout: branch.clone(),
                    stderr: String::new(),
                },
                None => GitOutput::default(),
            });
        }
        Ok(GitOutput {
            success: true,
            ..GitOutput::default()
        })
    }
}

// ---------------------------------------------------------------------------
// Hosting
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeHosting {
    /// token → login
    pub users: HashMap<String, String>,
    /// template path → body
    pub templates: HashMap<String, String>,
    /// license id → body
    pub licenses: HashMap<String, String>,
    pub commit_message: Option<String>,
    pub create_failure: Option<u16>,
    calls: RefCell<Vec<String>>,
}

impl FakeHosting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, token: &str, login: &str) -> Self {
        self.users.insert(token.to_string(), login.to_string());
        self
    }

    pub fn with_template(mut self, path: &str, body: &str) -> Self {
        self.templates.insert(path.to_string(), body.to_string());
        self
    }

    pub fn with_license(mut self, id: &str, body: &str) -> Self {
        self.licenses.insert(id.to_string(), body.to_string());
        self
    }

    pub fn with_commit_message(mut self, message: &str) -> Self {
        self.commit_message = Some(message.to_string());
        self
    }

    pub fn failing_create(mut self, status: u16) -> Self {
        self.create_failure = Some(status);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl Hosting for FakeHosting {
    fn verify(&self, credential: &Credential) -> Result<Option<String>> {
        self.record(format!("verify {}", credential.expose()));
        Ok(self.users.get(credential.expose()).cloned())
    }

    fn create_repository(
        &self,
        _credential: &Credential,
        name: &str,
        description: Option<&str>,
        private: bool,
    ) -> Result<()> {
        self.record(format!(
            "create {name} {:?} private={private}",
            description.unwrap_or("")
        ));
        match self.create_failure {
            Some(status) => Err(PronitError::RemoteCreation {
                status: Some(status),
                message: "Repository creation failed.".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn fetch_ignore_template(&self, path: &str) -> Result<String> {
        self.record(format!("template {path}"));
        self.templates.get(path).cloned().ok_or(PronitError::Fetch {
            what: format!("ignore template {path}"),
            status: 404,
        })
    }

    fn fetch_license_text(&self, id: &str) -> Result<String> {
        self.record(format!("license {id}"));
        self.licenses.get(id).cloned().ok_or(PronitError::Fetch {
            what: format!("license {id}"),
            status: 404,
        })
    }

    fn fetch_commit_message(&self) -> Result<String> {
        self.record("commit message".to_string());
        self.commit_message.clone().ok_or(PronitError::Fetch {
            what: "commit message".to_string(),
            status: 503,
        })
    }
}

// ---------------------------------------------------------------------------
// Terminal
// ---------------------------------------------------------------------------

/// Answers questions from a fixed script; running out of answers behaves
/// like end of input.
#[derive(Default)]
pub struct ScriptedTerminal {
    answers: VecDeque<String>,
    pub questions: Vec<String>,
    pub notifications: Vec<(Tone, String)>,
}

impl ScriptedTerminal {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn messages(&self, tone: Tone) -> Vec<&str> {
        self.notifications
            .iter()
            .filter(|(t, _)| *t == tone)
            .map(|(_, m)| m.as_str())
            .collect()
    }
}

impl Terminal for ScriptedTerminal {
    fn ask(&mut self, question: &str) -> Result<String> {
        self.questions.push(question.to_string());
        self.answers.pop_front().ok_or(PronitError::Aborted)
    }

    fn notify(&mut self, tone: Tone, message: &str) {
        self.notifications.push((tone, message.to_string()));
    }
}
