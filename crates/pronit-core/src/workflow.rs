//! The end-to-end project initialization flow.
//!
//! Stages, in order; each one is only entered once the previous one's side
//! effects succeeded:
//!
//!   Start → AuthResolved → ProjectCreated → IgnoreApplied → LicenseApplied → Published
//!
//! Failures after `ProjectCreated` leave whatever was already written on
//! disk (directory, README, templates, local commits) in place. Template and
//! license fetches are best effort and only produce warnings.

use crate::catalog::{self, License};
use crate::config::Config;
use crate::credential::{Credential, CredentialStore};
use crate::error::{PronitError, Result};
use crate::hosting::Hosting;
use crate::paths;
use crate::retry::RetryPolicy;
use crate::scaffold;
use crate::terminal::{Terminal, Tone};
use crate::vcs::{GitRunner, VcsDriver};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How many questions to ask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Name, description, visibility and .gitignore templates.
    #[default]
    Default,
    /// Name and visibility only.
    Minimal,
    /// Everything in default mode plus license and commit message.
    Extended,
}

impl Mode {
    pub fn asks_description(&self) -> bool {
        *self != Mode::Minimal
    }

    pub fn applies_ignores(&self) -> bool {
        *self != Mode::Minimal
    }

    pub fn asks_license(&self) -> bool {
        *self == Mode::Extended
    }

    pub fn asks_commit_message(&self) -> bool {
        *self == Mode::Extended
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Start,
    AuthResolved,
    ProjectCreated,
    IgnoreApplied,
    LicenseApplied,
    Published,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub mode: Mode,
    /// Use a random commit message when the user doesn't give one.
    pub random_message: bool,
}

/// A verified credential and the account it belongs to.
#[derive(Debug, Clone)]
pub struct Session {
    pub credential: Credential,
    pub identity: String,
}

/// Everything the user asked for, collected before anything is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSpec {
    pub name: String,
    pub description: Option<String>,
    pub private: bool,
    pub ignore_keys: Vec<String>,
    pub license: Option<License>,
    pub commit_message: Option<String>,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub identity: String,
    pub directory: PathBuf,
    pub branch: String,
    pub url: String,
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

pub struct Workflow<'a> {
    config: &'a Config,
    options: Options,
    retry: RetryPolicy,
    store: CredentialStore,
    hosting: &'a dyn Hosting,
    git: &'a dyn GitRunner,
    terminal: &'a mut dyn Terminal,
    cwd: PathBuf,
    stage: Stage,
}

impl<'a> Workflow<'a> {
    pub fn new(
        config: &'a Config,
        options: Options,
        store: CredentialStore,
        hosting: &'a dyn Hosting,
        git: &'a dyn GitRunner,
        terminal: &'a mut dyn Terminal,
        cwd: &Path,
    ) -> Self {
        Self {
            config,
            options,
            retry: config.retry_policy(),
            store,
            hosting,
            git,
            terminal,
            cwd: cwd.to_path_buf(),
            stage: Stage::Start,
        }
    }

    /// Last stage that completed.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn advance(&mut self, stage: Stage) {
        tracing::info!(?stage, "stage complete");
        self.stage = stage;
    }

    pub fn run(&mut self) -> Result<Published> {
        let session = self.resolve_auth()?;
        let spec = self.collect_project()?;
        self.execute(&session, &spec)
    }

    // -----------------------------------------------------------------------
    // Authentication
    // -----------------------------------------------------------------------

    /// Load or ask for a token until one verifies, then offer to switch.
    pub fn resolve_auth(&mut self) -> Result<Session> {
        let mut session = match self.store.load() {
            Some(credential) => match self.hosting.verify(&credential)? {
                Some(identity) => Session {
                    credential,
                    identity,
                },
                None => {
                    self.terminal.notify(
                        Tone::Warning,
                        "The stored access token is no longer valid",
                    );
                    self.prompt_credential()?
                }
            },
            None => self.prompt_credential()?,
        };

        let switch = self.terminal.confirm(&format!(
            "You are registered as {}. Do you want to change your access token?",
            session.identity
        ))?;
        if switch {
            session = self.prompt_credential()?;
        }

        self.advance(Stage::AuthResolved);
        Ok(session)
    }

    fn prompt_credential(&mut self) -> Result<Session> {
        let mut attempts = self.retry.start("access token");
        let mut question = "Please enter your access token";
        loop {
            attempts.attempt()?;
            let answer = self.terminal.ask(question)?;
            question = "That token is invalid. Please enter your access token";

            let Some(credential) = Credential::new(&answer) else {
                continue;
            };
            let Some(identity) = self.hosting.verify(&credential)? else {
                continue;
            };
            if let Err(e) = self.store.save(&credential) {
                tracing::warn!(error = %e, "could not save token");
                self.terminal.notify(
                    Tone::Warning,
                    &format!("Could not save the access token: {e}"),
                );
            }
            return Ok(Session {
                credential,
                identity,
            });
        }
    }

    // -----------------------------------------------------------------------
    // Questions
    // -----------------------------------------------------------------------

    /// Ask every question for the current mode. The only check with an
    /// outside effect is the collision test on the project directory.
    pub fn collect_project(&mut self) -> Result<ProjectSpec> {
        let mode = self.options.mode;
        let name = self.ask_name()?;

        let description = if mode.asks_description() {
            non_empty(self.terminal.ask("Please enter a project description")?)
        } else {
            None
        };

        let private = self.terminal.confirm("Should the project be private?")?;

        let ignore_keys = if mode.applies_ignores() {
            self.ask_ignore_keys()?
        } else {
            Vec::new()
        };

        let license = if mode.asks_license() {
            self.ask_license()?
        } else {
            None
        };

        let commit_message = if mode.asks_commit_message() {
            non_empty(self.terminal.ask("Please enter a commit message")?)
        } else {
            None
        };

        Ok(ProjectSpec {
            name,
            description,
            private,
            ignore_keys,
            license,
            commit_message,
        })
    }

    fn ask_name(&mut self) -> Result<String> {
        let mut attempts = self.retry.start("project name");
        let mut question = "Please enter the project name".to_string();
        loop {
            attempts.attempt()?;
            let name = paths::normalize_name(&self.terminal.ask(&question)?);
            if name.is_empty() {
                question = "Project name can not be empty. Please enter the project name".into();
                continue;
            }
            if let Err(e) = paths::validate_name(&name) {
                question = format!("{e}. Please enter the project name");
                continue;
            }
            let dir = paths::project_dir(&self.cwd, &name);
            if dir.exists() {
                return Err(PronitError::DirectoryExists(dir.display().to_string()));
            }
            return Ok(name);
        }
    }

    fn ask_ignore_keys(&mut self) -> Result<Vec<String>> {
        loop {
            let answer = self.terminal.ask(
                "Please enter the names of all languages or platforms you want to apply \
                 to the .gitignore (comma separated, ? to list them)",
            )?;
            if answer.trim() == "?" {
                let keys: Vec<&str> = catalog::keys().collect();
                self.terminal.notify(Tone::Info, &keys.join(", "));
                continue;
            }
            return Ok(catalog::parse_ignore_keys(&answer));
        }
    }

    fn ask_license(&mut self) -> Result<Option<License>> {
        let answer = self.terminal.ask(&format!(
            "Please enter a number corresponding to your license of choice: {}. \
             For help choosing a license see https://choosealicense.com",
            catalog::license_menu()
        ))?;
        match catalog::parse_license_choice(&answer) {
            Ok(license) => Ok(license),
            Err(e) => {
                self.terminal.notify(
                    Tone::Warning,
                    &format!("{e}; no license will be added"),
                );
                Ok(None)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Side effects
    // -----------------------------------------------------------------------

    pub fn execute(&mut self, session: &Session, spec: &ProjectSpec) -> Result<Published> {
        let dir = paths::project_dir(&self.cwd, &spec.name);

        scaffold::create_project_directory(&dir)?;
        scaffold::write_readme(&dir, &spec.name, spec.description.as_deref())?;
        self.hosting.create_repository(
            &session.credential,
            &spec.name,
            spec.description.as_deref(),
            spec.private,
        )?;
        self.terminal
            .notify(Tone::Success, "Remote repository has been created");
        self.advance(Stage::ProjectCreated);

        if self.options.mode.applies_ignores() {
            self.apply_ignores(&dir, &spec.ignore_keys)?;
        }
        self.advance(Stage::IgnoreApplied);

        if let Some(license) = spec.license {
            self.apply_license(&dir, license)?;
        }
        self.advance(Stage::LicenseApplied);

        let message = self.commit_message(spec);
        let remote = self.config.remote_url(&session.identity, &spec.name);
        let branch = VcsDriver::new(self.git, &dir).publish(
            &remote,
            &message,
            &self.config.fallback_branch,
        )?;
        self.advance(Stage::Published);

        let url = self.config.repository_url(&session.identity, &spec.name);
        self.terminal.notify(
            Tone::Success,
            &format!(
                "{} has been successfully initialized. It is now live on {url}",
                spec.name
            ),
        );
        Ok(Published {
            identity: session.identity.clone(),
            directory: dir,
            branch,
            url,
        })
    }

    /// Fetch and append each known template. Unknown keys are skipped
    /// quietly; fetch failures are reported and skipped.
    fn apply_ignores(&mut self, dir: &Path, keys: &[String]) -> Result<()> {
        for key in keys {
            let Some(path) = catalog::lookup(key) else {
                tracing::debug!(%key, "no ignore template for key");
                continue;
            };
            match self.hosting.fetch_ignore_template(path) {
                Ok(template) => {
                    scaffold::append_ignore(dir, &template)?;
                    tracing::debug!(%key, %path, "ignore template applied");
                }
                Err(e) => {
                    tracing::warn!(%key, error = %e, "ignore template skipped");
                    self.terminal.notify(
                        Tone::Warning,
                        &format!("Could not add the .gitignore template for {key}: {e}"),
                    );
                }
            }
        }
        Ok(())
    }

    fn apply_license(&mut self, dir: &Path, license: License) -> Result<()> {
        match self.hosting.fetch_license_text(license.id) {
            Ok(text) => scaffold::write_license(dir, &text),
            Err(e) => {
                tracing::warn!(license = license.id, error = %e, "license skipped");
                self.terminal.notify(
                    Tone::Warning,
                    &format!(
                        "Could not add the {} license: {e}",
                        license.display_name
                    ),
                );
                Ok(())
            }
        }
    }

    fn commit_message(&mut self, spec: &ProjectSpec) -> String {
        if let Some(message) = &spec.commit_message {
            return message.clone();
        }
        if self.options.random_message {
            match self.hosting.fetch_commit_message() {
                Ok(message) if !message.is_empty() => return message,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "random commit message unavailable");
                    self.terminal.notify(
                        Tone::Warning,
                        &format!(
                            "Could not get a random commit message: {e}; using \"{}\"",
                            self.config.default_commit_message
                        ),
                    );
                }
            }
        }
        self.config.default_commit_message.clone()
    }
}

fn non_empty(answer: String) -> Option<String> {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
