use crate::vcs::VcsStep;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PronitError {
    #[error("This project already exists: {0}")]
    DirectoryExists(String),

    #[error("invalid project name '{0}': use letters, digits, '.', '_' or '-'")]
    InvalidName(String),

    #[error("invalid license choice '{0}'")]
    InvalidLicenseIndex(String),

    #[error("Failed to create remote repository{}: {message}", format_status(.status))]
    RemoteCreation {
        status: Option<u16>,
        message: String,
    },

    #[error("failed to fetch {what} (HTTP {status})")]
    Fetch { what: String, status: u16 },

    #[error("{}{}", .step.failure_message(), format_diagnostics(.diagnostics))]
    Vcs { step: VcsStep, diagnostics: String },

    #[error("aborted")]
    Aborted,

    #[error("gave up after {attempts} attempts: {what}")]
    AttemptsExhausted { what: String, attempts: u32 },

    #[error("home directory not found: set HOME or pass --home")]
    HomeNotFound,

    #[error("invalid config file {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {code})"),
        None => String::new(),
    }
}

fn format_diagnostics(diagnostics: &str) -> String {
    if diagnostics.is_empty() {
        String::new()
    } else {
        format!("\n{diagnostics}")
    }
}

/// Coarse classification of a [`PronitError`], used to decide what the
/// workflow does with a failure and to let callers match on category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    DirectoryExists,
    RemoteCreation,
    Enrichment,
    Vcs,
    Aborted,
    Io,
    Config,
}

impl PronitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PronitError::InvalidName(_) | PronitError::InvalidLicenseIndex(_) => {
                ErrorKind::Validation
            }
            PronitError::DirectoryExists(_) => ErrorKind::DirectoryExists,
            PronitError::RemoteCreation { .. } => ErrorKind::RemoteCreation,
            PronitError::Fetch { .. } | PronitError::Http(_) | PronitError::Json(_) => {
                ErrorKind::Enrichment
            }
            PronitError::Vcs { .. } => ErrorKind::Vcs,
            PronitError::Aborted | PronitError::AttemptsExhausted { .. } => ErrorKind::Aborted,
            PronitError::Io(_) => ErrorKind::Io,
            PronitError::HomeNotFound | PronitError::Config { .. } => ErrorKind::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, PronitError>;
