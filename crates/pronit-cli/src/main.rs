mod console;
mod editor;

use anyhow::Context;
use clap::Parser;
use console::{LineTerminal, Theme};
use pronit_core::{
    config::Config,
    credential::CredentialStore,
    hosting::HostingClient,
    paths,
    terminal::{Terminal, Tone},
    vcs::SystemGit,
    workflow::{Mode, Options, Workflow},
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pronit",
    about = "A tool that automates project initialization",
    version
)]
struct Cli {
    /// Run in minimal mode (name and visibility only)
    #[arg(short, long, conflicts_with = "extended")]
    minimal: bool,

    /// Run in extended mode (also asks for a license and commit message)
    #[arg(short, long)]
    extended: bool,

    /// Open the project in the configured editor afterwards
    #[arg(short, long)]
    code: bool,

    /// Use a random commit message unless one is given
    #[arg(short, long)]
    random_message: bool,

    /// Directory holding the token and config.yaml (default: ~/.pronit)
    #[arg(long, env = "PRONIT_HOME")]
    home: Option<PathBuf>,

    /// Hosting API base URL
    #[arg(long, env = "PRONIT_API_URL")]
    api_url: Option<String>,

    /// Base URL for .gitignore templates
    #[arg(long, env = "PRONIT_RAW_URL")]
    raw_url: Option<String>,

    /// Give up after this many invalid tokens or project names
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn mode(&self) -> Mode {
        if self.minimal {
            Mode::Minimal
        } else if self.extended {
            Mode::Extended
        } else {
            Mode::Default
        }
    }

    fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(url) = &self.raw_url {
            config.raw_url = url.clone();
        }
        if self.max_attempts.is_some() {
            config.max_attempts = self.max_attempts;
        }
    }
}

/// `RUST_LOG` directives when given and valid, `warn` otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let theme = Theme::detect(cli.no_color);

    if let Err(e) = run(&cli, &theme) {
        eprintln!("{}", theme.paint(Tone::Error, &format!("error: {e:#}")));
        std::process::exit(1);
    }
}

fn run(cli: &Cli, theme: &Theme) -> anyhow::Result<()> {
    let home = paths::pronit_home(cli.home.as_deref())?;
    let mut config = Config::load(&home)?;
    cli.apply_overrides(&mut config);

    let hosting = HostingClient::new(&config).context("failed to build HTTP client")?;
    let git = SystemGit::new();
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let mut terminal = LineTerminal::stdio(theme.clone());

    let options = Options {
        mode: cli.mode(),
        random_message: cli.random_message,
    };
    let published = Workflow::new(
        &config,
        options,
        CredentialStore::new(&home),
        &hosting,
        &git,
        &mut terminal,
        &cwd,
    )
    .run()?;

    if cli.code {
        if let Err(e) = editor::open_project(&config.editor, &published.directory) {
            tracing::debug!(error = %e, "editor launch failed");
            terminal.notify(
                Tone::Warning,
                &format!(
                    "Failed to open project with {}. Is it correctly installed? ({e})",
                    config.editor
                ),
            );
        }
    }

    Ok(())
}
