use anyhow::Context;
use std::path::Path;

/// Open the project directory in `editor`, which must be on `PATH`.
pub fn open_project(editor: &str, dir: &Path) -> anyhow::Result<()> {
    let program = which::which(editor).with_context(|| format!("'{editor}' not found on PATH"))?;
    tracing::debug!(editor = %program.display(), dir = %dir.display(), "opening project");
    open::with(dir, program.to_string_lossy())
        .with_context(|| format!("failed to launch {}", program.display()))?;
    Ok(())
}
