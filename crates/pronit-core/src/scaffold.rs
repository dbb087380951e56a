use crate::error::{PronitError, Result};
use crate::io;
use crate::paths;
use std::path::Path;

/// Create the project directory. Never merges into an existing one.
pub fn create_project_directory(path: &Path) -> Result<()> {
    match std::fs::create_dir(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "project directory created");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            Err(PronitError::DirectoryExists(path.display().to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn write_readme(project: &Path, name: &str, description: Option<&str>) -> Result<()> {
    let mut content = format!("# {name}\n");
    if let Some(description) = description.map(str::trim).filter(|d| !d.is_empty()) {
        content.push('\n');
        content.push_str(description);
        content.push('\n');
    }
    std::fs::write(paths::readme_path(project), content)?;
    Ok(())
}

/// Append one template to `.gitignore`, keeping whatever is already there.
pub fn append_ignore(project: &Path, template: &str) -> Result<()> {
    io::append_block(&paths::gitignore_path(project), template)
}

pub fn write_license(project: &Path, text: &str) -> Result<()> {
    std::fs::write(paths::license_path(project), text)?;
    Ok(())
}
