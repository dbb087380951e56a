//! Persistent storage of the hosting access token.
//!
//! The token lives as raw text in `<pronit home>/token`. Writes go through a
//! tempfile + rename so an interrupted save never corrupts a working token.

use crate::error::Result;
use crate::io;
use crate::paths;
use std::fmt;
use std::path::{Path, PathBuf};

/// An opaque bearer token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Build a credential from user input or file content. Surrounding
    /// whitespace is dropped; an empty token is `None`.
    pub fn new(raw: &str) -> Option<Self> {
        let token = raw.trim();
        if token.is_empty() {
            None
        } else {
            Some(Self(token.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Load/save boundary for the token file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(pronit_home: &Path) -> Self {
        Self {
            path: paths::token_path(pronit_home),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token. A missing or unreadable file is not an error.
    pub fn load(&self) -> Option<Credential> {
        if !self.path.is_file() {
            tracing::debug!(path = %self.path.display(), "no stored token");
            return None;
        }
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Credential::new(&content),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not read stored token");
                None
            }
        }
    }

    /// Overwrite the stored token, creating the pronit directory if needed.
    pub fn save(&self, credential: &Credential) -> Result<()> {
        io::atomic_write(&self.path, credential.expose().as_bytes())?;
        restrict_permissions(&self.path)?;
        tracing::debug!(path = %self.path.display(), "token saved");
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_missing_directory_is_none() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::new(&dir.path().join("does-not-exist"));
        assert!(store.load().is_none());
    }

    #[test]
    fn save_creates_directory_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join(".pronit");
        let store = CredentialStore::new(&home);
        store.save(&Credential::new("ghp_secret").unwrap()).unwrap();
        assert!(home.is_dir());
        assert_eq!(store.load().unwrap().expose(), "ghp_secret");
    }

    #[test]
    fn save_overwrites_previous_token() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::new(dir.path());
        store.save(&Credential::new("first").unwrap()).unwrap();
        store.save(&Credential::new("second").unwrap()).unwrap();
        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            "second"
        );
    }

    #[test]
    fn load_trims_hand_edited_file() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::new(dir.path());
        std::fs::write(store.path(), "ghp_abc\n").unwrap();
        assert_eq!(store.load().unwrap().expose(), "ghp_abc");
    }

    #[test]
    fn empty_file_counts_as_absent() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::new(dir.path());
        std::fs::write(store.path(), "  \n").unwrap();
        assert!(store.load().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn saved_token_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::new(dir.path());
        store.save(&Credential::new("ghp_abc").unwrap()).unwrap();
        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn debug_hides_token() {
        let c = Credential::new("ghp_abc").unwrap();
        assert_eq!(format!("{c:?}"), "Credential(***)");
    }
}
