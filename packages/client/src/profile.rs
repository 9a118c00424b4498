//! Saved display name.
//!
//! The generated `Anon-NNNN` name is written once to the user's config
//! directory and reused on later launches.

use std::{fs, path::PathBuf};

use directories::BaseDirs;

use super::{domain::default_username, error::ClientError};

const PROFILE_DIR: &str = "realm";
const USERNAME_FILE: &str = "username";

/// File-backed store for the anonymous username
#[derive(Debug, Clone)]
pub struct UsernameStore {
    path: PathBuf,
}

impl UsernameStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under `<config dir>/realm/username`, if a config dir can be determined
    pub fn in_config_dir() -> Option<Self> {
        let base = BaseDirs::new()?;
        Some(Self::new(
            base.config_dir().join(PROFILE_DIR).join(USERNAME_FILE),
        ))
    }

    /// Read the saved username. A missing or blank file yields `None`.
    pub fn load(&self) -> Result<Option<String>, ClientError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let name = raw.trim();
        Ok((!name.is_empty()).then(|| name.to_string()))
    }

    pub fn save(&self, username: &str) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, format!("{}\n", username))?;
        Ok(())
    }

    /// Return the saved username, generating and saving a new one on first use
    pub fn load_or_create(&self) -> Result<String, ClientError> {
        if let Some(name) = self.load()? {
            return Ok(name);
        }
        let name = default_username();
        self.save(&name)?;
        tracing::debug!("Saved username '{}' to {}", name, self.path.display());
        Ok(name)
    }
}
