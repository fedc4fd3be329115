//! Persistence of the notifier configuration.
//!
//! The host owns where configuration lives; this crate only needs load and
//! save. `TomlFileStore` keeps it in a TOML file, `MemoryStore` keeps it in
//! process (embedding and tests).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::{NotifierError, NotifierResult};
use crate::models::NotifierConfig;

/// Storage collaborator for `NotifierConfig`
pub trait ConfigStore: Send + Sync {
    /// Load the stored configuration, `None` if nothing was saved yet
    fn load(&self) -> NotifierResult<Option<NotifierConfig>>;

    /// Persist the configuration, replacing whatever was stored
    fn save(&self, config: &NotifierConfig) -> NotifierResult<()>;
}

/// TOML file backed store
#[derive(Debug, Clone)]
pub struct TomlFileStore {
    path: PathBuf,
}

impl TomlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for TomlFileStore {
    fn load(&self) -> NotifierResult<Option<NotifierConfig>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No stored notifier configuration");
            return Ok(None);
        }

        let text = fs::read_to_string(&self.path).map_err(|e| {
            NotifierError::storage(format!("read {}", self.path.display()), e)
        })?;
        let config = toml::from_str(&text).map_err(|e| {
            NotifierError::storage(format!("parse {}", self.path.display()), e)
        })?;

        Ok(Some(config))
    }

    fn save(&self, config: &NotifierConfig) -> NotifierResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                NotifierError::storage(format!("create {}", parent.display()), e)
            })?;
        }

        let text = toml::to_string_pretty(config)
            .map_err(|e| NotifierError::storage("serialize notifier configuration", e))?;

        // Write next to the target and rename so readers never see a partial file
        let staging = self.path.with_extension("toml.tmp");
        fs::write(&staging, text).map_err(|e| {
            NotifierError::storage(format!("write {}", staging.display()), e)
        })?;
        fs::rename(&staging, &self.path).map_err(|e| {
            NotifierError::storage(format!("replace {}", self.path.display()), e)
        })?;

        tracing::debug!(path = %self.path.display(), "Saved notifier configuration");
        Ok(())
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    config: Mutex<Option<NotifierConfig>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NotifierConfig) -> Self {
        Self {
            config: Mutex::new(Some(config)),
        }
    }

    /// What was last saved, if anything
    pub fn stored(&self) -> Option<NotifierConfig> {
        self.config
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> NotifierResult<Option<NotifierConfig>> {
        Ok(self.stored())
    }

    fn save(&self, config: &NotifierConfig) -> NotifierResult<()> {
        *self.config.lock().unwrap_or_else(PoisonError::into_inner) = Some(config.clone());
        Ok(())
    }
}

/// Store that serves a fixed configuration and refuses every save
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ReadOnlyStore {
    config: Option<NotifierConfig>,
}

#[cfg(test)]
impl ReadOnlyStore {
    pub fn with_config(config: NotifierConfig) -> Self {
        Self {
            config: Some(config),
        }
    }
}

#[cfg(test)]
impl ConfigStore for ReadOnlyStore {
    fn load(&self) -> NotifierResult<Option<NotifierConfig>> {
        Ok(self.config.clone())
    }

    fn save(&self, _config: &NotifierConfig) -> NotifierResult<()> {
        Err(NotifierError::storage(
            "save notifier configuration",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        ))
    }
}
