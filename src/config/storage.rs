//! Persistence gateway for the config blob
//!
//! `ConfigStorage` is the opaque boundary to durable storage; the stores and
//! the assembler only ever see the trait. The default implementation keeps
//! the blob as pretty-printed JSON on disk with atomic writes.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use super::defaults::DEFAULT_CONFIG_PATH;
use super::types::AppConfig;
use crate::error::{Error, Result};

/// Opaque load/save boundary to durable storage.
///
/// Contract: `load` resolves a *missing* blob to the default config, since
/// absence is an expected first-run state, not an error; unreadable or
/// corrupt content is an error (callers downgrade it, see the stores' load
/// policy). `save` either completes or returns an error; a failed save must
/// not be visible as a torn blob to a subsequent `load`.
pub trait ConfigStorage: Send + Sync {
    fn load(&self) -> Result<AppConfig>;
    fn save(&self, config: &AppConfig) -> Result<()>;
}

/// File-backed storage: pretty JSON, atomic save (write temp + rename).
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Storage at the default location (~/.scriptdeck/config.json).
    pub fn new() -> Self {
        Self::with_path(PathBuf::from(shellexpand::tilde(DEFAULT_CONFIG_PATH).as_ref()))
    }

    /// Storage at a custom path (tests, `--config` overrides).
    pub fn with_path(path: PathBuf) -> Self {
        JsonFileStorage { path }
    }

    /// Location of the persisted blob.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStorage for JsonFileStorage {
    #[instrument(name = "config_load", skip(self))]
    fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "Config file not found, using defaults");
            return Ok(AppConfig::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::Persistence(format!("failed to read {}: {}", self.path.display(), e))
        })?;

        let config: AppConfig = serde_json::from_str(&content).map_err(|e| {
            Error::Persistence(format!("failed to parse {}: {}", self.path.display(), e))
        })?;

        info!(
            path = %self.path.display(),
            scripts = config.scripts.len(),
            snippets = config.snippets.len(),
            "Loaded config"
        );
        Ok(config)
    }

    #[instrument(name = "config_save", skip_all)]
    fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::Persistence(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(config)
            .map_err(|e| Error::Persistence(format!("failed to serialize config: {}", e)))?;

        // Atomic write: temp file then rename, so a crash mid-save never
        // leaves a torn blob behind.
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, &json).map_err(|e| {
            Error::Persistence(format!("failed to write {}: {}", temp_path.display(), e))
        })?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| {
            Error::Persistence(format!(
                "failed to rename temp file to {}: {}",
                self.path.display(),
                e
            ))
        })?;

        debug!(
            path = %self.path.display(),
            bytes = json.len(),
            scripts = config.scripts.len(),
            snippets = config.snippets.len(),
            "Saved config"
        );
        Ok(())
    }
}
