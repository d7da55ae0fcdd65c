//! Configuration file support.

use crate::error::{PublishError, Result};
use crate::export::{ExportOptions, DEFAULT_EXTENSION};
use crate::rewrite::BrokenLinkPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default destination directory name, relative to the vault root.
pub const DEFAULT_EXPORT_DIR: &str = "__EXPORT__";

/// Application configuration loaded from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default vault path
    pub vault: Option<PathBuf>,

    /// Export settings
    pub export: ExportConfig,
}

/// The `[export]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Destination directory; relative paths are taken from the vault root.
    pub dir: PathBuf,

    /// Extension for exported notes, without the dot.
    pub extension: String,

    /// What to do with references that do not resolve.
    pub broken_links: BrokenLinkPolicy,

    /// Worker count; unset uses one per core.
    pub threads: Option<usize>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            broken_links: BrokenLinkPolicy::default(),
            threads: None,
        }
    }
}

impl ExportConfig {
    /// Export options as configured, before any CLI overrides.
    pub fn options(&self) -> ExportOptions {
        ExportOptions {
            broken_links: self.broken_links,
            threads: self.threads,
            extension: self.extension.trim_start_matches('.').to_string(),
            dry_run: false,
        }
    }
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| PublishError::fs("read", path, e))?;
        toml::from_str(&contents)
            .map_err(|e| PublishError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/vaultpub/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vaultpub")
            .join("config.toml")
    }

    /// Resolve the vault path, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--vault` argument
    /// 2. Config file `vault` setting
    /// 3. Current working directory
    ///
    /// The result is absolute and must be an existing directory.
    pub fn resolve_vault_path(&self, cli_vault: Option<&Path>) -> Result<PathBuf> {
        let path = cli_vault
            .map(Path::to_path_buf)
            .or_else(|| self.vault.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        let path = std::path::absolute(&path)?;
        if !path.is_dir() {
            return Err(PublishError::VaultNotFound(path));
        }
        Ok(crate::path_util::normalize(&path))
    }
}
