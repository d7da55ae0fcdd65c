//! Error types and exit codes for vaultpub.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const VAULT_NOT_FOUND: i32 = 2;
    pub const EXPORT_CANCELLED: i32 = 3;
    pub const INVALID_FRONTMATTER: i32 = 4;
    pub const PARTIAL_FAILURE: i32 = 6;
}

/// Main error type for vaultpub operations.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Vault not found at: {0}")]
    VaultNotFound(PathBuf),

    #[error("Note not found: {0}")]
    NoteNotFound(PathBuf),

    #[error("Invalid frontmatter in {path}: {message}")]
    InvalidFrontmatter { path: PathBuf, message: String },

    #[error("Export cancelled: {0} was not cleared")]
    ExportCancelled(PathBuf),

    #[error("Export destination {dest} is the vault root")]
    DestinationIsVault { dest: PathBuf },

    #[error("Failed to {action} {path}: {source}")]
    Fs {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

}

impl PublishError {
    /// Wrap an I/O error with the action and path that produced it.
    pub fn fs(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PublishError::Fs {
            action,
            path: path.into(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            PublishError::VaultNotFound(_) => exit_code::VAULT_NOT_FOUND,
            PublishError::ExportCancelled(_) => exit_code::EXPORT_CANCELLED,
            PublishError::InvalidFrontmatter { .. } => exit_code::INVALID_FRONTMATTER,
            _ => exit_code::GENERAL_ERROR,
        }
    }
}

/// Result type alias for vaultpub operations.
pub type Result<T> = std::result::Result<T, PublishError>;

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    PartialFailure,
}

impl ExitCode {
    /// Convert to exit code integer.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => exit_code::SUCCESS,
            ExitCode::PartialFailure => exit_code::PARTIAL_FAILURE,
        }
    }
}
