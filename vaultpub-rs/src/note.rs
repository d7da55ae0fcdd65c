//! Note representation.

use crate::error::Result;
use crate::parser::{parse_all_links, parse_frontmatter_with_path};
use crate::types::{Link, NoteMetadata};
use log::warn;
use serde_yaml::Value as YamlValue;
use std::path::{Path, PathBuf};

/// Represents a note in the vault.
#[derive(Debug, Clone)]
pub struct Note {
    /// Path relative to vault root (e.g., "proj/My Project.md").
    pub path: PathBuf,

    /// Raw content of the note.
    pub content: String,
}

impl Note {
    /// Create a new note from path and content.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Load a note from disk.
    pub fn load(vault_root: &Path, relative_path: &Path) -> Result<Self> {
        let full_path = vault_root.join(relative_path);
        let content = std::fs::read_to_string(&full_path)?;
        Ok(Self::new(relative_path, content))
    }

    /// Parse frontmatter as YAML value.
    pub fn frontmatter(&self) -> Result<Option<YamlValue>> {
        parse_frontmatter_with_path(&self.content, &self.path)
    }

    /// Parse all links and embeds in the note.
    pub fn links(&self) -> Vec<Link> {
        parse_all_links(&self.content)
    }

    /// Build the index metadata for this note.
    ///
    /// Broken frontmatter is logged and treated as absent, which keeps the
    /// note out of any export.
    pub fn metadata(&self) -> NoteMetadata {
        let frontmatter = self.frontmatter().unwrap_or_else(|e| {
            warn!("{}", e);
            None
        });
        NoteMetadata::from_parts(frontmatter, self.links())
    }
}
