//! Vault representation and indexing.

use crate::error::{PublishError, Result};
use crate::index::{FileTable, NoteIndex};
use crate::note::Note;
use crate::path_util::{filename, is_child, to_slash};
use crate::types::{LinkTarget, NoteMetadata};
use log::{debug, warn};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// An Obsidian-style vault on disk, indexed once at open time.
#[derive(Debug, Clone)]
pub struct Vault {
    /// Root path of the vault.
    pub root: PathBuf,

    /// Every non-hidden file, notes and assets alike.
    files: FileTable,

    /// Parsed metadata per note path.
    metadata: HashMap<PathBuf, NoteMetadata>,
}

impl Vault {
    /// Open and index a vault.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        Self::open_excluding(root, None)
    }

    /// Open and index a vault, ignoring everything under `excluded`.
    ///
    /// Used to keep a previous export nested inside the vault from being
    /// indexed as vault content.
    pub fn open_excluding(root: impl Into<PathBuf>, excluded: Option<&Path>) -> Result<Self> {
        let root = root.into();

        if !root.is_dir() {
            return Err(PublishError::VaultNotFound(root));
        }

        let paths = walk_files(&root, excluded)?;
        let mut files = FileTable::new(paths);

        let notes: Vec<PathBuf> = files.files().iter().filter(|p| is_note_path(p)).cloned().collect();

        let metadata: HashMap<PathBuf, NoteMetadata> = notes
            .par_iter()
            .filter_map(|path| match Note::load(&root, path) {
                Ok(note) => Some((path.clone(), note.metadata())),
                Err(e) => {
                    warn!("skipping unreadable note {}: {}", path.display(), e);
                    None
                }
            })
            .collect();

        for (path, meta) in &metadata {
            for alias in aliases_of(meta) {
                files.add_alias(&alias, path);
            }
        }

        debug!(
            "indexed {} files ({} notes) under {}",
            files.files().len(),
            metadata.len(),
            root.display()
        );

        Ok(Self {
            root,
            files,
            metadata,
        })
    }

    /// Load a note from the vault.
    pub fn load_note(&self, relative_path: &Path) -> Result<Note> {
        if self.files.lookup(relative_path).is_none() {
            return Err(PublishError::NoteNotFound(relative_path.to_path_buf()));
        }
        Note::load(&self.root, relative_path)
    }
}

impl NoteIndex for Vault {
    fn base_path(&self) -> &Path {
        &self.root
    }

    fn list_notes(&self) -> Result<Vec<PathBuf>> {
        Ok(self
            .files
            .files()
            .iter()
            .filter(|p| is_note_path(p))
            .cloned()
            .collect())
    }

    fn metadata(&self, path: &Path) -> Option<&NoteMetadata> {
        self.metadata.get(path)
    }

    fn resolve_link(&self, reference: &str, base: &Path) -> Option<LinkTarget> {
        self.files
            .resolve(reference, base)
            .map(|path| LinkTarget::new(to_slash(path), filename(path)))
    }

    fn read_content(&self, path: &Path) -> Result<String> {
        Ok(self.load_note(path)?.content)
    }
}

/// Whether a vault-relative path is a markdown note.
pub fn is_note_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// Collect vault-relative paths of all non-hidden files.
fn walk_files(root: &Path, excluded: Option<&Path>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root).follow_links(true).into_iter().filter_entry(|e| {
        !is_hidden(e) && !excluded.is_some_and(|x| e.path() == x || is_child(x, e.path()))
    });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                // Log but continue on unreadable entries
                warn!("walk error: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if let Ok(relative) = entry.path().strip_prefix(root) {
            files.push(relative.to_path_buf());
        }
    }

    Ok(files)
}

/// Aliases declared in frontmatter, as a list or a single string.
fn aliases_of(meta: &NoteMetadata) -> Vec<String> {
    let Some(aliases) = meta.frontmatter.as_ref().and_then(|fm| fm.get("aliases")) else {
        return Vec::new();
    };

    if let Some(seq) = aliases.as_sequence() {
        seq.iter()
            .filter_map(|a| a.as_str().map(str::to_string))
            .collect()
    } else {
        aliases.as_str().map(|a| vec![a.to_string()]).unwrap_or_default()
    }
}
