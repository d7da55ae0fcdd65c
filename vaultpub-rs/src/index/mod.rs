//! The note-graph index the export pipeline reads from.
//!
//! The pipeline never touches a concrete vault directly: it asks a
//! [`NoteIndex`] for the note listing, parsed metadata, link resolution and
//! note content. [`crate::Vault`] implements it over a directory on disk.

mod resolution;

pub use resolution::FileTable;

use crate::error::Result;
use crate::types::{LinkTarget, NoteMetadata};
use std::path::{Path, PathBuf};

/// Read access to a collection of notes and the files they reference.
pub trait NoteIndex: Sync {
    /// Filesystem root of the collection.
    fn base_path(&self) -> &Path;

    /// Relative paths of every note in the collection.
    fn list_notes(&self) -> Result<Vec<PathBuf>>;

    /// Parsed metadata for a note, or `None` if the index has none for it.
    fn metadata(&self, path: &Path) -> Option<&NoteMetadata>;

    /// Resolve a reference written inside the note at `base`.
    ///
    /// Returns `None` for broken references.
    fn resolve_link(&self, reference: &str, base: &Path) -> Option<LinkTarget>;

    /// Read the raw content of a note.
    fn read_content(&self, path: &Path) -> Result<String>;
}
