//! Link target resolution.
//!
//! References resolve in this order:
//! 1. Exact vault path (with or without the `.md` extension)
//! 2. Path relative to the folder of the linking note
//! 3. File name or path suffix match, preferring the shallowest path
//! 4. Alias match from frontmatter
//!
//! All comparisons are case-insensitive. A `#heading` or `#^block` suffix is
//! ignored, and an empty reference (`[[#Heading]]`) resolves to the linking
//! note itself.

use crate::path_util::{normalize, to_slash};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Lookup table over every file in a vault.
#[derive(Debug, Default, Clone)]
pub struct FileTable {
    /// Vault-relative file paths, sorted.
    files: Vec<PathBuf>,
    /// Lowercased slash path of each file, parallel to `files`.
    keys: Vec<String>,
    /// Lowercased slash path to file position.
    by_key: HashMap<String, usize>,
    /// Lowercased alias to file position.
    aliases: HashMap<String, usize>,
}

impl FileTable {
    /// Build a table from vault-relative paths.
    pub fn new(mut files: Vec<PathBuf>) -> Self {
        files.sort();
        files.dedup();

        let keys: Vec<String> = files.iter().map(|p| to_slash(p).to_lowercase()).collect();
        let by_key = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.clone(), i))
            .collect();

        Self {
            files,
            keys,
            by_key,
            aliases: HashMap::new(),
        }
    }

    /// All files in the table.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Register a frontmatter alias for a file already in the table.
    ///
    /// The first registration of an alias wins.
    pub fn add_alias(&mut self, alias: &str, path: &Path) {
        if let Some(&idx) = self.by_key.get(&to_slash(path).to_lowercase()) {
            self.aliases.entry(alias.to_lowercase()).or_insert(idx);
        }
    }

    /// Case-insensitive exact lookup of a vault-relative path.
    pub fn lookup(&self, path: &Path) -> Option<&Path> {
        self.lookup_key(&to_slash(path).to_lowercase())
    }

    fn lookup_key(&self, key: &str) -> Option<&Path> {
        self.by_key.get(key).map(|&i| self.files[i].as_path())
    }

    /// Resolve a reference written in the note at `base`.
    pub fn resolve(&self, reference: &str, base: &Path) -> Option<&Path> {
        let linkpath = reference.split('#').next().unwrap_or("").trim();
        if linkpath.is_empty() {
            return self.lookup(base);
        }

        // A leading slash still means "from the vault root"
        let linkpath = linkpath.trim_start_matches('/');
        let key = linkpath.to_lowercase();

        // 1. Exact vault path
        if let Some(found) = candidates(&key).iter().find_map(|k| self.lookup_key(k)) {
            return Some(found);
        }

        // 2. Relative to the linking note
        if let Some(folder) = base.parent() {
            let joined = normalize(&folder.join(linkpath));
            let joined_key = to_slash(&joined).to_lowercase();
            if !joined_key.starts_with("..") {
                if let Some(found) = candidates(&joined_key)
                    .iter()
                    .find_map(|k| self.lookup_key(k))
                {
                    return Some(found);
                }
            }
        }

        // 3. Name or path suffix
        if let Some(found) = self.best_suffix_match(&key) {
            return Some(found);
        }

        // 4. Alias
        self.aliases.get(&key).map(|&i| self.files[i].as_path())
    }

    fn best_suffix_match(&self, key: &str) -> Option<&Path> {
        let suffixes: Vec<String> = candidates(key).iter().map(|c| format!("/{}", c)).collect();

        self.keys
            .iter()
            .enumerate()
            .filter(|(_, k)| suffixes.iter().any(|s| k.ends_with(s.as_str())))
            .map(|(i, _)| self.files[i].as_path())
            .min_by_key(|p| (p.components().count(), p.to_path_buf()))
    }
}

/// The key itself, plus the key with `.md` appended unless it already ends
/// with it.
fn candidates(key: &str) -> Vec<String> {
    if key.ends_with(".md") {
        vec![key.to_string()]
    } else {
        vec![key.to_string(), format!("{}.md", key)]
    }
}
