//! Rewriting wikilinks and embeds into portable markdown links.
//!
//! `[[Note]]` becomes `[Note](/path/to/Note.md)` and `![[image 1.png]]`
//! becomes `![image 1](/assets/image%201.png)`. The display text is always
//! the resolved file's own name; author aliases are dropped.
//!
//! Rewriting is pure: embedded assets are returned as [`AssetCopy`]
//! requests for the caller to carry out.

use crate::parser::wikilink::{split_reference, REFERENCE};
use crate::parser::{find_code_block_ranges, is_in_code_block};
use crate::types::LinkTarget;
use log::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// What to do with a reference that does not resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BrokenLinkPolicy {
    /// Remove the reference from the output.
    #[default]
    Drop,
    /// Remove the reference and log a warning.
    Warn,
    /// Leave the original wikilink text in place.
    Keep,
}

/// An embedded file that must be copied next to the exported notes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AssetCopy {
    /// Vault-relative path, identical under the destination root.
    pub path: PathBuf,
}

impl AssetCopy {
    /// Source and destination of the copy.
    pub fn endpoints(&self, source_root: &Path, dest_root: &Path) -> (PathBuf, PathBuf) {
        (source_root.join(&self.path), dest_root.join(&self.path))
    }
}

/// Result of rewriting one note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewrite {
    /// The rewritten content.
    pub content: String,
    /// Assets to copy, in order of first appearance, without duplicates.
    pub copies: Vec<AssetCopy>,
    /// Reference targets that did not resolve.
    pub broken: Vec<String>,
    /// Number of references rewritten.
    pub resolved: usize,
}

/// Format a resolved reference in portable syntax.
pub fn format_reference(target: &LinkTarget, embed: bool) -> String {
    if embed {
        let path = WHITESPACE.replace_all(&target.path, "%20");
        format!("![{}](/{})", target.basename, path)
    } else {
        format!("[{}](/{})", target.basename, target.path)
    }
}

/// Rewrite every wikilink and embed in `content`.
///
/// `resolve` maps a reference target and the note's own path to a
/// [`LinkTarget`].
///
/// References inside fenced blocks or inline code spans are not rewritten,
/// so code samples showing wikilink syntax survive verbatim. A plain
/// regex replace would rewrite them too.
pub fn rewrite_references<F>(
    content: &str,
    note_path: &Path,
    resolve: F,
    policy: BrokenLinkPolicy,
) -> Rewrite
where
    F: Fn(&str, &Path) -> Option<LinkTarget>,
{
    let code_ranges = find_code_block_ranges(content);
    let mut out = Rewrite {
        content: String::with_capacity(content.len()),
        ..Default::default()
    };
    let mut last = 0;

    for cap in REFERENCE.captures_iter(content) {
        let Some(full) = cap.get(0) else { continue };
        if is_in_code_block(full.start(), &code_ranges) {
            continue;
        }

        out.content.push_str(&content[last..full.start()]);
        last = full.end();

        let embed = cap.get(1).is_some();
        let (target, _alias) = split_reference(&cap[2]);

        match resolve(target, note_path) {
            Some(resolved) => {
                if embed {
                    let copy = AssetCopy {
                        path: PathBuf::from(&resolved.path),
                    };
                    if !out.copies.contains(&copy) {
                        out.copies.push(copy);
                    }
                }
                out.content.push_str(&format_reference(&resolved, embed));
                out.resolved += 1;
            }
            None => {
                match policy {
                    BrokenLinkPolicy::Drop => {}
                    BrokenLinkPolicy::Warn => {
                        warn!("{}: broken reference '{}'", note_path.display(), target);
                    }
                    BrokenLinkPolicy::Keep => out.content.push_str(full.as_str()),
                }
                out.broken.push(target.to_string());
            }
        }
    }

    out.content.push_str(&content[last..]);
    out
}
